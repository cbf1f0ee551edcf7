use chrono::{NaiveTime, Utc};
use std::sync::Arc;

use crate::accounts::AccountRepositoryTrait;
use crate::accruals::AccrualRepositoryTrait;
use crate::commissions::CommissionRepositoryTrait;
use crate::errors::Result;

use super::dashboard_model::AccountSummary;

/// Read-only reporting over the account accumulators and the payout ledgers
pub struct DashboardService {
    account_repository: Arc<dyn AccountRepositoryTrait>,
    accrual_repository: Arc<dyn AccrualRepositoryTrait>,
    commission_repository: Arc<dyn CommissionRepositoryTrait>,
}

impl DashboardService {
    pub fn new(
        account_repository: Arc<dyn AccountRepositoryTrait>,
        accrual_repository: Arc<dyn AccrualRepositoryTrait>,
        commission_repository: Arc<dyn CommissionRepositoryTrait>,
    ) -> Self {
        Self {
            account_repository,
            accrual_repository,
            commission_repository,
        }
    }

    pub fn get_account_summary(&self, account_id: &str) -> Result<AccountSummary> {
        let account = self.account_repository.get_by_id(account_id)?;

        let today = Utc::now().date_naive();
        let start_of_day = today.and_time(NaiveTime::MIN);

        let today_roi = self
            .accrual_repository
            .total_for_owner_on(&account.id, today)?;
        let today_commission = self
            .commission_repository
            .total_for_beneficiary_since(&account.id, start_of_day)?;

        Ok(AccountSummary {
            account_id: account.id,
            username: account.username,
            referral_code: account.referral_code,
            balance: account.balance,
            total_invested: account.total_invested,
            total_roi: account.total_roi,
            total_commission_earned: account.total_commission_earned,
            today_roi,
            today_commission,
        })
    }
}

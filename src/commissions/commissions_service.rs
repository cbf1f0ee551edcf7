use async_trait::async_trait;
use chrono::Utc;
use log::{debug, warn};
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use crate::accounts::{AccountError, AccountRepositoryTrait};
use crate::constants::DECIMAL_PRECISION;
use crate::errors::Result;

use super::commissions_model::{CommissionRecord, LevelSchedule};
use super::commissions_traits::{CommissionRepositoryTrait, CommissionServiceTrait};

/// Engine distributing multi-level referral commission up the sponsor chain
pub struct CommissionService {
    account_repository: Arc<dyn AccountRepositoryTrait>,
    commission_repository: Arc<dyn CommissionRepositoryTrait>,
    levels: LevelSchedule,
}

impl CommissionService {
    pub fn new(
        account_repository: Arc<dyn AccountRepositoryTrait>,
        commission_repository: Arc<dyn CommissionRepositoryTrait>,
        levels: LevelSchedule,
    ) -> Self {
        Self {
            account_repository,
            commission_repository,
            levels,
        }
    }
}

#[async_trait]
impl CommissionServiceTrait for CommissionService {
    async fn distribute(
        &self,
        source_account_id: &str,
        investment_id: &str,
        amount: Decimal,
    ) -> Result<Vec<CommissionRecord>> {
        let mut current = match self.account_repository.get_by_id(source_account_id) {
            Ok(account) => account,
            Err(AccountError::NotFound(_)) => {
                warn!(
                    "Investor {} not found, skipping commission for investment {}",
                    source_account_id, investment_id
                );
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut paid = Vec::new();

        // Levels are strictly sequential: each level's upline is derived from
        // the previous level's account.
        for (index, percentage) in self.levels.percentages().iter().enumerate() {
            let level = index as i32 + 1;

            let upline_id = match current.sponsor_id.clone() {
                Some(id) => id,
                None => break, // reached the root of the chain
            };

            let upline = match self.account_repository.get_by_id(&upline_id) {
                Ok(account) => account,
                Err(AccountError::NotFound(_)) => {
                    // Dangling sponsor reference terminates the chain, it is
                    // not an error for the triggering investment.
                    warn!(
                        "Sponsor {} of account {} not found, stopping distribution at level {}",
                        upline_id, current.id, level
                    );
                    break;
                }
                Err(e) => return Err(e.into()),
            };

            let income_amount =
                (amount * *percentage / Decimal::ONE_HUNDRED).round_dp(DECIMAL_PRECISION);

            let record = self.commission_repository.insert(CommissionRecord {
                id: Uuid::new_v4().to_string(),
                beneficiary_id: upline.id.clone(),
                source_account_id: source_account_id.to_string(),
                investment_id: investment_id.to_string(),
                amount: income_amount,
                level,
                created_at: Utc::now().naive_utc(),
            })?;

            self.account_repository
                .credit_commission(&upline.id, income_amount)?;

            debug!(
                "Credited level {} commission {} to account {} for investment {}",
                level, income_amount, upline.id, investment_id
            );

            paid.push(record);
            current = upline;
        }

        Ok(paid)
    }
}

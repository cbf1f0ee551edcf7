use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use log::{error, info, warn};
use std::sync::Arc;
use uuid::Uuid;

use crate::accounts::{AccountError, AccountRepositoryTrait};
use crate::errors::Result;
use crate::investments::{Investment, InvestmentServiceTrait};

use super::accruals_model::{AccrualRecord, AccrualRunSummary};
use super::accruals_traits::{AccrualRepositoryTrait, AccrualServiceTrait};

enum AccrualOutcome {
    Processed,
    Skipped,
    Expired,
}

/// Engine paying one day's ROI per active investment per calendar day.
/// Idempotency is enforced at the data level (the accrual ledger's unique
/// day key), not by job locking, so overlapping trigger runs are safe.
pub struct AccrualService {
    investment_service: Arc<dyn InvestmentServiceTrait>,
    accrual_repository: Arc<dyn AccrualRepositoryTrait>,
    account_repository: Arc<dyn AccountRepositoryTrait>,
}

impl AccrualService {
    pub fn new(
        investment_service: Arc<dyn InvestmentServiceTrait>,
        accrual_repository: Arc<dyn AccrualRepositoryTrait>,
        account_repository: Arc<dyn AccountRepositoryTrait>,
    ) -> Self {
        Self {
            investment_service,
            accrual_repository,
            account_repository,
        }
    }

    async fn accrue_one(&self, investment: &Investment, today: NaiveDate) -> Result<AccrualOutcome> {
        if self
            .accrual_repository
            .exists_for_day(&investment.id, today)?
        {
            return Ok(AccrualOutcome::Skipped);
        }

        if self.investment_service.expire_if_matured(investment).await? {
            return Ok(AccrualOutcome::Expired);
        }

        let owner = match self.account_repository.get_by_id(&investment.owner_id) {
            Ok(account) => account,
            Err(AccountError::NotFound(_)) => {
                warn!(
                    "Owner {} of investment {} not found, skipping accrual",
                    investment.owner_id, investment.id
                );
                return Ok(AccrualOutcome::Skipped);
            }
            Err(e) => return Err(e.into()),
        };

        let roi_amount = investment.daily_roi();
        let inserted = self.accrual_repository.insert(AccrualRecord {
            id: Uuid::new_v4().to_string(),
            investment_id: investment.id.clone(),
            owner_id: owner.id.clone(),
            amount: roi_amount,
            accrual_date: today,
            created_at: Utc::now().naive_utc(),
        })?;

        if inserted.is_none() {
            // A concurrent run recorded today's payout between our check and
            // the insert; the unique day key kept it single.
            return Ok(AccrualOutcome::Skipped);
        }

        self.account_repository.credit_roi(&owner.id, roi_amount)?;

        Ok(AccrualOutcome::Processed)
    }
}

#[async_trait]
impl AccrualServiceTrait for AccrualService {
    async fn run_daily_accrual(&self) -> Result<AccrualRunSummary> {
        // A failure to even enumerate active investments is fatal for this
        // run; the scheduler's next trigger retries it.
        let active_investments = self.investment_service.list_active()?;
        let today = Utc::now().date_naive();

        info!(
            "Running daily accrual for {} active investments",
            active_investments.len()
        );

        let mut summary = AccrualRunSummary::default();
        for investment in &active_investments {
            match self.accrue_one(investment, today).await {
                Ok(AccrualOutcome::Processed) => summary.processed += 1,
                Ok(AccrualOutcome::Skipped) => summary.skipped += 1,
                Ok(AccrualOutcome::Expired) => summary.expired += 1,
                Err(e) => {
                    // One bad record never aborts the batch; the next run
                    // picks this investment up again.
                    error!("Accrual failed for investment {}: {}", investment.id, e);
                    summary.failed += 1;
                }
            }
        }

        info!(
            "Daily accrual completed: {} processed, {} skipped, {} expired, {} failed",
            summary.processed, summary.skipped, summary.expired, summary.failed
        );

        Ok(summary)
    }
}

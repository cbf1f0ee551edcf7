use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::accruals_model::{AccrualRecord, AccrualRunSummary};
use crate::errors::Result;

/// Trait defining the contract for accrual record storage.
pub trait AccrualRepositoryTrait: Send + Sync {
    /// Inserts a record, returning None when a record for the same
    /// (investment, calendar day) already exists. The uniqueness constraint
    /// lives in the storage layer so overlapping job runs cannot double-pay.
    fn insert(&self, record: AccrualRecord) -> Result<Option<AccrualRecord>>;
    fn exists_for_day(&self, investment_id: &str, day: NaiveDate) -> Result<bool>;
    fn total_for_owner_on(&self, owner_id: &str, day: NaiveDate) -> Result<Decimal>;
}

/// Trait defining the contract for the daily accrual engine.
#[async_trait]
pub trait AccrualServiceTrait: Send + Sync {
    /// Pays one day's ROI to every active investment, expiring matured ones.
    /// Safe to invoke any number of times per calendar day; re-running after
    /// a partial failure is the prescribed recovery path.
    async fn run_daily_accrual(&self) -> Result<AccrualRunSummary>;
}

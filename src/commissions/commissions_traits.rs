use async_trait::async_trait;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use super::commissions_model::CommissionRecord;
use crate::errors::Result;

/// Trait defining the contract for commission record storage.
pub trait CommissionRepositoryTrait: Send + Sync {
    fn insert(&self, record: CommissionRecord) -> Result<CommissionRecord>;
    fn list_by_beneficiary(&self, beneficiary_id: &str) -> Result<Vec<CommissionRecord>>;
    fn total_for_beneficiary_since(
        &self,
        beneficiary_id: &str,
        since: NaiveDateTime,
    ) -> Result<Decimal>;
}

/// Trait defining the contract for the commission distribution engine.
#[async_trait]
pub trait CommissionServiceTrait: Send + Sync {
    /// Walks the sponsor chain upward from the investor, crediting each
    /// upline its level percentage of the invested amount. Called exactly
    /// once per investment, from investment creation.
    async fn distribute(
        &self,
        source_account_id: &str,
        investment_id: &str,
        amount: Decimal,
    ) -> Result<Vec<CommissionRecord>>;
}

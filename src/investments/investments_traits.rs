use async_trait::async_trait;

use super::investments_model::{Investment, NewInvestment};
use crate::investments::Result;

/// Trait defining the contract for Investment repository operations.
pub trait InvestmentRepositoryTrait: Send + Sync {
    fn insert(&self, investment: Investment) -> Result<Investment>;
    fn get_by_id(&self, investment_id: &str) -> Result<Investment>;
    fn list_active(&self) -> Result<Vec<Investment>>;
    fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Investment>>;
    /// Marks an active investment completed. Returns false when the
    /// investment was already completed (or does not exist), so the
    /// transition happens at most once even under concurrent passes.
    fn mark_completed(&self, investment_id: &str) -> Result<bool>;
}

/// Trait defining the contract for the investment lifecycle manager.
#[async_trait]
pub trait InvestmentServiceTrait: Send + Sync {
    async fn create_investment(&self, new_investment: NewInvestment)
        -> crate::errors::Result<Investment>;
    async fn expire_if_matured(&self, investment: &Investment) -> crate::errors::Result<bool>;
    fn get_investment(&self, investment_id: &str) -> crate::errors::Result<Investment>;
    fn list_active(&self) -> crate::errors::Result<Vec<Investment>>;
    fn list_by_owner(&self, owner_id: &str) -> crate::errors::Result<Vec<Investment>>;
}

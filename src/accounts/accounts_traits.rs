use async_trait::async_trait;
use rust_decimal::Decimal;

use super::accounts_model::{Account, NewAccount};
use crate::accounts::Result;

/// Trait defining the contract for Account repository operations.
pub trait AccountRepositoryTrait: Send + Sync {
    fn create(&self, account: Account) -> Result<Account>;
    fn get_by_id(&self, account_id: &str) -> Result<Account>;
    fn find_by_referral_code(&self, code: &str) -> Result<Option<Account>>;
    /// Reverse lookup over the sponsor relation: the direct referrals of an account.
    fn list_by_sponsor(&self, sponsor_account_id: &str) -> Result<Vec<Account>>;
    fn credit_roi(&self, account_id: &str, amount: Decimal) -> Result<Account>;
    fn credit_commission(&self, account_id: &str, amount: Decimal) -> Result<Account>;
    fn add_invested(&self, account_id: &str, amount: Decimal) -> Result<Account>;
}

/// Trait defining the contract for Account service operations.
#[async_trait]
pub trait AccountServiceTrait: Send + Sync {
    async fn register_account(&self, new_account: NewAccount) -> Result<Account>;
    fn get_account(&self, account_id: &str) -> Result<Account>;
    fn find_by_referral_code(&self, code: &str) -> Result<Option<Account>>;
}

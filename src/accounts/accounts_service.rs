use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use super::accounts_model::{Account, NewAccount};
use super::accounts_traits::{AccountRepositoryTrait, AccountServiceTrait};
use crate::accounts::Result;

/// Service for registering and querying accounts
pub struct AccountService {
    account_repository: Arc<dyn AccountRepositoryTrait>,
}

impl AccountService {
    /// Creates a new AccountService instance
    pub fn new(account_repository: Arc<dyn AccountRepositoryTrait>) -> Self {
        Self { account_repository }
    }

    fn generate_referral_code(username: &str) -> String {
        let suffix = Uuid::new_v4().simple().to_string();
        format!("{}-{}", username.to_lowercase(), &suffix[..8])
    }
}

#[async_trait]
impl AccountServiceTrait for AccountService {
    /// Registers a new account, resolving the optional sponsor referral code.
    /// An unknown referral code registers the account without a sponsor.
    async fn register_account(&self, new_account: NewAccount) -> Result<Account> {
        new_account.validate()?;

        let sponsor = match &new_account.sponsor_referral_code {
            Some(code) => {
                let found = self.account_repository.find_by_referral_code(code)?;
                if found.is_none() {
                    debug!("Referral code {} did not match any account", code);
                }
                found
            }
            None => None,
        };

        let now = Utc::now().naive_utc();
        let account = Account {
            id: Uuid::new_v4().to_string(),
            referral_code: Self::generate_referral_code(&new_account.username),
            username: new_account.username,
            email: new_account.email,
            sponsor_id: sponsor.map(|s| s.id),
            balance: Decimal::ZERO,
            total_invested: Decimal::ZERO,
            total_roi: Decimal::ZERO,
            total_commission_earned: Decimal::ZERO,
            created_at: now,
            updated_at: now,
        };

        self.account_repository.create(account)
    }

    fn get_account(&self, account_id: &str) -> Result<Account> {
        self.account_repository.get_by_id(account_id)
    }

    fn find_by_referral_code(&self, code: &str) -> Result<Option<Account>> {
        self.account_repository.find_by_referral_code(code)
    }
}

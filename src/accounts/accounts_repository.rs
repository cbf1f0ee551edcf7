use chrono::Utc;
use diesel::prelude::*;
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::accounts::{AccountError, Result};
use crate::db::{get_connection, DbPool};
use crate::schema::accounts;
use crate::schema::accounts::dsl::*;

use super::accounts_model::{Account, AccountDB};
use super::accounts_traits::AccountRepositoryTrait;

/// Repository for managing account data in the database
pub struct AccountRepository {
    pool: Arc<DbPool>,
}

impl AccountRepository {
    /// Creates a new AccountRepository instance
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    /// Applies a balance-affecting mutation as a read-modify-write inside a
    /// single immediate write transaction. Concurrent credits to the same
    /// account serialize on the database writer lock, so no update is lost.
    fn apply_credit<F>(&self, account_id: &str, apply: F) -> Result<Account>
    where
        F: FnOnce(&mut Account),
    {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        conn.immediate_transaction(|tx_conn| {
            let account_db = accounts
                .find(account_id)
                .first::<AccountDB>(tx_conn)
                .map_err(|e| match e {
                    diesel::result::Error::NotFound => AccountError::NotFound(format!(
                        "Account with id {} not found",
                        account_id
                    )),
                    _ => AccountError::DatabaseError(e.to_string()),
                })?;

            let mut account = Account::from(account_db);
            apply(&mut account);
            account.updated_at = Utc::now().naive_utc();

            diesel::update(accounts.find(account_id))
                .set((
                    balance.eq(account.balance.to_string()),
                    total_invested.eq(account.total_invested.to_string()),
                    total_roi.eq(account.total_roi.to_string()),
                    total_commission_earned.eq(account.total_commission_earned.to_string()),
                    updated_at.eq(account.updated_at),
                ))
                .execute(tx_conn)
                .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

            Ok(account)
        })
    }
}

impl AccountRepositoryTrait for AccountRepository {
    fn create(&self, account: Account) -> Result<Account> {
        let account_db = AccountDB::from(account);

        let mut conn = get_connection(&self.pool)
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        diesel::insert_into(accounts::table)
            .values(&account_db)
            .execute(&mut conn)
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        Ok(account_db.into())
    }

    fn get_by_id(&self, account_id: &str) -> Result<Account> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        let account = accounts
            .find(account_id)
            .first::<AccountDB>(&mut conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => {
                    AccountError::NotFound(format!("Account with id {} not found", account_id))
                }
                _ => AccountError::DatabaseError(e.to_string()),
            })?;

        Ok(account.into())
    }

    fn find_by_referral_code(&self, code: &str) -> Result<Option<Account>> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        let account = accounts
            .filter(referral_code.eq(code))
            .first::<AccountDB>(&mut conn)
            .optional()
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        Ok(account.map(Account::from))
    }

    fn list_by_sponsor(&self, sponsor_account_id: &str) -> Result<Vec<Account>> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        accounts
            .filter(sponsor_id.eq(sponsor_account_id))
            .order(created_at.asc())
            .load::<AccountDB>(&mut conn)
            .map_err(|e| AccountError::DatabaseError(e.to_string()))
            .map(|results| results.into_iter().map(Account::from).collect())
    }

    fn credit_roi(&self, account_id: &str, amount: Decimal) -> Result<Account> {
        self.apply_credit(account_id, |account| {
            account.balance += amount;
            account.total_roi += amount;
        })
    }

    fn credit_commission(&self, account_id: &str, amount: Decimal) -> Result<Account> {
        self.apply_credit(account_id, |account| {
            account.balance += amount;
            account.total_commission_earned += amount;
        })
    }

    fn add_invested(&self, account_id: &str, amount: Decimal) -> Result<Account> {
        self.apply_credit(account_id, |account| {
            account.total_invested += amount;
        })
    }
}

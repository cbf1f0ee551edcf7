use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::accounts::{AccountError, Result};

/// Domain model representing an investor account in the system
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub username: String,
    pub email: String,
    pub referral_code: String,
    /// The account that referred this one. Set once at registration and
    /// never re-parented, so the sponsor relation stays acyclic.
    pub sponsor_id: Option<String>,
    pub balance: Decimal,
    pub total_invested: Decimal,
    pub total_roi: Decimal,
    pub total_commission_earned: Decimal,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for registering a new account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    /// Referral code of the sponsoring account, if the registrant was referred
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sponsor_referral_code: Option<String>,
}

impl NewAccount {
    /// Validates the new account data
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(AccountError::InvalidData(
                "Username cannot be empty".to_string(),
            ));
        }
        if self.email.trim().is_empty() {
            return Err(AccountError::InvalidData(
                "Email cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Database model for accounts
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::accounts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AccountDB {
    pub id: String,
    pub username: String,
    pub email: String,
    pub referral_code: String,
    pub sponsor_id: Option<String>,
    // Monetary accumulators stored as TEXT to preserve decimal precision
    pub balance: String,
    pub total_invested: String,
    pub total_roi: String,
    pub total_commission_earned: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

// Conversion implementations
impl From<AccountDB> for Account {
    fn from(db: AccountDB) -> Self {
        Self {
            id: db.id,
            username: db.username,
            email: db.email,
            referral_code: db.referral_code,
            sponsor_id: db.sponsor_id,
            balance: Decimal::from_str(&db.balance).unwrap_or_default(),
            total_invested: Decimal::from_str(&db.total_invested).unwrap_or_default(),
            total_roi: Decimal::from_str(&db.total_roi).unwrap_or_default(),
            total_commission_earned: Decimal::from_str(&db.total_commission_earned)
                .unwrap_or_default(),
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<Account> for AccountDB {
    fn from(domain: Account) -> Self {
        Self {
            id: domain.id,
            username: domain.username,
            email: domain.email,
            referral_code: domain.referral_code,
            sponsor_id: domain.sponsor_id,
            balance: domain.balance.to_string(),
            total_invested: domain.total_invested.to_string(),
            total_roi: domain.total_roi.to_string(),
            total_commission_earned: domain.total_commission_earned.to_string(),
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}

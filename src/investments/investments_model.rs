use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::constants::DECIMAL_PRECISION;

/// Lifecycle state of an investment. `Active` transitions to `Completed`
/// exactly once, when an accrual pass observes the position past its end
/// date; `Completed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvestmentStatus {
    Active,
    Completed,
}

impl InvestmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvestmentStatus::Active => "active",
            InvestmentStatus::Completed => "completed",
        }
    }
}

impl From<&str> for InvestmentStatus {
    fn from(value: &str) -> Self {
        match value {
            "completed" => InvestmentStatus::Completed,
            _ => InvestmentStatus::Active,
        }
    }
}

/// Domain model representing a fixed-term position in a plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Investment {
    pub id: String,
    pub owner_id: String,
    pub amount: Decimal,
    pub plan_name: String,
    /// Daily ROI percentage, copied from the plan catalog at creation time.
    /// A snapshot: later catalog changes never affect existing positions.
    pub daily_rate: Decimal,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub status: InvestmentStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Investment {
    pub fn is_matured_at(&self, at: NaiveDateTime) -> bool {
        at > self.end_date
    }

    /// One day's return on this position
    pub fn daily_roi(&self) -> Decimal {
        (self.amount * self.daily_rate / Decimal::ONE_HUNDRED).round_dp(DECIMAL_PRECISION)
    }
}

/// Input model for creating a new investment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInvestment {
    pub owner_id: String,
    pub amount: Decimal,
    pub plan_name: String,
}

/// Database model for investments
#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::investments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct InvestmentDB {
    pub id: String,
    pub owner_id: String,
    pub amount: String,
    pub plan_name: String,
    pub daily_rate: String,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

// Conversion implementations
impl From<InvestmentDB> for Investment {
    fn from(db: InvestmentDB) -> Self {
        Self {
            id: db.id,
            owner_id: db.owner_id,
            amount: Decimal::from_str(&db.amount).unwrap_or_default(),
            plan_name: db.plan_name,
            daily_rate: Decimal::from_str(&db.daily_rate).unwrap_or_default(),
            start_date: db.start_date,
            end_date: db.end_date,
            status: InvestmentStatus::from(db.status.as_str()),
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<Investment> for InvestmentDB {
    fn from(domain: Investment) -> Self {
        Self {
            id: domain.id,
            owner_id: domain.owner_id,
            amount: domain.amount.to_string(),
            plan_name: domain.plan_name,
            daily_rate: domain.daily_rate.to_string(),
            start_date: domain.start_date,
            end_date: domain.end_date,
            status: domain.status.as_str().to_string(),
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}

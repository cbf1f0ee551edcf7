use chrono::NaiveDateTime;
use diesel::prelude::*;
use lazy_static::lazy_static;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One commission payment to an upline account, triggered by a downline
/// investment. Exactly one record exists per (investment, level).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommissionRecord {
    pub id: String,
    pub beneficiary_id: String,
    pub source_account_id: String,
    pub investment_id: String,
    pub amount: Decimal,
    /// 1-based distance from the investor: 1 = direct sponsor
    pub level: i32,
    pub created_at: NaiveDateTime,
}

lazy_static! {
    static ref DEFAULT_LEVEL_PERCENTAGES: Vec<Decimal> = vec![dec!(5), dec!(3), dec!(1)];
}

/// Ordered table of per-level commission percentages. The table length is the
/// maximum traversal depth. Injected into the distribution engine at
/// construction time.
#[derive(Debug, Clone)]
pub struct LevelSchedule {
    percentages: Vec<Decimal>,
}

impl LevelSchedule {
    pub fn new(percentages: Vec<Decimal>) -> Self {
        LevelSchedule { percentages }
    }

    pub fn percentages(&self) -> &[Decimal] {
        &self.percentages
    }

    pub fn max_depth(&self) -> usize {
        self.percentages.len()
    }
}

impl Default for LevelSchedule {
    fn default() -> Self {
        LevelSchedule::new(DEFAULT_LEVEL_PERCENTAGES.clone())
    }
}

/// Database model for commission records
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::commission_records)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CommissionRecordDB {
    pub id: String,
    pub beneficiary_id: String,
    pub source_account_id: String,
    pub investment_id: String,
    pub amount: String,
    pub level: i32,
    pub created_at: NaiveDateTime,
}

impl From<CommissionRecordDB> for CommissionRecord {
    fn from(db: CommissionRecordDB) -> Self {
        Self {
            id: db.id,
            beneficiary_id: db.beneficiary_id,
            source_account_id: db.source_account_id,
            investment_id: db.investment_id,
            amount: Decimal::from_str(&db.amount).unwrap_or_default(),
            level: db.level,
            created_at: db.created_at,
        }
    }
}

impl From<CommissionRecord> for CommissionRecordDB {
    fn from(domain: CommissionRecord) -> Self {
        Self {
            id: domain.id,
            beneficiary_id: domain.beneficiary_id,
            source_account_id: domain.source_account_id,
            investment_id: domain.investment_id,
            amount: domain.amount.to_string(),
            level: domain.level,
            created_at: domain.created_at,
        }
    }
}

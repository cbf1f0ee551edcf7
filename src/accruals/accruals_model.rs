use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::constants::ACCRUAL_DATE_FORMAT;

/// One day's ROI payout for one investment. The (investment, calendar day)
/// pair is the idempotency key for the daily job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccrualRecord {
    pub id: String,
    pub investment_id: String,
    pub owner_id: String,
    pub amount: Decimal,
    pub accrual_date: NaiveDate,
    pub created_at: NaiveDateTime,
}

/// Counters reported by one daily accrual pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccrualRunSummary {
    /// Investments for which a new accrual record was created
    pub processed: usize,
    /// Investments already paid today, or whose owner could not be found
    pub skipped: usize,
    /// Investments observed past term and completed this pass
    pub expired: usize,
    /// Investments whose processing failed and was deferred to the next run
    pub failed: usize,
}

/// Database model for accrual records
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::accrual_records)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AccrualRecordDB {
    pub id: String,
    pub investment_id: String,
    pub owner_id: String,
    pub amount: String,
    pub accrual_date: String,
    pub created_at: NaiveDateTime,
}

impl From<AccrualRecordDB> for AccrualRecord {
    fn from(db: AccrualRecordDB) -> Self {
        Self {
            id: db.id,
            investment_id: db.investment_id,
            owner_id: db.owner_id,
            amount: Decimal::from_str(&db.amount).unwrap_or_default(),
            accrual_date: NaiveDate::parse_from_str(&db.accrual_date, ACCRUAL_DATE_FORMAT)
                .unwrap_or_default(),
            created_at: db.created_at,
        }
    }
}

impl From<AccrualRecord> for AccrualRecordDB {
    fn from(domain: AccrualRecord) -> Self {
        Self {
            id: domain.id,
            investment_id: domain.investment_id,
            owner_id: domain.owner_id,
            amount: domain.amount.to_string(),
            accrual_date: domain.accrual_date.format(ACCRUAL_DATE_FORMAT).to_string(),
            created_at: domain.created_at,
        }
    }
}

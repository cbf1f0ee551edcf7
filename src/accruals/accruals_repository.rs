use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;

use crate::constants::ACCRUAL_DATE_FORMAT;
use crate::db::{get_connection, DbPool};
use crate::errors::Result;
use crate::schema::accrual_records;

use super::accruals_model::{AccrualRecord, AccrualRecordDB};
use super::accruals_traits::AccrualRepositoryTrait;

/// Repository for the append-only accrual ledger
pub struct AccrualRepository {
    pool: Arc<DbPool>,
}

impl AccrualRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

impl AccrualRepositoryTrait for AccrualRepository {
    fn insert(&self, record: AccrualRecord) -> Result<Option<AccrualRecord>> {
        let record_db = AccrualRecordDB::from(record);
        let mut conn = get_connection(&self.pool)?;

        match diesel::insert_into(accrual_records::table)
            .values(&record_db)
            .execute(&mut conn)
        {
            Ok(_) => Ok(Some(record_db.into())),
            // A concurrent run already paid this (investment, day); not an error.
            Err(diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn exists_for_day(&self, investment_id: &str, day: NaiveDate) -> Result<bool> {
        let mut conn = get_connection(&self.pool)?;

        let count: i64 = accrual_records::table
            .filter(accrual_records::investment_id.eq(investment_id))
            .filter(accrual_records::accrual_date.eq(day.format(ACCRUAL_DATE_FORMAT).to_string()))
            .count()
            .get_result(&mut conn)?;

        Ok(count > 0)
    }

    fn total_for_owner_on(&self, owner_id: &str, day: NaiveDate) -> Result<Decimal> {
        let mut conn = get_connection(&self.pool)?;

        let amounts = accrual_records::table
            .filter(accrual_records::owner_id.eq(owner_id))
            .filter(accrual_records::accrual_date.eq(day.format(ACCRUAL_DATE_FORMAT).to_string()))
            .select(accrual_records::amount)
            .load::<String>(&mut conn)?;

        Ok(amounts
            .iter()
            .map(|a| Decimal::from_str(a).unwrap_or_default())
            .sum())
    }
}

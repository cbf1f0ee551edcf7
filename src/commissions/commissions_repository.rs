use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;

use crate::db::{get_connection, DbPool};
use crate::errors::Result;
use crate::schema::commission_records;

use super::commissions_model::{CommissionRecord, CommissionRecordDB};
use super::commissions_traits::CommissionRepositoryTrait;

/// Repository for the append-only commission ledger
pub struct CommissionRepository {
    pool: Arc<DbPool>,
}

impl CommissionRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

impl CommissionRepositoryTrait for CommissionRepository {
    fn insert(&self, record: CommissionRecord) -> Result<CommissionRecord> {
        let record_db = CommissionRecordDB::from(record);
        let mut conn = get_connection(&self.pool)?;

        diesel::insert_into(commission_records::table)
            .values(&record_db)
            .execute(&mut conn)?;

        Ok(record_db.into())
    }

    fn list_by_beneficiary(&self, beneficiary_id: &str) -> Result<Vec<CommissionRecord>> {
        let mut conn = get_connection(&self.pool)?;

        let records = commission_records::table
            .filter(commission_records::beneficiary_id.eq(beneficiary_id))
            .order(commission_records::created_at.desc())
            .load::<CommissionRecordDB>(&mut conn)?;

        Ok(records.into_iter().map(CommissionRecord::from).collect())
    }

    fn total_for_beneficiary_since(
        &self,
        beneficiary_id: &str,
        since: NaiveDateTime,
    ) -> Result<Decimal> {
        let mut conn = get_connection(&self.pool)?;

        let amounts = commission_records::table
            .filter(commission_records::beneficiary_id.eq(beneficiary_id))
            .filter(commission_records::created_at.ge(since))
            .select(commission_records::amount)
            .load::<String>(&mut conn)?;

        Ok(amounts
            .iter()
            .map(|a| Decimal::from_str(a).unwrap_or_default())
            .sum())
    }
}

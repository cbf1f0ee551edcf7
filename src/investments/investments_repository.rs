use chrono::Utc;
use diesel::prelude::*;
use std::sync::Arc;

use crate::db::{get_connection, DbPool};
use crate::investments::{InvestmentError, Result};
use crate::schema::investments;

use super::investments_model::{Investment, InvestmentDB, InvestmentStatus};
use super::investments_traits::InvestmentRepositoryTrait;

/// Repository for managing investment data in the database
pub struct InvestmentRepository {
    pool: Arc<DbPool>,
}

impl InvestmentRepository {
    /// Creates a new InvestmentRepository instance
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

impl InvestmentRepositoryTrait for InvestmentRepository {
    fn insert(&self, investment: Investment) -> Result<Investment> {
        let investment_db = InvestmentDB::from(investment);

        let mut conn = get_connection(&self.pool)
            .map_err(|e| InvestmentError::DatabaseError(e.to_string()))?;

        diesel::insert_into(investments::table)
            .values(&investment_db)
            .execute(&mut conn)
            .map_err(|e| InvestmentError::DatabaseError(e.to_string()))?;

        Ok(investment_db.into())
    }

    fn get_by_id(&self, investment_id: &str) -> Result<Investment> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| InvestmentError::DatabaseError(e.to_string()))?;

        let investment = investments::table
            .find(investment_id)
            .first::<InvestmentDB>(&mut conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => InvestmentError::NotFound(format!(
                    "Investment with id {} not found",
                    investment_id
                )),
                _ => InvestmentError::DatabaseError(e.to_string()),
            })?;

        Ok(investment.into())
    }

    fn list_active(&self) -> Result<Vec<Investment>> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| InvestmentError::DatabaseError(e.to_string()))?;

        investments::table
            .filter(investments::status.eq(InvestmentStatus::Active.as_str()))
            .order(investments::start_date.asc())
            .load::<InvestmentDB>(&mut conn)
            .map_err(|e| InvestmentError::DatabaseError(e.to_string()))
            .map(|results| results.into_iter().map(Investment::from).collect())
    }

    fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Investment>> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| InvestmentError::DatabaseError(e.to_string()))?;

        investments::table
            .filter(investments::owner_id.eq(owner_id))
            .order(investments::created_at.desc())
            .load::<InvestmentDB>(&mut conn)
            .map_err(|e| InvestmentError::DatabaseError(e.to_string()))
            .map(|results| results.into_iter().map(Investment::from).collect())
    }

    fn mark_completed(&self, investment_id: &str) -> Result<bool> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| InvestmentError::DatabaseError(e.to_string()))?;

        // Guarded on status so the active -> completed transition happens at
        // most once, regardless of how many passes observe the maturity.
        let affected = diesel::update(
            investments::table
                .find(investment_id)
                .filter(investments::status.eq(InvestmentStatus::Active.as_str())),
        )
        .set((
            investments::status.eq(InvestmentStatus::Completed.as_str()),
            investments::updated_at.eq(Utc::now().naive_utc()),
        ))
        .execute(&mut conn)
        .map_err(|e| InvestmentError::DatabaseError(e.to_string()))?;

        Ok(affected > 0)
    }
}

use diesel::result::Error as DieselError;
use thiserror::Error;

/// Custom error type for investment lifecycle operations
#[derive(Debug, Error)]
pub enum InvestmentError {
    #[error("Invalid plan: {0}")]
    InvalidPlan(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<DieselError> for InvestmentError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => InvestmentError::NotFound("Record not found".to_string()),
            _ => InvestmentError::DatabaseError(err.to_string()),
        }
    }
}

/// Result type for investment operations
pub type Result<T> = std::result::Result<T, InvestmentError>;

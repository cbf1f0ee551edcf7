use std::sync::Arc;
use uuid::Uuid;

use yieldway_core::db::{self, DbPool};

/// Creates a pooled connection to a fresh throwaway database with all
/// migrations applied.
pub fn get_db_connection_pool() -> yieldway_core::Result<Arc<DbPool>> {
    let data_dir = std::env::temp_dir().join(format!("yieldway-core-test-{}", Uuid::new_v4()));
    let db_path = db::init(data_dir.to_str().unwrap())?;
    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    Ok(pool)
}

pub(crate) mod commissions_model;
pub(crate) mod commissions_repository;
pub(crate) mod commissions_service;
pub(crate) mod commissions_traits;


pub use commissions_model::{CommissionRecord, CommissionRecordDB, LevelSchedule};
pub use commissions_repository::CommissionRepository;
pub use commissions_service::CommissionService;
pub use commissions_traits::{CommissionRepositoryTrait, CommissionServiceTrait};

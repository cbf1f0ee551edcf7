pub(crate) mod accruals_model;
pub(crate) mod accruals_repository;
pub(crate) mod accruals_service;
pub(crate) mod accruals_traits;


pub use accruals_model::{AccrualRecord, AccrualRecordDB, AccrualRunSummary};
pub use accruals_repository::AccrualRepository;
pub use accruals_service::AccrualService;
pub use accruals_traits::{AccrualRepositoryTrait, AccrualServiceTrait};

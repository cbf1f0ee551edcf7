pub(crate) mod dashboard_model;
pub(crate) mod dashboard_service;

pub use dashboard_model::AccountSummary;
pub use dashboard_service::DashboardService;

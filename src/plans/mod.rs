pub mod plans_model;

pub use plans_model::{Plan, PlanCatalog};

pub(crate) mod referrals_model;
pub(crate) mod referrals_service;

pub use referrals_model::ReferralNode;
pub use referrals_service::ReferralService;

/// Decimal precision for payout calculations
pub const DECIMAL_PRECISION: u32 = 6;

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Default and maximum depth for referral tree reporting
pub const MAX_REFERRAL_DEPTH: usize = 3;

/// Upper bound on nodes returned by a single referral tree build
pub const MAX_TREE_NODES: usize = 10_000;

/// Calendar-day key format for accrual records
pub const ACCRUAL_DATE_FORMAT: &str = "%Y-%m-%d";

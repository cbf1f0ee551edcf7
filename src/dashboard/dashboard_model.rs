use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Reporting snapshot of an account's lifetime and same-day earnings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    pub account_id: String,
    pub username: String,
    pub referral_code: String,
    pub balance: Decimal,
    pub total_invested: Decimal,
    pub total_roi: Decimal,
    pub total_commission_earned: Decimal,
    /// Sum of today's accrual records for the account
    pub today_roi: Decimal,
    /// Sum of today's commission records for the account
    pub today_commission: Decimal,
}

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One account in the downline view of a referral tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferralNode {
    pub id: String,
    pub username: String,
    pub total_invested: Decimal,
    pub joined_at: NaiveDateTime,
    /// 1-based depth below the root account
    pub level: u32,
    pub children: Vec<ReferralNode>,
}

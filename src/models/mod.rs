use serde::{Deserialize, Serialize};

pub mod dashboard;
pub mod trade;

pub use dashboard::{revenue_deltas, RevenuePoint, Stats, TrendIndicator};
pub use trade::{StatusTone, Trade, TradeDraft, TradeQuery, TradeStatus, TradeType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
}

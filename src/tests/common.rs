#![cfg(test)]
use super::super::models::{RevenuePoint, Stats, Trade, TradeStatus, TradeType, User};

// Helper to create the user most tests log in as
pub fn create_test_user() -> User {
    User {
        id: "u1".to_string(),
        name: "Test User".to_string(),
        email: "test@example.com".to_string(),
    }
}

// Helper to create a Buy trade of 1.5 units
pub fn create_test_trade(id: &str, pair: &str, status: TradeStatus) -> Trade {
    Trade {
        id: id.to_string(),
        pair: pair.to_string(),
        trade_type: TradeType::Buy,
        amount: 1.5,
        status,
    }
}

pub fn create_test_stats() -> Stats {
    Stats {
        total_users: 12,
        total_trades: 48,
        total_revenue: 4500.5,
    }
}

// One point per value, months named Jan, Feb, ...
pub fn create_test_revenue(values: &[f64]) -> Vec<RevenuePoint> {
    const MONTHS: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];
    values
        .iter()
        .enumerate()
        .map(|(i, revenue)| RevenuePoint {
            month: MONTHS[i % 12].to_string(),
            revenue: *revenue,
        })
        .collect()
}

#![allow(dead_code)]
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use primetrade::api::{DashboardApi, LoginResponse};
use primetrade::error::{Error, Result};
use primetrade::models::{RevenuePoint, Stats, Trade, TradeDraft, TradeQuery, TradeStatus, TradeType, User};

pub const TEST_EMAIL: &str = "ada@example.com";
pub const TEST_PASSWORD: &str = "secret";

#[derive(Debug, Default)]
pub struct FakeState {
    pub trades: Vec<Trade>,
    pub next_id: u64,
    pub calls: Vec<String>,
    /// When set, every read fails with this message.
    pub fail_reads: Option<String>,
}

/// In-memory backend that filters the way the real server does.
#[derive(Clone, Default)]
pub struct FakeApi {
    pub state: Arc<Mutex<FakeState>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_trades(trades: Vec<Trade>) -> Self {
        let api = Self::new();
        api.state.lock().unwrap().trades = trades;
        api
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == call).count()
    }

    pub fn fail_reads(&self, message: &str) {
        self.state.lock().unwrap().fail_reads = Some(message.to_string());
    }

    fn record(&self, call: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call.to_string());
        match &state.fail_reads {
            Some(msg) if matches!(call, "stats" | "revenue_trend" | "list_trades") => {
                Err(Error::NetworkError(msg.clone()))
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl DashboardApi for FakeApi {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        self.record("login")?;
        if email == TEST_EMAIL && password == TEST_PASSWORD {
            Ok(LoginResponse {
                user: create_test_user(),
                token: "fake-jwt".to_string(),
            })
        } else {
            Err(Error::AuthError("Invalid credentials".to_string()))
        }
    }

    async fn stats(&self) -> Result<Stats> {
        self.record("stats")?;
        let state = self.state.lock().unwrap();
        Ok(Stats {
            total_users: 1,
            total_trades: state.trades.len() as u64,
            total_revenue: state.trades.iter().map(|t| t.amount).sum(),
        })
    }

    async fn revenue_trend(&self) -> Result<Vec<RevenuePoint>> {
        self.record("revenue_trend")?;
        Ok(vec![
            RevenuePoint { month: "Jan".into(), revenue: 100.0 },
            RevenuePoint { month: "Feb".into(), revenue: 120.0 },
            RevenuePoint { month: "Mar".into(), revenue: 90.0 },
        ])
    }

    async fn list_trades(&self, query: &TradeQuery) -> Result<Vec<Trade>> {
        self.record("list_trades")?;
        let needle = query.search.to_lowercase();
        let state = self.state.lock().unwrap();
        Ok(state
            .trades
            .iter()
            .filter(|t| needle.is_empty() || t.pair.to_lowercase().contains(&needle))
            .filter(|t| query.status.as_ref().map_or(true, |s| &t.status == s))
            .cloned()
            .collect())
    }

    async fn create_trade(&self, draft: &TradeDraft) -> Result<Trade> {
        self.record("create_trade")?;
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let trade = draft.clone().with_id(format!("srv-{}", state.next_id));
        state.trades.push(trade.clone());
        Ok(trade)
    }

    async fn update_trade(&self, trade: &Trade) -> Result<Trade> {
        self.record("update_trade")?;
        let mut state = self.state.lock().unwrap();
        match state.trades.iter_mut().find(|t| t.id == trade.id) {
            Some(existing) => {
                *existing = trade.clone();
                Ok(trade.clone())
            }
            None => Err(Error::ApiError {
                status: 404,
                message: "Trade not found".to_string(),
            }),
        }
    }

    async fn delete_trade(&self, id: &str) -> Result<()> {
        self.record("delete_trade")?;
        let mut state = self.state.lock().unwrap();
        state.trades.retain(|t| t.id != id);
        Ok(())
    }
}

pub fn create_test_user() -> User {
    User {
        id: "u1".to_string(),
        name: "Ada".to_string(),
        email: TEST_EMAIL.to_string(),
    }
}

pub fn create_test_trade(id: &str, pair: &str, status: TradeStatus) -> Trade {
    Trade {
        id: id.to_string(),
        pair: pair.to_string(),
        trade_type: TradeType::Buy,
        amount: 2.0,
        status,
    }
}

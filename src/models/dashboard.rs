use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_users: u64,
    pub total_trades: u64,
    pub total_revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenuePoint {
    pub month: String,
    #[serde(deserialize_with = "super::trade::number_or_string")]
    pub revenue: f64,
}

/// Month-over-month change. The first point has no predecessor and yields `None`.
pub fn revenue_deltas(points: &[RevenuePoint]) -> Vec<Option<f64>> {
    let mut deltas = Vec::with_capacity(points.len());
    if points.is_empty() {
        return deltas;
    }
    deltas.push(None);
    deltas.extend(
        points
            .windows(2)
            .map(|pair| Some(pair[1].revenue - pair[0].revenue)),
    );
    deltas
}

/// Direction of a revenue delta, rendered as `▲ +20.00` or `▼ 30.00`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrendIndicator {
    Up(f64),
    Down(f64),
}

impl TrendIndicator {
    /// Zero counts as up.
    pub fn from_delta(diff: f64) -> Self {
        if diff >= 0.0 {
            TrendIndicator::Up(diff)
        } else {
            TrendIndicator::Down(diff.abs())
        }
    }

    pub fn is_up(&self) -> bool {
        matches!(self, TrendIndicator::Up(_))
    }

    /// Indicators for every point that has a delta, in series order.
    pub fn for_series(points: &[RevenuePoint]) -> Vec<TrendIndicator> {
        revenue_deltas(points)
            .into_iter()
            .flatten()
            .map(TrendIndicator::from_delta)
            .collect()
    }
}

impl fmt::Display for TrendIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendIndicator::Up(magnitude) => write!(f, "▲ +{:.2}", magnitude),
            TrendIndicator::Down(magnitude) => write!(f, "▼ {:.2}", magnitude),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(values: &[f64]) -> Vec<RevenuePoint> {
        values
            .iter()
            .enumerate()
            .map(|(i, revenue)| RevenuePoint {
                month: format!("M{}", i + 1),
                revenue: *revenue,
            })
            .collect()
    }

    #[test]
    fn test_revenue_accepts_numeric_strings() {
        let json = r#"[{"month":"Jan","revenue":100},{"month":"Feb","revenue":"120.5"}]"#;
        let points: Vec<RevenuePoint> = serde_json::from_str(json).unwrap();
        assert_eq!(points[1].revenue, 120.5);
        assert!(serde_json::from_str::<RevenuePoint>(r#"{"month":"Mar","revenue":"n/a"}"#).is_err());
    }

    #[test]
    fn test_revenue_deltas() {
        let deltas = revenue_deltas(&series(&[100.0, 120.0, 90.0]));
        assert_eq!(deltas, vec![None, Some(20.0), Some(-30.0)]);
        assert!(revenue_deltas(&[]).is_empty());
        assert_eq!(revenue_deltas(&series(&[5.0])), vec![None]);
    }

    #[test]
    fn test_indicator_rendering() {
        let rendered: Vec<String> = TrendIndicator::for_series(&series(&[100.0, 120.0, 90.0]))
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(rendered, vec!["▲ +20.00", "▼ 30.00"]);
        assert_eq!(TrendIndicator::from_delta(0.0).to_string(), "▲ +0.00");
    }

    #[test]
    fn test_stats_camel_case() {
        let stats: Stats =
            serde_json::from_str(r#"{"totalUsers":3,"totalTrades":12,"totalRevenue":4500.5}"#)
                .unwrap();
        assert_eq!(stats.total_users, 3);
        assert_eq!(stats.total_trades, 12);
        assert_eq!(stats.total_revenue, 4500.5);
    }
}

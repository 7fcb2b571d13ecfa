use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TradeType {
    #[default]
    Buy,
    Sell,
}

impl TradeType {
    pub fn toggle(self) -> Self {
        match self {
            TradeType::Buy => TradeType::Sell,
            TradeType::Sell => TradeType::Buy,
        }
    }
}

impl fmt::Display for TradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeType::Buy => write!(f, "Buy"),
            TradeType::Sell => write!(f, "Sell"),
        }
    }
}

/// Trade status as reported by the server. Values outside the known set are
/// kept verbatim so they can still be displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum TradeStatus {
    #[default]
    Completed,
    Pending,
    Cancelled,
    Other(String),
}

/// Colour family a status is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Affirmative,
    Cautionary,
    Negative,
    Neutral,
}

impl TradeStatus {
    pub fn as_str(&self) -> &str {
        match self {
            TradeStatus::Completed => "Completed",
            TradeStatus::Pending => "Pending",
            TradeStatus::Cancelled => "Cancelled",
            TradeStatus::Other(raw) => raw,
        }
    }

    pub fn tone(&self) -> StatusTone {
        match self {
            TradeStatus::Completed => StatusTone::Affirmative,
            TradeStatus::Pending => StatusTone::Cautionary,
            TradeStatus::Cancelled => StatusTone::Negative,
            TradeStatus::Other(_) => StatusTone::Neutral,
        }
    }

    /// Next known status, wrapping. Unknown values restart the cycle.
    pub fn cycle(&self) -> Self {
        match self {
            TradeStatus::Completed => TradeStatus::Pending,
            TradeStatus::Pending => TradeStatus::Cancelled,
            TradeStatus::Cancelled | TradeStatus::Other(_) => TradeStatus::Completed,
        }
    }
}

impl From<String> for TradeStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "Completed" => TradeStatus::Completed,
            "Pending" => TradeStatus::Pending,
            "Cancelled" => TradeStatus::Cancelled,
            _ => TradeStatus::Other(raw),
        }
    }
}

impl From<TradeStatus> for String {
    fn from(status: TradeStatus) -> Self {
        match status {
            TradeStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for TradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub pair: String,
    #[serde(rename = "type")]
    pub trade_type: TradeType,
    #[serde(deserialize_with = "number_or_string")]
    pub amount: f64,
    pub status: TradeStatus,
}

/// Body of a create request: a trade without its server-assigned id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeDraft {
    pub pair: String,
    #[serde(rename = "type")]
    pub trade_type: TradeType,
    pub amount: f64,
    pub status: TradeStatus,
}

impl TradeDraft {
    pub fn with_id(self, id: impl Into<String>) -> Trade {
        Trade {
            id: id.into(),
            pair: self.pair,
            trade_type: self.trade_type,
            amount: self.amount,
            status: self.status,
        }
    }
}

/// Server-side filter for the trade list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TradeQuery {
    pub search: String,
    pub status: Option<TradeStatus>,
}

impl TradeQuery {
    /// Query pairs in the shape the API expects; empty values mean "no filter".
    pub fn params(&self) -> [(&'static str, String); 2] {
        [
            ("search", self.search.clone()),
            (
                "status",
                self.status
                    .as_ref()
                    .map(|s| s.as_str().to_string())
                    .unwrap_or_default(),
            ),
        ]
    }
}

// Numeric fields sometimes come back as strings.
pub(crate) fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse::<f64>().map_err(serde::de::Error::custom),
    }
}

use crate::error::{Error, Result};
use crate::models::{Trade, TradeDraft, TradeStatus, TradeType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Pair,
    Amount,
    Type,
    Status,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::Pair => FormField::Amount,
            FormField::Amount => FormField::Type,
            FormField::Type => FormField::Status,
            FormField::Status => FormField::Pair,
        }
    }
}

/// State of the add/edit modal. `id` is set only when editing an existing trade.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TradeForm {
    pub id: Option<String>,
    pub pair: String,
    pub trade_type: TradeType,
    /// Raw text as typed; parsed on save.
    pub amount: String,
    pub status: TradeStatus,
    pub focus: FormField,
}

impl From<&Trade> for TradeForm {
    fn from(trade: &Trade) -> Self {
        Self {
            id: Some(trade.id.clone()),
            pair: trade.pair.clone(),
            trade_type: trade.trade_type,
            amount: trade.amount.to_string(),
            status: trade.status.clone(),
            focus: FormField::Pair,
        }
    }
}

impl TradeForm {
    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    pub fn title(&self) -> &'static str {
        if self.is_edit() {
            "Edit Trade"
        } else {
            "Add Trade"
        }
    }

    pub fn to_draft(&self) -> Result<TradeDraft> {
        let amount = self
            .amount
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|a| a.is_finite())
            .ok_or_else(|| Error::ValidationError("Amount must be a number".to_string()))?;

        Ok(TradeDraft {
            pair: self.pair.trim().to_string(),
            trade_type: self.trade_type,
            amount,
            status: self.status.clone(),
        })
    }

    pub fn next_field(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn input_char(&mut self, c: char) {
        match self.focus {
            FormField::Pair => self.pair.push(c),
            FormField::Amount if c.is_ascii_digit() || matches!(c, '.' | '-' | 'e' | 'E') => {
                self.amount.push(c)
            }
            _ => {}
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            FormField::Pair => {
                self.pair.pop();
            }
            FormField::Amount => {
                self.amount.pop();
            }
            _ => {}
        }
    }

    /// Advances the choice under focus (type or status).
    pub fn cycle_choice(&mut self) {
        match self.focus {
            FormField::Type => self.trade_type = self.trade_type.toggle(),
            FormField::Status => self.status = self.status.cycle(),
            _ => {}
        }
    }
}

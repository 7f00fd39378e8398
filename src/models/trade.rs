use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::analytics::outcome::{classify, Outcome, TradeResult};
use crate::analytics::{duration, parse};

/// A journal entry as persisted: raw form inputs only.
///
/// Outcome and duration are derived on read (see [`TradeView`]) and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub id: String,
    pub pair: String,
    #[serde(default)]
    pub strategy: String,

    pub entry_price: String,
    pub stop_loss: String,
    pub target: String,
    pub close_price: String,

    #[serde(default)]
    pub entry_date: String,
    #[serde(default)]
    pub entry_time: String,
    #[serde(default)]
    pub close_date: String,
    #[serde(default)]
    pub close_time: String,

    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub screenshots: Vec<String>, // URLs, not validated

    pub created_at: i64,
    pub updated_at: i64,
}

impl Trade {
    pub fn outcome(&self) -> Outcome {
        classify(&self.entry_price, &self.stop_loss, &self.target, &self.close_price)
    }

    pub fn duration_minutes(&self) -> Option<u64> {
        duration::duration(&self.entry_date, &self.entry_time, &self.close_date, &self.close_time)
    }

    pub fn close_day(&self) -> Option<NaiveDate> {
        parse::parse_date(&self.close_date)
    }

    pub fn entry_instant(&self) -> Option<NaiveDateTime> {
        parse::parse_instant(&self.entry_date, &self.entry_time)
    }

    /// `close - entry` in price units, independent of direction.
    pub fn price_pnl(&self) -> Option<f64> {
        let entry = parse::parse_price(&self.entry_price)?;
        let close = parse::parse_price(&self.close_price)?;
        Some(close - entry)
    }
}

/// Form submission for a new trade.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTradeInput {
    pub pair: String,
    #[serde(default)]
    pub strategy: String,
    pub entry_price: String,
    pub stop_loss: String,
    pub target: String,
    pub close_price: String,
    #[serde(default)]
    pub entry_date: String,
    #[serde(default)]
    pub entry_time: String,
    #[serde(default)]
    pub close_date: String,
    #[serde(default)]
    pub close_time: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub screenshots: Vec<String>,
}

/// Partial edit. `None` leaves the field as it is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTradeInput {
    pub pair: Option<String>,
    pub strategy: Option<String>,
    pub entry_price: Option<String>,
    pub stop_loss: Option<String>,
    pub target: Option<String>,
    pub close_price: Option<String>,
    pub entry_date: Option<String>,
    pub entry_time: Option<String>,
    pub close_date: Option<String>,
    pub close_time: Option<String>,
    pub notes: Option<String>,
    pub screenshots: Option<Vec<String>>,
}

impl UpdateTradeInput {
    pub fn apply_to(self, trade: &mut Trade) {
        let fields = [
            (self.pair, &mut trade.pair),
            (self.strategy, &mut trade.strategy),
            (self.entry_price, &mut trade.entry_price),
            (self.stop_loss, &mut trade.stop_loss),
            (self.target, &mut trade.target),
            (self.close_price, &mut trade.close_price),
            (self.entry_date, &mut trade.entry_date),
            (self.entry_time, &mut trade.entry_time),
            (self.close_date, &mut trade.close_date),
            (self.close_time, &mut trade.close_time),
            (self.notes, &mut trade.notes),
        ];
        for (value, slot) in fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
        if let Some(screenshots) = self.screenshots {
            trade.screenshots = screenshots;
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TradeFilters {
    pub strategy: Option<String>,
    pub pair: Option<String>,
    pub result: Option<TradeResult>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

impl TradeFilters {
    /// Close-date bounds are inclusive; trades without a close date fail a bounded window.
    pub fn matches(&self, trade: &Trade, outcome: &Outcome) -> bool {
        if let Some(strategy) = &self.strategy {
            if !trade.strategy.trim().eq_ignore_ascii_case(strategy.trim()) {
                return false;
            }
        }
        if let Some(pair) = &self.pair {
            if !trade.pair.to_lowercase().contains(&pair.to_lowercase()) {
                return false;
            }
        }
        if let Some(result) = self.result {
            if outcome.result != result {
                return false;
            }
        }
        if self.start_date.is_some() || self.end_date.is_some() {
            let Some(day) = trade.close_day() else {
                return false;
            };
            if self.start_date.is_some_and(|start| day < start) {
                return false;
            }
            if self.end_date.is_some_and(|end| day > end) {
                return false;
            }
        }
        true
    }
}

/// A trade with its derived fields, computed fresh for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeView {
    #[serde(flatten)]
    pub trade: Trade,
    pub outcome: Outcome,
    pub duration_minutes: Option<u64>,
}

impl From<&Trade> for TradeView {
    fn from(trade: &Trade) -> Self {
        TradeView {
            outcome: trade.outcome(),
            duration_minutes: trade.duration_minutes(),
            trade: trade.clone(),
        }
    }
}

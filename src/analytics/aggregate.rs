use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::outcome::TradeResult;
use crate::models::Trade;

/// Bucket for trades recorded without a strategy.
pub const UNSPECIFIED_STRATEGY: &str = "Unspecified";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_trades: usize,
    pub wins: usize,
    pub losses: usize,
    pub breakevens: usize,
    pub undetermined: usize,
    /// Percentage of all trades classified as Win.
    pub win_rate: f64,
    /// Mean realized ratio over trades that have one.
    pub avg_reward_risk: f64,
    pub best_reward_risk: f64,
    pub worst_reward_risk: f64,
    /// Sum of realized ratios.
    pub net_r: f64,
    /// Sum of `close - entry` in price units.
    pub net_pnl: f64,
}

/// Per-strategy breakdown uses the portfolio shape.
pub type StrategySummary = Summary;

#[derive(Default)]
struct SummaryBuilder {
    summary: Summary,
    ratio_count: usize,
    best: Option<f64>,
    worst: Option<f64>,
}

impl SummaryBuilder {
    fn push(&mut self, trade: &Trade) {
        let outcome = trade.outcome();
        let s = &mut self.summary;
        s.total_trades += 1;
        match outcome.result {
            TradeResult::Win => s.wins += 1,
            TradeResult::Loss => s.losses += 1,
            TradeResult::Breakeven => s.breakevens += 1,
            TradeResult::Undetermined => s.undetermined += 1,
        }

        if let Some(ratio) = outcome.reward_risk_ratio {
            self.ratio_count += 1;
            s.net_r += ratio;
            self.best = Some(self.best.map_or(ratio, |b| b.max(ratio)));
            self.worst = Some(self.worst.map_or(ratio, |w| w.min(ratio)));
        }
        if let Some(pnl) = trade.price_pnl() {
            s.net_pnl += pnl;
        }
    }

    fn finish(self) -> Summary {
        let mut s = self.summary;
        s.win_rate = if s.total_trades > 0 {
            (s.wins as f64 / s.total_trades as f64) * 100.0
        } else {
            0.0
        };
        s.avg_reward_risk = if self.ratio_count > 0 {
            s.net_r / self.ratio_count as f64
        } else {
            0.0
        };
        s.best_reward_risk = self.best.unwrap_or(0.0);
        s.worst_reward_risk = self.worst.unwrap_or(0.0);
        s
    }
}

pub fn aggregate(trades: &[Trade]) -> Summary {
    let mut builder = SummaryBuilder::default();
    for trade in trades {
        builder.push(trade);
    }
    builder.finish()
}

pub fn strategy_key(strategy: &str) -> String {
    let trimmed = strategy.trim();
    if trimmed.is_empty() {
        UNSPECIFIED_STRATEGY.to_string()
    } else {
        trimmed.to_string()
    }
}

pub fn aggregate_by_strategy(trades: &[Trade]) -> BTreeMap<String, StrategySummary> {
    let mut builders: BTreeMap<String, SummaryBuilder> = BTreeMap::new();
    for trade in trades {
        builders.entry(strategy_key(&trade.strategy)).or_default().push(trade);
    }
    builders.into_iter().map(|(name, b)| (name, b.finish())).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayTone {
    Green,
    Red,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub trade_count: usize,
    pub wins: usize,
    pub losses: usize,
    pub breakevens: usize,
    pub net_pnl: f64,
    pub net_r: f64,
    pub tone: DayTone,
}

impl DaySummary {
    pub fn empty(date: NaiveDate) -> Self {
        DaySummary {
            date,
            trade_count: 0,
            wins: 0,
            losses: 0,
            breakevens: 0,
            net_pnl: 0.0,
            net_r: 0.0,
            tone: DayTone::Neutral,
        }
    }

    fn push(&mut self, trade: &Trade) {
        let outcome = trade.outcome();
        self.trade_count += 1;
        match outcome.result {
            TradeResult::Win => self.wins += 1,
            TradeResult::Loss => self.losses += 1,
            TradeResult::Breakeven => self.breakevens += 1,
            TradeResult::Undetermined => {}
        }
        self.net_pnl += trade.price_pnl().unwrap_or(0.0);
        self.net_r += outcome.reward_risk_ratio.unwrap_or(0.0);
        self.tone = match self.wins.cmp(&self.losses) {
            std::cmp::Ordering::Greater => DayTone::Green,
            std::cmp::Ordering::Less => DayTone::Red,
            std::cmp::Ordering::Equal => DayTone::Neutral,
        };
    }
}

/// Day summaries keyed by close date. Trades without a parseable close date are skipped.
pub fn aggregate_by_day(trades: &[Trade]) -> BTreeMap<NaiveDate, DaySummary> {
    let mut days: BTreeMap<NaiveDate, DaySummary> = BTreeMap::new();
    for trade in trades {
        let Some(date) = trade.close_day() else {
            continue;
        };
        days.entry(date).or_insert_with(|| DaySummary::empty(date)).push(trade);
    }
    days
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityCurvePoint {
    pub date: NaiveDate,
    pub daily_pnl: f64,
    pub cumulative_pnl: f64,
    pub daily_r: f64,
    pub cumulative_r: f64,
    pub trade_count: usize,
}

pub fn equity_curve(trades: &[Trade]) -> Vec<EquityCurvePoint> {
    let mut cumulative_pnl = 0.0;
    let mut cumulative_r = 0.0;

    aggregate_by_day(trades)
        .into_values()
        .map(|day| {
            cumulative_pnl += day.net_pnl;
            cumulative_r += day.net_r;
            EquityCurvePoint {
                date: day.date,
                daily_pnl: day.net_pnl,
                cumulative_pnl,
                daily_r: day.net_r,
                cumulative_r,
                trade_count: day.trade_count,
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DateRange {
    #[serde(rename = "today")]
    Today,
    #[serde(rename = "week")]
    Week,
    #[serde(rename = "month")]
    Month,
    #[serde(rename = "3months")]
    ThreeMonths,
    #[serde(rename = "6months")]
    SixMonths,
    #[serde(rename = "year")]
    Year,
    #[default]
    #[serde(rename = "all")]
    All,
}

impl DateRange {
    /// Unknown keys mean no restriction.
    pub fn from_key(key: Option<&str>) -> Self {
        match key {
            Some("today") => DateRange::Today,
            Some("week") => DateRange::Week,
            Some("month") => DateRange::Month,
            Some("3months") => DateRange::ThreeMonths,
            Some("6months") => DateRange::SixMonths,
            Some("year") => DateRange::Year,
            _ => DateRange::All,
        }
    }

    /// Earliest close date included, relative to `today`.
    pub fn cutoff(&self, today: NaiveDate) -> Option<NaiveDate> {
        let days = match self {
            DateRange::Today => 0,
            DateRange::Week => 7,
            DateRange::Month => 30,
            DateRange::ThreeMonths => 90,
            DateRange::SixMonths => 180,
            DateRange::Year => 365,
            DateRange::All => return None,
        };
        today.checked_sub_days(Days::new(days))
    }
}

/// Trades closed on or after the range cutoff. `All` keeps every trade, open or closed.
pub fn filter_by_range(trades: &[Trade], range: DateRange, today: NaiveDate) -> Vec<Trade> {
    let Some(cutoff) = range.cutoff(today) else {
        return trades.to_vec();
    };
    trades
        .iter()
        .filter(|t| t.close_day().is_some_and(|day| day >= cutoff && day <= today))
        .cloned()
        .collect()
}

use serde::{Deserialize, Serialize};

use super::parse::parse_price;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeResult {
    Win,
    Loss,
    #[serde(rename = "BE")]
    Breakeven,
    /// One of the four prices is missing or not a number yet.
    Undetermined,
}

impl TradeResult {
    pub fn label(&self) -> &'static str {
        match self {
            TradeResult::Win => "Win",
            TradeResult::Loss => "Loss",
            TradeResult::Breakeven => "BE",
            TradeResult::Undetermined => "-",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Long,
    Short,
}

/// Derived outcome of a trade. Always recomputed from the raw prices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub result: TradeResult,
    pub direction: Option<Direction>,
    /// Realized profit or loss as a multiple of the risk taken.
    /// Positive means the trade moved in its favorable direction, long or short.
    pub reward_risk_ratio: Option<f64>,
    /// Planned reward / risk from entry, stop and target.
    pub planned_reward_risk: Option<f64>,
    pub risk: Option<f64>,
    pub reward: Option<f64>,
}

impl Outcome {
    pub fn undetermined() -> Self {
        Outcome {
            result: TradeResult::Undetermined,
            direction: None,
            reward_risk_ratio: None,
            planned_reward_risk: None,
            risk: None,
            reward: None,
        }
    }

    pub fn is_determined(&self) -> bool {
        self.result != TradeResult::Undetermined
    }
}

/// Classify a trade from the text of its four price fields.
pub fn classify(entry: &str, stop_loss: &str, target: &str, close: &str) -> Outcome {
    match (
        parse_price(entry),
        parse_price(stop_loss),
        parse_price(target),
        parse_price(close),
    ) {
        (Some(e), Some(s), Some(t), Some(c)) => classify_prices(e, s, t, c),
        _ => Outcome::undetermined(),
    }
}

/// Direction comes from the target; a target equal to entry falls back to the stop side.
fn infer_direction(entry: f64, stop_loss: f64, target: f64) -> Option<Direction> {
    if target > entry {
        Some(Direction::Long)
    } else if target < entry {
        Some(Direction::Short)
    } else if stop_loss < entry {
        Some(Direction::Long)
    } else if stop_loss > entry {
        Some(Direction::Short)
    } else {
        None
    }
}

pub fn classify_prices(entry: f64, stop_loss: f64, target: f64, close: f64) -> Outcome {
    if !(entry.is_finite() && stop_loss.is_finite() && target.is_finite() && close.is_finite()) {
        return Outcome::undetermined();
    }

    let risk = (entry - stop_loss).abs();
    let reward = (target - entry).abs();
    let direction = infer_direction(entry, stop_loss, target);

    let result = match direction {
        Some(Direction::Long) if close >= target => TradeResult::Win,
        Some(Direction::Short) if close <= target => TradeResult::Win,
        Some(Direction::Long) if close <= stop_loss => TradeResult::Loss,
        Some(Direction::Short) if close >= stop_loss => TradeResult::Loss,
        _ => TradeResult::Breakeven,
    };

    let favorable_move = match direction {
        Some(Direction::Short) => entry - close,
        _ => close - entry,
    };

    // Zero risk reports a flat ratio instead of dividing by zero
    let realized = if risk > 0.0 { favorable_move / risk } else { 0.0 };
    let planned = (risk > 0.0).then(|| reward / risk);

    Outcome {
        result,
        direction,
        reward_risk_ratio: Some(realized),
        planned_reward_risk: planned,
        risk: Some(risk),
        reward: Some(reward),
    }
}

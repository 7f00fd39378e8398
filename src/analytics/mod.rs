//! Pure trade analytics: outcome classification, holding time and aggregation.
//!
//! Nothing here touches storage or mutates its input; every function can be
//! called on each render.

pub mod aggregate;
pub mod calendar;
pub mod duration;
pub mod outcome;
pub mod parse;

pub use aggregate::{
    aggregate, aggregate_by_day, aggregate_by_strategy, equity_curve, filter_by_range, DateRange,
    DaySummary, DayTone, EquityCurvePoint, StrategySummary, Summary, UNSPECIFIED_STRATEGY,
};
pub use calendar::{month_calendar, MonthCalendar};
pub use duration::duration;
pub use outcome::{classify, classify_prices, Direction, Outcome, TradeResult};

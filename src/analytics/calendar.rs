use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::aggregate::{aggregate_by_day, DaySummary};
use crate::models::Trade;

/// One month of the P/L heat-map, Sunday-first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthCalendar {
    pub year: i32,
    pub month: u32,
    /// Empty cells before the 1st when weeks start on Sunday.
    pub leading_blanks: u32,
    pub days: Vec<DaySummary>,
    pub net_pnl: f64,
}

/// `None` when `year`/`month` do not name a real month.
pub fn month_calendar(trades: &[Trade], year: i32, month: u32) -> Option<MonthCalendar> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let by_day = aggregate_by_day(trades);

    let days: Vec<DaySummary> = first
        .iter_days()
        .take_while(|d| d.month() == month)
        .map(|d| by_day.get(&d).cloned().unwrap_or_else(|| DaySummary::empty(d)))
        .collect();

    Some(MonthCalendar {
        year,
        month,
        leading_blanks: first.weekday().num_days_from_sunday(),
        net_pnl: days.iter().map(|d| d.net_pnl).sum(),
        days,
    })
}

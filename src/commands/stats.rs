use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::analytics::{self, DateRange, EquityCurvePoint, MonthCalendar, StrategySummary, Summary};
use crate::db::KeyValueStore;
use crate::journal::Journal;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    pub range: DateRange,
    #[serde(flatten)]
    pub summary: Summary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyStats {
    pub strategy: String,
    #[serde(flatten)]
    pub summary: StrategySummary,
}

pub fn get_dashboard_stats<S: KeyValueStore>(
    journal: &Journal<S>,
    date_range: Option<String>,
    today: NaiveDate,
) -> Result<DashboardStats, String> {
    let range = DateRange::from_key(date_range.as_deref());
    let trades = analytics::filter_by_range(journal.trades(), range, today);

    Ok(DashboardStats {
        range,
        summary: analytics::aggregate(&trades),
    })
}

/// Per-strategy breakdown, most traded first.
pub fn get_strategy_stats<S: KeyValueStore>(
    journal: &Journal<S>,
    date_range: Option<String>,
    today: NaiveDate,
) -> Result<Vec<StrategyStats>, String> {
    let range = DateRange::from_key(date_range.as_deref());
    let trades = analytics::filter_by_range(journal.trades(), range, today);

    let by_strategy: BTreeMap<String, StrategySummary> = analytics::aggregate_by_strategy(&trades);
    let mut stats: Vec<StrategyStats> = by_strategy
        .into_iter()
        .map(|(strategy, summary)| StrategyStats { strategy, summary })
        .collect();
    stats.sort_by(|a, b| b.summary.total_trades.cmp(&a.summary.total_trades));

    Ok(stats)
}

pub fn get_calendar<S: KeyValueStore>(
    journal: &Journal<S>,
    year: i32,
    month: u32,
) -> Result<MonthCalendar, String> {
    analytics::month_calendar(journal.trades(), year, month)
        .ok_or_else(|| format!("Invalid month: {}-{:02}", year, month))
}

pub fn get_equity_curve<S: KeyValueStore>(
    journal: &Journal<S>,
    date_range: Option<String>,
    today: NaiveDate,
) -> Result<Vec<EquityCurvePoint>, String> {
    let range = DateRange::from_key(date_range.as_deref());
    let trades = analytics::filter_by_range(journal.trades(), range, today);
    Ok(analytics::equity_curve(&trades))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JournalConfig;
    use crate::db::MemoryStore;
    use crate::models::CreateTradeInput;

    fn seeded_journal() -> Journal<MemoryStore> {
        let mut journal = Journal::load(MemoryStore::new(), &JournalConfig::default()).unwrap();
        let rows = [
            ("ORB", "112", "2024-08-30"),
            ("ORB", "94", "2024-08-30"),
            ("Breakout", "115", "2024-08-01"),
            ("", "103", "2024-06-15"),
        ];
        for (strategy, close, close_date) in rows {
            journal
                .add_trade(CreateTradeInput {
                    pair: "XAU/USD".to_string(),
                    strategy: strategy.to_string(),
                    entry_price: "100".to_string(),
                    stop_loss: "95".to_string(),
                    target: "110".to_string(),
                    close_price: close.to_string(),
                    close_date: close_date.to_string(),
                    ..Default::default()
                })
                .unwrap();
        }
        journal
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 8, 31).unwrap()
    }

    #[test]
    fn test_dashboard_respects_range() {
        let journal = seeded_journal();

        let all = get_dashboard_stats(&journal, None, today()).unwrap();
        assert_eq!(all.summary.total_trades, 4);
        assert_eq!(all.summary.wins, 2);
        assert_eq!(all.summary.breakevens, 1);

        let week = get_dashboard_stats(&journal, Some("week".to_string()), today()).unwrap();
        assert_eq!(week.range, DateRange::Week);
        assert_eq!(week.summary.total_trades, 2);
        assert!((week.summary.win_rate - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_dashboard_on_empty_journal() {
        let journal = Journal::load(MemoryStore::new(), &JournalConfig::default()).unwrap();
        let stats = get_dashboard_stats(&journal, None, today()).unwrap();

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["total_trades"], 0);
        assert_eq!(json["win_rate"], 0.0);
        assert_eq!(json["avg_reward_risk"], 0.0);
    }

    #[test]
    fn test_strategy_stats_sorted_by_volume() {
        let stats = get_strategy_stats(&seeded_journal(), None, today()).unwrap();
        assert_eq!(stats.len(), 3);
        assert_eq!(stats[0].strategy, "ORB");
        assert_eq!(stats[0].summary.total_trades, 2);
        assert!(stats.iter().any(|s| s.strategy == analytics::UNSPECIFIED_STRATEGY));
    }

    #[test]
    fn test_calendar_and_curve() {
        let journal = seeded_journal();

        let calendar = get_calendar(&journal, 2024, 8).unwrap();
        assert_eq!(calendar.days.len(), 31);
        assert_eq!(calendar.days[29].trade_count, 2);
        assert!(get_calendar(&journal, 2024, 13).is_err());

        let curve = get_equity_curve(&journal, Some("3months".to_string()), today()).unwrap();
        assert_eq!(curve.len(), 3);
        assert!((curve[2].cumulative_pnl - (3.0 + 15.0 + 12.0 - 6.0)).abs() < 1e-9);
    }
}

//! Property tests for outcome classification, holding time and aggregation.
//!
//! 1. Long and short trades classify by which side of the range the close lands on
//! 2. Classification is repeatable and the ratio sign follows profit direction
//! 3. Durations are never negative
//! 4. Aggregates never contain NaN

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use trade_journal_lib::analytics::{
    aggregate, aggregate_by_day, aggregate_by_strategy, classify, classify_prices, duration, TradeResult,
};
use trade_journal_lib::models::Trade;

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_price() -> impl Strategy<Value = f64> {
    (10.0..500.0_f64).prop_map(|p| (p * 100.0).round() / 100.0)
}

fn arb_distance() -> impl Strategy<Value = f64> {
    (0.5..50.0_f64).prop_map(|d| (d * 100.0).round() / 100.0)
}

/// entry, stop distance, target distance; all strictly positive distances.
fn arb_setup() -> impl Strategy<Value = (f64, f64, f64)> {
    (arb_price(), arb_distance(), arb_distance())
}

fn arb_trade() -> impl Strategy<Value = Trade> {
    (
        prop::sample::select(vec!["ORB", "Breakout", "Power Trend", ""]),
        arb_setup(),
        -80.0..80.0_f64,
        any::<bool>(),
        prop::option::of(0u32..60),
    )
        .prop_map(|(strategy, (entry, risk, reward), move_by, short, day)| {
            let (stop, target) = if short {
                (entry + risk, entry - reward)
            } else {
                (entry - risk, entry + reward)
            };
            let close_date = day
                .map(|d| (NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::days(d as i64)).to_string())
                .unwrap_or_default();
            Trade {
                id: format!("TRADE-{}-{}", entry, move_by),
                pair: "EUR/USD".to_string(),
                strategy: strategy.to_string(),
                entry_price: entry.to_string(),
                stop_loss: stop.to_string(),
                target: target.to_string(),
                close_price: (entry + move_by).to_string(),
                entry_date: String::new(),
                entry_time: String::new(),
                close_date,
                close_time: String::new(),
                notes: String::new(),
                screenshots: vec![],
                created_at: 0,
                updated_at: 0,
            }
        })
}

// ── 1. Classification ────────────────────────────────────────────────

proptest! {
    #[test]
    fn long_close_at_or_past_target_wins((entry, risk, reward) in arb_setup(), beyond in 0.0..20.0_f64) {
        let outcome = classify_prices(entry, entry - risk, entry + reward, entry + reward + beyond);
        prop_assert_eq!(outcome.result, TradeResult::Win);
        prop_assert!(outcome.reward_risk_ratio.unwrap() > 0.0);
    }

    #[test]
    fn long_close_at_or_past_stop_loses((entry, risk, reward) in arb_setup(), beyond in 0.0..20.0_f64) {
        let outcome = classify_prices(entry, entry - risk, entry + reward, entry - risk - beyond);
        prop_assert_eq!(outcome.result, TradeResult::Loss);
        prop_assert!(outcome.reward_risk_ratio.unwrap() < 0.0);
    }

    #[test]
    fn long_close_inside_range_is_breakeven((entry, risk, reward) in arb_setup(), frac in 0.01..0.99_f64) {
        let stop = entry - risk;
        let target = entry + reward;
        let close = stop + (target - stop) * frac;
        let outcome = classify_prices(entry, stop, target, close);
        prop_assert_eq!(outcome.result, TradeResult::Breakeven);
    }

    #[test]
    fn short_close_at_or_past_target_wins((entry, risk, reward) in arb_setup(), beyond in 0.0..20.0_f64) {
        let outcome = classify_prices(entry, entry + risk, entry - reward, entry - reward - beyond);
        prop_assert_eq!(outcome.result, TradeResult::Win);
        prop_assert!(outcome.reward_risk_ratio.unwrap() > 0.0);
    }

    #[test]
    fn short_close_at_or_past_stop_loses((entry, risk, reward) in arb_setup(), beyond in 0.0..20.0_f64) {
        let outcome = classify_prices(entry, entry + risk, entry - reward, entry + risk + beyond);
        prop_assert_eq!(outcome.result, TradeResult::Loss);
        prop_assert!(outcome.reward_risk_ratio.unwrap() < 0.0);
    }

    #[test]
    fn short_close_inside_range_is_breakeven((entry, risk, reward) in arb_setup(), frac in 0.01..0.99_f64) {
        let stop = entry + risk;
        let target = entry - reward;
        let close = target + (stop - target) * frac;
        let outcome = classify_prices(entry, stop, target, close);
        prop_assert_eq!(outcome.result, TradeResult::Breakeven);
    }
}

// ── 2. Repeatability ─────────────────────────────────────────────────

proptest! {
    #[test]
    fn classify_is_repeatable(e in arb_price(), s in arb_price(), t in arb_price(), c in arb_price()) {
        let (e, s, t, c) = (e.to_string(), s.to_string(), t.to_string(), c.to_string());
        prop_assert_eq!(classify(&e, &s, &t, &c), classify(&e, &s, &t, &c));
    }

    #[test]
    fn ratio_is_never_nan(e in arb_price(), s in arb_price(), t in arb_price(), c in arb_price()) {
        let ratio = classify_prices(e, s, t, c).reward_risk_ratio.unwrap();
        prop_assert!(ratio.is_finite());
    }
}

// ── 3. Durations ─────────────────────────────────────────────────────

proptest! {
    #[test]
    fn duration_never_negative(open in 0i64..100_000, close in 0i64..100_000) {
        let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let opened = base + Duration::minutes(open);
        let closed = base + Duration::minutes(close);

        let minutes = duration(
            &opened.format("%Y-%m-%d").to_string(),
            &opened.format("%H:%M").to_string(),
            &closed.format("%Y-%m-%d").to_string(),
            &closed.format("%H:%M").to_string(),
        );

        if close < open {
            prop_assert_eq!(minutes, None);
        } else {
            prop_assert_eq!(minutes, Some((close - open) as u64));
        }
    }
}

// ── 4. Aggregates ────────────────────────────────────────────────────

proptest! {
    #[test]
    fn aggregates_have_no_nan(trades in prop::collection::vec(arb_trade(), 0..40)) {
        let summary = aggregate(&trades);
        prop_assert_eq!(summary.total_trades, trades.len());
        prop_assert_eq!(
            summary.wins + summary.losses + summary.breakevens + summary.undetermined,
            trades.len()
        );
        for value in [summary.win_rate, summary.avg_reward_risk, summary.best_reward_risk, summary.worst_reward_risk] {
            prop_assert!(value.is_finite());
        }
        prop_assert!(summary.best_reward_risk >= summary.worst_reward_risk);

        let by_strategy = aggregate_by_strategy(&trades);
        let partitioned: usize = by_strategy.values().map(|s| s.total_trades).sum();
        prop_assert_eq!(partitioned, trades.len());

        let by_day = aggregate_by_day(&trades);
        let dated = trades.iter().filter(|t| !t.close_date.is_empty()).count();
        prop_assert_eq!(by_day.values().map(|d| d.trade_count).sum::<usize>(), dated);
    }
}

#[test]
fn empty_collection_summary_is_zero() {
    let summary = aggregate(&[]);
    assert_eq!(summary.total_trades, 0);
    assert_eq!(summary.win_rate, 0.0);
    assert_eq!(summary.avg_reward_risk, 0.0);
    assert_eq!(summary.best_reward_risk, 0.0);
    assert_eq!(summary.worst_reward_risk, 0.0);
}

#[test]
fn documented_examples() {
    let long = classify("100", "95", "110", "112");
    assert_eq!(long.result, TradeResult::Win);
    assert!((long.reward_risk_ratio.unwrap() - 2.4).abs() < 1e-9);

    let short = classify("50", "55", "40", "56");
    assert_eq!(short.result, TradeResult::Loss);
    assert!((short.reward_risk_ratio.unwrap() + 1.2).abs() < 1e-9);

    // close stamped two days before the open
    assert_eq!(duration("2024-03-03", "09:00", "2024-03-01", "09:00"), None);
    assert_eq!(duration("2024-03-01", "09:00", "2024-03-03", "09:00"), Some(2880));
}

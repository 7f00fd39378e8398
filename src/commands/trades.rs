use std::cmp::Ordering;

use crate::db::KeyValueStore;
use crate::error::JournalError;
use crate::journal::Journal;
use crate::models::{CreateTradeInput, Trade, TradeFilters, TradeView, UpdateTradeInput};

pub(crate) fn command_error(e: JournalError) -> String {
    log::error!("Journal command failed: {}", e);
    e.to_string()
}

/// Newest entry first; trades without a readable entry date/time go last.
fn listing_order(a: &Trade, b: &Trade) -> Ordering {
    match (a.entry_instant(), b.entry_instant()) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then_with(|| b.created_at.cmp(&a.created_at))
}

pub fn get_trades<S: KeyValueStore>(
    journal: &Journal<S>,
    filters: Option<TradeFilters>,
) -> Result<Vec<TradeView>, String> {
    let filters = filters.unwrap_or_default();

    let mut trades: Vec<&Trade> = journal.trades().iter().collect();
    trades.sort_by(|a, b| listing_order(a, b));

    let mut views: Vec<TradeView> = trades
        .into_iter()
        .map(TradeView::from)
        .filter(|view| filters.matches(&view.trade, &view.outcome))
        .collect();

    if let (Some(page), Some(limit)) = (filters.page, filters.limit) {
        let offset = page.saturating_sub(1).saturating_mul(limit);
        views = views.into_iter().skip(offset).take(limit).collect();
    }

    Ok(views)
}

pub fn get_trade<S: KeyValueStore>(journal: &Journal<S>, id: &str) -> Result<TradeView, String> {
    journal
        .trade(id)
        .map(TradeView::from)
        .ok_or_else(|| format!("Trade not found: {}", id))
}

pub fn create_trade<S: KeyValueStore>(
    journal: &mut Journal<S>,
    trade: CreateTradeInput,
) -> Result<TradeView, String> {
    journal
        .transact(|j| j.add_trade(trade).map(TradeView::from))
        .map_err(command_error)
}

pub fn update_trade<S: KeyValueStore>(
    journal: &mut Journal<S>,
    id: &str,
    trade_update: UpdateTradeInput,
) -> Result<TradeView, String> {
    journal
        .transact(|j| j.update_trade(id, trade_update).map(TradeView::from))
        .map_err(command_error)
}

pub fn delete_trade<S: KeyValueStore>(journal: &mut Journal<S>, id: &str) -> Result<(), String> {
    journal
        .transact(|j| j.delete_trade(id).map(|_| ()))
        .map_err(command_error)
}

pub fn duplicate_trade<S: KeyValueStore>(journal: &mut Journal<S>, id: &str) -> Result<TradeView, String> {
    journal
        .transact(|j| j.duplicate_trade(id).map(TradeView::from))
        .map_err(command_error)
}

pub fn delete_all_trades<S: KeyValueStore>(journal: &mut Journal<S>) -> Result<usize, String> {
    let count = journal.transact(|j| Ok(j.clear())).map_err(command_error)?;
    log::warn!("Deleted all {} trades", count);
    Ok(count)
}

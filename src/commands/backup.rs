use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::commands::trades::command_error;
use crate::db::KeyValueStore;
use crate::journal::Journal;
use crate::models::{Settings, Trade, TradeView};

pub const BACKUP_VERSION: &str = "1.0.0";

#[derive(Debug, Serialize, Deserialize)]
pub struct BackupData {
    pub settings: Settings,
    pub trades: Vec<Trade>,
    pub export_date: String,
    pub version: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ImportResult {
    pub imported: usize,
    pub replaced: usize,
    pub errors: Vec<String>,
}

/// Export all data to JSON
pub fn export_all_data<S: KeyValueStore>(journal: &Journal<S>) -> Result<String, String> {
    let backup = BackupData {
        settings: journal.settings().clone(),
        trades: journal.trades().to_vec(),
        export_date: Utc::now().to_rfc3339(),
        version: BACKUP_VERSION.to_string(),
    };

    serde_json::to_string_pretty(&backup).map_err(|e| e.to_string())
}

/// Import data from a JSON backup, replacing trades that share an id.
pub fn import_all_data<S: KeyValueStore>(journal: &mut Journal<S>, json_data: &str) -> Result<ImportResult, String> {
    let backup: BackupData = serde_json::from_str(json_data).map_err(|e| e.to_string())?;

    let result = journal
        .transact(|j| {
            *j.settings_mut() = backup.settings;

            let mut result = ImportResult {
                imported: 0,
                replaced: 0,
                errors: Vec::new(),
            };

            for trade in backup.trades {
                let id = trade.id.clone();
                match j.upsert_trade(trade) {
                    Ok(true) => result.replaced += 1,
                    Ok(false) => result.imported += 1,
                    Err(e) => {
                        log::warn!("Skipped trade {} from backup: {}", id, e);
                        result.errors.push(format!("{}: {}", id, e));
                    }
                }
            }
            Ok(result)
        })
        .map_err(command_error)?;
    log::info!(
        "Backup import: {} new, {} replaced, {} rejected",
        result.imported,
        result.replaced,
        result.errors.len()
    );

    Ok(result)
}

const CSV_HEADERS: [&str; 16] = [
    "id",
    "pair",
    "strategy",
    "entry_price",
    "stop_loss",
    "target",
    "close_price",
    "entry_date",
    "entry_time",
    "close_date",
    "close_time",
    "result",
    "reward_risk_ratio",
    "duration_minutes",
    "notes",
    "screenshots",
];

/// Field order must match `CSV_HEADERS`.
#[derive(Debug, Serialize)]
struct TradeCsvRow<'a> {
    id: &'a str,
    pair: &'a str,
    strategy: &'a str,
    entry_price: &'a str,
    stop_loss: &'a str,
    target: &'a str,
    close_price: &'a str,
    entry_date: &'a str,
    entry_time: &'a str,
    close_date: &'a str,
    close_time: &'a str,
    result: &'static str,
    reward_risk_ratio: Option<f64>,
    duration_minutes: Option<u64>,
    notes: &'a str,
    screenshots: String,
}

impl<'a> From<&'a TradeView> for TradeCsvRow<'a> {
    fn from(view: &'a TradeView) -> Self {
        let t = &view.trade;
        TradeCsvRow {
            id: &t.id,
            pair: &t.pair,
            strategy: &t.strategy,
            entry_price: &t.entry_price,
            stop_loss: &t.stop_loss,
            target: &t.target,
            close_price: &t.close_price,
            entry_date: &t.entry_date,
            entry_time: &t.entry_time,
            close_date: &t.close_date,
            close_time: &t.close_time,
            result: view.outcome.result.label(),
            reward_risk_ratio: view.outcome.reward_risk_ratio.map(|r| (r * 100.0).round() / 100.0),
            duration_minutes: view.duration_minutes,
            notes: &t.notes,
            screenshots: t.screenshots.join(" "),
        }
    }
}

/// Trades with their derived columns, in journal order.
pub fn export_trades_csv<S: KeyValueStore>(journal: &Journal<S>) -> Result<String, String> {
    let views: Vec<TradeView> = journal.trades().iter().map(TradeView::from).collect();

    // Headers are written by hand so an empty journal still exports them
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(Vec::new());
    writer.write_record(CSV_HEADERS).map_err(|e| e.to_string())?;
    for view in &views {
        writer.serialize(TradeCsvRow::from(view)).map_err(|e| e.to_string())?;
    }
    let bytes = writer.into_inner().map_err(|e| e.to_string())?;

    String::from_utf8(bytes).map_err(|e| e.to_string())
}

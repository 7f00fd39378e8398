use chrono::Utc;

use crate::analytics::parse::parse_price;
use crate::config::JournalConfig;
use crate::db::KeyValueStore;
use crate::error::{JournalError, Result};
use crate::models::{CreateTradeInput, Settings, Trade, UpdateTradeInput};

/// The trade collection and settings, mirrored to a key-value store.
///
/// State is read once by [`Journal::load`] and written back only by
/// [`Journal::save`]; mutations never persist implicitly.
pub struct Journal<S: KeyValueStore> {
    store: S,
    trades_key: String,
    settings_key: String,
    trades: Vec<Trade>,
    settings: Settings,
}

fn new_trade_id() -> String {
    format!("TRADE-{}-{}", Utc::now().timestamp_millis(), uuid::Uuid::new_v4())
}

/// A stored trade must carry four numeric prices.
pub fn validate_prices(trade: &Trade) -> Result<()> {
    let prices = [
        ("entry_price", &trade.entry_price),
        ("stop_loss", &trade.stop_loss),
        ("target", &trade.target),
        ("close_price", &trade.close_price),
    ];
    for (field, value) in prices {
        if parse_price(value).is_none() {
            return Err(JournalError::invalid(field, format!("'{}' is not a number", value)));
        }
    }
    Ok(())
}

impl<S: KeyValueStore> Journal<S> {
    pub fn load(store: S, config: &JournalConfig) -> Result<Self> {
        let trades: Vec<Trade> = match store.get(&config.trades_key)? {
            Some(json) => serde_json::from_str(&json).map_err(|e| {
                log::error!("Stored trades under '{}' are unreadable: {}", config.trades_key, e);
                JournalError::from(e)
            })?,
            None => Vec::new(),
        };

        let settings = match store.get(&config.settings_key)? {
            Some(json) => serde_json::from_str(&json).map_err(|e| {
                log::error!("Stored settings under '{}' are unreadable: {}", config.settings_key, e);
                JournalError::from(e)
            })?,
            None => Settings::new(Utc::now().timestamp()),
        };

        log::info!("Loaded journal with {} trades", trades.len());

        Ok(Journal {
            store,
            trades_key: config.trades_key.clone(),
            settings_key: config.settings_key.clone(),
            trades,
            settings,
        })
    }

    pub fn save(&self) -> Result<()> {
        let trades = serde_json::to_string(&self.trades)?;
        let settings = serde_json::to_string(&self.settings)?;
        self.store.set(&self.trades_key, &trades)?;
        self.store.set(&self.settings_key, &settings)?;
        log::debug!("Saved {} trades", self.trades.len());
        Ok(())
    }

    /// Apply `change` and save. On any error the in-memory state is rolled back,
    /// so a failed mutation never reaches a later save.
    pub fn transact<T>(&mut self, change: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let trades = self.trades.clone();
        let settings = self.settings.clone();

        let outcome = change(self).and_then(|value| self.save().map(|_| value));
        if let Err(e) = &outcome {
            log::warn!("Rolled back journal change: {}", e);
            self.trades = trades;
            self.settings = settings;
        }
        outcome
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    pub fn trade(&self, id: &str) -> Option<&Trade> {
        self.trades.iter().find(|t| t.id == id)
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.trades
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| JournalError::TradeNotFound(id.to_string()))
    }

    pub fn add_trade(&mut self, input: CreateTradeInput) -> Result<&Trade> {
        let now = Utc::now().timestamp();
        let trade = Trade {
            id: new_trade_id(),
            pair: input.pair,
            strategy: input.strategy,
            entry_price: input.entry_price,
            stop_loss: input.stop_loss,
            target: input.target,
            close_price: input.close_price,
            entry_date: input.entry_date,
            entry_time: input.entry_time,
            close_date: input.close_date,
            close_time: input.close_time,
            notes: input.notes,
            screenshots: input.screenshots,
            created_at: now,
            updated_at: now,
        };
        validate_prices(&trade)?;

        log::info!("Recorded trade {} ({})", trade.id, trade.pair);
        self.trades.push(trade);
        Ok(&self.trades[self.trades.len() - 1])
    }

    pub fn update_trade(&mut self, id: &str, update: UpdateTradeInput) -> Result<&Trade> {
        let index = self.position(id)?;

        let mut edited = self.trades[index].clone();
        update.apply_to(&mut edited);
        validate_prices(&edited)?;
        edited.updated_at = Utc::now().timestamp();

        self.trades[index] = edited;
        Ok(&self.trades[index])
    }

    pub fn delete_trade(&mut self, id: &str) -> Result<Trade> {
        let index = self.position(id)?;
        log::info!("Deleted trade {}", id);
        Ok(self.trades.remove(index))
    }

    pub fn duplicate_trade(&mut self, id: &str) -> Result<&Trade> {
        let original = self.trades[self.position(id)?].clone();
        let now = Utc::now().timestamp();

        let notes = if original.notes.is_empty() {
            "(Copy)".to_string()
        } else {
            format!("{} (Copy)", original.notes)
        };

        self.trades.push(Trade {
            id: new_trade_id(),
            notes,
            created_at: now,
            updated_at: now,
            ..original
        });
        Ok(&self.trades[self.trades.len() - 1])
    }

    pub fn clear(&mut self) -> usize {
        let count = self.trades.len();
        self.trades.clear();
        count
    }

    /// Insert or replace by id. Returns `true` when an existing trade was replaced.
    pub fn upsert_trade(&mut self, trade: Trade) -> Result<bool> {
        validate_prices(&trade)?;
        match self.trades.iter_mut().find(|t| t.id == trade.id) {
            Some(existing) => {
                *existing = trade;
                Ok(true)
            }
            None => {
                self.trades.push(trade);
                Ok(false)
            }
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }
}

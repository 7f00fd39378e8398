use chrono::Utc;

use crate::commands::trades::command_error;
use crate::db::KeyValueStore;
use crate::journal::Journal;
use crate::models::{Settings, UpdateSettingsInput};

pub fn get_settings<S: KeyValueStore>(journal: &Journal<S>) -> Result<Settings, String> {
    Ok(journal.settings().clone())
}

pub fn update_settings<S: KeyValueStore>(
    journal: &mut Journal<S>,
    settings: UpdateSettingsInput,
) -> Result<Settings, String> {
    journal
        .transact(|j| {
            let current = j.settings_mut();

            if let Some(val) = settings.currency {
                current.currency = val;
            }
            if let Some(val) = settings.custom_strategies {
                current.custom_strategies = val;
            }
            current.updated_at = Utc::now().timestamp();
            Ok(current.clone())
        })
        .map_err(command_error)
}

pub fn get_strategy_catalog<S: KeyValueStore>(journal: &Journal<S>) -> Result<Vec<String>, String> {
    Ok(journal.settings().strategy_catalog())
}

/// Add a user-defined strategy to the catalog. Names already offered are left alone.
pub fn add_strategy<S: KeyValueStore>(journal: &mut Journal<S>, name: &str) -> Result<Vec<String>, String> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Strategy name cannot be empty".to_string());
    }

    let catalog = journal.settings().strategy_catalog();
    if catalog.iter().any(|existing| existing.eq_ignore_ascii_case(name)) {
        return Ok(catalog);
    }

    let catalog = journal
        .transact(|j| {
            let settings = j.settings_mut();
            settings.custom_strategies.push(name.to_string());
            settings.updated_at = Utc::now().timestamp();
            Ok(settings.strategy_catalog())
        })
        .map_err(command_error)?;
    log::info!("Added strategy '{}'", name);
    Ok(catalog)
}

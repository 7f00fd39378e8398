use std::path::{Path, PathBuf};

pub const DEFAULT_DB_FILE: &str = "trade_journal.db";
pub const DEFAULT_TRADES_KEY: &str = "trades";
pub const DEFAULT_SETTINGS_KEY: &str = "settings";

#[derive(Debug, Clone, PartialEq)]
pub struct JournalConfig {
    pub data_dir: PathBuf,
    pub db_file: String,
    pub trades_key: String,
    pub settings_key: String,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            db_file: DEFAULT_DB_FILE.to_string(),
            trades_key: DEFAULT_TRADES_KEY.to_string(),
            settings_key: DEFAULT_SETTINGS_KEY.to_string(),
        }
    }
}

impl JournalConfig {
    pub fn in_dir(data_dir: impl AsRef<Path>) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(&self.db_file)
    }
}

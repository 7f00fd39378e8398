use serde::{Deserialize, Serialize};

/// Strategies offered by the entry form before any user additions.
pub const BUILTIN_STRATEGIES: [&str; 5] = ["ORB", "Power Trend", "Breakout", "Phantom Flow", "Pip Snatcher"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub currency: String,
    #[serde(default)]
    pub custom_strategies: Vec<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Settings {
    pub fn new(now: i64) -> Self {
        Settings {
            currency: "USD".to_string(),
            custom_strategies: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Built-in strategies followed by user additions, without case-insensitive duplicates.
    pub fn strategy_catalog(&self) -> Vec<String> {
        let mut catalog: Vec<String> = Vec::new();
        let names = BUILTIN_STRATEGIES
            .iter()
            .map(|s| s.to_string())
            .chain(self.custom_strategies.iter().map(|s| s.trim().to_string()));
        for name in names {
            if name.is_empty() || catalog.iter().any(|c| c.eq_ignore_ascii_case(&name)) {
                continue;
            }
            catalog.push(name);
        }
        catalog
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSettingsInput {
    pub currency: Option<String>,
    pub custom_strategies: Option<Vec<String>>,
}

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Crate settings: where the local database lives and which host paths map
/// to which page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub store_path: PathBuf,
    pub home_path: String,
    pub detail_path_fragment: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from("portfolio_plus_db"),
            home_path: "/finance/".to_string(),
            detail_path_fragment: "/finance/portfolio/".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from the user's config file, falling back to defaults
    /// when none exists yet.
    pub fn load() -> Settings {
        confy::load("portfolio_plus", "config").unwrap_or_else(|e| {
            log::warn!("settings: falling back to defaults: {e}");
            Settings::default()
        })
    }
}

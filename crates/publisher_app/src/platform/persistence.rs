use std::path::Path;

use publisher_engine::{read_optional, write_atomic};
use publisher_logging::{publisher_error, publisher_info, publisher_warn};
use serde::{Deserialize, Serialize};

use crate::cli::ScopeArg;

/// What survives between runs. Selections and overrides never do.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub(crate) struct Settings {
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub last_profile: Option<String>,
    #[serde(default)]
    pub call_timeout_secs: Option<u64>,
    #[serde(default)]
    pub select_all_scope: Option<ScopeArg>,
}

pub(crate) fn load_settings(path: &Path) -> Settings {
    let content = match read_optional(path) {
        Ok(Some(text)) => text,
        Ok(None) => return Settings::default(),
        Err(err) => {
            publisher_warn!("Failed to read settings from {:?}: {}", path, err);
            return Settings::default();
        }
    };

    match ron::from_str(&content) {
        Ok(settings) => {
            publisher_info!("Loaded settings from {:?}", path);
            settings
        }
        Err(err) => {
            publisher_warn!("Failed to parse settings from {:?}: {}", path, err);
            Settings::default()
        }
    }
}

pub(crate) fn save_settings(path: &Path, settings: &Settings) {
    let pretty = ron::ser::PrettyConfig::new();
    let content = match ron::ser::to_string_pretty(settings, pretty) {
        Ok(text) => text,
        Err(err) => {
            publisher_error!("Failed to serialize settings: {}", err);
            return;
        }
    };

    if let Err(err) = write_atomic(path, &content) {
        publisher_error!("Failed to write settings to {:?}: {}", path, err);
    }
}

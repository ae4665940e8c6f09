use cosmic::cosmic_config::{self, CosmicConfigEntry, cosmic_config_derive::CosmicConfigEntry};
use serde::{Deserialize, Serialize};

pub const CONFIG_VERSION: u64 = 1;

pub const APP_ID: &str = "dev.notekeep.app";

/// Used until the user points the app at their own deployment.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000/";

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, CosmicConfigEntry)]
pub struct NotesConfig {
    /// Base address of the notes service; every endpoint path is resolved against it.
    pub server_url: String,
    /// Last username that signed in, prefilled on the login page.
    pub username: String,
    pub debug_logging: bool,
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            username: String::new(),
            debug_logging: false,
        }
    }
}

impl NotesConfig {
    /// Load the stored entry, falling back to defaults for anything missing or unreadable.
    pub fn load() -> (Option<cosmic_config::Config>, Self) {
        match cosmic_config::Config::new(APP_ID, CONFIG_VERSION) {
            Ok(handle) => {
                let config = Self::get_entry(&handle).unwrap_or_else(|(errors, cfg)| {
                    for e in errors {
                        log::warn!("Config entry error: {:?}", e);
                    }
                    cfg
                });
                (Some(handle), config)
            }
            Err(e) => {
                log::error!("Failed to open config: {:?}", e);
                (None, Self::default())
            }
        }
    }

    pub fn server_ready(&self) -> bool {
        !self.server_url.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_local_server() {
        let config = NotesConfig::default();
        assert_eq!(config.server_url, DEFAULT_SERVER_URL);
        assert!(config.username.is_empty());
        assert!(!config.debug_logging);
        assert!(config.server_ready());
    }

    #[test]
    fn blank_url_is_not_ready() {
        let config = NotesConfig {
            server_url: "   ".into(),
            ..NotesConfig::default()
        };
        assert!(!config.server_ready());
    }
}

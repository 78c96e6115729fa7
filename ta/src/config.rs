//! Configuration types and loading

use eyre::{Context, Result, eyre};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::session::DEFAULT_SESSION_TTL_MS;
use crate::validation::DEFAULT_DESCRIPTION_MAX_LEN;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the key-value file lives
    pub storage: StorageConfig,

    /// Session simulation
    pub session: SessionConfig,

    /// Ticket form limits
    pub tickets: TicketsConfig,

    /// Toast and redirect timing
    pub ui: UiConfig,

    /// Static site compilation
    pub site: SiteConfig,
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Project-local config: .ticketapp.yml
        let local_config = PathBuf::from(".ticketapp.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // User config: ~/.config/ticketapp/ticketapp.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("ticketapp").join("ticketapp.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        tracing::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Reject values the rest of the app cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.session.ttl_ms <= 0 {
            return Err(eyre!("session.ttl-ms must be positive, got {}", self.session.ttl_ms));
        }
        Ok(())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        config.validate()?;
        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// JSON file standing in for browser local storage
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("ticketapp")
                .join("storage.json"),
        }
    }
}

/// Session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Session lifetime in milliseconds
    #[serde(rename = "ttl-ms")]
    pub ttl_ms: i64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_ms: DEFAULT_SESSION_TTL_MS,
        }
    }
}

/// Ticket form configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TicketsConfig {
    /// Maximum description length in characters
    #[serde(rename = "description-max-len")]
    pub description_max_len: usize,
}

impl Default for TicketsConfig {
    fn default() -> Self {
        Self {
            description_max_len: DEFAULT_DESCRIPTION_MAX_LEN,
        }
    }
}

/// Toast and redirect timing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Delay before redirecting after login, signup or logout
    #[serde(rename = "redirect-delay-ms")]
    pub redirect_delay_ms: u64,

    /// Delay before redirecting away from a protected page
    #[serde(rename = "guard-redirect-delay-ms")]
    pub guard_redirect_delay_ms: u64,

    /// Toast duration for quick confirmations
    #[serde(rename = "short-toast-ms")]
    pub short_toast_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            redirect_delay_ms: 700,
            guard_redirect_delay_ms: 900,
            short_toast_ms: 900,
        }
    }
}

/// Static site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Directory of template overrides (`<name>.hbs`); embedded templates fill the gaps
    #[serde(rename = "templates-dir")]
    pub templates_dir: Option<PathBuf>,

    /// Output directory for compiled pages
    #[serde(rename = "out-dir")]
    pub out_dir: PathBuf,

    /// Static assets copied into the output directory
    #[serde(rename = "assets-dir")]
    pub assets_dir: Option<PathBuf>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            templates_dir: None,
            out_dir: PathBuf::from("dist"),
            assets_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.session.ttl_ms, 3_600_000);
        assert_eq!(config.tickets.description_max_len, 2000);
        assert_eq!(config.ui.redirect_delay_ms, 700);
        assert_eq!(config.site.out_dir, PathBuf::from("dist"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("ticketapp.yml");
        fs::write(
            &path,
            "storage:\n  path: /tmp/ta.json\nsession:\n  ttl-ms: 1000\nsite:\n  out-dir: public\n",
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.storage.path, PathBuf::from("/tmp/ta.json"));
        assert_eq!(config.session.ttl_ms, 1000);
        assert_eq!(config.site.out_dir, PathBuf::from("public"));
        assert_eq!(config.tickets.description_max_len, 2000);
    }

    #[test]
    fn test_non_positive_ttl_is_rejected() {
        let temp = TempDir::new().unwrap();
        for ttl in ["0", "-5"] {
            let path = temp.path().join(format!("ttl{}.yml", ttl));
            fs::write(&path, format!("session:\n  ttl-ms: {}\n", ttl)).unwrap();
            let err = Config::load(Some(&path)).unwrap_err();
            assert!(format!("{:?}", err).contains("ttl-ms must be positive"));
        }
    }

    #[test]
    fn test_explicit_missing_file_fails() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing.yml");
        assert!(Config::load(Some(&path)).is_err());
    }
}

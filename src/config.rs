//! # Theme Configuration
//!
//! Picks the initial mode for an application from environment variables,
//! a TOML file, or programmatic configuration. The engine itself does not
//! persist the user's choice — the host decides where the configuration
//! comes from and when it is written.
//!
//! ## Environment Variables
//!
//! - `THEMEKIT_MODE`: the mode to activate at startup (e.g. `light`, `dark`)
//! - `THEMEKIT_MODE_FALLBACK`: mode to fall back to if the primary is unknown
//! - `THEMEKIT_CONFIG`: path to a TOML configuration file
//!
//! ## Configuration File Format
//!
//! ```toml
//! [theme]
//! mode = "dark"
//! fallback = "light"
//! ```

use std::env;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{ThemeError, ThemeResult};
use crate::manager::ThemeManager;
use crate::registry::StyleRegistry;

/// Initial-mode configuration for a [ThemeManager].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeConfig {
    /// The mode to activate at startup.
    pub mode: String,
    /// Mode to fall back to when `mode` is not registered.
    pub fallback: Option<String>,
}

#[derive(Deserialize)]
struct ConfigFile {
    #[serde(default)]
    theme: ThemeSection,
}

#[derive(Deserialize, Default)]
struct ThemeSection {
    mode: Option<String>,
    fallback: Option<String>,
}

impl ThemeConfig {
    /// Create a configuration with the default light mode and no fallback.
    pub fn new() -> Self {
        Self {
            mode: crate::manager::LIGHT_MODE.to_string(),
            fallback: None,
        }
    }

    /// Set the startup mode.
    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = mode.into();
        self
    }

    /// Set the fallback mode.
    pub fn with_fallback(mut self, mode: impl Into<String>) -> Self {
        self.fallback = Some(mode.into());
        self
    }

    /// Build a configuration from environment variables, falling back to
    /// defaults. A file named by `THEMEKIT_CONFIG` takes precedence over
    /// the individual variables; an unreadable file is logged and ignored.
    pub fn from_env_or_default() -> Self {
        let mut config = Self::new();

        if let Ok(mode) = env::var("THEMEKIT_MODE") {
            config.mode = mode;
        }
        if let Ok(fallback) = env::var("THEMEKIT_MODE_FALLBACK") {
            config.fallback = Some(fallback);
        }
        if let Ok(path) = env::var("THEMEKIT_CONFIG") {
            match Self::from_file(&path) {
                Ok(file_config) => config = file_config,
                Err(err) => log::warn!("ignoring theme config file '{path}': {err}"),
            }
        }

        config
    }

    /// Load a configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ThemeResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse a configuration from TOML content.
    pub fn from_toml(content: &str) -> ThemeResult<Self> {
        let file: ConfigFile =
            toml::from_str(content).map_err(|err| ThemeError::config_parse(err.to_string()))?;
        let mut config = Self::new();
        if let Some(mode) = file.theme.mode {
            config.mode = mode;
        }
        config.fallback = file.theme.fallback;
        Ok(config)
    }

    /// Activate the configured mode on a manager. If the primary mode is
    /// unknown and a fallback is configured, the fallback is activated
    /// instead; any other error propagates unchanged.
    pub fn apply_to<R: StyleRegistry>(&self, manager: &mut ThemeManager<R>) -> ThemeResult<()> {
        match manager.activate(&self.mode) {
            Err(ThemeError::UnknownMode { mode }) => {
                if let Some(fallback) = &self.fallback {
                    log::warn!("mode '{mode}' is not registered, falling back to '{fallback}'");
                    manager.activate(fallback)
                } else {
                    Err(ThemeError::UnknownMode { mode })
                }
            }
            other => other,
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::MemoryRegistry;

    #[test]
    fn test_from_toml() {
        let config = ThemeConfig::from_toml(
            r#"
            [theme]
            mode = "dark"
            fallback = "light"
            "#,
        )
        .unwrap();
        assert_eq!(config.mode, "dark");
        assert_eq!(config.fallback.as_deref(), Some("light"));
    }

    #[test]
    fn test_from_toml_defaults() {
        let config = ThemeConfig::from_toml("").unwrap();
        assert_eq!(config.mode, "light");
        assert_eq!(config.fallback, None);
    }

    #[test]
    fn test_from_toml_rejects_malformed() {
        assert!(matches!(
            ThemeConfig::from_toml("theme = 3"),
            Err(ThemeError::ConfigParse { .. })
        ));
    }

    #[test]
    fn test_fallback_applies_on_unknown_mode() {
        let mut manager = ThemeManager::new(MemoryRegistry::new());
        let config = ThemeConfig::new().with_mode("solarized").with_fallback("dark");
        config.apply_to(&mut manager).unwrap();
        assert_eq!(manager.current_mode(), Some("dark"));
    }

    #[test]
    fn test_unknown_mode_without_fallback_propagates() {
        let mut manager = ThemeManager::new(MemoryRegistry::new());
        let config = ThemeConfig::new().with_mode("solarized");
        assert!(matches!(
            config.apply_to(&mut manager),
            Err(ThemeError::UnknownMode { .. })
        ));
        assert_eq!(manager.current_mode(), None);
    }
}

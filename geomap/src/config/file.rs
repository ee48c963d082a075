//! INI configuration file.
//!
//! Default location: `<config_dir>/geomap/config.ini` (e.g.
//! `~/.config/geomap/config.ini` on Linux).
//!
//! ```ini
//! [cache]
//! memory_size = 256MB
//!
//! [network]
//! timeout_secs = 30
//! max_concurrent = 16
//! user_agent = geomap/0.3.0
//!
//! [provider]
//! default = yandex
//! google_api_key =
//!
//! [display]
//! empty_tile_color = E0E0E0FF
//!
//! [logging]
//! level = info
//! directory = /var/log/geomap
//! ```
//!
//! Missing sections and keys fall back to defaults.

use std::io;
use std::path::{Path, PathBuf};

use image::Rgba;
use ini::Ini;
use thiserror::Error;

use super::loader::{
    DEFAULT_EMPTY_TILE_COLOR, DEFAULT_MAX_CACHE_BYTES, DEFAULT_MAX_CONCURRENT_FETCHES,
};
use super::size::parse_size;
use crate::provider::{DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};

/// Errors that can occur while loading or saving the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(String),

    #[error("Invalid value '{value}' for {section}.{key}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
    },

    #[error("Could not determine configuration directory")]
    NoConfigDir,
}

impl From<ini::Error> for ConfigError {
    fn from(e: ini::Error) -> Self {
        match e {
            ini::Error::Io(e) => ConfigError::Io(e),
            ini::Error::Parse(e) => ConfigError::Parse(e.to_string()),
        }
    }
}

/// `[cache]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheSettings {
    /// Decoded bitmap budget in bytes.
    pub memory_size: u64,
}

/// `[network]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkSettings {
    pub timeout_secs: u64,
    pub max_concurrent: usize,
    pub user_agent: String,
}

/// `[provider]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderSettings {
    /// Preset name understood by [`crate::provider::ProviderConfig::from_name`].
    pub default: String,
    pub google_api_key: Option<String>,
}

/// `[display]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplaySettings {
    pub empty_tile_color: Rgba<u8>,
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Default filter directive, overridden by `RUST_LOG`.
    pub level: String,
    /// Directory for rolling log files; console only when unset.
    pub directory: Option<PathBuf>,
}

/// Parsed configuration file.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    pub cache: CacheSettings,
    pub network: NetworkSettings,
    pub provider: ProviderSettings,
    pub display: DisplaySettings,
    pub logging: LoggingSettings,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            cache: CacheSettings {
                memory_size: DEFAULT_MAX_CACHE_BYTES,
            },
            network: NetworkSettings {
                timeout_secs: DEFAULT_TIMEOUT_SECS,
                max_concurrent: DEFAULT_MAX_CONCURRENT_FETCHES,
                user_agent: DEFAULT_USER_AGENT.to_string(),
            },
            provider: ProviderSettings {
                default: "osm".to_string(),
                google_api_key: None,
            },
            display: DisplaySettings {
                empty_tile_color: DEFAULT_EMPTY_TILE_COLOR,
            },
            logging: LoggingSettings {
                level: "info".to_string(),
                directory: None,
            },
        }
    }
}

/// Default configuration file location.
pub fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("geomap").join("config.ini"))
}

fn invalid(section: &str, key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
    }
}

/// Parse `RRGGBB` or `RRGGBBAA` hex, with or without a leading `#`.
///
/// Files are written without the `#`, which INI readers may take for a
/// comment marker.
pub fn parse_color(input: &str) -> Option<Rgba<u8>> {
    let hex = input.trim().trim_start_matches('#');
    if !hex.is_ascii() || (hex.len() != 6 && hex.len() != 8) {
        return None;
    }

    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let alpha = if hex.len() == 8 { channel(6)? } else { 255 };

    Some(Rgba([channel(0)?, channel(2)?, channel(4)?, alpha]))
}

fn format_color(color: Rgba<u8>) -> String {
    let [r, g, b, a] = color.0;
    format!("{:02X}{:02X}{:02X}{:02X}", r, g, b, a)
}

impl ConfigFile {
    /// Load from the default location, or defaults if no file exists there.
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_file_path().ok_or(ConfigError::NoConfigDir)?;
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_file(path)?;
        Self::from_ini(&ini)
    }

    /// Parse configuration text.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Self::from_ini(&ini)
    }

    fn from_ini(ini: &Ini) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(section) = ini.section(Some("cache")) {
            if let Some(v) = section.get("memory_size") {
                config.cache.memory_size =
                    parse_size(v).ok_or_else(|| invalid("cache", "memory_size", v))?;
            }
        }

        if let Some(section) = ini.section(Some("network")) {
            if let Some(v) = section.get("timeout_secs") {
                config.network.timeout_secs = v
                    .trim()
                    .parse()
                    .map_err(|_| invalid("network", "timeout_secs", v))?;
            }
            if let Some(v) = section.get("max_concurrent") {
                config.network.max_concurrent = v
                    .trim()
                    .parse::<usize>()
                    .ok()
                    .filter(|n| *n > 0)
                    .ok_or_else(|| invalid("network", "max_concurrent", v))?;
            }
            if let Some(v) = section.get("user_agent") {
                if !v.trim().is_empty() {
                    config.network.user_agent = v.trim().to_string();
                }
            }
        }

        if let Some(section) = ini.section(Some("provider")) {
            if let Some(v) = section.get("default") {
                config.provider.default = v.trim().to_string();
            }
            config.provider.google_api_key = section
                .get("google_api_key")
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string);
        }

        if let Some(section) = ini.section(Some("display")) {
            if let Some(v) = section.get("empty_tile_color") {
                config.display.empty_tile_color =
                    parse_color(v).ok_or_else(|| invalid("display", "empty_tile_color", v))?;
            }
        }

        if let Some(section) = ini.section(Some("logging")) {
            if let Some(v) = section.get("level") {
                config.logging.level = v.trim().to_string();
            }
            config.logging.directory = section
                .get("directory")
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(PathBuf::from);
        }

        Ok(config)
    }

    /// Write the configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut ini = Ini::new();
        ini.with_section(Some("cache"))
            .set("memory_size", self.cache.memory_size.to_string());
        ini.with_section(Some("network"))
            .set("timeout_secs", self.network.timeout_secs.to_string())
            .set("max_concurrent", self.network.max_concurrent.to_string())
            .set("user_agent", self.network.user_agent.clone());
        ini.with_section(Some("provider"))
            .set("default", self.provider.default.clone())
            .set(
                "google_api_key",
                self.provider.google_api_key.clone().unwrap_or_default(),
            );
        ini.with_section(Some("display"))
            .set("empty_tile_color", format_color(self.display.empty_tile_color));
        let mut logging = ini.with_section(Some("logging"));
        logging.set("level", self.logging.level.clone());
        if let Some(dir) = &self.logging.directory {
            logging.set("directory", dir.display().to_string());
        }

        ini.write_to_file(path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_gives_defaults() {
        let config = ConfigFile::parse("").unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_parse_all_sections() {
        let text = "\
[cache]
memory_size = 64MB

[network]
timeout_secs = 10
max_concurrent = 4
user_agent = test-agent

[provider]
default = yandex
google_api_key = abc123

[display]
empty_tile_color = 102030

[logging]
level = debug
directory = /tmp/geomap-logs
";
        let config = ConfigFile::parse(text).unwrap();
        assert_eq!(config.cache.memory_size, 64 * 1024 * 1024);
        assert_eq!(config.network.timeout_secs, 10);
        assert_eq!(config.network.max_concurrent, 4);
        assert_eq!(config.network.user_agent, "test-agent");
        assert_eq!(config.provider.default, "yandex");
        assert_eq!(config.provider.google_api_key.as_deref(), Some("abc123"));
        assert_eq!(config.display.empty_tile_color, Rgba([0x10, 0x20, 0x30, 255]));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(
            config.logging.directory,
            Some(PathBuf::from("/tmp/geomap-logs"))
        );
    }

    #[test]
    fn test_invalid_size_rejected() {
        let result = ConfigFile::parse("[cache]\nmemory_size = huge\n");
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let result = ConfigFile::parse("[network]\nmax_concurrent = 0\n");
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_empty_api_key_is_none() {
        let config = ConfigFile::parse("[provider]\ngoogle_api_key =\n").unwrap();
        assert!(config.provider.google_api_key.is_none());
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("#FF0000"), Some(Rgba([255, 0, 0, 255])));
        assert_eq!(parse_color("00ff0080"), Some(Rgba([0, 255, 0, 128])));
        assert_eq!(parse_color("#FFF"), None);
        assert_eq!(parse_color("#GG0000"), None);
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.ini");

        let mut config = ConfigFile::default();
        config.cache.memory_size = 128 * 1024 * 1024;
        config.provider.default = "arcgis".to_string();
        config.display.empty_tile_color = Rgba([1, 2, 3, 4]);
        config.save_to(&path).unwrap();

        let loaded = ConfigFile::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = ConfigFile::load_from(&dir.path().join("absent.ini"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}

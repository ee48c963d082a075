//! CLI error type.

use std::fmt;

use geomap::config::ConfigError;
use geomap::logging::LoggingError;
use geomap::provider::ProviderError;
use geomap::tile::TileKeyError;

/// Errors reported by CLI commands before exiting with a failure status.
#[derive(Debug)]
pub enum CliError {
    /// Configuration problem or invalid argument combination
    Config(String),
    /// Provider lookup or construction failed
    Provider(ProviderError),
    /// Tile address rejected
    TileKey(TileKeyError),
    /// Tile could not be fetched
    Fetch(String),
    Io(std::io::Error),
    Image(image::ImageError),
    Logging(LoggingError),
    Json(serde_json::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Provider(e) => write!(f, "Provider error: {}", e),
            CliError::TileKey(e) => write!(f, "Invalid tile: {}", e),
            CliError::Fetch(msg) => write!(f, "Fetch failed: {}", msg),
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::Image(e) => write!(f, "Image error: {}", e),
            CliError::Logging(e) => write!(f, "Logging setup failed: {}", e),
            CliError::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for CliError {}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<ProviderError> for CliError {
    fn from(e: ProviderError) -> Self {
        CliError::Provider(e)
    }
}

impl From<TileKeyError> for CliError {
    fn from(e: TileKeyError) -> Self {
        CliError::TileKey(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

impl From<image::ImageError> for CliError {
    fn from(e: image::ImageError) -> Self {
        CliError::Image(e)
    }
}

impl From<LoggingError> for CliError {
    fn from(e: LoggingError) -> Self {
        CliError::Logging(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_wraps_source() {
        let err = CliError::from(ProviderError::UnknownProvider("Nowhere".to_string()));
        assert_eq!(err.to_string(), "Provider error: Unknown provider: Nowhere");
    }

    #[test]
    fn test_tile_key_error_converts() {
        let err: CliError = geomap::TileKey::new(0, 0, 31, "osm").unwrap_err().into();
        assert!(matches!(err, CliError::TileKey(_)));
    }
}

//! Fetch failure reasons.

use thiserror::Error;

use crate::provider::ProviderError;

/// Why a background tile fetch produced nothing.
///
/// These never reach callers of [`super::TileLoader::get`]; they are logged
/// and counted, and the tile keeps showing its placeholder.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The provider is unknown or cannot address the key.
    #[error("Tile is not served by its provider")]
    Unsupported,

    #[error("Fetch failed: {0}")]
    Fetch(#[from] ProviderError),

    #[error("Decode failed: {0}")]
    Decode(#[from] image::ImageError),

    /// The loader shut down, or the decode task was aborted.
    #[error("Load cancelled")]
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_message() {
        let err = LoadError::from(ProviderError::HttpStatus {
            status: 404,
            url: "http://tiles.test/1/2/3.png".to_string(),
        });
        assert!(err.to_string().starts_with("Fetch failed:"));
        assert!(err.to_string().contains("404"));
    }
}

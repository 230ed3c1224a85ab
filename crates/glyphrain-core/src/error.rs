/// Core error types for glyphrain.
use std::path::PathBuf;

/// A specialized Result type for glyphrain operations.
pub type RainResult<T> = Result<T, RainError>;

/// Top-level error type shared by the generator, the encoder and the CLI.
#[derive(Debug, thiserror::Error)]
pub enum RainError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("encode error: {0}")]
    Encode(String),

    #[error("asset error: {message} ({path:?})")]
    Asset { message: String, path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RainError {
    /// Create an asset error.
    pub fn asset(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        RainError::Asset {
            message: message.into(),
            path: path.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        RainError::InvalidConfig(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = RainError::config("fps must be positive");
        assert_eq!(
            err.to_string(),
            "invalid configuration: fps must be positive"
        );
    }

    #[test]
    fn test_asset_error_display() {
        let err = RainError::asset("font not found", "/fonts/missing.ttf");
        assert!(err.to_string().contains("font not found"));
        assert!(err.to_string().contains("missing.ttf"));
    }
}

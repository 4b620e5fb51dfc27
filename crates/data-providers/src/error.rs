//! Errors raised by the bundled providers.

use featureserver_protocol::LayerId;
use thiserror::Error;

/// Result type alias using StaticProviderError.
pub type StaticResult<T> = Result<T, StaticProviderError>;

#[derive(Debug, Error)]
pub enum StaticProviderError {
    #[error("Failed to read provider file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid provider definition '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Duplicate service id '{0}'")]
    DuplicateService(String),

    #[error("Duplicate layer {layer} in service '{service}'")]
    DuplicateLayer { service: String, layer: LayerId },

    #[error("Unknown service '{0}'")]
    UnknownService(String),

    #[error("Unknown layer {layer} in service '{service}'")]
    UnknownLayer { service: String, layer: LayerId },

    #[error("Invalid objectIds filter '{0}'")]
    InvalidObjectIds(String),
}

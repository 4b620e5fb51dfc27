//! Error types for the feature service output crates.

use thiserror::Error;

/// Error type returned by data provider implementations.
///
/// Providers own their failure modes; the output layer carries them
/// through untouched as the source of [`FeatureServerError::Provider`].
pub type ProviderError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type alias using FeatureServerError.
pub type FeatureServerResult<T> = Result<T, FeatureServerError>;

/// Primary error type for feature service output operations.
#[derive(Debug, Error)]
pub enum FeatureServerError {
    // === Collaborator Errors ===
    #[error("Data provider error: {0}")]
    Provider(#[from] ProviderError),

    // === Template Errors ===
    #[error("Template mismatch: {0}")]
    Template(String),

    #[error("Failed to load template '{path}': {message}")]
    TemplateLoad { path: String, message: String },

    // === Request Errors ===
    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    // === Encoding Errors ===
    #[error("JSON error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl FeatureServerError {
    /// Shorthand for an [`FeatureServerError::InvalidParameter`].
    pub fn invalid_parameter(param: impl Into<String>, message: impl Into<String>) -> Self {
        FeatureServerError::InvalidParameter {
            param: param.into(),
            message: message.into(),
        }
    }

    /// Whether the error originated in the data provider rather than in this layer.
    pub fn is_provider_fault(&self) -> bool {
        matches!(self, FeatureServerError::Provider(_))
    }
}

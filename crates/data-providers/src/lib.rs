//! Data providers for the feature service output layer.
//!
//! Provides:
//! - A static provider serving services, layers and features defined in YAML
//! - The definition types that file format deserializes into

pub mod definition;
pub mod error;
pub mod static_provider;

pub use definition::{LayerDefinition, ProviderDefinition, ServiceDefinition};
pub use error::{StaticProviderError, StaticResult};
pub use static_provider::{StaticProvider, OBJECT_IDS_PARAM};

//! Common types shared across the feature service output crates.

pub mod envelope;
pub mod error;
pub mod feature;
pub mod field;
pub mod spatial_reference;

pub use envelope::Envelope;
pub use error::{FeatureServerError, FeatureServerResult, ProviderError};
pub use feature::{Feature, Point};
pub use field::Field;
pub use spatial_reference::{SpatialReference, Wkid};

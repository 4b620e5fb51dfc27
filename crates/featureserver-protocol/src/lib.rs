//! ArcGIS Feature Service output layer
//!
//! This crate turns what a [`DataProvider`] knows about its services,
//! layers and features into ArcGIS-compatible Feature Service resources.
//! Every resource except layer queries comes in two representations:
//! a structured JSON payload and a human-readable HTML page.
//!
//! # Resources
//!
//! - Server info (`currentVersion`, `fullVersion`)
//! - Service catalog
//! - Feature service (with its layer list)
//! - Feature service layer (fields, extent, display and id fields)
//! - Layer query (count, object ids or a feature set, optionally in Web Mercator)
//! - Data provider landing page
//!
//! # Example
//!
//! ```rust
//! use featureserver_protocol::{OutputFormat, Renderer};
//!
//! let renderer = Renderer::with_builtin_templates().unwrap();
//! assert_eq!(OutputFormat::from_tag("json"), OutputFormat::Json);
//! assert!(renderer.templates().info.as_value().get("currentVersion").is_some());
//! ```

pub mod html;
pub mod markup;
pub mod metadata;
pub mod provider;
pub mod query;
pub mod registry;
pub mod render;
pub mod templates;
pub mod urls;

// Re-export commonly used types
pub use markup::{format, format_envelope, format_fields, FormatArg};
pub use provider::{
    CountResult, DataProvider, LayerDescriptor, LayerId, ObjectIdsResult, ProviderResult, Query,
    ServerVersion, ServiceDescriptor,
};
pub use query::{layer_query, project_features, LayerQueryRequest, QueryMode, QueryResult};
pub use registry::ProviderRegistry;
pub use render::{OutputFormat, Rendered, Renderer};
pub use templates::{Skeleton, TemplateName, TemplateSet};
pub use urls::{ArcGisUrls, UrlBuilder};

//! The data provider capability interface.
//!
//! A provider is the only thing that knows about services, layers and
//! features. This crate only reads from it and never holds state of its
//! own, so any type implementing [`DataProvider`] can be rendered.

use std::collections::BTreeMap;
use std::fmt;

use async_trait::async_trait;
use fs_common::{Feature, Field, ProviderError};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::markup::format_number;
use crate::urls::UrlBuilder;

/// Layer identifiers are small non-negative integers.
pub type LayerId = u32;

/// Result type returned by provider calls.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Version token reported as `currentVersion`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ServerVersion {
    Number(f64),
    Text(String),
}

impl ServerVersion {
    /// The `fullVersion` string form.
    pub fn full_version(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ServerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerVersion::Number(n) => f.write_str(&format_number(*n)),
            ServerVersion::Text(s) => f.write_str(s),
        }
    }
}

impl Serialize for ServerVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            // Keep integral versions integral in JSON: 10, not 10.0
            ServerVersion::Number(n) if n.fract() == 0.0 && n.abs() < 9.0e15 => {
                serializer.serialize_i64(*n as i64)
            }
            ServerVersion::Number(n) => serializer.serialize_f64(*n),
            ServerVersion::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl From<f64> for ServerVersion {
    fn from(n: f64) -> Self {
        ServerVersion::Number(n)
    }
}

impl From<&str> for ServerVersion {
    fn from(s: &str) -> Self {
        ServerVersion::Text(s.to_string())
    }
}

/// One entry of the service catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    pub name: String,

    #[serde(rename = "type")]
    pub type_: String,

    pub url: String,

    /// Any further members the provider wants to expose.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ServiceDescriptor {
    pub fn feature_server(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_: "FeatureServer".to_string(),
            url: url.into(),
            extra: Map::new(),
        }
    }
}

/// One entry of a feature service's `layers`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerDescriptor {
    pub id: LayerId,
    pub name: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LayerDescriptor {
    pub fn new(id: LayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            extra: Map::new(),
        }
    }
}

/// Provider answer to a count-only query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountResult {
    pub count: u64,
}

/// Provider answer to an ids-only query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectIdsResult {
    pub object_id_field_name: String,
    pub object_ids: Vec<i64>,
}

/// Provider-defined query filter.
///
/// The output layer never interprets these parameters; they are handed to
/// the provider exactly as the caller supplied them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Query {
    params: BTreeMap<String, String>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

/// Capability interface every data source implements.
///
/// Metadata calls are synchronous. The three query calls are the only
/// suspension points: each resolves exactly once, and a provider that
/// never resolves leaves the request pending (there is no timeout here).
/// Errors are passed through to the caller unchanged.
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Display name.
    fn name(&self) -> &str;

    /// Reported as `currentVersion` / `fullVersion`.
    fn server_version(&self) -> ServerVersion;

    /// URL builder for this provider's resources.
    fn urls(&self) -> &dyn UrlBuilder;

    /// Service ids, in catalog order.
    fn service_ids(&self) -> ProviderResult<Vec<String>>;

    fn service_details(&self, service_id: &str) -> ProviderResult<ServiceDescriptor>;

    /// Layer ids of a service, in display order.
    fn layer_ids(&self, service_id: &str) -> ProviderResult<Vec<LayerId>>;

    fn layer_details(&self, service_id: &str, layer_id: LayerId) -> ProviderResult<LayerDescriptor>;

    /// The layer's display field.
    fn name_field(&self, service_id: &str, layer_id: LayerId) -> ProviderResult<String>;

    /// The layer's object id field.
    fn id_field(&self, service_id: &str, layer_id: LayerId) -> ProviderResult<String>;

    fn fields(&self, service_id: &str, layer_id: LayerId) -> ProviderResult<Vec<Field>>;

    async fn count_for_query(
        &self,
        service_id: &str,
        layer_id: LayerId,
        query: &Query,
    ) -> ProviderResult<CountResult>;

    async fn ids_for_query(
        &self,
        service_id: &str,
        layer_id: LayerId,
        query: &Query,
    ) -> ProviderResult<ObjectIdsResult>;

    /// Matching features, in the provider's order.
    async fn features_for_query(
        &self,
        service_id: &str,
        layer_id: LayerId,
        query: &Query,
    ) -> ProviderResult<Vec<Feature>>;
}

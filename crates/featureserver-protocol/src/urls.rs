//! Canonical resource URLs.

use crate::provider::LayerId;

/// Builds the canonical URLs a provider's resources are served under.
pub trait UrlBuilder: Send + Sync {
    /// The service catalog of the provider.
    fn services_url(&self) -> String;

    /// A feature service, which lists its layers.
    fn layers_url(&self, service_id: &str) -> String;

    /// One layer of a feature service.
    fn layer_url(&self, service_id: &str, layer_id: LayerId) -> String;

    /// The query operation of one layer.
    fn layer_query_url(&self, service_id: &str, layer_id: LayerId) -> String;
}

/// ArcGIS Server style URLs:
/// `{base}/{provider}/rest/services/{service}/FeatureServer/{layer}/query`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArcGisUrls {
    base_url: String,
    provider_id: String,
}

impl ArcGisUrls {
    pub fn new(base_url: impl Into<String>, provider_id: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            provider_id: provider_id.into(),
        }
    }

    pub fn provider_id(&self) -> &str {
        &self.provider_id
    }
}

impl UrlBuilder for ArcGisUrls {
    fn services_url(&self) -> String {
        format!("{}/{}/rest/services", self.base_url, self.provider_id)
    }

    fn layers_url(&self, service_id: &str) -> String {
        format!("{}/{}/FeatureServer", self.services_url(), service_id)
    }

    fn layer_url(&self, service_id: &str, layer_id: LayerId) -> String {
        format!("{}/{}", self.layers_url(service_id), layer_id)
    }

    fn layer_query_url(&self, service_id: &str, layer_id: LayerId) -> String {
        format!("{}/query", self.layer_url(service_id, layer_id))
    }
}

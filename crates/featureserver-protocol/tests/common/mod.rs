//! In-memory provider shared by the integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use featureserver_protocol::{
    ArcGisUrls, CountResult, DataProvider, LayerDescriptor, LayerId, ObjectIdsResult,
    ProviderResult, Query, ServerVersion, ServiceDescriptor, UrlBuilder,
};
use fs_common::{Feature, Field};
use test_utils::fixtures;

pub const BASE_URL: &str = "http://localhost:1337";

/// Provider failure used to check error propagation.
#[derive(Debug)]
pub struct BackendOffline;

impl std::fmt::Display for BackendOffline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("backend offline")
    }
}

impl std::error::Error for BackendOffline {}

/// A provider with two services (`cities` with layers 0 and 3, then
/// `rivers` with none) that counts its query calls.
pub struct MockProvider {
    name: String,
    version: ServerVersion,
    urls: ArcGisUrls,
    features: Vec<Feature>,
    fail_queries: bool,
    pub count_calls: AtomicUsize,
    pub ids_calls: AtomicUsize,
    pub feature_calls: AtomicUsize,
}

impl MockProvider {
    pub fn new(id: &str) -> Self {
        Self {
            name: format!("Mock {}", id),
            version: ServerVersion::from(10.1),
            urls: ArcGisUrls::new(BASE_URL, id),
            features: fixtures::sample_features(),
            fail_queries: false,
            count_calls: AtomicUsize::new(0),
            ids_calls: AtomicUsize::new(0),
            feature_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_version(mut self, version: ServerVersion) -> Self {
        self.version = version;
        self
    }

    pub fn with_features(mut self, features: Vec<Feature>) -> Self {
        self.features = features;
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail_queries = true;
        self
    }

    pub fn query_calls(&self) -> (usize, usize, usize) {
        (
            self.count_calls.load(Ordering::SeqCst),
            self.ids_calls.load(Ordering::SeqCst),
            self.feature_calls.load(Ordering::SeqCst),
        )
    }

    fn fail_if_offline(&self) -> ProviderResult<()> {
        if self.fail_queries {
            Err(Box::new(BackendOffline))
        } else {
            Ok(())
        }
    }

    fn check_service(service_id: &str) -> ProviderResult<()> {
        match service_id {
            "cities" | "rivers" => Ok(()),
            other => Err(format!("unknown service '{}'", other).into()),
        }
    }
}

#[async_trait]
impl DataProvider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn server_version(&self) -> ServerVersion {
        self.version.clone()
    }

    fn urls(&self) -> &dyn UrlBuilder {
        &self.urls
    }

    fn service_ids(&self) -> ProviderResult<Vec<String>> {
        Ok(vec!["cities".to_string(), "rivers".to_string()])
    }

    fn service_details(&self, service_id: &str) -> ProviderResult<ServiceDescriptor> {
        Self::check_service(service_id)?;
        Ok(ServiceDescriptor::feature_server(
            service_id,
            self.urls.layers_url(service_id),
        ))
    }

    fn layer_ids(&self, service_id: &str) -> ProviderResult<Vec<LayerId>> {
        Self::check_service(service_id)?;
        if service_id == "cities" {
            Ok(vec![3, 0])
        } else {
            Ok(Vec::new())
        }
    }

    fn layer_details(&self, _service_id: &str, layer_id: LayerId) -> ProviderResult<LayerDescriptor> {
        Ok(LayerDescriptor::new(layer_id, format!("Layer {}", layer_id)))
    }

    fn name_field(&self, _service_id: &str, _layer_id: LayerId) -> ProviderResult<String> {
        Ok("NAME".to_string())
    }

    fn id_field(&self, _service_id: &str, _layer_id: LayerId) -> ProviderResult<String> {
        Ok("OBJECTID".to_string())
    }

    fn fields(&self, _service_id: &str, _layer_id: LayerId) -> ProviderResult<Vec<Field>> {
        Ok(fixtures::sample_fields())
    }

    async fn count_for_query(
        &self,
        _service_id: &str,
        _layer_id: LayerId,
        _query: &Query,
    ) -> ProviderResult<CountResult> {
        self.count_calls.fetch_add(1, Ordering::SeqCst);
        self.fail_if_offline()?;
        Ok(CountResult {
            count: self.features.len() as u64,
        })
    }

    async fn ids_for_query(
        &self,
        _service_id: &str,
        _layer_id: LayerId,
        _query: &Query,
    ) -> ProviderResult<ObjectIdsResult> {
        self.ids_calls.fetch_add(1, Ordering::SeqCst);
        self.fail_if_offline()?;
        Ok(ObjectIdsResult {
            object_id_field_name: "OBJECTID".to_string(),
            object_ids: (1..=self.features.len() as i64).collect(),
        })
    }

    async fn features_for_query(
        &self,
        _service_id: &str,
        _layer_id: LayerId,
        _query: &Query,
    ) -> ProviderResult<Vec<Feature>> {
        self.feature_calls.fetch_add(1, Ordering::SeqCst);
        self.fail_if_offline()?;
        Ok(self.features.clone())
    }
}

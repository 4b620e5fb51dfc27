//! Provider serving services defined in a YAML file.

use std::path::Path;

use async_trait::async_trait;
use featureserver_protocol::{
    ArcGisUrls, CountResult, DataProvider, LayerDescriptor, LayerId, ObjectIdsResult,
    ProviderResult, Query, ServerVersion, ServiceDescriptor, UrlBuilder,
};
use fs_common::{Feature, Field};
use tracing::{debug, info};

use crate::definition::{LayerDefinition, ProviderDefinition};
use crate::error::{StaticProviderError, StaticResult};

/// Query parameter restricting results to a comma-separated list of object ids.
pub const OBJECT_IDS_PARAM: &str = "objectIds";

/// An in-memory provider backed by a [`ProviderDefinition`].
///
/// Queries return every feature of the layer in file order. The only
/// filter understood is [`OBJECT_IDS_PARAM`]; all other query parameters
/// are ignored.
#[derive(Debug, Clone)]
pub struct StaticProvider {
    definition: ProviderDefinition,
    urls: ArcGisUrls,
}

impl StaticProvider {
    pub fn new(
        definition: ProviderDefinition,
        base_url: &str,
        provider_id: &str,
    ) -> StaticResult<Self> {
        definition.validate()?;
        Ok(Self {
            definition,
            urls: ArcGisUrls::new(base_url, provider_id),
        })
    }

    /// Parse a definition from YAML text. `origin` names the source in errors.
    pub fn from_yaml_str(
        yaml: &str,
        origin: &str,
        base_url: &str,
        provider_id: &str,
    ) -> StaticResult<Self> {
        let definition: ProviderDefinition =
            serde_yaml::from_str(yaml).map_err(|e| StaticProviderError::Parse {
                path: origin.to_string(),
                source: e,
            })?;
        Self::new(definition, base_url, provider_id)
    }

    /// Load a definition file.
    pub fn load(path: impl AsRef<Path>, base_url: &str, provider_id: &str) -> StaticResult<Self> {
        let path = path.as_ref();
        let origin = path.display().to_string();

        let yaml = std::fs::read_to_string(path).map_err(|e| StaticProviderError::Io {
            path: origin.clone(),
            source: e,
        })?;

        let provider = Self::from_yaml_str(&yaml, &origin, base_url, provider_id)?;
        info!(
            provider = provider_id,
            services = provider.definition.services.len(),
            "Loaded static provider from {}",
            origin
        );
        Ok(provider)
    }

    pub fn definition(&self) -> &ProviderDefinition {
        &self.definition
    }

    /// Features of a layer that pass the query's object id filter.
    fn matching<'a>(
        &'a self,
        service_id: &str,
        layer_id: LayerId,
        query: &Query,
    ) -> StaticResult<(&'a LayerDefinition, Vec<&'a Feature>)> {
        let layer = self.definition.layer(service_id, layer_id)?;

        let features: Vec<&Feature> = match query.get(OBJECT_IDS_PARAM) {
            Some(raw) => {
                let wanted = parse_object_ids(raw)?;
                layer
                    .features
                    .iter()
                    .filter(|f| layer.object_id(f).is_some_and(|id| wanted.contains(&id)))
                    .collect()
            }
            None => layer.features.iter().collect(),
        };

        debug!(
            service_id,
            layer_id,
            matched = features.len(),
            total = layer.features.len(),
            "Static query"
        );
        Ok((layer, features))
    }
}

fn parse_object_ids(raw: &str) -> StaticResult<Vec<i64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>()
                .map_err(|_| StaticProviderError::InvalidObjectIds(raw.to_string()))
        })
        .collect()
}

#[async_trait]
impl DataProvider for StaticProvider {
    fn name(&self) -> &str {
        &self.definition.name
    }

    fn server_version(&self) -> ServerVersion {
        self.definition.version.clone()
    }

    fn urls(&self) -> &dyn UrlBuilder {
        &self.urls
    }

    fn service_ids(&self) -> ProviderResult<Vec<String>> {
        Ok(self.definition.services.iter().map(|s| s.id.clone()).collect())
    }

    fn service_details(&self, service_id: &str) -> ProviderResult<ServiceDescriptor> {
        let service = self.definition.service(service_id)?;

        let mut descriptor =
            ServiceDescriptor::feature_server(&service.id, self.urls.layers_url(&service.id));
        descriptor.type_ = service.type_.clone();
        if let Some(description) = &service.description {
            descriptor
                .extra
                .insert("description".to_string(), description.clone().into());
        }
        Ok(descriptor)
    }

    fn layer_ids(&self, service_id: &str) -> ProviderResult<Vec<LayerId>> {
        let service = self.definition.service(service_id)?;
        Ok(service.layers.iter().map(|l| l.id).collect())
    }

    fn layer_details(&self, service_id: &str, layer_id: LayerId) -> ProviderResult<LayerDescriptor> {
        let layer = self.definition.layer(service_id, layer_id)?;

        let mut descriptor = LayerDescriptor::new(layer.id, &layer.name);
        if let Some(extent) = &layer.extent {
            descriptor
                .extra
                .insert("extent".to_string(), serde_json::to_value(extent)?);
        }
        Ok(descriptor)
    }

    fn name_field(&self, service_id: &str, layer_id: LayerId) -> ProviderResult<String> {
        Ok(self.definition.layer(service_id, layer_id)?.display_field().to_string())
    }

    fn id_field(&self, service_id: &str, layer_id: LayerId) -> ProviderResult<String> {
        Ok(self.definition.layer(service_id, layer_id)?.id_field().to_string())
    }

    fn fields(&self, service_id: &str, layer_id: LayerId) -> ProviderResult<Vec<Field>> {
        Ok(self.definition.layer(service_id, layer_id)?.fields.clone())
    }

    async fn count_for_query(
        &self,
        service_id: &str,
        layer_id: LayerId,
        query: &Query,
    ) -> ProviderResult<CountResult> {
        let (_, features) = self.matching(service_id, layer_id, query)?;
        Ok(CountResult {
            count: features.len() as u64,
        })
    }

    async fn ids_for_query(
        &self,
        service_id: &str,
        layer_id: LayerId,
        query: &Query,
    ) -> ProviderResult<ObjectIdsResult> {
        let (layer, features) = self.matching(service_id, layer_id, query)?;
        Ok(ObjectIdsResult {
            object_id_field_name: layer.id_field().to_string(),
            object_ids: features.into_iter().filter_map(|f| layer.object_id(f)).collect(),
        })
    }

    async fn features_for_query(
        &self,
        service_id: &str,
        layer_id: LayerId,
        query: &Query,
    ) -> ProviderResult<Vec<Feature>> {
        let (_, features) = self.matching(service_id, layer_id, query)?;
        Ok(features.into_iter().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::fixtures::DEMO_PROVIDER_YAML;

    fn demo() -> StaticProvider {
        StaticProvider::from_yaml_str(DEMO_PROVIDER_YAML, "demo.yaml", "http://localhost:1337", "demo")
            .unwrap()
    }

    #[test]
    fn test_parse_object_ids() {
        assert_eq!(parse_object_ids("1, 2,3").unwrap(), vec![1, 2, 3]);
        assert_eq!(parse_object_ids("").unwrap(), Vec::<i64>::new());
        assert!(matches!(
            parse_object_ids("1,two"),
            Err(StaticProviderError::InvalidObjectIds(_))
        ));
    }

    #[test]
    fn test_metadata_calls() {
        let provider = demo();

        assert_eq!(provider.name(), "Demo");
        assert_eq!(provider.service_ids().unwrap(), vec!["cities", "rivers"]);
        assert_eq!(provider.layer_ids("cities").unwrap(), vec![0, 1]);
        assert_eq!(provider.name_field("cities", 0).unwrap(), "NAME");
        assert_eq!(provider.id_field("cities", 1).unwrap(), "FID");

        let svc = provider.service_details("rivers").unwrap();
        assert_eq!(
            svc.url,
            "http://localhost:1337/demo/rest/services/rivers/FeatureServer"
        );
    }

    #[test]
    fn test_unknown_service_error_message() {
        let err = demo().layer_ids("lakes").unwrap_err();
        assert_eq!(err.to_string(), "Unknown service 'lakes'");
    }

    #[test]
    fn test_parse_error_names_origin() {
        let err = StaticProvider::from_yaml_str("services: 3", "broken.yaml", "http://x", "x")
            .unwrap_err();
        assert!(err.to_string().starts_with("Invalid provider definition 'broken.yaml'"));
    }
}

//! YAML definition of a static provider.

use featureserver_protocol::{LayerId, ServerVersion};
use fs_common::field::field_types;
use fs_common::{Envelope, Feature, Field};
use serde::Deserialize;

use crate::error::{StaticProviderError, StaticResult};

fn default_version() -> ServerVersion {
    ServerVersion::Number(10.1)
}

fn default_service_type() -> String {
    "FeatureServer".to_string()
}

/// Top level of a provider file.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderDefinition {
    /// Display name of the provider.
    pub name: String,

    /// Reported as `currentVersion`.
    #[serde(default = "default_version")]
    pub version: ServerVersion,

    /// Services, in catalog order.
    #[serde(default)]
    pub services: Vec<ServiceDefinition>,
}

impl ProviderDefinition {
    /// Reject duplicate service and layer ids.
    pub fn validate(&self) -> StaticResult<()> {
        for (i, service) in self.services.iter().enumerate() {
            if self.services[..i].iter().any(|s| s.id == service.id) {
                return Err(StaticProviderError::DuplicateService(service.id.clone()));
            }

            for (j, layer) in service.layers.iter().enumerate() {
                if service.layers[..j].iter().any(|l| l.id == layer.id) {
                    return Err(StaticProviderError::DuplicateLayer {
                        service: service.id.clone(),
                        layer: layer.id,
                    });
                }
            }
        }
        Ok(())
    }

    pub fn service(&self, service_id: &str) -> StaticResult<&ServiceDefinition> {
        self.services
            .iter()
            .find(|s| s.id == service_id)
            .ok_or_else(|| StaticProviderError::UnknownService(service_id.to_string()))
    }

    pub fn layer(&self, service_id: &str, layer_id: LayerId) -> StaticResult<&LayerDefinition> {
        self.service(service_id)?
            .layers
            .iter()
            .find(|l| l.id == layer_id)
            .ok_or_else(|| StaticProviderError::UnknownLayer {
                service: service_id.to_string(),
                layer: layer_id,
            })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceDefinition {
    pub id: String,

    #[serde(rename = "type", default = "default_service_type")]
    pub type_: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Layers, in display order.
    #[serde(default)]
    pub layers: Vec<LayerDefinition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LayerDefinition {
    pub id: LayerId,
    pub name: String,

    #[serde(default)]
    pub display_field: Option<String>,

    #[serde(default)]
    pub id_field: Option<String>,

    #[serde(default)]
    pub fields: Vec<Field>,

    #[serde(default)]
    pub extent: Option<Envelope>,

    #[serde(default)]
    pub features: Vec<Feature>,
}

impl LayerDefinition {
    /// The object id field: explicit, else the first OID field, else `OBJECTID`.
    pub fn id_field(&self) -> &str {
        self.id_field
            .as_deref()
            .or_else(|| {
                self.fields
                    .iter()
                    .find(|f| f.type_ == field_types::OID)
                    .map(|f| f.name.as_str())
            })
            .unwrap_or("OBJECTID")
    }

    /// The display field, falling back to the object id field.
    pub fn display_field(&self) -> &str {
        self.display_field.as_deref().unwrap_or_else(|| self.id_field())
    }

    /// Object id of a feature, if it carries an integer one.
    pub fn object_id(&self, feature: &Feature) -> Option<i64> {
        feature.attribute(self.id_field()).and_then(|v| v.as_i64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::fixtures::DEMO_PROVIDER_YAML;

    fn demo() -> ProviderDefinition {
        serde_yaml::from_str(DEMO_PROVIDER_YAML).unwrap()
    }

    #[test]
    fn test_demo_definition_parses_in_order() {
        let def = demo();
        assert_eq!(def.name, "Demo");
        assert_eq!(def.version, ServerVersion::Number(10.1));

        let ids: Vec<_> = def.services.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["cities", "rivers"]);
        assert_eq!(def.services[0].layers.len(), 2);
        assert!(def.services[1].layers.is_empty());
        def.validate().unwrap();
    }

    #[test]
    fn test_field_fallbacks() {
        let def = demo();

        let cities = def.layer("cities", 0).unwrap();
        assert_eq!(cities.id_field(), "OBJECTID");
        assert_eq!(cities.display_field(), "NAME");

        let capitals = def.layer("cities", 1).unwrap();
        assert_eq!(capitals.id_field(), "FID");
        assert_eq!(capitals.display_field(), "FID");
    }

    #[test]
    fn test_object_ids_from_attributes() {
        let def = demo();
        let layer = def.layer("cities", 0).unwrap();
        let ids: Vec<_> = layer.features.iter().filter_map(|f| layer.object_id(f)).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_unknown_lookups() {
        let def = demo();
        assert!(matches!(
            def.service("lakes"),
            Err(StaticProviderError::UnknownService(ref id)) if id == "lakes"
        ));
        assert!(matches!(
            def.layer("cities", 9),
            Err(StaticProviderError::UnknownLayer { layer: 9, .. })
        ));
    }

    #[test]
    fn test_duplicates_rejected() {
        let yaml = r#"
name: Dup
services:
  - id: a
  - id: a
"#;
        let def: ProviderDefinition = serde_yaml::from_str(yaml).unwrap();
        assert!(matches!(def.validate(), Err(StaticProviderError::DuplicateService(_))));

        let yaml = r#"
name: Dup
services:
  - id: a
    layers:
      - { id: 0, name: x }
      - { id: 0, name: y }
"#;
        let def: ProviderDefinition = serde_yaml::from_str(yaml).unwrap();
        assert!(matches!(
            def.validate(),
            Err(StaticProviderError::DuplicateLayer { layer: 0, .. })
        ));
    }

    #[test]
    fn test_minimal_definition_defaults() {
        let def: ProviderDefinition = serde_yaml::from_str("name: Empty\n").unwrap();
        assert_eq!(def.version, ServerVersion::Number(10.1));
        assert!(def.services.is_empty());
    }
}

//! Structured metadata payloads.
//!
//! Each builder copies its skeleton, overwrites a handful of members from
//! the provider and, for list resources, appends one descriptor per id in
//! the provider's order. Provider failures are returned as they are.

use fs_common::{FeatureServerError, FeatureServerResult};
use serde::Serialize;
use serde_json::Value;

use crate::provider::{DataProvider, LayerId};
use crate::templates::TemplateSet;

/// Set `key` on a skeleton copy.
pub(crate) fn set_member(
    payload: &mut Value,
    key: &str,
    value: impl Serialize,
) -> FeatureServerResult<()> {
    let value = serde_json::to_value(value)?;
    payload
        .as_object_mut()
        .ok_or_else(|| FeatureServerError::Template(format!("cannot set '{}' on a non-object", key)))?
        .insert(key.to_string(), value);
    Ok(())
}

/// The array member `key` of a skeleton copy.
pub(crate) fn array_member<'a>(
    payload: &'a mut Value,
    key: &str,
) -> FeatureServerResult<&'a mut Vec<Value>> {
    payload
        .get_mut(key)
        .and_then(Value::as_array_mut)
        .ok_or_else(|| FeatureServerError::Template(format!("'{}' is not an array", key)))
}

/// `GET /info`: `currentVersion` and `fullVersion`.
pub fn server_info(
    templates: &TemplateSet,
    provider: &dyn DataProvider,
) -> FeatureServerResult<Value> {
    let version = provider.server_version();

    let mut r = templates.info.instantiate();
    set_member(&mut r, "currentVersion", &version)?;
    set_member(&mut r, "fullVersion", version.full_version())?;
    Ok(r)
}

/// The service catalog: one `services` entry per provider service id.
pub fn service_catalog(
    templates: &TemplateSet,
    provider: &dyn DataProvider,
) -> FeatureServerResult<Value> {
    let mut r = templates.services.instantiate();
    set_member(&mut r, "currentVersion", provider.server_version())?;

    let service_ids = provider.service_ids()?;
    let services = array_member(&mut r, "services")?;
    for service_id in &service_ids {
        services.push(serde_json::to_value(provider.service_details(service_id)?)?);
    }

    Ok(r)
}

/// A feature service: `layers` holds one descriptor per layer id.
pub fn feature_service(
    templates: &TemplateSet,
    provider: &dyn DataProvider,
    service_id: &str,
) -> FeatureServerResult<Value> {
    let mut r = templates.feature_service.instantiate();
    set_member(&mut r, "currentVersion", provider.server_version())?;

    let layers = provider
        .layer_ids(service_id)?
        .into_iter()
        .map(|layer_id| {
            let details = provider.layer_details(service_id, layer_id)?;
            Ok(serde_json::to_value(details)?)
        })
        .collect::<FeatureServerResult<Vec<Value>>>()?;

    set_member(&mut r, "layers", layers)?;
    Ok(r)
}

/// A single layer of a feature service.
///
/// The layer's `name` is the service id.
pub fn feature_service_layer(
    templates: &TemplateSet,
    provider: &dyn DataProvider,
    service_id: &str,
    layer_id: LayerId,
) -> FeatureServerResult<Value> {
    let mut r = templates.feature_service_layer.instantiate();
    set_member(&mut r, "currentVersion", provider.server_version())?;
    set_member(&mut r, "name", service_id)?;
    set_member(&mut r, "layerId", layer_id)?;
    set_member(&mut r, "displayField", provider.name_field(service_id, layer_id)?)?;
    set_member(&mut r, "objectIdField", provider.id_field(service_id, layer_id)?)?;
    set_member(&mut r, "fields", provider.fields(service_id, layer_id)?)?;
    Ok(r)
}

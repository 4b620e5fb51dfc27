//! Markup renderings of the metadata resources.
//!
//! Every function here first builds the structured payload through
//! [`crate::metadata`] and then substitutes values from that payload into
//! the matching HTML skeleton, so the two representations always agree.
//! Argument order follows the skeleton placeholders exactly.

use fs_common::{Envelope, FeatureServerError, FeatureServerResult, Field};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::markup::{self, format, format_envelope, format_fields, FormatArg};
use crate::metadata;
use crate::provider::{DataProvider, LayerId};
use crate::registry::ProviderRegistry;
use crate::templates::TemplateSet;

const FEATURE_SERVER: &str = "Feature Server";

/// Placeholder kept for the service page's query link.
const FEATURE_SERVICE_QUERY_URL: &str = "FSQueryURL";

fn arg(payload: &Value, key: &str) -> FormatArg {
    payload.get(key).into()
}

/// Deserialize a member of a payload; absent or mistyped members are a
/// template mismatch.
fn typed_member<T: DeserializeOwned>(payload: &Value, key: &str) -> FeatureServerResult<T> {
    let member = payload
        .get(key)
        .ok_or_else(|| FeatureServerError::Template(format!("payload has no '{}'", key)))?;
    serde_json::from_value(member.clone())
        .map_err(|e| FeatureServerError::Template(format!("'{}': {}", key, e)))
}

fn envelope_html(payload: &Value, key: &str) -> FeatureServerResult<String> {
    let envelope: Envelope = typed_member(payload, key)?;
    Ok(format_envelope(&envelope))
}

pub fn server_info(templates: &TemplateSet, provider: &dyn DataProvider) -> FeatureServerResult<String> {
    let json = metadata::server_info(templates, provider)?;

    Ok(format(
        &templates.info_html,
        &[arg(&json, "currentVersion"), arg(&json, "fullVersion")],
    ))
}

pub fn service_catalog(
    templates: &TemplateSet,
    provider: &dyn DataProvider,
) -> FeatureServerResult<String> {
    let json = metadata::service_catalog(templates, provider)?;
    let services_url = provider.urls().services_url();

    let service_list: String = json
        .get("services")
        .and_then(Value::as_array)
        .map(|services| services.iter().map(markup::service_entry).collect())
        .unwrap_or_default();

    Ok(format(
        &templates.services_html,
        &[
            services_url.clone().into(),
            services_url.into(),
            arg(&json, "currentVersion"),
            service_list.into(),
        ],
    ))
}

pub fn feature_service(
    templates: &TemplateSet,
    provider: &dyn DataProvider,
    service_id: &str,
) -> FeatureServerResult<String> {
    let json = metadata::feature_service(templates, provider, service_id)?;
    let urls = provider.urls();
    let services_url = urls.services_url();

    let mut layer_list = String::new();
    if let Some(layers) = json.get("layers").and_then(Value::as_array) {
        for layer in layers {
            let layer_id: LayerId = typed_member(layer, "id")?;
            layer_list.push_str(&markup::layer_entry(layer, urls.layer_url(service_id, layer_id)));
        }
    }

    let spatial_reference = json.get("spatialReference").and_then(|sr| sr.get("wkid"));

    Ok(format(
        &templates.feature_service_html,
        &[
            provider.name().into(),
            FEATURE_SERVER.into(),
            services_url.clone().into(),
            services_url.into(),
            "".into(),
            provider.name().into(),
            FEATURE_SERVER.into(),
            arg(&json, "hasVersionedData"),
            arg(&json, "maxRecordCount"),
            arg(&json, "supportedQueryFormats"),
            urls.layers_url(service_id).into(),
            layer_list.into(),
            arg(&json, "description"),
            arg(&json, "copyrightText"),
            spatial_reference.into(),
            envelope_html(&json, "initialExtent")?.into(),
            envelope_html(&json, "fullExtent")?.into(),
            arg(&json, "units"),
            FEATURE_SERVICE_QUERY_URL.into(),
        ],
    ))
}

pub fn feature_service_layer(
    templates: &TemplateSet,
    provider: &dyn DataProvider,
    service_id: &str,
    layer_id: LayerId,
) -> FeatureServerResult<String> {
    let json = metadata::feature_service_layer(templates, provider, service_id, layer_id)?;
    let urls = provider.urls();
    let services_url = urls.services_url();
    let fields: Vec<Field> = typed_member(&json, "fields")?;

    Ok(format(
        &templates.feature_service_layer_html,
        &[
            arg(&json, "name"),
            layer_id.into(),
            services_url.clone().into(),
            services_url.into(),
            urls.layers_url(service_id).into(),
            arg(&json, "name"),
            arg(&json, "type"),
            urls.layer_url(service_id, layer_id).into(),
            arg(&json, "name"),
            arg(&json, "name"),
            layer_id.into(),
            arg(&json, "name"),
            arg(&json, "displayField"),
            arg(&json, "description"),
            arg(&json, "copyrightText"),
            arg(&json, "minScale"),
            arg(&json, "maxScale"),
            arg(&json, "maxRecordCount"),
            envelope_html(&json, "extent")?.into(),
            format_fields(&fields).into(),
            urls.layer_query_url(service_id, layer_id).into(),
        ],
    ))
}

/// The landing page listing every registered provider, in registration
/// order, linked to its service catalog.
pub fn data_providers(templates: &TemplateSet, registry: &ProviderRegistry) -> String {
    let entries: String = registry
        .iter()
        .map(|(_, provider)| markup::data_provider_entry(provider.urls().services_url(), provider.name()))
        .collect();

    format(&templates.data_providers_html, &[entries.into()])
}

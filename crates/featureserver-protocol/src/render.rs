//! Format selection for every resource.

use std::sync::Arc;

use fs_common::FeatureServerResult;
use serde_json::Value;
use tracing::debug;

use crate::provider::{DataProvider, LayerId};
use crate::query::{self, LayerQueryRequest, QueryResult};
use crate::registry::ProviderRegistry;
use crate::templates::TemplateSet;
use crate::{html, metadata};

/// Requested output representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Structured JSON payload.
    Json,
    /// Human-readable HTML page.
    #[default]
    Html,
}

impl OutputFormat {
    /// Parse the `f` parameter. Only the exact tag `json` selects JSON;
    /// every other value selects HTML.
    pub fn from_tag(tag: &str) -> Self {
        if tag == "json" {
            OutputFormat::Json
        } else {
            OutputFormat::Html
        }
    }
}

/// A rendered resource.
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    Structured(Value),
    Markup(String),
}

impl Rendered {
    /// Response body: pretty-printed JSON or the page text.
    pub fn into_body(self) -> FeatureServerResult<String> {
        match self {
            Rendered::Structured(value) => Ok(serde_json::to_string_pretty(&value)?),
            Rendered::Markup(text) => Ok(text),
        }
    }

    pub fn as_structured(&self) -> Option<&Value> {
        match self {
            Rendered::Structured(value) => Some(value),
            Rendered::Markup(_) => None,
        }
    }

    pub fn as_markup(&self) -> Option<&str> {
        match self {
            Rendered::Structured(_) => None,
            Rendered::Markup(text) => Some(text),
        }
    }
}

/// Picks the structured or markup builder for `format`. The unused one is
/// never called.
fn dispatch<J, H>(format: OutputFormat, structured: J, markup: H) -> FeatureServerResult<Rendered>
where
    J: FnOnce() -> FeatureServerResult<Value>,
    H: FnOnce() -> FeatureServerResult<String>,
{
    match format {
        OutputFormat::Json => structured().map(Rendered::Structured),
        OutputFormat::Html => markup().map(Rendered::Markup),
    }
}

/// Renders feature service resources from a fixed template set.
///
/// The template set is shared and never modified, so one renderer can
/// serve any number of concurrent requests.
#[derive(Debug, Clone)]
pub struct Renderer {
    templates: Arc<TemplateSet>,
}

impl Renderer {
    pub fn new(templates: Arc<TemplateSet>) -> Self {
        Self { templates }
    }

    /// A renderer over the built-in templates.
    pub fn with_builtin_templates() -> FeatureServerResult<Self> {
        Ok(Self::new(Arc::new(TemplateSet::builtin()?)))
    }

    pub fn templates(&self) -> &TemplateSet {
        &self.templates
    }

    pub fn info(&self, format: OutputFormat, provider: &dyn DataProvider) -> FeatureServerResult<Rendered> {
        let t = &*self.templates;
        dispatch(
            format,
            || metadata::server_info(t, provider),
            || html::server_info(t, provider),
        )
    }

    pub fn services(
        &self,
        format: OutputFormat,
        provider: &dyn DataProvider,
    ) -> FeatureServerResult<Rendered> {
        let t = &*self.templates;
        dispatch(
            format,
            || metadata::service_catalog(t, provider),
            || html::service_catalog(t, provider),
        )
    }

    pub fn feature_service(
        &self,
        format: OutputFormat,
        provider: &dyn DataProvider,
        service_id: &str,
    ) -> FeatureServerResult<Rendered> {
        let t = &*self.templates;
        dispatch(
            format,
            || metadata::feature_service(t, provider, service_id),
            || html::feature_service(t, provider, service_id),
        )
    }

    pub fn feature_service_layer(
        &self,
        format: OutputFormat,
        provider: &dyn DataProvider,
        service_id: &str,
        layer_id: LayerId,
    ) -> FeatureServerResult<Rendered> {
        let t = &*self.templates;
        dispatch(
            format,
            || metadata::feature_service_layer(t, provider, service_id, layer_id),
            || html::feature_service_layer(t, provider, service_id, layer_id),
        )
    }

    /// Query results have no markup rendering; the structured result is
    /// returned whatever `format` asks for.
    pub async fn feature_service_layer_query(
        &self,
        format: OutputFormat,
        provider: &dyn DataProvider,
        service_id: &str,
        layer_id: LayerId,
        request: &LayerQueryRequest,
    ) -> FeatureServerResult<QueryResult> {
        if format == OutputFormat::Html {
            debug!(service_id, layer_id, "No markup for query results, returning JSON");
        }

        query::layer_query(&self.templates, provider, service_id, layer_id, request).await
    }

    pub fn data_providers_html(&self, registry: &ProviderRegistry) -> String {
        html::data_providers(&self.templates, registry)
    }
}

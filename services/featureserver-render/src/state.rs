//! Application state for the renderer CLI.

use anyhow::{anyhow, Context, Result};
use std::path::Path;
use std::sync::Arc;

use data_providers::StaticProvider;
use featureserver_protocol::{DataProvider, ProviderRegistry, Renderer, TemplateSet};

use crate::config::ServiceConfig;

/// Everything a command needs: one renderer and the registered providers.
pub struct AppState {
    pub renderer: Renderer,
    pub registry: ProviderRegistry,
}

impl AppState {
    /// Build state from a loaded config.
    ///
    /// `templates_dir` overrides individual built-in templates; `base_url`
    /// overrides the config file's value.
    pub fn build(
        config: &ServiceConfig,
        templates_dir: Option<&Path>,
        base_url: Option<&str>,
    ) -> Result<Self> {
        let templates = match templates_dir {
            Some(dir) => TemplateSet::load_from_dir(dir)
                .with_context(|| format!("Failed to load templates from {:?}", dir))?,
            None => TemplateSet::builtin().context("Built-in templates are invalid")?,
        };

        let base_url = config.resolve_base_url(base_url);

        let mut registry = ProviderRegistry::new();
        for entry in &config.providers {
            let provider = StaticProvider::load(&entry.path, &base_url, &entry.id)
                .with_context(|| format!("Failed to load provider '{}'", entry.id))?;
            registry.register(entry.id.clone(), Arc::new(provider));
        }

        tracing::info!(providers = registry.len(), base_url = %base_url, "Application state ready");

        Ok(Self {
            renderer: Renderer::new(Arc::new(templates)),
            registry,
        })
    }

    /// The provider named `id`, or the first registered one.
    pub fn provider(&self, id: Option<&str>) -> Result<&Arc<dyn DataProvider>> {
        match id {
            Some(id) => self
                .registry
                .get(id)
                .ok_or_else(|| anyhow!("No provider registered as '{}'", id)),
            None => self
                .registry
                .iter()
                .next()
                .map(|(_, provider)| provider)
                .ok_or_else(|| anyhow!("No providers configured")),
        }
    }
}

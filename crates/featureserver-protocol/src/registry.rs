//! Registry of the data providers a process serves.

use std::sync::Arc;

use crate::provider::DataProvider;

/// Providers keyed by id, kept in registration order.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    entries: Vec<(String, Arc<dyn DataProvider>)>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider. Re-registering an id replaces the provider but
    /// keeps its original position.
    pub fn register(&mut self, id: impl Into<String>, provider: Arc<dyn DataProvider>) {
        let id = id.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == id) {
            Some(entry) => entry.1 = provider,
            None => self.entries.push((id, provider)),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Arc<dyn DataProvider>> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == id)
            .map(|(_, provider)| provider)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn DataProvider>)> {
        self.entries.iter().map(|(id, provider)| (id.as_str(), provider))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(id, _)| id.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(id, provider)| (id, provider.name())))
            .finish()
    }
}

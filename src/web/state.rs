//! Application state shared across handlers

use crate::config::Settings;
use crate::search::SongSearch;
use crate::store::SongStore;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// Query engine over the loaded catalog
    pub search: Arc<SongSearch>,
    /// Template renderer
    pub templates: Arc<super::Templates>,
}

impl AppState {
    /// Create new application state around an already populated store
    pub fn new(settings: Settings, store: Arc<dyn SongStore>) -> anyhow::Result<Self> {
        let search = Arc::new(SongSearch::with_settings(store, &settings.search));
        let templates = Arc::new(super::Templates::new()?);

        Ok(Self {
            settings: Arc::new(settings),
            search,
            templates,
        })
    }

    /// Get instance name
    pub fn instance_name(&self) -> &str {
        &self.settings.general.instance_name
    }

    /// The store behind the query engine
    pub fn store(&self) -> &Arc<dyn SongStore> {
        self.search.store()
    }
}

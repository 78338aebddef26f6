//! Shared state injected into every handler.

use std::sync::Arc;

use tunecraft_spec::Catalog;

use crate::config::ServerConfig;
use crate::provider::{select_provider, MusicProvider};
use crate::services::{catalog_store, load_catalog_or_default, Library};

/// Everything the handlers need, built once at startup.
pub struct AppState {
    /// Effective configuration.
    pub config: ServerConfig,
    /// Genres, moods and templates.
    pub catalog: Catalog,
    /// Provider backing `/api/generate`.
    pub provider: Box<dyn MusicProvider>,
    /// Generated tracks.
    pub library: Library,
}

/// Handle passed to axum as router state.
pub type SharedState = Arc<AppState>;

impl AppState {
    /// Assembles state from explicit parts.
    pub fn new(
        config: ServerConfig,
        catalog: Catalog,
        provider: Box<dyn MusicProvider>,
        library: Library,
    ) -> Self {
        Self {
            config,
            catalog,
            provider,
            library,
        }
    }

    /// Builds state from configuration: loads the catalog (falling back to
    /// the built-in tables) and selects the provider.
    pub fn from_config(config: ServerConfig) -> Self {
        let catalog = load_catalog_or_default(catalog_store(config.catalog_path.as_deref()).as_ref());
        let provider = select_provider(&config);
        Self::new(config, catalog, provider, Library::new())
    }

    /// Wraps the state for sharing across handlers.
    pub fn shared(self) -> SharedState {
        Arc::new(self)
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("addr", &self.config.bind_addr())
            .field("provider", &self.provider.name())
            .field("tracks", &self.library.len())
            .finish()
    }
}

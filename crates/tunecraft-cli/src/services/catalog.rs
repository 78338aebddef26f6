//! Catalog sources and the recovery policy applied when one fails.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};
use tunecraft_spec::{BackendError, Catalog};

/// Errors raised while loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read catalog {path}: {source}")]
    Read {
        /// File that was read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The catalog file is not valid catalog JSON.
    #[error("failed to parse catalog {path}: {source}")]
    Parse {
        /// File that was parsed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// The catalog parsed but lists no genres or no moods.
    #[error("catalog {0} has no genres or no moods")]
    Empty(PathBuf),
}

impl BackendError for CatalogError {
    fn code(&self) -> &'static str {
        match self {
            CatalogError::Read { .. } => "CATALOG_001",
            CatalogError::Parse { .. } => "CATALOG_002",
            CatalogError::Empty(_) => "CATALOG_003",
        }
    }

    fn category(&self) -> &'static str {
        "catalog"
    }
}

/// A source of catalog data.
pub trait CatalogStore {
    /// Short description for log lines.
    fn describe(&self) -> String;

    /// Loads the full catalog.
    fn load(&self) -> Result<Catalog, CatalogError>;
}

/// The tables compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticCatalog;

impl CatalogStore for StaticCatalog {
    fn describe(&self) -> String {
        "built-in catalog".to_string()
    }

    fn load(&self) -> Result<Catalog, CatalogError> {
        Ok(Catalog::builtin())
    }
}

/// A catalog read from a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    /// Creates a store for the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this store reads.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogStore for JsonFileCatalog {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<Catalog, CatalogError> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| CatalogError::Read {
            path: self.path.clone(),
            source,
        })?;
        let catalog: Catalog =
            serde_json::from_str(&content).map_err(|source| CatalogError::Parse {
                path: self.path.clone(),
                source,
            })?;
        if catalog.genres.is_empty() || catalog.moods.is_empty() {
            return Err(CatalogError::Empty(self.path.clone()));
        }
        Ok(catalog)
    }
}

/// Loads a catalog, substituting the built-in tables on any failure.
pub fn load_catalog_or_default(store: &dyn CatalogStore) -> Catalog {
    match store.load() {
        Ok(catalog) => {
            info!(
                source = %store.describe(),
                genres = catalog.genres.len(),
                moods = catalog.moods.len(),
                templates = catalog.templates.len(),
                "Loaded catalog"
            );
            catalog
        }
        Err(err) => {
            warn!(
                source = %store.describe(),
                code = err.code(),
                error = %err,
                "Catalog unavailable, serving built-in catalog"
            );
            Catalog::builtin()
        }
    }
}

/// Picks the store for an optional configured path.
pub fn catalog_store(path: Option<&Path>) -> Box<dyn CatalogStore> {
    match path {
        Some(path) => Box::new(JsonFileCatalog::new(path)),
        None => Box::new(StaticCatalog),
    }
}

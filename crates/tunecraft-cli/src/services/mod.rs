//! Application services behind the HTTP API.

pub mod catalog;
pub mod library;
pub mod quota;

pub use catalog::{
    catalog_store, load_catalog_or_default, CatalogError, CatalogStore, JsonFileCatalog,
    StaticCatalog,
};
pub use library::{Library, LibraryError};
pub use quota::{demo_profile, next_utc_midnight, quota_at};

pub mod catalog_store;

pub use catalog_store::{CatalogSnapshot, CatalogStore, FileCatalogStore, InMemoryCatalogStore};

//! Catalog lookup and loading.

pub mod catalog;
pub mod loader;

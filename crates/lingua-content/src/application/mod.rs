//! Content loading: parsing sources and assembling the scenario catalog.

pub mod catalog;
pub mod loader;

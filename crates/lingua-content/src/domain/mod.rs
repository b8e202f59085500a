//! Scenario content domain: the authored shape, its validation rules, and the
//! compiled graph used at runtime.

pub mod graph;
pub mod scenario;
pub mod validation;
pub mod violation;

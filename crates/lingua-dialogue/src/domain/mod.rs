//! Traversal state machine, rendering views and XP policies.

pub mod traversal;
pub mod view;
pub mod xp;

//! Operations run when a traversal reaches a terminal state.

pub mod completion;

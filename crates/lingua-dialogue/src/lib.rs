//! Lingua — branching dialogue traversal.
//!
//! Drives a learner through one language variant of a validated scenario,
//! one choice at a time, and turns a finished traversal into a completion
//! summary for progress tracking. Every operation is a pure function of the
//! scenario graph and the traversal value passed in.

pub mod application;
pub mod domain;
pub mod error;

pub use application::completion::{report_completion, summarize};
pub use domain::traversal::{Position, Step, Traversal};
pub use domain::view::{OptionView, SegmentView, SpeakerView, TraversalView};
pub use domain::xp::{DEFAULT_BASE_XP, FlatXp, PerfectRunBonus, SessionOutcome, XpPolicy};
pub use error::{DialogueError, ReportError};

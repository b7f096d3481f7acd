//! Subsection splitting for statute text.
//!
//! Recovers the lettered/numbered division structure of a normalized section
//! body, e.g. "(a) ... (1) ... (2) ... (b) ..." becomes two subsections, the
//! first with two paragraphs.

mod config;
mod engine;
mod markers;

pub use config::{create_statute_hierarchy, MarkerHierarchy};
pub use engine::{parse_subsections, SplitBody, SplitEngine};
pub use markers::{cut_at_first_marker, MarkedSegment, MarkerKind};

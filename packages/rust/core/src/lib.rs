//! Presentation-ready transformations for cairn.
//!
//! Two pure components make up the core: the hierarchy tree builder
//! (flat artifact records → ordered, indented tree rows) and the event
//! timeline formatter (lifecycle events → ordered, truncated rows with
//! relative-time labels). Both are synchronous, side-effect free, and
//! never mutate their input.

pub mod hierarchy;
pub mod style;
pub mod timeline;
pub mod workspace;

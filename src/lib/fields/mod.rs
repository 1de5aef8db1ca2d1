//! Per-line field extraction and template rendering.
//!
//! A line is split into fields by a [`FieldSplitter`] and rendered through a
//! compiled [`Template`] of literal text and field references. Rendering is a
//! pure function of one line; no state is carried across lines.

pub mod split;
pub mod template;

pub use split::FieldSplitter;
pub use template::Template;

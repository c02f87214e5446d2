//! Core traits for content sources.

mod source;

pub use source::ContentSource;

//! Format implementations
//!
//! This module contains the output formats a document tree can be converted to.

pub mod asciidoc;

pub use asciidoc::serialize_to_asciidoc;

//! AsciiDoc output tests
//!
//! Whole-document conversions of fixture trees.

mod anchors;
mod document;

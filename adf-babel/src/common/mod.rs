//! Conversion helpers shared by the renderers.

pub mod links;

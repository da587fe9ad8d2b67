//! Document tree model.
//!
//! The tree is kept close to its JSON shape: nodes carry their raw `type` string and
//! attribute map, and are classified on demand through [`nodes::NodeKind`]. Rendering
//! never mutates the tree.

pub mod nodes;

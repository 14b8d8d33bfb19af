//! SiftQL selection tree
//!
//! Data model shared between the parser and the resolution engine: the
//! ordered [`SelectionSet`] and its [`SelectionNode`] entries.

mod selection;

pub use selection::*;

//! SiftQL runtime values and type casts
//!
//! This crate defines [`Value`], the runtime representation of data flowing
//! through resolution, and the cast rules that coerce resolved values to a
//! field's declared type.

mod cast;
mod value;

pub use cast::*;
pub use value::*;

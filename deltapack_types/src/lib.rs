//! The object model shared by the deltapack codec.
//!
//! - [`value`] holds the object graph that gets serialized: scalars, arrays, records, and
//!   opaque values that carry their own codec.
//! - [`schema`] holds the static description of named types: which fields a record has, in
//!   which order they travel, and which of them are stored by delta.
//! - [`serde`] holds the byte-exact codec for scalar values.

mod error;
pub mod schema;
pub mod serde;
pub mod value;

pub use error::*;

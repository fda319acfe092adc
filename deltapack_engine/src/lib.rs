//! The deltapack codec engine.
//!
//! [`Engine`] serializes a [`Value`](deltapack_types::value::Value) graph to bytes and back,
//! directed by a [`Schema`](deltapack_types::schema::Schema). Fields marked for delta storage are
//! pulled out of arrays of records and bit-packed as a base value plus minimal-width offsets.

pub mod bitio;
pub mod delta;
pub mod dispatch;
mod engine;

pub use engine::*;

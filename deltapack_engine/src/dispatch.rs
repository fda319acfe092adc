//! Schema-directed recursion over the object graph.
//!
//! Each value is resolved once to one of scalar, custom codec, array, or record, and handled
//! accordingly. Arrays of records with delta fields get their delta blocks right after their
//! elements.

mod deser;
mod path;
mod ser;

pub use deser::*;
pub use path::*;
pub use ser::*;

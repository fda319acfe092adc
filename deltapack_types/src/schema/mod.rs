//! Static descriptions of named types.
//!
//! A [`Schema`] is built once, before any serialization, and is read-only afterwards. Each named
//! type is either a record, described field by field with [`FieldDescriptor`]s, or a custom
//! codec type, described only by a factory for fresh instances.
//!
//! ```text
//! let schema = Schema::builder()
//!     .record(
//!         RecordSchema::builder("Sample")
//!             .field("label", TypeRef::STR)
//!             .delta_field("ts", TypeRef::I64)
//!             .default_constructor(),
//!     )
//!     .custom("Blob", Blob::default)
//!     .build()?;
//! ```

mod field;
mod record_schema;
mod registry;
mod type_ref;

pub use field::*;
pub use record_schema::*;
pub use registry::*;
pub use type_ref::*;

//! # Serialization format
//!
//! Nothing is self-describing. The reader must be told the root type, and everything below it is
//! resolved through the schema, so no type tags or field names are ever written.
//!
//! All multi-byte integers are big-endian. Scalars have fixed widths; strings and arrays carry a
//! signed 32-bit length.
//!
//! ```text
//! struct Scalar::Bool         { b: u8 }               // any non-zero byte reads as true
//! struct Scalar::I8/16/32/64  { i: [u8; 1/2/4/8] }    // two's complement
//! struct Scalar::Char         { c: u32 }              // Unicode scalar value
//! struct Scalar::F32/F64      { bits: [u8; 4/8] }     // IEEE-754
//! struct Scalar::Decimal {
//!     unscaled:   i64,
//!     scale:      i32,
//! }
//! struct Scalar::Str {
//!     body_len:   i32,                                // byte count, not char count
//!     body:       [u8; body_len],                     // UTF-8
//! }
//!
//! struct Record {
//!     // Participating, non-delta fields, sorted by field name.
//!     field_0:    Value,
//!     field_1:    Value,
//!     ...
//! }
//!
//! struct Array {
//!     len:        i32,
//!     elements:   [Value; len],                       // absent when len == 0
//!     // Only for arrays of records that have delta fields, and only when len > 0.
//!     // One bit stream for all delta fields, sorted by field name.
//!     // Zero-padded to a byte boundary once, after the last block.
//!     delta_blocks: bits {
//!         block_0: DeltaBlock,
//!         block_1: DeltaBlock,
//!         ...
//!     }
//! }
//!
//! bits DeltaBlock {
//!     offset_bits:    u8,
//!     if offset_bits == 64 {
//!         values:     [u64; len],
//!     } else {
//!         first:      [bit; initial_bits],            // sign-extended on read
//!         offsets:    [{ sign: bit, magnitude: [bit; offset_bits - 1] }; len - 1],
//!     }
//!     scale:          i32,                            // only for scaled (decimal-backed) fields
//! }
//! ```
//!
//! A custom codec value is whatever bytes its own codec emits, neither prefixed nor framed.

mod lengths;
mod scalar_codec;

pub use lengths::*;

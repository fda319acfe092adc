//! Delta storage of one field across all elements of an array.
//!
//! An adapter turns the field's values into canonical 64-bit integers (plus one shared decimal
//! scale for decimal-backed types). The codec then writes the first value and the successive
//! differences at the narrowest width that fits all of them.

mod adapter;
mod codec;

pub use adapter::*;
pub use codec::*;

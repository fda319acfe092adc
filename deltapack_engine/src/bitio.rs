//! MSB-first bit streams over byte sinks and sources.
//!
//! Both sides buffer at most one partial byte. The writer emits a byte as soon as eight bits have
//! accumulated, and [`BitWriter::finish`] pads the last partial byte with zeros on the right.

mod reader;
mod writer;

pub use reader::*;
pub use writer::*;

pub const MAX_BITS_LONG: u32 = u64::BITS;
pub const MAX_BITS: u32 = u32::BITS;

fn low_mask(num_bits: u32) -> u64 {
    if num_bits >= u64::BITS {
        u64::MAX
    } else {
        (1u64 << num_bits) - 1
    }
}

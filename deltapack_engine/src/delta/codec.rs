use crate::bitio::{BitReader, BitWriter};
use crate::delta::{Canonical, Layout};
use derive_more::{Deref, Into};
use deltapack_types::{Error, Result};
use itertools::Itertools;
use std::io::{Read, Write};

const OFFSET_BITS_WIDTH: u32 = 8;
const SCALE_WIDTH: u32 = i32::BITS;

/// Width of each offset in a delta block, sign bit included.
///
/// [`OffsetBits::RAW`] marks the fallback where offsets are not used at all and every value is
/// written at full width.
#[derive(Deref, Into, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
pub struct OffsetBits(u32);

impl OffsetBits {
    pub const RAW: Self = Self(64);

    /// The narrowest width at which every successive difference of `values` fits, at least 1.
    pub fn fit(values: &[i64]) -> Self {
        let widest = values
            .iter()
            .tuple_windows()
            .map(|(a, b)| signed_width(i128::from(*b) - i128::from(*a)))
            .max()
            .unwrap_or(1);
        Self(widest.clamp(1, *Self::RAW))
    }

    pub fn is_raw(&self) -> bool {
        *self == Self::RAW
    }

    fn half_range(&self) -> i128 {
        1i128 << (self.0 - 1)
    }
}

/// Bits needed for `d` in two's complement.
fn signed_width(d: i128) -> u32 {
    let magnitude = if d < 0 { !d } else { d };
    i128::BITS - magnitude.leading_zeros() + 1
}

fn sign_extend(bits: u64, width: u32) -> i64 {
    if width == 0 {
        0
    } else if width >= u64::BITS {
        bits as i64
    } else {
        let shift = u64::BITS - width;
        ((bits << shift) as i64) >> shift
    }
}

/// Writes one delta block. Leaves the bit stream unpadded, so blocks can follow one another.
pub fn encode<W: Write>(
    bw: &mut BitWriter<W>,
    canonical: &Canonical,
    layout: Layout,
) -> Result<OffsetBits> {
    let values = &canonical.values;
    if values.is_empty() {
        // Nothing is written for an empty array.
        return Ok(OffsetBits(1));
    }

    let offset_bits = OffsetBits::fit(values);
    bw.write_bits(u64::from(*offset_bits), OFFSET_BITS_WIDTH)?;

    if offset_bits.is_raw() {
        for value in values.iter() {
            bw.write_bits(*value as u64, u64::BITS)?;
        }
    } else {
        let half_range = offset_bits.half_range();
        let magnitude_bits = *offset_bits - 1;

        bw.write_bits(values[0] as u64, layout.initial_bits)?;
        for (a, b) in values.iter().tuple_windows() {
            let offset = i128::from(*b) - i128::from(*a);
            if offset < 0 {
                bw.write_bits(1, 1)?;
                bw.write_bits((half_range + offset) as u64, magnitude_bits)?;
            } else {
                bw.write_bits(0, 1)?;
                bw.write_bits(offset as u64, magnitude_bits)?;
            }
        }
    }

    if layout.uses_scale {
        bw.write_bits(u64::from(canonical.scale as u32), SCALE_WIDTH)?;
    }

    Ok(offset_bits)
}

/// Reads one delta block of `len` values.
pub fn decode<R: Read>(br: &mut BitReader<R>, len: usize, layout: Layout) -> Result<Canonical> {
    if len == 0 {
        return Ok(Canonical::unscaled(vec![]));
    }

    let offset_bits = br.read_bits(OFFSET_BITS_WIDTH)?;
    if offset_bits == 0 || offset_bits > *OffsetBits::RAW {
        return Err(Error::Malformed(format!(
            "Delta offset width {offset_bits} is outside 1..=64"
        )));
    }
    let offset_bits = OffsetBits(offset_bits);

    let mut values = Vec::with_capacity(len);
    if offset_bits.is_raw() {
        for _ in 0..len {
            values.push(br.read_bits_long(u64::BITS)? as i64);
        }
    } else {
        let half_range = offset_bits.half_range();
        let magnitude_bits = *offset_bits - 1;

        let first = br.read_bits_long(layout.initial_bits)?;
        let mut prev = sign_extend(first, layout.initial_bits);
        values.push(prev);
        for i in 1..len {
            let negative = br.read_bits(1)? == 1;
            let magnitude = i128::from(br.read_bits_long(magnitude_bits)?);
            let offset = if negative {
                magnitude - half_range
            } else {
                magnitude
            };
            prev = i64::try_from(i128::from(prev) + offset).map_err(|_| {
                Error::Malformed(format!("Delta value at index {i} overflows 64 bits"))
            })?;
            values.push(prev);
        }
    }

    let scale = if layout.uses_scale {
        br.read_bits(SCALE_WIDTH)? as i32
    } else {
        0
    };

    Ok(Canonical { values, scale })
}

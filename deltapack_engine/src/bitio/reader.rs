use crate::bitio::{MAX_BITS, MAX_BITS_LONG};
use deltapack_types::{Error, Result};
use std::io::Read;

pub struct BitReader<R> {
    r: R,
    acc: u8,
    acc_len: u32,
}

impl<R: Read> BitReader<R> {
    pub fn new(r: R) -> Self {
        Self { r, acc: 0, acc_len: 0 }
    }

    pub fn read_bits(&mut self, num_bits: u32) -> Result<u32> {
        if num_bits > MAX_BITS {
            return Err(Error::InvalidArgument {
                requested: num_bits,
                max: MAX_BITS,
            });
        }
        let bits = self.read_bits_long(num_bits)?;
        Ok(bits as u32)
    }

    /// The next `num_bits` bits, most significant first, zero-extended.
    pub fn read_bits_long(&mut self, num_bits: u32) -> Result<u64> {
        if num_bits > MAX_BITS_LONG {
            return Err(Error::InvalidArgument {
                requested: num_bits,
                max: MAX_BITS_LONG,
            });
        }

        let mut bits = 0u64;
        let mut remaining = num_bits;
        while remaining > 0 {
            if self.acc_len == 0 {
                self.pull(remaining)?;
            }
            let take = self.acc_len.min(remaining);
            let chunk = (u32::from(self.acc) >> (self.acc_len - take)) & ((1u32 << take) - 1);
            // take <= 8, and at most 64 bits are collected in total.
            bits = (bits << take) | u64::from(chunk);
            self.acc_len -= take;
            remaining -= take;
        }
        Ok(bits)
    }

    /// Bits left over from the last byte pulled.
    pub fn pending_bits(&self) -> u32 {
        self.acc_len
    }

    pub fn into_inner(self) -> R {
        self.r
    }

    fn pull(&mut self, wanted: u32) -> Result<()> {
        let mut buf = [0u8; 1];
        self.r.read_exact(&mut buf).map_err(|e| {
            Error::from_read(e, || format!("bit stream ({wanted} more bits wanted)"))
        })?;
        self.acc = buf[0];
        self.acc_len = 8;
        Ok(())
    }
}

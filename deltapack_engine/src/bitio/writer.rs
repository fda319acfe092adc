use crate::bitio::{low_mask, MAX_BITS_LONG};
use deltapack_types::serde::WriteLen;
use deltapack_types::{Error, Result};
use std::io::Write;

pub struct BitWriter<W> {
    w: W,
    acc: u32,
    acc_len: u32,
    w_len: usize,
}

impl<W: Write> BitWriter<W> {
    pub fn new(w: W) -> Self {
        Self {
            w,
            acc: 0,
            acc_len: 0,
            w_len: 0,
        }
    }

    /// Appends the low `num_bits` bits of `data`, most significant first.
    pub fn write_bits(&mut self, data: u64, num_bits: u32) -> Result<()> {
        if num_bits > MAX_BITS_LONG {
            return Err(Error::InvalidArgument {
                requested: num_bits,
                max: MAX_BITS_LONG,
            });
        }

        let mut remaining = num_bits;
        while remaining > 0 {
            let take = (8 - self.acc_len).min(remaining);
            remaining -= take;
            let chunk = (data >> remaining) & low_mask(take);
            self.acc = (self.acc << take) | chunk as u32;
            self.acc_len += take;
            if self.acc_len == 8 {
                self.emit()?;
            }
        }
        Ok(())
    }

    /// Flushes the partial byte, if any, zero-padded on the right.
    ///
    /// Returns the number of bytes emitted since the previous `finish`.
    pub fn finish(&mut self) -> Result<WriteLen> {
        if self.acc_len > 0 {
            self.acc <<= 8 - self.acc_len;
            self.emit()?;
        }
        let w_len = WriteLen::new_manual(self.w_len);
        self.w_len = 0;
        Ok(w_len)
    }

    /// Bits written but not yet emitted.
    pub fn pending_bits(&self) -> u32 {
        self.acc_len
    }

    pub fn into_inner(self) -> W {
        self.w
    }

    fn emit(&mut self) -> Result<()> {
        self.w.write_all(&[self.acc as u8])?;
        self.w_len += 1;
        self.acc = 0;
        self.acc_len = 0;
        Ok(())
    }
}

use crate::{Error, Result};
use derive_more::{Deref, From, Into};
use std::io::{Read, Write};
use std::mem;
use std::ops::{Add, AddAssign};

/// Bytes emitted by one write operation.
#[derive(Deref, From, Into, PartialEq, Eq, Clone, Copy, Default, Debug)]
pub struct WriteLen(usize);
impl WriteLen {
    pub fn new_manual(len: usize) -> Self {
        Self(len)
    }
}
impl Add for WriteLen {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}
impl AddAssign for WriteLen {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

fn ser_i32_len(len: u32, w: &mut impl Write) -> Result<WriteLen> {
    let buf = (len as i32).to_be_bytes();
    w.write_all(&buf)?;
    Ok(WriteLen(buf.len()))
}

fn deser_i32_len(r: &mut impl Read, max: u32, what: &str) -> Result<u32> {
    let mut buf = [0u8; mem::size_of::<i32>()];
    r.read_exact(&mut buf)
        .map_err(|e| Error::from_read(e, || format!("{what} length")))?;
    let len = i32::from_be_bytes(buf);
    let len = u32::try_from(len)
        .map_err(|_| Error::Malformed(format!("Negative {what} length {len}")))?;
    if len > max {
        return Err(Error::Malformed(format!(
            "{what} length {len} exceeds the limit of {max}"
        )));
    }
    Ok(len)
}

fn checked_len(len: usize, what: &str) -> Result<u32> {
    i32::try_from(len)
        .map(|len| len as u32)
        .map_err(|_| Error::Malformed(format!("{what} of length {len} is too long to encode")))
}

/// Element count of an array. Travels as a signed 32-bit big-endian integer.
#[derive(Deref, Into, PartialEq, Eq, Clone, Copy, Debug)]
pub struct ArrayLen(u32);
impl ArrayLen {
    pub fn from_len(len: usize) -> Result<Self> {
        checked_len(len, "Array").map(Self)
    }
    pub fn ser(&self, w: &mut impl Write) -> Result<WriteLen> {
        ser_i32_len(self.0, w)
    }
    pub fn deser(r: &mut impl Read, max: u32) -> Result<Self> {
        deser_i32_len(r, max, "array").map(Self)
    }
}

/// Byte count of a UTF-8 string body. Travels as a signed 32-bit big-endian integer.
#[derive(Deref, Into, PartialEq, Eq, Clone, Copy, Debug)]
pub struct StrLen(u32);
impl StrLen {
    pub fn from_body(body: &[u8]) -> Result<Self> {
        checked_len(body.len(), "String").map(Self)
    }
    pub fn ser(&self, w: &mut impl Write) -> Result<WriteLen> {
        ser_i32_len(self.0, w)
    }
    pub fn deser(r: &mut impl Read, max: u32) -> Result<Self> {
        deser_i32_len(r, max, "string").map(Self)
    }
}

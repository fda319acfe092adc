use crate::schema::ScalarKind;
use crate::serde::{StrLen, WriteLen};
use crate::value::{Decimal, Scalar};
use crate::{Error, Result};
use std::io::{Read, Write};
use std::mem;

impl Scalar {
    pub fn ser(&self, w: &mut impl Write) -> Result<WriteLen> {
        let mut w_len = WriteLen::default();
        match self {
            Scalar::Bool(b) => w_len += write_buf(w, &[u8::from(*b)])?,
            Scalar::I8(i) => w_len += write_buf(w, &i.to_be_bytes())?,
            Scalar::I16(i) => w_len += write_buf(w, &i.to_be_bytes())?,
            Scalar::I32(i) => w_len += write_buf(w, &i.to_be_bytes())?,
            Scalar::I64(i) => w_len += write_buf(w, &i.to_be_bytes())?,
            Scalar::Char(c) => w_len += write_buf(w, &u32::from(*c).to_be_bytes())?,
            Scalar::F32(f) => w_len += write_buf(w, &f.to_bits().to_be_bytes())?,
            Scalar::F64(f) => w_len += write_buf(w, &f.to_bits().to_be_bytes())?,
            Scalar::Decimal(d) => {
                /* unscaled, then scale */
                w_len += write_buf(w, &d.unscaled().to_be_bytes())?;
                w_len += write_buf(w, &d.scale().to_be_bytes())?;
            }
            Scalar::Str(s) => {
                let body = s.as_bytes();
                w_len += StrLen::from_body(body)?.ser(w)?;
                w_len += write_buf(w, body)?;
            }
        }
        Ok(w_len)
    }

    pub fn deser(kind: ScalarKind, r: &mut impl Read, max_str_len: u32) -> Result<Self> {
        let scalar = match kind {
            ScalarKind::Bool => {
                let [b] = read_buf::<1>(r, kind)?;
                Scalar::Bool(b != 0)
            }
            ScalarKind::I8 => Scalar::I8(i8::from_be_bytes(read_buf(r, kind)?)),
            ScalarKind::I16 => Scalar::I16(i16::from_be_bytes(read_buf(r, kind)?)),
            ScalarKind::I32 => Scalar::I32(i32::from_be_bytes(read_buf(r, kind)?)),
            ScalarKind::I64 => Scalar::I64(i64::from_be_bytes(read_buf(r, kind)?)),
            ScalarKind::Char => {
                let code = u32::from_be_bytes(read_buf(r, kind)?);
                let c = char::from_u32(code).ok_or_else(|| {
                    Error::Malformed(format!("{code:#x} is not a Unicode scalar value"))
                })?;
                Scalar::Char(c)
            }
            ScalarKind::F32 => Scalar::F32(f32::from_bits(u32::from_be_bytes(read_buf(r, kind)?))),
            ScalarKind::F64 => Scalar::F64(f64::from_bits(u64::from_be_bytes(read_buf(r, kind)?))),
            ScalarKind::Decimal => {
                let unscaled = i64::from_be_bytes(read_buf(r, kind)?);
                let scale = i32::from_be_bytes(read_buf(r, kind)?);
                Scalar::Decimal(Decimal::new(unscaled, scale))
            }
            ScalarKind::Str => {
                let len = StrLen::deser(r, max_str_len)?;
                let mut body = vec![0u8; *len as usize];
                r.read_exact(&mut body)
                    .map_err(|e| Error::from_read(e, || format!("string body of {} bytes", *len)))?;
                let s = String::from_utf8(body)
                    .map_err(|e| Error::Malformed(format!("String is not valid UTF-8: {e}")))?;
                Scalar::Str(s)
            }
        };
        Ok(scalar)
    }

    /// Encoded size, not counting string bodies.
    pub fn fixed_len(kind: ScalarKind) -> usize {
        match kind {
            ScalarKind::Bool | ScalarKind::I8 => 1,
            ScalarKind::I16 => mem::size_of::<i16>(),
            ScalarKind::I32 | ScalarKind::Char | ScalarKind::F32 | ScalarKind::Str => 4,
            ScalarKind::I64 | ScalarKind::F64 => 8,
            ScalarKind::Decimal => mem::size_of::<i64>() + mem::size_of::<i32>(),
        }
    }
}

fn write_buf(w: &mut impl Write, buf: &[u8]) -> Result<WriteLen> {
    w.write_all(buf)?;
    Ok(WriteLen::new_manual(buf.len()))
}

fn read_buf<const N: usize>(r: &mut impl Read, kind: ScalarKind) -> Result<[u8; N]> {
    let mut buf = [0u8; N];
    r.read_exact(&mut buf)
        .map_err(|e| Error::from_read(e, || format!("{kind} value")))?;
    Ok(buf)
}

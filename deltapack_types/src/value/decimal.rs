use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Past this many padding zeros, `Display` writes an exponent instead.
const MAX_PLAIN_ZEROS: u32 = 32;

/// A fixed-point number: `unscaled * 10^-scale`.
///
/// Equality is numeric, so `1.50` equals `1.5`. The representation (and so the formatted string)
/// keeps whatever scale the value was built with.
#[derive(Clone, Copy, Debug)]
pub struct Decimal {
    unscaled: i64,
    scale: i32,
}

impl Decimal {
    pub const ZERO: Self = Self {
        unscaled: 0,
        scale: 0,
    };

    pub fn new(unscaled: i64, scale: i32) -> Self {
        Self { unscaled, scale }
    }

    pub fn unscaled(&self) -> i64 {
        self.unscaled
    }

    pub fn scale(&self) -> i32 {
        self.scale
    }

    /// The same number expressed at `scale`, if that is exact and the unscaled value fits `i64`.
    pub fn rescale(&self, scale: i32) -> Option<Self> {
        if self.unscaled == 0 {
            return Some(Self::new(0, scale));
        }
        let diff = i64::from(scale) - i64::from(self.scale);
        let pow = 10i64.checked_pow(u32::try_from(diff.unsigned_abs()).ok()?)?;
        let unscaled = if diff >= 0 {
            self.unscaled.checked_mul(pow)?
        } else if self.unscaled % pow == 0 {
            self.unscaled / pow
        } else {
            return None;
        };
        Some(Self::new(unscaled, scale))
    }

    /// Strips trailing zeros, giving the unique representation of the number.
    fn normalized(&self) -> (i64, i64) {
        if self.unscaled == 0 {
            return (0, 0);
        }
        let mut unscaled = self.unscaled;
        let mut scale = i64::from(self.scale);
        while unscaled % 10 == 0 {
            unscaled /= 10;
            scale -= 1;
        }
        (unscaled, scale)
    }

    /// Converts through the shortest decimal string that reads back as `f`.
    pub fn from_f64(f: f64) -> Result<Self> {
        if !f.is_finite() {
            return Err(Error::PrecisionLoss(format!(
                "{f} has no decimal representation"
            )));
        }
        f.to_string().parse()
    }

    pub fn from_f32(f: f32) -> Result<Self> {
        if !f.is_finite() {
            return Err(Error::PrecisionLoss(format!(
                "{f} has no decimal representation"
            )));
        }
        f.to_string().parse()
    }

    pub fn to_f64(&self) -> Result<f64> {
        let f = self
            .exponent_form()
            .parse::<f64>()
            .map_err(|e| Error::Malformed(format!("{self} as f64: {e}")))?;
        if !f.is_finite() {
            return Err(Error::Malformed(format!("{self} is out of range for f64")));
        }
        Ok(f)
    }

    pub fn to_f32(&self) -> Result<f32> {
        let f = self
            .exponent_form()
            .parse::<f32>()
            .map_err(|e| Error::Malformed(format!("{self} as f32: {e}")))?;
        if !f.is_finite() {
            return Err(Error::Malformed(format!("{self} is out of range for f32")));
        }
        Ok(f)
    }

    /// `unscaled e -scale`, whose length does not depend on the magnitude of the scale.
    fn exponent_form(&self) -> String {
        format!("{}e{}", self.unscaled, -i64::from(self.scale))
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.normalized() == other.normalized()
    }
}
impl Eq for Decimal {}

impl Default for Decimal {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.unscaled < 0 { "-" } else { "" };
        let digits = self.unscaled.unsigned_abs().to_string();
        if self.scale <= 0 {
            if self.unscaled == 0 {
                return write!(f, "0");
            }
            let exp = self.scale.unsigned_abs();
            if exp > MAX_PLAIN_ZEROS {
                return write!(f, "{sign}{digits}e{exp}");
            }
            let zeros = "0".repeat(exp as usize);
            return write!(f, "{sign}{digits}{zeros}");
        }
        let scale = self.scale as usize;
        if digits.len() > scale {
            let (int, frac) = digits.split_at(digits.len() - scale);
            write!(f, "{sign}{int}.{frac}")
        } else if scale - digits.len() > MAX_PLAIN_ZEROS as usize {
            write!(f, "{sign}{digits}e-{scale}")
        } else {
            let zeros = "0".repeat(scale - digits.len());
            write!(f, "{sign}0.{zeros}{digits}")
        }
    }
}

/// Parses plain decimal notation: an optional sign, digits, and an optional fraction.
impl FromStr for Decimal {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let malformed = || Error::Malformed(format!("{s:?} is not a decimal number"));

        let (negative, body) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };
        let (int, frac) = body.split_once('.').unwrap_or((body, ""));
        if int.is_empty() && frac.is_empty() {
            return Err(malformed());
        }

        let mut unscaled = 0i64;
        for b in int.bytes().chain(frac.bytes()) {
            if !b.is_ascii_digit() {
                return Err(malformed());
            }
            let digit = i64::from(b - b'0');
            unscaled = unscaled
                .checked_mul(10)
                .and_then(|u| {
                    if negative {
                        u.checked_sub(digit)
                    } else {
                        u.checked_add(digit)
                    }
                })
                .ok_or_else(|| {
                    Error::PrecisionLoss(format!("{s} does not fit a 64-bit unscaled value"))
                })?;
        }
        let scale = i32::try_from(frac.len()).map_err(|_| malformed())?;

        Ok(Self { unscaled, scale })
    }
}

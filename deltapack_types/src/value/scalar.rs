use crate::schema::ScalarKind;
use crate::value::Decimal;
use derive_more::From;

/// A leaf value, written by the fixed scalar codec.
#[derive(Clone, PartialEq, Debug, From)]
pub enum Scalar {
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Char(char),
    F32(f32),
    F64(f64),
    Str(String),
    Decimal(Decimal),
}

impl Scalar {
    pub fn kind(&self) -> ScalarKind {
        match self {
            Self::Bool(_) => ScalarKind::Bool,
            Self::I8(_) => ScalarKind::I8,
            Self::I16(_) => ScalarKind::I16,
            Self::I32(_) => ScalarKind::I32,
            Self::I64(_) => ScalarKind::I64,
            Self::Char(_) => ScalarKind::Char,
            Self::F32(_) => ScalarKind::F32,
            Self::F64(_) => ScalarKind::F64,
            Self::Str(_) => ScalarKind::Str,
            Self::Decimal(_) => ScalarKind::Decimal,
        }
    }

    /// The value a freshly constructed record holds in a field of this kind.
    pub fn default_of(kind: ScalarKind) -> Self {
        match kind {
            ScalarKind::Bool => Self::Bool(false),
            ScalarKind::I8 => Self::I8(0),
            ScalarKind::I16 => Self::I16(0),
            ScalarKind::I32 => Self::I32(0),
            ScalarKind::I64 => Self::I64(0),
            ScalarKind::Char => Self::Char('\0'),
            ScalarKind::F32 => Self::F32(0.0),
            ScalarKind::F64 => Self::F64(0.0),
            ScalarKind::Str => Self::Str(String::new()),
            ScalarKind::Decimal => Self::Decimal(Decimal::ZERO),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Any integer kind, widened.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::I8(i) => Some(i64::from(*i)),
            Self::I16(i) => Some(i64::from(*i)),
            Self::I32(i) => Some(i64::from(*i)),
            Self::I64(i) => Some(*i),
            _ => None,
        }
    }

    /// Any floating point kind, widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::F32(f) => Some(f64::from(*f)),
            Self::F64(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Decimal(d) => Some(*d),
            _ => None,
        }
    }
}

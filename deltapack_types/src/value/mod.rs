//! The object graph handed to the codec.
//!
//! A [`Value`] is exactly one of: absent, a scalar, an array, a record, or a custom value that
//! owns its byte representation. Every dispatch decision of the codec is a single `match` on it.

use crate::schema::TypeRef;

mod array;
mod custom;
mod decimal;
mod record;
mod scalar;

pub use array::*;
pub use custom::*;
pub use decimal::*;
pub use record::*;
pub use scalar::*;

#[derive(Clone, PartialEq, Debug)]
pub enum Value {
    Null,
    Scalar(Scalar),
    Array(Array),
    Record(Record),
    Custom(Custom),
}

impl Value {
    /// The runtime type of this value. `None` for [`Value::Null`].
    pub fn type_ref(&self) -> Option<TypeRef> {
        match self {
            Self::Null => None,
            Self::Scalar(s) => Some(TypeRef::Scalar(s.kind())),
            Self::Array(arr) => Some(TypeRef::array_of(arr.component().clone())),
            Self::Record(rec) => Some(TypeRef::named(rec.type_name())),
            Self::Custom(cust) => Some(TypeRef::named(cust.type_name())),
        }
    }

    /// Whether this value can be written where `ty` is declared, and read back as `ty`.
    pub fn conforms_to(&self, ty: &TypeRef) -> bool {
        match (self, ty) {
            (Self::Scalar(s), TypeRef::Scalar(kind)) => s.kind() == *kind,
            (Self::Array(arr), TypeRef::Array(component)) => arr.component() == &**component,
            (Self::Record(rec), TypeRef::Named(name)) => rec.type_name() == name,
            (Self::Custom(cust), TypeRef::Named(name)) => cust.type_name() == name,
            _ => false,
        }
    }

    /// Human-readable runtime type, for error messages.
    pub fn describe_type(&self) -> String {
        match self.type_ref() {
            None => String::from("null"),
            Some(ty) => ty.to_string(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Scalar(s) => Some(s),
            _ => None,
        }
    }
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Self::Array(arr) => Some(arr),
            _ => None,
        }
    }
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(rec) => Some(rec),
            _ => None,
        }
    }
    pub fn as_record_mut(&mut self) -> Option<&mut Record> {
        match self {
            Self::Record(rec) => Some(rec),
            _ => None,
        }
    }
    pub fn as_custom(&self) -> Option<&Custom> {
        match self {
            Self::Custom(cust) => Some(cust),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.as_scalar().and_then(Scalar::as_bool)
    }
    pub fn as_i64(&self) -> Option<i64> {
        self.as_scalar().and_then(Scalar::as_i64)
    }
    pub fn as_f64(&self) -> Option<f64> {
        self.as_scalar().and_then(Scalar::as_f64)
    }
    pub fn as_str(&self) -> Option<&str> {
        self.as_scalar().and_then(Scalar::as_str)
    }

    /// Structural equality that tolerates `epsilon` of difference between floating point scalars.
    pub fn approx_eq(&self, other: &Value, epsilon: f64) -> bool {
        match (self, other) {
            (Self::Scalar(Scalar::F32(a)), Self::Scalar(Scalar::F32(b))) => {
                (f64::from(*a) - f64::from(*b)).abs() <= epsilon
            }
            (Self::Scalar(Scalar::F64(a)), Self::Scalar(Scalar::F64(b))) => {
                (a - b).abs() <= epsilon
            }
            (Self::Array(a), Self::Array(b)) => {
                a.component() == b.component()
                    && a.len() == b.len()
                    && a.iter()
                        .zip(b.iter())
                        .all(|(x, y)| x.approx_eq(y, epsilon))
            }
            (Self::Record(a), Self::Record(b)) => {
                a.type_name() == b.type_name()
                    && a.len() == b.len()
                    && a.fields().all(|(name, x)| match b.get(name) {
                        None => false,
                        Some(y) => x.approx_eq(y, epsilon),
                    })
            }
            _ => self == other,
        }
    }
}

macro_rules! value_from_scalar {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Self::Scalar(Scalar::from(v))
                }
            }
        )*
    };
}
value_from_scalar!(bool, i8, i16, i32, i64, char, f32, f64, String, Decimal);

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Scalar(Scalar::Str(String::from(s)))
    }
}
impl From<Scalar> for Value {
    fn from(s: Scalar) -> Self {
        Self::Scalar(s)
    }
}
impl From<Array> for Value {
    fn from(arr: Array) -> Self {
        Self::Array(arr)
    }
}
impl From<Record> for Value {
    fn from(rec: Record) -> Self {
        Self::Record(rec)
    }
}
impl From<Custom> for Value {
    fn from(cust: Custom) -> Self {
        Self::Custom(cust)
    }
}
impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        match opt {
            None => Self::Null,
            Some(t) => t.into(),
        }
    }
}

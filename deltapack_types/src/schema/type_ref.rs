use derive_more::Display;
use std::fmt;

#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug, Display)]
pub enum ScalarKind {
    #[display(fmt = "bool")]
    Bool,
    #[display(fmt = "i8")]
    I8,
    #[display(fmt = "i16")]
    I16,
    #[display(fmt = "i32")]
    I32,
    #[display(fmt = "i64")]
    I64,
    #[display(fmt = "char")]
    Char,
    #[display(fmt = "f32")]
    F32,
    #[display(fmt = "f64")]
    F64,
    #[display(fmt = "str")]
    Str,
    #[display(fmt = "decimal")]
    Decimal,
}

/// A declared type: what a field, an array component, or a deserialization target is.
///
/// [`TypeRef::Named`] resolves through the [`Schema`](crate::schema::Schema), either to a record
/// schema or to a custom codec registration.
#[derive(PartialEq, Eq, Hash, Clone, Debug)]
pub enum TypeRef {
    Scalar(ScalarKind),
    Array(Box<TypeRef>),
    Named(String),
}

impl TypeRef {
    pub const BOOL: Self = Self::Scalar(ScalarKind::Bool);
    pub const I8: Self = Self::Scalar(ScalarKind::I8);
    pub const I16: Self = Self::Scalar(ScalarKind::I16);
    pub const I32: Self = Self::Scalar(ScalarKind::I32);
    pub const I64: Self = Self::Scalar(ScalarKind::I64);
    pub const CHAR: Self = Self::Scalar(ScalarKind::Char);
    pub const F32: Self = Self::Scalar(ScalarKind::F32);
    pub const F64: Self = Self::Scalar(ScalarKind::F64);
    pub const STR: Self = Self::Scalar(ScalarKind::Str);
    pub const DECIMAL: Self = Self::Scalar(ScalarKind::Decimal);

    pub fn array_of(component: TypeRef) -> Self {
        Self::Array(Box::new(component))
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }
}

impl From<ScalarKind> for TypeRef {
    fn from(kind: ScalarKind) -> Self {
        Self::Scalar(kind)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(kind) => write!(f, "{kind}"),
            Self::Array(component) => write!(f, "[{component}]"),
            Self::Named(name) => write!(f, "{name}"),
        }
    }
}

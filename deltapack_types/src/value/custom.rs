use std::any::Any;
use std::fmt;
use std::io::{self, Read, Write};

/// A type that owns its byte representation.
///
/// The codec never looks inside such a value: it hands over the stream and trusts the type to
/// read back exactly what it wrote. Output is not length-prefixed.
pub trait CustomCodec: Any + fmt::Debug + Send + Sync {
    /// The name this type is registered under in the schema.
    fn type_name(&self) -> &str;

    fn serialize(&self, w: &mut dyn Write) -> io::Result<()>;

    /// Overwrites `self`, which is a fresh instance from the registered factory.
    fn deserialize(&mut self, r: &mut dyn Read) -> io::Result<()>;
}

trait DynCustom: CustomCodec {
    fn clone_box(&self) -> Box<dyn DynCustom>;
    fn eq_dyn(&self, other: &dyn DynCustom) -> bool;
    fn as_any(&self) -> &dyn Any;
}

impl<T> DynCustom for T
where
    T: CustomCodec + Clone + PartialEq,
{
    fn clone_box(&self) -> Box<dyn DynCustom> {
        Box::new(self.clone())
    }
    fn eq_dyn(&self, other: &dyn DynCustom) -> bool {
        match other.as_any().downcast_ref::<T>() {
            None => false,
            Some(other) => self == other,
        }
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A [`CustomCodec`] value inside the object graph.
pub struct Custom(Box<dyn DynCustom>);

impl Custom {
    pub fn new<T>(inner: T) -> Self
    where
        T: CustomCodec + Clone + PartialEq,
    {
        Self(Box::new(inner))
    }

    pub fn type_name(&self) -> &str {
        self.0.type_name()
    }

    pub fn serialize(&self, w: &mut dyn Write) -> io::Result<()> {
        self.0.serialize(w)
    }

    pub fn deserialize(&mut self, r: &mut dyn Read) -> io::Result<()> {
        self.0.deserialize(r)
    }

    pub fn downcast_ref<T: CustomCodec>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref::<T>()
    }
}

impl Clone for Custom {
    fn clone(&self) -> Self {
        Self(self.0.clone_box())
    }
}

impl PartialEq for Custom {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_dyn(&*other.0)
    }
}

impl fmt::Debug for Custom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

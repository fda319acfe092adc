use crate::schema::{FieldDescriptor, TypeRef};
use crate::value::{Array, Record, Scalar, Value};
use crate::{Error, Result};
use itertools::Itertools;
use std::fmt;
use std::sync::Arc;

/// Produces a fresh, field-settable instance of a record type.
pub type Constructor = Arc<dyn Fn() -> Record + Send + Sync>;

/// The layout of one record type.
///
/// Descriptors are kept sorted by field name. That order, and not the order of registration,
/// is the order fields travel in, so writer and reader agree without transmitting the layout.
#[derive(Clone)]
pub struct RecordSchema {
    name: String,
    fields: Vec<FieldDescriptor>,
    constructor: Option<Constructor>,
}

impl RecordSchema {
    pub fn builder(name: impl Into<String>) -> RecordSchemaBuilder {
        RecordSchemaBuilder {
            name: name.into(),
            fields: vec![],
            constructor: CtorKind::None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// All descriptors, in name order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields
            .binary_search_by(|field| field.name().cmp(name))
            .ok()
            .map(|i| &self.fields[i])
    }

    /// Fields written during ordinary descent, in name order.
    pub fn serialized_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields
            .iter()
            .filter(|field| field.participates() && !field.use_delta())
    }

    /// Fields written once per array, after all elements, in name order.
    pub fn delta_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields
            .iter()
            .filter(|field| field.participates() && field.use_delta())
    }

    pub fn has_delta_fields(&self) -> bool {
        self.delta_fields().next().is_some()
    }

    pub fn is_constructible(&self) -> bool {
        self.constructor.is_some()
    }

    pub fn construct(&self) -> Result<Record> {
        match &self.constructor {
            None => Err(Error::NoDefaultConstructor(self.name.clone())),
            Some(ctor) => Ok(ctor()),
        }
    }
}

impl fmt::Debug for RecordSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordSchema")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .field("constructible", &self.constructor.is_some())
            .finish()
    }
}

enum CtorKind {
    None,
    Default,
    Custom(Constructor),
}

pub struct RecordSchemaBuilder {
    name: String,
    fields: Vec<FieldDescriptor>,
    constructor: CtorKind,
}

impl RecordSchemaBuilder {
    pub fn field(self, name: impl Into<String>, ty: impl Into<TypeRef>) -> Self {
        self.descriptor(FieldDescriptor::new(name, ty.into(), true, false))
    }

    pub fn delta_field(self, name: impl Into<String>, ty: impl Into<TypeRef>) -> Self {
        self.descriptor(FieldDescriptor::new(name, ty.into(), true, true))
    }

    /// A field the constructor sets up but the codec never touches.
    pub fn transient_field(self, name: impl Into<String>, ty: impl Into<TypeRef>) -> Self {
        self.descriptor(FieldDescriptor::new(name, ty.into(), false, false))
    }

    pub fn descriptor(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Instances start with every field at its type's zero value: scalars at zero, arrays
    /// empty, named types absent.
    pub fn default_constructor(mut self) -> Self {
        self.constructor = CtorKind::Default;
        self
    }

    pub fn constructor(mut self, ctor: impl Fn() -> Record + Send + Sync + 'static) -> Self {
        self.constructor = CtorKind::Custom(Arc::new(ctor));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn build(self) -> Result<RecordSchema> {
        let fields = self
            .fields
            .into_iter()
            .sorted_by(|a, b| a.name().cmp(b.name()))
            .collect::<Vec<_>>();
        if let Some(dup) = fields
            .iter()
            .tuple_windows()
            .find(|(a, b)| a.name() == b.name())
            .map(|(a, _)| a.name())
        {
            return Err(Error::InvalidSchema(format!(
                "Field {dup} is declared more than once in type {}",
                self.name
            )));
        }

        let constructor = match self.constructor {
            CtorKind::None => None,
            CtorKind::Custom(ctor) => Some(ctor),
            CtorKind::Default => {
                let type_name = self.name.clone();
                let defaults = fields
                    .iter()
                    .map(|field| (field.name().to_owned(), default_value(field.declared_type())))
                    .collect::<Vec<_>>();
                let ctor: Constructor = Arc::new(move || {
                    defaults
                        .iter()
                        .fold(Record::new(type_name.clone()), |rec, (name, value)| {
                            rec.with(name.clone(), value.clone())
                        })
                });
                Some(ctor)
            }
        };

        Ok(RecordSchema {
            name: self.name,
            fields,
            constructor,
        })
    }
}

/// The value a field of type `ty` holds in a freshly constructed record.
pub fn default_value(ty: &TypeRef) -> Value {
    match ty {
        TypeRef::Scalar(kind) => Value::Scalar(Scalar::default_of(*kind)),
        TypeRef::Array(component) => Value::Array(Array::empty((**component).clone())),
        TypeRef::Named(_) => Value::Null,
    }
}

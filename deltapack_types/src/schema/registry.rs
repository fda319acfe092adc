use crate::schema::{RecordSchema, RecordSchemaBuilder};
use crate::value::{Custom, CustomCodec};
use crate::{Error, Result};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Produces a fresh instance of a custom codec type, ready to read itself from a stream.
pub type CustomFactory = Arc<dyn Fn() -> Custom + Send + Sync>;

/// How a named type is handled: entirely by its own codec, or field by field.
#[derive(Clone)]
pub enum TypeSchema {
    Record(RecordSchema),
    Custom(CustomFactory),
}

impl fmt::Debug for TypeSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Record(rs) => f.debug_tuple("Record").field(rs).finish(),
            Self::Custom(_) => f.write_str("Custom"),
        }
    }
}

/// Every named type the codec can handle. Immutable once built.
#[derive(Clone, Default, Debug)]
pub struct Schema {
    types: HashMap<String, TypeSchema>,
}

impl Schema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    pub fn lookup(&self, name: &str) -> Option<&TypeSchema> {
        self.types.get(name)
    }

    pub fn record(&self, name: &str) -> Option<&RecordSchema> {
        match self.types.get(name) {
            Some(TypeSchema::Record(rs)) => Some(rs),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[derive(Default)]
pub struct SchemaBuilder {
    records: Vec<RecordSchemaBuilder>,
    customs: Vec<(String, CustomFactory)>,
}

impl SchemaBuilder {
    pub fn record(mut self, rs: RecordSchemaBuilder) -> Self {
        self.records.push(rs);
        self
    }

    /// Registers a type that serializes itself. `factory` supplies the instance to read into.
    pub fn custom<T, F>(mut self, name: impl Into<String>, factory: F) -> Self
    where
        T: CustomCodec + Clone + PartialEq,
        F: Fn() -> T + Send + Sync + 'static,
    {
        let factory: CustomFactory = Arc::new(move || Custom::new(factory()));
        self.customs.push((name.into(), factory));
        self
    }

    pub fn build(self) -> Result<Schema> {
        let mut types = HashMap::new();

        let records = self
            .records
            .into_iter()
            .map(|rsb| rsb.build().map(|rs| (rs.name().to_owned(), TypeSchema::Record(rs))));
        let customs = self
            .customs
            .into_iter()
            .map(|(name, factory)| Ok((name, TypeSchema::Custom(factory))));

        for entry in records.chain(customs) {
            let (name, ts) = entry?;
            if types.contains_key(&name) {
                return Err(Error::InvalidSchema(format!(
                    "Type {name} is registered more than once"
                )));
            }
            types.insert(name, ts);
        }

        Ok(Schema { types })
    }
}

use crate::bitio::BitReader;
use crate::delta::{self, DeltaAdapters};
use crate::dispatch::Path;
use crate::EngineConfig;
use deltapack_types::schema::{RecordSchema, Schema, TypeRef, TypeSchema};
use deltapack_types::serde::ArrayLen;
use deltapack_types::value::{Array, Scalar, Value};
use deltapack_types::{Error, Result};
use std::io::Read;
use tracing::trace;

/// Upper bound on elements reserved ahead of reading them. A corrupt length then costs reads,
/// not memory.
const PREALLOC_CAP: usize = 1 << 12;

pub struct Deserializer<'e, R> {
    schema: &'e Schema,
    adapters: &'e DeltaAdapters,
    config: &'e EngineConfig,
    r: R,
}

impl<'e, R: Read> Deserializer<'e, R> {
    pub fn new(
        schema: &'e Schema,
        adapters: &'e DeltaAdapters,
        config: &'e EngineConfig,
        r: R,
    ) -> Self {
        Self {
            schema,
            adapters,
            config,
            r,
        }
    }

    pub fn deser_root(&mut self, ty: &TypeRef) -> Result<Value> {
        self.deser_value(ty, Path::Root)
    }

    pub fn into_inner(self) -> R {
        self.r
    }

    fn deser_value(&mut self, ty: &TypeRef, path: Path<'_>) -> Result<Value> {
        match ty {
            TypeRef::Scalar(kind) => {
                let s = Scalar::deser(*kind, &mut self.r, self.config.max_str_len)
                    .map_err(|e| locate(e, path))?;
                Ok(Value::Scalar(s))
            }
            TypeRef::Array(component) => self.deser_array(component, path),
            TypeRef::Named(name) => {
                let schema = self.schema;
                match schema.lookup(name) {
                    None => Err(Error::UnrecognizedType(name.clone())),
                    Some(TypeSchema::Custom(factory)) => {
                        let mut cust = factory();
                        cust.deserialize(&mut self.r).map_err(|e| {
                            Error::from_read(e, || format!("{name} value at {path}"))
                        })?;
                        Ok(Value::Custom(cust))
                    }
                    Some(TypeSchema::Record(rs)) => self.deser_record(rs, path),
                }
            }
        }
    }

    fn deser_record(&mut self, rs: &RecordSchema, path: Path<'_>) -> Result<Value> {
        let mut rec = rs.construct()?;
        for field in rs.serialized_fields() {
            let value = self.deser_value(field.declared_type(), path.field(field.name()))?;
            rec.set(field.name(), value);
        }
        Ok(Value::Record(rec))
    }

    fn deser_array(&mut self, component: &TypeRef, path: Path<'_>) -> Result<Value> {
        /* len */
        let len = ArrayLen::deser(&mut self.r, self.config.max_array_len)
            .map_err(|e| locate(e, path))?;
        let len = *len as usize;

        /* elements */
        let mut elements = Vec::with_capacity(len.min(PREALLOC_CAP));
        for i in 0..len {
            elements.push(self.deser_value(component, path.index(i))?);
        }

        /* delta blocks */
        let schema = self.schema;
        if let TypeRef::Named(name) = component {
            if let Some(rs) = schema.record(name).filter(|rs| rs.has_delta_fields()) {
                if len > 0 {
                    self.deser_delta_fields(&mut elements, rs, path)?;
                }
            }
        }

        Ok(Value::Array(Array::new(component.clone(), elements)))
    }

    fn deser_delta_fields(
        &mut self,
        elements: &mut [Value],
        rs: &RecordSchema,
        path: Path<'_>,
    ) -> Result<()> {
        let adapters = self.adapters;
        let mut br = BitReader::new(&mut self.r);

        for field in rs.delta_fields() {
            let field_type = field.declared_type();
            let adapter = adapters
                .get(field_type)
                .ok_or_else(|| Error::UnsupportedDeltaType {
                    owner: rs.name().to_owned(),
                    field: field.name().to_owned(),
                    field_type: field_type.to_string(),
                })?;

            let canonical = delta::decode(&mut br, elements.len(), adapter.layout())
                .map_err(|e| match e {
                    Error::TruncatedRead(what) => Error::TruncatedRead(format!(
                        "{what} in delta field {} of {path}",
                        field.name()
                    )),
                    e => e,
                })?;
            let values = adapter.decode(canonical)?;
            if values.len() != elements.len() {
                return Err(Error::Malformed(format!(
                    "Adapter for {field_type} produced {} values for {} elements",
                    values.len(),
                    elements.len()
                )));
            }
            trace!(
                owner = rs.name(),
                field = field.name(),
                len = values.len(),
                "delta field read"
            );

            for (elem, value) in elements.iter_mut().zip(values) {
                let rec = match elem {
                    Value::Record(rec) => rec,
                    other => {
                        return Err(Error::Malformed(format!(
                            "Element of {path} is {}, not a {} record",
                            other.describe_type(),
                            rs.name()
                        )))
                    }
                };
                rec.set(field.name(), value);
            }
        }

        // Padding after the last block is dropped along with the reader.
        Ok(())
    }
}

/// Names the location of a short read.
fn locate(e: Error, path: Path<'_>) -> Error {
    match e {
        Error::TruncatedRead(what) => Error::TruncatedRead(format!("{what} at {path}")),
        e => e,
    }
}

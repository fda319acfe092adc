use crate::bitio::BitWriter;
use crate::delta::{self, DeltaAdapters};
use crate::dispatch::Path;
use deltapack_types::schema::{RecordSchema, Schema, TypeRef, TypeSchema};
use deltapack_types::serde::{ArrayLen, WriteLen};
use deltapack_types::value::{Array, Custom, Record, Value};
use deltapack_types::{Error, Result};
use std::io::{self, Write};
use tracing::trace;

/// Counts the bytes that pass through, custom codec output included.
struct CountingWriter<W> {
    w: W,
    w_len: usize,
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let len = self.w.write(buf)?;
        self.w_len += len;
        Ok(len)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.w.flush()
    }
}

pub struct Serializer<'e, W> {
    schema: &'e Schema,
    adapters: &'e DeltaAdapters,
    w: CountingWriter<W>,
}

impl<'e, W: Write> Serializer<'e, W> {
    pub fn new(schema: &'e Schema, adapters: &'e DeltaAdapters, w: W) -> Self {
        Self {
            schema,
            adapters,
            w: CountingWriter { w, w_len: 0 },
        }
    }

    pub fn ser_root(&mut self, value: &Value) -> Result<()> {
        if value.is_null() {
            return Err(Error::NullRoot);
        }
        self.ser_value(value, Path::Root)
    }

    pub fn w_len(&self) -> WriteLen {
        WriteLen::new_manual(self.w.w_len)
    }

    pub fn into_inner(self) -> W {
        self.w.w
    }

    /// Writes `value` where `declared` is expected, refusing values the reader could not read
    /// back as `declared`.
    fn ser_declared(&mut self, value: &Value, declared: &TypeRef, path: Path<'_>) -> Result<()> {
        if !value.conforms_to(declared) {
            return Err(Error::TypeMismatch {
                at: path.to_string(),
                expected: declared.to_string(),
                found: value.describe_type(),
            });
        }
        self.ser_value(value, path)
    }

    fn ser_value(&mut self, value: &Value, path: Path<'_>) -> Result<()> {
        match value {
            Value::Null => Err(Error::TypeMismatch {
                at: path.to_string(),
                expected: String::from("a value"),
                found: value.describe_type(),
            }),
            Value::Scalar(s) => {
                s.ser(&mut self.w)?;
                Ok(())
            }
            Value::Custom(cust) => self.ser_custom(cust),
            Value::Array(arr) => self.ser_array(arr, path),
            Value::Record(rec) => {
                let schema = self.schema;
                match schema.record(rec.type_name()) {
                    None => Err(Error::UnrecognizedType(rec.type_name().to_owned())),
                    Some(rs) => self.ser_record(rec, rs, path),
                }
            }
        }
    }

    fn ser_custom(&mut self, cust: &Custom) -> Result<()> {
        match self.schema.lookup(cust.type_name()) {
            Some(TypeSchema::Custom(_)) => {
                cust.serialize(&mut self.w)?;
                Ok(())
            }
            _ => Err(Error::UnrecognizedType(cust.type_name().to_owned())),
        }
    }

    fn ser_record(&mut self, rec: &Record, rs: &RecordSchema, path: Path<'_>) -> Result<()> {
        for field in rs.serialized_fields() {
            let value = present_field(rec, rs, field.name())?;
            self.ser_declared(value, field.declared_type(), path.field(field.name()))?;
        }
        Ok(())
    }

    fn ser_array(&mut self, arr: &Array, path: Path<'_>) -> Result<()> {
        /* len */
        let len = ArrayLen::from_len(arr.len())?;
        len.ser(&mut self.w)?;
        if arr.is_empty() {
            return Ok(());
        }

        /* elements */
        for (i, elem) in arr.iter().enumerate() {
            self.ser_declared(elem, arr.component(), path.index(i))?;
        }

        /* delta blocks */
        let schema = self.schema;
        if let TypeRef::Named(name) = arr.component() {
            if let Some(rs) = schema.record(name).filter(|rs| rs.has_delta_fields()) {
                self.ser_delta_fields(arr, rs, path)?;
            }
        }

        Ok(())
    }

    fn ser_delta_fields(&mut self, arr: &Array, rs: &RecordSchema, path: Path<'_>) -> Result<()> {
        let adapters = self.adapters;
        let mut bw = BitWriter::new(&mut self.w);

        for field in rs.delta_fields() {
            let field_type = field.declared_type();
            let adapter = adapters
                .get(field_type)
                .ok_or_else(|| Error::UnsupportedDeltaType {
                    owner: rs.name().to_owned(),
                    field: field.name().to_owned(),
                    field_type: field_type.to_string(),
                })?;

            let mut values = Vec::with_capacity(arr.len());
            for (i, elem) in arr.iter().enumerate() {
                let elem_path = path.index(i);
                let rec = match elem.as_record() {
                    Some(rec) => rec,
                    None => {
                        return Err(Error::TypeMismatch {
                            at: elem_path.to_string(),
                            expected: rs.name().to_owned(),
                            found: elem.describe_type(),
                        })
                    }
                };
                let value = present_field(rec, rs, field.name())?;
                if !value.conforms_to(field_type) {
                    return Err(Error::TypeMismatch {
                        at: elem_path.field(field.name()).to_string(),
                        expected: field_type.to_string(),
                        found: value.describe_type(),
                    });
                }
                values.push(value);
            }

            let canonical = adapter.encode(&values)?;
            if canonical.values.len() != values.len() {
                return Err(Error::Malformed(format!(
                    "Adapter for {field_type} produced {} values for {} elements",
                    canonical.values.len(),
                    values.len()
                )));
            }
            let offset_bits = delta::encode(&mut bw, &canonical, adapter.layout())?;
            trace!(
                owner = rs.name(),
                field = field.name(),
                len = values.len(),
                offset_bits = *offset_bits,
                fallback = offset_bits.is_raw(),
                "delta field written"
            );
        }

        let w_len = bw.finish()?;
        trace!(owner = rs.name(), bytes = *w_len, "delta blocks written");
        Ok(())
    }
}

fn present_field<'r>(rec: &'r Record, rs: &RecordSchema, field: &str) -> Result<&'r Value> {
    match rec.get(field) {
        Some(value) if !value.is_null() => Ok(value),
        _ => Err(Error::MissingField {
            owner: rs.name().to_owned(),
            field: field.to_owned(),
        }),
    }
}

use crate::delta::DeltaAdapters;
use crate::dispatch::{Deserializer, Serializer};
use deltapack_types::schema::{Schema, TypeRef};
use deltapack_types::serde::WriteLen;
use deltapack_types::value::Value;
use deltapack_types::Result;
use std::io::{Read, Write};
use std::sync::Arc;
use tracing::debug;


/// Limits on lengths accepted while reading.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct EngineConfig {
    /// Elements in any one array.
    pub max_array_len: u32,
    /// Bytes in any one string body.
    pub max_str_len: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_array_len: 1 << 24,
            max_str_len: 1 << 26,
        }
    }
}

/// A configured codec. Cheap to clone, and safe to share across threads; each call owns its own
/// stream and bit cursor.
#[derive(Clone, Debug)]
pub struct Engine {
    schema: Arc<Schema>,
    adapters: Arc<DeltaAdapters>,
    config: EngineConfig,
}

impl Engine {
    /// Standard delta adapters, default limits.
    pub fn new(schema: impl Into<Arc<Schema>>) -> Self {
        Self::builder(schema).build()
    }

    pub fn builder(schema: impl Into<Arc<Schema>>) -> EngineBuilder {
        EngineBuilder {
            schema: schema.into(),
            adapters: None,
            config: EngineConfig::default(),
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn adapters(&self) -> &DeltaAdapters {
        &self.adapters
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[tracing::instrument(skip_all, fields(root = %value.describe_type()))]
    pub fn serialize(&self, value: &Value) -> Result<Vec<u8>> {
        let mut buf = vec![];
        self.serialize_into(value, &mut buf)?;
        Ok(buf)
    }

    /// On error, whatever reached `w` is garbage.
    #[tracing::instrument(skip_all, fields(root = %value.describe_type()))]
    pub fn serialize_into<W: Write>(&self, value: &Value, w: W) -> Result<WriteLen> {
        let mut ser = Serializer::new(&self.schema, &self.adapters, w);
        ser.ser_root(value)?;
        let w_len = ser.w_len();
        debug!(bytes = *w_len, "serialized");
        Ok(w_len)
    }

    /// Bytes after the root value are ignored.
    #[tracing::instrument(skip_all, fields(root = %ty))]
    pub fn deserialize(&self, ty: &TypeRef, bytes: &[u8]) -> Result<Value> {
        let mut de = Deserializer::new(&self.schema, &self.adapters, &self.config, bytes);
        let value = de.deser_root(ty)?;
        let rest = de.into_inner();
        debug!(
            bytes = bytes.len() - rest.len(),
            trailing = rest.len(),
            "deserialized"
        );
        Ok(value)
    }

    #[tracing::instrument(skip_all, fields(root = %ty))]
    pub fn deserialize_from<R: Read>(&self, ty: &TypeRef, r: R) -> Result<Value> {
        let mut de = Deserializer::new(&self.schema, &self.adapters, &self.config, r);
        let value = de.deser_root(ty)?;
        debug!("deserialized");
        Ok(value)
    }
}

pub struct EngineBuilder {
    schema: Arc<Schema>,
    adapters: Option<Arc<DeltaAdapters>>,
    config: EngineConfig,
}

impl EngineBuilder {
    pub fn adapters(mut self, adapters: impl Into<Arc<DeltaAdapters>>) -> Self {
        self.adapters = Some(adapters.into());
        self
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Engine {
        let adapters = self
            .adapters
            .unwrap_or_else(|| Arc::new(DeltaAdapters::standard()));
        Engine {
            schema: self.schema,
            adapters,
            config: self.config,
        }
    }
}

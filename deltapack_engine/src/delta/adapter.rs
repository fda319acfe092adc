use deltapack_types::schema::TypeRef;
use deltapack_types::value::{Decimal, Scalar, Value};
use deltapack_types::{Error, Result};
use num_traits::{NumCast, PrimInt};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// How canonical values of one adapter are laid out in a delta block.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct Layout {
    /// Width of the first value when offsets are used.
    pub initial_bits: u32,
    /// Whether a 32-bit scale follows the values.
    pub uses_scale: bool,
}

/// One field's values across an array, as integers.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Canonical {
    pub values: Vec<i64>,
    pub scale: i32,
}

impl Canonical {
    pub fn unscaled(values: Vec<i64>) -> Self {
        Self { values, scale: 0 }
    }
}

/// Converts one delta-eligible type to and from [`Canonical`] form.
pub trait DeltaAdapter: Send + Sync {
    fn layout(&self) -> Layout;

    /// Every value is expected to conform to the type the adapter is registered for.
    fn encode(&self, values: &[&Value]) -> Result<Canonical>;

    fn decode(&self, canonical: Canonical) -> Result<Vec<Value>>;
}

fn unexpected(expected: &str, found: &Value) -> Error {
    Error::TypeMismatch {
        at: String::from("delta field"),
        expected: String::from(expected),
        found: found.describe_type(),
    }
}

/// Fixed-width signed integers, widened to `i64` unchanged.
pub struct IntegerAdapter<T> {
    _int: PhantomData<fn() -> T>,
}

impl<T> IntegerAdapter<T> {
    pub fn new() -> Self {
        Self { _int: PhantomData }
    }
}

impl<T> Default for IntegerAdapter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DeltaAdapter for IntegerAdapter<T>
where
    T: PrimInt + Into<Scalar>,
{
    fn layout(&self) -> Layout {
        Layout {
            initial_bits: T::zero().count_zeros(),
            uses_scale: false,
        }
    }

    fn encode(&self, values: &[&Value]) -> Result<Canonical> {
        let type_name = std::any::type_name::<T>();
        let values = values
            .iter()
            .map(|value| {
                value
                    .as_i64()
                    .filter(|i| <T as NumCast>::from(*i).is_some())
                    .ok_or_else(|| unexpected(type_name, value))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Canonical::unscaled(values))
    }

    fn decode(&self, canonical: Canonical) -> Result<Vec<Value>> {
        canonical
            .values
            .into_iter()
            .map(|i| {
                let t = <T as NumCast>::from(i).ok_or_else(|| {
                    Error::Malformed(format!(
                        "Delta value {i} is out of range for {}",
                        std::any::type_name::<T>()
                    ))
                })?;
                Ok(Value::Scalar(t.into()))
            })
            .collect()
    }
}

/// Decimals, brought to the largest scale among them.
#[derive(Default)]
pub struct DecimalAdapter;

impl DecimalAdapter {
    pub fn encode_decimals(&self, decimals: &[Decimal]) -> Result<Canonical> {
        let scale = decimals.iter().map(Decimal::scale).max().unwrap_or(0);
        let values = decimals
            .iter()
            .map(|d| {
                d.rescale(scale).map(|d| d.unscaled()).ok_or_else(|| {
                    Error::PrecisionLoss(format!(
                        "{d} cannot be expressed as a 64-bit unscaled value at scale {scale}"
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Canonical { values, scale })
    }

    pub fn decode_decimals(&self, canonical: Canonical) -> Vec<Decimal> {
        let scale = canonical.scale;
        canonical
            .values
            .into_iter()
            .map(|unscaled| Decimal::new(unscaled, scale))
            .collect()
    }
}

impl DeltaAdapter for DecimalAdapter {
    fn layout(&self) -> Layout {
        Layout {
            initial_bits: 64,
            uses_scale: true,
        }
    }

    fn encode(&self, values: &[&Value]) -> Result<Canonical> {
        let decimals = values
            .iter()
            .map(|value| {
                value
                    .as_scalar()
                    .and_then(Scalar::as_decimal)
                    .ok_or_else(|| unexpected("decimal", value))
            })
            .collect::<Result<Vec<_>>>()?;
        self.encode_decimals(&decimals)
    }

    fn decode(&self, canonical: Canonical) -> Result<Vec<Value>> {
        let values = self
            .decode_decimals(canonical)
            .into_iter()
            .map(Value::from)
            .collect();
        Ok(values)
    }
}

/// Floating point types that travel through their shortest round-trip decimal form.
pub trait DecimalFloat: Copy + Into<Scalar> {
    const NAME: &'static str;
    fn from_scalar(s: &Scalar) -> Option<Self>;
    fn to_decimal(self) -> Result<Decimal>;
    fn from_decimal(d: &Decimal) -> Result<Self>;
}

impl DecimalFloat for f64 {
    const NAME: &'static str = "f64";
    fn from_scalar(s: &Scalar) -> Option<Self> {
        match s {
            Scalar::F64(f) => Some(*f),
            _ => None,
        }
    }
    fn to_decimal(self) -> Result<Decimal> {
        Decimal::from_f64(self)
    }
    fn from_decimal(d: &Decimal) -> Result<Self> {
        d.to_f64()
    }
}

impl DecimalFloat for f32 {
    const NAME: &'static str = "f32";
    fn from_scalar(s: &Scalar) -> Option<Self> {
        match s {
            Scalar::F32(f) => Some(*f),
            _ => None,
        }
    }
    fn to_decimal(self) -> Result<Decimal> {
        Decimal::from_f32(self)
    }
    fn from_decimal(d: &Decimal) -> Result<Self> {
        d.to_f32()
    }
}

pub struct FloatAdapter<F> {
    decimal: DecimalAdapter,
    _float: PhantomData<fn() -> F>,
}

impl<F> FloatAdapter<F> {
    pub fn new() -> Self {
        Self {
            decimal: DecimalAdapter,
            _float: PhantomData,
        }
    }
}

impl<F> Default for FloatAdapter<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: DecimalFloat> DeltaAdapter for FloatAdapter<F> {
    fn layout(&self) -> Layout {
        self.decimal.layout()
    }

    fn encode(&self, values: &[&Value]) -> Result<Canonical> {
        let decimals = values
            .iter()
            .map(|value| {
                let f = value
                    .as_scalar()
                    .and_then(F::from_scalar)
                    .ok_or_else(|| unexpected(F::NAME, value))?;
                f.to_decimal()
            })
            .collect::<Result<Vec<_>>>()?;
        self.decimal.encode_decimals(&decimals)
    }

    fn decode(&self, canonical: Canonical) -> Result<Vec<Value>> {
        self.decimal
            .decode_decimals(canonical)
            .iter()
            .map(|d| F::from_decimal(d).map(|f| Value::Scalar(f.into())))
            .collect()
    }
}

/// The adapters available to one engine, keyed by the declared field type.
#[derive(Clone, Default)]
pub struct DeltaAdapters {
    adapters: HashMap<TypeRef, Arc<dyn DeltaAdapter>>,
}

impl DeltaAdapters {
    /// Signed integers of every width, decimals, and both floating point widths.
    pub fn standard() -> Self {
        Self::default()
            .with(TypeRef::I8, IntegerAdapter::<i8>::new())
            .with(TypeRef::I16, IntegerAdapter::<i16>::new())
            .with(TypeRef::I32, IntegerAdapter::<i32>::new())
            .with(TypeRef::I64, IntegerAdapter::<i64>::new())
            .with(TypeRef::DECIMAL, DecimalAdapter)
            .with(TypeRef::F32, FloatAdapter::<f32>::new())
            .with(TypeRef::F64, FloatAdapter::<f64>::new())
    }

    /// Registers `adapter` for `ty`, replacing any previous one.
    pub fn with(mut self, ty: TypeRef, adapter: impl DeltaAdapter + 'static) -> Self {
        self.adapters.insert(ty, Arc::new(adapter));
        self
    }

    pub fn get(&self, ty: &TypeRef) -> Option<&Arc<dyn DeltaAdapter>> {
        self.adapters.get(ty)
    }

    pub fn supports(&self, ty: &TypeRef) -> bool {
        self.adapters.contains_key(ty)
    }
}

impl fmt::Debug for DeltaAdapters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types = self.adapters.keys().map(ToString::to_string).collect::<Vec<_>>();
        types.sort();
        f.debug_struct("DeltaAdapters").field("types", &types).finish()
    }
}

//! Value coercions applied while binding.
//!
//! [`FromValue`] is the shared conversion table: one monomorphic
//! implementation per bindable field type, selected once when a shape is
//! built and called directly on every row afterwards. Matching is strict by
//! variant; no implicit numeric widening happens here, because the driver
//! layer already decodes each column at its declared width. The exceptions
//! are the documented promotions: a plain wall-clock timestamp wraps into
//! an offset-carrying datetime with a zero offset, and enum targets accept
//! either a member name ([`Value::Str`]) or an ordinal (any integer
//! variant).

use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, TimeDelta, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    error::BindError,
    value::{Value, ValueKind},
};

/// Conversion from a dynamic row value into a concrete field type.
///
/// The associated consts are read once at shape-build time; `from_value` is
/// the hot path and must not re-derive anything.
pub trait FromValue: Sized {
    /// Classification of the value variant this type expects.
    const KIND: ValueKind;

    /// True only for `Option<_>`: a null passes through as `None` instead
    /// of being routed around the setter.
    const NULLABLE: bool = false;

    /// Convert a single value.
    fn from_value(value: Value) -> Result<Self, BindError>;

    /// The value used when no column matched a positional-record slot:
    /// zero / empty / nil, never an error.
    fn absent() -> Self;
}

macro_rules! impl_from_value_scalar {
    ($ty:ty, $kind:ident, $pat:pat => $out:expr, $absent:expr) => {
        impl FromValue for $ty {
            const KIND: ValueKind = ValueKind::$kind;

            fn from_value(value: Value) -> Result<Self, BindError> {
                match value {
                    $pat => Ok($out),
                    Value::Null => Err(BindError::UnexpectedNull),
                    other => Err(BindError::TypeMismatch {
                        expected: ValueKind::$kind,
                        found: other.kind().name(),
                    }),
                }
            }

            fn absent() -> Self {
                $absent
            }
        }
    };
}

impl_from_value_scalar!(bool, Bool, Value::Bool(x) => x, false);
impl_from_value_scalar!(i8, I8, Value::I8(x) => x, 0);
impl_from_value_scalar!(i16, I16, Value::I16(x) => x, 0);
impl_from_value_scalar!(i32, I32, Value::I32(x) => x, 0);
impl_from_value_scalar!(i64, I64, Value::I64(x) => x, 0);
impl_from_value_scalar!(u8, U8, Value::U8(x) => x, 0);
impl_from_value_scalar!(u16, U16, Value::U16(x) => x, 0);
impl_from_value_scalar!(u32, U32, Value::U32(x) => x, 0);
impl_from_value_scalar!(u64, U64, Value::U64(x) => x, 0);
impl_from_value_scalar!(f32, F32, Value::F32(x) => x, 0.0);
impl_from_value_scalar!(f64, F64, Value::F64(x) => x, 0.0);
impl_from_value_scalar!(Decimal, Decimal, Value::Decimal(x) => x, Decimal::ZERO);
impl_from_value_scalar!(char, Char, Value::Char(x) => x, '\0');
impl_from_value_scalar!(String, Str, Value::Str(x) => x, String::new());
impl_from_value_scalar!(Uuid, Uuid, Value::Uuid(x) => x, Uuid::nil());
impl_from_value_scalar!(TimeDelta, Duration, Value::Duration(x) => x, TimeDelta::zero());
impl_from_value_scalar!(
    NaiveDateTime,
    DateTime,
    Value::DateTime(x) => x,
    DateTime::<Utc>::UNIX_EPOCH.naive_utc()
);
// Offset promotion: the wire carries no offset, so the wall-clock value is
// wrapped with a zero offset unchanged.
impl_from_value_scalar!(
    DateTime<FixedOffset>,
    DateTime,
    Value::DateTime(x) => DateTime::from_naive_utc_and_offset(x, Utc.fix()),
    DateTime::from_naive_utc_and_offset(DateTime::<Utc>::UNIX_EPOCH.naive_utc(), Utc.fix())
);
impl_from_value_scalar!(
    DateTime<Utc>,
    DateTime,
    Value::DateTime(x) => x.and_utc(),
    DateTime::<Utc>::UNIX_EPOCH
);

impl<T: FromValue> FromValue for Option<T> {
    const KIND: ValueKind = T::KIND;
    const NULLABLE: bool = true;

    fn from_value(value: Value) -> Result<Self, BindError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }

    fn absent() -> Self {
        None
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    const KIND: ValueKind = ValueKind::Array;

    fn from_value(value: Value) -> Result<Self, BindError> {
        match value {
            Value::Array(items) => items.into_iter().map(T::from_value).collect(),
            Value::Null => Err(BindError::UnexpectedNull),
            other => Err(BindError::TypeMismatch {
                expected: ValueKind::Array,
                found: other.kind().name(),
            }),
        }
    }

    fn absent() -> Self {
        Vec::new()
    }
}

/// An enum bindable from a member name or a declaration-order ordinal.
///
/// Implemented via `#[derive(DynEnum)]`, which also wires up [`FromValue`]
/// through [`enum_from_value`].
pub trait DynEnum: Sized + 'static {
    /// Resolve a member by its declared name.
    fn from_name(name: &str) -> Option<Self>;

    /// Resolve a member by its declaration-order ordinal.
    fn from_ordinal(ordinal: i64) -> Option<Self>;

    /// Type name used in parse errors.
    fn enum_name() -> &'static str;
}

/// The shared enum coercion: string sources parse by member name, integer
/// sources reinterpret the ordinal. Failures abort the current row.
pub fn enum_from_value<E: DynEnum>(value: Value) -> Result<E, BindError> {
    if let Some(ordinal) = value.as_ordinal() {
        return E::from_ordinal(ordinal).ok_or(BindError::OrdinalOutOfRange {
            ordinal,
            target: E::enum_name(),
        });
    }
    match value {
        Value::Str(name) => E::from_name(&name).ok_or_else(|| BindError::EnumParse {
            value: name,
            target: E::enum_name(),
        }),
        Value::Null => Err(BindError::UnexpectedNull),
        other => Err(BindError::TypeMismatch {
            expected: ValueKind::Str,
            found: other.kind().name(),
        }),
    }
}

/// The missing/null policy for positional-record slots: no column means the
/// slot type's default, a null into a non-nullable slot likewise; anything
/// else goes through the normal coercion.
pub fn absent_or<T: FromValue>(value: Option<Value>) -> Result<T, BindError> {
    match value {
        None => Ok(T::absent()),
        Some(Value::Null) if !T::NULLABLE => Ok(T::absent()),
        Some(other) => T::from_value(other),
    }
}

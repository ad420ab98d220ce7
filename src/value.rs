//! Dynamic wire values and rows consumed by the binding engine.
//!
//! A [`Value`] is an already-decoded scalar (or homogeneous array of
//! scalars) as produced by the driver layer; the engine never parses wire
//! bytes itself. Timestamps arrive as plain wall-clock values because the
//! wire format carries no offset; promotion to an offset-carrying type is a
//! coercion concern (see [`crate::FromValue`]).

use std::{mem, sync::Arc};

use chrono::{NaiveDateTime, TimeDelta};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::resolve::{MapOptions, normalize_name};

/// A dynamically-typed, already-decoded column value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// SQL NULL.
    Null,
    /// Boolean.
    Bool(bool),
    /// 8-bit signed integer.
    I8(i8),
    /// 16-bit signed integer.
    I16(i16),
    /// 32-bit signed integer.
    I32(i32),
    /// 64-bit signed integer.
    I64(i64),
    /// 8-bit unsigned integer (a raw byte).
    U8(u8),
    /// 16-bit unsigned integer.
    U16(u16),
    /// 32-bit unsigned integer.
    U32(u32),
    /// 64-bit unsigned integer.
    U64(u64),
    /// 32-bit floating point.
    F32(f32),
    /// 64-bit floating point.
    F64(f64),
    /// Exact decimal.
    Decimal(Decimal),
    /// Single character.
    Char(char),
    /// UTF-8 string.
    Str(String),
    /// Wall-clock timestamp without an offset.
    DateTime(NaiveDateTime),
    /// Unique identifier.
    Uuid(Uuid),
    /// Signed duration.
    Duration(TimeDelta),
    /// Homogeneous array of one scalar variant.
    Array(Vec<Value>),
}

impl Value {
    /// The classification tag for this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::I8(_) => ValueKind::I8,
            Value::I16(_) => ValueKind::I16,
            Value::I32(_) => ValueKind::I32,
            Value::I64(_) => ValueKind::I64,
            Value::U8(_) => ValueKind::U8,
            Value::U16(_) => ValueKind::U16,
            Value::U32(_) => ValueKind::U32,
            Value::U64(_) => ValueKind::U64,
            Value::F32(_) => ValueKind::F32,
            Value::F64(_) => ValueKind::F64,
            Value::Decimal(_) => ValueKind::Decimal,
            Value::Char(_) => ValueKind::Char,
            Value::Str(_) => ValueKind::Str,
            Value::DateTime(_) => ValueKind::DateTime,
            Value::Uuid(_) => ValueKind::Uuid,
            Value::Duration(_) => ValueKind::Duration,
            Value::Array(_) => ValueKind::Array,
        }
    }

    /// True for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The ordinal carried by any integer variant, widened to `i64`.
    ///
    /// `U64` values above `i64::MAX` are rejected by returning `None`, the
    /// same way the pack's SQLite mappers refuse lossy `u64` reinterpretation.
    pub fn as_ordinal(&self) -> Option<i64> {
        match *self {
            Value::I8(x) => Some(i64::from(x)),
            Value::I16(x) => Some(i64::from(x)),
            Value::I32(x) => Some(i64::from(x)),
            Value::I64(x) => Some(x),
            Value::U8(x) => Some(i64::from(x)),
            Value::U16(x) => Some(i64::from(x)),
            Value::U32(x) => Some(i64::from(x)),
            Value::U64(x) => i64::try_from(x).ok(),
            _ => None,
        }
    }
}

/// Closed classification of [`Value`] variants.
///
/// Selected once per target field at shape-build time and reused for every
/// row; also carried in type-mismatch errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    /// SQL NULL.
    Null,
    /// Boolean.
    Bool,
    /// 8-bit signed integer.
    I8,
    /// 16-bit signed integer.
    I16,
    /// 32-bit signed integer.
    I32,
    /// 64-bit signed integer.
    I64,
    /// 8-bit unsigned integer.
    U8,
    /// 16-bit unsigned integer.
    U16,
    /// 32-bit unsigned integer.
    U32,
    /// 64-bit unsigned integer.
    U64,
    /// 32-bit floating point.
    F32,
    /// 64-bit floating point.
    F64,
    /// Exact decimal.
    Decimal,
    /// Single character.
    Char,
    /// UTF-8 string.
    Str,
    /// Wall-clock timestamp.
    DateTime,
    /// Unique identifier.
    Uuid,
    /// Signed duration.
    Duration,
    /// Homogeneous array.
    Array,
}

impl ValueKind {
    /// Lowercase name used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::I8 => "i8",
            ValueKind::I16 => "i16",
            ValueKind::I32 => "i32",
            ValueKind::I64 => "i64",
            ValueKind::U8 => "u8",
            ValueKind::U16 => "u16",
            ValueKind::U32 => "u32",
            ValueKind::U64 => "u64",
            ValueKind::F32 => "f32",
            ValueKind::F64 => "f64",
            ValueKind::Decimal => "decimal",
            ValueKind::Char => "char",
            ValueKind::Str => "str",
            ValueKind::DateTime => "datetime",
            ValueKind::Uuid => "uuid",
            ValueKind::Duration => "duration",
            ValueKind::Array => "array",
        }
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One ordered set of named column values.
///
/// Column names are held behind an `Arc` so a stream producer allocates them
/// once and shares them across every row of the stream. A `Row` doubles as
/// the "dynamic bag" target shape: [`Row::value`] resolves a column by
/// normalized name with the same first-occurrence-wins policy the binders
/// use.
#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    names: Arc<[String]>,
    values: Vec<Value>,
}

impl Row {
    /// Build a row over a shared column-name set.
    pub fn new(names: Arc<[String]>, values: Vec<Value>) -> Self {
        Self { names, values }
    }

    /// Build a row from owned `(name, value)` pairs.
    pub fn from_pairs(pairs: Vec<(String, Value)>) -> Self {
        let (names, values): (Vec<String>, Vec<Value>) = pairs.into_iter().unzip();
        Self {
            names: names.into(),
            values,
        }
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the row has no columns.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Column names, in wire order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Shared handle to the column names, for building sibling rows.
    pub fn share_names(&self) -> Arc<[String]> {
        Arc::clone(&self.names)
    }

    /// Column values, in wire order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Borrow the value at `index`, if present.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Move the value at `index` out of the row, leaving `Null` behind.
    ///
    /// Out-of-range indices yield `Null`; binders check the row width before
    /// taking.
    pub fn take(&mut self, index: usize) -> Value {
        match self.values.get_mut(index) {
            Some(slot) => mem::replace(slot, Value::Null),
            None => Value::Null,
        }
    }

    /// Resolve a column by name (case/underscore-insensitive, first
    /// occurrence wins) and borrow its value.
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.value_with(name, &MapOptions::default())
    }

    /// Like [`Row::value`] but honoring the caller's normalization options.
    pub fn value_with(&self, name: &str, options: &MapOptions) -> Option<&Value> {
        let wanted = normalize_name(name, options);
        self.names
            .iter()
            .position(|n| normalize_name(n, options) == wanted)
            .and_then(|i| self.values.get(i))
    }
}

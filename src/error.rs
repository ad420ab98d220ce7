//! Error types for shape configuration and per-row binding.

use thiserror::Error;

use crate::value::ValueKind;

/// Errors raised while configuring a mapping, before any row is consumed.
///
/// These always surface synchronously from binder construction; a stream
/// never starts on a misconfigured shape.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A tuple or multi-target shape asked for more positions than the
    /// engine supports.
    #[error("requested arity {arity} exceeds the supported ceiling of {max}")]
    ArityExceeded {
        /// Arity the caller requested.
        arity: usize,
        /// Largest supported arity.
        max: usize,
    },

    /// A multi-target split includes a target that declares no bindable
    /// columns, so column ownership cannot be decided.
    #[error("multi-target split is ambiguous: target `{target}` declares no bindable columns")]
    AmbiguousSplit {
        /// Type name of the offending target.
        target: &'static str,
    },
}

/// Errors raised while binding one row.
///
/// A `BindError` aborts only the offending row's construction; whether the
/// stream continues is the row producer's decision.
#[derive(Debug, Error)]
pub enum BindError {
    /// A value's variant did not match the target field's expected kind.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        /// Kind the target field accepts.
        expected: ValueKind,
        /// Kind actually present in the row.
        found: &'static str,
    },

    /// A string value did not name any member of the target enum.
    #[error("cannot parse {value:?} as {target}")]
    EnumParse {
        /// The unparseable source string.
        value: String,
        /// Target enum type name.
        target: &'static str,
    },

    /// An integer value did not match any ordinal of the target enum.
    #[error("ordinal {ordinal} out of range for {target}")]
    OrdinalOutOfRange {
        /// The out-of-range source ordinal.
        ordinal: i64,
        /// Target enum type name.
        target: &'static str,
    },

    /// A null reached a coercion that cannot represent it. Binders route
    /// nulls around non-nullable setters, so this surfaces only from
    /// positional reads and array elements.
    #[error("unexpected null value")]
    UnexpectedNull,

    /// A positional read ran past the end of the row.
    #[error("row has {got} columns but at least {expected} are required")]
    RowTooNarrow {
        /// Columns the read needed.
        expected: usize,
        /// Columns the row actually has.
        got: usize,
    },

    /// A later row's width differs from the stream's first row.
    #[error("row width {got} does not match the stream's first row width {expected}")]
    ShapeMismatch {
        /// Width the first row established.
        expected: usize,
        /// Width of the offending row.
        got: usize,
    },

    /// The first row of a stream is wider than the engine's column index
    /// space.
    #[error("row has {count} columns, more than the supported {max}")]
    TooManyColumns {
        /// Columns present in the row.
        count: usize,
        /// Largest supported column count.
        max: usize,
    },

    /// Another bind error, annotated with the column it occurred at.
    #[error("{source} (column {column})")]
    AtColumn {
        /// Zero-based column index.
        column: usize,
        /// The underlying error.
        #[source]
        source: Box<BindError>,
    },
}

impl BindError {
    /// Add column context to an error that does not carry it yet.
    #[must_use]
    pub fn at_column(self, column: usize) -> BindError {
        match self {
            already @ BindError::AtColumn { .. } => already,
            other => BindError::AtColumn {
                column,
                source: Box::new(other),
            },
        }
    }
}

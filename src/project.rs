//! Positional-record binding: construct a shape through its constructor
//! parameters instead of settable properties.

use std::marker::PhantomData;

use crate::{
    bind::BindRows,
    error::BindError,
    resolve::{MapOptions, NameIndex, normalize_name},
    value::{Row, Value},
};

/// A shape built by matching constructor parameter names against columns
/// and invoking the constructor once per row.
///
/// Implemented via `#[derive(Projection)]`. Each slot is coerced with the
/// same rules property binding uses; a missing column yields the slot
/// type's default instead of an error.
pub trait Projection: Sized {
    /// Declared parameter names, in constructor order.
    const PARAMS: &'static [&'static str];

    /// Construct from one argument per parameter; `None` marks a parameter
    /// with no matching column.
    fn build(args: Vec<Option<Value>>) -> Result<Self, BindError>;
}

struct BoundParams {
    width: usize,
    columns: Vec<Option<u16>>,
}

/// Binds a stream of rows into positional records.
pub struct ProjectionBinder<T: Projection> {
    options: MapOptions,
    bound: Option<BoundParams>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Projection> ProjectionBinder<T> {
    /// A binder with the given options; parameter resolution happens at the
    /// first row.
    pub fn new(options: MapOptions) -> Self {
        Self {
            options,
            bound: None,
            _marker: PhantomData,
        }
    }
}

impl<T: Projection> std::fmt::Debug for ProjectionBinder<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectionBinder")
            .field("target", &std::any::type_name::<T>())
            .field("compiled", &self.bound.is_some())
            .finish()
    }
}

impl<T: Projection> BindRows for ProjectionBinder<T> {
    type Output = T;

    fn bind_row(&mut self, mut row: Row) -> Result<T, BindError> {
        if self.bound.is_none() {
            let index = NameIndex::build(&row, &self.options)?;
            let columns = T::PARAMS
                .iter()
                .map(|param| index.first(&normalize_name(param, &self.options)))
                .collect();
            self.bound = Some(BoundParams {
                width: index.width(),
                columns,
            });
        }
        let bound = self.bound.as_ref().expect("compiled above");
        if row.len() != bound.width {
            return Err(BindError::ShapeMismatch {
                expected: bound.width,
                got: row.len(),
            });
        }

        let args = bound
            .columns
            .iter()
            .map(|column| column.map(|c| row.take(usize::from(c))))
            .collect();
        T::build(args)
    }
}

//! Driving binders over row streams.

use crate::{
    entity::EntityBinder,
    error::{BindError, ConfigError},
    project::{Projection, ProjectionBinder},
    resolve::MapOptions,
    shape::Entity,
    split::{EntityGroup, SplitBinder},
    tuple::{FromRow, TupleBinder},
    value::Row,
};

/// The single per-row transform every binder implements.
///
/// Binding is synchronous with no internal suspension point; asynchronous
/// row sources simply drive `bind_row` at each yielded item (see
/// [`crate::bind_stream`]).
pub trait BindRows {
    /// The bound target produced per row.
    type Output;

    /// Bind one row. Errors abort only this row's construction.
    fn bind_row(&mut self, row: Row) -> Result<Self::Output, BindError>;
}

/// Iterator adapter: a row stream in, a typed stream out.
pub struct BoundRows<B, I> {
    binder: B,
    rows: I,
}

impl<B: BindRows, I: Iterator<Item = Row>> Iterator for BoundRows<B, I> {
    type Item = Result<B::Output, BindError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.rows.next().map(|row| self.binder.bind_row(row))
    }
}

/// Lazily bind an iterator of rows with `binder`.
pub fn bind_rows<B, I>(binder: B, rows: I) -> BoundRows<B, I::IntoIter>
where
    B: BindRows,
    I: IntoIterator<Item = Row>,
{
    BoundRows {
        binder,
        rows: rows.into_iter(),
    }
}

/// Bind every row eagerly, stopping at the first row error.
pub fn bind_all<B, I>(binder: &mut B, rows: I) -> Result<Vec<B::Output>, BindError>
where
    B: BindRows,
    I: IntoIterator<Item = Row>,
{
    let rows = rows.into_iter();
    let mut out = Vec::with_capacity(rows.size_hint().0);
    for row in rows {
        out.push(binder.bind_row(row)?);
    }
    Ok(out)
}

/// Entry point for configured binders.
///
/// Holds the per-call option set; every configuration-class error surfaces
/// here, synchronously, before any row is consumed.
#[derive(Clone, Debug, Default)]
pub struct Mapper {
    options: MapOptions,
}

impl Mapper {
    /// A mapper with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// A mapper with explicit options.
    pub fn with_options(options: MapOptions) -> Self {
        Self { options }
    }

    /// The option set binders are configured with.
    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    /// A binder producing entity instances.
    pub fn entities<T: Entity>(&self) -> EntityBinder<T> {
        EntityBinder::new(self.options.clone())
    }

    /// A binder producing positional tuples; rejects unsupported arities.
    pub fn tuples<T: FromRow>(&self) -> Result<TupleBinder<T>, ConfigError> {
        TupleBinder::new()
    }

    /// A binder splitting joined rows across several entity targets;
    /// rejects unsupported target counts and ambiguous target sets.
    pub fn split<G: EntityGroup>(&self) -> Result<SplitBinder<G>, ConfigError> {
        SplitBinder::new(self.options.clone())
    }

    /// A binder producing positional records.
    pub fn projections<T: Projection>(&self) -> ProjectionBinder<T> {
        ProjectionBinder::new(self.options.clone())
    }
}

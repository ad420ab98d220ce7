//! Asynchronous row sources.
//!
//! Binding itself never suspends; an async source just drives the same
//! synchronous per-row transform at each yielded item.

use futures::{Stream, StreamExt};

use crate::{bind::BindRows, error::BindError, value::Row};

/// Bind an asynchronous stream of rows with `binder`.
pub fn bind_stream<B, S>(mut binder: B, rows: S) -> impl Stream<Item = Result<B::Output, BindError>>
where
    B: BindRows,
    S: Stream<Item = Row>,
{
    rows.map(move |row| binder.bind_row(row))
}

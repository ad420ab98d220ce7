//! Positional tuple construction.
//!
//! Tuples have no settable members, so they bypass name resolution
//! entirely: elements are consumed left to right from a running cursor.
//! One macro expansion covers every arity; impls exist through 16 so the
//! supported ceiling of 12 is enforced as a setup-time configuration error
//! rather than a missing impl.

use std::{fmt, marker::PhantomData};

use crate::{
    bind::BindRows,
    convert::FromValue,
    error::{BindError, ConfigError},
    value::Row,
};

/// Largest tuple arity (and multi-target count) the engine accepts.
pub const MAX_ARITY: usize = 12;

/// A running positional cursor over one row's values.
///
/// Several tuples can be read back-to-back from the same row; each read
/// advances the cursor.
pub struct RowCursor<'a> {
    row: &'a mut Row,
    position: usize,
}

impl<'a> RowCursor<'a> {
    /// A cursor at the start of `row`.
    pub fn new(row: &'a mut Row) -> Self {
        Self { row, position: 0 }
    }

    /// Current position (columns consumed so far).
    pub fn position(&self) -> usize {
        self.position
    }

    /// Consume the next column and coerce it.
    pub fn take<T: FromValue>(&mut self) -> Result<T, BindError> {
        if self.position >= self.row.len() {
            return Err(BindError::RowTooNarrow {
                expected: self.position + 1,
                got: self.row.len(),
            });
        }
        let value = self.row.take(self.position);
        let at = self.position;
        self.position += 1;
        T::from_value(value).map_err(|e| e.at_column(at))
    }
}

/// A shape constructed positionally from consecutive row values.
pub trait FromRow: Sized {
    /// Number of columns consumed.
    const WIDTH: usize;

    /// Construct from the cursor, consuming `WIDTH` columns.
    fn from_row(cursor: &mut RowCursor<'_>) -> Result<Self, BindError>;
}

macro_rules! impl_from_row_tuple {
    ($len:expr; $($t:ident),+) => {
        impl<$($t: FromValue),+> FromRow for ($($t,)+) {
            const WIDTH: usize = $len;

            fn from_row(cursor: &mut RowCursor<'_>) -> Result<Self, BindError> {
                Ok(($(cursor.take::<$t>()?,)+))
            }
        }
    };
}

impl_from_row_tuple!(1; A);
impl_from_row_tuple!(2; A, B);
impl_from_row_tuple!(3; A, B, C);
impl_from_row_tuple!(4; A, B, C, D);
impl_from_row_tuple!(5; A, B, C, D, E);
impl_from_row_tuple!(6; A, B, C, D, E, F);
impl_from_row_tuple!(7; A, B, C, D, E, F, G);
impl_from_row_tuple!(8; A, B, C, D, E, F, G, H);
impl_from_row_tuple!(9; A, B, C, D, E, F, G, H, I);
impl_from_row_tuple!(10; A, B, C, D, E, F, G, H, I, J);
impl_from_row_tuple!(11; A, B, C, D, E, F, G, H, I, J, K);
impl_from_row_tuple!(12; A, B, C, D, E, F, G, H, I, J, K, L);
impl_from_row_tuple!(13; A, B, C, D, E, F, G, H, I, J, K, L, M);
impl_from_row_tuple!(14; A, B, C, D, E, F, G, H, I, J, K, L, M, N);
impl_from_row_tuple!(15; A, B, C, D, E, F, G, H, I, J, K, L, M, N, O);
impl_from_row_tuple!(16; A, B, C, D, E, F, G, H, I, J, K, L, M, N, O, P);

/// Binds a stream of rows into positional tuples.
pub struct TupleBinder<T: FromRow> {
    _marker: PhantomData<fn() -> T>,
}

impl<T: FromRow> TupleBinder<T> {
    /// Validate the requested arity; rejects anything past [`MAX_ARITY`]
    /// before a single row is read.
    pub fn new() -> Result<Self, ConfigError> {
        if T::WIDTH > MAX_ARITY {
            return Err(ConfigError::ArityExceeded {
                arity: T::WIDTH,
                max: MAX_ARITY,
            });
        }
        Ok(Self {
            _marker: PhantomData,
        })
    }
}

impl<T: FromRow> fmt::Debug for TupleBinder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TupleBinder")
            .field("width", &T::WIDTH)
            .finish()
    }
}

impl<T: FromRow> BindRows for TupleBinder<T> {
    type Output = T;

    fn bind_row(&mut self, mut row: Row) -> Result<T, BindError> {
        let mut cursor = RowCursor::new(&mut row);
        T::from_row(&mut cursor)
    }
}

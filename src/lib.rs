#![deny(missing_docs)]
//! rowbind: bind dynamically-typed database rows into typed Rust shapes.
//!
//! The engine consumes an ordered stream of rows — each row a fixed set of
//! named, already-decoded [`Value`]s — and binds every row into a
//! caller-specified target shape: an [`Entity`] struct with settable
//! fields, a positional tuple of up to 12 values, a tuple of 2–12 entities
//! split from one joined row, a positional-record [`Projection`], or the
//! row itself as a dynamic bag. All per-type and per-stream metadata is
//! compiled once (shape tables at first use, name resolution at the first
//! row) so the per-row path is direct calls only.

mod bind;
mod convert;
mod entity;
mod error;
mod project;
mod resolve;
mod shape;
mod split;
mod stream;
mod tuple;
mod value;

pub use bind::{BindRows, BoundRows, Mapper, bind_all, bind_rows};
pub use convert::{DynEnum, FromValue, absent_or, enum_from_value};
pub use entity::EntityBinder;
pub use error::{BindError, ConfigError};
pub use project::{Projection, ProjectionBinder};
pub use resolve::{ClaimedSet, MapOptions, NameIndex, normalize_name};
pub use shape::{Entity, Property, Setter, Shape};
pub use split::{EntityGroup, SplitBinder, TargetPlan};
pub use stream::bind_stream;
pub use tuple::{FromRow, MAX_ARITY, RowCursor, TupleBinder};
pub use value::{Row, Value, ValueKind};

// Re-export the derive macros when enabled, so downstream users only
// depend on this crate.
#[cfg(feature = "derive")]
pub use rowbind_derive::{DynEnum, Entity, Projection};

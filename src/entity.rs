//! Single-target binding: one row into one entity instance.

use crate::{
    bind::BindRows,
    error::BindError,
    resolve::{MapOptions, NameIndex, normalize_name},
    shape::Entity,
    value::Row,
};

/// A compiled (property, column) pair. Properties with no matching column
/// get no binding at all; the target keeps its default value for them.
struct Binding {
    property: usize,
    column: u16,
    nullable: bool,
}

struct Bound {
    width: usize,
    bindings: Vec<Binding>,
}

/// Binds a stream of rows into `T` instances.
///
/// The first row fixes the stream's column shape: a [`NameIndex`] is built
/// from it and each property is resolved to its column once (first
/// occurrence wins on duplicate names, missing columns become no-ops).
/// Every later row reuses the compiled bindings without touching names
/// again.
pub struct EntityBinder<T: Entity> {
    options: MapOptions,
    bound: Option<Bound>,
    _marker: std::marker::PhantomData<fn() -> T>,
}

impl<T: Entity> EntityBinder<T> {
    /// A binder with the given options; no work happens until the first row.
    pub fn new(options: MapOptions) -> Self {
        Self {
            options,
            bound: None,
            _marker: std::marker::PhantomData,
        }
    }

    fn compile(&self, row: &Row) -> Result<Bound, BindError> {
        let index = NameIndex::build(row, &self.options)?;
        let shape = T::shape();
        let mut bindings = Vec::with_capacity(shape.properties().len());
        for (p, property) in shape.properties().iter().enumerate() {
            let key = normalize_name(property.name(), &self.options);
            if let Some(column) = index.first(&key) {
                bindings.push(Binding {
                    property: p,
                    column,
                    nullable: property.nullable(),
                });
            }
        }
        Ok(Bound {
            width: index.width(),
            bindings,
        })
    }
}

impl<T: Entity> std::fmt::Debug for EntityBinder<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityBinder")
            .field("target", &std::any::type_name::<T>())
            .field("compiled", &self.bound.is_some())
            .finish()
    }
}

impl<T: Entity> BindRows for EntityBinder<T> {
    type Output = T;

    fn bind_row(&mut self, mut row: Row) -> Result<T, BindError> {
        if self.bound.is_none() {
            self.bound = Some(self.compile(&row)?);
        }
        let bound = self.bound.as_ref().expect("compiled above");
        if row.len() != bound.width {
            return Err(BindError::ShapeMismatch {
                expected: bound.width,
                got: row.len(),
            });
        }

        let shape = T::shape();
        let mut target = shape.instance();
        for binding in &bound.bindings {
            let value = row.take(usize::from(binding.column));
            // Nulls never reach a non-nullable setter; the property keeps
            // its default value.
            if value.is_null() && !binding.nullable {
                continue;
            }
            shape.properties()[binding.property]
                .set(&mut target, value)
                .map_err(|e| e.at_column(usize::from(binding.column)))?;
        }
        Ok(target)
    }
}

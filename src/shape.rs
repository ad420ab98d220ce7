//! Per-type shape metadata: the compiled property table of an entity.

use crate::{
    error::BindError,
    value::{Value, ValueKind},
};

/// A monomorphic property setter, compiled once per shape.
pub type Setter<T> = fn(&mut T, Value) -> Result<(), BindError>;

/// A target type bindable by named columns.
///
/// Implementations come from `#[derive(Entity)]`, which memoizes the shape
/// in a `OnceLock` so the first build is synchronized and every later
/// caller sees the same `&'static` table. `Default` runs exactly once, to
/// build the shape's template instance; per-row instances are clones of it.
pub trait Entity: Default + Clone + Send + Sync + Sized + 'static {
    /// The memoized shape of this type.
    fn shape() -> &'static Shape<Self>;
}

/// One bindable property of an entity.
pub struct Property<T> {
    name: &'static str,
    kind: ValueKind,
    nullable: bool,
    setter: Setter<T>,
}

impl<T> Property<T> {
    /// Describe a property. `name` is the declared field name; matching
    /// against columns is the name index's concern, not the shape's.
    pub fn new(name: &'static str, kind: ValueKind, nullable: bool, setter: Setter<T>) -> Self {
        Self {
            name,
            kind,
            nullable,
            setter,
        }
    }

    /// Declared field name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Expected input classification.
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Whether a null may reach the setter.
    pub fn nullable(&self) -> bool {
        self.nullable
    }

    /// Apply the compiled setter to a row value.
    pub fn set(&self, target: &mut T, value: Value) -> Result<(), BindError> {
        (self.setter)(target, value)
    }
}

/// The compiled shape of an entity type: its ordered property table plus a
/// pre-built template instance.
pub struct Shape<T> {
    properties: Vec<Property<T>>,
    template: T,
}

impl<T: Default + Clone> Shape<T> {
    /// Build a shape from its property table, running `Default` once for
    /// the template.
    pub fn new(properties: Vec<Property<T>>) -> Self {
        tracing::debug!(
            target_type = std::any::type_name::<T>(),
            properties = properties.len(),
            "compiled entity shape"
        );
        Self {
            properties,
            template: T::default(),
        }
    }

    /// The ordered property table.
    pub fn properties(&self) -> &[Property<T>] {
        &self.properties
    }

    /// A fresh instance, cloned from the template rather than re-running
    /// the constructor per row.
    pub fn instance(&self) -> T {
        self.template.clone()
    }
}

//! Multi-target splitting: one joined row into several entity instances.
//!
//! Targets are processed in declared order and each column is claimed by at
//! most one target per row, so the first target gets first refusal on any
//! name it needs. Duplicate column names are what make this useful: two
//! tables projected side by side can both carry an `id` column, and the
//! second target picks up the first *unclaimed* occurrence.

use std::{fmt, marker::PhantomData};

use crate::{
    bind::BindRows,
    error::{BindError, ConfigError},
    resolve::{ClaimedSet, MapOptions, NameIndex, normalize_name},
    shape::Entity,
    tuple::MAX_ARITY,
    value::Row,
};

/// The compiled claim plan of one split target: for each property that
/// resolved at all, every candidate column position in wire order.
pub struct TargetPlan<T: Entity> {
    slots: Vec<Slot>,
    _marker: PhantomData<fn() -> T>,
}

struct Slot {
    property: usize,
    positions: Vec<u16>,
    nullable: bool,
}

impl<T: Entity> TargetPlan<T> {
    fn compile(index: &NameIndex, options: &MapOptions) -> Self {
        let shape = T::shape();
        let slots = shape
            .properties()
            .iter()
            .enumerate()
            .filter_map(|(property, prop)| {
                let key = normalize_name(prop.name(), options);
                let positions = index.positions(&key);
                if positions.is_empty() {
                    None
                } else {
                    Some(Slot {
                        property,
                        positions: positions.to_vec(),
                        nullable: prop.nullable(),
                    })
                }
            })
            .collect();
        Self {
            slots,
            _marker: PhantomData,
        }
    }

    fn bind(&self, row: &mut Row, claimed: &mut ClaimedSet) -> Result<T, BindError> {
        let shape = T::shape();
        let mut target = shape.instance();
        for slot in &self.slots {
            // First unclaimed occurrence of this name; fully-claimed names
            // are a no-op for this target.
            let Some(column) = slot
                .positions
                .iter()
                .copied()
                .find(|&c| !claimed.contains(c))
            else {
                continue;
            };
            claimed.claim(column);
            let value = row.take(usize::from(column));
            if value.is_null() && !slot.nullable {
                continue;
            }
            shape.properties()[slot.property]
                .set(&mut target, value)
                .map_err(|e| e.at_column(usize::from(column)))?;
        }
        Ok(target)
    }
}

/// A tuple of entity targets a row is split across, in claim order.
///
/// Implemented for tuples of arity 2..=16 by one macro expansion; the
/// engine enforces the ceiling of [`MAX_ARITY`] targets at setup.
pub trait EntityGroup: Sized {
    /// Number of targets.
    const TARGETS: usize;

    /// The compiled per-target claim plans.
    type Plans;

    /// Reject shapes that cannot participate in a split.
    fn validate() -> Result<(), ConfigError>;

    /// Compile the claim plans against a stream's name index.
    fn compile(index: &NameIndex, options: &MapOptions) -> Self::Plans;

    /// Bind one row, claiming columns in target order.
    fn bind(plans: &Self::Plans, row: &mut Row, claimed: &mut ClaimedSet)
    -> Result<Self, BindError>;
}

macro_rules! impl_entity_group {
    ($len:expr; $($t:ident => $idx:tt),+) => {
        impl<$($t: Entity),+> EntityGroup for ($($t,)+) {
            const TARGETS: usize = $len;

            type Plans = ($(TargetPlan<$t>,)+);

            fn validate() -> Result<(), ConfigError> {
                $(
                    if $t::shape().properties().is_empty() {
                        return Err(ConfigError::AmbiguousSplit {
                            target: std::any::type_name::<$t>(),
                        });
                    }
                )+
                Ok(())
            }

            fn compile(index: &NameIndex, options: &MapOptions) -> Self::Plans {
                ($(TargetPlan::<$t>::compile(index, options),)+)
            }

            fn bind(
                plans: &Self::Plans,
                row: &mut Row,
                claimed: &mut ClaimedSet,
            ) -> Result<Self, BindError> {
                Ok(($(plans.$idx.bind(row, claimed)?,)+))
            }
        }
    };
}

impl_entity_group!(2; A => 0, B => 1);
impl_entity_group!(3; A => 0, B => 1, C => 2);
impl_entity_group!(4; A => 0, B => 1, C => 2, D => 3);
impl_entity_group!(5; A => 0, B => 1, C => 2, D => 3, E => 4);
impl_entity_group!(6; A => 0, B => 1, C => 2, D => 3, E => 4, F => 5);
impl_entity_group!(7; A => 0, B => 1, C => 2, D => 3, E => 4, F => 5, G => 6);
impl_entity_group!(8; A => 0, B => 1, C => 2, D => 3, E => 4, F => 5, G => 6, H => 7);
impl_entity_group!(9; A => 0, B => 1, C => 2, D => 3, E => 4, F => 5, G => 6, H => 7, I => 8);
impl_entity_group!(10; A => 0, B => 1, C => 2, D => 3, E => 4, F => 5, G => 6, H => 7, I => 8,
    J => 9);
impl_entity_group!(11; A => 0, B => 1, C => 2, D => 3, E => 4, F => 5, G => 6, H => 7, I => 8,
    J => 9, K => 10);
impl_entity_group!(12; A => 0, B => 1, C => 2, D => 3, E => 4, F => 5, G => 6, H => 7, I => 8,
    J => 9, K => 10, L => 11);
impl_entity_group!(13; A => 0, B => 1, C => 2, D => 3, E => 4, F => 5, G => 6, H => 7, I => 8,
    J => 9, K => 10, L => 11, M => 12);
impl_entity_group!(14; A => 0, B => 1, C => 2, D => 3, E => 4, F => 5, G => 6, H => 7, I => 8,
    J => 9, K => 10, L => 11, M => 12, N => 13);
impl_entity_group!(15; A => 0, B => 1, C => 2, D => 3, E => 4, F => 5, G => 6, H => 7, I => 8,
    J => 9, K => 10, L => 11, M => 12, N => 13, O => 14);
impl_entity_group!(16; A => 0, B => 1, C => 2, D => 3, E => 4, F => 5, G => 6, H => 7, I => 8,
    J => 9, K => 10, L => 11, M => 12, N => 13, O => 14, P => 15);

struct BoundPlans<G: EntityGroup> {
    width: usize,
    plans: G::Plans,
}

/// Binds a stream of joined rows into tuples of entity instances.
///
/// Setup validates eagerly: more than [`MAX_ARITY`] targets or a target
/// with no bindable columns is a configuration error before any row flows.
pub struct SplitBinder<G: EntityGroup> {
    options: MapOptions,
    bound: Option<BoundPlans<G>>,
    claimed: ClaimedSet,
}

impl<G: EntityGroup> SplitBinder<G> {
    /// Validate the target set and build an idle binder.
    pub fn new(options: MapOptions) -> Result<Self, ConfigError> {
        if G::TARGETS > MAX_ARITY {
            return Err(ConfigError::ArityExceeded {
                arity: G::TARGETS,
                max: MAX_ARITY,
            });
        }
        G::validate()?;
        Ok(Self {
            options,
            bound: None,
            claimed: ClaimedSet::new(0),
        })
    }
}

impl<G: EntityGroup> fmt::Debug for SplitBinder<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SplitBinder")
            .field("targets", &G::TARGETS)
            .field("compiled", &self.bound.is_some())
            .finish()
    }
}

impl<G: EntityGroup> BindRows for SplitBinder<G> {
    type Output = G;

    fn bind_row(&mut self, mut row: Row) -> Result<G, BindError> {
        if self.bound.is_none() {
            let index = NameIndex::build(&row, &self.options)?;
            self.bound = Some(BoundPlans {
                width: index.width(),
                plans: G::compile(&index, &self.options),
            });
            self.claimed = ClaimedSet::new(index.width());
        }
        let bound = self.bound.as_ref().expect("compiled above");
        if row.len() != bound.width {
            return Err(BindError::ShapeMismatch {
                expected: bound.width,
                got: row.len(),
            });
        }
        self.claimed.clear();
        G::bind(&bound.plans, &mut row, &mut self.claimed)
    }
}

//! Column-name normalization and the per-stream name index.

use std::collections::HashMap;

use crate::{error::BindError, value::Row};

/// Global options for one mapping call.
#[derive(Clone, Debug, Default)]
pub struct MapOptions {
    /// Disable underscore/`@` stripping during name normalization; names are
    /// then matched case-insensitively but otherwise verbatim.
    pub keep_original_names: bool,
}

/// Normalize a column or field name for matching.
///
/// Lowercases always; additionally strips `_` and `@` unless
/// [`MapOptions::keep_original_names`] is set, so `My_Id`, `myid` and
/// `MYID` all normalize to `myid`.
pub fn normalize_name(name: &str, options: &MapOptions) -> String {
    if options.keep_original_names {
        name.to_lowercase()
    } else {
        name.chars()
            .filter(|c| !matches!(c, '_' | '@'))
            .flat_map(char::to_lowercase)
            .collect()
    }
}

/// Normalized column name → column positions, built once from the first row
/// of a stream and reused for every subsequent row.
///
/// Every position carrying a given normalized name is retained in wire
/// order. Plain resolution takes the first occurrence; later duplicates are
/// unreachable by name and only the multi-target claim walk (or positional
/// access) can see them. Callers mapping joined queries with genuinely
/// ambiguous duplicate names should expect first-wins, not an error.
#[derive(Debug)]
pub struct NameIndex {
    by_name: HashMap<String, Vec<u16>>,
    width: usize,
}

impl NameIndex {
    /// Largest supported column count; positions are `u16` indices.
    pub const MAX_WIDTH: usize = u16::MAX as usize;

    /// Build the index from a stream's first row.
    ///
    /// Deterministic: the same row yields an identical index. Duplicate
    /// normalized names are collapsed to the first occurrence for plain
    /// resolution and logged at debug level.
    pub fn build(row: &Row, options: &MapOptions) -> Result<Self, BindError> {
        if row.len() > Self::MAX_WIDTH {
            return Err(BindError::TooManyColumns {
                count: row.len(),
                max: Self::MAX_WIDTH,
            });
        }
        let mut by_name: HashMap<String, Vec<u16>> = HashMap::with_capacity(row.len());
        for (i, name) in row.names().iter().enumerate() {
            let key = normalize_name(name, options);
            let positions = by_name.entry(key).or_default();
            if !positions.is_empty() {
                tracing::debug!(
                    column = %name,
                    index = i,
                    "duplicate column name, name resolution keeps the first occurrence"
                );
            }
            positions.push(i as u16);
        }
        Ok(Self {
            by_name,
            width: row.len(),
        })
    }

    /// First position carrying `normalized`, if any.
    pub fn first(&self, normalized: &str) -> Option<u16> {
        self.by_name.get(normalized).and_then(|p| p.first().copied())
    }

    /// Every position carrying `normalized`, in wire order.
    pub fn positions(&self, normalized: &str) -> &[u16] {
        self.by_name.get(normalized).map_or(&[], Vec::as_slice)
    }

    /// Width of the row shape this index was built from.
    pub fn width(&self) -> usize {
        self.width
    }
}

/// Per-row set of column positions already consumed by an earlier target in
/// a multi-target split. Cleared at the start of each row.
#[derive(Debug)]
pub struct ClaimedSet {
    bits: Vec<bool>,
}

impl ClaimedSet {
    /// An empty set over `width` columns.
    pub fn new(width: usize) -> Self {
        Self {
            bits: vec![false; width],
        }
    }

    /// Forget all claims, keeping the allocation for the next row.
    pub fn clear(&mut self) {
        self.bits.fill(false);
    }

    /// Whether `position` has been claimed this row.
    pub fn contains(&self, position: u16) -> bool {
        self.bits
            .get(usize::from(position))
            .copied()
            .unwrap_or(false)
    }

    /// Claim `position`; returns false if it was already claimed.
    pub fn claim(&mut self, position: u16) -> bool {
        match self.bits.get_mut(usize::from(position)) {
            Some(bit) if !*bit => {
                *bit = true;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn row(names: &[&str]) -> Row {
        Row::from_pairs(
            names
                .iter()
                .map(|n| ((*n).to_string(), Value::Null))
                .collect(),
        )
    }

    #[test]
    fn normalization_strips_case_underscores_and_at() {
        let opts = MapOptions::default();
        assert_eq!(normalize_name("My_Id", &opts), "myid");
        assert_eq!(normalize_name("MYID", &opts), "myid");
        assert_eq!(normalize_name("@myid", &opts), "myid");
    }

    #[test]
    fn keep_original_names_only_lowercases() {
        let opts = MapOptions {
            keep_original_names: true,
        };
        assert_eq!(normalize_name("My_Id", &opts), "my_id");
        assert_eq!(normalize_name("@Tag", &opts), "@tag");
    }

    #[test]
    fn duplicates_collapse_to_first_but_keep_all_positions() {
        let opts = MapOptions::default();
        let index = NameIndex::build(&row(&["x", "y", "X"]), &opts).unwrap();
        assert_eq!(index.first("x"), Some(0));
        assert_eq!(index.positions("x"), &[0, 2]);
        assert_eq!(index.first("y"), Some(1));
        assert_eq!(index.first("z"), None);
    }

    #[test]
    fn build_is_deterministic() {
        let opts = MapOptions::default();
        let r = row(&["a", "b", "a"]);
        let one = NameIndex::build(&r, &opts).unwrap();
        let two = NameIndex::build(&r, &opts).unwrap();
        assert_eq!(one.positions("a"), two.positions("a"));
        assert_eq!(one.first("b"), two.first("b"));
    }

    #[test]
    fn rows_past_the_index_space_are_rejected() {
        let opts = MapOptions::default();
        let wide = Row::from_pairs(
            (0..=NameIndex::MAX_WIDTH)
                .map(|i| (format!("c{i}"), Value::Null))
                .collect(),
        );
        let err = NameIndex::build(&wide, &opts).unwrap_err();
        assert!(matches!(err, BindError::TooManyColumns { .. }));
    }

    #[test]
    fn claims_are_single_use() {
        let mut claimed = ClaimedSet::new(3);
        assert!(claimed.claim(1));
        assert!(!claimed.claim(1));
        assert!(claimed.contains(1));
        claimed.clear();
        assert!(claimed.claim(1));
    }
}

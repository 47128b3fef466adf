//! Field renaming applied to projections before they are diffed.

use log::{trace, warn};
use std::collections::BTreeMap;

use super::CmpOption;
use crate::projection::Untyped;
use crate::utils::error::{CmpError, Result};

/// Old field name -> new field name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameMap(BTreeMap<String, String>);

impl RenameMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rename from `from` to `to`
    pub fn rename(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.0.insert(from.into(), to.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Rename the top-level fields of a projection in place
    ///
    /// Entries whose old name is absent are skipped.
    ///
    /// # Errors
    /// * `CmpError::RenameCollision` - The new name is already a field of the
    ///   projection
    pub fn apply(&self, untyped: &mut Untyped) -> Result<()> {
        for (from, to) in &self.0 {
            if !untyped.contains(from) {
                continue;
            }
            if untyped.contains(to) {
                warn!("Rename of '{}' collides with existing field '{}'", from, to);
                return Err(CmpError::RenameCollision {
                    from: from.clone(),
                    to: to.clone(),
                });
            }
            if let Some(value) = untyped.remove(from) {
                trace!("Renaming field '{}' to '{}'", from, to);
                untyped.insert(to.clone(), value);
            }
        }
        Ok(())
    }
}

impl<K, V> FromIterator<(K, V)> for RenameMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(from, to)| (from.into(), to.into()))
                .collect(),
        )
    }
}

impl<const N: usize> From<[(&str, &str); N]> for RenameMap {
    fn from(pairs: [(&str, &str); N]) -> Self {
        pairs.into_iter().collect()
    }
}

/// Rename fields of every compared record before diffing
///
/// Applies to both sides; a side that lacks the old name is unaffected, so in
/// practice the rename aligns one record type's naming with the other's.
pub fn cmp_rename(renames: impl Into<RenameMap>) -> CmpOption {
    CmpOption::Rename(renames.into())
}

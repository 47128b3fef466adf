//! Comparison options.
//!
//! Options are passed to the comparison entry points as a slice and layered by
//! the diff engine:
//! - a [`FieldFilter`] that excludes a field wins over everything else there
//! - otherwise key-scoped options beat value-scoped ones
//! - among options of the same scope, the one passed later wins
//!
//! # Example
//! ```ignore
//! use fieldcmp::{assert_slice_cmp, cmp_only, cmp_rename, RenameMap};
//!
//! assert_slice_cmp(
//!     &expected,
//!     &real,
//!     &[
//!         cmp_rename(RenameMap::new().rename("FieldElse", "FieldOne")),
//!         cmp_only(["FieldOne"]),
//!     ],
//! );
//! ```

pub mod filter;
pub mod rename;
pub mod transform;

use std::fmt;

use crate::diff::Path;

pub use filter::{cmp_ignore, cmp_only, FieldFilter};
pub use rename::{cmp_rename, RenameMap};
pub use transform::{
    key_comparer, key_transform, pointer_converter, slice_converter, valuer_conv, Comparer,
    Transformer,
};

/// A single comparison option
#[derive(Clone)]
pub enum CmpOption {
    Filter(FieldFilter),
    Transform(Transformer),
    Compare(Comparer),
    Rename(RenameMap),
}

impl fmt::Debug for CmpOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CmpOption::Filter(filter) => f.debug_tuple("Filter").field(filter).finish(),
            CmpOption::Transform(t) => f.debug_tuple("Transform").field(&t.name()).finish(),
            CmpOption::Compare(c) => f.debug_tuple("Compare").field(&c.name()).finish(),
            CmpOption::Rename(map) => f.debug_tuple("Rename").field(map).finish(),
        }
    }
}

/// Where a transformer or comparer may apply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// Any path where both values satisfy the option's predicate
    Values,

    /// Paths whose last step is this record field, at any collection depth
    Field(String),
}

impl Scope {
    pub fn is_field(&self) -> bool {
        matches!(self, Scope::Field(_))
    }

    pub(crate) fn matches(&self, path: &Path) -> bool {
        match self {
            Scope::Values => true,
            Scope::Field(name) => path.last_field() == Some(name.as_str()),
        }
    }
}

/// Pick the governing candidate: first key-scoped one, else first value-scoped
///
/// Candidates are expected latest-first.
pub(crate) fn most_specific<T>(
    candidates: impl Iterator<Item = T>,
    is_field: impl Fn(&T) -> bool,
) -> Option<T> {
    let mut fallback = None;
    for candidate in candidates {
        if is_field(&candidate) {
            return Some(candidate);
        }
        if fallback.is_none() {
            fallback = Some(candidate);
        }
    }
    fallback
}

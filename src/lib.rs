//! fieldcmp
//!
//! Field-level structural comparison of differently-typed records, for use
//! inside test suites.
//!
//! Records are projected into field-name-keyed maps through their `Serialize`
//! impl, then diffed under a composable set of options: allow/deny lists,
//! renames, type coercions and custom equality. Collections are compared
//! either in order or aligned by an identifier field.
//!
//! ## Getting Started
//!
//! ```ignore
//! use fieldcmp::{assert_mapped_cmp, cmp_only};
//!
//! #[derive(serde::Serialize)]
//! struct UserDto { id: i64, name: String }
//!
//! #[derive(serde::Serialize)]
//! struct User { user_id: i64, name: String, created_at: String }
//!
//! assert_mapped_cmp("id", "user_id", &dtos, &users, &[cmp_only(["name"])]);
//! ```

pub mod align;
pub mod compare;
pub mod diff;
pub mod options;
pub mod projection;
pub mod utils;

pub use align::{to_keyed, IdKey, KeyedMap};
pub use compare::{
    assert_mapped_cmp, assert_mapped_cmp_strict, assert_slice_cmp, assert_untyped_cmp,
    mapped_diff, mapped_diff_strict, slice_diff, untyped_diff,
};
pub use diff::{Diff, Difference, DifferenceKind, Path, PathStep};
pub use options::{
    cmp_ignore, cmp_only, cmp_rename, key_comparer, key_transform, pointer_converter,
    slice_converter, valuer_conv, CmpOption, RenameMap,
};
pub use projection::valuer;
pub use projection::{cmp_only_struct_names, to_untyped, Untyped, Valuer};
pub use utils::error::CmpError;

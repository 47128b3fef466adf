//! Structural diff of untyped records.
//!
//! This module compares projections (ordered, keyed or single) and produces a
//! [`Diff`] listing every difference with its path. Comparison options
//! (filters, renames, transformers, comparers) are honoured at every path.
//!
//! # Example
//! ```ignore
//! use fieldcmp::diff::diff_records;
//! use fieldcmp::projection::to_untyped;
//!
//! let expected = to_untyped(&user_dto)?;
//! let actual = to_untyped(&user)?;
//! let diff = diff_records(&expected, &actual, &[])?;
//! assert!(diff.is_empty(), "{diff}");
//! ```

mod engine;
mod output;
mod schema;

use crate::align::KeyedMap;
use crate::options::CmpOption;
use crate::projection::Untyped;
use crate::utils::error::Result;

use engine::Engine;

// Public API exports
pub use output::render_diff;
pub use schema::{Diff, Difference, DifferenceKind, Path, PathStep};

/// Diff two projections
///
/// Only the given options apply; no defaults are added.
///
/// # Errors
/// * Any configuration error raised by an option (rename collision, failed
///   value accessor)
pub fn diff_records(expected: &Untyped, actual: &Untyped, options: &[CmpOption]) -> Result<Diff> {
    let mut engine = Engine::new(options);
    engine.records(expected, actual, &Path::root())?;
    Ok(engine.finish())
}

/// Diff two ordered collections of projections position by position
pub fn diff_sequences(
    expected: &[Untyped],
    actual: &[Untyped],
    options: &[CmpOption],
) -> Result<Diff> {
    let mut engine = Engine::new(options);
    engine.sequences(expected, actual)?;
    Ok(engine.finish())
}

/// Diff two keyed collections by identifier
pub fn diff_keyed(expected: &KeyedMap, actual: &KeyedMap, options: &[CmpOption]) -> Result<Diff> {
    let mut engine = Engine::new(options);
    engine.keyed(expected, actual)?;
    Ok(engine.finish())
}

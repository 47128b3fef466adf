//! Comparison entry points for test suites.
//!
//! Each comparison comes in two forms:
//! - `*_diff` returns `Result<Diff, CmpError>`; an empty diff means equal
//! - `assert_*` panics with the rendered diff, or with the configuration error
//!
//! The default options (see [`crate::utils::config`]) are layered underneath
//! the caller's, so a caller option overrides a default for the same values.

use log::{debug, warn};
use serde::Serialize;

use crate::align::to_keyed;
use crate::diff::{diff_keyed, diff_records, diff_sequences, Diff};
use crate::options::CmpOption;
use crate::projection::{to_untyped, to_untyped_all};
use crate::utils::config::{with_defaults, DEFAULT_OPTIONS, LENIENT_KEYED_OPTIONS};
use crate::utils::error::Result;

/// Compare two collections of possibly different record types in order
///
/// # Arguments
/// * `expected` - Expected records
/// * `real` - Records produced by the code under test
/// * `options` - Filters, renames, transformers and comparers
///
/// # Returns
/// Every positional and per-field difference
///
/// # Errors
/// * Configuration errors (projection failure, rename collision, failed value
///   accessor)
pub fn slice_diff<E, R>(expected: &[E], real: &[R], options: &[CmpOption]) -> Result<Diff>
where
    E: Serialize,
    R: Serialize,
{
    debug!(
        "Comparing {} expected with {} real records in order",
        expected.len(),
        real.len()
    );
    let options = with_defaults(options, &DEFAULT_OPTIONS);
    reported(ordered_diff(expected, real, &options))
}

fn ordered_diff<E, R>(expected: &[E], real: &[R], options: &[CmpOption]) -> Result<Diff>
where
    E: Serialize,
    R: Serialize,
{
    let expected = to_untyped_all(expected)?;
    let real = to_untyped_all(real)?;
    diff_sequences(&expected, &real, options)
}

/// Compare two collections aligned by identifier, with lenient defaults
///
/// Order does not matter. Besides the pointer defaults, sequences of strings
/// are normalized so a missing list equals an empty one.
///
/// # Arguments
/// * `expected_id_field` - Identifier field of the expected records
/// * `real_id_field` - Identifier field of the real records
///
/// # Errors
/// * `CmpError::MissingIdentifier` / `CmpError::DuplicateIdentifier` - On
///   either side
/// * Any other configuration error
pub fn mapped_diff<E, R>(
    expected_id_field: &str,
    real_id_field: &str,
    expected: &[E],
    real: &[R],
    options: &[CmpOption],
) -> Result<Diff>
where
    E: Serialize,
    R: Serialize,
{
    let options = with_defaults(options, &LENIENT_KEYED_OPTIONS);
    keyed_diff(expected_id_field, real_id_field, expected, real, &options)
}

/// Compare two collections aligned by identifier, pointer defaults only
pub fn mapped_diff_strict<E, R>(
    expected_id_field: &str,
    real_id_field: &str,
    expected: &[E],
    real: &[R],
    options: &[CmpOption],
) -> Result<Diff>
where
    E: Serialize,
    R: Serialize,
{
    let options = with_defaults(options, &DEFAULT_OPTIONS);
    keyed_diff(expected_id_field, real_id_field, expected, real, &options)
}

fn keyed_diff<E, R>(
    expected_id_field: &str,
    real_id_field: &str,
    expected: &[E],
    real: &[R],
    options: &[CmpOption],
) -> Result<Diff>
where
    E: Serialize,
    R: Serialize,
{
    debug!(
        "Comparing {} expected records keyed by '{}' with {} real records keyed by '{}'",
        expected.len(),
        expected_id_field,
        real.len(),
        real_id_field
    );
    reported(aligned_diff(
        expected_id_field,
        real_id_field,
        expected,
        real,
        options,
    ))
}

fn aligned_diff<E, R>(
    expected_id_field: &str,
    real_id_field: &str,
    expected: &[E],
    real: &[R],
    options: &[CmpOption],
) -> Result<Diff>
where
    E: Serialize,
    R: Serialize,
{
    let expected = to_keyed(expected_id_field, expected)?;
    let real = to_keyed(real_id_field, real)?;
    diff_keyed(&expected, &real, options)
}

/// Compare two individual records
pub fn untyped_diff<E, R>(expected: &E, real: &R, options: &[CmpOption]) -> Result<Diff>
where
    E: Serialize + ?Sized,
    R: Serialize + ?Sized,
{
    let options = with_defaults(options, &DEFAULT_OPTIONS);
    reported(single_diff(expected, real, &options))
}

fn single_diff<E, R>(expected: &E, real: &R, options: &[CmpOption]) -> Result<Diff>
where
    E: Serialize + ?Sized,
    R: Serialize + ?Sized,
{
    let expected = to_untyped(expected)?;
    let real = to_untyped(real)?;
    diff_records(&expected, &real, options)
}

/// Assert that two collections are equal in order; see [`slice_diff`]
#[track_caller]
pub fn assert_slice_cmp<E, R>(expected: &[E], real: &[R], options: &[CmpOption])
where
    E: Serialize,
    R: Serialize,
{
    check(slice_diff(expected, real, options));
}

/// Assert that two collections are equal by identifier; see [`mapped_diff`]
#[track_caller]
pub fn assert_mapped_cmp<E, R>(
    expected_id_field: &str,
    real_id_field: &str,
    expected: &[E],
    real: &[R],
    options: &[CmpOption],
) where
    E: Serialize,
    R: Serialize,
{
    check(mapped_diff(
        expected_id_field,
        real_id_field,
        expected,
        real,
        options,
    ));
}

/// Strict variant of [`assert_mapped_cmp`]; see [`mapped_diff_strict`]
#[track_caller]
pub fn assert_mapped_cmp_strict<E, R>(
    expected_id_field: &str,
    real_id_field: &str,
    expected: &[E],
    real: &[R],
    options: &[CmpOption],
) where
    E: Serialize,
    R: Serialize,
{
    check(mapped_diff_strict(
        expected_id_field,
        real_id_field,
        expected,
        real,
        options,
    ));
}

/// Assert that two records are equal; see [`untyped_diff`]
#[track_caller]
pub fn assert_untyped_cmp<E, R>(expected: &E, real: &R, options: &[CmpOption])
where
    E: Serialize + ?Sized,
    R: Serialize + ?Sized,
{
    check(untyped_diff(expected, real, options));
}

#[track_caller]
fn check(result: Result<Diff>) {
    match result {
        Ok(diff) if diff.is_empty() => {}
        Ok(diff) => panic!("records differ:\n{}", diff),
        Err(err) => panic!("invalid comparison: {}", err),
    }
}

fn reported(result: Result<Diff>) -> Result<Diff> {
    match &result {
        Ok(diff) => debug!("Comparison finished with {} differences", diff.len()),
        Err(err) => warn!("Comparison aborted: {}", err),
    }
    result
}

//! Constants and default option sets.

use std::sync::LazyLock;

use crate::options::{pointer_converter, slice_converter, CmpOption};

/// Object key carrying a value object's primitive representation
pub const VALUE_TAG: &str = "$value";

/// Object key carrying the message of a failed value accessor
pub const VALUE_ERROR_TAG: &str = "$value_error";

// Names of the default transformers (shown in trace logs)
pub const PT_INT64_CONV: &str = "PtInt64";
pub const PT_STRING_CONV: &str = "PtString";
pub const STR_SLICE_CONV: &str = "StrSlice";

/// Ranked below the caller's options by every comparison entry point
pub static DEFAULT_OPTIONS: LazyLock<Vec<CmpOption>> = LazyLock::new(|| {
    vec![
        pointer_converter::<i64>(PT_INT64_CONV),
        pointer_converter::<String>(PT_STRING_CONV),
    ]
});

/// Defaults for the lenient identifier-aligned comparison
pub static LENIENT_KEYED_OPTIONS: LazyLock<Vec<CmpOption>> = LazyLock::new(|| {
    let mut options = DEFAULT_OPTIONS.clone();
    options.push(slice_converter::<String>(STR_SLICE_CONV));
    options
});

/// The given defaults followed by the caller's options
///
/// Later options win within a scope, so a caller option overrides a default
/// for the same values.
pub fn with_defaults(options: &[CmpOption], defaults: &[CmpOption]) -> Vec<CmpOption> {
    defaults.iter().chain(options).cloned().collect()
}

//! Human-readable rendering of diffs.
//!
//! The rendering is what a failing assertion prints, so it lists every
//! difference with its path and both sides.

use serde_json::Value;
use std::fmt;

use super::schema::{Diff, Difference, DifferenceKind};

/// Render a diff as an indented report, `-` for expected and `+` for actual
pub fn render_diff(diff: &Diff) -> String {
    if diff.is_empty() {
        return "no differences\n".to_string();
    }

    let mut out = String::new();
    out.push_str(&render_header(diff));
    for difference in diff {
        out.push_str(&render_difference(difference));
    }
    out
}

fn render_header(diff: &Diff) -> String {
    let noun = if diff.len() == 1 {
        "difference"
    } else {
        "differences"
    };
    format!("{} {} (-expected +actual):\n", diff.len(), noun)
}

fn render_difference(difference: &Difference) -> String {
    let path = &difference.path;
    match &difference.kind {
        DifferenceKind::Changed { expected, actual } => format!(
            "  {}:\n    - {}\n    + {}\n",
            path,
            render_value(expected),
            render_value(actual)
        ),
        DifferenceKind::Missing { expected } => {
            format!("  {}: missing\n    - {}\n", path, render_value(expected))
        }
        DifferenceKind::Unexpected { actual } => {
            format!("  {}: unexpected\n    + {}\n", path, render_value(actual))
        }
        DifferenceKind::Incomparable {
            expected,
            actual,
            reason,
        } => format!(
            "  {}: cannot compare ({})\n    - {}\n    + {}\n",
            path,
            reason,
            render_value(expected),
            render_value(actual)
        ),
    }
}

fn render_value(value: &Value) -> String {
    value.to_string()
}

impl fmt::Display for Diff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_diff(self))
    }
}

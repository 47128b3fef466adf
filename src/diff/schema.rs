//! Schema definitions for diffs.
//!
//! Defines where two compared values differ (the [`Path`]) and how
//! ([`DifferenceKind`]).

use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// One step from the root of a comparison down to a value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PathStep {
    /// Position in an ordered collection of records or in a nested sequence
    Index(usize),

    /// Identifier of a record in a keyed collection
    Entry(String),

    /// Top-level field of a record projection
    Field(String),

    /// Key inside a nested object value
    Key(String),
}

/// Location of a value inside a comparison
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Path(Vec<PathStep>);

impl Path {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.0
    }

    pub fn last(&self) -> Option<&PathStep> {
        self.0.last()
    }

    /// Field name of the last step, if that step is a record field
    pub fn last_field(&self) -> Option<&str> {
        match self.0.last() {
            Some(PathStep::Field(name)) => Some(name),
            _ => None,
        }
    }

    /// This path extended by one step
    pub fn child(&self, step: PathStep) -> Self {
        let mut steps = self.0.clone();
        steps.push(step);
        Self(steps)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("(root)");
        }
        for (position, step) in self.0.iter().enumerate() {
            match step {
                PathStep::Index(index) => write!(f, "[{}]", index)?,
                PathStep::Entry(id) => write!(f, "{{{:?}}}", id)?,
                PathStep::Field(name) if position == 0 => f.write_str(name)?,
                PathStep::Field(name) => write!(f, ".{}", name)?,
                PathStep::Key(key) => write!(f, "[{:?}]", key)?,
            }
        }
        Ok(())
    }
}

/// How the two sides differ at a path
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DifferenceKind {
    /// Present on both sides with different values
    Changed { expected: Value, actual: Value },

    /// Present only on the expected side
    Missing { expected: Value },

    /// Present only on the actual side
    Unexpected { actual: Value },

    /// A custom comparer could not interpret one of the sides
    Incomparable {
        expected: Value,
        actual: Value,
        reason: String,
    },
}

/// A single difference
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Difference {
    pub path: Path,
    pub kind: DifferenceKind,
}

/// Every difference found by one comparison, in traversal order
///
/// An empty diff means the compared values are equal under the active options.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Diff {
    differences: Vec<Difference>,
}

impl Diff {
    pub fn is_empty(&self) -> bool {
        self.differences.is_empty()
    }

    pub fn len(&self) -> usize {
        self.differences.len()
    }

    pub fn differences(&self) -> &[Difference] {
        &self.differences
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Difference> {
        self.differences.iter()
    }

    /// Paths of all differences, rendered
    pub fn paths(&self) -> Vec<String> {
        self.differences.iter().map(|d| d.path.to_string()).collect()
    }

    pub(crate) fn push(&mut self, path: Path, kind: DifferenceKind) {
        self.differences.push(Difference { path, kind });
    }
}

impl<'a> IntoIterator for &'a Diff {
    type Item = &'a Difference;
    type IntoIter = std::slice::Iter<'a, Difference>;

    fn into_iter(self) -> Self::IntoIter {
        self.differences.iter()
    }
}

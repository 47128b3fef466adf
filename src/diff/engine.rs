//! Core diff engine implementation.
//! Walks two untyped trees and records every difference, honouring the
//! active comparison options.

use log::trace;
use serde_json::Value;
use std::borrow::Cow;
use std::collections::BTreeSet;

use super::schema::{Diff, DifferenceKind, Path, PathStep};
use crate::align::KeyedMap;
use crate::options::{most_specific, CmpOption, Comparer, Transformer};
use crate::projection::Untyped;
use crate::utils::error::Result;

/// One comparison run: the options in effect and the differences found so far
pub(crate) struct Engine<'o> {
    options: &'o [CmpOption],
    diff: Diff,
}

impl<'o> Engine<'o> {
    pub(crate) fn new(options: &'o [CmpOption]) -> Self {
        Self {
            options,
            diff: Diff::default(),
        }
    }

    pub(crate) fn finish(self) -> Diff {
        self.diff
    }

    /// Compare two ordered collections position by position
    pub(crate) fn sequences(&mut self, expected: &[Untyped], actual: &[Untyped]) -> Result<()> {
        let len = expected.len().max(actual.len());
        for index in 0..len {
            let path = Path::root().child(PathStep::Index(index));
            match (expected.get(index), actual.get(index)) {
                (Some(e), Some(a)) => self.records(e, a, &path)?,
                (Some(e), None) => self.missing(path, e.to_value()),
                (None, Some(a)) => self.unexpected(path, a.to_value()),
                (None, None) => {}
            }
        }
        Ok(())
    }

    /// Compare two keyed collections entry by entry
    pub(crate) fn keyed(&mut self, expected: &KeyedMap, actual: &KeyedMap) -> Result<()> {
        let ids: BTreeSet<_> = expected.ids().chain(actual.ids()).collect();
        for id in ids {
            let path = Path::root().child(PathStep::Entry(id.to_string()));
            match (expected.get(id), actual.get(id)) {
                (Some(e), Some(a)) => self.records(e, a, &path)?,
                (Some(e), None) => self.missing(path, e.to_value()),
                (None, Some(a)) => self.unexpected(path, a.to_value()),
                (None, None) => {}
            }
        }
        Ok(())
    }

    /// Compare two projections field by field, after renames
    pub(crate) fn records(&mut self, expected: &Untyped, actual: &Untyped, path: &Path) -> Result<()> {
        let expected = self.renamed(expected)?;
        let actual = self.renamed(actual)?;

        let fields: BTreeSet<&str> = expected.fields().chain(actual.fields()).collect();
        for field in fields {
            let path = path.child(PathStep::Field(field.to_string()));
            if self.ignored(&path) {
                trace!("Ignoring {}", path);
                continue;
            }
            match (expected.get(field), actual.get(field)) {
                (Some(e), Some(a)) => self.values(e, a, &path, &[])?,
                (Some(e), None) => self.missing(path, e.clone()),
                (None, Some(a)) => self.unexpected(path, a.clone()),
                (None, None) => {}
            }
        }
        Ok(())
    }

    /// Compare two values present on both sides
    ///
    /// `spent` holds the indices of transformers already applied at this path.
    fn values(&mut self, expected: &Value, actual: &Value, path: &Path, spent: &[usize]) -> Result<()> {
        if let Some((index, transformer)) = self.transformer(path, expected, actual, spent) {
            trace!("Applying transformer '{}' at {}", transformer.name(), path);
            let expected = transformer.convert(expected, path)?;
            let actual = transformer.convert(actual, path)?;
            let mut spent = spent.to_vec();
            spent.push(index);
            return self.values(&expected, &actual, path, &spent);
        }

        if let Some(comparer) = self.comparer(path) {
            trace!("Applying comparer '{}' at {}", comparer.name(), path);
            match comparer.equal(expected, actual) {
                Ok(true) => {}
                Ok(false) => self.changed(path.clone(), expected, actual),
                Err(reason) => self.diff.push(
                    path.clone(),
                    DifferenceKind::Incomparable {
                        expected: expected.clone(),
                        actual: actual.clone(),
                        reason,
                    },
                ),
            }
            return Ok(());
        }

        match (expected, actual) {
            (Value::Object(e), Value::Object(a)) => {
                let keys: BTreeSet<&String> = e.keys().chain(a.keys()).collect();
                for key in keys {
                    let path = path.child(PathStep::Key(key.clone()));
                    match (e.get(key), a.get(key)) {
                        (Some(ev), Some(av)) => self.values(ev, av, &path, &[])?,
                        (Some(ev), None) => self.missing(path, ev.clone()),
                        (None, Some(av)) => self.unexpected(path, av.clone()),
                        (None, None) => {}
                    }
                }
            }
            (Value::Array(e), Value::Array(a)) => {
                for index in 0..e.len().max(a.len()) {
                    let path = path.child(PathStep::Index(index));
                    match (e.get(index), a.get(index)) {
                        (Some(ev), Some(av)) => self.values(ev, av, &path, &[])?,
                        (Some(ev), None) => self.missing(path, ev.clone()),
                        (None, Some(av)) => self.unexpected(path, av.clone()),
                        (None, None) => {}
                    }
                }
            }
            _ if expected != actual => self.changed(path.clone(), expected, actual),
            _ => {}
        }
        Ok(())
    }

    /// Apply every rename option; borrowed as-is when there are none
    fn renamed<'u>(&self, untyped: &'u Untyped) -> Result<Cow<'u, Untyped>> {
        let mut untyped = Cow::Borrowed(untyped);
        for option in self.options {
            if let CmpOption::Rename(renames) = option {
                renames.apply(untyped.to_mut())?;
            }
        }
        Ok(untyped)
    }

    fn ignored(&self, path: &Path) -> bool {
        let Some(field) = path.last_field() else {
            return false;
        };
        self.options
            .iter()
            .any(|option| matches!(option, CmpOption::Filter(filter) if filter.excludes(field)))
    }

    fn transformer(
        &self,
        path: &Path,
        expected: &Value,
        actual: &Value,
        spent: &[usize],
    ) -> Option<(usize, &'o Transformer)> {
        let options: &'o [CmpOption] = self.options;
        let candidates = options
            .iter()
            .enumerate()
            .rev()
            .filter_map(|(index, option)| match option {
                CmpOption::Transform(t)
                    if !spent.contains(&index) && t.applies(path, expected, actual) =>
                {
                    Some((index, t))
                }
                _ => None,
            });
        most_specific(candidates, |(_, t)| t.scope().is_field())
    }

    fn comparer(&self, path: &Path) -> Option<&'o Comparer> {
        let options: &'o [CmpOption] = self.options;
        let candidates = options.iter().rev().filter_map(|option| match option {
            CmpOption::Compare(c) if c.applies(path) => Some(c),
            _ => None,
        });
        most_specific(candidates, |c| c.scope().is_field())
    }

    fn changed(&mut self, path: Path, expected: &Value, actual: &Value) {
        self.diff.push(
            path,
            DifferenceKind::Changed {
                expected: expected.clone(),
                actual: actual.clone(),
            },
        );
    }

    fn missing(&mut self, path: Path, expected: Value) {
        self.diff.push(path, DifferenceKind::Missing { expected });
    }

    fn unexpected(&mut self, path: Path, actual: Value) {
        self.diff.push(path, DifferenceKind::Unexpected { actual });
    }
}

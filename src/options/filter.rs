//! Allow-list and deny-list field filters.

use std::collections::BTreeSet;

use super::CmpOption;

/// Predicate over record field names
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldFilter {
    /// Compare only these fields
    Only(BTreeSet<String>),

    /// Compare every field except these
    Ignore(BTreeSet<String>),
}

impl FieldFilter {
    /// Whether the field is left out of the comparison
    pub fn excludes(&self, field: &str) -> bool {
        match self {
            FieldFilter::Only(fields) => !fields.contains(field),
            FieldFilter::Ignore(fields) => fields.contains(field),
        }
    }
}

/// Compare only the named fields
pub fn cmp_only<I, S>(fields: I) -> CmpOption
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    CmpOption::Filter(FieldFilter::Only(fields.into_iter().map(Into::into).collect()))
}

/// Leave the named fields out of the comparison
pub fn cmp_ignore<I, S>(fields: I) -> CmpOption
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    CmpOption::Filter(FieldFilter::Ignore(fields.into_iter().map(Into::into).collect()))
}

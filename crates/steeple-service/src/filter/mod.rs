//! Search and filter pipelines for the admin list screens.
//!
//! ## Module Organization
//!
//! - `query`: parsing of list-endpoint query parameters into a [`FilterSpec`]
//! - `records`: [`Filterable`] implementations for the stored record types

use std::collections::BTreeMap;

use chrono::NaiveDate;
use icu::casemap::CaseMapper;

use steeple_db::store::SortDirection;

pub mod query;
pub mod records;

/// Inclusive date bounds; either side may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }
}

/// Conditions a record must satisfy to stay in a list. All set conditions
/// must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    /// Case-insensitive substring searched across the record's text fields.
    pub text: Option<String>,
    /// Required values of named boolean flags. A flag the record lacks reads as `false`.
    pub flags: BTreeMap<String, bool>,
    pub date_range: DateRange,
    pub status: Option<String>,
}

impl FilterSpec {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_none()
            && self.flags.is_empty()
            && self.date_range.is_open()
            && self.status.is_none()
    }
}

/// A record the list filters understand.
pub trait Filterable {
    /// Text fields searched by [`FilterSpec::text`]. Absent fields are left out.
    fn search_fields(&self) -> Vec<&str>;

    fn flag(&self, _name: &str) -> Option<bool> {
        None
    }

    /// The date used for range filters and date sorting.
    fn primary_date(&self) -> Option<NaiveDate> {
        None
    }

    fn status(&self) -> Option<&str> {
        None
    }
}

fn fold(text: &str) -> String {
    CaseMapper::new().fold_string(text).into_owned()
}

/// A [`FilterSpec`] with its search text folded once up front.
struct PreparedFilter<'f> {
    spec: &'f FilterSpec,
    needle: Option<String>,
}

impl<'f> PreparedFilter<'f> {
    fn new(spec: &'f FilterSpec) -> Self {
        let needle = spec
            .text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(fold);
        Self { spec, needle }
    }

    fn matches<T: Filterable>(&self, record: &T) -> bool {
        self.matches_text(record)
            && self.matches_flags(record)
            && self.matches_date(record)
            && self.matches_status(record)
    }

    fn matches_text<T: Filterable>(&self, record: &T) -> bool {
        let Some(needle) = &self.needle else {
            return true;
        };
        record
            .search_fields()
            .into_iter()
            .any(|field| fold(field).contains(needle.as_str()))
    }

    fn matches_flags<T: Filterable>(&self, record: &T) -> bool {
        self.spec
            .flags
            .iter()
            .all(|(name, wanted)| record.flag(name).unwrap_or(false) == *wanted)
    }

    fn matches_date<T: Filterable>(&self, record: &T) -> bool {
        let range = &self.spec.date_range;
        if range.is_open() {
            return true;
        }
        record.primary_date().is_some_and(|date| range.contains(date))
    }

    fn matches_status<T: Filterable>(&self, record: &T) -> bool {
        match &self.spec.status {
            None => true,
            Some(wanted) => record
                .status()
                .is_some_and(|status| status.eq_ignore_ascii_case(wanted)),
        }
    }
}

/// ## Summary
/// Keeps the records matching every condition of `spec`, in their original order.
#[must_use]
pub fn apply_filters<T: Filterable + Clone>(records: &[T], spec: &FilterSpec) -> Vec<T> {
    if spec.is_empty() {
        return records.to_vec();
    }
    let filter = PreparedFilter::new(spec);
    records
        .iter()
        .filter(|record| filter.matches(*record))
        .cloned()
        .collect()
}

/// ## Summary
/// Sorts by primary date. Records without a date go last in either direction.
/// The sort is stable.
pub fn sort_by_date<T: Filterable>(records: &mut [T], direction: SortDirection) {
    records.sort_by(|a, b| match (a.primary_date(), b.primary_date()) {
        (Some(x), Some(y)) => match direction {
            SortDirection::Ascending => x.cmp(&y),
            SortDirection::Descending => y.cmp(&x),
        },
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
}

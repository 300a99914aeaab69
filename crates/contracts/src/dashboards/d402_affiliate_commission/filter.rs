use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::enums::ReportDimension;

/// Which values of one categorical dimension a query keeps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "mode", content = "values", rename_all = "snake_case")]
pub enum Selection {
    /// No restriction, every record passes
    #[default]
    Unrestricted,
    /// Exact membership. An empty set is treated as `Unrestricted`
    RestrictedTo(BTreeSet<String>),
    /// Case-insensitive substring match against any of the terms
    Matching(Vec<String>),
}

impl Selection {
    pub fn only<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::RestrictedTo(values.into_iter().map(Into::into).collect())
    }

    pub fn matching<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Matching(terms.into_iter().map(Into::into).collect())
    }

    pub fn is_unrestricted(&self) -> bool {
        match self {
            Self::Unrestricted => true,
            Self::RestrictedTo(values) => values.is_empty(),
            Self::Matching(terms) => terms.is_empty(),
        }
    }

    pub fn allows(&self, value: &str) -> bool {
        if self.is_unrestricted() {
            return true;
        }
        match self {
            Self::Unrestricted => true,
            Self::RestrictedTo(values) => values.contains(value),
            Self::Matching(terms) => {
                let value = value.to_lowercase();
                terms.iter().any(|t| value.contains(&t.to_lowercase()))
            }
        }
    }
}

/// Inclusive calendar range. `start > end` matches nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }
}

/// One dashboard query. Immutable; build a new one per interaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    #[serde(default)]
    pub statuses: Selection,
    #[serde(default)]
    pub channels: Selection,
    #[serde(default)]
    pub categories: Selection,
    /// Compared against the reporting date of every record
    pub date_range: DateRange,
    /// Overrides `date_range` for completed orders only
    #[serde(default)]
    pub completed_range: Option<DateRange>,
}

impl FilterSpec {
    /// All dimensions unrestricted, a single range for both status classes
    pub fn for_range(date_range: DateRange) -> Self {
        Self {
            statuses: Selection::Unrestricted,
            channels: Selection::Unrestricted,
            categories: Selection::Unrestricted,
            date_range,
            completed_range: None,
        }
    }

    pub fn with_selection(mut self, dimension: ReportDimension, selection: Selection) -> Self {
        match dimension {
            ReportDimension::Status => self.statuses = selection,
            ReportDimension::Channel => self.channels = selection,
            ReportDimension::Category => self.categories = selection,
        }
        self
    }

    pub fn with_completed_range(mut self, range: DateRange) -> Self {
        self.completed_range = Some(range);
        self
    }

    pub fn selection(&self, dimension: ReportDimension) -> &Selection {
        match dimension {
            ReportDimension::Status => &self.statuses,
            ReportDimension::Channel => &self.channels,
            ReportDimension::Category => &self.categories,
        }
    }

    /// Range applied to completed orders
    pub fn completed_date_range(&self) -> &DateRange {
        self.completed_range.as_ref().unwrap_or(&self.date_range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_empty_selection_means_all() {
        assert!(Selection::Unrestricted.allows("Pendente"));
        assert!(Selection::RestrictedTo(BTreeSet::new()).allows("Pendente"));
        assert!(Selection::Matching(vec![]).allows("Pendente"));
        assert!(Selection::only(Vec::<String>::new()).is_unrestricted());
    }

    #[test]
    fn test_restricted_is_exact() {
        let selection = Selection::only(["App", "Web"]);
        assert!(selection.allows("App"));
        assert!(!selection.allows("app"));
        assert!(!selection.allows("Instagram"));
    }

    #[test]
    fn test_matching_is_case_insensitive_substring() {
        let selection = Selection::matching(["conclu"]);
        assert!(selection.allows("Concluído"));
        assert!(selection.allows("PEDIDO CONCLUIDO"));
        assert!(!selection.allows("Pendente"));
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let range = DateRange::new(day(5), day(10));
        assert!(range.contains(day(5)));
        assert!(range.contains(day(10)));
        assert!(!range.contains(day(4)));
        assert!(!range.contains(day(11)));
    }

    #[test]
    fn test_inverted_range_matches_nothing() {
        let range = DateRange::new(day(10), day(5));
        assert!(range.is_inverted());
        assert!((1..=31).all(|d| !range.contains(day(d))));
    }

    #[test]
    fn test_completed_range_falls_back() {
        let spec = FilterSpec::for_range(DateRange::new(day(1), day(6)));
        assert_eq!(spec.completed_date_range(), &spec.date_range);

        let split = spec.with_completed_range(DateRange::new(day(2), day(3)));
        assert_eq!(split.completed_date_range(), &DateRange::new(day(2), day(3)));
        assert_eq!(split.date_range, DateRange::new(day(1), day(6)));
    }

    #[test]
    fn test_spec_deserializes_with_defaults() {
        let json = r#"{
            "statuses": { "mode": "restricted_to", "values": ["Concluído"] },
            "date_range": { "start": "2024-01-01", "end": "2024-01-31" }
        }"#;
        let spec: FilterSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.statuses, Selection::only(["Concluído"]));
        assert_eq!(spec.channels, Selection::Unrestricted);
        assert!(spec.completed_range.is_none());
    }
}

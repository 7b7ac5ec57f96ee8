//! Contact filtering.
//!
//! A [`FilterSpec`] combines the active field, a free-text search term and,
//! for the Created Date field, a [`DateRange`]. [`evaluate`] applies it to a
//! list of contacts and keeps the input order.
//!
//! Date filtering takes over as soon as the active field is Created Date and
//! either bound is set; the search term is ignored on that path. Bounds are
//! typed by mode:
//!
//! - [`DateRange::Exact`]: calendar dates, inclusive, open ends default to
//!   1900-01-01 and 2100-12-31.
//! - [`DateRange::Month`]: month numbers 1-12, year ignored. A start after the
//!   end wraps around the new year (Nov..Feb is Nov, Dec, Jan, Feb).
//! - [`DateRange::Year`]: year numbers, open ends unbounded.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ContactsError, Result};
use crate::model::{Contact, ContactField, DateParts};

/// Which attribute the search term applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldSelector {
    #[default]
    All,
    Field(ContactField),
}

impl FromStr for FieldSelector {
    type Err = ContactsError;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(FieldSelector::All);
        }
        s.parse().map(FieldSelector::Field)
    }
}

impl fmt::Display for FieldSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldSelector::All => f.write_str("all"),
            FieldSelector::Field(field) => write!(f, "{}", field),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateMode {
    #[default]
    Exact,
    Month,
    Year,
}

impl DateMode {
    pub fn name(self) -> &'static str {
        match self {
            DateMode::Exact => "exact",
            DateMode::Month => "month",
            DateMode::Year => "year",
        }
    }
}

impl FromStr for DateMode {
    type Err = ContactsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "exact" | "date" => Ok(DateMode::Exact),
            "month" => Ok(DateMode::Month),
            "year" => Ok(DateMode::Year),
            _ => Err(ContactsError::Api(format!(
                "Unknown date mode: {} (expected exact, month or year)",
                s
            ))),
        }
    }
}

impl fmt::Display for DateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Created Date bounds, typed by the date-filter mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum DateRange {
    Exact {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
    Month {
        start: Option<u32>,
        end: Option<u32>,
    },
    Year {
        start: Option<i32>,
        end: Option<i32>,
    },
}

impl Default for DateRange {
    fn default() -> Self {
        DateRange::empty(DateMode::Exact)
    }
}

#[derive(Debug, Clone, Copy)]
enum Bound {
    Start,
    End,
}

impl DateRange {
    /// A range of the given mode with no bounds set.
    pub fn empty(mode: DateMode) -> Self {
        match mode {
            DateMode::Exact => DateRange::Exact {
                start: None,
                end: None,
            },
            DateMode::Month => DateRange::Month {
                start: None,
                end: None,
            },
            DateMode::Year => DateRange::Year {
                start: None,
                end: None,
            },
        }
    }

    pub fn mode(&self) -> DateMode {
        match self {
            DateRange::Exact { .. } => DateMode::Exact,
            DateRange::Month { .. } => DateMode::Month,
            DateRange::Year { .. } => DateMode::Year,
        }
    }

    pub fn is_set(&self) -> bool {
        match self {
            DateRange::Exact { start, end } => start.is_some() || end.is_some(),
            DateRange::Month { start, end } => start.is_some() || end.is_some(),
            DateRange::Year { start, end } => start.is_some() || end.is_some(),
        }
    }

    /// Set the start bound from user input. Blank input clears it.
    ///
    /// Exact bounds are `YYYY-MM-DD`, month bounds `1`-`12`, year bounds any
    /// integer.
    pub fn with_start(self, raw: &str) -> Result<Self> {
        self.with_bound(Bound::Start, raw)
    }

    /// Set the end bound from user input. Blank input clears it.
    pub fn with_end(self, raw: &str) -> Result<Self> {
        self.with_bound(Bound::End, raw)
    }

    fn with_bound(self, which: Bound, raw: &str) -> Result<Self> {
        let raw = raw.trim();
        let invalid = |mode: DateMode| ContactsError::InvalidBound {
            mode: mode.name(),
            value: raw.to_string(),
        };
        let updated = match self {
            DateRange::Exact { start, end } => {
                let value = if raw.is_empty() {
                    None
                } else {
                    Some(
                        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                            .map_err(|_| invalid(DateMode::Exact))?,
                    )
                };
                let (start, end) = replace(which, start, end, value);
                DateRange::Exact { start, end }
            }
            DateRange::Month { start, end } => {
                let value = if raw.is_empty() {
                    None
                } else {
                    let month: u32 = raw.parse().map_err(|_| invalid(DateMode::Month))?;
                    if !(1..=12).contains(&month) {
                        return Err(invalid(DateMode::Month));
                    }
                    Some(month)
                };
                let (start, end) = replace(which, start, end, value);
                DateRange::Month { start, end }
            }
            DateRange::Year { start, end } => {
                let value = if raw.is_empty() {
                    None
                } else {
                    Some(raw.parse().map_err(|_| invalid(DateMode::Year))?)
                };
                let (start, end) = replace(which, start, end, value);
                DateRange::Year { start, end }
            }
        };
        Ok(updated)
    }

    /// Whether a record's created-date parts fall in this range.
    ///
    /// Missing components needed by the mode make the record a non-match.
    pub fn contains(&self, parts: DateParts) -> bool {
        match *self {
            DateRange::Exact { start, end } => {
                let Some(date) = parts.to_date() else {
                    return false;
                };
                let start = start.unwrap_or_else(default_exact_start);
                let end = end.unwrap_or_else(default_exact_end);
                start <= date && date <= end
            }
            DateRange::Month { start, end } => {
                let Some(month) = parts.month else {
                    return false;
                };
                let start = start.unwrap_or(1);
                let end = end.unwrap_or(12);
                if start <= end {
                    start <= month && month <= end
                } else {
                    month >= start || month <= end
                }
            }
            DateRange::Year { start, end } => {
                let Some(year) = parts.year else {
                    return false;
                };
                start.map_or(true, |s| s <= year) && end.map_or(true, |e| year <= e)
            }
        }
    }
}

fn replace<T>(
    which: Bound,
    start: Option<T>,
    end: Option<T>,
    value: Option<T>,
) -> (Option<T>, Option<T>) {
    match which {
        Bound::Start => (value, end),
        Bound::End => (start, value),
    }
}

fn default_exact_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or(NaiveDate::MIN)
}

fn default_exact_end() -> NaiveDate {
    NaiveDate::from_ymd_opt(2100, 12, 31).unwrap_or(NaiveDate::MAX)
}

/// The complete filter state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSpec {
    pub field: FieldSelector,
    pub search: String,
    pub date_range: DateRange,
}

impl FilterSpec {
    /// Switch the active field. Search term and date bounds are cleared and
    /// the date mode goes back to exact.
    pub fn with_field(&self, field: FieldSelector) -> Self {
        Self {
            field,
            search: String::new(),
            date_range: DateRange::default(),
        }
    }

    pub fn with_search(&self, search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            ..self.clone()
        }
    }

    /// Switch the date mode, clearing both bounds.
    pub fn with_date_mode(&self, mode: DateMode) -> Self {
        Self {
            date_range: DateRange::empty(mode),
            ..self.clone()
        }
    }

    pub fn with_start_bound(&self, raw: &str) -> Result<Self> {
        Ok(Self {
            date_range: self.date_range.with_start(raw)?,
            ..self.clone()
        })
    }

    pub fn with_end_bound(&self, raw: &str) -> Result<Self> {
        Ok(Self {
            date_range: self.date_range.with_end(raw)?,
            ..self.clone()
        })
    }

    fn date_filter_active(&self) -> bool {
        self.field == FieldSelector::Field(ContactField::CreatedDate) && self.date_range.is_set()
    }
}

/// The contacts matching `spec`, in input order.
pub fn evaluate(records: &[Contact], spec: &FilterSpec) -> Vec<Contact> {
    if spec.date_filter_active() {
        return records
            .iter()
            .filter(|c| spec.date_range.contains(c.created_parts()))
            .cloned()
            .collect();
    }

    if spec.search.is_empty() {
        return records.to_vec();
    }

    let term = spec.search.to_lowercase();
    records
        .iter()
        .filter(|c| match spec.field {
            FieldSelector::All => matches_any(c, &term),
            FieldSelector::Field(field) => c
                .get(field)
                .is_some_and(|v| v.to_lowercase().contains(&term)),
        })
        .cloned()
        .collect()
}

fn matches_any(contact: &Contact, term: &str) -> bool {
    if contact.id.to_string().contains(term) {
        return true;
    }
    ContactField::ALL
        .iter()
        .filter_map(|field| contact.get(*field))
        .any(|v| v.to_lowercase().contains(term))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::contact;

    fn names(records: &[Contact]) -> Vec<&str> {
        records.iter().map(|c| c.name.as_str()).collect()
    }

    fn by_date() -> FilterSpec {
        FilterSpec::default().with_field(FieldSelector::Field(ContactField::CreatedDate))
    }

    fn months() -> Vec<Contact> {
        (1..=12)
            .map(|m| contact(m as u64, &format!("M{}", m), &format!("10/{:02}/2024", m)))
            .collect()
    }

    #[test]
    fn empty_search_is_identity() {
        let records = vec![contact(1, "Alice", "15/03/2024"), contact(2, "Bob", "20/11/2023")];
        assert_eq!(evaluate(&records, &FilterSpec::default()), records);
        assert_eq!(evaluate(&records, &by_date()), records);
    }

    #[test]
    fn all_fields_search_is_case_insensitive() {
        let records = vec![contact(1, "Alice", "15/03/2024"), contact(2, "Bob", "20/11/2023")];
        let spec = FilterSpec::default().with_search("ALI");
        assert_eq!(names(&evaluate(&records, &spec)), vec!["Alice"]);
    }

    #[test]
    fn all_fields_search_matches_id_and_skips_absent_values() {
        let mut carl = contact(77, "Carl", "01/01/2024");
        carl.contact_status = Some("Lead".into());
        let records = vec![contact(1, "Alice", "15/03/2024"), carl];

        assert_eq!(
            names(&evaluate(&records, &FilterSpec::default().with_search("77"))),
            vec!["Carl"]
        );
        assert_eq!(
            names(&evaluate(&records, &FilterSpec::default().with_search("lead"))),
            vec!["Carl"]
        );
    }

    #[test]
    fn specific_field_search_only_checks_that_field() {
        let records = vec![contact(1, "Alice", "15/03/2024"), contact(2, "Bob", "20/11/2023")];
        let spec = FilterSpec::default()
            .with_field(FieldSelector::Field(ContactField::Email))
            .with_search("bob@");
        assert_eq!(names(&evaluate(&records, &spec)), vec!["Bob"]);

        let spec = FilterSpec::default()
            .with_field(FieldSelector::Field(ContactField::Name))
            .with_search("example");
        assert!(evaluate(&records, &spec).is_empty());
    }

    #[test]
    fn absent_optional_field_never_matches() {
        let mut tagged = contact(1, "Alice", "15/03/2024");
        tagged.contact_source = Some("Undefined Leads".into());
        let records = vec![tagged, contact(2, "Bob", "20/11/2023")];
        let spec = FilterSpec::default()
            .with_field(FieldSelector::Field(ContactField::ContactSource))
            .with_search("und");
        assert_eq!(names(&evaluate(&records, &spec)), vec!["Alice"]);
    }

    #[test]
    fn changing_field_resets_search_and_dates() {
        let spec = by_date()
            .with_date_mode(DateMode::Year)
            .with_start_bound("2024")
            .unwrap()
            .with_search("x");
        let reset = spec.with_field(FieldSelector::All);
        assert_eq!(reset.search, "");
        assert_eq!(reset.date_range, DateRange::default());
    }

    #[test]
    fn changing_mode_resets_bounds() {
        let spec = by_date().with_start_bound("2024-01-01").unwrap();
        let switched = spec.with_date_mode(DateMode::Month);
        assert_eq!(switched.date_range, DateRange::empty(DateMode::Month));
    }

    #[test]
    fn exact_range_is_inclusive() {
        let records = vec![
            contact(1, "Before", "31/12/2023"),
            contact(2, "First", "01/01/2024"),
            contact(3, "Last", "31/01/2024"),
            contact(4, "After", "01/02/2024"),
        ];
        let spec = by_date()
            .with_start_bound("2024-01-01")
            .unwrap()
            .with_end_bound("2024-01-31")
            .unwrap();
        assert_eq!(names(&evaluate(&records, &spec)), vec!["First", "Last"]);
    }

    #[test]
    fn exact_range_open_end_uses_defaults() {
        let records = vec![contact(1, "Old", "01/01/1899"), contact(2, "New", "01/01/2024")];
        let spec = by_date().with_end_bound("2030-01-01").unwrap();
        assert_eq!(names(&evaluate(&records, &spec)), vec!["New"]);
    }

    #[test]
    fn month_range_wraps_around_new_year() {
        let spec = by_date()
            .with_date_mode(DateMode::Month)
            .with_start_bound("11")
            .unwrap()
            .with_end_bound("2")
            .unwrap();
        assert_eq!(
            names(&evaluate(&months(), &spec)),
            vec!["M1", "M2", "M11", "M12"]
        );
    }

    #[test]
    fn month_range_ignores_year() {
        let records = vec![contact(1, "A", "05/06/2019"), contact(2, "B", "05/07/2025")];
        let spec = by_date()
            .with_date_mode(DateMode::Month)
            .with_start_bound("6")
            .unwrap()
            .with_end_bound("6")
            .unwrap();
        assert_eq!(names(&evaluate(&records, &spec)), vec!["A"]);
    }

    #[test]
    fn month_range_with_only_end() {
        let spec = by_date()
            .with_date_mode(DateMode::Month)
            .with_end_bound("3")
            .unwrap();
        assert_eq!(names(&evaluate(&months(), &spec)), vec!["M1", "M2", "M3"]);
    }

    #[test]
    fn year_range_with_only_start() {
        let records = vec![
            contact(1, "A", "01/01/2023"),
            contact(2, "B", "01/01/2024"),
            contact(3, "C", "01/01/2031"),
        ];
        let spec = by_date()
            .with_date_mode(DateMode::Year)
            .with_start_bound("2024")
            .unwrap();
        assert_eq!(names(&evaluate(&records, &spec)), vec!["B", "C"]);
    }

    #[test]
    fn malformed_dates_are_non_matches() {
        let records = vec![
            contact(1, "Garbage", "not a date"),
            contact(2, "BadDay", "xx/05/2024"),
            contact(3, "Good", "10/05/2024"),
        ];
        let exact = by_date().with_start_bound("2024-01-01").unwrap();
        assert_eq!(names(&evaluate(&records, &exact)), vec!["Good"]);

        let month = by_date()
            .with_date_mode(DateMode::Month)
            .with_start_bound("5")
            .unwrap();
        assert_eq!(names(&evaluate(&records, &month)), vec!["BadDay", "Good"]);
    }

    #[test]
    fn date_path_ignores_search_term() {
        let records = vec![contact(1, "Alice", "15/03/2024")];
        let spec = by_date()
            .with_search("zzz")
            .with_date_mode(DateMode::Year)
            .with_start_bound("2024")
            .unwrap();
        assert_eq!(names(&evaluate(&records, &spec)), vec!["Alice"]);
    }

    #[test]
    fn created_date_without_bounds_searches_text() {
        let records = vec![contact(1, "Alice", "15/03/2024"), contact(2, "Bob", "20/11/2023")];
        let spec = by_date().with_search("/11/");
        assert_eq!(names(&evaluate(&records, &spec)), vec!["Bob"]);
    }

    #[test]
    fn invalid_bounds_are_rejected() {
        assert!(matches!(
            by_date().with_start_bound("15/03/2024"),
            Err(ContactsError::InvalidBound { mode: "exact", .. })
        ));
        let month = by_date().with_date_mode(DateMode::Month);
        assert!(month.with_start_bound("13").is_err());
        assert!(month.with_start_bound("0").is_err());
        assert!(month.with_start_bound("jan").is_err());
        let year = by_date().with_date_mode(DateMode::Year);
        assert!(year.with_end_bound("soon").is_err());
    }

    #[test]
    fn blank_bound_clears() {
        let spec = by_date()
            .with_start_bound("2024-01-01")
            .unwrap()
            .with_start_bound("  ")
            .unwrap();
        assert!(!spec.date_range.is_set());
    }

    #[test]
    fn selector_parses_all_and_fields() {
        assert_eq!("ALL".parse::<FieldSelector>().unwrap(), FieldSelector::All);
        assert_eq!(
            "phone".parse::<FieldSelector>().unwrap(),
            FieldSelector::Field(ContactField::Phone)
        );
        assert_eq!("date".parse::<DateMode>().unwrap(), DateMode::Exact);
    }
}

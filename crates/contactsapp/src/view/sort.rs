//! Column sorting.
//!
//! Sorting is a three-state toggle per column: the first click on a column
//! sorts ascending, the second descending, the third clears it. Sorting is
//! stable in both directions and never reorders the caller's slice.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::collate;
use crate::error::ContactsError;
use crate::model::{Contact, ContactField};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Ascending => f.write_str("asc"),
            SortDirection::Descending => f.write_str("desc"),
        }
    }
}

impl FromStr for SortDirection {
    type Err = ContactsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            _ => Err(ContactsError::Api(format!("Unknown sort direction: {}", s))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum SortSpec {
    #[default]
    Unsorted,
    By {
        field: ContactField,
        direction: SortDirection,
    },
}

impl SortSpec {
    pub fn ascending(field: ContactField) -> Self {
        SortSpec::By {
            field,
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(field: ContactField) -> Self {
        SortSpec::By {
            field,
            direction: SortDirection::Descending,
        }
    }

    /// The next state after clicking `field`'s column header.
    pub fn toggle(self, field: ContactField) -> Self {
        match self {
            SortSpec::By {
                field: current,
                direction: SortDirection::Ascending,
            } if current == field => SortSpec::descending(field),
            SortSpec::By {
                field: current,
                direction: SortDirection::Descending,
            } if current == field => SortSpec::Unsorted,
            _ => SortSpec::ascending(field),
        }
    }

    /// The direction `field` is sorted in, if it is the sort column.
    pub fn direction_of(self, field: ContactField) -> Option<SortDirection> {
        match self {
            SortSpec::By {
                field: current,
                direction,
            } if current == field => Some(direction),
            _ => None,
        }
    }
}

/// A sorted copy of `records`.
pub fn evaluate(records: &[Contact], spec: &SortSpec) -> Vec<Contact> {
    let mut sorted = records.to_vec();
    let SortSpec::By { field, direction } = *spec else {
        return sorted;
    };
    // Vec::sort_by is stable, so equal keys keep input order either way.
    sorted.sort_by(|a, b| {
        let ord = collate::compare(a.display_value(field), b.display_value(field));
        match direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ContactId;
    use crate::store::memory::fixtures::contact;

    fn ids(records: &[Contact]) -> Vec<u64> {
        records.iter().map(|c| c.id.0).collect()
    }

    fn people() -> Vec<Contact> {
        vec![
            contact(1, "Alice", "15/03/2024"),
            contact(2, "Bob", "20/11/2023"),
            contact(3, "carl", "01/01/2022"),
        ]
    }

    #[test]
    fn toggle_cycles_through_three_states() {
        let name = ContactField::Name;
        let first = SortSpec::Unsorted.toggle(name);
        assert_eq!(first, SortSpec::ascending(name));
        let second = first.toggle(name);
        assert_eq!(second, SortSpec::descending(name));
        assert_eq!(second.toggle(name), SortSpec::Unsorted);
    }

    #[test]
    fn toggle_other_column_starts_ascending() {
        let spec = SortSpec::descending(ContactField::Name).toggle(ContactField::Email);
        assert_eq!(spec, SortSpec::ascending(ContactField::Email));
    }

    #[test]
    fn unsorted_keeps_input_order() {
        let records = people();
        assert_eq!(evaluate(&records, &SortSpec::Unsorted), records);
    }

    #[test]
    fn sorts_case_insensitively() {
        let records = vec![
            contact(3, "carl", "01/01/2022"),
            contact(2, "Bob", "20/11/2023"),
            contact(1, "Alice", "15/03/2024"),
        ];
        let asc = evaluate(&records, &SortSpec::ascending(ContactField::Name));
        assert_eq!(ids(&asc), vec![1, 2, 3]);
        let desc = evaluate(&records, &SortSpec::descending(ContactField::Name));
        assert_eq!(ids(&desc), vec![3, 2, 1]);
    }

    #[test]
    fn does_not_mutate_input() {
        let records = vec![contact(2, "Bob", "20/11/2023"), contact(1, "Alice", "15/03/2024")];
        let _ = evaluate(&records, &SortSpec::ascending(ContactField::Name));
        assert_eq!(ids(&records), vec![2, 1]);
    }

    #[test]
    fn equal_keys_keep_input_order_in_both_directions() {
        let mut records = people();
        for c in records.iter_mut() {
            c.contact_owner = "Same".into();
        }
        let asc = evaluate(&records, &SortSpec::ascending(ContactField::ContactOwner));
        let desc = evaluate(&records, &SortSpec::descending(ContactField::ContactOwner));
        assert_eq!(ids(&asc), vec![1, 2, 3]);
        assert_eq!(ids(&desc), vec![1, 2, 3]);
    }

    #[test]
    fn absent_values_sort_as_empty() {
        let mut records = people();
        records[0].contact_status = Some("Lead".into());
        records[2].contact_status = Some("Active".into());
        let asc = evaluate(&records, &SortSpec::ascending(ContactField::ContactStatus));
        assert_eq!(asc[0].id, ContactId(2));
        assert_eq!(ids(&asc), vec![2, 3, 1]);
    }

    #[test]
    fn direction_of_reports_only_sort_column() {
        let spec = SortSpec::descending(ContactField::Phone);
        assert_eq!(
            spec.direction_of(ContactField::Phone),
            Some(SortDirection::Descending)
        );
        assert_eq!(spec.direction_of(ContactField::Name), None);
    }
}

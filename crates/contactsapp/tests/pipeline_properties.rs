use contactsapp::model::{Contact, ContactField, ContactId};
use contactsapp::view::filter::{self, DateMode, FieldSelector, FilterSpec};
use contactsapp::view::pager;
use contactsapp::view::sort::{self, SortSpec};
use proptest::prelude::*;

fn record(id: u64, owner: String, name: String, day: u32, month: u32, year: i32) -> Contact {
    Contact {
        id: ContactId(id),
        contact_owner: owner,
        account_name: format!("{} Ltd", name),
        name: name.clone(),
        email: format!("{}@mail.test", name.to_lowercase()),
        phone: "5550000000".to_string(),
        created_date: format!("{:02}/{:02}/{}", day, month, year),
        contact_source: None,
        contact_status: None,
        contact_bia: None,
    }
}

fn records(max: usize) -> impl Strategy<Value = Vec<Contact>> {
    prop::collection::vec(
        (
            "[ab]{1,2}",
            "[a-zA-Z]{1,8}",
            1u32..=28,
            1u32..=12,
            2018i32..=2026,
            prop::option::of("[A-Za-z]{1,10}"),
        ),
        0..max,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (owner, name, d, m, y, status))| {
                let mut c = record(i as u64 + 1, owner, name, d, m, y);
                c.contact_status = status;
                c
            })
            .collect()
    })
}

fn ids(records: &[Contact]) -> Vec<u64> {
    records.iter().map(|c| c.id.0).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn empty_search_is_identity(rows in records(30)) {
        prop_assert_eq!(filter::evaluate(&rows, &FilterSpec::default()), rows.clone());
        let by_date = FilterSpec::default()
            .with_field(FieldSelector::Field(ContactField::CreatedDate));
        prop_assert_eq!(filter::evaluate(&rows, &by_date), rows);
    }

    #[test]
    fn any_attribute_substring_is_found_by_all_search(
        rows in records(30).prop_filter("non-empty", |r| !r.is_empty()),
        pick in any::<prop::sample::Index>(),
        attribute in any::<prop::sample::Index>(),
        start in 0usize..16,
        len in 1usize..4,
    ) {
        let target = &rows[pick.index(rows.len())];
        let mut values: Vec<String> = ContactField::ALL
            .iter()
            .filter_map(|field| target.get(*field))
            .map(str::to_string)
            .collect();
        values.push(target.id.to_string());
        let value = &values[attribute.index(values.len())];

        let chars: Vec<char> = value.chars().collect();
        let from = start.min(chars.len() - 1);
        let to = (from + len).min(chars.len());
        let term: String = chars[from..to].iter().collect::<String>().to_uppercase();

        let spec = FilterSpec::default().with_search(term);
        let found = filter::evaluate(&rows, &spec);
        prop_assert!(found.iter().any(|c| c.id == target.id));
    }

    #[test]
    fn filter_keeps_input_order(rows in records(30), term in "[a-z]{1,2}") {
        let found = filter::evaluate(&rows, &FilterSpec::default().with_search(term));
        let positions: Vec<usize> = found
            .iter()
            .map(|c| rows.iter().position(|r| r.id == c.id).unwrap())
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn sorting_is_stable_both_ways(rows in records(30)) {
        for spec in [
            SortSpec::ascending(ContactField::ContactOwner),
            SortSpec::descending(ContactField::ContactOwner),
        ] {
            let sorted = sort::evaluate(&rows, &spec);
            for pair in sorted.windows(2) {
                if pair[0].contact_owner == pair[1].contact_owner {
                    prop_assert!(pair[0].id < pair[1].id);
                }
            }
        }
    }

    #[test]
    fn distinct_keys_reverse_exactly(rows in records(30)) {
        // Ids are distinct, so the email built from the name plus id is too.
        let rows: Vec<Contact> = rows
            .into_iter()
            .map(|mut c| {
                c.email = format!("{}{}", c.email, c.id);
                c
            })
            .collect();
        let asc = sort::evaluate(&rows, &SortSpec::ascending(ContactField::Email));
        let mut desc = sort::evaluate(&rows, &SortSpec::descending(ContactField::Email));
        desc.reverse();
        prop_assert_eq!(ids(&asc), ids(&desc));
    }

    #[test]
    fn pages_concatenate_to_whole(rows in records(60), size in 1usize..15) {
        let pages = pager::total_pages(rows.len(), size);
        let mut joined = Vec::new();
        for index in 0..pages {
            let page = pager::page(&rows, size, index);
            prop_assert_eq!(page.can_go_previous, index > 0);
            prop_assert_eq!(page.can_go_next, index + 1 < pages && !rows.is_empty());
            joined.extend_from_slice(page.rows);
        }
        prop_assert_eq!(joined, rows);
    }

    #[test]
    fn jump_always_lands_on_a_page(raw in ".{0,6}", total in 0usize..100, size in 1usize..20) {
        let index = pager::jump_index(&raw, total, size);
        prop_assert!(index < pager::total_pages(total, size));
    }

    #[test]
    fn month_wrap_is_union_of_tails(rows in records(40), start in 1u32..=12, end in 1u32..=12) {
        let spec = FilterSpec::default()
            .with_field(FieldSelector::Field(ContactField::CreatedDate))
            .with_date_mode(DateMode::Month)
            .with_start_bound(&start.to_string())
            .unwrap()
            .with_end_bound(&end.to_string())
            .unwrap();
        let found = ids(&filter::evaluate(&rows, &spec));
        let expected: Vec<u64> = rows
            .iter()
            .filter(|c| {
                let m = c.created_parts().month.unwrap();
                if start <= end { start <= m && m <= end } else { m >= start || m <= end }
            })
            .map(|c| c.id.0)
            .collect();
        prop_assert_eq!(found, expected);
    }

    #[test]
    fn year_start_without_end_is_open(rows in records(40), start in 2018i32..=2026) {
        let spec = FilterSpec::default()
            .with_field(FieldSelector::Field(ContactField::CreatedDate))
            .with_date_mode(DateMode::Year)
            .with_start_bound(&start.to_string())
            .unwrap();
        let found = filter::evaluate(&rows, &spec);
        prop_assert!(found.iter().all(|c| c.created_parts().year.unwrap() >= start));
        let expected = rows
            .iter()
            .filter(|c| c.created_parts().year.unwrap() >= start)
            .count();
        prop_assert_eq!(found.len(), expected);
    }
}

#[test]
fn month_wrap_example() {
    let rows: Vec<Contact> = (1..=12)
        .map(|m| record(m as u64, "a".into(), format!("M{}", m), 1, m, 2024))
        .collect();
    let spec = FilterSpec::default()
        .with_field(FieldSelector::Field(ContactField::CreatedDate))
        .with_date_mode(DateMode::Month)
        .with_start_bound("11")
        .unwrap()
        .with_end_bound("2")
        .unwrap();
    assert_eq!(ids(&filter::evaluate(&rows, &spec)), vec![1, 2, 11, 12]);
}

//! Dashboard summary.
//!
//! The dashboard shows four cards (total, active, pending, recent activity)
//! and a short list of the newest contacts. All of it is computed from the
//! store on request.

use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::Contact;
use crate::store::ContactStore;
use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

/// Days back from today that count as "recent activity".
pub const RECENT_WINDOW_DAYS: i64 = 30;
/// Contacts shown in the "recent contacts" list.
pub const RECENT_LIST_LEN: usize = 5;

/// Key used for contacts without a status or source.
pub const UNSPECIFIED: &str = "Unspecified";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactStats {
    pub total: usize,
    pub active: usize,
    pub pending: usize,
    /// Contacts created within the last [`RECENT_WINDOW_DAYS`] days.
    pub recent_activity: usize,
    pub by_status: BTreeMap<String, usize>,
    pub by_source: BTreeMap<String, usize>,
    /// Newest first by created date; contacts with unreadable dates are left out.
    pub recent: Vec<Contact>,
}

pub fn run<S: ContactStore>(store: &S, today: NaiveDate) -> Result<CmdResult> {
    let stats = compute(&store.list_contacts()?, today);
    Ok(CmdResult {
        stats: Some(stats),
        ..Default::default()
    })
}

pub fn compute(records: &[Contact], today: NaiveDate) -> ContactStats {
    let window_start = today - Duration::days(RECENT_WINDOW_DAYS);

    let mut by_status = BTreeMap::new();
    let mut by_source = BTreeMap::new();
    for contact in records {
        *by_status.entry(bucket(&contact.contact_status)).or_insert(0) += 1;
        *by_source.entry(bucket(&contact.contact_source)).or_insert(0) += 1;
    }

    let mut dated: Vec<(NaiveDate, &Contact)> = records
        .iter()
        .filter_map(|c| c.created_parts().to_date().map(|d| (d, c)))
        .collect();
    // Stable, so contacts created the same day keep store order.
    dated.sort_by(|a, b| b.0.cmp(&a.0));

    ContactStats {
        total: records.len(),
        active: count_status(records, "active"),
        pending: count_status(records, "pending"),
        recent_activity: dated
            .iter()
            .filter(|(d, _)| *d >= window_start && *d <= today)
            .count(),
        by_status,
        by_source,
        recent: dated
            .into_iter()
            .take(RECENT_LIST_LEN)
            .map(|(_, c)| c.clone())
            .collect(),
    }
}

fn bucket(value: &Option<String>) -> String {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(UNSPECIFIED)
        .to_string()
}

fn count_status(records: &[Contact], status: &str) -> usize {
    records
        .iter()
        .filter(|c| {
            c.contact_status
                .as_deref()
                .is_some_and(|s| s.trim().eq_ignore_ascii_case(status))
        })
        .count()
}

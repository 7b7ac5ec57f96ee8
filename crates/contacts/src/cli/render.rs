//! Terminal rendering.
//!
//! Every function here returns a `String`; callers decide where it goes. Colors
//! come from `colored`, which turns itself off when stdout is not a terminal
//! or `NO_COLOR` is set.

use colored::Colorize;
use contactsapp::api::{CmdMessage, CmdResult, ContactStats, MessageLevel};
use contactsapp::error::ContactsError;
use contactsapp::model::{Contact, ContactField};
use contactsapp::view::filter::DateRange;
use contactsapp::view::pager::PageInfo;
use contactsapp::view::sort::{SortDirection, SortSpec};
use contactsapp::view::ViewState;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ID_HEADER: &str = "ID";
const MIN_COLUMN_WIDTH: usize = 6;
const MAX_COLUMN_WIDTH: usize = 28;
const COLUMN_GAP: &str = "  ";
pub const DEFAULT_LINE_WIDTH: usize = 160;

pub fn render_messages(messages: &[CmdMessage]) -> String {
    let mut out = String::new();
    for message in messages {
        let line = match message.level {
            MessageLevel::Info => message.content.dimmed(),
            MessageLevel::Success => message.content.green(),
            MessageLevel::Warning => message.content.yellow(),
            MessageLevel::Error => message.content.red(),
        };
        out.push_str(&format!("{}\n", line));
    }
    out
}

/// Errors, with validation failures broken out one field per line.
pub fn render_error(err: &ContactsError) -> String {
    match err {
        ContactsError::Validation(errors) => {
            let mut out = format!("{}\n", "Contact not saved:".red());
            for (field, problem) in &errors.errors {
                out.push_str(&format!("  {} {}\n", field.label().bold(), problem));
            }
            out
        }
        other => format!("{}\n", other.to_string().red()),
    }
}

/// One page of contacts as a table, with the sort column marked.
pub fn render_table(rows: &[Contact], sort: &SortSpec, line_width: usize) -> String {
    let headers: Vec<String> = std::iter::once(ID_HEADER.to_string())
        .chain(ContactField::ALL.iter().map(|f| header_label(*f, sort)))
        .collect();
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|c| {
            std::iter::once(c.id.to_string())
                .chain(ContactField::ALL.iter().map(|f| c.display_value(*f).to_string()))
                .collect()
        })
        .collect();

    let widths = column_widths(&headers, &cells, line_width);

    let mut out = String::new();
    let header_line = format_line(&headers, &widths);
    out.push_str(&format!("{}\n", header_line.bold()));
    for row in &cells {
        out.push_str(&format_line(row, &widths));
        out.push('\n');
    }
    out
}

/// A list result: the table (when there are rows), the page footer and messages.
pub fn render_listing(result: &CmdResult, sort: &SortSpec, line_width: usize) -> String {
    let mut out = String::new();
    if !result.listed.is_empty() {
        out.push_str(&render_table(&result.listed, sort, line_width));
    }
    if let Some(page) = &result.page {
        out.push_str(&render_page_footer(page));
    }
    out.push_str(&render_messages(&result.messages));
    out
}

pub fn render_page_footer(page: &PageInfo) -> String {
    let mut hints = Vec::new();
    if page.can_go_previous {
        hints.push("prev");
    }
    if page.can_go_next {
        hints.push("next");
    }
    let nav = if hints.is_empty() {
        String::new()
    } else {
        format!("  [{}]", hints.join(" | "))
    };
    format!(
        "{}{}\n",
        format!(
            "Page {} of {} · {} contact{}",
            page.number(),
            page.total_pages,
            page.total_rows,
            if page.total_rows == 1 { "" } else { "s" }
        )
        .dimmed(),
        nav.dimmed()
    )
}

/// One-line summary of the active filter and sort, for the session prompt.
pub fn render_view_summary(state: &ViewState) -> String {
    let filter = &state.filter;
    let mut parts = vec![format!("field: {}", filter.field)];
    if !filter.search.is_empty() {
        parts.push(format!("search: {:?}", filter.search));
    }
    if filter.date_range.is_set() {
        parts.push(format!("dates: {}", describe_range(&filter.date_range)));
    }
    match state.sort {
        SortSpec::Unsorted => {}
        SortSpec::By { field, direction } => parts.push(format!("sort: {} {}", field, direction)),
    }
    format!("{}\n", parts.join(", ").dimmed())
}

pub fn render_stats(stats: &ContactStats) -> String {
    let mut out = String::new();
    let cards = [
        ("Total Contacts", stats.total),
        ("Active Contacts", stats.active),
        ("Pending Actions", stats.pending),
        ("Recent Activity", stats.recent_activity),
    ];
    for (title, value) in cards {
        out.push_str(&format!("{:<18}{}\n", title, value.to_string().bold()));
    }

    for (heading, counts) in [("By status", &stats.by_status), ("By source", &stats.by_source)] {
        out.push_str(&format!("\n{}\n", heading.bold()));
        for (key, count) in counts {
            out.push_str(&format!("  {:<18}{}\n", key, count));
        }
    }

    out.push_str(&format!("\n{}\n", "Recent contacts".bold()));
    if stats.recent.is_empty() {
        out.push_str(&format!("  {}\n", "No contacts yet.".dimmed()));
    }
    for contact in &stats.recent {
        out.push_str(&format!(
            "  {}  {}  {}\n",
            contact.created_date.dimmed(),
            contact.name,
            contact.account_name.dimmed()
        ));
    }
    out
}

fn header_label(field: ContactField, sort: &SortSpec) -> String {
    match sort.direction_of(field) {
        Some(SortDirection::Ascending) => format!("{} ▲", field.label()),
        Some(SortDirection::Descending) => format!("{} ▼", field.label()),
        None => field.label().to_string(),
    }
}

// Columns start at their content width (capped); when the line is too wide,
// the widest columns give up space first, never below MIN_COLUMN_WIDTH.
fn column_widths(headers: &[String], rows: &[Vec<String>], line_width: usize) -> Vec<usize> {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .map(|r| r[i].width())
                .chain(std::iter::once(h.width()))
                .max()
                .unwrap_or(0)
                .min(MAX_COLUMN_WIDTH)
        })
        .collect();

    let gaps = COLUMN_GAP.width() * headers.len().saturating_sub(1);
    let budget = line_width.saturating_sub(gaps);
    while widths.iter().sum::<usize>() > budget {
        let Some((widest, width)) = widths
            .iter()
            .copied()
            .enumerate()
            .max_by_key(|(_, w)| *w)
        else {
            break;
        };
        if width <= MIN_COLUMN_WIDTH {
            break;
        }
        widths[widest] = width - 1;
    }
    widths
}

fn format_line(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| pad_to_width(&truncate_to_width(cell, *width), *width))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP)
        .trim_end()
        .to_string()
}

fn pad_to_width(s: &str, width: usize) -> String {
    format!("{}{}", s, " ".repeat(width.saturating_sub(s.width())))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn describe_range(range: &DateRange) -> String {
    fn bound<T: ToString>(value: Option<T>) -> String {
        value.map_or_else(|| "…".to_string(), |v| v.to_string())
    }
    match *range {
        DateRange::Exact { start, end } => format!("{} to {}", bound(start), bound(end)),
        DateRange::Month { start, end } => format!("months {} to {}", bound(start), bound(end)),
        DateRange::Year { start, end } => format!("years {} to {}", bound(start), bound(end)),
    }
}

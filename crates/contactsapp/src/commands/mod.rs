//! # Command Layer
//!
//! This module contains the **core business logic** of the contacts app. Each
//! command lives in its own submodule and implements plain Rust functions over
//! a [`ContactStore`](crate::store::ContactStore).
//!
//! ## Role and Responsibilities
//!
//! Commands are where the real work happens:
//! - Stamp, insert and patch contacts
//! - Run the filter → sort → page pipeline for a [`ViewState`](crate::view::ViewState)
//! - Write the workbook export and compute dashboard stats
//! - Return a structured [`CmdResult`] with rows and messages
//!
//! ## What Commands Do NOT Do
//!
//! - **Terminal output**: no stdout, stderr or colors
//! - **Argument parsing**: that's the CLI layer's job
//! - **Input validation**: callers run [`crate::validation`] first; commands
//!   trust the contact data they are handed
//! - **Reading the clock**: add takes the id seed and creation date as
//!   arguments, the API facade supplies them
//!
//! ## Structured Returns
//!
//! [`CmdResult`] carries:
//! - `affected`: contacts that were added or edited
//! - `listed`: contacts to display
//! - `page`: pagination metadata for `listed`
//! - `stats`: dashboard summary (for `stats`)
//! - `export_path`: where a workbook was written (for `export`)
//! - `messages`: structured messages with levels (info, success, warning, error)
//!
//! ## Testing Strategy
//!
//! Command tests use [`InMemoryStore`](crate::store::memory::InMemoryStore)
//! and the store fixtures, and check `CmdResult` contents directly.
//!
//! ## Command Modules
//!
//! - [`add`]: Add a new contact
//! - [`edit`]: Patch an existing contact
//! - [`list`]: Derive one page of the contact list
//! - [`export`]: Write the filtered, sorted rows to a workbook
//! - [`stats`]: Dashboard summary

use crate::model::Contact;
use crate::view::pager::PageInfo;
use serde::Serialize;
use std::path::PathBuf;

pub mod add;
pub mod edit;
pub mod export;
pub mod list;
pub mod stats;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CmdResult {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub affected: Vec<Contact>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub listed: Vec<Contact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<PageInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<stats::ContactStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_path: Option<PathBuf>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected(mut self, contacts: Vec<Contact>) -> Self {
        self.affected = contacts;
        self
    }

    pub fn with_listed(mut self, contacts: Vec<Contact>, page: PageInfo) -> Self {
        self.listed = contacts;
        self.page = Some(page);
        self
    }

    /// Whether any message is a warning or error.
    pub fn has_problems(&self) -> bool {
        self.messages
            .iter()
            .any(|m| matches!(m.level, MessageLevel::Warning | MessageLevel::Error))
    }
}

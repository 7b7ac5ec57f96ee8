//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It serves as the
//! single entry point for all contact operations, regardless of the UI being
//! used.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Guards inputs**: new contacts and patches go through
//!   [`crate::validation`] before any command sees them
//! - **Supplies the clock**: ids and creation dates come from the current time
//! - **Applies configuration**: page size and default export path
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: That belongs in `commands/*.rs`
//! - **Hold view state**: every read takes the caller's
//!   [`ViewState`](crate::view::ViewState); the client keeps it between calls
//! - **Presentation concerns**: Returns data structures, not strings
//!
//! ## Generic Over ContactStore
//!
//! `ContactsApi<S: ContactStore>` is generic over the storage backend. The
//! only backend is [`InMemoryStore`], which [`ContactsApi::seeded`] fills from
//! the configured dataset.

use crate::commands;
use crate::config::ContactsConfig;
use crate::error::Result;
use crate::model::{ContactId, ContactPatch, NewContact};
use crate::seed;
use crate::store::memory::InMemoryStore;
use crate::store::ContactStore;
use crate::validation;
use crate::view::ViewState;
use chrono::Local;
use std::path::Path;

/// The main API facade for contact operations.
pub struct ContactsApi<S: ContactStore> {
    store: S,
    config: ContactsConfig,
}

impl ContactsApi<InMemoryStore> {
    /// An in-memory store seeded from `config.seed_file`, or the built-in dataset.
    pub fn seeded(config: ContactsConfig) -> Result<Self> {
        let contacts = seed::load(config.seed_file.as_deref())?;
        tracing::debug!(count = contacts.len(), "seeding contact store");
        Ok(Self::new(InMemoryStore::with_contacts(contacts), config))
    }
}

impl<S: ContactStore> ContactsApi<S> {
    pub fn new(store: S, config: ContactsConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &ContactsConfig {
        &self.config
    }

    pub fn page_size(&self) -> usize {
        self.config.page_size
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn add_contact(&mut self, input: NewContact) -> Result<commands::CmdResult> {
        validation::validate_new(&input)?;
        let now = Local::now();
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        commands::add::run(&mut self.store, input, now.date_naive(), millis)
    }

    pub fn edit_contact(
        &mut self,
        id: ContactId,
        patch: &ContactPatch,
    ) -> Result<commands::CmdResult> {
        validation::validate_patch(patch)?;
        commands::edit::run(&mut self.store, id, patch)
    }

    pub fn list_contacts(&self, state: &ViewState) -> Result<commands::CmdResult> {
        commands::list::run(&self.store, state, self.config.page_size)
    }

    /// Export the rows matching `state` to `path`, or to the configured file.
    pub fn export_contacts(
        &self,
        state: &ViewState,
        path: Option<&Path>,
    ) -> Result<commands::CmdResult> {
        let path = path.unwrap_or(self.config.export_file.as_path());
        commands::export::run(&self.store, state, path)
    }

    pub fn stats(&self) -> Result<commands::CmdResult> {
        commands::stats::run(&self.store, Local::now().date_naive())
    }
}

pub use commands::stats::ContactStats;
pub use commands::{CmdMessage, CmdResult, MessageLevel};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ContactsError;
    use crate::model::ContactField;
    use crate::store::memory::fixtures::StoreFixture;

    fn api() -> ContactsApi<InMemoryStore> {
        ContactsApi::new(
            StoreFixture::new().with_contacts(12).store,
            ContactsConfig {
                page_size: 5,
                ..Default::default()
            },
        )
    }

    fn valid_input() -> NewContact {
        NewContact {
            contact_owner: "Dana".into(),
            account_name: "Acme".into(),
            name: "Zed".into(),
            email: "zed@acme.io".into(),
            phone: "0123456789".into(),
            ..Default::default()
        }
    }

    #[test]
    fn list_uses_configured_page_size() {
        let result = api().list_contacts(&ViewState::new()).unwrap();
        assert_eq!(result.listed.len(), 5);
        assert_eq!(result.page.unwrap().total_pages, 3);
    }

    #[test]
    fn add_validates_before_inserting() {
        let mut api = api();
        let bad = NewContact {
            phone: "12345".into(),
            ..valid_input()
        };
        match api.add_contact(bad) {
            Err(ContactsError::Validation(errors)) => {
                assert!(errors.get(ContactField::Phone).is_some());
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
        assert_eq!(api.store().len(), 12);
    }

    #[test]
    fn add_stamps_today() {
        let mut api = api();
        let result = api.add_contact(valid_input()).unwrap();
        let today = Local::now().date_naive();
        let added = &result.affected[0];
        assert_eq!(added.created_parts().to_date(), Some(today));
        assert_eq!(api.store().list_contacts().unwrap()[0].id, added.id);
    }

    #[test]
    fn edit_validates_present_fields() {
        let mut api = api();
        let patch = ContactPatch {
            email: Some("not-an-email".into()),
            ..Default::default()
        };
        assert!(matches!(
            api.edit_contact(ContactId(1), &patch),
            Err(ContactsError::Validation(_))
        ));
    }

    #[test]
    fn export_defaults_to_configured_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("configured.xlsx");
        let api = ContactsApi::new(
            StoreFixture::new().with_contacts(2).store,
            ContactsConfig {
                export_file: target.clone(),
                ..Default::default()
            },
        );
        let result = api.export_contacts(&ViewState::new(), None).unwrap();
        assert_eq!(result.export_path, Some(target.clone()));
        assert!(target.exists());
    }

    #[test]
    fn seeded_uses_builtin_dataset() {
        let api = ContactsApi::seeded(ContactsConfig::default()).unwrap();
        assert_eq!(api.store().len(), 24);
        assert!(api.stats().unwrap().stats.is_some());
    }
}

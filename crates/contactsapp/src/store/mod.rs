//! # Storage Layer
//!
//! This module defines the storage abstraction for contacts. The
//! [`ContactStore`] trait keeps the command layer independent of where records
//! live.
//!
//! ## Ordering
//!
//! A store is an **ordered** collection. New contacts go to the front, so the
//! natural order is most-recent-first. Edits replace a record in place and never
//! move it.
//!
//! ## Identity
//!
//! Identifiers are unique within a store. [`ContactStore::insert_contact`]
//! rejects a duplicate instead of silently shadowing the older record, and
//! [`ContactStore::next_id`] hands out fresh, time-based ids.
//!
//! ## Lost Edits
//!
//! Updating an id that is not in the store is not an error: the store is left
//! untouched and [`UpdateOutcome::NotFound`] tells the caller nothing happened.
//!
//! ## Implementations
//!
//! - [`memory::InMemoryStore`]: the only backend. Contacts live for the
//!   lifetime of the process and are seeded from the fixed dataset at startup.
//!
//! A store is owned by a single [`crate::api::ContactsApi`] and mutated through
//! `&mut self`. Sharing one store between concurrent sessions would need a lock
//! around insert/update.

use crate::error::Result;
use crate::model::{Contact, ContactId, ContactPatch};

pub mod memory;

/// What an update did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The record after the patch was applied.
    Updated(Contact),
    /// No record had the requested id; the store is unchanged.
    NotFound,
}

/// Abstract interface for contact storage.
pub trait ContactStore {
    /// All contacts, in store order (most recent first)
    fn list_contacts(&self) -> Result<Vec<Contact>>;

    /// Get a contact by ID
    fn get_contact(&self, id: ContactId) -> Result<Contact>;

    /// Prepend a contact whose id and created date are already stamped
    fn insert_contact(&mut self, contact: Contact) -> Result<()>;

    /// Merge `patch` over the contact with `id`, keeping its position
    fn update_contact(&mut self, id: ContactId, patch: &ContactPatch) -> Result<UpdateOutcome>;

    /// A fresh id derived from `now_millis`, unique within this store
    fn next_id(&self, now_millis: u64) -> ContactId;
}

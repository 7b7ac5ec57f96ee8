use super::{ContactStore, UpdateOutcome};
use crate::error::{ContactsError, Result};
use crate::model::{Contact, ContactId, ContactPatch};

#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    contacts: Vec<Contact>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with records in their given order.
    ///
    /// Later duplicates of an id are dropped so the store starts consistent.
    pub fn with_contacts(contacts: Vec<Contact>) -> Self {
        let mut seen = std::collections::HashSet::new();
        let contacts: Vec<Contact> = contacts
            .into_iter()
            .filter(|c| {
                let fresh = seen.insert(c.id);
                if !fresh {
                    tracing::warn!(id = %c.id, "dropping seed contact with duplicate id");
                }
                fresh
            })
            .collect();
        Self { contacts }
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }
}

impl ContactStore for InMemoryStore {
    fn list_contacts(&self) -> Result<Vec<Contact>> {
        Ok(self.contacts.clone())
    }

    fn get_contact(&self, id: ContactId) -> Result<Contact> {
        self.contacts
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(ContactsError::ContactNotFound(id))
    }

    fn insert_contact(&mut self, contact: Contact) -> Result<()> {
        if self.contacts.iter().any(|c| c.id == contact.id) {
            return Err(ContactsError::DuplicateId(contact.id));
        }
        self.contacts.insert(0, contact);
        Ok(())
    }

    fn update_contact(&mut self, id: ContactId, patch: &ContactPatch) -> Result<UpdateOutcome> {
        match self.contacts.iter_mut().find(|c| c.id == id) {
            Some(contact) => {
                contact.apply(patch);
                Ok(UpdateOutcome::Updated(contact.clone()))
            }
            None => {
                tracing::warn!(%id, "update ignored: no contact with this id");
                Ok(UpdateOutcome::NotFound)
            }
        }
    }

    fn next_id(&self, now_millis: u64) -> ContactId {
        let max = self.contacts.iter().map(|c| c.id.0).max().unwrap_or(0);
        match max.checked_add(1) {
            Some(after_max) => ContactId(now_millis.max(after_max)),
            // The top of the id space is taken; reuse the smallest free id.
            None => ContactId(
                (1..=u64::MAX)
                    .find(|candidate| !self.contacts.iter().any(|c| c.id.0 == *candidate))
                    .unwrap_or(0),
            ),
        }
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    /// A contact with every required field filled in from `name`.
    pub fn contact(id: u64, name: &str, created_date: &str) -> Contact {
        let slug = name.to_lowercase().replace(' ', ".");
        Contact {
            id: ContactId(id),
            contact_owner: "Owner".to_string(),
            account_name: format!("{} Account", name),
            name: name.to_string(),
            email: format!("{}@example.com", slug),
            phone: "5550000000".to_string(),
            created_date: created_date.to_string(),
            contact_source: None,
            contact_status: None,
            contact_bia: None,
        }
    }

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        /// Appends in store order: the first contact added is listed first.
        pub fn with_contact(mut self, contact: Contact) -> Self {
            self.store.contacts.push(contact);
            self
        }

        pub fn with_named(self, id: u64, name: &str, created_date: &str) -> Self {
            self.with_contact(contact(id, name, created_date))
        }

        /// `count` contacts with ids 1..=count, one per month of 2024.
        pub fn with_contacts(mut self, count: usize) -> Self {
            for i in 0..count {
                let month = (i % 12) + 1;
                let created = format!("{:02}/{:02}/2024", (i % 28) + 1, month);
                self = self.with_named(i as u64 + 1, &format!("Contact {:03}", i + 1), &created);
            }
            self
        }
    }
}

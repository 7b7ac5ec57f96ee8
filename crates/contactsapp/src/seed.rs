//! The dataset a store starts from.
//!
//! A fixed set of contacts ships inside the library (`data/contacts.json`). A
//! different JSON file with the same shape (an array of camelCase contact
//! objects) can replace it at startup.

use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::model::Contact;

const BUILTIN: &str = include_str!("../data/contacts.json");

/// The built-in contacts, in display order.
pub fn builtin() -> Result<Vec<Contact>> {
    Ok(serde_json::from_str(BUILTIN)?)
}

/// Contacts from `path`, or the built-in dataset when no path is given.
pub fn load(path: Option<&Path>) -> Result<Vec<Contact>> {
    match path {
        Some(path) => {
            let raw = fs::read_to_string(path)?;
            let contacts: Vec<Contact> = serde_json::from_str(&raw)?;
            tracing::debug!(path = %path.display(), count = contacts.len(), "loaded seed file");
            Ok(contacts)
        }
        None => builtin(),
    }
}

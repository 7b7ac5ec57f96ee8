//! Contact input validation.
//!
//! The add/edit commands trust their caller. Clients run these checks first
//! and show the failures next to the offending fields.
//!
//! Rules:
//! - Contact Owner, Account Name and Name are required (non-blank)
//! - Email is required and must look like `local@domain` (no whitespace)
//! - Phone is required and must be exactly 10 ASCII digits
//! - Contact Source, Contact Status and Contact Bia are free text

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

use crate::error::{ContactsError, Result};
use crate::model::{ContactField, ContactPatch, NewContact};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\S+@\S+$").expect("valid email regex"));
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("valid phone regex"));

/// Why a single field was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    Required,
    InvalidEmail,
    InvalidPhone,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::Required => write!(f, "is required"),
            FieldError::InvalidEmail => write!(f, "must be a valid email address"),
            FieldError::InvalidPhone => write!(f, "must be 10 digits"),
        }
    }
}

/// Every field failure found in one input, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    pub errors: Vec<(ContactField, FieldError)>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn get(&self, field: ContactField) -> Option<&FieldError> {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, err)| err)
    }

    fn push(&mut self, field: ContactField, err: FieldError) {
        self.errors.push((field, err));
    }

    fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ContactsError::Validation(self))
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|(field, err)| format!("{} {}", field.label(), err))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Validates a complete new contact.
///
/// # Examples
/// ```
/// use contactsapp::model::NewContact;
/// use contactsapp::validation::validate_new;
///
/// let mut input = NewContact {
///     contact_owner: "Priya".into(),
///     account_name: "Globex".into(),
///     name: "Hank".into(),
///     email: "hank@globex.com".into(),
///     phone: "5551234567".into(),
///     ..Default::default()
/// };
/// assert!(validate_new(&input).is_ok());
///
/// input.phone = "555-1234".into();
/// assert!(validate_new(&input).is_err());
/// ```
pub fn validate_new(input: &NewContact) -> Result<()> {
    let mut errors = ValidationErrors::default();
    check(&mut errors, ContactField::ContactOwner, &input.contact_owner);
    check(&mut errors, ContactField::AccountName, &input.account_name);
    check(&mut errors, ContactField::Name, &input.name);
    check(&mut errors, ContactField::Email, &input.email);
    check(&mut errors, ContactField::Phone, &input.phone);
    errors.into_result()
}

/// Validates only the fields a patch sets.
pub fn validate_patch(patch: &ContactPatch) -> Result<()> {
    let mut errors = ValidationErrors::default();
    for (field, value) in patch.fields() {
        check(&mut errors, field, value);
    }
    errors.into_result()
}

fn check(errors: &mut ValidationErrors, field: ContactField, value: &str) {
    let required = matches!(
        field,
        ContactField::ContactOwner
            | ContactField::AccountName
            | ContactField::Name
            | ContactField::Email
            | ContactField::Phone
    );
    if required && value.trim().is_empty() {
        errors.push(field, FieldError::Required);
        return;
    }
    match field {
        ContactField::Email if !EMAIL_RE.is_match(value) => {
            errors.push(field, FieldError::InvalidEmail)
        }
        ContactField::Phone if !PHONE_RE.is_match(value) => {
            errors.push(field, FieldError::InvalidPhone)
        }
        _ => {}
    }
}

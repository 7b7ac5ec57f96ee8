//! # Domain Model: Contacts and Their Fields
//!
//! This module defines the core record type, [`Contact`], its identifier
//! [`ContactId`], and the fixed set of user-visible fields, [`ContactField`].
//!
//! ## Field Order
//!
//! Every client shows the same nine fields in the same order, each with a
//! display label and an attribute key (the key is also the JSON name):
//!
//! | Label          | Key             | Required |
//! |----------------|-----------------|----------|
//! | Contact Owner  | `contactOwner`  | yes      |
//! | Account Name   | `accountName`   | yes      |
//! | Name           | `name`          | yes      |
//! | Email          | `email`         | yes      |
//! | Phone          | `phone`         | yes      |
//! | Created Date   | `createdDate`   | stamped  |
//! | Contact Source | `contactSource` | no       |
//! | Contact Status | `contactStatus` | no       |
//! | Contact Bia    | `contactBia`    | no       |
//!
//! ## Identity and Creation Date
//!
//! A contact's `id` and `createdDate` are assigned once, when the contact is
//! added, and never change. [`ContactPatch`] has no slot for either, so an
//! edit cannot touch them.
//!
//! ## Created Date Format
//!
//! `createdDate` is stored as text in `DD/MM/YYYY`. Seed data is not trusted to
//! be well formed, so [`DateParts`] parses each component independently and a
//! bad component only disables the comparisons that need it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ContactsError;

pub const CREATED_DATE_FORMAT: &str = "%d/%m/%Y";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(pub u64);

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ContactId {
    type Err = ContactsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse()
            .map(ContactId)
            .map_err(|_| ContactsError::Api(format!("Invalid contact id: {}", s)))
    }
}

/// The user-visible contact fields, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContactField {
    ContactOwner,
    AccountName,
    Name,
    Email,
    Phone,
    CreatedDate,
    ContactSource,
    ContactStatus,
    ContactBia,
}

impl ContactField {
    pub const ALL: [ContactField; 9] = [
        ContactField::ContactOwner,
        ContactField::AccountName,
        ContactField::Name,
        ContactField::Email,
        ContactField::Phone,
        ContactField::CreatedDate,
        ContactField::ContactSource,
        ContactField::ContactStatus,
        ContactField::ContactBia,
    ];

    /// Attribute key, as used in JSON and on the command line.
    pub fn key(self) -> &'static str {
        match self {
            ContactField::ContactOwner => "contactOwner",
            ContactField::AccountName => "accountName",
            ContactField::Name => "name",
            ContactField::Email => "email",
            ContactField::Phone => "phone",
            ContactField::CreatedDate => "createdDate",
            ContactField::ContactSource => "contactSource",
            ContactField::ContactStatus => "contactStatus",
            ContactField::ContactBia => "contactBia",
        }
    }

    /// Column header shown to users and written to exports.
    pub fn label(self) -> &'static str {
        match self {
            ContactField::ContactOwner => "Contact Owner",
            ContactField::AccountName => "Account Name",
            ContactField::Name => "Name",
            ContactField::Email => "Email",
            ContactField::Phone => "Phone",
            ContactField::CreatedDate => "Created Date",
            ContactField::ContactSource => "Contact Source",
            ContactField::ContactStatus => "Contact Status",
            ContactField::ContactBia => "Contact Bia",
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// Keys and labels both parse, ignoring case, spaces, dashes and underscores:
// "contactOwner", "Contact Owner" and "contact-owner" are the same field.
impl FromStr for ContactField {
    type Err = ContactsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = squash(s);
        ContactField::ALL
            .into_iter()
            .find(|field| squash(field.key()) == wanted || squash(field.label()) == wanted)
            .ok_or_else(|| ContactsError::InvalidField(s.to_string()))
    }
}

fn squash(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: ContactId,
    pub contact_owner: String,
    pub account_name: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub created_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_bia: Option<String>,
}

impl Contact {
    /// Build a new contact from validated input, stamping id and creation date.
    pub fn new(id: ContactId, created: NaiveDate, input: NewContact) -> Self {
        Self {
            id,
            contact_owner: input.contact_owner,
            account_name: input.account_name,
            name: input.name,
            email: input.email,
            phone: input.phone,
            created_date: format_created_date(created),
            contact_source: non_empty(input.contact_source),
            contact_status: non_empty(input.contact_status),
            contact_bia: non_empty(input.contact_bia),
        }
    }

    /// The value of a field, or `None` when an optional field is absent.
    pub fn get(&self, field: ContactField) -> Option<&str> {
        match field {
            ContactField::ContactOwner => Some(&self.contact_owner),
            ContactField::AccountName => Some(&self.account_name),
            ContactField::Name => Some(&self.name),
            ContactField::Email => Some(&self.email),
            ContactField::Phone => Some(&self.phone),
            ContactField::CreatedDate => Some(&self.created_date),
            ContactField::ContactSource => self.contact_source.as_deref(),
            ContactField::ContactStatus => self.contact_status.as_deref(),
            ContactField::ContactBia => self.contact_bia.as_deref(),
        }
    }

    /// The value of a field with absent values shown as an empty string.
    pub fn display_value(&self, field: ContactField) -> &str {
        self.get(field).unwrap_or("")
    }

    pub fn created_parts(&self) -> DateParts {
        DateParts::parse(&self.created_date)
    }

    /// Shallow-merge the fields present in `patch` over this contact.
    pub fn apply(&mut self, patch: &ContactPatch) {
        if let Some(v) = &patch.contact_owner {
            self.contact_owner = v.clone();
        }
        if let Some(v) = &patch.account_name {
            self.account_name = v.clone();
        }
        if let Some(v) = &patch.name {
            self.name = v.clone();
        }
        if let Some(v) = &patch.email {
            self.email = v.clone();
        }
        if let Some(v) = &patch.phone {
            self.phone = v.clone();
        }
        if let Some(v) = &patch.contact_source {
            self.contact_source = non_empty(Some(v.clone()));
        }
        if let Some(v) = &patch.contact_status {
            self.contact_status = non_empty(Some(v.clone()));
        }
        if let Some(v) = &patch.contact_bia {
            self.contact_bia = non_empty(Some(v.clone()));
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Fields supplied by a client when adding a contact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContact {
    pub contact_owner: String,
    pub account_name: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub contact_source: Option<String>,
    #[serde(default)]
    pub contact_status: Option<String>,
    #[serde(default)]
    pub contact_bia: Option<String>,
}

/// A partial edit. `None` leaves the existing value in place.
///
/// For the optional fields, `Some("")` clears the value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPatch {
    pub contact_owner: Option<String>,
    pub account_name: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub contact_source: Option<String>,
    pub contact_status: Option<String>,
    pub contact_bia: Option<String>,
}

impl ContactPatch {
    pub fn is_empty(&self) -> bool {
        *self == ContactPatch::default()
    }

    /// The patched fields paired with their new values, in display order.
    pub fn fields(&self) -> Vec<(ContactField, &str)> {
        [
            (ContactField::ContactOwner, &self.contact_owner),
            (ContactField::AccountName, &self.account_name),
            (ContactField::Name, &self.name),
            (ContactField::Email, &self.email),
            (ContactField::Phone, &self.phone),
            (ContactField::ContactSource, &self.contact_source),
            (ContactField::ContactStatus, &self.contact_status),
            (ContactField::ContactBia, &self.contact_bia),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_deref().map(|v| (field, v)))
        .collect()
    }
}

pub fn format_created_date(date: NaiveDate) -> String {
    date.format(CREATED_DATE_FORMAT).to_string()
}

/// The components of a `DD/MM/YYYY` date, each parsed on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateParts {
    pub day: Option<u32>,
    pub month: Option<u32>,
    pub year: Option<i32>,
}

impl DateParts {
    pub fn parse(raw: &str) -> Self {
        let mut parts = raw.split('/');
        let day = parts.next().and_then(leading_int).and_then(to_u32);
        let month = parts.next().and_then(leading_int).and_then(to_u32);
        let year = parts
            .next()
            .and_then(leading_int)
            .and_then(|v| i32::try_from(v).ok());
        Self { day, month, year }
    }

    /// The full calendar date, if all three components form a real date.
    pub fn to_date(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year?, self.month?, self.day?)
    }
}

fn to_u32(v: i64) -> Option<u32> {
    u32::try_from(v).ok()
}

// Accepts leading whitespace, an optional sign and a run of digits; trailing
// garbage is ignored ("03x" is 3), an empty digit run is not a number.
pub(crate) fn leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (sign, rest) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<i64>().ok().map(|v| sign * v)
}

use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Contact, NewContact};
use crate::store::ContactStore;
use chrono::NaiveDate;

/// Stamp `input` with a fresh id and `today` as its creation date, then
/// prepend it to the store.
pub fn run<S: ContactStore>(
    store: &mut S,
    input: NewContact,
    today: NaiveDate,
    now_millis: u64,
) -> Result<CmdResult> {
    let id = store.next_id(now_millis);
    let contact = Contact::new(id, today, input);
    store.insert_contact(contact.clone())?;

    tracing::info!(%id, name = %contact.name, "contact added");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Contact added: {} ({})",
        contact.name, contact.id
    )));
    Ok(result.with_affected(vec![contact]))
}

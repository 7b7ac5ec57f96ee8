use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{ContactId, ContactPatch};
use crate::store::{ContactStore, UpdateOutcome};

/// Merge `patch` into the contact with `id`.
///
/// An unknown id leaves the store untouched; the result then has no affected
/// contacts and carries a warning instead of failing.
pub fn run<S: ContactStore>(store: &mut S, id: ContactId, patch: &ContactPatch) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    if patch.is_empty() {
        result.add_message(CmdMessage::info("Nothing to change."));
        return Ok(result);
    }

    match store.update_contact(id, patch)? {
        UpdateOutcome::Updated(contact) => {
            let changed: Vec<&str> = patch.fields().iter().map(|(f, _)| f.label()).collect();
            tracing::info!(%id, fields = ?changed, "contact updated");
            result.add_message(CmdMessage::success(format!(
                "Contact updated: {} ({})",
                contact.name,
                changed.join(", ")
            )));
            Ok(result.with_affected(vec![contact]))
        }
        UpdateOutcome::NotFound => {
            result.add_message(CmdMessage::warning(format!(
                "No contact with id {}; nothing was changed.",
                id
            )));
            Ok(result)
        }
    }
}

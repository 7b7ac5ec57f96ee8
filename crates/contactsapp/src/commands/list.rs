use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::ContactStore;
use crate::view::{derive_view, ViewState};

pub fn run<S: ContactStore>(store: &S, state: &ViewState, page_size: usize) -> Result<CmdResult> {
    let records = store.list_contacts()?;
    let view = derive_view(&records, state, page_size);

    let mut result = CmdResult::default();
    if view.rows.is_empty() {
        let msg = if records.is_empty() {
            "No contacts yet."
        } else {
            "No contacts match the current filter."
        };
        result.add_message(CmdMessage::info(msg));
    }
    Ok(result.with_listed(view.rows, view.page))
}

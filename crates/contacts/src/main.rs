//! # Contacts CLI
//!
//! The `contacts` binary is a terminal client for the `contactsapp` library.
//! This file only invokes `cli::run()` and handles process termination; the
//! CLI itself lives in `src/cli/`.
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/contacts/src/cli/)                       │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Dispatch, logging and config wiring (commands.rs)        │
//! │  - Table and message rendering (render.rs)                  │
//! │  - Interactive session (session.rs)                         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (crates/contactsapp/src/api.rs)                  │
//! │  - Validates input, dispatches to command modules           │
//! │  - Returns structured `CmdResult` values                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The CLI owns every user-facing concern: argument parsing, the current
//! `ViewState` of a session, rendering, error messages and exit codes.
//!
//! ## No Persistence
//!
//! Each invocation seeds a fresh in-memory store. One-shot `add` and `edit`
//! show their result and are gone when the process exits; use `session` to
//! add, edit and browse against the same store.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

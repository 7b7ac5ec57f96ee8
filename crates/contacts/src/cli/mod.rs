//! # CLI Behavior
//!
//! This is **one possible UI client** for contacts, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes, and
//! output formatting. For the overall architecture, see the `contactsapp`
//! crate documentation.
//!
//! ## Naked Execution (`contacts`)
//!
//! Running `contacts` with no arguments is `contacts list`: the first page of
//! the seeded contacts, unfiltered and in store order.
//!
//! ## One Store Per Process
//!
//! Every invocation starts from the seed dataset (built in, or `--seed FILE`)
//! and keeps its contacts in memory. Nothing is written back, so an `add` or
//! `edit` lasts exactly as long as the process. `contacts session` is the way
//! to add a contact and then search, sort and export it in one go.
//!
//! ## Filter Flags
//!
//! `list` and `export` share the same filter flags. `--from`/`--to` are read
//! according to `--date-mode` (exact `YYYY-MM-DD`, month `1-12` or year) and
//! imply `--field createdDate` when no field is given. A bound that does not
//! parse for its mode is an error, not an empty result.
//!
//! ## Output
//!
//! - Tables are fitted to the terminal width; cells are truncated by display
//!   width, not byte length.
//! - `--json` on `list` and `stats` prints the structured command result.
//! - Success, warning and error messages are colored by level.

mod commands;
mod render;
mod session;
pub mod setup;

pub use commands::run;

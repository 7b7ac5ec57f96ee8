//! # Contacts Architecture
//!
//! `contactsapp` is a **UI-agnostic contact-management library**: an ordered
//! contact store plus the filter → sort → page pipeline that backs a contact
//! list view, workbook export and a small dashboard summary. The `contacts`
//! binary is one client of it; nothing here assumes a terminal.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Client (the `contacts` binary, or any other UI)            │
//! │  - Parses input, renders output, owns the ViewState         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Validates input, supplies clock and configuration        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - add, edit, list, export, stats                           │
//! │  - Returns structured CmdResult values                      │
//! └─────────────────────────────────────────────────────────────┘
//!                 │                              │
//!                 ▼                              ▼
//! ┌───────────────────────────────┐  ┌──────────────────────────┐
//! │  View Pipeline (view/)        │  │  Storage Layer (store/)  │
//! │  filter → sort → page         │  │  ContactStore trait,     │
//! │  pure functions over slices   │  │  InMemoryStore           │
//! └───────────────────────────────┘  └──────────────────────────┘
//! ```
//!
//! ## Key Principle: Derived, Never Cached
//!
//! The visible rows are a pure function of the stored records and a
//! [`view::ViewState`]. Every read recomputes the pipeline, so a view can never
//! go stale after an add or an edit.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`view`]: Filter, sort and pagination pipeline
//! - [`store`]: Storage abstraction and the in-memory store
//! - [`model`]: Core data types (`Contact`, `ContactField`, `ContactPatch`)
//! - [`validation`]: Input rules for new contacts and edits
//! - [`seed`]: The dataset a store starts from
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod seed;
pub mod store;
pub mod validation;
pub mod view;

//! # Passage Architecture
//!
//! Passage manages the content templates of an IELTS-style test centre: reading,
//! listening, writing and speaking sections whose passages embed inline question
//! placeholders, together with their answer keys. It is a library with a CLI client,
//! not the other way round.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, parses index strings          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Business logic over Rust types, returns CmdResult        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - DataStore trait: FileStore, InMemoryStore                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Underneath all of them sits [`placeholder`], the pure text codec that finds question
//! references in a passage and converts between the storage form `{{N}kind}` and the
//! editing form `⟦QN:kind⟧`. Everything that either persists or shows content goes
//! through it: the store only ever writes storage form, the editor only ever shows
//! display form.
//!
//! ## No I/O in the Core
//!
//! From `api.rs` inward, code never writes to stdout/stderr and never exits the
//! process. Diagnostics go through `tracing`; user-facing outcomes travel back as
//! `CmdMessage`s.
//!
//! ## Module Overview
//!
//! - [`placeholder`]: Placeholder extraction and form conversion
//! - [`answers`]: Answer keys and coverage of a passage
//! - [`grading`]: Scoring submissions against a key
//! - [`api`]: The API facade
//! - [`commands`]: Business logic for each command
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`Section`, `ModuleKind`, `AnswerKey`)
//! - [`index`]: Display indexing (1-based, oldest first)
//! - [`config`]: Configuration and store location
//! - [`editor`]: External editor integration
//! - [`error`]: Error types

pub mod answers;
pub mod api;
pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod grading;
pub mod index;
pub mod model;
pub mod placeholder;
pub mod store;

//! AI-assisted checklist generation pipeline.
//!
//! # Responsibility
//! - Build the structured prompt and talk to the text-generation model.
//! - Recover a bounded item array from the raw model text.
//! - Persist the recovered drafts in two phases with partial-failure
//!   reporting.
//!
//! # Invariants
//! - Generation and parse failures are terminal and never reach the
//!   persistence phases.
//! - A checklist that was created before the item phase failed survives.

pub mod client;
pub mod ingest;
pub mod parser;

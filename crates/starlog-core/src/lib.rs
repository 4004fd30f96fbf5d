// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the starlog experience journal.
//!
//! This crate holds the domain model (experience records, the strength
//! vocabulary, activity dates), the submission validator, the display
//! rules for the result table, and the [`ExperienceStore`] trait that the
//! concrete backend implements.

pub mod date;
pub mod display;
pub mod error;
pub mod record;
pub mod store;
pub mod strength;
pub mod validate;

// Re-export key items at crate root for ergonomic imports.
pub use date::{ActivityDate, normalize};
pub use error::StarlogError;
pub use record::{ExperienceRecord, NewExperience, Scope, StoreIdentity};
pub use store::{ExperienceStore, HealthStatus, InsertStream, ListFilter};
pub use strength::{STRENGTH_VOCABULARY, StrengthSelection};
pub use validate::{ExperienceDraft, ValidationError, validate};

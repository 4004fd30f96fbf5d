// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The declarative read plan behind the schema-tolerant list query.
//!
//! The result list wants the `scope` column, but deployments predating that
//! column reject a select naming it. Listing required and optional columns
//! in one place keeps the two attempts from diverging.

/// Required and optional columns for a select against one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadPlan {
    required: &'static [&'static str],
    optional: &'static [&'static str],
}

impl ReadPlan {
    pub const fn new(
        required: &'static [&'static str],
        optional: &'static [&'static str],
    ) -> Self {
        Self { required, optional }
    }

    /// The select list including optional columns (first attempt).
    pub fn full_columns(&self) -> String {
        self.required
            .iter()
            .chain(self.optional.iter())
            .copied()
            .collect::<Vec<_>>()
            .join(",")
    }

    /// The select list with optional columns omitted (narrowed retry).
    pub fn required_columns(&self) -> String {
        self.required.join(",")
    }

    /// Whether a narrowed retry is any different from the first attempt.
    pub fn has_optional(&self) -> bool {
        !self.optional.is_empty()
    }
}

/// The plan for the `experiences` table. `scope` is the column that may not
/// exist on older deployments.
pub const EXPERIENCES_PLAN: ReadPlan = ReadPlan::new(
    &[
        "id",
        "title",
        "activity_on",
        "description",
        "strengths",
        "star_s",
        "star_t",
        "star_a",
        "star_r",
        "created_at",
        "user_id",
    ],
    &["scope"],
);

// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Activity-date normalization between the entry form and the store.
//!
//! Dates are typed as `YYYY.MM.DD` and persisted as `YYYY-MM-DD`. Only the
//! shape is checked: digit counts and dots. `2024.13.40` is syntactically
//! valid and passes through unchanged.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static DOTTED_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})\.(\d{2})\.(\d{2})$").unwrap());

static ISO_DATE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})").unwrap());

/// A normalized activity date in ISO `YYYY-MM-DD` form.
///
/// Only constructible through [`normalize`], so a value of this type is
/// always the hyphenated transform of a well-shaped dotted input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityDate(String);

impl ActivityDate {
    /// The stored ISO form, e.g. `2024-03-05`.
    pub fn as_iso(&self) -> &str {
        &self.0
    }

    /// The display form, e.g. `2024.03.05`.
    pub fn dotted(&self) -> String {
        dotted_display(&self.0)
    }
}

impl fmt::Display for ActivityDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalizes a human-entered date.
///
/// Strips all whitespace, then accepts exactly four digits, a dot, two
/// digits, a dot, two digits. Returns `None` for anything else; callers
/// treat that as a validation failure.
pub fn normalize(input: &str) -> Option<ActivityDate> {
    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    let caps = DOTTED_DATE.captures(&compact)?;
    Some(ActivityDate(format!("{}-{}-{}", &caps[1], &caps[2], &caps[3])))
}

/// Renders a stored value back in dotted display form.
///
/// Values starting with an ISO date become `YYYY.MM.DD`; anything else is
/// returned verbatim, so unexpected legacy content still displays.
pub fn dotted_display(stored: &str) -> String {
    match ISO_DATE_PREFIX.captures(stored) {
        Some(caps) => format!("{}.{}.{}", &caps[1], &caps[2], &caps[3]),
        None => stored.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn accepts_exact_dotted_form() {
        let date = normalize("2024.03.05").unwrap();
        assert_eq!(date.as_iso(), "2024-03-05");
        assert_eq!(date.dotted(), "2024.03.05");
    }

    #[test]
    fn strips_all_whitespace_before_matching() {
        let date = normalize("  2024 . 03\t. 05\n").unwrap();
        assert_eq!(date.as_iso(), "2024-03-05");
    }

    #[test]
    fn does_not_check_calendar_validity() {
        // Shape-only contract: month 13, day 40 pass through.
        assert_eq!(normalize("2024.13.40").unwrap().as_iso(), "2024-13-40");
    }

    #[test]
    fn rejects_wrong_shapes() {
        for input in [
            "",
            "2024-03-05",
            "2024.3.05",
            "2024.03.5",
            "24.03.05",
            "2024.03.055",
            "2024.03",
            "abcd.ef.gh",
            "2024.03.05.",
        ] {
            assert!(normalize(input).is_none(), "accepted {input:?}");
        }
    }

    #[test]
    fn dotted_display_handles_iso_prefixes_and_junk() {
        assert_eq!(dotted_display("2024-03-05"), "2024.03.05");
        assert_eq!(dotted_display("2024-03-05T00:00:00"), "2024.03.05");
        assert_eq!(dotted_display("sometime in march"), "sometime in march");
        assert_eq!(dotted_display(""), "");
    }

    proptest! {
        #[test]
        fn well_shaped_inputs_round_trip_digits(y in 0u32..10000, m in 0u32..100, d in 0u32..100) {
            let input = format!("{y:04}.{m:02}.{d:02}");
            let date = normalize(&input).unwrap();
            prop_assert_eq!(date.as_iso(), format!("{y:04}-{m:02}-{d:02}"));
            prop_assert_eq!(date.dotted(), input);
        }

        #[test]
        fn arbitrary_strings_never_panic(input in ".*") {
            let _ = normalize(&input);
            let _ = dotted_display(&input);
        }
    }
}

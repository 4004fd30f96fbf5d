// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The fixed strength vocabulary and the capped selection over it.

/// The fixed, ordered vocabulary of strength tags offered by the form.
pub const STRENGTH_VOCABULARY: [&str; 15] = [
    "내적동기",
    "감성",
    "창의적 사고",
    "의사소통",
    "자기관리",
    "복합적 문제해결",
    "글로벌 마인드",
    "자기효능",
    "지식정보효능",
    "리더쉽",
    "윤리의식",
    "비판적 사고",
    "협업",
    "프레젠테이션",
    "자원 관리 능력",
];

/// Whether `label` is one of the fifteen vocabulary entries.
pub fn is_known_strength(label: &str) -> bool {
    STRENGTH_VOCABULARY.contains(&label)
}

/// A bounded multi-select over [`STRENGTH_VOCABULARY`].
///
/// Holds at most [`StrengthSelection::MAX_SELECTED`] labels in insertion
/// order. The cap is enforced at selection time: a toggle that would add a
/// fourth label is refused, never truncated after the fact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StrengthSelection {
    selected: Vec<String>,
}

impl StrengthSelection {
    /// The selection cap.
    pub const MAX_SELECTED: usize = 3;

    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a selection from submitted form values.
    ///
    /// Replays the selection rules over whatever the client sent: unknown
    /// labels and duplicates are skipped, and the cap still applies. The
    /// result therefore upholds the same invariants as an interactive
    /// selection regardless of input.
    pub fn from_submitted<I>(labels: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut selection = Self::new();
        for label in labels {
            let label = label.as_ref();
            if is_known_strength(label) && !selection.is_selected(label) {
                selection.toggle(label);
            }
        }
        selection
    }

    /// Toggles `label`: removes it when present, appends it when absent and
    /// the cap allows. Returns whether the selection changed (a toggle
    /// against a full selection is a no-op).
    pub fn toggle(&mut self, label: &str) -> bool {
        if let Some(position) = self.selected.iter().position(|s| s == label) {
            self.selected.remove(position);
            return true;
        }
        if self.selected.len() >= Self::MAX_SELECTED {
            return false;
        }
        self.selected.push(label.to_string());
        true
    }

    /// Removes `label` if present; does nothing otherwise.
    pub fn remove(&mut self, label: &str) {
        self.selected.retain(|s| s != label);
    }

    pub fn is_selected(&self, label: &str) -> bool {
        self.selected.iter().any(|s| s == label)
    }

    /// Whether the cap has been reached, i.e. unselected entries should
    /// render disabled.
    pub fn is_full(&self) -> bool {
        self.selected.len() >= Self::MAX_SELECTED
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// The selected labels in insertion order.
    pub fn labels(&self) -> &[String] {
        &self.selected
    }

    pub fn into_labels(self) -> Vec<String> {
        self.selected
    }
}

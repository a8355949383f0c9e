//! Named roll presets.

use serde::{Deserialize, Serialize};

use crate::dice::{self, DieSource, RollResult};
use crate::error::{MechError, MechResult};

/// Most presets a book keeps.
pub const PRESET_CAPACITY: usize = 12;

/// A user-defined named formula.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollPreset {
    /// Unique name.
    pub name: String,
    /// A formula that parses.
    pub formula: String,
}

/// What happened when a preset was added.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetOutcome {
    /// Stored under a new name.
    Added,
    /// Stored, replacing a preset with the same name.
    Replaced,
    /// The book was already full; nothing changed.
    Full,
    /// Empty name or a formula that does not parse; nothing changed.
    Rejected,
}

impl PresetOutcome {
    /// Whether the preset is now in the book.
    pub fn is_stored(self) -> bool {
        matches!(self, Self::Added | Self::Replaced)
    }
}

/// An ordered collection of presets with unique names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetBook {
    presets: Vec<RollPreset>,
    capacity: usize,
}

impl Default for PresetBook {
    fn default() -> Self {
        Self::new()
    }
}

impl PresetBook {
    /// An empty book with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(PRESET_CAPACITY)
    }

    /// An empty book holding at most `capacity` presets.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            presets: Vec::new(),
            capacity,
        }
    }

    /// Build a book from stored presets, silently dropping any that would
    /// be rejected by [`add`](Self::add).
    pub fn from_presets(presets: impl IntoIterator<Item = RollPreset>, capacity: usize) -> Self {
        let mut book = Self::with_capacity(capacity);
        for preset in presets {
            book.add(&preset.name, &preset.formula);
        }
        book
    }

    /// Add or replace a preset.
    ///
    /// Name and formula are trimmed. An existing preset with the same name
    /// is removed and the new one appended; the book is then cut back to
    /// capacity, so a brand new name is dropped when the book is full.
    pub fn add(&mut self, name: &str, formula: &str) -> PresetOutcome {
        let name = name.trim();
        let formula = formula.trim();
        if name.is_empty() || !dice::is_valid(formula) {
            tracing::warn!(name, formula, "preset rejected");
            return PresetOutcome::Rejected;
        }

        let before = self.presets.len();
        self.presets.retain(|p| p.name != name);
        let replaced = self.presets.len() != before;
        self.presets.push(RollPreset {
            name: name.to_string(),
            formula: formula.to_string(),
        });
        self.presets.truncate(self.capacity);

        if self.get(name).is_none() {
            tracing::debug!(name, "preset book full");
            return PresetOutcome::Full;
        }
        tracing::debug!(name, formula, replaced, "preset stored");
        if replaced {
            PresetOutcome::Replaced
        } else {
            PresetOutcome::Added
        }
    }

    /// Remove a preset by name. Returns true if one was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.presets.len();
        self.presets.retain(|p| p.name != name);
        before != self.presets.len()
    }

    /// Look up a preset by exact name.
    pub fn get(&self, name: &str) -> Option<&RollPreset> {
        self.presets.iter().find(|p| p.name == name)
    }

    /// Roll a preset, labelling the result with its name.
    pub fn roll<S: DieSource + ?Sized>(&self, name: &str, source: &mut S) -> MechResult<RollResult> {
        let preset = self
            .get(name)
            .ok_or_else(|| MechError::UnknownPreset(name.to_string()))?;
        Ok(dice::roll_formula(&preset.formula, source)?.with_label(preset.name.clone()))
    }

    /// Presets in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &RollPreset> {
        self.presets.iter()
    }

    /// The presets as a slice, for persistence.
    pub fn as_slice(&self) -> &[RollPreset] {
        &self.presets
    }

    /// Number of presets.
    pub fn len(&self) -> usize {
        self.presets.len()
    }

    /// Whether the book is empty.
    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    /// Maximum number of presets.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Change the capacity. Presets past the new cap are dropped, keeping
    /// the earliest ones.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        self.presets.truncate(capacity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::Scripted;

    #[test]
    fn add_and_get() {
        let mut book = PresetBook::new();
        assert_eq!(book.add("Hammer", "d10+3"), PresetOutcome::Added);
        assert_eq!(book.get("Hammer").unwrap().formula, "d10+3");
    }

    #[test]
    fn add_trims_input() {
        let mut book = PresetBook::new();
        assert!(book.add("  Hammer ", " d10+3 ").is_stored());
        assert_eq!(book.get("Hammer").unwrap().formula, "d10+3");
    }

    #[test]
    fn invalid_formula_is_rejected_without_mutation() {
        let mut book = PresetBook::new();
        book.add("Hammer", "d10+3");
        assert_eq!(book.add("Ring", "Special"), PresetOutcome::Rejected);
        assert_eq!(book.add("Combo", "2d6+1d4"), PresetOutcome::Rejected);
        assert_eq!(book.add("", "d6"), PresetOutcome::Rejected);
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn same_name_overwrites_and_moves_to_end() {
        let mut book = PresetBook::new();
        book.add("A", "d4");
        book.add("B", "d6");
        assert_eq!(book.add("A", "d8"), PresetOutcome::Replaced);
        let names: Vec<&str> = book.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);
        assert_eq!(book.get("A").unwrap().formula, "d8");
    }

    #[test]
    fn full_book_drops_new_names() {
        let mut book = PresetBook::new();
        for i in 0..PRESET_CAPACITY {
            assert!(book.add(&format!("p{i}"), "d6").is_stored());
        }
        assert_eq!(book.add("extra", "d6"), PresetOutcome::Full);
        assert_eq!(book.len(), PRESET_CAPACITY);
        assert!(book.get("extra").is_none());
        assert!(book.get("p0").is_some());
    }

    #[test]
    fn full_book_still_accepts_replacements() {
        let mut book = PresetBook::with_capacity(2);
        book.add("a", "d4");
        book.add("b", "d6");
        assert_eq!(book.add("a", "d12"), PresetOutcome::Replaced);
        assert_eq!(book.get("a").unwrap().formula, "d12");
        assert_eq!(book.len(), 2);
    }

    #[test]
    fn shrinking_keeps_the_earliest() {
        let mut book = PresetBook::new();
        book.add("a", "d4");
        book.add("b", "d6");
        book.add("c", "d8");
        book.set_capacity(2);
        assert_eq!(book.capacity(), 2);
        let names: Vec<&str> = book.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(book.add("d", "d10"), PresetOutcome::Full);
    }

    #[test]
    fn remove() {
        let mut book = PresetBook::new();
        book.add("a", "d4");
        assert!(book.remove("a"));
        assert!(!book.remove("a"));
        assert!(book.is_empty());
    }

    #[test]
    fn roll_uses_name_as_label() {
        let mut book = PresetBook::new();
        book.add("Hammer", "d10+3");
        let r = book.roll("Hammer", &mut Scripted::faces(10, &[7])).unwrap();
        assert_eq!(r.label(), Some("Hammer"));
        assert_eq!(r.total(), 10);
        assert_eq!(r.format(), "d10+3: 7 + 3 = 10");
    }

    #[test]
    fn roll_unknown_preset() {
        let book = PresetBook::new();
        assert_eq!(
            book.roll("nope", &mut Scripted::default()).unwrap_err(),
            MechError::UnknownPreset("nope".to_string())
        );
    }

    #[test]
    fn from_presets_filters_bad_entries() {
        let stored = vec![
            RollPreset { name: "ok".into(), formula: "2d6".into() },
            RollPreset { name: "bad".into(), formula: "2x6".into() },
        ];
        let book = PresetBook::from_presets(stored, PRESET_CAPACITY);
        assert_eq!(book.len(), 1);
    }
}

/*!
 * Character roster construction.
 *
 * Dialogue attribution and cast-list declarations both feed a registry
 * keyed by the canonical character name (trimmed, upper-cased, markup
 * stripped), so "Bob", "BOB " and "**bob**" accumulate one tally. Reserved
 * system keywords (CAPTION, SFX, TITLE, ...) are pseudo-speakers used for
 * bubble routing and never reach the final roster.
 */

use std::collections::HashMap;

use log::debug;

use crate::classify::strip_emphasis;
use crate::model::CharacterCount;

/// System keywords excluded from the roster even when they matched a
/// dialogue pattern.
const RESERVED_KEYWORDS: &[&str] = &[
    "CAPTION",
    "CAP",
    "SFX",
    "FX",
    "SOUND EFFECT",
    "SOUND EFFECTS",
    "TITLE",
    "NOTE",
    "ON SCREEN",
    "ON-SCREEN",
    "ON SCREEN TEXT",
    "SCREEN TEXT",
    "SCREEN",
    "LABEL",
    "SIGN",
    "SUPER",
    "CHYRON",
    "LIGHTS",
    "SOUND",
    "MUSIC",
    "CUE",
    "LX",
    "PROJECTION",
];

/// Canonical form of a character name: markup stripped, trailing colon
/// removed, inner whitespace collapsed, upper-cased.
pub(crate) fn canonicalize_name(raw: &str) -> String {
    let stripped = strip_emphasis(raw);
    stripped
        .trim_end_matches(':')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

/// True for reserved system keywords that must never appear in the roster.
pub(crate) fn is_reserved(name: &str) -> bool {
    let canonical = canonicalize_name(name);
    RESERVED_KEYWORDS.contains(&canonical.as_str())
}

/// Accumulating registry of dialogue tallies and cast declarations.
#[derive(Debug, Default)]
pub(crate) struct CharacterRegistry {
    /// Canonical names in order of first mention
    order: Vec<String>,
    tallies: HashMap<String, u32>,
    first_pages: HashMap<String, u32>,
    descriptions: HashMap<String, String>,
}

impl CharacterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one attributed dialogue line. `name` must already be
    /// canonical.
    pub fn record(&mut self, name: &str, page_number: u32) {
        if name.is_empty() {
            return;
        }
        if !self.tallies.contains_key(name) && !self.descriptions.contains_key(name) {
            self.order.push(name.to_string());
        }
        *self.tallies.entry(name.to_string()).or_insert(0) += 1;
        self.first_pages.entry(name.to_string()).or_insert(page_number);
    }

    /// Insert or update a cast-list declaration. The description is kept
    /// even when dialogue for the same name arrives later.
    pub fn upsert_cast(&mut self, name: &str, description: &str) {
        let canonical = canonicalize_name(name);
        if canonical.is_empty() {
            return;
        }
        if !self.tallies.contains_key(&canonical) && !self.descriptions.contains_key(&canonical) {
            self.order.push(canonical.clone());
        }
        let description = description.trim();
        if description.is_empty() {
            self.descriptions.entry(canonical).or_default();
        } else {
            self.descriptions.insert(canonical, description.to_string());
        }
    }

    /// Build the final roster: cast declarations merged with dialogue
    /// tallies, reserved keywords excluded, sorted by descending count and
    /// then by name for determinism.
    pub fn into_roster(self) -> Vec<CharacterCount> {
        let mut roster: Vec<CharacterCount> = Vec::new();
        for name in &self.order {
            if is_reserved(name) {
                debug!("excluding reserved keyword from roster: {}", name);
                continue;
            }
            let count = self.tallies.get(name).copied().unwrap_or(0);
            let mut entry = CharacterCount::new(name, count);
            entry.description = self
                .descriptions
                .get(name)
                .filter(|d| !d.is_empty())
                .cloned();
            entry.first_page = self.first_pages.get(name).copied();
            roster.push(entry);
        }
        roster.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
        roster
    }
}

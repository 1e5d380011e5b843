/*!
 * Core data model for parsed scripts.
 *
 * These types provide a rich, JSON-serializable representation of a script
 * breakdown: numbered pages (or scenes), the panels (or beats) inside them,
 * dialogue attributed to canonicalized character names, and the aggregate
 * character roster. Everything is created fresh per parse invocation and
 * owned exclusively by the caller.
 */

use serde::{Deserialize, Serialize};

/// Delivery type of a single dialogue line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialogueKind {
    /// Ordinary spoken balloon or speech
    Spoken,
    /// Voice-over / narration attributed to a character
    Voiceover,
    /// Caption box, on-screen text or sound effect
    Caption,
    /// Thought balloon or internal monologue
    Thought,
}

impl Default for DialogueKind {
    fn default() -> Self {
        DialogueKind::Spoken
    }
}

/// One attributed line of dialogue inside a panel.
///
/// The character name is canonicalized (trimmed, upper-cased) so the same
/// speaker accumulates a single tally regardless of formatting variance in
/// the source script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueLine {
    /// Canonical character name (e.g. "ALICE")
    pub character: String,

    /// The spoken/written text
    pub text: String,

    /// Delivery type
    #[serde(default)]
    pub kind: DialogueKind,
}

impl DialogueLine {
    /// Create a new dialogue line with an already-canonical character name.
    pub fn new(character: &str, text: &str, kind: DialogueKind) -> Self {
        Self {
            character: character.to_string(),
            text: text.to_string(),
            kind,
        }
    }

    /// Create an ordinary spoken line.
    pub fn spoken(character: &str, text: &str) -> Self {
        Self::new(character, text, DialogueKind::Spoken)
    }
}

/// Intended image proportions of a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectRatio {
    /// Wider than tall (default for most panels)
    Wide,
    /// Conventional 4:3-ish framing
    Standard,
    /// Equal sides
    Square,
    /// Taller than wide
    Tall,
    /// Full-height vertical framing
    Portrait,
}

impl Default for AspectRatio {
    fn default() -> Self {
        AspectRatio::Wide
    }
}

/// A single panel (comic) or beat (stage/screen) with its description,
/// dialogue and attached notes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedPanel {
    /// Panel number exactly as authored (may be non-sequential or duplicated)
    pub panel_number: u32,

    /// Visual description / action text
    #[serde(default)]
    pub description: String,

    /// Dialogue lines in source order
    #[serde(default)]
    pub dialogue: Vec<DialogueLine>,

    /// Unique character names in order of first mention within this panel
    #[serde(default)]
    pub characters: Vec<String>,

    /// Emphasis/layout tag inferred from the description (e.g. "splash",
    /// "inset", "standard")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visual_marker: Option<String>,

    /// Inferred image proportions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<AspectRatio>,

    /// Art direction notes attached to this panel
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist_notes: Option<String>,
}

impl ParsedPanel {
    /// Create an empty panel with the given number.
    pub fn new(panel_number: u32) -> Self {
        Self {
            panel_number,
            description: String::new(),
            dialogue: Vec::new(),
            characters: Vec::new(),
            visual_marker: None,
            aspect_ratio: None,
            artist_notes: None,
        }
    }

    /// An empty shell is a panel with neither description nor dialogue.
    /// Such panels are discarded during assembly, never emitted.
    pub fn is_empty_shell(&self) -> bool {
        self.description.trim().is_empty() && self.dialogue.is_empty()
    }

    /// Number of dialogue lines attributed to real characters (reserved
    /// pseudo-speakers like CAPTION and SFX still count as dialogue here).
    pub fn dialogue_count(&self) -> usize {
        self.dialogue.len()
    }
}

/// A numbered page (comic) or scene (stage/screen/TV) containing panels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedPage {
    /// Page/scene number exactly as authored or assigned sequentially
    pub page_number: u32,

    /// Panels in source order
    #[serde(default)]
    pub panels: Vec<ParsedPanel>,

    /// Page-level notes (prose before the first panel, transition cues,
    /// act/teaser labels)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ParsedPage {
    /// Create an empty page with the given number.
    pub fn new(page_number: u32) -> Self {
        Self {
            page_number,
            panels: Vec::new(),
            notes: None,
        }
    }

    /// Find the first panel with the given number, if any.
    pub fn panel(&self, panel_number: u32) -> Option<&ParsedPanel> {
        self.panels.iter().find(|p| p.panel_number == panel_number)
    }

    /// Append a note line to the page-level notes buffer.
    pub fn push_note(&mut self, note: &str) {
        match &mut self.notes {
            Some(existing) => {
                existing.push('\n');
                existing.push_str(note);
            }
            None => self.notes = Some(note.to_string()),
        }
    }
}

/// Aggregate tally for one character across the whole script.
///
/// Built by merging explicit cast-list declarations (name + description,
/// count initially zero) with dialogue-attribution tallies; a name present
/// in both keeps the description and uses the dialogue count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterCount {
    /// Canonical character name
    pub name: String,

    /// Number of dialogue lines attributed to this character
    pub count: u32,

    /// Description from the cast list, if one was declared
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Page number of the character's first dialogue appearance
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_page: Option<u32>,
}

impl CharacterCount {
    /// Create a roster entry with no description.
    pub fn new(name: &str, count: u32) -> Self {
        Self {
            name: name.to_string(),
            count,
            description: None,
            first_page: None,
        }
    }

    /// Attach a cast-list description.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

/// Counters describing recoverable anomalies observed during a parse, so a
/// consuming UI can badge import issues without string-matching `errors`
/// or `warnings`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueMetadata {
    /// Total number of source lines fed through the classifier
    pub lines_classified: usize,

    /// Marker-shaped lines whose number token could not be normalized
    pub unrecognized_numbers: usize,

    /// Page numbers that appeared more than once (later occurrence kept)
    pub duplicate_pages: usize,

    /// Panel numbers duplicated within a single page (both retained)
    pub duplicate_panels: usize,
}

impl IssueMetadata {
    /// True when no anomalies were recorded.
    pub fn is_clean(&self) -> bool {
        self.unrecognized_numbers == 0 && self.duplicate_pages == 0 && self.duplicate_panels == 0
    }
}

/// Complete output of one parse invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseResult {
    /// False only when zero pages were produced or the pipeline faulted;
    /// a non-empty `errors` list does not by itself force failure as long
    /// as at least one page exists
    pub success: bool,

    /// Pages in strictly ascending, de-duplicated page-number order
    #[serde(default)]
    pub pages: Vec<ParsedPage>,

    /// Character roster sorted by descending dialogue count
    #[serde(default)]
    pub characters: Vec<CharacterCount>,

    /// Unrecoverable or content-losing anomalies
    #[serde(default)]
    pub errors: Vec<String>,

    /// Recoverable anomalies (duplicate numbering and similar)
    #[serde(default)]
    pub warnings: Vec<String>,

    /// Issue counters for the consuming UI
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_metadata: Option<IssueMetadata>,
}

impl ParseResult {
    /// Page numbers in result order (ascending by construction).
    pub fn page_numbers(&self) -> Vec<u32> {
        self.pages.iter().map(|p| p.page_number).collect()
    }

    /// Total number of panels across all pages.
    pub fn total_panels(&self) -> usize {
        self.pages.iter().map(|p| p.panels.len()).sum()
    }

    /// Total number of dialogue lines across all panels.
    pub fn dialogue_count(&self) -> usize {
        self.pages
            .iter()
            .flat_map(|p| p.panels.iter())
            .map(|panel| panel.dialogue.len())
            .sum()
    }

    /// Find a panel by its (page, panel) coordinate. When a page retains
    /// duplicate panel numbers the first occurrence is returned.
    pub fn find_panel(&self, page_number: u32, panel_number: u32) -> Option<&ParsedPanel> {
        self.pages
            .iter()
            .find(|p| p.page_number == page_number)
            .and_then(|p| p.panel(panel_number))
    }
}

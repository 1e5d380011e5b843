/*!
 * Folding state machine that builds pages and panels from the classified
 * line stream.
 *
 * The accumulator carries explicit state (current page, current panel
 * builder, section flags, pending bare-name character) threaded through
 * one `step` call per line, so every transition is auditable and testable
 * in isolation. End of input triggers a terminal flush of the open panel
 * and page, equivalent to an implicit closing marker.
 */

use log::{debug, warn};

use crate::classify::{ParsedLine, SectionContext, SectionKind};
use crate::formats::stageplay;
use crate::model::{DialogueKind, DialogueLine, IssueMetadata, ParsedPage, ParsedPanel};
use crate::options::ParseOptions;
use crate::roster::{self, CharacterRegistry, canonicalize_name};
use crate::visual::{infer_aspect_ratio, infer_visual_marker};

/// Everything the accumulator produced, handed to the result assembler.
pub(crate) struct AccumulatorOutput {
    pub pages: Vec<ParsedPage>,
    pub registry: CharacterRegistry,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub issues: IssueMetadata,
}

/// In-progress panel. Turned into a `ParsedPanel` at flush time, or
/// discarded as an empty shell when neither description nor dialogue
/// accumulated.
struct PanelBuilder {
    number: u32,
    marker_modifier: Option<String>,
    description: Vec<String>,
    dialogue: Vec<DialogueLine>,
    characters: Vec<String>,
    notes: Vec<String>,
}

impl PanelBuilder {
    fn new(number: u32, marker_modifier: Option<String>) -> Self {
        Self {
            number,
            marker_modifier,
            description: Vec::new(),
            dialogue: Vec::new(),
            characters: Vec::new(),
            notes: Vec::new(),
        }
    }

    fn into_panel(self) -> Option<ParsedPanel> {
        let description = self.description.join("\n").trim().to_string();
        if description.is_empty() && self.dialogue.is_empty() {
            debug!("discarding empty shell panel {}", self.number);
            return None;
        }

        let mut hint = self.marker_modifier.clone().unwrap_or_default();
        hint.push(' ');
        hint.push_str(&description);

        Some(ParsedPanel {
            panel_number: self.number,
            description,
            dialogue: self.dialogue,
            characters: self.characters,
            visual_marker: Some(infer_visual_marker(&hint)),
            aspect_ratio: Some(infer_aspect_ratio(&hint)),
            artist_notes: if self.notes.is_empty() {
                None
            } else {
                Some(self.notes.join("\n"))
            },
        })
    }
}

pub(crate) struct Accumulator<'a> {
    options: &'a ParseOptions,

    pages: Vec<ParsedPage>,
    current_page: Option<ParsedPage>,
    current_panel: Option<PanelBuilder>,

    /// Prose collected on an open page before its first panel
    page_prose: Vec<String>,
    /// Note lines (cues, transitions, annotations) for the open page
    page_notes: Vec<String>,
    /// Content seen before any page opened; attached to the first page
    preamble: Vec<String>,

    /// Highest panel number used on the current page
    panel_counter: u32,
    /// Sequential scene numbering for heading-based formats
    scene_counter: u32,
    /// Act/teaser label waiting to be recorded on the next page
    pending_section_label: Option<String>,

    pending_character: Option<(String, Option<String>)>,
    in_dialogue_run: bool,
    in_cast_section: bool,
    in_artist_notes_section: bool,

    registry: CharacterRegistry,
    errors: Vec<String>,
    warnings: Vec<String>,
    issues: IssueMetadata,
}

impl<'a> Accumulator<'a> {
    pub fn new(options: &'a ParseOptions) -> Self {
        Self {
            options,
            pages: Vec::new(),
            current_page: None,
            current_panel: None,
            page_prose: Vec::new(),
            page_notes: Vec::new(),
            preamble: Vec::new(),
            panel_counter: 0,
            scene_counter: 0,
            pending_section_label: None,
            pending_character: None,
            in_dialogue_run: false,
            in_cast_section: false,
            in_artist_notes_section: false,
            registry: CharacterRegistry::new(),
            errors: Vec::new(),
            warnings: Vec::new(),
            issues: IssueMetadata::default(),
        }
    }

    /// Section flags for the classifier, refreshed before each line.
    pub fn context(&self) -> SectionContext {
        SectionContext {
            in_cast_section: self.in_cast_section,
            in_artist_notes_section: self.in_artist_notes_section,
        }
    }

    /// Consume one classified line.
    pub fn step(&mut self, raw: &str, line: ParsedLine) {
        self.issues.lines_classified += 1;

        if line.is_structural() {
            self.in_cast_section = false;
            self.in_artist_notes_section = false;
        }

        match line {
            ParsedLine::Blank => {
                self.pending_character = None;
                self.in_dialogue_run = false;
            }

            ParsedLine::SectionHeader { kind } => {
                self.close_dialogue_run();
                match kind {
                    SectionKind::CastList => self.in_cast_section = true,
                    SectionKind::ArtistNotes => self.in_artist_notes_section = true,
                }
            }

            ParsedLine::PageMarker { number, annotation } => {
                self.close_dialogue_run();
                if number == 0 {
                    self.flag_unrecognized_marker(raw);
                    self.fold_plain_text(raw.trim().to_string());
                } else {
                    self.flush_panel();
                    self.flush_page();
                    self.open_page(number);
                    if let Some(note) = annotation {
                        self.page_notes.push(note);
                    }
                }
            }

            ParsedLine::SceneHeading { .. } => {
                self.close_dialogue_run();
                self.flush_panel();
                self.flush_page();
                let number = self.scene_counter + 1;
                self.open_page(number);
                self.page_notes.push(raw.trim().to_string());
            }

            ParsedLine::ActMarker { number: _, label } => {
                self.close_dialogue_run();
                self.flush_panel();
                self.flush_page();
                if label.starts_with("END OF") {
                    // Closing markers annotate the page they close
                    if let Some(last) = self.pages.last_mut() {
                        last.push_note(&label);
                    }
                } else {
                    self.pending_section_label = Some(match self.pending_section_label.take() {
                        Some(existing) => format!("{existing}\n{label}"),
                        None => label,
                    });
                }
            }

            ParsedLine::PanelMarker {
                number,
                modifier,
                inline_text,
            } => {
                self.close_dialogue_run();
                if number == 0 {
                    self.flag_unrecognized_marker(raw);
                    self.fold_plain_text(raw.trim().to_string());
                } else {
                    self.open_panel(number, modifier);
                    self.panel_counter = self.panel_counter.max(number);
                    if let Some(text) = inline_text {
                        self.panel_description(text);
                    }
                }
            }

            ParsedLine::ShotDirection {
                marker,
                description,
            } => {
                self.close_dialogue_run();
                let number = self.panel_counter + 1;
                self.open_panel(number, Some(marker));
                self.panel_counter = number;
                if !description.is_empty() {
                    self.panel_description(description);
                }
            }

            ParsedLine::StageDirection { text } => {
                if stageplay::is_blocking_direction(&text) {
                    self.close_dialogue_run();
                    let number = self.panel_counter + 1;
                    self.open_panel(number, None);
                    self.panel_counter = number;
                    self.panel_description(text);
                } else if let Some((name, modifier)) = self.pending_character.take() {
                    // Actor parenthetical between cue and speech
                    let merged = match modifier {
                        Some(existing) => format!("{existing}; {text}"),
                        None => text,
                    };
                    self.pending_character = Some((name, Some(merged)));
                } else if self.in_dialogue_run && self.append_to_last_dialogue(&format!("({text})"))
                {
                    // Folded into the running speech
                } else {
                    self.fold_plain_text(text);
                }
            }

            ParsedLine::Transition { label } => {
                self.close_dialogue_run();
                self.flush_panel();
                if self.current_page.is_some() {
                    self.page_notes.push(label);
                } else {
                    self.preamble.push(label);
                }
            }

            ParsedLine::Dialogue {
                character,
                modifier,
                text,
            } => {
                self.pending_character = None;
                self.add_dialogue(&canonicalize_name(&character), modifier, text);
                self.in_dialogue_run = true;
            }

            ParsedLine::Caption { text, subtype } => self.add_caption(text, subtype),

            ParsedLine::Sfx { text } => {
                self.push_bubble("SFX", text);
            }

            ParsedLine::ScreenText { text, subtype } => {
                let speaker = subtype.unwrap_or_else(|| "ON SCREEN".to_string());
                self.push_bubble(&canonicalize_name(&speaker), text);
            }

            ParsedLine::TechnicalCue { text } => {
                if let Some(panel) = self.current_panel.as_mut() {
                    panel.notes.push(text);
                } else if self.current_page.is_some() {
                    self.page_notes.push(text);
                } else {
                    self.preamble.push(text);
                }
            }

            ParsedLine::ArtistNote { text } => {
                if let Some(panel) = self.current_panel.as_mut() {
                    panel.notes.push(text);
                } else if self.current_page.is_some() {
                    self.page_notes.push(text);
                } else {
                    self.preamble.push(text);
                }
            }

            ParsedLine::CharacterNameOnly { name, modifier } => {
                self.pending_character = Some((canonicalize_name(&name), modifier));
                self.in_dialogue_run = false;
            }

            ParsedLine::CastDefinition { name, description } => {
                self.registry.upsert_cast(&name, &description);
            }

            ParsedLine::PlainText { text } => {
                // A line a cast section could not read as a declaration
                // ends the section
                self.in_cast_section = false;

                if let Some((name, modifier)) = self.pending_character.take() {
                    self.add_dialogue(&name, modifier, text);
                    self.in_dialogue_run = true;
                } else if self.in_dialogue_run && self.append_to_last_dialogue(&text) {
                    // Continuation of the previous speech
                } else {
                    self.fold_plain_text(text);
                }
            }
        }
    }

    /// Terminal flush: close the open panel and page, then hand off.
    pub fn finish(mut self) -> AccumulatorOutput {
        self.flush_panel();
        self.flush_page();

        // A trailing act label ("END OF ACT TWO") with no page after it
        // attaches to the last page rather than being dropped
        if let Some(label) = self.pending_section_label.take() {
            if let Some(last) = self.pages.last_mut() {
                last.push_note(&label);
            }
        }

        AccumulatorOutput {
            pages: self.pages,
            registry: self.registry,
            errors: self.errors,
            warnings: self.warnings,
            issues: self.issues,
        }
    }

    fn close_dialogue_run(&mut self) {
        self.pending_character = None;
        self.in_dialogue_run = false;
    }

    fn flag_unrecognized_marker(&mut self, raw: &str) {
        warn!("unrecognized marker number: {}", raw.trim());
        self.errors
            .push(format!("unrecognized number in marker: '{}'", raw.trim()));
        self.issues.unrecognized_numbers += 1;
    }

    fn open_page(&mut self, number: u32) {
        debug!("opening page {}", number);
        let mut page = ParsedPage::new(number);
        for note in self.preamble.drain(..) {
            page.push_note(&note);
        }
        if let Some(label) = self.pending_section_label.take() {
            page.push_note(&label);
        }
        self.current_page = Some(page);
        self.panel_counter = 0;
        self.scene_counter = self.scene_counter.max(number);
    }

    fn ensure_page(&mut self) {
        if self.current_page.is_none() {
            self.open_page(1);
        }
    }

    fn open_panel(&mut self, number: u32, modifier: Option<String>) {
        self.flush_panel();
        self.ensure_page();
        debug!("opening panel {}", number);
        self.current_panel = Some(PanelBuilder::new(number, modifier));
    }

    /// Open an implicit panel for dialogue that arrived before any panel
    /// marker. The first implicit panel of a page absorbs the page prose
    /// collected so far as its description.
    fn ensure_panel(&mut self) {
        if self.current_panel.is_none() {
            let number = self.panel_counter + 1;
            self.open_panel(number, None);
            self.panel_counter = number;
            if number == 1 && !self.page_prose.is_empty() && self.options.implicit_panels {
                if let Some(panel) = self.current_panel.as_mut() {
                    panel.description.extend(self.page_prose.drain(..));
                }
            }
        }
    }

    fn panel_description(&mut self, text: String) {
        if let Some(panel) = self.current_panel.as_mut() {
            panel.description.push(text);
        }
    }

    /// Route prose to the open panel, the open page, or the preamble.
    fn fold_plain_text(&mut self, text: String) {
        if let Some(panel) = self.current_panel.as_mut() {
            panel.description.push(text);
        } else if self.current_page.is_some() {
            self.page_prose.push(text);
        } else {
            self.preamble.push(text);
        }
    }

    fn append_to_last_dialogue(&mut self, text: &str) -> bool {
        if let Some(last) = self
            .current_panel
            .as_mut()
            .and_then(|p| p.dialogue.last_mut())
        {
            last.text.push(' ');
            last.text.push_str(text);
            true
        } else {
            false
        }
    }

    fn add_dialogue(&mut self, name: &str, modifier: Option<String>, text: String) {
        self.ensure_panel();
        let (kind, text) = apply_modifier(modifier, text);
        let page_number = self
            .current_page
            .as_ref()
            .map(|p| p.page_number)
            .unwrap_or(1);

        if let Some(panel) = self.current_panel.as_mut() {
            panel.dialogue.push(DialogueLine::new(name, &text, kind));
            if !roster::is_reserved(name) {
                if !panel.characters.iter().any(|c| c == name) {
                    panel.characters.push(name.to_string());
                }
                self.registry.record(name, page_number);
            }
        }
    }

    fn add_caption(&mut self, text: String, subtype: Option<String>) {
        match subtype {
            Some(sub) => {
                if let Some(speaker) = voiceover_attribution(&sub) {
                    // CAPTION (NAME V.O.): narration tallied to the character
                    self.add_dialogue(&speaker, Some("V.O.".to_string()), text);
                } else {
                    self.push_bubble("CAPTION", format!("({sub}) {text}"));
                }
            }
            None => self.push_bubble("CAPTION", text),
        }
    }

    /// Append a pseudo-speaker bubble (CAPTION, SFX, on-screen text) to
    /// the open panel without touching the character roster.
    fn push_bubble(&mut self, speaker: &str, text: String) {
        self.ensure_panel();
        if let Some(panel) = self.current_panel.as_mut() {
            panel
                .dialogue
                .push(DialogueLine::new(speaker, &text, DialogueKind::Caption));
        }
    }

    fn flush_panel(&mut self) {
        let Some(builder) = self.current_panel.take() else {
            return;
        };
        let Some(panel) = builder.into_panel() else {
            return;
        };

        self.ensure_page();
        let mut duplicate_of = None;
        if let Some(page) = self.current_page.as_mut() {
            if page
                .panels
                .iter()
                .any(|p| p.panel_number == panel.panel_number)
            {
                duplicate_of = Some((panel.panel_number, page.page_number));
            }
            page.panels.push(panel);
        }
        if let Some((panel_number, page_number)) = duplicate_of {
            self.issues.duplicate_panels += 1;
            if self.options.warn_duplicate_panels {
                warn!("duplicate panel number {} on page {}", panel_number, page_number);
                self.warnings.push(format!(
                    "duplicate panel number {} on page {}; keeping both",
                    panel_number, page_number
                ));
            }
        }
    }

    fn flush_page(&mut self) {
        let Some(mut page) = self.current_page.take() else {
            self.page_prose.clear();
            self.page_notes.clear();
            return;
        };

        let prose: Vec<String> = self.page_prose.drain(..).collect();
        if page.panels.is_empty() && !prose.is_empty() && self.options.implicit_panels {
            // A page with prose but no explicit panel marker becomes a
            // single-panel page
            let mut builder = PanelBuilder::new(1, None);
            builder.description = prose;
            if let Some(panel) = builder.into_panel() {
                page.panels.push(panel);
            }
        } else {
            for line in prose {
                page.push_note(&line);
            }
        }

        for note in self.page_notes.drain(..) {
            page.push_note(&note);
        }

        debug!(
            "flushing page {} with {} panels",
            page.page_number,
            page.panels.len()
        );
        self.pages.push(page);
    }
}

/// Map a dialogue modifier to a delivery kind. Modifiers that do not
/// select a kind are preserved by prefixing the text, so no content is
/// lost.
fn apply_modifier(modifier: Option<String>, text: String) -> (DialogueKind, String) {
    let Some(modifier) = modifier else {
        return (DialogueKind::Spoken, text);
    };
    let upper = modifier.to_uppercase();
    if upper.contains("V.O") || upper == "VO" || upper.contains("VOICE") {
        (DialogueKind::Voiceover, text)
    } else if upper.contains("THOUGHT") || upper.contains("THINKING") || upper.contains("THINKS") {
        (DialogueKind::Thought, text)
    } else {
        (DialogueKind::Spoken, format!("({modifier}) {text}"))
    }
}

/// Extract the character from a caption subtype like "SARAH V.O." or
/// "SARAH (V.O.)". Returns the canonical name, or `None` for plain
/// subtypes like "LOCATION".
fn voiceover_attribution(subtype: &str) -> Option<String> {
    let upper = subtype.trim().to_uppercase();
    let stripped = upper
        .strip_suffix("V.O.")
        .or_else(|| upper.strip_suffix("V.O"))
        .or_else(|| upper.strip_suffix("(V.O.)"))
        .or_else(|| upper.strip_suffix("VO"))?;
    let name = stripped.trim_end_matches(['(', ' ', ',']).trim();
    if name.is_empty() {
        None
    } else {
        Some(canonicalize_name(name))
    }
}

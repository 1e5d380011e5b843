/*!
 * Line classification.
 *
 * Each source line is classified into exactly one `ParsedLine` variant by
 * trying the active format's pattern table in priority order; the first
 * matching rule wins and an unmatched line falls back to `PlainText`.
 * Section context (cast list, artist notes) reinterprets a handful of
 * variants after the table runs, so the table itself stays context-free.
 */

use std::sync::LazyLock;

use log::debug;
use regex::{Captures, Regex};

use crate::formats;
use crate::options::ScriptFormat;

/// Script section a header line can open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SectionKind {
    /// Cast-of-characters declarations
    CastList,
    /// Notes addressed to the artist
    ArtistNotes,
}

/// Classification of one source line. Produced transiently per line and
/// consumed by the accumulator; never part of the public API.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ParsedLine {
    /// `PAGE 14` / `SCENE TWO` style page or scene boundary
    PageMarker {
        number: u32,
        annotation: Option<String>,
    },
    /// `PANEL 3 (wide): inline text` style beat boundary
    PanelMarker {
        number: u32,
        modifier: Option<String>,
        inline_text: Option<String>,
    },
    /// `INT. KITCHEN - DAY`
    SceneHeading {
        location: String,
        time_of_day: Option<String>,
    },
    /// `CLOSE ON Sarah's hands`
    ShotDirection {
        marker: String,
        description: String,
    },
    /// `CUT TO:`
    Transition { label: String },
    /// `SARAH (whispering): text`
    Dialogue {
        character: String,
        modifier: Option<String>,
        text: String,
    },
    /// `CAPTION (LOCATION): text`
    Caption {
        text: String,
        subtype: Option<String>,
    },
    /// `SFX: KRAKOOM`
    Sfx { text: String },
    /// `ON SCREEN: Missed call`
    ScreenText {
        text: String,
        subtype: Option<String>,
    },
    /// `(She turns away.)` or `[SARAH enters.]`
    StageDirection { text: String },
    /// `LIGHTS: slow fade to blue`
    TechnicalCue { text: String },
    /// `NOTE TO ARTIST: keep the palette muted`
    ArtistNote { text: String },
    /// A standalone all-caps name line whose dialogue follows indented
    CharacterNameOnly {
        name: String,
        modifier: Option<String>,
    },
    /// `SARAH - a tired engineer` inside a cast section
    CastDefinition { name: String, description: String },
    /// `CHARACTERS` / `ARTIST NOTES` section opener
    SectionHeader { kind: SectionKind },
    /// `ACT II`, `TEASER`, `COLD OPEN`: act-level grouping marker. Stage
    /// plays use the number for act context; TV markers may carry only a
    /// label (`number == 0` means unnumbered)
    ActMarker { number: u32, label: String },
    /// Empty or whitespace-only line
    Blank,
    /// Anything no rule matched
    PlainText { text: String },
}

impl ParsedLine {
    /// Structural lines end cast/artist-note sections and survive section
    /// reinterpretation unchanged.
    pub(crate) fn is_structural(&self) -> bool {
        matches!(
            self,
            ParsedLine::PageMarker { .. }
                | ParsedLine::PanelMarker { .. }
                | ParsedLine::SceneHeading { .. }
                | ParsedLine::ActMarker { .. }
                | ParsedLine::SectionHeader { .. }
        )
    }
}

/// Boolean section flags threaded through classification. Blank lines do
/// not end a section; structural markers do (handled by the accumulator).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct SectionContext {
    pub in_cast_section: bool,
    pub in_artist_notes_section: bool,
}

/// One entry of a format's ordered pattern table.
pub(crate) struct LineRule {
    /// Rule name, for trace logging only
    pub name: &'static str,
    pub pattern: Regex,
    /// Builds the classification from the captures; returning `None`
    /// rejects the match and falls through to the next rule
    pub build: fn(&Captures) -> Option<ParsedLine>,
}

impl LineRule {
    pub fn new(
        name: &'static str,
        pattern: &str,
        build: fn(&Captures) -> Option<ParsedLine>,
    ) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("invalid line rule pattern"),
            build,
        }
    }
}

/// Cast-definition shape tried only inside a cast section:
/// `NAME - description` or `NAME — description`.
static CAST_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z][A-Z0-9 .\-']{0,40}?)\s*[-–—]\s+(.+)$").expect("invalid cast shape regex")
});

/// Per-format line classifier. Pure: `(line, context) -> ParsedLine`.
pub(crate) struct LineClassifier {
    rules: &'static [LineRule],
}

impl LineClassifier {
    pub fn new(format: ScriptFormat) -> Self {
        Self {
            rules: formats::table_for(format),
        }
    }

    /// Classify one line under the given section context.
    pub fn classify(&self, line: &str, ctx: &SectionContext) -> ParsedLine {
        let content = line.trim();
        if content.is_empty() {
            return ParsedLine::Blank;
        }

        let parsed = self.apply_table(content);

        if ctx.in_artist_notes_section && !parsed.is_structural() {
            return ParsedLine::ArtistNote {
                text: strip_emphasis(content),
            };
        }

        if ctx.in_cast_section {
            return reinterpret_in_cast_section(parsed, content);
        }

        parsed
    }

    fn apply_table(&self, content: &str) -> ParsedLine {
        for rule in self.rules {
            if let Some(captures) = rule.pattern.captures(content) {
                if let Some(parsed) = (rule.build)(&captures) {
                    debug!("line rule '{}' matched: {}", rule.name, content);
                    return parsed;
                }
            }
        }
        ParsedLine::PlainText {
            text: strip_emphasis(content),
        }
    }
}

/// Inside a cast section, dialogue-shaped and bare-name lines are
/// declarations, not dialogue. Structural markers pass through (they end
/// the section); anything else falls back to the table's verdict, which
/// for `PlainText` ends the section too.
fn reinterpret_in_cast_section(parsed: ParsedLine, content: &str) -> ParsedLine {
    if parsed.is_structural() {
        return parsed;
    }
    match parsed {
        ParsedLine::Dialogue {
            character, text, ..
        } => ParsedLine::CastDefinition {
            name: character,
            description: text,
        },
        ParsedLine::CharacterNameOnly { name, .. } => ParsedLine::CastDefinition {
            name,
            description: String::new(),
        },
        other => {
            if let Some(captures) = CAST_SHAPE.captures(content) {
                ParsedLine::CastDefinition {
                    name: strip_emphasis(captures[1].trim()),
                    description: strip_emphasis(captures[2].trim()),
                }
            } else {
                other
            }
        }
    }
}

/// Strip wrapping/trailing markdown emphasis markers (`**`, `__`, `*`, `_`)
/// from extracted text.
pub(crate) fn strip_emphasis(text: &str) -> String {
    let mut result = text.trim();
    loop {
        let before = result;
        for marker in ["**", "__", "*", "_"] {
            result = result.strip_prefix(marker).unwrap_or(result);
            result = result.strip_suffix(marker).unwrap_or(result);
        }
        result = result.trim();
        if result == before {
            break;
        }
    }
    result.to_string()
}

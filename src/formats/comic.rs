/*!
 * Pattern table for markdown-flavored comic scripts.
 *
 * Comic scripts mark structure with `PAGE n` / `PANEL n` lines (often
 * bolded or heading-prefixed), attribute dialogue as `CHARACTER: text`
 * (optionally blockquoted), and carry CAPTION / SFX / on-screen text and
 * artist-note lines. Structural markers are anchored: the number token
 * must be followed by end of line, a parenthetical note, or a colon/dash
 * separator, never free continuing prose. That anchor is what keeps a
 * sentence like "Page fourteen is the middle" inside its panel.
 */

use once_cell::sync::Lazy;

use crate::classify::{LineRule, ParsedLine, SectionKind, strip_emphasis};
use crate::formats::NUM_TOKEN;
use crate::numbering::normalize_number;
use crate::roster;

/// Bare all-caps words that must never become a pending character name.
const NON_CHARACTER_WORDS: &[&str] = &["PAGE", "PANEL", "THE END", "END", "FIN", "CONTINUED"];

pub(crate) static COMIC_RULES: Lazy<Vec<LineRule>> = Lazy::new(|| {
    vec![
        LineRule::new(
            "cast-section-header",
            r"(?i)^(?:#+\s*)?(?:\*\*|__)?(?:CHARACTERS|CAST OF CHARACTERS|CAST|CHARACTER LIST|DRAMATIS PERSONAE)(?:\*\*|__)?\s*:?\s*$",
            |_| {
                Some(ParsedLine::SectionHeader {
                    kind: SectionKind::CastList,
                })
            },
        ),
        LineRule::new(
            "artist-notes-section-header",
            r"(?i)^(?:#+\s*)?(?:\*\*|__)?(?:ARTIST NOTES?|ART NOTES?|NOTES? (?:FOR|TO) (?:THE )?ARTIST)(?:\*\*|__)?\s*:?\s*$",
            |_| {
                Some(ParsedLine::SectionHeader {
                    kind: SectionKind::ArtistNotes,
                })
            },
        ),
        LineRule::new(
            "page-marker",
            &format!(
                r"(?i)^(?:#+\s*)?(?:\*\*|__)?PAGE[ \t]+({NUM_TOKEN})(?:\*\*|__)?\s*(?:\(([^)]*)\))?\s*[:\-]?\s*$"
            ),
            |caps| {
                Some(ParsedLine::PageMarker {
                    number: normalize_number(&caps[1]),
                    annotation: caps.get(2).map(|m| m.as_str().trim().to_string()),
                })
            },
        ),
        LineRule::new(
            "panel-marker",
            &format!(
                r"(?i)^(?:#+\s*)?(?:\*\*|__)?PANEL[ \t]+({NUM_TOKEN})(?:\*\*|__)?\s*(?:[\(\[]([^\)\]]*)[\)\]])?\s*(?:[:\-–—]\s*(.+))?$"
            ),
            |caps| {
                Some(ParsedLine::PanelMarker {
                    number: normalize_number(&caps[1]),
                    modifier: caps.get(2).map(|m| m.as_str().trim().to_string()),
                    inline_text: caps
                        .get(3)
                        .map(|m| strip_emphasis(m.as_str()))
                        .filter(|t| !t.is_empty()),
                })
            },
        ),
        LineRule::new(
            "caption",
            r"(?i)^(?:>\s*)?(?:\*\*|__)?(?:CAPTION|CAP)(?:\s*\(([^)]*)\))?(?:\*\*|__)?\s*:\s*(?:\*\*|__)?\s*(.+)$",
            |caps| {
                Some(ParsedLine::Caption {
                    text: strip_emphasis(&caps[2]),
                    subtype: caps.get(1).map(|m| m.as_str().trim().to_string()),
                })
            },
        ),
        LineRule::new(
            "sound-effect",
            r"(?i)^(?:>\s*)?(?:\*\*|__)?(?:SFX|SOUND EFFECTS?|FX)(?:\s*\(([^)]*)\))?(?:\*\*|__)?\s*:\s*(?:\*\*|__)?\s*(.+)$",
            |caps| {
                Some(ParsedLine::Sfx {
                    text: strip_emphasis(&caps[2]),
                })
            },
        ),
        LineRule::new(
            "screen-text",
            r"^(?:>\s*)?(?:\*\*|__)?((?i)ON[ \-]?SCREEN(?:\s+TEXT)?|SCREEN TEXT|LABEL|TITLE|SIGN)(?:\*\*|__)?\s*:\s*(?:\*\*|__)?\s*(.+)$",
            |caps| {
                Some(ParsedLine::ScreenText {
                    text: strip_emphasis(&caps[2]),
                    subtype: Some(caps[1].trim().to_uppercase()),
                })
            },
        ),
        LineRule::new(
            "artist-note",
            r"(?i)^(?:\*\*|__)?(?:ARTIST(?:'S)? NOTE|ART NOTE|NOTE(?: TO ARTIST)?)(?:\*\*|__)?\s*:\s*(?:\*\*|__)?\s*(.+)$",
            |caps| {
                Some(ParsedLine::ArtistNote {
                    text: strip_emphasis(&caps[1]),
                })
            },
        ),
        LineRule::new(
            "dialogue",
            r"^(?:>\s*)?(?:\*\*|__)?([A-Z][A-Z0-9 .\-']{0,40}?)(?:\s*\(([^)]+)\))?(?:\*\*|__)?\s*:\s*(?:\*\*|__)?\s*(.+)$",
            |caps| {
                Some(ParsedLine::Dialogue {
                    character: strip_emphasis(&caps[1]),
                    modifier: caps.get(2).map(|m| m.as_str().trim().to_string()),
                    text: strip_emphasis(&caps[3]),
                })
            },
        ),
        LineRule::new(
            "character-name-only",
            r"^(?:\*\*|__)?([A-Z][A-Z0-9 .\-']{1,40}?)(?:\s*\(([A-Za-z.' ]+)\))?(?:\*\*|__)?$",
            |caps| {
                let name = strip_emphasis(&caps[1]);
                if name.split_whitespace().count() > 4
                    || NON_CHARACTER_WORDS.contains(&name.as_str())
                    || name.starts_with("PAGE ")
                    || name.starts_with("PANEL ")
                    || roster::is_reserved(&name)
                {
                    return None;
                }
                Some(ParsedLine::CharacterNameOnly {
                    name,
                    modifier: caps.get(2).map(|m| m.as_str().trim().to_string()),
                })
            },
        ),
        LineRule::new("blockquote-prose", r"^>\s*(.+)$", |caps| {
            Some(ParsedLine::PlainText {
                text: strip_emphasis(&caps[1]),
            })
        }),
    ]
});

/*!
 * Pattern table for standard screenplay format.
 *
 * Screenplays structure scenes with `INT./EXT. LOCATION - TIME` headings
 * and attribute dialogue with a centered all-caps character cue followed
 * by indented speech. Shot/camera directions open a new beat; transitions
 * close the current one.
 */

use once_cell::sync::Lazy;

use crate::classify::{LineRule, ParsedLine, SectionKind, strip_emphasis};
use crate::roster;

/// All-caps lines that look like character cues but never are.
const NON_CHARACTER_WORDS: &[&str] = &[
    "THE END",
    "END",
    "FIN",
    "CONTINUED",
    "MORE",
    "FADE IN",
    "FADE OUT",
    "BLACK",
    "SUPER",
    "TITLE",
    "INTERCUT",
];

/// Rules shared between the screenplay and TV-script tables.
pub(crate) fn base_rules() -> Vec<LineRule> {
    vec![
        LineRule::new(
            "scene-heading",
            r"^(?:\d+[.)]?\s+)?((?i)INT\.?/EXT|EXT\.?/INT|INT|EXT|I/E)\.?\s+(.+?)(?:\s*[-–—]\s*([^-–—]+))?$",
            |caps| {
                Some(ParsedLine::SceneHeading {
                    location: format!("{}. {}", caps[1].replace('.', "").to_uppercase(), caps[2].trim()),
                    time_of_day: caps.get(3).map(|m| m.as_str().trim().to_string()),
                })
            },
        ),
        LineRule::new(
            "cast-section-header",
            r"(?i)^(?:CHARACTERS|CAST OF CHARACTERS|CAST|CHARACTER LIST)\s*:?\s*$",
            |_| {
                Some(ParsedLine::SectionHeader {
                    kind: SectionKind::CastList,
                })
            },
        ),
        LineRule::new(
            "screen-text",
            r"^((?i)SUPER|CHYRON|TITLE|ON[ \-]?SCREEN(?:\s+TEXT)?)\s*:\s*(.+)$",
            |caps| {
                Some(ParsedLine::ScreenText {
                    text: strip_emphasis(&caps[2]),
                    subtype: Some(caps[1].trim().to_uppercase()),
                })
            },
        ),
        LineRule::new(
            "transition",
            r"^((?:SMASH |MATCH |HARD |JUMP )?CUT TO|DISSOLVE TO|FADE IN|FADE OUT|FADE TO(?: BLACK)?|WIPE TO|INTERCUT|TIME CUT|FLASHBACK|END OF FLASHBACK)\s*[:.]?\s*$",
            |caps| {
                Some(ParsedLine::Transition {
                    label: caps[1].trim().to_string(),
                })
            },
        ),
        LineRule::new(
            "transition-with-target",
            r"^((?:SMASH |MATCH |HARD |JUMP )?CUT TO|DISSOLVE TO|FADE TO)\s*:\s*(.+)$",
            |caps| {
                Some(ParsedLine::Transition {
                    label: format!("{}: {}", caps[1].trim(), caps[2].trim()),
                })
            },
        ),
        LineRule::new(
            "shot-direction-bare",
            r"^(CLOSE UP|EXTREME CLOSE UP|WIDE SHOT|NEW ANGLE|REVERSE ANGLE|HIGH ANGLE|LOW ANGLE|AERIAL SHOT|TRACKING SHOT|OVERHEAD|TWO SHOT|INSERT)\s*[:.]?\s*$",
            |caps| {
                Some(ParsedLine::ShotDirection {
                    marker: caps[1].trim().to_string(),
                    description: String::new(),
                })
            },
        ),
        LineRule::new(
            "shot-direction",
            r"^(EXTREME CLOSE UP|CLOSE ON|CLOSE UP|TIGHT ON|WIDE ON|WIDE SHOT|ANGLE ON|NEW ANGLE|REVERSE ANGLE|HIGH ANGLE|LOW ANGLE|POV|AERIAL SHOT|TRACKING SHOT|TRACKING|PUSH IN|PULL BACK|INSERT|OVERHEAD|TWO SHOT|ECU)(?:\s*[:\-–—]\s*|\s+)(.+)$",
            |caps| {
                Some(ParsedLine::ShotDirection {
                    marker: caps[1].trim().to_string(),
                    description: caps[2].trim().to_string(),
                })
            },
        ),
        LineRule::new("parenthetical", r"^\(([^)]*)\)$", |caps| {
            Some(ParsedLine::StageDirection {
                text: caps[1].trim().to_string(),
            })
        }),
        LineRule::new(
            "dialogue-inline",
            r"^([A-Z][A-Z0-9 .\-']{0,40}?)(?:\s*\(([^)]+)\))?\s*:\s*(.+)$",
            |caps| {
                Some(ParsedLine::Dialogue {
                    character: strip_emphasis(&caps[1]),
                    modifier: caps.get(2).map(|m| m.as_str().trim().to_string()),
                    text: strip_emphasis(&caps[3]),
                })
            },
        ),
        LineRule::new(
            "character-cue",
            r"^([A-Z][A-Z0-9 .\-']{1,40}?)(?:\s*\(([A-Za-z.' ]+)\))?$",
            |caps| {
                let name = strip_emphasis(&caps[1]);
                if name.split_whitespace().count() > 4
                    || NON_CHARACTER_WORDS.contains(&name.as_str())
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
    ]
}

pub(crate) static SCREENPLAY_RULES: Lazy<Vec<LineRule>> = Lazy::new(base_rules);

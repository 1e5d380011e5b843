/*!
 * Pattern table for stage-play format.
 *
 * Stage plays number structure as `ACT n` / `SCENE n`, attribute dialogue
 * as `CHARACTER: text` or `CHARACTER. text` (with bracketed offstage
 * modifiers), wrap stage business in parentheses or brackets, and carry
 * technical cues (`LIGHTS:`, `SOUND:`, `MUSIC:`). A stage direction built
 * around a blocking verb (entrances, exits, crosses) forces a new beat.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::classify::{LineRule, ParsedLine, SectionKind, strip_emphasis};
use crate::formats::NUM_TOKEN;
use crate::numbering::{ROMAN_CAP_ACT, normalize_number, normalize_number_capped};
use crate::roster;

/// Movement verbs that force a new beat when they appear in a stage
/// direction.
static BLOCKING_VERBS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:enters?|re-enters?|exits?|exeunt|crosses|rises|sits|kneels|rushes|storms|collapses)\b")
        .unwrap()
});

/// True when a stage direction contains a blocking verb and should open a
/// new beat rather than extend the current one.
pub(crate) fn is_blocking_direction(text: &str) -> bool {
    BLOCKING_VERBS.is_match(text)
}

const NON_CHARACTER_WORDS: &[&str] = &["THE END", "END", "FIN", "CURTAIN", "BLACKOUT", "INTERVAL"];

pub(crate) static STAGEPLAY_RULES: Lazy<Vec<LineRule>> = Lazy::new(|| {
    vec![
        LineRule::new(
            "cast-section-header",
            r"(?i)^(?:\*\*|__)?(?:CHARACTERS|CAST OF CHARACTERS|CAST|CHARACTER LIST|DRAMATIS PERSONAE)(?:\*\*|__)?\s*:?\s*$",
            |_| {
                Some(ParsedLine::SectionHeader {
                    kind: SectionKind::CastList,
                })
            },
        ),
        LineRule::new(
            "act-marker",
            &format!(r"(?i)^(?:\*\*|__)?ACT[ \t]+({NUM_TOKEN})(?:\*\*|__)?\s*[:.\-]?\s*$"),
            |caps| {
                Some(ParsedLine::ActMarker {
                    number: normalize_number_capped(&caps[1], ROMAN_CAP_ACT),
                    label: format!("ACT {}", caps[1].trim().to_uppercase()),
                })
            },
        ),
        LineRule::new(
            "scene-marker",
            &format!(
                r"(?i)^(?:\*\*|__)?SCENE[ \t]+({NUM_TOKEN})(?:\*\*|__)?\s*(?:\(([^)]*)\))?\s*[:.\-]?\s*$"
            ),
            |caps| {
                Some(ParsedLine::PageMarker {
                    number: normalize_number(&caps[1]),
                    annotation: caps.get(2).map(|m| m.as_str().trim().to_string()),
                })
            },
        ),
        LineRule::new(
            "technical-cue",
            r"^(LIGHTS|SOUND|MUSIC|LX|FX|SFX|CUE|PROJECTION)\s*:\s*(.+)$",
            |caps| {
                Some(ParsedLine::TechnicalCue {
                    text: format!("{}: {}", &caps[1], caps[2].trim()),
                })
            },
        ),
        LineRule::new("stage-direction", r"^[\(\[](.+)[\)\]]$", |caps| {
            Some(ParsedLine::StageDirection {
                text: caps[1].trim().to_string(),
            })
        }),
        LineRule::new(
            "dialogue-colon",
            r"^([A-Z][A-Z0-9 .\-']{0,40}?)(?:\s*[\(\[]([^\)\]]+)[\)\]])?\s*:\s*(.+)$",
            |caps| {
                Some(ParsedLine::Dialogue {
                    character: strip_emphasis(&caps[1]),
                    modifier: caps.get(2).map(|m| m.as_str().trim().to_string()),
                    text: strip_emphasis(&caps[3]),
                })
            },
        ),
        LineRule::new(
            "dialogue-period",
            r"^([A-Z][A-Z0-9 \-']{0,40}?)(?:\s*[\(\[]([^\)\]]+)[\)\]])?\s*\.\s+(.+)$",
            |caps| {
                let name = strip_emphasis(&caps[1]);
                if name.split_whitespace().count() > 3 {
                    return None;
                }
                Some(ParsedLine::Dialogue {
                    character: name,
                    modifier: caps.get(2).map(|m| m.as_str().trim().to_string()),
                    text: strip_emphasis(&caps[3]),
                })
            },
        ),
        LineRule::new(
            "character-name-only",
            r"^(?:\*\*|__)?([A-Z][A-Z0-9 .\-']{1,40}?)(?:\s*[\(\[]([A-Za-z.' ]+)[\)\]])?(?:\*\*|__)?$",
            |caps| {
                let name = strip_emphasis(&caps[1]);
                if name.split_whitespace().count() > 4
                    || NON_CHARACTER_WORDS.contains(&name.as_str())
                    || name.starts_with("ACT ")
                    || name.starts_with("SCENE ")
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
});

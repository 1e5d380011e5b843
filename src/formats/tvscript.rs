/*!
 * Pattern table for TV-series scripts.
 *
 * TV scripts are screenplays with an episode-level layer on top: TEASER /
 * COLD OPEN / TAG markers and numbered acts group the scenes. The table
 * therefore puts the episode-level recognizers first and reuses the
 * screenplay rules for everything below them.
 */

use once_cell::sync::Lazy;

use crate::classify::{LineRule, ParsedLine};
use crate::formats::{NUM_TOKEN, screenplay};
use crate::numbering::normalize_number;

pub(crate) static TVSCRIPT_RULES: Lazy<Vec<LineRule>> = Lazy::new(|| {
    let mut rules = vec![
        LineRule::new(
            "episode-section-marker",
            r"^(?:\*\*|__)?((?i)TEASER|COLD OPEN|TAG|EPILOGUE|OPENING TITLES|MAIN TITLES|END OF (?:TEASER|COLD OPEN|SHOW|EPISODE|ACT(?:[ \t]+\S+)?))(?:\*\*|__)?\s*:?\s*$",
            |caps| {
                Some(ParsedLine::ActMarker {
                    number: 0,
                    label: caps[1].trim().to_uppercase(),
                })
            },
        ),
        LineRule::new(
            "act-marker",
            &format!(r"(?i)^(?:\*\*|__)?ACT[ \t]+({NUM_TOKEN})(?:\*\*|__)?\s*[:.\-]?\s*$"),
            |caps| {
                Some(ParsedLine::ActMarker {
                    number: normalize_number(&caps[1]),
                    label: format!("ACT {}", caps[1].trim().to_uppercase()),
                })
            },
        ),
        LineRule::new(
            "episode-heading",
            &format!(r"(?i)^EPISODE[ \t]+({NUM_TOKEN})(?:\s*[:\-–—]\s*(.+))?$"),
            |caps| {
                let number = normalize_number(&caps[1]);
                let label = match caps.get(2) {
                    Some(title) => format!("EPISODE {}: {}", &caps[1], title.as_str().trim()),
                    None => format!("EPISODE {}", &caps[1]),
                };
                Some(ParsedLine::ActMarker {
                    number,
                    label: label.to_uppercase(),
                })
            },
        ),
    ];
    rules.extend(screenplay::base_rules());
    rules
});

/*!
 * Per-format pattern tables.
 *
 * Each submodule supplies an ordered list of line rules for one script
 * format. Ordering is a correctness contract: structural recognizers
 * (page/scene/panel markers, technical cues) come before generic fallbacks
 * (dialogue, bare character names), and first match wins.
 */

pub(crate) mod comic;
pub(crate) mod screenplay;
pub(crate) mod stageplay;
pub(crate) mod tvscript;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::classify::LineRule;
use crate::options::ScriptFormat;

/// Number token accepted by structural markers: decimal, roman numeral or
/// word form (two words only for the twenty-something compounds, so a
/// marker word followed by free prose never parses as a number).
pub(crate) const NUM_TOKEN: &str = r"(?:[0-9]+|(?i:TWENTY)[ \-][A-Za-z]+|[A-Za-z]+)";

/// The ordered pattern table for a format.
pub(crate) fn table_for(format: ScriptFormat) -> &'static [LineRule] {
    match format {
        ScriptFormat::Comic => &comic::COMIC_RULES,
        ScriptFormat::Screenplay => &screenplay::SCREENPLAY_RULES,
        ScriptFormat::StagePlay => &stageplay::STAGEPLAY_RULES,
        ScriptFormat::TvScript => &tvscript::TVSCRIPT_RULES,
    }
}

static COMIC_SIGNAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^\s*(?:#+\s*)?(?:\*\*|__)?(?:PAGE|PANEL)[ \t]+\S+").unwrap()
});

static SCREENPLAY_SIGNAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^\s*(?:\d+[.)]?\s+)?(?:INT|EXT|I/E)\.?\s+\S+|(?m)^\s*(?:CUT TO|FADE IN|FADE OUT|DISSOLVE TO)[:.]?\s*$").unwrap()
});

static STAGEPLAY_SIGNAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^\s*(?:ACT|SCENE)\s+\S+\s*[:.\-]?\s*$|(?m)^\s*(?:LIGHTS|SOUND|MUSIC|LX)\s*:").unwrap()
});

static TV_SIGNAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^\s*(?:TEASER|COLD OPEN|TAG|EPISODE\s+\S+.*|END OF (?:TEASER|ACT.*))\s*:?\s*$").unwrap()
});

/// Guess the most likely format by counting structural-marker hits. Ties
/// with comic markers present resolve to comic; a script with no
/// recognizable markers at all defaults to screenplay.
pub fn detect_format(text: &str) -> ScriptFormat {
    let comic = COMIC_SIGNAL.find_iter(text).count();
    let screenplay = SCREENPLAY_SIGNAL.find_iter(text).count();
    let stageplay = STAGEPLAY_SIGNAL.find_iter(text).count();
    let tv = TV_SIGNAL.find_iter(text).count();

    if tv > 0 && (screenplay > 0 || tv >= comic.max(stageplay)) {
        return ScriptFormat::TvScript;
    }
    if comic > 0 && comic >= screenplay && comic >= stageplay {
        return ScriptFormat::Comic;
    }
    if stageplay > screenplay {
        return ScriptFormat::StagePlay;
    }
    if screenplay > 0 {
        return ScriptFormat::Screenplay;
    }
    if stageplay > 0 {
        return ScriptFormat::StagePlay;
    }
    ScriptFormat::Screenplay
}

/*!
 * Parser configuration.
 *
 * `ParseOptions` is pure data: the parser does no I/O, so there is no file
 * loading here, only serde-friendly settings the embedding application can
 * persist alongside its own configuration.
 */

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

/// Script format a pattern table exists for.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScriptFormat {
    /// Markdown-flavored comic script (PAGE/PANEL markers, blockquote dialogue)
    #[default]
    Comic,
    /// Standard screenplay format (INT./EXT. headings, centered character cues)
    Screenplay,
    /// Stage-play format (ACT/SCENE markers, technical cues, blocking)
    StagePlay,
    /// TV-script format (screenplay plus teaser/act episode markers)
    TvScript,
}

impl ScriptFormat {
    /// Lowercase identifier used in serialized form.
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Comic => "comic".to_string(),
            Self::Screenplay => "screenplay".to_string(),
            Self::StagePlay => "stageplay".to_string(),
            Self::TvScript => "tvscript".to_string(),
        }
    }

    /// Guess the most likely format of a script by scoring its structural
    /// markers. See `formats::detect_format` for the scoring rules.
    pub fn detect(text: &str) -> Self {
        crate::formats::detect_format(text)
    }
}

impl std::fmt::Display for ScriptFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for ScriptFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "comic" => Ok(Self::Comic),
            "screenplay" | "film" | "movie" => Ok(Self::Screenplay),
            "stageplay" | "stage" | "play" | "theatre" | "theater" => Ok(Self::StagePlay),
            "tvscript" | "tv" | "tvseries" | "television" => Ok(Self::TvScript),
            _ => Err(anyhow!("Invalid script format: {}", s)),
        }
    }
}

/// Settings for one parse invocation.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ParseOptions {
    /// Format to parse as; `None` auto-detects from the text
    pub format: Option<ScriptFormat>,

    /// Record a warning when a page contains two panels with the same number
    pub warn_duplicate_panels: bool,

    /// Convert page prose that never saw an explicit panel marker into an
    /// implicit first panel (otherwise it stays in the page notes)
    pub implicit_panels: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            format: None,
            warn_duplicate_panels: true,
            implicit_panels: true,
        }
    }
}

impl ParseOptions {
    /// Options pinned to a specific format (skips auto-detection).
    pub fn for_format(format: ScriptFormat) -> Self {
        Self {
            format: Some(format),
            ..Self::default()
        }
    }

    /// Strict preset: no implicit structure, all anomalies warned about.
    pub fn strict() -> Self {
        Self {
            format: None,
            warn_duplicate_panels: true,
            implicit_panels: false,
        }
    }
}

/*!
 * Re-parse reconciliation.
 *
 * After a script has been imported once, the user may edit the text and
 * import it again. The reparse engine runs the full pipeline on the new
 * text and classifies every panel against the previously persisted set,
 * keyed by the stable `(page, panel)` coordinate. It never applies
 * changes itself — the caller selects which diffs to accept.
 */

use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::ReparseError;
use crate::model::{ParseResult, ParsedPanel};
use crate::options::ParseOptions;
use crate::parser::ScriptParser;

/// Minimal persisted view of a panel, enough to re-associate it after a
/// re-parse and to detect description changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelSnapshot {
    /// Page the panel lives on
    pub page_number: u32,

    /// Panel number within that page
    pub panel_number: u32,

    /// Description text at snapshot time
    #[serde(default)]
    pub description: String,
}

impl PanelSnapshot {
    /// Create a snapshot from raw coordinates and description text.
    pub fn new(page_number: u32, panel_number: u32, description: &str) -> Self {
        Self {
            page_number,
            panel_number,
            description: description.to_string(),
        }
    }

    fn from_panel(page_number: u32, panel: &ParsedPanel) -> Self {
        Self::new(page_number, panel.panel_number, &panel.description)
    }

    /// The stable coordinate this snapshot is keyed by.
    pub fn coordinate(&self) -> (u32, u32) {
        (self.page_number, self.panel_number)
    }
}

/// Classification of one panel coordinate across a re-parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffKind {
    /// Present only in the new parse
    Added,
    /// Present only in the previously persisted set
    Removed,
    /// Present in both with differing description text
    Modified,
    /// Present in both, description unchanged
    Unchanged,
}

/// One entry of the reconciliation output, addressed by its position in
/// the returned list when the caller accepts a subset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelDiff {
    /// What happened to this coordinate
    pub kind: DiffKind,

    /// Page number of the coordinate
    pub page_number: u32,

    /// Panel number of the coordinate
    pub panel_number: u32,

    /// Previous state, absent for `Added`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<PanelSnapshot>,

    /// New state, absent for `Removed`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<PanelSnapshot>,
}

impl PanelDiff {
    /// True for entries the caller may want to act on.
    pub fn is_change(&self) -> bool {
        self.kind != DiffKind::Unchanged
    }
}

/// Aggregate counts over a diff list, for badge-style UI summaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    pub added: usize,
    pub removed: usize,
    pub modified: usize,
    pub unchanged: usize,
}

impl DiffSummary {
    /// Count diff kinds over a classified list.
    pub fn of(diffs: &[PanelDiff]) -> Self {
        let mut summary = Self::default();
        for diff in diffs {
            match diff.kind {
                DiffKind::Added => summary.added += 1,
                DiffKind::Removed => summary.removed += 1,
                DiffKind::Modified => summary.modified += 1,
                DiffKind::Unchanged => summary.unchanged += 1,
            }
        }
        summary
    }

    /// True when the re-parse changed nothing.
    pub fn is_unchanged(&self) -> bool {
        self.added == 0 && self.removed == 0 && self.modified == 0
    }
}

/// Re-parse engine: runs the pipeline on edited text and reconciles the
/// outcome against previously persisted panels.
#[derive(Debug, Clone, Default)]
pub struct ReparseEngine {
    parser: ScriptParser,
}

impl ReparseEngine {
    /// Create an engine parsing with the given options.
    pub fn new(options: ParseOptions) -> Self {
        Self {
            parser: ScriptParser::new(options),
        }
    }

    /// Create an engine with default parse options.
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Re-parse `text` and classify every `(page, panel)` coordinate
    /// against `existing`. The returned list is sorted ascending by
    /// coordinate.
    ///
    /// Fails without classifying anything when the edited text does not
    /// parse (the caller keeps its prior state) or when `existing`
    /// contains two snapshots with the same coordinate.
    pub fn reparse(
        &self,
        text: &str,
        existing: &[PanelSnapshot],
    ) -> Result<Vec<PanelDiff>, ReparseError> {
        let mut old_map: BTreeMap<(u32, u32), &PanelSnapshot> = BTreeMap::new();
        for snapshot in existing {
            if old_map.insert(snapshot.coordinate(), snapshot).is_some() {
                return Err(ReparseError::DuplicateCoordinate {
                    page: snapshot.page_number,
                    panel: snapshot.panel_number,
                });
            }
        }

        let result = self.parser.parse(text);
        if !result.success {
            let message = result
                .errors
                .first()
                .cloned()
                .unwrap_or_else(|| "unknown parse failure".to_string());
            return Err(ReparseError::ParseFailed(message));
        }

        let new_map = snapshot_map(&result);
        debug!(
            "reconciling {} existing panels against {} re-parsed panels",
            old_map.len(),
            new_map.len()
        );

        let mut diffs = Vec::new();
        for (&(page, panel), snapshot) in &new_map {
            match old_map.get(&(page, panel)) {
                None => diffs.push(PanelDiff {
                    kind: DiffKind::Added,
                    page_number: page,
                    panel_number: panel,
                    before: None,
                    after: Some(snapshot.clone()),
                }),
                Some(&previous) => {
                    let kind = if previous.description != snapshot.description {
                        DiffKind::Modified
                    } else {
                        DiffKind::Unchanged
                    };
                    diffs.push(PanelDiff {
                        kind,
                        page_number: page,
                        panel_number: panel,
                        before: Some(previous.clone()),
                        after: Some(snapshot.clone()),
                    });
                }
            }
        }
        for (&(page, panel), &previous) in &old_map {
            if !new_map.contains_key(&(page, panel)) {
                diffs.push(PanelDiff {
                    kind: DiffKind::Removed,
                    page_number: page,
                    panel_number: panel,
                    before: Some(previous.clone()),
                    after: None,
                });
            }
        }

        diffs.sort_by_key(|d| (d.page_number, d.panel_number));
        Ok(diffs)
    }
}

/// Snapshot every panel of a parse result, keyed by coordinate. When a
/// page retained duplicate panel numbers the later panel wins, matching
/// the keyed-map semantics of the persisted side.
fn snapshot_map(result: &ParseResult) -> BTreeMap<(u32, u32), PanelSnapshot> {
    let mut map = BTreeMap::new();
    for page in &result.pages {
        for panel in &page.panels {
            map.insert(
                (page.page_number, panel.panel_number),
                PanelSnapshot::from_panel(page.page_number, panel),
            );
        }
    }
    map
}

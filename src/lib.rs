/*!
 * # Scriptbreak - Multi-format Script Breakdown
 *
 * A Rust library that parses loosely formatted scripts — comic scripts,
 * screenplays, stage plays and TV scripts — into a normalized page /
 * panel / dialogue structure.
 *
 * ## Features
 *
 * - Pattern tables per format, applied first-match-wins per line
 * - Word and roman numeral normalization for PAGE / SCENE / ACT markers
 * - Implicit structure recovery (missing first page or panel markers)
 * - Character roster with appearance tallies and cast-list descriptions
 * - Visual marker and aspect-ratio inference from panel descriptions
 * - Format auto-detection when the caller does not pin one
 * - Re-parse reconciliation keyed by `(page, panel)` coordinates
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `parser`: Public facade running the full pipeline
 * - `options`: Parse options and the `ScriptFormat` enum
 * - `model`: Output data structures (`ParseResult` and friends)
 * - `reparse`: Diffing a fresh parse against persisted panels
 * - `errors`: Custom error types for parsing and re-parsing
 *
 * Internal stages, in pipeline order: `classify` (per-line pattern
 * tables, populated by `formats`), `numbering` (number-word and roman
 * normalization), `accumulator` (fold of classified lines into pages and
 * panels, with `roster` tracking characters and `visual` inferring panel
 * presentation), and `assembler` (ordering, de-duplication and the
 * success predicate).
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod errors;
pub mod model;
pub mod numbering;
pub mod options;
pub mod parser;
pub mod reparse;
pub mod visual;

// Pipeline internals
pub(crate) mod accumulator;
pub(crate) mod assembler;
pub(crate) mod classify;
pub(crate) mod formats;
pub(crate) mod roster;

// Re-export main types for easier usage
pub use errors::{ParseError, ReparseError};
pub use model::{
    AspectRatio, CharacterCount, DialogueKind, DialogueLine, IssueMetadata, ParseResult,
    ParsedPage, ParsedPanel,
};
pub use options::{ParseOptions, ScriptFormat};
pub use parser::{ScriptParser, parse_script, parse_script_as};
pub use reparse::{DiffKind, DiffSummary, PanelDiff, PanelSnapshot, ReparseEngine};

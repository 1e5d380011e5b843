/*!
 * Error types for the scriptbreak parsing engine.
 *
 * This module contains custom error types for different parts of the engine,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors raised by the parsing pipeline.
///
/// These never escape `ScriptParser::parse` directly: the pipeline reports
/// them through the returned `ParseResult` so callers always receive a
/// structured result rather than a raw fault.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The script contained no recognizable page, scene, panel or dialogue
    /// structure at all
    #[error("no story structure detected in script")]
    NoStructure,
}

/// Errors that can occur when reconciling a re-parsed script against a
/// previously imported panel set
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReparseError {
    /// Two supplied snapshots share the same (page, panel) coordinate,
    /// making the diff base ambiguous
    #[error("duplicate snapshot coordinate: page {page}, panel {panel}")]
    DuplicateCoordinate {
        /// Page number of the colliding snapshots
        page: u32,
        /// Panel number of the colliding snapshots
        panel: u32,
    },

    /// The edited text failed to parse, so no diff can be classified
    #[error("re-parse failed: {0}")]
    ParseFailed(String),
}

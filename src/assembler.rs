/*!
 * Final assembly of a `ParseResult`.
 *
 * Pages are sorted ascending and de-duplicated (the later occurrence of a
 * page number wins, with a warning), the character roster is built from
 * the registry, and the success predicate is evaluated: at least one page
 * is sufficient for success even when anomalies were logged, while zero
 * pages is always an explicit "no story structure" error carrying empty
 * page and character collections.
 */

use std::collections::BTreeMap;

use log::warn;

use crate::accumulator::AccumulatorOutput;
use crate::errors::ParseError;
use crate::model::{ParseResult, ParsedPage};

/// Turn the accumulator's output into the final result.
pub(crate) fn assemble(output: AccumulatorOutput) -> ParseResult {
    let AccumulatorOutput {
        pages,
        registry,
        mut errors,
        mut warnings,
        mut issues,
    } = output;

    let mut by_number: BTreeMap<u32, ParsedPage> = BTreeMap::new();
    for page in pages {
        if let Some(previous) = by_number.insert(page.page_number, page) {
            warn!("duplicate page number {}", previous.page_number);
            issues.duplicate_pages += 1;
            warnings.push(format!(
                "duplicate page number {}; keeping the later occurrence",
                previous.page_number
            ));
        }
    }
    let pages: Vec<ParsedPage> = by_number.into_values().collect();

    if pages.is_empty() {
        // Structural failure reports one error and empty collections; a
        // cast list without any page structure does not leak a roster.
        errors.push(ParseError::NoStructure.to_string());
        return ParseResult {
            success: false,
            pages,
            characters: Vec::new(),
            errors,
            warnings,
            issue_metadata: Some(issues),
        };
    }

    let characters = registry.into_roster();
    let success = errors.is_empty() || !pages.is_empty();

    ParseResult {
        success,
        pages,
        characters,
        errors,
        warnings,
        issue_metadata: Some(issues),
    }
}

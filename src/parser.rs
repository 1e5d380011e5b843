/*!
 * Public parsing facade.
 *
 * `ScriptParser` wires the pipeline together: line-ending normalization,
 * format selection, per-line classification, accumulation and assembly.
 * The pipeline is total: structural problems become errors and warnings
 * inside the returned `ParseResult`, never a raw error escaping to the
 * caller.
 */

use log::debug;

use crate::accumulator::Accumulator;
use crate::classify::LineClassifier;
use crate::model::ParseResult;
use crate::options::{ParseOptions, ScriptFormat};

/// Multi-format script parser. Stateless between calls: every `parse`
/// invocation builds its own accumulator, so concurrent parses on
/// different inputs are independent.
#[derive(Debug, Clone, Default)]
pub struct ScriptParser {
    options: ParseOptions,
}

impl ScriptParser {
    /// Create a parser with the given options.
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Create a parser with default options (format auto-detected).
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Create a parser pinned to one format.
    pub fn for_format(format: ScriptFormat) -> Self {
        Self::new(ParseOptions::for_format(format))
    }

    /// The options this parser runs with.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse a script into its normalized breakdown.
    ///
    /// Never fails with an error value: structural problems are reported
    /// through the returned result's `success`, `errors` and `warnings`
    /// fields.
    pub fn parse(&self, text: &str) -> ParseResult {
        let normalized = normalize_line_endings(text);
        let format = self
            .options
            .format
            .unwrap_or_else(|| ScriptFormat::detect(&normalized));
        debug!("parsing as {}", format);

        let classifier = LineClassifier::new(format);
        let mut accumulator = Accumulator::new(&self.options);
        for raw in normalized.lines() {
            let context = accumulator.context();
            let parsed = classifier.classify(raw, &context);
            accumulator.step(raw, parsed);
        }

        crate::assembler::assemble(accumulator.finish())
    }
}

/// Parse a script with default options, auto-detecting the format.
pub fn parse_script(text: &str) -> ParseResult {
    ScriptParser::with_defaults().parse(text)
}

/// Parse a script as a specific format.
pub fn parse_script_as(text: &str, format: ScriptFormat) -> ParseResult {
    ScriptParser::for_format(format).parse(text)
}

/// Normalize `\r\n` and bare `\r` line endings to `\n`.
fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

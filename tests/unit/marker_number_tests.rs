/*!
 * Tests for marker number normalization across word, roman and decimal
 * forms
 */

use scriptbreak::numbering::{ROMAN_CAP_ACT, normalize_number, normalize_number_capped};
use scriptbreak::{ScriptFormat, parse_script_as};

/// Test that word, roman and decimal page markers all normalize
#[test]
fn test_markerNumbers_wordRomanAndDecimalForms_shouldProduceSamePage() {
    for marker in ["PAGE 14", "PAGE FOURTEEN", "Page Fourteen", "PAGE XIV"] {
        let text = format!("{marker}\nPanel 1\nA hallway.");
        let result = parse_script_as(&text, ScriptFormat::Comic);
        assert!(result.success, "marker {marker:?} failed");
        assert_eq!(result.page_numbers(), vec![14], "marker {marker:?}");
    }
}

/// Test roman markers that open with a subtractive pair
#[test]
fn test_markerNumbers_subtractiveLeadingRoman_shouldOpenPage() {
    for (marker, expected) in [("PAGE IV", 4), ("PAGE IX", 9)] {
        let text = format!("{marker}\nPanel 1\nA hallway.");
        let result = parse_script_as(&text, ScriptFormat::Comic);
        assert!(result.errors.is_empty(), "marker {marker:?} was rejected");
        assert_eq!(result.page_numbers(), vec![expected], "marker {marker:?}");
    }
}

/// Test hyphen, space and concatenated twenty-compounds
#[test]
fn test_markerNumbers_twentyCompoundVariants_shouldShareOneValue() {
    assert_eq!(normalize_number("twenty-one"), 21);
    assert_eq!(normalize_number("twenty one"), 21);
    assert_eq!(normalize_number("twentyone"), 21);
    assert_eq!(normalize_number("TWENTY-EIGHT"), 28);
}

/// Test that non-contiguous page numbers are preserved and sorted
#[test]
fn test_markerNumbers_withGapsAndDisorder_shouldSortWithoutFilling() {
    let text = "PAGE 20\nPanel 1\na\n\nPAGE 1\nPanel 1\nb\n\nPAGE TWENTY-ONE\nPanel 1\nc\n\nPAGE 14\nPanel 1\nd";
    let result = parse_script_as(text, ScriptFormat::Comic);
    assert!(result.success);
    assert_eq!(result.page_numbers(), vec![1, 14, 20, 21]);
}

/// Test large decimal pages typical of full issues
#[test]
fn test_markerNumbers_withLargeDecimals_shouldKeepExactValues() {
    let text = "PAGE 14\nPanel 1\na\n\nPAGE 50\nPanel 1\nb\n\nPAGE 99\nPanel 1\nc";
    let result = parse_script_as(text, ScriptFormat::Comic);
    assert_eq!(result.page_numbers(), vec![14, 50, 99]);
}

/// Test that an unparseable marker number is reported and its line kept
/// as prose
#[test]
fn test_markerNumbers_withUnrecognizedToken_shouldErrorAndKeepLine() {
    let text = "PAGE 1\nPanel 1\nA hallway.\nPAGE NINETYNINE";
    let result = parse_script_as(text, ScriptFormat::Comic);
    // One page exists, so the parse still succeeds despite the error
    assert!(result.success);
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].contains("PAGE NINETYNINE"));
    let panel = result.find_panel(1, 1).unwrap();
    assert!(panel.description.contains("PAGE NINETYNINE"));
    assert_eq!(result.issue_metadata.unwrap().unrecognized_numbers, 1);
}

/// Test the act-marker roman cap used by stage plays
#[test]
fn test_markerNumbers_actRomanCap_shouldRejectNumeralsAboveFive() {
    assert_eq!(normalize_number_capped("IV", ROMAN_CAP_ACT), 4);
    assert_eq!(normalize_number_capped("V", ROMAN_CAP_ACT), 5);
    assert_eq!(normalize_number_capped("IX", ROMAN_CAP_ACT), 0);
    // Decimal and word forms ignore the cap
    assert_eq!(normalize_number_capped("9", ROMAN_CAP_ACT), 9);
    assert_eq!(normalize_number_capped("nine", ROMAN_CAP_ACT), 9);
}

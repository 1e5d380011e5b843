/*!
 * Tests for TV-script-format parsing
 */

use scriptbreak::{ScriptFormat, parse_script_as};

use crate::common::parse_tv;

/// Test teaser/act grouping recorded as scene notes
#[test]
fn test_tvParse_withSharedSample_shouldGroupScenesUnderEpisodeSections() {
    let result = parse_tv();
    assert!(result.success);
    assert!(result.errors.is_empty());
    assert_eq!(result.page_numbers(), vec![1, 2]);

    let teaser_notes = result.pages[0].notes.as_deref().unwrap();
    assert!(teaser_notes.contains("TEASER"));
    assert!(teaser_notes.contains("INT. NEWSROOM - NIGHT"));
    assert!(teaser_notes.contains("END OF TEASER"));

    let act_notes = result.pages[1].notes.as_deref().unwrap();
    assert!(act_notes.contains("ACT ONE"));
    assert!(act_notes.contains("END OF ACT ONE"));
}

/// Test that the screenplay dialogue rules apply inside TV scenes
#[test]
fn test_tvParse_withSharedSample_shouldAttributeDialogueLikeScreenplay() {
    let result = parse_tv();

    let teaser = &result.pages[0].panels[0];
    assert!(teaser.description.contains("Monitors flicker"));
    assert_eq!(teaser.dialogue[0].character, "DANA");

    let act_one = &result.pages[1].panels[0];
    assert_eq!(act_one.dialogue.len(), 2);
    assert_eq!(act_one.dialogue[0].character, "DANA");
    assert_eq!(act_one.dialogue[1].character, "JEREMY");
    assert_eq!(act_one.dialogue[1].text, "(flat) Cued.");
}

/// Test roster aggregation across episode sections
#[test]
fn test_tvParse_withSharedSample_shouldTallyAcrossSections() {
    let result = parse_tv();
    assert_eq!(result.characters.len(), 2);
    assert_eq!(result.characters[0].name, "DANA");
    assert_eq!(result.characters[0].count, 2);
    assert_eq!(result.characters[0].first_page, Some(1));
    assert_eq!(result.characters[1].name, "JEREMY");
    assert_eq!(result.characters[1].count, 1);
}

/// Test an episode heading carrying its title into the notes
#[test]
fn test_tvParse_withEpisodeHeading_shouldCarryTitleIntoNotes() {
    let text = "EPISODE 5 - The Long Night\n\nINT. MORGUE - NIGHT\n\nDANA\nStart the tape.";
    let result = parse_script_as(text, ScriptFormat::TvScript);
    assert!(result.success);
    assert!(
        result.pages[0]
            .notes
            .as_deref()
            .unwrap()
            .contains("EPISODE 5: THE LONG NIGHT")
    );
}

/// Test a cold open closing marker annotating the section it closes
#[test]
fn test_tvParse_withColdOpen_shouldAnnotateClosedSection() {
    let text =
        "COLD OPEN\n\nINT. VAULT - NIGHT\n\nDANA\nIt's empty.\n\nEND OF COLD OPEN\n\nACT ONE\n\nINT. LOBBY - DAY\n\nDANA\nCall it in.";
    let result = parse_script_as(text, ScriptFormat::TvScript);
    assert_eq!(result.pages.len(), 2);
    let first = result.pages[0].notes.as_deref().unwrap();
    assert!(first.contains("COLD OPEN"));
    assert!(first.contains("END OF COLD OPEN"));
    assert!(result.pages[1].notes.as_deref().unwrap().contains("ACT ONE"));
}

/*!
 * Tests for stage-play-format script parsing
 */

use scriptbreak::{ScriptFormat, parse_script_as};

use crate::common::parse_stageplay;

/// Test that SCENE markers carry the scene number and ACT markers become
/// notes on the following scene
#[test]
fn test_stageplayParse_withSharedSample_shouldNumberScenesAndRecordActs() {
    let result = parse_stageplay();
    assert!(result.success);
    assert!(result.errors.is_empty());
    assert_eq!(result.page_numbers(), vec![1, 2]);
    assert!(result.pages[0].notes.as_deref().unwrap().contains("ACT ONE"));
}

/// Test that technical cues are preserved as notes, not dialogue
#[test]
fn test_stageplayParse_withSharedSample_shouldKeepTechnicalCuesAsNotes() {
    let result = parse_stageplay();
    let notes = result.pages[0].notes.as_deref().unwrap();
    assert!(notes.contains("LIGHTS: up slowly on a bare stage."));
    // LIGHTS never reaches the roster
    assert!(result.characters.iter().all(|c| c.name != "LIGHTS"));
}

/// Test blocking-verb stage directions opening new beats
#[test]
fn test_stageplayParse_withSharedSample_shouldOpenBeatsOnBlocking() {
    let result = parse_stageplay();

    let first = &result.pages[0].panels[0];
    assert!(first.description.contains("PROSPERO enters"));
    assert_eq!(first.dialogue[0].character, "PROSPERO");
    // Bracketed delivery modifiers are preserved in the text
    assert_eq!(first.dialogue[1].character, "ARIEL");
    assert_eq!(first.dialogue[1].text, "(above) All hail, great master!");

    let second_scene = &result.pages[1].panels[0];
    assert!(second_scene.description.contains("ARIEL crosses"));
}

/// Test cast-list declarations merging with dialogue tallies
#[test]
fn test_stageplayParse_withSharedSample_shouldMergeCastListIntoRoster() {
    let result = parse_stageplay();
    assert_eq!(result.characters.len(), 2);
    assert_eq!(result.characters[0].name, "ARIEL");
    assert_eq!(result.characters[0].count, 2);
    assert_eq!(
        result.characters[0].description.as_deref(),
        Some("a spirit of the air")
    );
    assert_eq!(result.characters[1].name, "PROSPERO");
    assert_eq!(result.characters[1].count, 1);
    assert_eq!(
        result.characters[1].description.as_deref(),
        Some("an exiled duke")
    );
}

/// Test period-separated dialogue attribution
#[test]
fn test_stageplayParse_withPeriodSeparator_shouldAttributeDialogue() {
    let text = "SCENE 1\n\nHAMLET. Words, words, words.";
    let result = parse_script_as(text, ScriptFormat::StagePlay);
    let panel = &result.pages[0].panels[0];
    assert_eq!(panel.dialogue[0].character, "HAMLET");
    assert_eq!(panel.dialogue[0].text, "Words, words, words.");
}

/// Test roman-numeral acts: I through V resolve, larger numerals do not
#[test]
fn test_stageplayParse_withRomanActMarkers_shouldCapAtFive() {
    let text = "ACT III\n\nSCENE 1\n\nHAMLET: Who's there?";
    let result = parse_script_as(text, ScriptFormat::StagePlay);
    assert!(result.success);
    assert!(result.pages[0].notes.as_deref().unwrap().contains("ACT III"));

    // ACT VI is outside the act table; the label survives but no act
    // number is assigned, and the parse stays clean
    let text = "ACT VI\n\nSCENE 1\n\nHAMLET: Still here.";
    let result = parse_script_as(text, ScriptFormat::StagePlay);
    assert!(result.success);
    assert!(result.pages[0].notes.as_deref().unwrap().contains("ACT VI"));
}

/// Test word-numbered scenes with annotations
#[test]
fn test_stageplayParse_withWordNumberedScene_shouldNormalizeAndKeepAnnotation() {
    let text = "SCENE THREE (the garden)\n\nARIEL: Master?";
    let result = parse_script_as(text, ScriptFormat::StagePlay);
    assert_eq!(result.page_numbers(), vec![3]);
    assert!(result.pages[0].notes.as_deref().unwrap().contains("the garden"));
}

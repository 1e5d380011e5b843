/*!
 * Tests for comic-format script parsing
 */

use scriptbreak::{AspectRatio, DialogueKind, ScriptFormat, parse_script_as};

use crate::common::parse_comic;

/// Test the overall page/panel structure of the shared comic sample
#[test]
fn test_comicParse_withSharedSample_shouldBuildPagesAndPanels() {
    let result = parse_comic();
    assert!(result.success);
    assert!(result.errors.is_empty());
    assert_eq!(result.page_numbers(), vec![1, 2]);
    assert_eq!(result.pages[0].panels.len(), 2);
    assert_eq!(result.pages[1].panels.len(), 1);
    assert_eq!(result.total_panels(), 3);
}

/// Test dialogue attribution including captions, SFX and voice-over
#[test]
fn test_comicParse_withSharedSample_shouldAttributeDialogue() {
    let result = parse_comic();

    let first = result.find_panel(1, 1).unwrap();
    assert_eq!(first.dialogue.len(), 2);
    assert_eq!(first.dialogue[0].character, "SARAH");
    assert_eq!(first.dialogue[0].kind, DialogueKind::Spoken);
    assert_eq!(first.dialogue[1].character, "CAPTION");
    assert_eq!(first.dialogue[1].kind, DialogueKind::Caption);
    // Only real characters reach the panel's character set
    assert_eq!(first.characters, vec!["SARAH".to_string()]);

    let second = result.find_panel(1, 2).unwrap();
    assert_eq!(second.dialogue[0].character, "SFX");
    assert_eq!(second.dialogue[1].character, "MARCUS");
    assert_eq!(second.dialogue[1].kind, DialogueKind::Voiceover);

    // Non-delivery modifiers are preserved inside the text
    let third = result.find_panel(2, 1).unwrap();
    assert_eq!(third.dialogue[0].text, "(whispering) Too late for that.");
}

/// Test visual marker and aspect ratio inference from descriptions and
/// panel-marker modifiers
#[test]
fn test_comicParse_withSharedSample_shouldInferVisualPresentation() {
    let result = parse_comic();

    let first = result.find_panel(1, 1).unwrap();
    assert_eq!(first.visual_marker.as_deref(), Some("establishing"));
    assert_eq!(first.aspect_ratio, Some(AspectRatio::Wide));

    let inset = result.find_panel(1, 2).unwrap();
    assert_eq!(inset.visual_marker.as_deref(), Some("inset"));
    assert_eq!(inset.aspect_ratio, Some(AspectRatio::Standard));

    let closeup = result.find_panel(2, 1).unwrap();
    assert_eq!(closeup.visual_marker.as_deref(), Some("closeup"));
}

/// Test that bold/heading markdown around markers is tolerated
#[test]
fn test_comicParse_withMarkdownDecoratedMarkers_shouldParseNormally() {
    let text = "**PAGE ONE**\n\n**Panel 1**\nA quiet street.\n> **BOB:** Morning.";
    let result = parse_script_as(text, ScriptFormat::Comic);
    assert!(result.success);
    assert_eq!(result.page_numbers(), vec![1]);
    let panel = result.find_panel(1, 1).unwrap();
    assert_eq!(panel.dialogue[0].character, "BOB");
    assert_eq!(panel.dialogue[0].text, "Morning.");
}

/// Test that a sentence starting with "Page" stays inside its panel
#[test]
fn test_comicParse_withPageWordInProse_shouldNotSplitPanel() {
    let text = "PAGE 1\nPanel 1\nPage fourteen is the middle of the story.\nBOB: Right.";
    let result = parse_script_as(text, ScriptFormat::Comic);
    assert!(result.success);
    assert!(result.errors.is_empty());
    assert_eq!(result.page_numbers(), vec![1]);
    let panel = result.find_panel(1, 1).unwrap();
    assert!(panel.description.contains("Page fourteen is the middle"));
}

/// Test duplicate panel numbers within a page: both kept, warned about
#[test]
fn test_comicParse_withDuplicatePanelNumbers_shouldKeepBothAndWarn() {
    let text = "PAGE 1\nPanel 2\nFirst take.\nPanel 2\nSecond take.";
    let result = parse_script_as(text, ScriptFormat::Comic);
    assert!(result.success);
    assert_eq!(result.pages[0].panels.len(), 2);
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.issue_metadata.unwrap().duplicate_panels, 1);
}

/// Test duplicate page numbers: later occurrence wins
#[test]
fn test_comicParse_withDuplicatePageNumbers_shouldKeepLater() {
    let text = "PAGE 3\nPanel 1\nFirst version.\n\nPAGE 3\nPanel 1\nSecond version.";
    let result = parse_script_as(text, ScriptFormat::Comic);
    assert!(result.success);
    assert_eq!(result.pages.len(), 1);
    assert!(result.pages[0].panels[0].description.contains("Second version"));
    assert_eq!(result.issue_metadata.unwrap().duplicate_pages, 1);
}

/// Test implicit structure: dialogue with no panel marker lands on an
/// implicit panel 1 seeded with the page prose
#[test]
fn test_comicParse_withoutPanelMarker_shouldCreateImplicitPanel() {
    let text = "PAGE 1\nA dark basement, one bare bulb.\nBOB: Who left the light on?";
    let result = parse_script_as(text, ScriptFormat::Comic);
    assert!(result.success);
    let panel = result.find_panel(1, 1).unwrap();
    assert!(panel.description.contains("dark basement"));
    assert_eq!(panel.dialogue[0].character, "BOB");
}

/// Test artist-note sections attaching to the open panel
#[test]
fn test_comicParse_withArtistNotes_shouldAttachToPanel() {
    let text = "PAGE 1\nPanel 1\nA rooftop chase.\nARTIST NOTES\nKeep the skyline loose.\nNo visible logos.";
    let result = parse_script_as(text, ScriptFormat::Comic);
    let panel = result.find_panel(1, 1).unwrap();
    assert_eq!(
        panel.artist_notes.as_deref(),
        Some("Keep the skyline loose.\nNo visible logos.")
    );
}

/// Test caption attribution: CAPTION (NAME V.O.) tallies the character
#[test]
fn test_comicParse_withAttributedCaption_shouldTallyVoiceover() {
    let text = "PAGE 1\nPanel 1\nA skyline at dusk.\nCAPTION (SARAH V.O.): I never went back.";
    let result = parse_script_as(text, ScriptFormat::Comic);
    let panel = result.find_panel(1, 1).unwrap();
    assert_eq!(panel.dialogue[0].character, "SARAH");
    assert_eq!(panel.dialogue[0].kind, DialogueKind::Voiceover);
    assert_eq!(result.characters.len(), 1);
    assert_eq!(result.characters[0].name, "SARAH");
}

/*!
 * Visual marker and aspect-ratio inference.
 *
 * Panel descriptions and marker modifiers carry loose layout hints
 * ("splash page", "small inset", "wide establishing shot"). Two
 * independent, priority-ordered keyword scans turn those hints into a
 * marker tag and an aspect-ratio enum. Ordering matters: compound terms
 * are listed before the generic words they contain.
 */

use crate::model::AspectRatio;

/// Marker tag used when no keyword matches.
pub const STANDARD_MARKER: &str = "standard";

/// Priority-ordered keyword table for the visual-marker tag. The first
/// matching keyword wins, so specific compounds come before generic terms.
static MARKER_KEYWORDS: &[(&str, &str)] = &[
    ("micro-flash", "micro-flash"),
    ("micro flash", "micro-flash"),
    ("microflash", "micro-flash"),
    ("double-page spread", "spread"),
    ("double page spread", "spread"),
    ("splash page", "splash"),
    ("splash", "splash"),
    ("inset", "inset"),
    ("spread", "spread"),
    ("echo", "echo"),
    ("montage", "montage"),
    ("establishing", "establishing"),
    ("extreme close-up", "closeup"),
    ("extreme closeup", "closeup"),
    ("close-up", "closeup"),
    ("close up", "closeup"),
    ("closeup", "closeup"),
    ("close on", "closeup"),
    ("large", "large"),
    ("big", "large"),
    ("small", "small"),
    ("tiny", "small"),
];

/// Priority-ordered keyword table for aspect-ratio inference.
static ASPECT_KEYWORDS: &[(&str, AspectRatio)] = &[
    ("square", AspectRatio::Square),
    ("portrait", AspectRatio::Portrait),
    ("full-height", AspectRatio::Portrait),
    ("full height", AspectRatio::Portrait),
    ("vertical", AspectRatio::Tall),
    ("tall", AspectRatio::Tall),
    ("close-up", AspectRatio::Standard),
    ("close up", AspectRatio::Standard),
    ("closeup", AspectRatio::Standard),
    ("close on", AspectRatio::Standard),
    ("close", AspectRatio::Standard),
    ("inset", AspectRatio::Standard),
    ("widescreen", AspectRatio::Wide),
    ("wide", AspectRatio::Wide),
    ("panoramic", AspectRatio::Wide),
    ("panorama", AspectRatio::Wide),
];

/// Infer the visual-marker tag from a panel's combined description and
/// modifier text. Returns the first matching keyword's tag, or
/// [`STANDARD_MARKER`] when nothing matches.
pub fn infer_visual_marker(text: &str) -> String {
    let haystack = text.to_lowercase();
    for (keyword, tag) in MARKER_KEYWORDS {
        if haystack.contains(keyword) {
            return (*tag).to_string();
        }
    }
    STANDARD_MARKER.to_string()
}

/// Infer the aspect ratio from the same combined text. Defaults to
/// [`AspectRatio::Wide`] when no cue is present.
pub fn infer_aspect_ratio(text: &str) -> AspectRatio {
    let haystack = text.to_lowercase();
    for (keyword, ratio) in ASPECT_KEYWORDS {
        if haystack.contains(keyword) {
            return *ratio;
        }
    }
    AspectRatio::Wide
}

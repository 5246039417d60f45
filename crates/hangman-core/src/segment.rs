//! Splitting words into guessable letters.
//!
//! A "letter" in Tamil is a user-perceived character: a consonant together
//! with its dependent vowel sign or virama is one unit (`ண்`, `பூ`), even
//! though it spans several code points.

use std::collections::BTreeSet;

use unicode_segmentation::UnicodeSegmentation;

/// Splits text into its ordered sequence of user-perceived characters.
pub trait Segmenter: Send + Sync {
    /// Returns the segments of `text`, in order, duplicates kept.
    fn segment(&self, text: &str) -> Vec<String>;
}

/// Segmenter using Unicode extended grapheme clusters (UAX #29).
///
/// Combining marks and spacing vowel signs stay attached to their base
/// consonant, which is what Tamil needs.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphemeSegmenter;

impl Segmenter for GraphemeSegmenter {
    fn segment(&self, text: &str) -> Vec<String> {
        text.graphemes(true)
            .filter(|g| !g.trim().is_empty())
            .map(str::to_owned)
            .collect()
    }
}

/// The deduplicated set of segments in a target sequence.
#[must_use]
pub fn letter_set(segments: &[String]) -> BTreeSet<String> {
    segments.iter().cloned().collect()
}

/// Segments in first-occurrence order with duplicates removed.
#[must_use]
pub fn unique_in_order(segments: &[String]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    segments
        .iter()
        .filter(|s| seen.insert(s.as_str()))
        .cloned()
        .collect()
}

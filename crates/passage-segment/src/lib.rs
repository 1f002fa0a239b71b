//! Segmentation strategies for the narrowing search.
//!
//! All segmenters trim their output and drop pieces that are empty after
//! trimming, and preserve order of appearance. They are interchangeable
//! behind [`Segmenter`]; the recursive search does not care which one it
//! is given.

use passage_core::traits::Segmenter;

fn push_trimmed(out: &mut Vec<String>, piece: &str) {
    let trimmed = piece.trim();
    if !trimmed.is_empty() {
        out.push(trimmed.to_string());
    }
}

/// Sentence-boundary segmenter: splits after `.`, `!` or `?` followed by
/// whitespace. Input with no such boundary yields a single segment equal
/// to the trimmed input.
pub struct SentenceSegmenter;

impl Segmenter for SentenceSegmenter {
    fn segment(&self, text: &str) -> Vec<String> {
        let mut segments = Vec::new();
        let mut start = 0usize;
        let mut chars = text.char_indices().peekable();
        while let Some((i, c)) = chars.next() {
            if matches!(c, '.' | '!' | '?') {
                if let Some(&(_, next)) = chars.peek() {
                    if next.is_whitespace() {
                        let end = i + c.len_utf8();
                        push_trimmed(&mut segments, &text[start..end]);
                        start = end;
                    }
                }
            }
        }
        push_trimmed(&mut segments, &text[start..]);
        segments
    }
}

/// Paragraph segmenter: splits on blank lines.
pub struct ParagraphSegmenter;

impl Segmenter for ParagraphSegmenter {
    fn segment(&self, text: &str) -> Vec<String> {
        let mut segments = Vec::new();
        for para in text.split("\n\n") {
            push_trimmed(&mut segments, para);
        }
        segments
    }
}

/// Fixed word-count windows with fractional overlap between neighbours.
pub struct WindowSegmenter {
    words_per_window: usize,
    overlap: f32,
}

impl WindowSegmenter {
    /// `overlap` is the fraction of each window repeated in the next,
    /// clamped to `[0.0, 0.9]` so windows always advance.
    pub fn new(words_per_window: usize, overlap: f32) -> Self {
        Self { words_per_window: words_per_window.max(1), overlap: overlap.clamp(0.0, 0.9) }
    }
}

impl Default for WindowSegmenter {
    fn default() -> Self {
        Self::new(300, 0.2)
    }
}

impl Segmenter for WindowSegmenter {
    fn segment(&self, text: &str) -> Vec<String> {
        let words: Vec<&str> = text.split_whitespace().collect();
        let overlap_words = (self.words_per_window as f32 * self.overlap) as usize;
        let mut segments = Vec::new();
        let mut start = 0usize;
        while start < words.len() {
            let end = (start + self.words_per_window).min(words.len());
            segments.push(words[start..end].join(" "));
            if end >= words.len() {
                break;
            }
            start = end - overlap_words;
        }
        segments
    }
}

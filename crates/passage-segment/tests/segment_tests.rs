use passage_core::traits::Segmenter;
use passage_segment::{ParagraphSegmenter, SentenceSegmenter, WindowSegmenter};

#[test]
fn sentence_segmenter_splits_on_terminal_punctuation() {
    let segments = SentenceSegmenter.segment("A. B! C?");
    assert_eq!(segments, vec!["A.", "B!", "C?"]);
}

#[test]
fn sentence_segmenter_single_sentence_is_returned_trimmed() {
    let segments = SentenceSegmenter.segment("  a sentence with no terminal punctuation  ");
    assert_eq!(segments, vec!["a sentence with no terminal punctuation"]);
}

#[test]
fn sentence_segmenter_ignores_punctuation_not_followed_by_whitespace() {
    // Dots inside tokens (versions, decimals) are not boundaries.
    let segments = SentenceSegmenter.segment("Release 1.2.3 is out. Upgrade now.");
    assert_eq!(segments, vec!["Release 1.2.3 is out.", "Upgrade now."]);
}

#[test]
fn sentence_segmenter_drops_whitespace_only_pieces() {
    let segments = SentenceSegmenter.segment("First.   \n  Second.   ");
    assert_eq!(segments, vec!["First.", "Second."]);
    assert!(SentenceSegmenter.segment("   \n\t  ").is_empty());
}

#[test]
fn sentence_segmenter_is_restartable() {
    let text = "One. Two. Three.";
    assert_eq!(SentenceSegmenter.segment(text), SentenceSegmenter.segment(text));
}

#[test]
fn paragraph_segmenter_splits_on_blank_lines() {
    let segments = ParagraphSegmenter.segment("first para\nstill first\n\nsecond para\n\n\nthird");
    assert_eq!(segments, vec!["first para\nstill first", "second para", "third"]);
}

#[test]
fn window_segmenter_overlaps_neighbouring_windows() {
    let text = "w1 w2 w3 w4 w5 w6 w7 w8 w9 w10";
    let segments = WindowSegmenter::new(4, 0.5).segment(text);
    assert_eq!(segments[0], "w1 w2 w3 w4");
    assert_eq!(segments[1], "w3 w4 w5 w6");
    let last = segments.last().unwrap();
    assert!(last.ends_with("w10"));
}

#[test]
fn window_segmenter_short_input_is_one_window() {
    let segments = WindowSegmenter::new(100, 0.2).segment("just a few words");
    assert_eq!(segments, vec!["just a few words"]);
}

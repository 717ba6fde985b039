use super::*;

/// Every character is exactly one unit wide at font size 1.
struct Mono;

impl TextMeasure for Mono {
    fn advance(&mut self, text: &str, font_size: f64) -> f64 {
        text.chars().count() as f64 * font_size
    }
}

#[test]
fn short_text_stays_on_one_line() {
    assert_eq!(wrap_words("hello world", 20.0, 1.0, &mut Mono), ["hello world"]);
}

#[test]
fn wraps_at_whole_word_boundaries() {
    let lines = wrap_words("alpha beta gamma delta", 11.0, 1.0, &mut Mono);
    assert_eq!(lines, ["alpha beta", "gamma delta"]);
}

#[test]
fn oversized_word_breaks_between_characters() {
    let lines = wrap_words("ab abcdefghij cd", 4.0, 1.0, &mut Mono);
    assert_eq!(lines, ["ab", "abcd", "efgh", "ij", "cd"]);
}

#[test]
fn oversized_word_tail_can_share_a_line_with_next_word() {
    let lines = wrap_words("abcdefg h", 5.0, 1.0, &mut Mono);
    assert_eq!(lines, ["abcde", "fg h"]);
}

#[test]
fn whitespace_collapses_and_empty_text_has_no_lines() {
    assert_eq!(wrap_words("  a \n  b  ", 10.0, 1.0, &mut Mono), ["a b"]);
    assert!(wrap_words("   ", 10.0, 1.0, &mut Mono).is_empty());
}

#[test]
fn font_size_scales_measurement() {
    let lines = wrap_words("aa bb", 5.0, 2.0, &mut Mono);
    assert_eq!(lines, ["aa", "bb"]);
}

#[test]
fn em_measure_counts_hangul_as_full_em() {
    let mut m = EmMeasure;
    assert_eq!(m.advance("커피", 10.0), 20.0);
    assert!(m.advance("coffee", 10.0) < 60.0);
}

#[test]
fn em_measure_widens_m_and_w_in_both_cases() {
    let mut m = EmMeasure;
    assert_eq!(m.advance("M", 10.0), m.advance("m", 10.0));
    assert_eq!(m.advance("W", 10.0), 8.5);
    assert!(m.advance("W", 10.0) > m.advance("A", 10.0));
}

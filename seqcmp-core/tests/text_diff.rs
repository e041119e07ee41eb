//! Side-by-side diff output on concrete inputs.

use seqcmp_core::{compare_exchanges, diff, DisplayMode, ExchangeRecord, HighlightSpan, SideBySide, SpanCategory};

fn span(start: usize, end: usize, category: SpanCategory) -> HighlightSpan {
    HighlightSpan::new(start, end, category)
}

fn mirrored(result: &SideBySide) -> SideBySide {
    let swap = |spans: &[HighlightSpan]| -> Vec<HighlightSpan> {
        spans
            .iter()
            .map(|s| {
                let category = match s.category {
                    SpanCategory::Added => SpanCategory::Deleted,
                    SpanCategory::Deleted => SpanCategory::Added,
                    other => other,
                };
                span(s.start, s.end, category)
            })
            .collect()
    };
    let mut left = result.right.clone();
    let mut right = result.left.clone();
    left.highlights = swap(&result.right.highlights);
    right.highlights = swap(&result.left.highlights);
    SideBySide { left, right }
}

#[test]
fn single_character_change() {
    let result = diff("line1\nline2\n", "line1\nlineX\n");
    assert_eq!(result.left.text, "line1\nline2\n");
    assert_eq!(result.right.text, "line1\nlineX\n");
    assert_eq!(result.left.highlights, vec![span(10, 11, SpanCategory::Modified)]);
    assert_eq!(result.right.highlights, vec![span(10, 11, SpanCategory::Modified)]);
}

#[test]
fn identical_texts_have_no_highlights() {
    let text = "GET / HTTP/1.1\r\nHost: a\r\n\r\n";
    let result = diff(text, text);
    assert_eq!(result.left.text, text);
    assert!(result.left.highlights.is_empty());
    assert!(result.right.highlights.is_empty());
}

#[test]
fn empty_inputs() {
    let result = diff("", "");
    assert!(result.left.is_empty() && result.right.is_empty());

    let result = diff("", "only\n");
    assert!(result.left.is_empty());
    assert!(result.left.highlights.is_empty());
    assert_eq!(result.right.highlights, vec![span(0, 5, SpanCategory::Added)]);
}

#[test]
fn modified_line_followed_by_inserted_line() {
    let left = "GET /x HTTP/1.1\nCookie: id=1\n";
    let right = "GET /x HTTP/1.1\nCookie: id=2\nX-Extra: yes\n";
    let result = diff(left, right);
    assert_eq!(result.left.highlights, vec![span(27, 28, SpanCategory::Modified)]);
    assert_eq!(
        result.right.highlights,
        vec![span(27, 28, SpanCategory::Modified), span(29, 42, SpanCategory::Added)]
    );
}

#[test]
fn offsets_count_characters() {
    let result = diff("héllo\n", "hallo\n");
    assert_eq!(result.left.highlights, vec![span(1, 2, SpanCategory::Modified)]);
    assert_eq!(result.right.highlights, vec![span(1, 2, SpanCategory::Modified)]);
    assert_eq!(result.left.char_len(), 6);

    let segments = result.left.segments();
    assert_eq!(segments[1].text, "é");
    assert_eq!(segments.iter().map(|s| s.text).collect::<String>(), "héllo\n");
}

#[test]
fn unrelated_lines_are_whole_line_changes() {
    let result = diff("alpha\nkeep\n", "zz\nkeep\n");
    assert_eq!(result.left.highlights, vec![span(0, 6, SpanCategory::Deleted)]);
    assert_eq!(result.right.highlights, vec![span(0, 3, SpanCategory::Added)]);
}

#[test]
fn diff_is_symmetric_on_fixed_cases() {
    let cases = [
        ("line1\nline2\n", "line1\nlineX\n"),
        ("GET /x HTTP/1.1\nCookie: id=1\n", "GET /x HTTP/1.1\nCookie: id=2\nX-Extra: yes\n"),
        ("alpha\nkeep\n", "zz\nkeep\n"),
        ("a\nb\nc\n", "a\nc\n"),
        ("", "new\n"),
        ("b\naa\na\na\n\n", "a\nb\n"),
    ];
    for (x, y) in cases {
        assert_eq!(diff(y, x), mirrored(&diff(x, y)), "diff({x:?}, {y:?})");
    }
}

#[test]
fn absent_response_against_short_response() {
    let request = b"GET /status HTTP/1.1\r\nHost: a\r\n\r\n".to_vec();
    let body = "x".repeat(50);
    let left = ExchangeRecord::from_raw(0, "http", request.clone(), None);
    let right = ExchangeRecord::from_raw(0, "http", request, Some(body.clone().into_bytes()));

    let result = compare_exchanges(&left, &right, DisplayMode::Response);
    assert!(result.left.is_empty());
    assert!(result.left.highlights.is_empty());
    assert_eq!(result.right.text, body);
    assert_eq!(result.right.highlights, vec![span(0, 50, SpanCategory::Added)]);
}

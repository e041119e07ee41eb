//! Property tests for the alignment engine and the text differ.

use proptest::prelude::*;
use seqcmp_core::{align, diff, HighlightSpan};

/// Classic LCS length table, used as the reference for maximality.
fn lcs_len(a: &[u8], b: &[u8]) -> usize {
    let mut table = vec![vec![0usize; b.len() + 1]; a.len() + 1];
    for i in 1..=a.len() {
        for j in 1..=b.len() {
            table[i][j] = if a[i - 1] == b[j - 1] {
                table[i - 1][j - 1] + 1
            } else {
                table[i - 1][j].max(table[i][j - 1])
            };
        }
    }
    table[a.len()][b.len()]
}

/// Spans as seen from the other pane.
fn flipped(spans: &[HighlightSpan]) -> Vec<HighlightSpan> {
    spans
        .iter()
        .map(|s| HighlightSpan::new(s.start, s.end, s.category.mirrored()))
        .collect()
}

/// Short texts built from a few repeating lines, so equally long line
/// alignments are common.
fn lines() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(vec!["a\n", "b\n", "aa\n", "ab\n", "\n", "a"]), 0..10)
        .prop_map(|parts| parts.concat())
}

fn keys() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(0u8..5, 0..24)
}

proptest! {
    #[test]
    fn prop_alignment_is_common_subsequence(a in keys(), b in keys()) {
        let result = align(&a, &b);
        for entry in result.entries() {
            prop_assert!(entry.left < a.len() && entry.right < b.len());
            prop_assert_eq!(a[entry.left], b[entry.right]);
        }
        for pair in result.entries().windows(2) {
            prop_assert!(pair[0].left < pair[1].left);
            prop_assert!(pair[0].right < pair[1].right);
        }
    }

    #[test]
    fn prop_alignment_is_maximal(a in keys(), b in keys()) {
        prop_assert_eq!(align(&a, &b).len(), lcs_len(&a, &b));
    }

    #[test]
    fn prop_alignment_is_deterministic(a in keys(), b in keys()) {
        prop_assert_eq!(align(&a, &b), align(&a, &b));
    }

    #[test]
    fn prop_diff_renders_inputs(
        left in "[ab\\n é]{0,60}",
        right in "[ab\\n é]{0,60}",
    ) {
        let result = diff(&left, &right);
        prop_assert_eq!(&result.left.text, &left);
        prop_assert_eq!(&result.right.text, &right);

        for pane in [&result.left, &result.right] {
            let mut cursor = 0;
            for span in &pane.highlights {
                prop_assert!(span.start >= cursor && span.start < span.end);
                prop_assert!(span.end <= pane.char_len());
                cursor = span.end;
            }
            let joined: String = pane.segments().iter().map(|s| s.text).collect();
            prop_assert_eq!(&joined, &pane.text);
        }
    }

    #[test]
    fn prop_diff_is_symmetric(left in lines(), right in lines()) {
        let forward = diff(&left, &right);
        let backward = diff(&right, &left);
        prop_assert_eq!(&backward.left.text, &forward.right.text);
        prop_assert_eq!(&backward.right.text, &forward.left.text);
        prop_assert_eq!(backward.left.highlights, flipped(&forward.right.highlights));
        prop_assert_eq!(backward.right.highlights, flipped(&forward.left.highlights));
    }
}

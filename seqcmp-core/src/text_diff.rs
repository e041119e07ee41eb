//! Side-by-side text comparison with character-accurate highlights.
//!
//! The differ works in two passes:
//!
//! 1. [`edit_script`] turns two texts into a human-readable line script of
//!    unchanged, deleted and added lines. When a deleted line and an added line are
//!    near matches, each of them is followed by a [`EditLine::Guide`] marking which
//!    characters changed.
//! 2. [`render`] walks the script and routes every line to the left render, the
//!    right render or both, emitting [`HighlightSpan`]s as it goes. A guide line
//!    replaces the whole-line span of the line right before it with one `Modified`
//!    span per run of markers.
//!
//! Offsets are counted in `char`s of the rendered text. Lines keep their original
//! terminators, so each render is exactly the input it came from.

use std::collections::HashMap;
use std::ops::Range;

use similar::{DiffTag, TextDiff};

use crate::types::Side;

/// Minimum similarity for a deleted/added pair to be treated as one modified line.
const PAIR_CUTOFF: f32 = 0.75;

/// Lines longer than this (in chars) are never paired; character diffs of long,
/// dissimilar lines are too slow to run on every selection change.
const MAX_PAIR_CHARS: usize = 8192;

/// Change category of a highlighted range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanCategory {
    Unchanged,
    Deleted,
    Added,
    Modified,
}

impl SpanCategory {
    /// The category seen from the other pane.
    pub fn mirrored(self) -> Self {
        match self {
            SpanCategory::Deleted => SpanCategory::Added,
            SpanCategory::Added => SpanCategory::Deleted,
            other => other,
        }
    }
}

/// A `[start, end)` range of chars in a rendered text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightSpan {
    pub start: usize,
    pub end: usize,
    pub category: SpanCategory,
}

impl HighlightSpan {
    pub fn new(start: usize, end: usize, category: SpanCategory) -> Self {
        Self { start, end, category }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// One output line of the line differ.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditLine<'a> {
    Unchanged(&'a str),
    Deleted(&'a str),
    Added(&'a str),
    /// Change markers for the line immediately before: `^` replaced, `-` removed,
    /// `+` inserted, space unchanged. Trailing spaces are trimmed.
    Guide(String),
}

/// A contiguous piece of rendered text with its category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub category: SpanCategory,
}

/// Text shown in one pane plus its highlight spans, sorted and non-overlapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedText {
    pub text: String,
    pub highlights: Vec<HighlightSpan>,
    char_len: usize,
}

impl RenderedText {
    /// Length of the text in chars, the unit used by every span.
    pub fn char_len(&self) -> usize {
        self.char_len
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Splits the whole text into consecutive segments; gaps between spans come
    /// back as `Unchanged`. Concatenating the segments yields `self.text`.
    pub fn segments(&self) -> Vec<Segment<'_>> {
        let bytes: Vec<usize> = self
            .text
            .char_indices()
            .map(|(b, _)| b)
            .chain(std::iter::once(self.text.len()))
            .collect();
        let text = self.text.as_str();

        let mut out = Vec::with_capacity(self.highlights.len() * 2 + 1);
        let mut cursor = 0;
        for span in &self.highlights {
            if span.start > cursor {
                out.push(Segment {
                    text: slice_chars(text, &bytes, cursor..span.start),
                    category: SpanCategory::Unchanged,
                });
            }
            out.push(Segment {
                text: slice_chars(text, &bytes, span.start..span.end),
                category: span.category,
            });
            cursor = span.end;
        }
        if cursor < self.char_len {
            out.push(Segment {
                text: slice_chars(text, &bytes, cursor..self.char_len),
                category: SpanCategory::Unchanged,
            });
        }
        out
    }
}

fn slice_chars<'t>(text: &'t str, char_starts: &[usize], chars: Range<usize>) -> &'t str {
    &text[char_starts[chars.start]..char_starts[chars.end]]
}

/// Both panes of a comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SideBySide {
    pub left: RenderedText,
    pub right: RenderedText,
}

impl SideBySide {
    pub fn side(&self, side: Side) -> &RenderedText {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    /// Swaps the panes; `Deleted` and `Added` trade places.
    fn mirrored(self) -> Self {
        let flip = |mut pane: RenderedText| {
            for span in &mut pane.highlights {
                span.category = span.category.mirrored();
            }
            pane
        };
        Self { left: flip(self.right), right: flip(self.left) }
    }
}

/// Diffs two texts and renders both panes.
///
/// The line differ is run on the pair in lexicographic order, so
/// `diff(y, x)` is always the mirror of `diff(x, y)` even when several line
/// alignments are equally good.
pub fn diff(left: &str, right: &str) -> SideBySide {
    let swapped = right < left;
    let (first, second) = if swapped { (right, left) } else { (left, right) };
    let script = edit_script(first, second);
    let mut rendered = render(&script);
    if swapped {
        rendered = rendered.mirrored();
    }
    tracing::debug!(
        script_lines = script.len(),
        swapped,
        left_spans = rendered.left.highlights.len(),
        right_spans = rendered.right.highlights.len(),
        "text diff rendered"
    );
    rendered
}

/// Computes the line script for two texts.
pub fn edit_script<'a>(left: &'a str, right: &'a str) -> Vec<EditLine<'a>> {
    let diff = TextDiff::from_lines(left, right);
    let old = diff.old_slices();
    let new = diff.new_slices();
    let mut out = Vec::with_capacity(old.len().max(new.len()));

    let mut ops = diff.ops().iter().map(|op| op.as_tag_tuple()).peekable();
    while let Some((tag, old_range, new_range)) = ops.next() {
        match tag {
            DiffTag::Equal => out.extend(old[old_range].iter().copied().map(EditLine::Unchanged)),
            DiffTag::Insert => out.extend(new[new_range].iter().copied().map(EditLine::Added)),
            DiffTag::Replace => replace_block(&old[old_range], &new[new_range], &mut out),
            DiffTag::Delete => {
                // A deletion directly followed by an insertion is one replace block.
                match ops.next_if(|(next, _, _)| *next == DiffTag::Insert) {
                    Some((_, _, inserted)) => {
                        replace_block(&old[old_range], &new[inserted], &mut out);
                    }
                    None => out.extend(old[old_range].iter().copied().map(EditLine::Deleted)),
                }
            }
        }
    }
    out
}

/// Emits a block of deleted lines replaced by a block of added lines.
///
/// The most similar pair at or above [`PAIR_CUTOFF`] is emitted as a modified
/// line with guides; the blocks before and after it are handled recursively. When
/// no pair qualifies, all deletions are emitted before all additions.
fn replace_block<'a>(old: &[&'a str], new: &[&'a str], out: &mut Vec<EditLine<'a>>) {
    if old.is_empty() || new.is_empty() {
        out.extend(old.iter().copied().map(EditLine::Deleted));
        out.extend(new.iter().copied().map(EditLine::Added));
        return;
    }

    let mut best: Option<(usize, usize, f32)> = None;
    for (j, new_line) in new.iter().enumerate() {
        for (i, old_line) in old.iter().enumerate() {
            let floor = best.map_or(PAIR_CUTOFF, |(_, _, r)| r);
            let (a, b) = (content(old_line), content(new_line));
            if real_quick_ratio(a, b) < floor || quick_ratio(a, b) < floor {
                continue;
            }
            let ratio = line_ratio(a, b);
            if ratio >= floor && best.map_or(true, |(_, _, r)| ratio > r) {
                best = Some((i, j, ratio));
            }
        }
    }

    match best {
        Some((i, j, _)) => {
            replace_block(&old[..i], &new[..j], out);
            emit_modified_pair(old[i], new[j], out);
            replace_block(&old[i + 1..], &new[j + 1..], out);
        }
        None => {
            out.extend(old.iter().copied().map(EditLine::Deleted));
            out.extend(new.iter().copied().map(EditLine::Added));
        }
    }
}

fn emit_modified_pair<'a>(old_line: &'a str, new_line: &'a str, out: &mut Vec<EditLine<'a>>) {
    let (old_marks, new_marks) = guide_markers(content(old_line), content(new_line));
    out.push(EditLine::Deleted(old_line));
    if let Some(guide) = old_marks {
        out.push(EditLine::Guide(guide));
    }
    out.push(EditLine::Added(new_line));
    if let Some(guide) = new_marks {
        out.push(EditLine::Guide(guide));
    }
}

/// Builds the guide strings for a line pair; `None` for a side with no marks.
fn guide_markers(old: &str, new: &str) -> (Option<String>, Option<String>) {
    let diff = TextDiff::from_chars(old, new);
    let mut old_marks = String::new();
    let mut new_marks = String::new();
    for op in diff.ops() {
        let (tag, old_range, new_range) = op.as_tag_tuple();
        let (o, n) = match tag {
            DiffTag::Equal => (' ', ' '),
            DiffTag::Delete => ('-', ' '),
            DiffTag::Insert => (' ', '+'),
            DiffTag::Replace => ('^', '^'),
        };
        old_marks.extend(std::iter::repeat(o).take(old_range.len()));
        new_marks.extend(std::iter::repeat(n).take(new_range.len()));
    }
    let finish = |marks: String| {
        let trimmed = marks.trim_end();
        (!trimmed.is_empty()).then(|| trimmed.to_owned())
    };
    (finish(old_marks), finish(new_marks))
}

/// Line text without its terminator.
fn content(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}

/// Upper bound of [`line_ratio`] from lengths alone.
fn real_quick_ratio(a: &str, b: &str) -> f32 {
    let (la, lb) = (a.chars().count(), b.chars().count());
    if la + lb == 0 {
        return 1.0;
    }
    if la > MAX_PAIR_CHARS || lb > MAX_PAIR_CHARS {
        return 0.0;
    }
    2.0 * la.min(lb) as f32 / (la + lb) as f32
}

/// Upper bound of [`line_ratio`] from the shared character multiset.
fn quick_ratio(a: &str, b: &str) -> f32 {
    let mut available: HashMap<char, usize> = HashMap::new();
    for ch in b.chars() {
        *available.entry(ch).or_default() += 1;
    }
    let mut total = available.values().sum::<usize>();
    let mut matches = 0usize;
    for ch in a.chars() {
        total += 1;
        if let Some(count) = available.get_mut(&ch).filter(|c| **c > 0) {
            *count -= 1;
            matches += 1;
        }
    }
    if total == 0 {
        return 1.0;
    }
    2.0 * matches as f32 / total as f32
}

fn line_ratio(a: &str, b: &str) -> f32 {
    TextDiff::from_chars(a, b).ratio()
}

/// Char ranges of contiguous change markers in a guide line.
fn marker_runs(guide: &str) -> Vec<Range<usize>> {
    let mut runs = Vec::new();
    let mut open: Option<usize> = None;
    for (idx, ch) in guide.chars().enumerate() {
        let marked = matches!(ch, '^' | '-' | '+');
        match (marked, open) {
            (true, None) => open = Some(idx),
            (false, Some(start)) => {
                runs.push(start..idx);
                open = None;
            }
            _ => {}
        }
    }
    if let Some(start) = open {
        runs.push(start..guide.chars().count());
    }
    runs
}

/// Accumulates one pane while the script is walked.
#[derive(Default)]
struct PaneBuilder {
    text: String,
    len: usize,
    highlights: Vec<HighlightSpan>,
    last_line_start: usize,
}

impl PaneBuilder {
    fn push(&mut self, line: &str, category: Option<SpanCategory>) {
        let start = self.len;
        self.text.push_str(line);
        self.len += line.chars().count();
        self.last_line_start = start;
        if let Some(category) = category {
            self.highlights.push(HighlightSpan::new(start, self.len, category));
        }
    }

    /// Swaps the whole-line span of the last line for per-run `Modified` spans.
    fn refine_last_line(&mut self, guide: &str) {
        let line_start = self.last_line_start;
        if self.highlights.last().is_some_and(|s| s.start == line_start) {
            self.highlights.pop();
        }
        let line_end = self.len;
        for run in marker_runs(guide) {
            let start = (line_start + run.start).min(line_end);
            let end = (line_start + run.end).min(line_end);
            if start < end {
                self.highlights.push(HighlightSpan::new(start, end, SpanCategory::Modified));
            }
        }
    }

    fn finish(self) -> RenderedText {
        RenderedText { text: self.text, highlights: self.highlights, char_len: self.len }
    }
}

/// Reconstructs both panes from a line script.
pub fn render(script: &[EditLine<'_>]) -> SideBySide {
    let mut left = PaneBuilder::default();
    let mut right = PaneBuilder::default();
    // Pane of the deleted/added line a following guide would refine.
    let mut guide_target: Option<Side> = None;

    for line in script {
        match line {
            EditLine::Unchanged(text) => {
                left.push(text, None);
                right.push(text, None);
                guide_target = None;
            }
            EditLine::Deleted(text) => {
                left.push(text, Some(SpanCategory::Deleted));
                guide_target = Some(Side::Left);
            }
            EditLine::Added(text) => {
                right.push(text, Some(SpanCategory::Added));
                guide_target = Some(Side::Right);
            }
            EditLine::Guide(markers) => match guide_target.take() {
                Some(Side::Left) => left.refine_last_line(markers),
                Some(Side::Right) => right.refine_last_line(markers),
                None => tracing::warn!("guide line without a preceding change ignored"),
            },
        }
    }

    SideBySide { left: left.finish(), right: right.finish() }
}

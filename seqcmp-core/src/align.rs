//! Sequence alignment: longest common subsequence with a reproducible tie-break.
//!
//! Two runs of the same workflow rarely line up one-to-one: retries, redirects and
//! optional steps shift positions. [`align`] finds the longest order-preserving set
//! of `(left, right)` index pairs whose keys are equal.
//!
//! # Tie-break
//!
//! Whenever two candidate paths have the same length, the one with the larger
//! *gap sum* wins, where the gap sum is `Σ (right[k+1] − right[k])` over consecutive
//! entries. Larger gap sums spread matches across the right sequence instead of
//! clustering them. If length and gap sum are equal, the candidate coming from the
//! row above (`cell[i-1][j]`) wins inside the table, and the earliest cell wins when
//! the final row is scanned.
//!
//! # Cost
//!
//! Every cell carries its full candidate path, so memory per row is
//! `O(|B| · min(|A|, |B|))` and time is `O(|A| · |B| · min(|A|, |B|))` including
//! clones. Only two rows are alive at once. This is sized for sequences of a few
//! hundred exchanges; longer inputs need backpointer reconstruction instead.

use crate::types::Side;

/// One correspondence point between the two sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AlignmentEntry {
    pub left: usize,
    pub right: usize,
}

impl AlignmentEntry {
    pub fn new(left: usize, right: usize) -> Self {
        Self { left, right }
    }

    /// Index of this entry on `side`.
    pub fn on(&self, side: Side) -> usize {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

impl From<(usize, usize)> for AlignmentEntry {
    fn from((left, right): (usize, usize)) -> Self {
        Self { left, right }
    }
}

/// An ordered common subsequence, strictly increasing on both sides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlignmentResult {
    entries: Vec<AlignmentEntry>,
}

impl AlignmentResult {
    pub fn entries(&self) -> &[AlignmentEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn gap_sum(&self) -> usize {
        gap_sum(&self.entries)
    }

    /// Returns the index paired with `index` on `side`, if any.
    ///
    /// Entries are strictly increasing on both sides, so this is a binary search.
    pub fn correspondent(&self, side: Side, index: usize) -> Option<usize> {
        self.entries
            .binary_search_by_key(&index, |e| e.on(side))
            .ok()
            .map(|pos| self.entries[pos].on(side.other()))
    }
}

fn gap_sum(path: &[AlignmentEntry]) -> usize {
    path.windows(2).map(|w| w[1].right - w[0].right).sum()
}

/// `true` when `candidate` ranks strictly above `incumbent`.
fn outranks(candidate: &[AlignmentEntry], incumbent: &[AlignmentEntry]) -> bool {
    (candidate.len(), gap_sum(candidate)) > (incumbent.len(), gap_sum(incumbent))
}

/// Aligns two key sequences. Total: empty input gives an empty result.
pub fn align<K: PartialEq>(left: &[K], right: &[K]) -> AlignmentResult {
    let width = right.len() + 1;
    let mut prev: Vec<Vec<AlignmentEntry>> = vec![Vec::new(); width];
    let mut cur: Vec<Vec<AlignmentEntry>> = vec![Vec::new(); width];

    for i in 1..=left.len() {
        cur[0].clear();
        for j in 1..width {
            let cell = if left[i - 1] == right[j - 1] {
                let mut path = prev[j - 1].clone();
                path.push(AlignmentEntry::new(i - 1, j - 1));
                path
            } else if outranks(&cur[j - 1], &prev[j]) {
                cur[j - 1].clone()
            } else {
                prev[j].clone()
            };
            cur[j] = cell;
        }
        std::mem::swap(&mut prev, &mut cur);
    }

    // `prev` now holds the final row.
    let mut best: &[AlignmentEntry] = &prev[0];
    for candidate in &prev[1..] {
        if outranks(candidate, best) {
            best = candidate.as_slice();
        }
    }

    tracing::debug!(
        left = left.len(),
        right = right.len(),
        matched = best.len(),
        "alignment computed"
    );
    AlignmentResult { entries: best.to_vec() }
}

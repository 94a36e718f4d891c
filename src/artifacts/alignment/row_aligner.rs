use crate::artifacts::alignment::aligned_row::{AlignedRow, Segment};
use crate::artifacts::diff::change_run::{ChangeKind, ChangeRun, diff_chars};

/// Combined length (in code points) above which a modified pair is shown
/// without character-level highlighting.
pub const MAX_INLINE_DIFF_CHARS: usize = 4_000;

/// Turns a line-level change script into side-by-side rows.
#[derive(Debug, Clone)]
pub struct RowAligner {
    inline_limit: usize,
    left_line: usize,
    right_line: usize,
    rows: Vec<AlignedRow>,
}

impl Default for RowAligner {
    fn default() -> Self {
        Self::with_inline_limit(MAX_INLINE_DIFF_CHARS)
    }
}

impl RowAligner {
    pub fn with_inline_limit(inline_limit: usize) -> Self {
        RowAligner {
            inline_limit,
            left_line: 1,
            right_line: 1,
            rows: Vec::new(),
        }
    }

    pub fn align(mut self, runs: &[ChangeRun<&str>]) -> Vec<AlignedRow> {
        let mut index = 0;

        while let Some(run) = runs.get(index) {
            let next = runs.get(index + 1);

            match (run.kind(), next) {
                (ChangeKind::Removed, Some(added)) if added.kind() == ChangeKind::Added => {
                    self.push_modified_block(run.units(), added.units());
                    index += 2;
                    continue;
                }
                (ChangeKind::Removed, _) => {
                    for line in run.units() {
                        self.push_removed(line);
                    }
                }
                (ChangeKind::Added, _) => {
                    for line in run.units() {
                        self.push_added(line);
                    }
                }
                (ChangeKind::Equal, _) => {
                    for line in run.units() {
                        let row = AlignedRow::same(self.left_line, self.right_line, line);
                        self.left_line += 1;
                        self.right_line += 1;
                        self.rows.push(row);
                    }
                }
            }

            index += 1;
        }

        self.rows
    }

    fn push_modified_block(&mut self, removed: &[&str], added: &[&str]) {
        let length = removed.len().max(added.len());

        for position in 0..length {
            match (removed.get(position), added.get(position)) {
                (Some(left), Some(right)) => {
                    let (left_segments, right_segments) = self.inline_segments(left, right);
                    let row = AlignedRow::modified(
                        self.left_line,
                        self.right_line,
                        left_segments,
                        right_segments,
                    );
                    self.left_line += 1;
                    self.right_line += 1;
                    self.rows.push(row);
                }
                (Some(left), None) => self.push_removed(left),
                (None, Some(right)) => self.push_added(right),
                (None, None) => {}
            }
        }
    }

    fn push_removed(&mut self, line: &str) {
        self.rows.push(AlignedRow::removed_only(self.left_line, line));
        self.left_line += 1;
    }

    fn push_added(&mut self, line: &str) {
        self.rows.push(AlignedRow::added_only(self.right_line, line));
        self.right_line += 1;
    }

    fn inline_segments(&self, left: &str, right: &str) -> (Vec<Segment>, Vec<Segment>) {
        if left.chars().count() + right.chars().count() > self.inline_limit {
            return (vec![Segment::removed(left)], vec![Segment::added(right)]);
        }

        let runs = diff_chars(left, right);

        let left_segments = runs
            .iter()
            .filter_map(|run| match run.kind() {
                ChangeKind::Equal => Some(Segment::same(run.text())),
                ChangeKind::Removed => Some(Segment::removed(run.text())),
                ChangeKind::Added => None,
            })
            .collect();
        let right_segments = runs
            .iter()
            .filter_map(|run| match run.kind() {
                ChangeKind::Equal => Some(Segment::same(run.text())),
                ChangeKind::Added => Some(Segment::added(run.text())),
                ChangeKind::Removed => None,
            })
            .collect();

        (left_segments, right_segments)
    }
}

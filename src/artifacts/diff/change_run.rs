use crate::artifacts::diff::diff_algorithm::{DiffAlgorithm, Edit, MyersDiff};
use derive_new::new;
use std::hash::Hash;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Equal,
    Added,
    Removed,
}

/// A maximal block of units sharing one [`ChangeKind`].
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct ChangeRun<T> {
    kind: ChangeKind,
    units: Vec<T>,
}

impl<T> ChangeRun<T> {
    pub fn kind(&self) -> ChangeKind {
        self.kind
    }

    pub fn units(&self) -> &[T] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

impl ChangeRun<char> {
    pub fn text(&self) -> String {
        self.units.iter().collect()
    }
}

/// Kind and length of one run, without the units themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct RunSpan {
    pub kind: ChangeKind,
    pub len: usize,
}

/// The shape of a line-level change script.
///
/// Keeps only kinds and lengths so an item can hold on to the exact script
/// its counts came from and replay it against its own texts later.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineScript {
    spans: Vec<RunSpan>,
}

impl LineScript {
    pub fn spans(&self) -> &[RunSpan] {
        &self.spans
    }

    pub fn additions(&self) -> usize {
        self.count(ChangeKind::Added)
    }

    pub fn deletions(&self) -> usize {
        self.count(ChangeKind::Removed)
    }

    fn count(&self, kind: ChangeKind) -> usize {
        self.spans
            .iter()
            .filter(|span| span.kind == kind)
            .map(|span| span.len)
            .sum()
    }

    /// Rebuilds the runs this script was taken from.
    pub fn resolve<'t>(
        &self,
        left: &[&'t str],
        right: &[&'t str],
    ) -> anyhow::Result<Vec<ChangeRun<&'t str>>> {
        let (mut l, mut r) = (0usize, 0usize);
        let mut runs = Vec::with_capacity(self.spans.len());

        for span in &self.spans {
            let units = match span.kind {
                ChangeKind::Equal | ChangeKind::Removed => left.get(l..l + span.len),
                ChangeKind::Added => right.get(r..r + span.len),
            }
            .ok_or_else(|| anyhow::anyhow!("Line script does not match the compared texts"))?
            .to_vec();

            match span.kind {
                ChangeKind::Equal => {
                    l += span.len;
                    r += span.len;
                }
                ChangeKind::Removed => l += span.len,
                ChangeKind::Added => r += span.len,
            }

            runs.push(ChangeRun::new(span.kind, units));
        }

        if l != left.len() || r != right.len() {
            anyhow::bail!("Line script does not match the compared texts");
        }

        Ok(runs)
    }
}

impl<T> From<&[ChangeRun<T>]> for LineScript {
    fn from(runs: &[ChangeRun<T>]) -> Self {
        LineScript {
            spans: runs
                .iter()
                .map(|run| RunSpan::new(run.kind, run.len()))
                .collect(),
        }
    }
}

/// Splits text into lines on `\n`.
///
/// A `\r` before the terminator stays part of the line, so CRLF and LF
/// texts do not compare equal. A trailing terminator does not produce a
/// phantom empty last line.
pub fn split_lines(text: &str) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }

    text.strip_suffix('\n').unwrap_or(text).split('\n').collect()
}

/// Line-level change script between two texts.
pub fn diff_lines<'t>(left: &'t str, right: &'t str) -> Vec<ChangeRun<&'t str>> {
    diff_units(&split_lines(left), &split_lines(right))
}

/// Code-point level change script between two strings.
pub fn diff_chars(left: &str, right: &str) -> Vec<ChangeRun<char>> {
    let left = left.chars().collect::<Vec<_>>();
    let right = right.chars().collect::<Vec<_>>();
    diff_units(&left, &right)
}

/// Runs the diff engine and groups its edits into change runs.
///
/// Inside each stretch of consecutive non-equal edits the removed run is
/// always emitted before the added run.
pub fn diff_units<T: Eq + Hash + Clone>(left: &[T], right: &[T]) -> Vec<ChangeRun<T>> {
    let mut runs = Vec::new();
    let mut equal = Vec::new();
    let mut removed = Vec::new();
    let mut added = Vec::new();

    for edit in MyersDiff::new(left, right).diff() {
        match edit {
            Edit::Equal { value } => {
                flush(&mut runs, ChangeKind::Removed, &mut removed);
                flush(&mut runs, ChangeKind::Added, &mut added);
                equal.push(value);
            }
            Edit::Delete { value } => {
                flush(&mut runs, ChangeKind::Equal, &mut equal);
                removed.push(value);
            }
            Edit::Insert { value } => {
                flush(&mut runs, ChangeKind::Equal, &mut equal);
                added.push(value);
            }
        }
    }

    flush(&mut runs, ChangeKind::Equal, &mut equal);
    flush(&mut runs, ChangeKind::Removed, &mut removed);
    flush(&mut runs, ChangeKind::Added, &mut added);

    runs
}

fn flush<T>(runs: &mut Vec<ChangeRun<T>>, kind: ChangeKind, pending: &mut Vec<T>) {
    if !pending.is_empty() {
        runs.push(ChangeRun::new(kind, std::mem::take(pending)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case::empty("", vec![])]
    #[case::no_terminator("a\nb", vec!["a", "b"])]
    #[case::trailing_terminator("a\nb\n", vec!["a", "b"])]
    #[case::crlf("a\r\nb\r\n", vec!["a\r", "b\r"])]
    #[case::lone_carriage_return("a\rb", vec!["a\rb"])]
    #[case::blank_last_line("a\n\n", vec!["a", ""])]
    #[case::only_terminator("\n", vec![""])]
    fn test_split_lines(#[case] text: &str, #[case] expected: Vec<&str>) {
        assert_eq!(split_lines(text), expected);
    }

    #[test]
    fn test_diff_lines_modified_line() {
        let runs = diff_lines("line1\nline2\n", "line1\nlineX\n");

        assert_eq!(
            runs,
            vec![
                ChangeRun::new(ChangeKind::Equal, vec!["line1"]),
                ChangeRun::new(ChangeKind::Removed, vec!["line2"]),
                ChangeRun::new(ChangeKind::Added, vec!["lineX"]),
            ]
        );
    }

    #[test]
    fn test_crlf_and_lf_texts_differ() {
        let runs = diff_lines("a\nb\n", "a\r\nb\r\n");

        assert_eq!(
            runs,
            vec![
                ChangeRun::new(ChangeKind::Removed, vec!["a", "b"]),
                ChangeRun::new(ChangeKind::Added, vec!["a\r", "b\r"]),
            ]
        );
        assert_eq!(LineScript::from(runs.as_slice()).additions(), 2);
    }

    #[test]
    fn test_removed_run_precedes_added_run() {
        let runs = diff_units(&["a", "b", "c"], &["x", "b", "y", "z"]);
        let kinds = runs.iter().map(ChangeRun::kind).collect::<Vec<_>>();

        assert_eq!(
            kinds,
            vec![
                ChangeKind::Removed,
                ChangeKind::Added,
                ChangeKind::Equal,
                ChangeKind::Removed,
                ChangeKind::Added,
            ]
        );
    }

    #[test]
    fn test_diff_chars_common_prefix() {
        let runs = diff_chars("line2", "lineX");

        let rendered = runs
            .iter()
            .map(|run| (run.kind(), run.text()))
            .collect::<Vec<_>>();

        assert_eq!(
            rendered,
            vec![
                (ChangeKind::Equal, "line".to_string()),
                (ChangeKind::Removed, "2".to_string()),
                (ChangeKind::Added, "X".to_string()),
            ]
        );
    }

    #[test]
    fn test_diff_chars_multibyte() {
        let runs = diff_chars("héllo", "hällo");

        let removed = runs
            .iter()
            .filter(|run| run.kind() == ChangeKind::Removed)
            .map(ChangeRun::text)
            .collect::<String>();

        assert_eq!(removed, "é");
    }

    #[test]
    fn test_line_script_counts() {
        let runs = diff_lines("a\nb\nc\n", "a\nx\ny\nc\n");
        let script = LineScript::from(runs.as_slice());

        assert_eq!(script.additions(), 2);
        assert_eq!(script.deletions(), 1);
    }

    #[test]
    fn test_line_script_resolve_replays_runs() -> anyhow::Result<()> {
        let (left, right) = ("a\nb\nc\n", "a\nx\nc\nd\n");
        let runs = diff_lines(left, right);
        let script = LineScript::from(runs.as_slice());

        let replayed = script.resolve(&split_lines(left), &split_lines(right))?;

        assert_eq!(replayed, runs);
        Ok(())
    }

    #[test]
    fn test_line_script_resolve_rejects_foreign_text() {
        let runs = diff_lines("a\nb\n", "a\n");
        let script = LineScript::from(runs.as_slice());

        assert!(script.resolve(&["a"], &["a"]).is_err());
    }

    proptest! {
        #[test]
        fn test_runs_reconstruct_both_sides(
            left in proptest::collection::vec("[ab]{0,2}", 0..12),
            right in proptest::collection::vec("[ab]{0,2}", 0..12),
        ) {
            let runs = diff_units(&left, &right);

            let rebuilt_left = runs
                .iter()
                .filter(|run| run.kind() != ChangeKind::Added)
                .flat_map(|run| run.units().iter().cloned())
                .collect::<Vec<_>>();
            let rebuilt_right = runs
                .iter()
                .filter(|run| run.kind() != ChangeKind::Removed)
                .flat_map(|run| run.units().iter().cloned())
                .collect::<Vec<_>>();

            prop_assert_eq!(rebuilt_left, left);
            prop_assert_eq!(rebuilt_right, right);
        }

        #[test]
        fn test_runs_are_maximal(
            left in proptest::collection::vec(0u8..3, 0..30),
            right in proptest::collection::vec(0u8..3, 0..30),
        ) {
            let runs = diff_units(&left, &right);

            prop_assert!(runs.iter().all(|run| !run.is_empty()));
            prop_assert!(runs.windows(2).all(|pair| pair[0].kind() != pair[1].kind()));
        }

        #[test]
        fn test_identical_input_is_single_equal_run(
            text in proptest::collection::vec("[a-z]{0,4}", 1..20),
        ) {
            let runs = diff_units(&text, &text);

            prop_assert_eq!(runs, vec![ChangeRun::new(ChangeKind::Equal, text.clone())]);
        }
    }
}

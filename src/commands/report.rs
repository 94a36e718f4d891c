use crate::artifacts::alignment::aligned_row::{
    AlignedRow, LeftKind, RightKind, Segment, SegmentKind,
};
use crate::artifacts::comparison::item::ComparisonItem;
use crate::artifacts::comparison::options::DisplayMode;
use crate::artifacts::comparison::result::{ComparisonResult, ResultKind};
use colored::{ColoredString, Colorize};
use std::cell::{RefCell, RefMut};
use std::io::Write;

const MAX_COLUMN_WIDTH: usize = 80;

/// Plain-text rendering of a finished comparison.
pub struct Report<'r> {
    result: &'r ComparisonResult,
    writer: RefCell<Box<dyn Write>>,
}

impl<'r> Report<'r> {
    pub fn new(result: &'r ComparisonResult, writer: Box<dyn Write>) -> Self {
        Report {
            result,
            writer: RefCell::new(writer),
        }
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn Write>> {
        self.writer.borrow_mut()
    }

    pub fn render(&self) -> anyhow::Result<()> {
        self.print_summary()?;

        if self.result.items.is_empty() {
            writeln!(self.writer(), "No files to compare.")?;
        }

        for item in &self.result.items {
            writeln!(self.writer())?;
            self.print_item(item)?;
        }

        self.writer().flush()?;
        Ok(())
    }

    fn print_summary(&self) -> anyhow::Result<()> {
        let result = self.result;

        writeln!(
            self.writer(),
            "{}",
            format!(
                "{} ↔ {}",
                result.left_root.display(),
                result.right_root.display()
            )
            .bold()
        )?;

        if result.kind == ResultKind::Directory {
            writeln!(
                self.writer(),
                "{} entries: {} changed, {} unchanged",
                result.total_entries,
                result.changed_entries,
                result.unchanged_entries
            )?;
        }

        Ok(())
    }

    fn print_item(&self, item: &ComparisonItem) -> anyhow::Result<()> {
        writeln!(
            self.writer(),
            "{} {} {}",
            item.relative_path.bold(),
            format!("+{}", item.additions).green(),
            format!("-{}", item.deletions).red()
        )?;
        writeln!(self.writer(), "{}", item.status.describe())?;
        if let Some(note) = &item.note {
            writeln!(self.writer(), "{}", note.yellow())?;
        }

        let rows = item.aligned_rows()?;
        if rows.is_empty() {
            writeln!(self.writer(), "{}", "[empty on both sides]".dimmed())?;
            return Ok(());
        }

        match self.result.display_mode {
            DisplayMode::Split => self.print_split(&rows),
            DisplayMode::Unified => self.print_unified(&rows),
        }
    }

    fn print_split(&self, rows: &[AlignedRow]) -> anyhow::Result<()> {
        let width = rows
            .iter()
            .map(|row| row.left_text().chars().count())
            .max()
            .unwrap_or(0)
            .min(MAX_COLUMN_WIDTH);

        for row in rows {
            let left_len = row.left_text().chars().count();
            let padding = " ".repeat(width.saturating_sub(left_len));
            let left = format!(
                "{} {}{}{}",
                line_number(row.left_number),
                left_marker(row.left_kind),
                paint_segments(&row.left_segments, row.is_change()),
                padding
            );

            if row.right_kind == RightKind::Empty {
                writeln!(self.writer(), "{left} │")?;
            } else {
                writeln!(
                    self.writer(),
                    "{left} │ {} {}{}",
                    line_number(row.right_number),
                    right_marker(row.right_kind),
                    paint_segments(&row.right_segments, row.is_change())
                )?;
            }
        }

        Ok(())
    }

    fn print_unified(&self, rows: &[AlignedRow]) -> anyhow::Result<()> {
        let visible = visible_rows(rows, usize::from(self.result.context_lines));
        let mut index = 0;

        while index < rows.len() {
            if !visible[index] {
                let hidden = visible[index..].iter().take_while(|shown| !**shown).count();
                self.print_collapsed(hidden)?;
                index += hidden;
            } else if rows[index].is_change() {
                let block = rows[index..]
                    .iter()
                    .take_while(|row| row.is_change())
                    .count();
                self.print_unified_block(&rows[index..index + block])?;
                index += block;
            } else {
                let row = &rows[index];
                writeln!(
                    self.writer(),
                    "{} {}  {}",
                    line_number(row.left_number),
                    line_number(row.right_number),
                    row.left_text()
                )?;
                index += 1;
            }
        }

        Ok(())
    }

    /// Removed lines of the block first, then its added lines.
    fn print_unified_block(&self, block: &[AlignedRow]) -> anyhow::Result<()> {
        for row in block.iter().filter(|row| row.left_kind == LeftKind::Removed) {
            writeln!(
                self.writer(),
                "{} {} {}{}",
                line_number(row.left_number),
                line_number(None),
                "-".red(),
                paint_segments(&row.left_segments, true)
            )?;
        }

        for row in block.iter().filter(|row| row.right_kind == RightKind::Added) {
            writeln!(
                self.writer(),
                "{} {} {}{}",
                line_number(None),
                line_number(row.right_number),
                "+".green(),
                paint_segments(&row.right_segments, true)
            )?;
        }

        Ok(())
    }

    fn print_collapsed(&self, hidden: usize) -> anyhow::Result<()> {
        let noun = if hidden == 1 { "line" } else { "lines" };
        writeln!(
            self.writer(),
            "{}",
            format!("⋯ {hidden} unchanged {noun}").cyan()
        )?;

        Ok(())
    }
}

/// Rows within `context` rows of a change stay visible; so do the changes.
fn visible_rows(rows: &[AlignedRow], context: usize) -> Vec<bool> {
    let mut visible = vec![false; rows.len()];

    for (index, row) in rows.iter().enumerate() {
        if row.is_change() {
            let start = index.saturating_sub(context);
            let end = (index + context + 1).min(rows.len());
            visible[start..end].fill(true);
        }
    }

    visible
}

fn line_number(number: Option<usize>) -> String {
    match number {
        Some(number) => format!("{number:>4}"),
        None => " ".repeat(4),
    }
}

fn left_marker(kind: LeftKind) -> ColoredString {
    match kind {
        LeftKind::Removed => "-".red(),
        LeftKind::Same | LeftKind::Empty => " ".normal(),
    }
}

fn right_marker(kind: RightKind) -> ColoredString {
    match kind {
        RightKind::Added => "+".green(),
        RightKind::Same | RightKind::Empty => " ".normal(),
    }
}

fn paint_segments(segments: &[Segment], changed_row: bool) -> String {
    segments
        .iter()
        .map(|segment| match segment.kind {
            SegmentKind::Same if changed_row => segment.text.dimmed().to_string(),
            SegmentKind::Same => segment.text.clone(),
            SegmentKind::Removed => segment.text.red().bold().to_string(),
            SegmentKind::Added => segment.text.green().bold().to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::comparison::options::CompareOptions;
    use crate::artifacts::content::loaded_content::LoadedContent;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::sync::{Arc, Mutex};

    /// Captures everything written through the report's boxed writer.
    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().expect("buffer lock").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().expect("buffer lock").clone()).expect("utf-8 output")
        }
    }

    fn item(path: &str, left: Option<&str>, right: Option<&str>) -> ComparisonItem {
        let load = |text: &str| LoadedContent::from_text(text.to_string());
        ComparisonItem::assemble(path.to_string(), None, None, left.map(load), right.map(load))
    }

    fn render(result: &ComparisonResult) -> String {
        colored::control::set_override(false);
        let buffer = SharedBuffer::default();

        Report::new(result, Box::new(buffer.clone()))
            .render()
            .expect("render report");

        buffer.contents()
    }

    fn file_result(mode: DisplayMode, context: u16, item: ComparisonItem) -> ComparisonResult {
        let options = CompareOptions::new("l".into(), "r".into())
            .with_display_mode(mode)
            .with_context_lines(context);
        ComparisonResult::for_file("l/f.txt".into(), "r/f.txt".into(), &options, item)
    }

    #[test]
    fn test_split_view_pairs_modified_lines() {
        let result = file_result(
            DisplayMode::Split,
            3,
            item("f.txt", Some("line1\nline2\n"), Some("line1\nlineX\n")),
        );

        assert_eq!(
            render(&result),
            "l/f.txt ↔ r/f.txt\n\
             \n\
             f.txt +1 -1\n\
             Differences found from original to modified.\n   \
             1  line1 │    1  line1\n   \
             2 -line2 │    2 +lineX\n"
        );
    }

    #[test]
    fn test_split_view_leaves_missing_side_blank() {
        let result = file_result(
            DisplayMode::Split,
            3,
            item("f.txt", Some("a\nb\n"), Some("a\n")),
        );

        let output = render(&result);

        assert!(output.ends_with("   1  a │    1  a\n   2 -b │\n"));
    }

    #[test]
    fn test_unified_view_lists_removals_before_additions() {
        let result = file_result(
            DisplayMode::Unified,
            3,
            item("f.txt", Some("keep\nold1\nold2\n"), Some("keep\nnew1\nnew2\n")),
        );

        let output = render(&result);

        assert!(output.ends_with(
            "   1    1  keep\n   \
             2      -old1\n   \
             3      -old2\n        \
             2 +new1\n        \
             3 +new2\n"
        ));
    }

    #[rstest]
    #[case::no_context(0, "⋯ 5 unchanged lines\n   6      -x\n")]
    #[case::one_line(1, "⋯ 4 unchanged lines\n   5    5  5\n   6      -x\n")]
    fn test_unified_view_collapses_distant_context(#[case] context: u16, #[case] tail: &str) {
        let result = file_result(
            DisplayMode::Unified,
            context,
            item("f.txt", Some("1\n2\n3\n4\n5\nx\n"), Some("1\n2\n3\n4\n5\n")),
        );

        let output = render(&result);

        assert!(output.ends_with(tail), "unexpected output:\n{output}");
    }

    #[test]
    fn test_directory_summary_and_notes() {
        let options = CompareOptions::new("l".into(), "r".into());
        let compared = vec![
            ComparisonItem::assemble(
                "blob.bin".to_string(),
                None,
                None,
                Some(LoadedContent::binary()),
                Some(LoadedContent::binary()),
            ),
            item("same.txt", Some("s\n"), Some("s\n")),
        ];
        let result = ComparisonResult::for_directory("l".into(), "r".into(), &options, compared);

        assert_eq!(
            render(&result),
            "l ↔ r\n\
             2 entries: 1 changed, 1 unchanged\n\
             \n\
             blob.bin +0 -0\n\
             Differences found from original to modified.\n\
             Binary file cannot be rendered in visual diff.\n\
             [empty on both sides]\n"
        );
    }

    #[test]
    fn test_empty_directories_say_so() {
        let options = CompareOptions::new("l".into(), "r".into());
        let result = ComparisonResult::for_directory("l".into(), "r".into(), &options, Vec::new());

        assert_eq!(
            render(&result),
            "l ↔ r\n0 entries: 0 changed, 0 unchanged\nNo files to compare.\n"
        );
    }
}

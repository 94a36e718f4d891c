use crate::areas::content_loader::ContentLoader;
use crate::artifacts::alignment::aligned_row::AlignedRow;
use crate::artifacts::alignment::row_aligner::RowAligner;
use crate::artifacts::content::loaded_content::LoadedContent;
use crate::artifacts::diff::change_run::{LineScript, diff_lines, split_lines};
use derive_new::new;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemStatus {
    Added,
    Removed,
    Modified,
    Unchanged,
    TypeChanged,
}

impl ItemStatus {
    /// Status of a path given what was found on each side.
    pub fn classify(left: Option<&LoadedContent>, right: Option<&LoadedContent>) -> Self {
        match (left, right) {
            (Some(_), None) => ItemStatus::Removed,
            (None, Some(_)) => ItemStatus::Added,
            (Some(left), Some(right))
                if left.is_comparable() && right.is_comparable() && left.same_bytes(right) =>
            {
                ItemStatus::Unchanged
            }
            _ => ItemStatus::Modified,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Added => "added",
            ItemStatus::Removed => "removed",
            ItemStatus::Modified => "modified",
            ItemStatus::Unchanged => "unchanged",
            ItemStatus::TypeChanged => "type-changed",
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            ItemStatus::Unchanged => "No differences found. Both sides are identical.",
            ItemStatus::Added => "Added in modified file (right).",
            ItemStatus::Removed => "Removed from original file (left).",
            ItemStatus::TypeChanged => "Type changed between original and modified.",
            ItemStatus::Modified => "Differences found from original to modified.",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The comparison of one relative path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonItem {
    pub relative_path: String,
    pub status: ItemStatus,
    pub left_path: Option<PathBuf>,
    pub right_path: Option<PathBuf>,
    pub left_content: String,
    pub right_content: String,
    pub is_binary: bool,
    pub is_too_large: bool,
    pub note: Option<String>,
    pub additions: usize,
    pub deletions: usize,
    line_script: LineScript,
}

impl ComparisonItem {
    /// Diffs the two sides once and records counts together with the script
    /// they were taken from. An absent side is passed as `None`.
    pub fn assemble(
        relative_path: String,
        left_path: Option<PathBuf>,
        right_path: Option<PathBuf>,
        left: Option<LoadedContent>,
        right: Option<LoadedContent>,
    ) -> Self {
        let status = ItemStatus::classify(left.as_ref(), right.as_ref());
        let left = left.unwrap_or_default();
        let right = right.unwrap_or_default();

        let line_script = LineScript::from(diff_lines(&left.text, &right.text).as_slice());

        ComparisonItem {
            relative_path,
            status,
            left_path,
            right_path,
            is_binary: left.is_binary || right.is_binary,
            is_too_large: left.is_too_large || right.is_too_large,
            note: left.note.or(right.note),
            additions: line_script.additions(),
            deletions: line_script.deletions(),
            left_content: left.text,
            right_content: right.text,
            line_script,
        }
    }

    pub fn is_unchanged(&self) -> bool {
        self.status == ItemStatus::Unchanged
    }

    /// Side-by-side rows of this item, built from the same line script that
    /// produced `additions` and `deletions`.
    pub fn aligned_rows(&self) -> anyhow::Result<Vec<AlignedRow>> {
        let left = split_lines(&self.left_content);
        let right = split_lines(&self.right_content);
        let runs = self.line_script.resolve(&left, &right)?;

        Ok(RowAligner::default().align(&runs))
    }
}

/// Loads and compares one left/right file pair.
#[derive(Debug, Clone, Copy, new)]
pub struct ItemComparator {
    loader: ContentLoader,
}

impl ItemComparator {
    pub async fn compare(
        &self,
        relative_path: String,
        left_path: Option<PathBuf>,
        right_path: Option<PathBuf>,
    ) -> anyhow::Result<ComparisonItem> {
        let (left, right) = match (&left_path, &right_path) {
            (Some(left), Some(right)) => {
                let (left, right) =
                    tokio::try_join!(self.loader.load(left), self.loader.load(right))?;
                (Some(left), Some(right))
            }
            (Some(left), None) => (Some(self.loader.load(left).await?), None),
            (None, Some(right)) => (None, Some(self.loader.load(right).await?)),
            (None, None) => anyhow::bail!("No file on either side for {relative_path}"),
        };

        let item = tokio::task::spawn_blocking(move || {
            ComparisonItem::assemble(relative_path, left_path, right_path, left, right)
        })
        .await?;

        log::debug!(
            "{} {} (+{} -{})",
            item.status,
            item.relative_path,
            item.additions,
            item.deletions
        );

        Ok(item)
    }
}

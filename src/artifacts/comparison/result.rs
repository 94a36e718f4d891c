use crate::artifacts::comparison::item::ComparisonItem;
use crate::artifacts::comparison::options::{CompareOptions, DisplayMode};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultKind {
    File,
    Directory,
}

/// Everything one comparison run produced.
///
/// `changed_entries + unchanged_entries == total_entries` always holds.
/// `display_mode` and `context_lines` are carried for the renderer only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonResult {
    pub kind: ResultKind,
    pub left_root: PathBuf,
    pub right_root: PathBuf,
    pub display_mode: DisplayMode,
    pub context_lines: u16,
    pub items: Vec<ComparisonItem>,
    pub total_entries: usize,
    pub changed_entries: usize,
    pub unchanged_entries: usize,
}

impl ComparisonResult {
    pub fn for_file(
        left_root: PathBuf,
        right_root: PathBuf,
        options: &CompareOptions,
        item: ComparisonItem,
    ) -> Self {
        let changed_entries = usize::from(!item.is_unchanged());

        ComparisonResult {
            kind: ResultKind::File,
            left_root,
            right_root,
            display_mode: options.display_mode,
            context_lines: options.context_lines,
            items: vec![item],
            total_entries: 1,
            changed_entries,
            unchanged_entries: 1 - changed_entries,
        }
    }

    /// Keeps changed items in the order given and drops unchanged ones,
    /// except that the first unchanged item survives when nothing changed.
    pub fn for_directory(
        left_root: PathBuf,
        right_root: PathBuf,
        options: &CompareOptions,
        compared: Vec<ComparisonItem>,
    ) -> Self {
        let total_entries = compared.len();
        let mut items = Vec::new();
        let mut placeholder = None;

        for item in compared {
            if !item.is_unchanged() {
                items.push(item);
            } else if placeholder.is_none() {
                placeholder = Some(item);
            }
        }

        let changed_entries = items.len();
        if items.is_empty() {
            items.extend(placeholder);
        }

        ComparisonResult {
            kind: ResultKind::Directory,
            left_root,
            right_root,
            display_mode: options.display_mode,
            context_lines: options.context_lines,
            items,
            total_entries,
            changed_entries,
            unchanged_entries: total_entries - changed_entries,
        }
    }

    pub fn has_changes(&self) -> bool {
        self.changed_entries > 0
    }
}

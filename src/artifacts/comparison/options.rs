use crate::artifacts::content::loaded_content::DEFAULT_MAX_FILE_BYTES;
use derive_new::new;
use std::path::PathBuf;

pub const DEFAULT_CONTEXT_LINES: u16 = 3;
pub const MAX_CONTEXT_LINES: u16 = 9_999;

/// Layout requested by the caller. Carried through to the result untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum DisplayMode {
    #[default]
    Split,
    Unified,
}

impl DisplayMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::Split => "split",
            DisplayMode::Unified => "unified",
        }
    }
}

/// Everything a single comparison run needs.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct CompareOptions {
    pub left_path: PathBuf,
    pub right_path: PathBuf,
    #[new(default)]
    pub display_mode: DisplayMode,
    #[new(value = "DEFAULT_CONTEXT_LINES")]
    pub context_lines: u16,
    #[new(value = "DEFAULT_MAX_FILE_BYTES")]
    pub max_file_bytes: u64,
    /// Items compared in flight at once; output order never depends on it.
    #[new(value = "default_concurrency()")]
    pub concurrency: usize,
}

impl CompareOptions {
    pub fn with_display_mode(mut self, display_mode: DisplayMode) -> Self {
        self.display_mode = display_mode;
        self
    }

    pub fn with_context_lines(mut self, context_lines: u16) -> Self {
        self.context_lines = context_lines;
        self
    }

    pub fn with_max_file_bytes(mut self, max_file_bytes: u64) -> Self {
        self.max_file_bytes = max_file_bytes;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }
}

fn default_concurrency() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_follow_command_line_defaults() {
        let options = CompareOptions::new("a".into(), "b".into());

        assert_eq!(options.display_mode, DisplayMode::Split);
        assert_eq!(options.context_lines, 3);
        assert_eq!(options.max_file_bytes, 1_000_000);
        assert!(options.concurrency >= 1);
    }

    #[test]
    fn test_concurrency_never_drops_to_zero() {
        let options = CompareOptions::new("a".into(), "b".into()).with_concurrency(0);

        assert_eq!(options.concurrency, 1);
    }
}

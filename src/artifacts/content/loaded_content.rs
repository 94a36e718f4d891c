//! Loaded file content
//!
//! Exactly one of three shapes holds for a [`LoadedContent`]:
//!
//! - normal text (`is_binary` and `is_too_large` both false)
//! - binary: a NUL byte appears in the first [`BINARY_SAMPLE_BYTES`] bytes
//! - too large: the byte length exceeds the configured maximum
//!
//! Binary and oversized content keep an empty `text` and carry a note
//! explaining why nothing can be shown.

pub const DEFAULT_MAX_FILE_BYTES: u64 = 1_000_000;
pub const BINARY_SAMPLE_BYTES: usize = 8_000;

const BINARY_NOTE: &str = "Binary file cannot be rendered in visual diff.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedContent {
    pub text: String,
    pub is_binary: bool,
    pub is_too_large: bool,
    pub note: Option<String>,
    /// Original bytes, kept only when decoding had to replace invalid UTF-8.
    raw: Option<Vec<u8>>,
}

impl LoadedContent {
    pub fn from_text(text: String) -> Self {
        LoadedContent {
            text,
            ..Default::default()
        }
    }

    pub fn binary() -> Self {
        LoadedContent {
            is_binary: true,
            note: Some(BINARY_NOTE.to_string()),
            ..Default::default()
        }
    }

    pub fn too_large(size: u64) -> Self {
        LoadedContent {
            is_too_large: true,
            note: Some(format!("File exceeds size limit ({size} bytes).")),
            ..Default::default()
        }
    }

    /// Classifies a fully read file body.
    pub fn classify(bytes: &[u8], max_file_bytes: u64) -> Self {
        if bytes.len() as u64 > max_file_bytes {
            return Self::too_large(bytes.len() as u64);
        }

        if looks_binary(bytes) {
            return Self::binary();
        }

        match String::from_utf8(bytes.to_vec()) {
            Ok(text) => Self::from_text(text),
            Err(error) => {
                let raw = error.into_bytes();
                LoadedContent {
                    text: String::from_utf8_lossy(&raw).into_owned(),
                    raw: Some(raw),
                    ..Default::default()
                }
            }
        }
    }

    /// Byte-exact equality of two comparable contents.
    pub fn same_bytes(&self, other: &LoadedContent) -> bool {
        self.bytes() == other.bytes()
    }

    fn bytes(&self) -> &[u8] {
        self.raw.as_deref().unwrap_or(self.text.as_bytes())
    }

    /// Whether the text can take part in a line diff.
    pub fn is_comparable(&self) -> bool {
        !self.is_binary && !self.is_too_large
    }
}

fn looks_binary(bytes: &[u8]) -> bool {
    bytes.iter().take(BINARY_SAMPLE_BYTES).any(|byte| *byte == 0)
}

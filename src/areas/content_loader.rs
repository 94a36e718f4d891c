use crate::artifacts::content::loaded_content::LoadedContent;
use anyhow::Context;
use derive_new::new;
use std::path::Path;

/// Reads and classifies one file, honouring a maximum size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct ContentLoader {
    max_file_bytes: u64,
}

impl ContentLoader {
    pub async fn load(&self, path: &Path) -> anyhow::Result<LoadedContent> {
        let metadata = tokio::fs::metadata(path)
            .await
            .with_context(|| format!("Failed to stat file: {}", path.display()))?;

        // skip the read entirely when the size is already known to be over
        if metadata.len() > self.max_file_bytes {
            log::debug!(
                "{} is {} bytes, over the {} byte limit",
                path.display(),
                metadata.len(),
                self.max_file_bytes
            );
            return Ok(LoadedContent::too_large(metadata.len()));
        }

        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        Ok(LoadedContent::classify(&bytes, self.max_file_bytes))
    }
}

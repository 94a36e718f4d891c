use crate::artifacts::comparison::error::InputError;
use crate::artifacts::comparison::file_path::{FilePath, relative_key};
use anyhow::Context;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

/// One side of a directory comparison, rooted at an absolute path.
#[derive(Debug, Clone)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every regular file below the root, sorted by its path string.
    ///
    /// Directories are visited breadth-first from an explicit queue. Symbolic
    /// links count as whatever they point at. Each queued directory carries
    /// the canonical paths of its ancestors, and a link back into one of them
    /// is a cycle and is not followed. Two links to the same directory are
    /// both walked. Any unreadable or unsupported entry fails the whole
    /// listing.
    pub async fn list_files(&self) -> anyhow::Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        let root = canonical(&self.path).await?;
        let mut queue = VecDeque::from([(self.path.to_path_buf(), vec![root])]);

        while let Some((dir_path, ancestors)) = queue.pop_front() {
            log::trace!("Listing {}", dir_path.display());

            let mut entries = tokio::fs::read_dir(&dir_path)
                .await
                .with_context(|| format!("Failed to read directory: {}", dir_path.display()))?;

            while let Some(entry) = entries
                .next_entry()
                .await
                .with_context(|| format!("Failed to read directory: {}", dir_path.display()))?
            {
                let path = entry.path();
                let mut file_type = entry
                    .file_type()
                    .await
                    .with_context(|| format!("Failed to stat entry: {}", path.display()))?;

                if file_type.is_symlink() {
                    file_type = tokio::fs::metadata(&path)
                        .await
                        .with_context(|| {
                            format!("Failed to resolve symbolic link: {}", path.display())
                        })?
                        .file_type();
                }

                if file_type.is_dir() {
                    let target = canonical(&path).await?;
                    if ancestors.contains(&target) {
                        log::debug!("Skipping directory cycle at {}", path.display());
                    } else {
                        let mut chain = ancestors.clone();
                        chain.push(target);
                        queue.push_back((path, chain));
                    }
                } else if file_type.is_file() {
                    files.push(path);
                } else {
                    return Err(InputError::Unsupported { path }.into());
                }
            }
        }

        files.sort_by_cached_key(|path| path.to_string_lossy().into_owned());
        log::debug!("Found {} files under {}", files.len(), self.path.display());

        Ok(files)
    }

    /// Lists the tree and keys every file by its root-relative path.
    pub async fn list_file_paths(&self) -> anyhow::Result<Vec<FilePath>> {
        self.list_files()
            .await?
            .into_iter()
            .map(|absolute| FilePath::under(&self.path, absolute))
            .collect()
    }

    pub fn relative_path(&self, file_path: &Path) -> anyhow::Result<String> {
        relative_key(&self.path, file_path)
    }
}

async fn canonical(path: &Path) -> anyhow::Result<PathBuf> {
    tokio::fs::canonicalize(path)
        .await
        .with_context(|| format!("Failed to resolve directory: {}", path.display()))
}

use crate::areas::content_loader::ContentLoader;
use crate::areas::workspace::Workspace;
use crate::artifacts::comparison::error::{InputError, Side};
use crate::artifacts::comparison::file_path::{FilePath, file_label};
use crate::artifacts::comparison::item::{ComparisonItem, ItemComparator};
use crate::artifacts::comparison::options::CompareOptions;
use crate::artifacts::comparison::result::ComparisonResult;
use anyhow::Context;
use futures::{StreamExt, TryStreamExt};
use std::collections::{BTreeMap, BTreeSet};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    File,
    Directory,
}

/// Both inputs, made absolute and checked to be of the same kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInputs {
    pub kind: InputKind,
    pub left: PathBuf,
    pub right: PathBuf,
}

/// Turns a pair of paths into one complete `ComparisonResult`.
#[derive(Debug, Clone)]
pub struct ModelBuilder {
    options: CompareOptions,
    comparator: ItemComparator,
}

impl ModelBuilder {
    pub fn new(options: CompareOptions) -> Self {
        let comparator = ItemComparator::new(ContentLoader::new(options.max_file_bytes));

        ModelBuilder {
            options,
            comparator,
        }
    }

    pub async fn build(&self) -> anyhow::Result<ComparisonResult> {
        let inputs = resolve(&self.options.left_path, &self.options.right_path).await?;

        let result = match inputs.kind {
            InputKind::File => self.build_file(inputs.left, inputs.right).await?,
            InputKind::Directory => self.build_directory(inputs.left, inputs.right).await?,
        };

        log::info!(
            "Compared {} entries: {} changed, {} unchanged",
            result.total_entries,
            result.changed_entries,
            result.unchanged_entries
        );

        Ok(result)
    }

    async fn build_file(&self, left: PathBuf, right: PathBuf) -> anyhow::Result<ComparisonResult> {
        let item = self
            .comparator
            .compare(
                file_label(&left, &right),
                Some(left.clone()),
                Some(right.clone()),
            )
            .await?;

        Ok(ComparisonResult::for_file(left, right, &self.options, item))
    }

    async fn build_directory(
        &self,
        left: PathBuf,
        right: PathBuf,
    ) -> anyhow::Result<ComparisonResult> {
        let left_workspace = Workspace::new(left.clone().into_boxed_path());
        let right_workspace = Workspace::new(right.clone().into_boxed_path());

        let (left_files, right_files) = tokio::try_join!(
            left_workspace.list_file_paths(),
            right_workspace.list_file_paths()
        )?;

        let left_files = by_relative_path(left_files);
        let right_files = by_relative_path(right_files);
        let relative_paths = left_files
            .keys()
            .chain(right_files.keys())
            .cloned()
            .collect::<BTreeSet<_>>();

        log::debug!(
            "{} left files, {} right files, {} distinct paths",
            left_files.len(),
            right_files.len(),
            relative_paths.len()
        );

        let compared = futures::stream::iter(relative_paths)
            .map(|relative_path| {
                let left_path = left_files.get(&relative_path).cloned();
                let right_path = right_files.get(&relative_path).cloned();
                self.comparator.compare(relative_path, left_path, right_path)
            })
            .buffered(self.options.concurrency.max(1))
            .try_collect::<Vec<ComparisonItem>>()
            .await?;

        Ok(ComparisonResult::for_directory(
            left,
            right,
            &self.options,
            compared,
        ))
    }
}

/// Convenience entry point: one build with the given options.
pub async fn build(options: CompareOptions) -> anyhow::Result<ComparisonResult> {
    ModelBuilder::new(options).build().await
}

/// Makes both paths absolute and checks that they exist and share a kind.
pub async fn resolve(left: &Path, right: &Path) -> anyhow::Result<ResolvedInputs> {
    let left = std::path::absolute(left)
        .with_context(|| format!("Failed to resolve path: {}", left.display()))?;
    let right = std::path::absolute(right)
        .with_context(|| format!("Failed to resolve path: {}", right.display()))?;

    let (left_kind, right_kind) =
        tokio::try_join!(input_kind(Side::Left, &left), input_kind(Side::Right, &right))?;

    if left_kind != right_kind {
        return Err(InputError::KindMismatch { left, right }.into());
    }

    Ok(ResolvedInputs {
        kind: left_kind,
        left,
        right,
    })
}

async fn input_kind(side: Side, path: &Path) -> anyhow::Result<InputKind> {
    let metadata = match tokio::fs::metadata(path).await {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(InputError::Missing {
                side,
                path: path.to_path_buf(),
            }
            .into());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("Failed to stat {}", path.display()));
        }
    };

    if metadata.is_file() {
        Ok(InputKind::File)
    } else if metadata.is_dir() {
        Ok(InputKind::Directory)
    } else {
        Err(InputError::Unsupported {
            path: path.to_path_buf(),
        }
        .into())
    }
}

fn by_relative_path(files: Vec<FilePath>) -> BTreeMap<String, PathBuf> {
    files
        .into_iter()
        .map(|file| (file.relative, file.absolute))
        .collect()
}

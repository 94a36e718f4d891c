use anyhow::Context;
use derive_new::new;
use std::path::{Component, Path, PathBuf};

/// A discovered file: where it lives, and the key it is paired by.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct FilePath {
    pub absolute: PathBuf,
    /// Root-relative, `/`-separated.
    pub relative: String,
}

impl FilePath {
    pub fn under(root: &Path, absolute: PathBuf) -> anyhow::Result<Self> {
        let relative = relative_key(root, &absolute)?;
        Ok(FilePath::new(absolute, relative))
    }
}

/// Path of `path` relative to `root`, joined with `/` on every platform.
pub fn relative_key(root: &Path, path: &Path) -> anyhow::Result<String> {
    let stripped = path.strip_prefix(root).with_context(|| {
        format!(
            "Path {} is not inside {}",
            path.display(),
            root.display()
        )
    })?;

    let parts = stripped
        .components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>();

    Ok(parts.join("/"))
}

/// Label of a single-file comparison: the shared name, or both names.
pub fn file_label(left: &Path, right: &Path) -> String {
    let name = |path: &Path| {
        path.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string())
    };

    let (left_name, right_name) = (name(left), name(right));
    if left_name == right_name {
        left_name
    } else {
        format!("{left_name} ↔ {right_name}")
    }
}

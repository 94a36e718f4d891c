use derive_new::new;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Eq, PartialEq, new)]
pub struct FileSpec {
    pub path: PathBuf,
    pub content: String,
}

pub fn write_file(file_spec: FileSpec) {
    // make sure the parent directory exists
    if let Some(parent) = file_spec.path.parent() {
        std::fs::create_dir_all(parent)
            .unwrap_or_else(|e| panic!("Failed to create directory {:?}: {}", parent, e));
    }

    std::fs::write(&file_spec.path, &file_spec.content)
        .unwrap_or_else(|e| panic!("Failed to write file {:?}: {}", file_spec.path, e));
}

/// Writes `files_count` files with random names and content into `dir`,
/// spreading them over `depth` levels of nested directories.
pub fn write_generated_tree(dir: &Path, files_count: usize, depth: usize) -> Vec<FileSpec> {
    use fake::{
        Fake,
        faker::lorem::en::{Word, Words},
    };

    (0..files_count)
        .map(|index| {
            let mut file_path = dir.to_path_buf();
            for level in 0..(index % (depth + 1)) {
                file_path.push(format!("level_{level}"));
            }
            file_path.push(format!("{index}_{}.txt", Word().fake::<String>()));

            let file_content = Words(5..10)
                .fake::<Vec<String>>()
                .join("\n");

            let file_spec = FileSpec::new(file_path, file_content);
            write_file(file_spec.clone());

            file_spec
        })
        .collect::<Vec<_>>()
}

/// Copies every file below `from` to the same relative place below `to`.
pub fn mirror_tree(from: &Path, to: &Path) {
    let entries = std::fs::read_dir(from)
        .unwrap_or_else(|e| panic!("Failed to read directory {:?}: {}", from, e));

    for entry in entries {
        let entry = entry.unwrap_or_else(|e| panic!("Failed to read entry: {}", e));
        let target = to.join(entry.file_name());

        if entry.path().is_dir() {
            mirror_tree(&entry.path(), &target);
        } else {
            let content = std::fs::read_to_string(entry.path())
                .unwrap_or_else(|e| panic!("Failed to read file {:?}: {}", entry.path(), e));
            write_file(FileSpec::new(target, content));
        }
    }
}

pub fn create_directory(path: &Path) {
    std::fs::create_dir_all(path)
        .unwrap_or_else(|e| panic!("Failed to create directory {:?}: {}", path, e));
}

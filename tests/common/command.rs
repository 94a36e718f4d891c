use crate::common::file::{FileSpec, create_directory, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::{Path, PathBuf};

#[fixture]
pub fn workspace_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// `left/` and `right/` trees holding one file of every status:
/// `same.ext`, `changed.ext`, `left-only.ext` and `right-only.ext`.
#[fixture]
pub fn mixed_trees(workspace_dir: TempDir) -> TempDir {
    let left = left_root(workspace_dir.path());
    let right = right_root(workspace_dir.path());
    create_directory(&left);
    create_directory(&right);

    write_file(FileSpec::new(left.join("same.ext"), "same\n".to_string()));
    write_file(FileSpec::new(right.join("same.ext"), "same\n".to_string()));
    write_file(FileSpec::new(
        left.join("changed.ext"),
        "line1\nline2\n".to_string(),
    ));
    write_file(FileSpec::new(
        right.join("changed.ext"),
        "line1\nlineX\n".to_string(),
    ));
    write_file(FileSpec::new(
        left.join("left-only.ext"),
        "gone\nfor\ngood\n".to_string(),
    ));
    write_file(FileSpec::new(
        right.join("right-only.ext"),
        "brand\nnew\n".to_string(),
    ));

    workspace_dir
}

pub fn left_root(dir: &Path) -> PathBuf {
    dir.join("left")
}

pub fn right_root(dir: &Path) -> PathBuf {
    dir.join("right")
}

pub fn run_opendiff_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("opendiff").expect("Failed to find opendiff binary");
    cmd.envs(vec![("NO_PAGER", "1"), ("NO_COLOR", "1")]);
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

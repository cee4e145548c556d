use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::fixture::ChildPath;
use assert_fs::prelude::*;

pub fn photocull_cmd() -> Command {
    Command::cargo_bin("photocull").unwrap()
}

pub fn setup_source_dir(temp_dir: &TempDir) -> ChildPath {
    let source = temp_dir.child("card");
    source.create_dir_all().unwrap();
    source
}

//! Pack pipeline over real temporary directory trees.

use std::path::PathBuf;

use pretty_assertions::assert_eq;
use rcpack_core::Packer;
use rcpack_core::paths::display_relative;
use rcpack_test_utils::{TestConfigBuilder, TestRepo};

fn relative_files(repo: &rcpack_core::PackedRepository) -> Vec<String> {
    repo.files
        .iter()
        .map(|f| display_relative(&f.path, &repo.root))
        .collect()
}

#[test_log::test(tokio::test)]
async fn collects_sorted_files_and_skips_build_dirs() {
    let repo = TestRepo::with_git_marker();
    repo.write("src/b.rs", "fn b() {}\n");
    repo.write("src/a.rs", "fn a() {}\n");
    repo.write("target/debug/junk.rs", "junk\n");
    repo.write("README.md", "# r\n");

    let packer = Packer::new(TestConfigBuilder::new().build());
    let packed = packer
        .collect(&[PathBuf::from(".")], false, repo.path())
        .await
        .unwrap();

    assert_eq!(packed.root, repo.path());
    assert!(packed.git.is_repo);
    assert_eq!(relative_files(&packed), vec!["README.md", "src/a.rs", "src/b.rs"]);
    assert_eq!(packed.total_lines(), 3);
}

#[test_log::test(tokio::test)]
async fn include_and_exclude_filters_apply() {
    let repo = TestRepo::new();
    repo.write("app/main.cpp", "int main() {}\n");
    repo.write("app/main.h", "int main();\n");
    repo.write("app/Generated/gen.cpp", "int gen() {}\n");
    repo.write("notes.md", "notes\n");

    let config = TestConfigBuilder::new()
        .include(&["*.cpp", ".h"])
        .exclude(&["generated/"])
        .build();
    let packed = Packer::new(config)
        .collect(&[repo.path().to_path_buf()], false, repo.path())
        .await
        .unwrap();

    assert_eq!(relative_files(&packed), vec!["app/main.cpp", "app/main.h"]);
}

#[test_log::test(tokio::test)]
async fn engine_runs_per_file_by_extension() {
    let repo = TestRepo::new();
    repo.write("m.py", "# module\ndef f(a):\n    return a\n");
    repo.write("m.js", "function go(x) {\n  // step\n  return x;\n}\n");

    let config = TestConfigBuilder::new().compress(true).build();
    let packed = Packer::new(config)
        .collect(&[PathBuf::from(".")], false, repo.path())
        .await
        .unwrap();

    let contents: Vec<&str> = packed
        .files
        .iter()
        .map(|f| f.content.content.as_str())
        .collect();
    assert_eq!(
        contents,
        vec![
            "function go(x) {\n// step\n  /* ... */\n}\n",
            "# module\ndef f(a):  # ...\n",
        ]
    );
}

#[test_log::test(tokio::test)]
async fn truncation_is_reported_in_document() {
    let repo = TestRepo::new();
    repo.write("big.txt", &"x".repeat(64));

    let config = TestConfigBuilder::new().max_file_bytes(10).build();
    let packer = Packer::new(config);
    let packed = packer
        .collect(&[PathBuf::from("big.txt")], false, repo.path())
        .await
        .unwrap();
    assert!(packed.files[0].content.truncated);

    let mut doc = Vec::new();
    packer.write_document(&packed, &mut doc).unwrap();
    let doc = String::from_utf8(doc).unwrap();
    assert!(doc.contains("### File: big.txt\n```\nxxxxxxxxxx\n...(truncated)\n```\n"));
}

#[test_log::test(tokio::test)]
async fn dirs_only_skips_reading() {
    let repo = TestRepo::new();
    repo.write("a/b.txt", "content\n");

    let config = TestConfigBuilder::new().dirs_only(true).build();
    let packer = Packer::new(config);
    let packed = packer
        .collect(&[PathBuf::from(".")], false, repo.path())
        .await
        .unwrap();
    assert_eq!(packed.files[0].content.content, "");

    let mut doc = Vec::new();
    packer.write_document(&packed, &mut doc).unwrap();
    let doc = String::from_utf8(doc).unwrap();
    assert!(doc.contains("(skipped: directory-only mode)"));
    assert!(!doc.contains("content\n"));
}

#[test_log::test(tokio::test)]
async fn recent_filter_keeps_fresh_files() {
    let repo = TestRepo::new();
    repo.write("fresh.txt", "new\n");

    let packed = Packer::new(TestConfigBuilder::new().recent_days(1).build())
        .collect(&[PathBuf::from(".")], true, repo.path())
        .await
        .unwrap();
    assert_eq!(relative_files(&packed), vec!["fresh.txt"]);
}

#[test_log::test(tokio::test)]
async fn missing_inputs_are_skipped() {
    let repo = TestRepo::new();
    repo.write("one.txt", "1\n");

    let packed = Packer::new(TestConfigBuilder::new().build())
        .collect(
            &[PathBuf::from("one.txt"), PathBuf::from("gone.txt")],
            false,
            repo.path(),
        )
        .await
        .unwrap();
    assert_eq!(packed.files.len(), 1);
    assert_eq!(packed.skipped, vec![repo.join("gone.txt")]);
}

#[test_log::test(tokio::test)]
async fn run_writes_output_file() {
    let repo = TestRepo::new();
    repo.write("x.txt", "x\n");

    let config = TestConfigBuilder::new().output_path("context.md").build();
    Packer::new(config)
        .run(&[PathBuf::from("x.txt")], false, repo.path())
        .await
        .unwrap();

    let doc = std::fs::read_to_string(repo.join("context.md")).unwrap();
    assert!(doc.starts_with("# Repository Context\n"));
    assert!(doc.contains("- Total files: 1\n"));
}

#[tokio::test]
async fn config_file_drives_the_packer() {
    rcpack_test_utils::tracing_setup::init_test_tracing();
    let repo = TestRepo::new();
    repo.write("keep.rs", "fn keep() {}\n");
    repo.write("drop.txt", "drop\n");

    let config = repo.load_config("[scan]\ninclude = [\"rs\"]\n").await;
    let packed = Packer::new(config)
        .collect(&[PathBuf::from(".")], false, repo.path())
        .await
        .unwrap();
    assert_eq!(relative_files(&packed), vec!["keep.rs"]);
}

#[test_log::test(tokio::test)]
async fn cleanup_passes_run_without_compression() {
    let repo = TestRepo::new();
    repo.write("a.c", "int x = 1; // note\n\n/* block */\nint y = 2;\n");

    let config = TestConfigBuilder::new()
        .remove_comments(true)
        .remove_empty_lines(true)
        .log_level("debug")
        .build();
    let packed = Packer::new(config)
        .collect(&[PathBuf::from("a.c")], false, repo.path())
        .await
        .unwrap();

    assert_eq!(packed.files[0].content.content, "int x = 1; \nint y = 2;\n");
    assert_eq!(packed.total_lines(), 2);
}

#[test_log::test(tokio::test)]
async fn configured_skip_dirs_replace_defaults() {
    let repo = TestRepo::new();
    repo.write("a.txt", "a\n");
    repo.write("vendor/lib.txt", "v\n");
    repo.write("target/out.txt", "t\n");

    let config = TestConfigBuilder::new().skip_dirs(&["vendor"]).build();
    let packed = Packer::new(config)
        .collect(&[PathBuf::from(".")], false, repo.path())
        .await
        .unwrap();

    assert_eq!(relative_files(&packed), vec!["a.txt", "target/out.txt"]);
}

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn cargo_bin() -> Command {
    Command::cargo_bin("npm-usage").unwrap()
}

fn setup_file(dir: &Path, relative: &str, contents: &str) {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent directory");
    }
    fs::write(&path, contents).expect("write file");
}

#[test]
fn prints_markdown_for_explicit_inputs() {
    let temp = TempDir::new().expect("tempdir");

    cargo_bin()
        .current_dir(temp.path())
        .args([
            "--package-name",
            "mytool",
            "--cli-utility-names",
            "mytool",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "### Directly running using npx\n```shell\nnpx --yes mytool\n```",
        ))
        .stderr(predicate::str::is_empty());
}

#[test]
fn reads_package_json_from_working_directory() {
    let temp = TempDir::new().expect("tempdir");
    setup_file(
        temp.path(),
        "package.json",
        r#"{"name": "kit", "bin": {"kit-build": "./b.js", "kit-serve": "./s.js"}}"#,
    );

    cargo_bin()
        .current_dir(temp.path())
        .args(["--root-header-level", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "## Directly running using npx\n```shell\nnpx --yes --package kit kit-build\nnpx --yes --package kit kit-serve\n```",
        ))
        .stdout(predicate::str::contains("### Local installation and running using npm script"));
}

#[test]
fn fails_without_manifest_or_inputs() {
    let temp = TempDir::new().expect("tempdir");

    cargo_bin()
        .current_dir(temp.path())
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("package.json"))
        .stderr(predicate::str::contains("--cli-utility-names"));
}

#[test]
fn fails_when_manifest_has_no_bin() {
    let temp = TempDir::new().expect("tempdir");
    setup_file(temp.path(), "package.json", r#"{"name": "kit"}"#);

    cargo_bin()
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no `bin` field"));
}

#[test]
fn oversized_root_header_level_is_a_usage_error() {
    cargo_bin()
        .args(["--package-name", "p", "--cli-utility-names", "a"])
        .args(["--root-header-level", "18446744073709551615"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("--root-header-level"))
        .stderr(predicate::str::contains("panicked").not());
}

#[test]
fn manifest_without_name_renders_undefined() {
    let temp = TempDir::new().expect("tempdir");
    setup_file(temp.path(), "package.json", r#"{"bin": {"a": "a.js"}}"#);

    cargo_bin()
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("npx --yes undefined"));
}

#[test]
fn append_to_missing_file_fails_and_creates_nothing() {
    let temp = TempDir::new().expect("tempdir");

    cargo_bin()
        .current_dir(temp.path())
        .args([
            "--package-name",
            "pkg",
            "--cli-utility-names",
            "pkg",
            "--output",
            "USAGE.md",
            "--write-mode",
            "append",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to write output file"));

    assert!(!temp.path().join("USAGE.md").exists());
}

#[test]
fn replaces_placeholder_region_in_readme() {
    let temp = TempDir::new().expect("tempdir");
    setup_file(
        temp.path(),
        "README.md",
        "# Kit\n\n<!-- usage -->\nstale\n<!-- /usage -->\n\n## License\n",
    );

    let output = cargo_bin()
        .current_dir(temp.path())
        .args([
            "--package-name",
            "kit",
            "--cli-utility-names",
            "kit",
            "--output",
            "README.md",
            "--write-mode",
            "replace-placeholder",
            "--placeholder-start",
            "<!-- usage -->",
            "--placeholder-end",
            "<!-- /usage -->",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let markdown = String::from_utf8(output).expect("stdout utf8");
    let readme = fs::read_to_string(temp.path().join("README.md")).expect("read readme");
    assert_eq!(
        readme,
        format!(
            "# Kit\n\n<!-- usage -->\n{}\n<!-- /usage -->\n\n## License\n",
            markdown.trim_end()
        )
    );
}

#[test]
fn dry_run_leaves_file_untouched() {
    let temp = TempDir::new().expect("tempdir");
    setup_file(temp.path(), "USAGE.md", "old\n");

    cargo_bin()
        .current_dir(temp.path())
        .args([
            "--package-name",
            "pkg",
            "--cli-utility-names",
            "pkg",
            "--output",
            "USAGE.md",
            "--dry-run",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("-old"));

    assert_eq!(
        fs::read_to_string(temp.path().join("USAGE.md")).expect("read file"),
        "old\n"
    );
}

#[test]
fn verbose_diagnostics_stay_off_stdout() {
    let temp = TempDir::new().expect("tempdir");

    cargo_bin()
        .current_dir(temp.path())
        .args([
            "--package-name",
            "pkg",
            "--cli-utility-names",
            "pkg",
            "--verbose",
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("If you are going"))
        .stderr(predicate::str::contains("resolved package name"));
}

#[test]
fn help_lists_flags() {
    cargo_bin()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--package-name"))
        .stdout(predicate::str::contains("--cli-utility-names"))
        .stdout(predicate::str::contains("--root-header-level"));
}

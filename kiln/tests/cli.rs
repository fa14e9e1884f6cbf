//! Running the kiln binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const INDEX: &str = r#"
[project]
name = "storefront"

[compilations.web]
types = ["Storefront::Models::Product", "Storefront::Web::HomeController"]

[compilations.legacy]
types = [{ name = "Legacy::Product", visibility = "internal" }]
"#;

fn project(index: Option<&str>) -> TempDir {
    let temp = TempDir::new().unwrap();
    if let Some(content) = index {
        std::fs::write(temp.path().join("kiln.toml"), content).unwrap();
    }
    temp
}

fn kiln(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("kiln").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("KILN_INDEX")
        .env_remove("KILN_LOG");
    cmd
}

#[test]
fn test_list_shows_builtin_generators() {
    let dir = project(None);

    kiln(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("kiln:"))
        .stdout(predicate::str::contains("inspect (InspectModel)"))
        .stdout(predicate::str::contains("--compilation|-c"));
}

#[test]
fn test_types_lists_matches() {
    let dir = project(Some(INDEX));

    kiln(&dir)
        .args(["types", "Product"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Storefront::Models::Product (web, public)"))
        .stdout(predicate::str::contains("Legacy::Product (legacy, internal)"));
}

#[test]
fn test_types_with_explicit_index_path() {
    let dir = project(None);
    let elsewhere = project(Some(INDEX));
    let index = elsewhere.path().join("kiln.toml");

    kiln(&dir)
        .args(["types", "Storefront::Web::HomeController", "--index"])
        .arg(&index)
        .assert()
        .success()
        .stdout(predicate::str::contains("Storefront::Web::HomeController"));
}

#[test]
fn test_types_requires_index() {
    let dir = project(None);

    kiln(&dir)
        .args(["types", "Product"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no symbol index found"));
}

#[test]
fn test_broken_index_is_reported() {
    let dir = project(Some(
        "[project]\nname = \"storefront\"\n\n[compilations.web]\ntypes = [\"Store-front::Product\"]\n",
    ));

    kiln(&dir)
        .args(["types", "Product"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Store-front::Product"));
}

#[test]
fn test_run_inspect() {
    let dir = project(Some(INDEX));

    kiln(&dir)
        .args(["inspect", "Product", "-c", "web", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""full_name": "Storefront::Models::Product""#))
        .stdout(predicate::str::contains("Legacy::Product").not());
}

#[test]
fn test_generator_names_ignore_case() {
    let dir = project(Some(INDEX));

    kiln(&dir)
        .args(["INSPECT", "HomeController"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Storefront::Web::HomeController"));
}

#[test]
fn test_inspect_failure_is_one_line() {
    let dir = project(Some(INDEX));

    kiln(&dir)
        .args(["inspect", "Missing"])
        .assert()
        .code(1)
        .stderr(predicate::str::diff("error: no type named 'Missing' was found\n"));
}

#[test]
fn test_generator_help() {
    let dir = project(None);

    kiln(&dir)
        .args(["inspect", "-?"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: kiln inspect"))
        .stdout(predicate::str::contains("--compilation"));
}

#[test]
fn test_generator_usage_error() {
    let dir = project(None);

    kiln(&dir)
        .args(["inspect", "--unknown"])
        .assert()
        .code(2);
}

#[test]
fn test_unknown_generator() {
    let dir = project(None);

    kiln(&dir)
        .arg("scaffold")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no generator named 'scaffold' was found"));
}

#[test]
fn test_completions_include_generators() {
    let dir = project(None);

    kiln(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("inspect"));
}

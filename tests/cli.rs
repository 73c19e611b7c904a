use assert_cmd::Command;
use predicates::str::contains;
use std::fs;
use tempfile::TempDir;

fn fixture_site() -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("site/data")).unwrap();
    fs::write(
        tmp.path().join("site/data/works.json"),
        r#"{"works": [{"slug": "alpha", "title": "Alpha Checkout", "tags": ["IA"]}]}"#,
    )
    .unwrap();
    fs::write(
        tmp.path().join("site/data/research.json"),
        r#"{"research": []}"#,
    )
    .unwrap();
    fs::write(
        tmp.path().join("site/data/maintenance.json"),
        r#"{"enabled": false}"#,
    )
    .unwrap();
    tmp
}

fn cmd(tmp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("folio").unwrap();
    cmd.env("HOME", tmp.path())
        .arg("--site")
        .arg(tmp.path().join("site"));
    cmd
}

#[test]
fn route_home_renders_featured_sections() {
    let tmp = fixture_site();
    cmd(&tmp)
        .args(["route", "/"])
        .assert()
        .success()
        .stdout(contains("Featured Work"))
        .stdout(contains("Alpha Checkout"));
}

#[test]
fn list_work_prints_tab_separated_rows() {
    let tmp = fixture_site();
    cmd(&tmp)
        .args(["list", "work"])
        .assert()
        .success()
        .stdout(contains("alpha\tAlpha Checkout"));
}

#[test]
fn validate_reports_valid_content() {
    let tmp = fixture_site();
    cmd(&tmp)
        .args(["validate"])
        .assert()
        .success()
        .stdout(contains("content valid"));
}

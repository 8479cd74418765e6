use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Output;

fn repo_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("expected crates/<name> layout")
        .to_path_buf()
}

fn fixture(name: &str) -> PathBuf {
    let path = repo_root().join("fixtures").join(name);
    assert!(path.exists(), "fixture missing: {}", path.display());
    path
}

fn cli() -> Command {
    Command::new(assert_cmd::cargo_bin!("gridflow-cli"))
}

fn run_on_basic(args: &[&str]) -> Output {
    let path = fixture("basic.json");
    cli()
        .args(args)
        .arg(path.to_string_lossy().as_ref())
        .output()
        .expect("run gridflow-cli")
}

fn stdout_json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

fn start(layout: &Value, id: &str) -> (u64, u64) {
    let item = &layout["items"][id];
    (
        item["startColumn"].as_u64().expect("startColumn"),
        item["startRow"].as_u64().expect("startRow"),
    )
}

#[test]
fn cli_layout_places_auto_items() {
    let out = stdout_json(&run_on_basic(&["layout"]));
    assert_eq!(start(&out, "a"), (1, 1));
    assert_eq!(start(&out, "b"), (3, 1));
    assert_eq!(start(&out, "c"), (1, 3));
    assert_eq!(out["items"]["c"]["metadata"]["title"], "auto-placed");
    assert_eq!(out["items"]["c"]["y"], 180.0);
    assert_eq!(out["width"], 900.0);
}

#[test]
fn cli_layout_reads_stdin() {
    let text = fs::read_to_string(fixture("basic.json")).expect("read fixture");
    let output = cli()
        .args(["layout", "--pretty", "-"])
        .write_stdin(text)
        .output()
        .expect("run gridflow-cli");
    let out = stdout_json(&output);
    assert_eq!(start(&out, "c"), (1, 3));
    assert!(String::from_utf8_lossy(&output.stdout).contains("\n  \""));
}

#[test]
fn cli_slot_reports_first_free_position() {
    let out = stdout_json(&run_on_basic(&["slot", "--columns", "2", "--rows", "2"]));
    assert_eq!(out, serde_json::json!({ "startColumn": 3, "startRow": 3 }));
}

#[test]
fn cli_move_applies_offsets() {
    let out = stdout_json(&run_on_basic(&["move", "--id", "b", "--columns", "0", "--rows", "5"]));
    assert_eq!(out["changed"], true);
    assert_eq!(start(&out["layout"], "b"), (3, 6));
}

#[test]
fn cli_move_reports_rejection_as_unchanged() {
    let out = stdout_json(&run_on_basic(&["move", "--id", "a", "--columns", "-1", "--rows", "0"]));
    assert_eq!(out["changed"], false);
    assert_eq!(start(&out["layout"], "a"), (1, 1));
}

#[test]
fn cli_drag_converts_pixels_and_pushes_neighbours() {
    let out = stdout_json(&run_on_basic(&["drag", "--id", "a", "--dx", "180", "--dy", "0"]));
    assert_eq!(out["changed"], true);
    assert_eq!(start(&out["layout"], "a"), (3, 1));
    assert_eq!(start(&out["layout"], "b"), (7, 1));
    assert_eq!(start(&out["layout"], "c"), (1, 3));
}

#[test]
fn cli_resize_and_remove() {
    let out = stdout_json(&run_on_basic(&["resize", "--id", "c", "--columns", "3", "--rows", "1"]));
    assert_eq!(out["changed"], true);
    assert_eq!(out["layout"]["items"]["c"]["endColumn"], 3);

    let out = stdout_json(&run_on_basic(&["remove", "--id", "c"]));
    assert_eq!(out["changed"], true);
    assert!(out["layout"]["items"].get("c").is_none());
}

#[test]
fn cli_unknown_item_exits_with_3() {
    let output = run_on_basic(&["remove", "--id", "zzz"]);
    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&output.stderr).contains("layout has no item `zzz`"));
    run_on_basic_assert(&["drag", "--id", "zzz", "--dx", "1", "--dy", "1"]).code(3);
}

#[test]
fn cli_usage_errors_exit_with_2() {
    cli().arg("--bogus").assert().code(2);
    run_on_basic_assert(&["move", "--id", "a"]).code(2);
    run_on_basic_assert(&["resize", "--id", "a", "--columns", "-1", "--rows", "1"]).code(2);
}

#[test]
fn cli_invalid_descriptor_exits_with_1() {
    let path = fixture("invalid_gap.json");
    let output = cli()
        .arg("layout")
        .arg(path.to_string_lossy().as_ref())
        .output()
        .expect("run gridflow-cli");
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("rejected grid: Invalid layout gap"));
}

#[test]
fn cli_missing_file_exits_with_1() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let missing = tmp.path().join("nope.json");
    cli()
        .arg(missing.to_string_lossy().as_ref())
        .assert()
        .code(1);
}

#[test]
fn cli_malformed_json_exits_with_1() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let path = tmp.path().join("broken.json");
    fs::write(&path, "{ \"sliceHeight\": ").expect("write fixture");
    let output = cli()
        .arg(path.to_string_lossy().as_ref())
        .output()
        .expect("run gridflow-cli");
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("malformed layout descriptor"));
}

fn run_on_basic_assert(args: &[&str]) -> assert_cmd::assert::Assert {
    let path = fixture("basic.json");
    cli()
        .args(args)
        .arg(path.to_string_lossy().as_ref())
        .assert()
}

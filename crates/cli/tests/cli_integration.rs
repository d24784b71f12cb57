//! CLI integration tests for the `staybook` binary.
//!
//! All tests set `current_dir` to the workspace root so that relative
//! paths to fixtures resolve correctly. None of them reach the network.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Locate the workspace root by walking up from CARGO_MANIFEST_DIR.
fn workspace_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    // crates/cli -> workspace root is two levels up
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("workspace root")
        .to_path_buf()
}

fn staybook() -> Command {
    let mut cmd = cargo_bin_cmd!("staybook");
    cmd.current_dir(workspace_root());
    cmd.env_remove("RUST_LOG");
    cmd
}

fn config_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

// ──────────────────────────────────────────────
// 1. Help and version
// ──────────────────────────────────────────────

#[test]
fn help_exits_0_with_description() {
    staybook()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("canonical records"));
}

#[test]
fn version_exits_0() {
    staybook()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("staybook"));
}

// ──────────────────────────────────────────────
// 2. normalize
// ──────────────────────────────────────────────

#[test]
fn normalize_detail_text() {
    staybook()
        .args(["normalize", "fixtures/detail/rooms_object.json"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Grand Plaza Lisboa\n"))
        .stdout(predicate::str::contains("[+] Vouchered"))
        .stdout(predicate::str::contains("EUR 412.8"))
        .stdout(predicate::str::contains("Mr John Doe"));
}

#[test]
fn normalize_detail_json_matches_canonical_fixture() {
    let output = staybook()
        .args(["--output", "json", "normalize", "fixtures/detail/rooms_object.json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let actual: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let expected: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(workspace_root().join("fixtures/canonical/valid.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(actual, expected[0]);
}

#[test]
fn normalize_collection_rooms_uses_first_room() {
    let output = staybook()
        .args(["--output", "json", "normalize", "fixtures/detail/rooms_collection.json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let booking: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(booking["roomTypeName"], "Standard Twin");
    assert_eq!(booking["currencyCode"], "USD");
    assert_eq!(booking["roomCount"], 2);
}

#[test]
fn normalize_list_skips_corrupt_entry() {
    let output = staybook()
        .args(["--output", "json", "normalize", "--list", "fixtures/list/envelope.json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let bookings: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(bookings.as_array().unwrap().len(), 2);
    assert_eq!(bookings[1]["bookingStatus"], "Cancelled");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("skipped entry 1"), "stderr: {}", stderr);
}

#[test]
fn normalize_list_quiet_hides_skip_warning() {
    staybook()
        .args(["--quiet", "normalize", "--list", "fixtures/list/envelope.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Lisbon spring trip"))
        .stderr(predicate::str::contains("skipped").not());
}

#[test]
fn normalize_status_only_envelope_is_empty_listing() {
    staybook()
        .args(["normalize", "--list", "fixtures/list/status_only.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No bookings found."));
}

#[test]
fn normalize_non_object_detail_fails() {
    staybook()
        .args(["normalize", "fixtures/lookup/malformed.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed envelope"));
}

#[test]
fn normalize_missing_file_fails() {
    staybook()
        .args(["normalize", "fixtures/detail/nope.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error reading file"));
}

// ──────────────────────────────────────────────
// 3. classify
// ──────────────────────────────────────────────

#[test]
fn classify_found() {
    staybook()
        .args(["classify", "fixtures/lookup/found.json", "--reference", "GRP-55120"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Grand Plaza Lisboa"));
}

#[test]
fn classify_found_json_is_tagged() {
    let output = staybook()
        .args(["--output", "json", "classify", "fixtures/lookup/found.json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let outcome: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(outcome["outcome"], "found");
    assert_eq!(outcome["data"]["bookingId"], "982341");
}

#[test]
fn classify_not_found() {
    staybook()
        .args(["classify", "fixtures/lookup/not_found.json", "--reference", "REF-404"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "No booking found with reference ID: REF-404",
        ));
}

#[test]
fn classify_malformed_exits_1() {
    staybook()
        .args(["classify", "fixtures/lookup/malformed.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid response"));

    let output = staybook()
        .args(["--output", "json", "classify", "fixtures/lookup/malformed.json"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let outcome: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(outcome["outcome"], "malformed");
    assert_eq!(outcome["data"], "Service temporarily unavailable");
}

// ──────────────────────────────────────────────
// 4. validate
// ──────────────────────────────────────────────

#[test]
fn validate_valid_canonical_fixture() {
    staybook()
        .args(["validate", "fixtures/canonical/valid.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("valid"));
}

#[test]
fn validate_invalid_canonical_fixture() {
    staybook()
        .args(["validate", "fixtures/canonical/invalid.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid"));
}

#[test]
fn validate_invalid_json_output() {
    let output = staybook()
        .args(["--output", "json", "validate", "fixtures/canonical/invalid.json"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(report["valid"], false);
    assert!(!report["errors"].as_array().unwrap().is_empty());
}

// ──────────────────────────────────────────────
// 5. fetch and lookup (no upstream reachable)
// ──────────────────────────────────────────────

#[test]
fn fetch_rejects_bad_date() {
    staybook()
        .args(["fetch", "--from", "2024-02-30", "--to", "2024-03-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid date '2024-02-30'"));
}

#[test]
fn fetch_rejects_inverted_range() {
    staybook()
        .args(["fetch", "--from", "2024-03-02", "--to", "2024-03-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is after range end"));
}

#[test]
fn lookup_without_upstream_config_fails() {
    staybook()
        .args(["lookup", "GRP-55120"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no [upstream] section"));
}

#[test]
fn lookup_blank_reference_fails_before_request() {
    let config = config_file("[upstream]\nbase_url = \"http://127.0.0.1:1\"\n");
    staybook()
        .arg("--config")
        .arg(config.path())
        .args(["lookup", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("reference ID must not be empty"));
}

#[test]
fn lookup_unreachable_upstream_fails() {
    let config = config_file("[upstream]\nbase_url = \"http://127.0.0.1:1\"\ntimeout_secs = 2\n");
    staybook()
        .arg("--config")
        .arg(config.path())
        .args(["lookup", "GRP-55120"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("127.0.0.1:1/BookingDetail"));
}

// ──────────────────────────────────────────────
// 6. config
// ──────────────────────────────────────────────

#[test]
fn alias_override_changes_resolution() {
    let config = config_file("[aliases]\ntripOrHotelName = [\"HotelDetails.City\"]\n");
    staybook()
        .arg("--config")
        .arg(config.path())
        .args(["normalize", "fixtures/detail/rooms_object.json"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Lisbon\n"));
}

#[test]
fn invalid_config_fails() {
    let config = config_file("[aliases]\nnotAField = [\"X\"]\n");
    staybook()
        .arg("--config")
        .arg(config.path())
        .args(["normalize", "fixtures/detail/rooms_object.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown canonical field"));
}

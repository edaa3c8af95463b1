//! End-to-end tests for the modcheck CLI
//!
//! These tests verify:
//! - Configuration errors are reported before any file or network access
//! - Missing or malformed go.mod files exit with code 1
//! - Runs that need no proxy access succeed offline
//! - Unreachable proxies give a partial result with exit code 2

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// A proxy URL nothing listens on
const DEAD_PROXY: &str = "http://127.0.0.1:9";

fn modcheck() -> Command {
    let mut cmd = Command::cargo_bin("modcheck").unwrap();
    cmd.env_remove("RUST_LOG").env("GOPROXY", DEAD_PROXY);
    cmd
}

fn project_with(go_mod: &str) -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    fs::write(dir.path().join("go.mod"), go_mod).unwrap();
    dir
}

mod config_validation {
    use super::*;

    #[test]
    fn test_max_versions_zero() {
        modcheck()
            .args(["--max-versions", "0"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Error:"))
            .stderr(predicate::str::contains("max versions"));
    }

    #[test]
    fn test_max_versions_too_large() {
        modcheck()
            .args(["--max-versions", "1001"])
            .assert()
            .code(1);
    }

    #[test]
    fn test_unknown_filter_token() {
        modcheck()
            .args(["--filter", "major,huge"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("huge"));
    }

    #[test]
    fn test_zero_concurrency() {
        modcheck()
            .args(["--concurrency", "0"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("concurrency"));
    }

    #[test]
    fn test_quiet_and_verbose() {
        modcheck().args(["-q", "--verbose"]).assert().code(1);
    }

    #[test]
    fn test_validation_happens_before_reading_manifest() {
        let dir = tempfile::tempdir().unwrap();
        modcheck()
            .arg(dir.path())
            .args(["--max-versions", "0"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("go.mod").not());
    }

    #[test]
    fn test_version_flag() {
        modcheck()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("modcheck"));
    }
}

mod manifest_errors {
    use super::*;

    #[test]
    fn test_missing_go_mod() {
        let dir = tempfile::tempdir().unwrap();
        modcheck()
            .arg(dir.path())
            .assert()
            .code(1)
            .stderr(predicate::str::contains("go.mod"));
    }

    #[test]
    fn test_unterminated_require_block() {
        let dir = project_with("module example.com/x\n\nrequire (\n\tgithub.com/a/b v1.0.0\n");
        modcheck()
            .arg(dir.path())
            .assert()
            .code(1)
            .stderr(predicate::str::contains("line 3"));
    }
}

mod offline_runs {
    use super::*;

    #[test]
    fn test_no_requirements() {
        let dir = project_with("module example.com/x\n\ngo 1.22\n");
        modcheck()
            .arg(dir.path())
            .arg("--no-color")
            .assert()
            .success()
            .stdout(predicate::str::contains("No dependencies to check."));
    }

    #[test]
    fn test_manifest_file_path() {
        let dir = project_with("module example.com/x\n");
        modcheck()
            .arg(dir.path().join("go.mod"))
            .arg("--no-color")
            .assert()
            .success();
    }

    #[test]
    fn test_indirect_only_is_skipped_by_default() {
        let dir = project_with(
            "module example.com/x\n\nrequire golang.org/x/text v0.14.0 // indirect\n",
        );
        modcheck()
            .arg(dir.path())
            .arg("--no-color")
            .assert()
            .success()
            .stdout(predicate::str::contains("No dependencies to check."));
    }

    #[test]
    fn test_unparseable_requirement_is_excluded() {
        let dir = project_with("module example.com/x\n\nrequire github.com/a/b not-a-version\n");
        modcheck()
            .arg(dir.path())
            .args(["--json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"excluded\": 1"))
            .stdout(predicate::str::contains("\"kind\": \"excluded\""));
    }

    #[test]
    fn test_json_schema_when_empty() {
        let dir = project_with("module example.com/x\n");
        let output = modcheck()
            .arg(dir.path())
            .arg("--json")
            .output()
            .unwrap();
        assert!(output.status.success());

        let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert!(parsed["dependencies"].as_array().unwrap().is_empty());
        assert!(parsed["errors"].as_array().unwrap().is_empty());
        assert_eq!(parsed["summary"]["checked"], 0);
    }
}

mod partial_failures {
    use super::*;

    #[test]
    fn test_unreachable_proxy_exits_two() {
        let dir = project_with("module example.com/x\n\nrequire github.com/a/b v1.0.0\n");
        let output = modcheck()
            .arg(dir.path())
            .args(["--json", "-q"])
            .output()
            .unwrap();

        assert_eq!(output.status.code(), Some(2));
        let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(parsed["summary"]["fetch_failures"], 1);
        assert_eq!(parsed["errors"][0]["dependency"], "github.com/a/b");
        assert_eq!(parsed["errors"][0]["kind"], "fetch");
    }

    #[test]
    fn test_unreachable_proxy_table_hint() {
        let dir = project_with("module example.com/x\n\nrequire github.com/a/b v1.0.0\n");
        modcheck()
            .arg(dir.path())
            .arg("--no-color")
            .assert()
            .code(2)
            .stdout(predicate::str::contains("up to date").not())
            .stdout(predicate::str::contains("No newer versions match the filter."))
            .stdout(predicate::str::contains("could not be checked"));
    }
}

//! End-to-end tests against a scripted stand-in for the vendor utility.
//!
//! These tests exercise the full invoke-parse-apply path without the real
//! IpConfigUtility: a shell script plays the vendor binary, so they verify
//! argument shapes, the stdin newline handshake, and force/persist ordering.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use camera_ipconfig::assign::assign_all;
use camera_ipconfig::cameras::parse_camera_list;
use camera_ipconfig::utility::{Assignment, IpConfigUtility};

const LIST_FIXTURE: &str = "\
IpConfigUtility v2.1
Scanning network adapters...

[0]  00:30:53:2B:7F:31  172.16.1.2   255.255.0.0  0.0.0.0  Static
[1]  00:30:53:2B:80:0A  172.16.1.3   255.255.0.0  0.0.0.0  DHCP

Press Enter to exit.
";

/// Write an executable shell script into `dir` and return its path.
fn write_script(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("IpConfigUtility");
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

#[test]
fn test_list_and_parse_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let script = write_script(
        dir.path(),
        &format!(
            "[ \"$1\" = \"/list\" ] || exit 2\nread _enter\ncat <<'EOF'\n{}EOF",
            LIST_FIXTURE
        ),
    );

    let utility = IpConfigUtility::new(&script);
    let output = utility.list().unwrap();
    let cameras = parse_camera_list(&output);

    assert_eq!(cameras.len(), 2);
    assert_eq!(cameras[0].mac, "00:30:53:2B:7F:31");
    assert_eq!(cameras[0].ip, "172.16.1.2");
    assert_eq!(cameras[1].index, 1);
    assert_eq!(cameras[1].gateway, "0.0.0.0");
}

#[test]
fn test_stdin_newline_unblocks_utility() {
    // The real utility waits for an Enter keypress; a script that blocks on
    // `read` only terminates because the wrapper feeds it a newline.
    let dir = tempfile::tempdir().unwrap();
    let script = write_script(dir.path(), "read _enter\necho unblocked");

    let utility = IpConfigUtility::new(&script);
    let output = utility.list().unwrap();
    assert_eq!(output.trim(), "unblocked");
}

#[test]
fn test_apply_runs_force_then_persist() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("calls.log");
    let script = write_script(
        dir.path(),
        &format!("read _enter\necho \"$@\" >> '{}'", log.display()),
    );

    let utility = IpConfigUtility::new(&script);
    let assignment = Assignment {
        mac: "00:30:53:2B:7F:31".to_string(),
        ip: "172.16.1.20".to_string(),
        subnet: "255.255.0.0".to_string(),
        gateway: "0.0.0.0".to_string(),
    };
    utility.apply(&assignment).unwrap();

    let calls = fs::read_to_string(&log).unwrap();
    let lines: Vec<&str> = calls.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[0],
        "/force -a 172.16.1.20 -m 00:30:53:2B:7F:31 -s 255.255.0.0 -g 0.0.0.0"
    );
    assert_eq!(
        lines[1],
        "/persist -a 172.16.1.20 -m 00:30:53:2B:7F:31 -s 255.255.0.0 -g 0.0.0.0"
    );
}

#[test]
fn test_force_failure_skips_persist() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("calls.log");
    let script = write_script(
        dir.path(),
        &format!(
            "read _enter\necho \"$1\" >> '{}'\n[ \"$1\" = \"/force\" ] && exit 1\nexit 0",
            log.display()
        ),
    );

    let utility = IpConfigUtility::new(&script);
    let assignment = Assignment {
        mac: "00:30:53:2B:7F:31".to_string(),
        ip: "172.16.1.20".to_string(),
        subnet: "255.255.0.0".to_string(),
        gateway: "0.0.0.0".to_string(),
    };
    let result = utility.apply(&assignment);

    assert!(result.is_err());
    let calls = fs::read_to_string(&log).unwrap();
    assert_eq!(calls.trim(), "/force");
}

#[test]
fn test_assign_flow_against_scripted_utility() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("calls.log");
    let script = write_script(
        dir.path(),
        &format!("read _enter\necho \"$1 $5\" >> '{}'", log.display()),
    );

    let utility = IpConfigUtility::new(&script);
    let cameras = parse_camera_list(LIST_FIXTURE);
    assert_eq!(cameras.len(), 2);

    // Assign the first camera, skip the second.
    let mut input = std::io::Cursor::new("172.16.1.20\n\n");
    let mut out = Vec::new();
    let report = assign_all(
        &utility,
        &cameras,
        "255.255.0.0",
        "0.0.0.0",
        &mut input,
        &mut out,
    )
    .unwrap();

    assert_eq!(report.applied, 1);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.failed, 0);

    let calls = fs::read_to_string(&log).unwrap();
    let lines: Vec<&str> = calls.lines().collect();
    assert_eq!(lines, vec!["/force 00:30:53:2B:7F:31", "/persist 00:30:53:2B:7F:31"]);

    let output = String::from_utf8(out).unwrap();
    assert!(output.contains("Successfully applied IP 172.16.1.20"));
    assert!(output.contains("Skipped camera with MAC 00:30:53:2B:80:0A."));
    assert!(output.contains("1 applied, 0 failed, 1 skipped."));
}

#[test]
fn test_every_attempt_failing_is_reported_as_failure() {
    // A utility that rejects every force must leave the run in the state
    // the CLI maps to a non-zero exit.
    let dir = tempfile::tempdir().unwrap();
    let script = write_script(dir.path(), "read _enter\necho 'device unreachable' >&2\nexit 1");

    let utility = IpConfigUtility::new(&script);
    let cameras = parse_camera_list(LIST_FIXTURE);
    assert_eq!(cameras.len(), 2);

    let mut input = std::io::Cursor::new("172.16.1.20\n172.16.1.21\n");
    let mut out = Vec::new();
    let report = assign_all(
        &utility,
        &cameras,
        "255.255.0.0",
        "0.0.0.0",
        &mut input,
        &mut out,
    )
    .unwrap();

    assert_eq!(report.failed, 2);
    assert_eq!(report.applied, 0);
    assert!(report.all_failed());

    let output = String::from_utf8(out).unwrap();
    assert!(output.contains("device unreachable"));
    assert!(output.contains("0 applied, 2 failed, 0 skipped."));
}

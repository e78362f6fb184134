use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn chathook() -> Command {
    let mut cmd = Command::cargo_bin("chathook").expect("binary exists");
    // Keep the environment fallback out of the picture.
    cmd.env_remove("CHATHOOK_WEBHOOK").env_remove("CHATHOOK_USERNAME");
    cmd
}

/// Sending an empty message resolves the connection but issues no request,
/// so it succeeds without any endpoint being reachable.
#[test]
fn send_empty_message_is_silent_noop() {
    chathook()
        .arg("send")
        .arg("")
        .arg("--webhook")
        .arg("https://hooks.example/abc")
        .arg("--username")
        .arg("tester")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to send"));
}

#[test]
fn send_without_any_connection_fails() {
    chathook()
        .arg("send")
        .arg("hello")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not configured"));
}

#[test]
fn export_then_import_round_trips_through_the_cli() {
    let dir = tempdir().unwrap();
    let csv = dir.path().join("connections.csv");

    chathook()
        .arg("export")
        .arg(&csv)
        .arg("--webhook")
        .arg("https://hooks.example/abc")
        .arg("--username")
        .arg("tester")
        .arg("--server")
        .arg("my-server")
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 connection"));

    chathook()
        .arg("import")
        .arg(&csv)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("tester")
                .and(predicate::str::contains("https://hooks.example/abc"))
                .and(predicate::str::contains("my-server")),
        );
}

#[test]
fn import_missing_file_fails() {
    let dir = tempdir().unwrap();
    chathook()
        .arg("import")
        .arg(dir.path().join("absent.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("file not found"));
}

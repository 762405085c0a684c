// tests for sandbox command execution
// these spawn real shell processes, so they are feature gated:
//
//   cargo test --features test-exec

#![cfg(feature = "test-exec")]

use std::time::Duration;

use nlsite::Sandbox;

#[tokio::test]
async fn test_run_captures_stdout() {
    let sandbox = Sandbox::ephemeral().unwrap();
    let outcome = sandbox
        .run("echo hello", Duration::from_secs(5))
        .await
        .unwrap();

    assert!(outcome.success());
    assert_eq!(outcome.exit_code, 0);
    assert!(outcome.stdout.contains("hello"));
    assert!(!outcome.timed_out);
}

#[tokio::test]
async fn test_run_captures_stderr() {
    let sandbox = Sandbox::ephemeral().unwrap();
    let outcome = sandbox
        .run("echo oops >&2", Duration::from_secs(5))
        .await
        .unwrap();

    assert!(outcome.success());
    assert!(outcome.stderr.contains("oops"));
}

#[tokio::test]
async fn test_run_reports_exit_code() {
    let sandbox = Sandbox::ephemeral().unwrap();
    let outcome = sandbox.run("exit 3", Duration::from_secs(5)).await.unwrap();

    assert!(!outcome.success());
    assert_eq!(outcome.exit_code, 3);
}

#[tokio::test]
async fn test_run_times_out() {
    let sandbox = Sandbox::ephemeral().unwrap();
    let outcome = sandbox
        .run("sleep 5", Duration::from_millis(200))
        .await
        .unwrap();

    assert!(outcome.timed_out);
    assert!(!outcome.success());
    assert_eq!(outcome.exit_code, -1);
}

#[tokio::test]
async fn test_run_uses_sandbox_as_cwd() {
    let sandbox = Sandbox::ephemeral().unwrap();
    let outcome = sandbox
        .run("echo made > marker.txt", Duration::from_secs(5))
        .await
        .unwrap();

    assert!(outcome.success());
    assert!(sandbox.root().join("marker.txt").exists());
}

#[tokio::test]
async fn test_run_missing_program_fails_cleanly() {
    let sandbox = Sandbox::ephemeral().unwrap();
    let outcome = sandbox
        .run("definitely-not-a-real-program-xyz", Duration::from_secs(5))
        .await
        .unwrap();

    assert!(!outcome.success());
    assert_ne!(outcome.exit_code, 0);
}

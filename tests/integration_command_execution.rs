//! コマンド実行の統合テスト
//!
//! 実プロセスを起動し、出力の取得・タイムアウト時の強制終了・シェル経由の実行を確認する。
#![cfg(unix)]

mod common;

use std::time::{Duration, Instant};
use svnapi::infrastructure::process::{
    CommandExecutor, CommandRunner, CommandSpec, ExecutionMode, Platform,
};
use svnapi::SvnError;

fn executor() -> CommandExecutor {
    CommandExecutor::new(Platform::Posix)
}

/// タイムアウトエラーからPIDを取り出す
fn timed_out_pid(error: SvnError) -> u32 {
    match error {
        SvnError::Timeout { pid, timeout_ms, .. } => {
            assert_eq!(timeout_ms, 300);
            pid.expect("Timeout should carry the pid")
        }
        other => panic!("Expected a timeout, got {:?}", other),
    }
}

#[test]
fn test_blocking_timeout_kills_the_child() {
    let spec = CommandSpec::new("sleep 5").with_timeout(Duration::from_millis(300));

    let started = Instant::now();
    let error = executor().run(&spec, true).unwrap_err();
    assert!(started.elapsed() < Duration::from_secs(4));

    let _pid = timed_out_pid(error);
    #[cfg(target_os = "linux")]
    assert!(!common::test_helpers::process_exists(_pid));
}

#[tokio::test]
async fn test_async_timeout_kills_the_child() {
    let spec = CommandSpec::new("sleep 5").with_timeout(Duration::from_millis(300));

    let started = Instant::now();
    let error = executor().run_async(&spec, true).await.unwrap_err();
    assert!(started.elapsed() < Duration::from_secs(4));

    let _pid = timed_out_pid(error);
    #[cfg(target_os = "linux")]
    assert!(!common::test_helpers::process_exists(_pid));
}

#[tokio::test]
async fn test_sync_mode_timeout_through_runner() {
    let runner = executor().with_mode(ExecutionMode::Sync);
    let spec = CommandSpec::new("sleep 5").with_timeout(Duration::from_millis(300));

    let error = runner.execute(&spec, true).await.unwrap_err();
    assert!(matches!(error, SvnError::Timeout { .. }));
}

#[tokio::test]
async fn test_stdout_and_stderr_are_captured_separately() {
    let spec = CommandSpec::new("echo out; echo err >&2").with_shell(true);

    let result = executor().execute(&spec, true).await.unwrap();
    assert_eq!(result.stdout_text().unwrap(), "out\n");
    assert_eq!(result.stderr_text().unwrap(), "err\n");
    assert_eq!(result.exit_code, Some(0));
}

#[tokio::test]
async fn test_stderr_is_kept_without_output_capture() {
    let spec = CommandSpec::new("echo out; echo err >&2; exit 2").with_shell(true);

    let result = executor().execute(&spec, false).await.unwrap();
    assert!(result.stdout.is_empty());
    assert_eq!(result.stderr_text().unwrap(), "err\n");
    assert_eq!(result.exit_code, Some(2));
}

#[tokio::test]
async fn test_quoted_arguments_reach_the_program_intact() {
    let spec = CommandSpec::new(r#"printf "%s|" 'a b' 'c "d"' e"#);

    let result = executor().execute(&spec, true).await.unwrap();
    assert_eq!(result.stdout_text().unwrap(), r#"a b|c "d"|e|"#);
}

#[tokio::test]
async fn test_large_output_does_not_block() {
    let spec = CommandSpec::new("head -c 1000000 /dev/zero");

    let result = executor().execute(&spec, true).await.unwrap();
    assert_eq!(result.stdout.len(), 1_000_000);

    let result = executor()
        .with_mode(ExecutionMode::Sync)
        .execute(&spec, true)
        .await
        .unwrap();
    assert_eq!(result.stdout.len(), 1_000_000);
}

#[tokio::test]
async fn test_concurrent_commands_keep_their_own_output() {
    let executor = executor();
    let specs: Vec<CommandSpec> = (0..5).map(|i| CommandSpec::new(format!("echo {}", i))).collect();

    let results = futures::future::try_join_all(specs.iter().map(|spec| executor.execute(spec, true)))
        .await
        .unwrap();

    for (i, result) in results.iter().enumerate() {
        assert_eq!(result.stdout_text().unwrap(), format!("{}\n", i));
    }
}

#[tokio::test]
async fn test_auth_suffix_is_passed_but_not_reported() {
    let spec = CommandSpec::new("sh -c 'echo \"$1 $2\"; exit 0' sh")
        .with_auth_suffix("--password hunter2");

    let result = executor().execute(&spec, true).await.unwrap();
    assert_eq!(result.stdout_text().unwrap(), "--password hunter2\n");

    let missing = CommandSpec::new("/nonexistent/svn info")
        .with_auth_suffix("--password hunter2");
    let error = executor().execute(&missing, true).await.unwrap_err();
    assert!(matches!(error, SvnError::Process { .. }));
    assert!(!error.to_string().contains("hunter2"));
}

#[test]
fn test_blocking_timeout_kills_shell_descendants() {
    let spec = CommandSpec::new("sleep 7.101; echo done")
        .with_shell(true)
        .with_timeout(Duration::from_millis(300));

    let error = executor().run(&spec, true).unwrap_err();
    assert!(matches!(error, SvnError::Timeout { pid: Some(_), .. }));

    #[cfg(target_os = "linux")]
    {
        std::thread::sleep(Duration::from_millis(200));
        assert_eq!(common::test_helpers::count_processes_with_arg("7.101"), 0);
    }
}

#[tokio::test]
async fn test_async_timeout_kills_shell_descendants() {
    let spec = CommandSpec::new("sleep 7.102; echo done")
        .with_shell(true)
        .with_timeout(Duration::from_millis(300));

    let error = executor().run_async(&spec, true).await.unwrap_err();
    assert!(matches!(error, SvnError::Timeout { pid: Some(_), .. }));

    #[cfg(target_os = "linux")]
    {
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(common::test_helpers::count_processes_with_arg("7.102"), 0);
    }
}

#[test]
fn test_blocking_timeout_covers_output_held_by_background_child() {
    let spec = CommandSpec::new("sleep 3.103 & echo hi")
        .with_shell(true)
        .with_timeout(Duration::from_millis(300));

    let started = Instant::now();
    let error = executor().run(&spec, true).unwrap_err();
    assert!(started.elapsed() < Duration::from_secs(2));
    assert!(matches!(error, SvnError::Timeout { .. }));

    #[cfg(target_os = "linux")]
    {
        std::thread::sleep(Duration::from_millis(200));
        assert_eq!(common::test_helpers::count_processes_with_arg("3.103"), 0);
    }
}

#[tokio::test]
async fn test_async_timeout_covers_output_held_by_background_child() {
    let spec = CommandSpec::new("sleep 3.104 & echo hi")
        .with_shell(true)
        .with_timeout(Duration::from_millis(300));

    let started = Instant::now();
    let error = executor().run_async(&spec, true).await.unwrap_err();
    assert!(started.elapsed() < Duration::from_secs(2));
    assert!(matches!(error, SvnError::Timeout { .. }));

    #[cfg(target_os = "linux")]
    {
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(common::test_helpers::count_processes_with_arg("3.104"), 0);
    }
}

#[tokio::test]
async fn test_background_child_without_pipes_does_not_block() {
    let spec = CommandSpec::new("sleep 2.105 >/dev/null 2>&1 & echo hi")
        .with_shell(true)
        .with_timeout(Duration::from_secs(5));

    let result = executor().run_async(&spec, true).await.unwrap();
    assert_eq!(result.stdout_text().unwrap(), "hi\n");
}

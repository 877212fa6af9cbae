//! CLIの統合テスト
//!
//! ビルドされた`svnapi`バイナリを起動し、終了コードと出力を確認する。

mod common;

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use svnapi::infrastructure::filesystem::{ConfigStore, SvnApiConfig};
use tempfile::TempDir;

const ROOT_URL: &str = "svn://localhost/marssvn";

/// 環境変数の認証情報を取り除いた`svnapi`コマンドを作成
fn svnapi(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("svnapi").unwrap();
    cmd.env_remove("SVNAPI_USERNAME")
        .env_remove("SVNAPI_PASSWORD")
        .env_remove("RUST_LOG")
        .arg("--no-color")
        .arg("--config")
        .arg(config);
    cmd
}

/// 設定ファイルを書き出してそのパスを返す
fn write_config(dir: &Path, config: &SvnApiConfig) -> PathBuf {
    let path = dir.join("config.yaml");
    ConfigStore::new().save(&path, config).unwrap();
    path
}

#[test]
fn test_help_lists_subcommands() {
    let temp = TempDir::new().unwrap();
    let mut cmd = svnapi(&temp.path().join("config.yaml"));

    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("repo"));
}

#[test]
fn test_missing_root_url_fails() {
    let temp = TempDir::new().unwrap();

    svnapi(&temp.path().join("missing.yaml"))
        .args(["head", "-u", "admin", "-p", "secret"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No repository root URL"));
}

#[test]
fn test_missing_user_reports_ec0001() {
    let temp = TempDir::new().unwrap();

    svnapi(&temp.path().join("missing.yaml"))
        .args(["head", "--root-url", ROOT_URL])
        .assert()
        .failure()
        .stderr(predicate::str::contains("EC0001"));
}

#[test]
fn test_invalid_revision_is_a_usage_error() {
    let temp = TempDir::new().unwrap();

    svnapi(&temp.path().join("missing.yaml"))
        .args(["cat", "a.txt", "-r", "yesterday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("yesterday"));
}

#[test]
fn test_invalid_config_is_rejected() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.yaml");
    std::fs::write(&path, "default_timeout_secs: 0\n").unwrap();

    svnapi(&path)
        .args(["head", "--root-url", ROOT_URL, "-u", "admin", "-p", "secret"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_repo_create_requires_user() {
    let temp = TempDir::new().unwrap();

    svnapi(&temp.path().join("missing.yaml"))
        .args(["repo", "create", "marssvn", "--root"])
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("--username"));
}

#[cfg(unix)]
mod with_fake_svn {
    use super::*;
    use crate::common::test_fixtures::{HEAD_REVISION, WRONG_PASSWORD};
    use crate::common::test_helpers::FakeSvn;

    fn config_for(fake: &FakeSvn) -> PathBuf {
        let config = SvnApiConfig {
            svn_executable: fake.executable(),
            server_url: Some(ROOT_URL.to_string()),
            ..SvnApiConfig::default()
        };
        write_config(fake.dir(), &config)
    }

    #[test]
    fn test_head_prints_revision() {
        let fake = FakeSvn::new();

        svnapi(&config_for(&fake))
            .args(["head", "-u", "admin", "-p", "secret"])
            .assert()
            .success()
            .stdout(format!("{}\n", HEAD_REVISION));
    }

    #[test]
    fn test_head_in_sync_mode() {
        let fake = FakeSvn::new();

        svnapi(&config_for(&fake))
            .args(["head", "--sync", "-u", "admin", "-p", "secret"])
            .assert()
            .success()
            .stdout(format!("{}\n", HEAD_REVISION));
    }

    #[test]
    fn test_list_as_json() {
        let fake = FakeSvn::new();

        let output = svnapi(&config_for(&fake))
            .args(["list", "trunk", "--output", "json", "-u", "admin", "-p", "secret"])
            .output()
            .unwrap();
        assert!(output.status.success());

        let entries: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        let entries = entries.as_array().unwrap();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0]["name"], "a.txt");
        assert_eq!(entries[0]["size"], 42);
        assert_eq!(entries[1]["kind"], "dir");
    }

    #[test]
    fn test_credentials_from_environment() {
        let fake = FakeSvn::new();

        svnapi(&config_for(&fake))
            .env("SVNAPI_USERNAME", "admin")
            .env("SVNAPI_PASSWORD", "secret")
            .args(["cat", "trunk/a.txt"])
            .assert()
            .success()
            .stdout("hello from svn://localhost/marssvn/trunk/a.txt\n");
    }

    #[test]
    fn test_missing_mime_type_is_not_an_error() {
        let fake = FakeSvn::new();

        svnapi(&config_for(&fake))
            .args(["mime-type", "trunk/a.txt", "-u", "admin", "-p", "secret"])
            .assert()
            .success()
            .stdout(predicate::str::contains("(not set)"));
    }

    #[test]
    fn test_last_commit_as_json_carries_message() {
        let fake = FakeSvn::new();

        let output = svnapi(&config_for(&fake))
            .args(["last-commit", "trunk/a.txt", "--output", "json", "-u", "admin", "-p", "secret"])
            .output()
            .unwrap();
        assert!(output.status.success());

        let commit: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(commit["revision"], 7);
        assert_eq!(commit["author"], "bob");
        assert_eq!(commit["message"], "Add design document");
        assert!(fake.calls().iter().any(|call| call.starts_with("log ") && call.contains("-r 7")));
    }

    #[test]
    fn test_list_with_mime_types_looks_up_files_only() {
        let fake = FakeSvn::new();

        svnapi(&config_for(&fake))
            .args(["list", "trunk", "--mime-types", "-u", "admin", "-p", "secret"])
            .assert()
            .success()
            .stdout(predicate::str::contains("a.txt"));

        let lookups = fake
            .calls()
            .iter()
            .filter(|call| call.starts_with("propget "))
            .count();
        assert!(lookups >= 1);
        assert!(lookups < 4);
    }

    #[test]
    fn test_wrong_password_fails_with_auth_code() {
        let fake = FakeSvn::new();

        svnapi(&config_for(&fake))
            .args(["head", "-u", "admin", "-p", WRONG_PASSWORD])
            .assert()
            .failure()
            .stderr(predicate::str::contains("E170001"))
            .stderr(predicate::str::contains(WRONG_PASSWORD).not());
    }

    #[test]
    fn test_timeout_flag_stops_slow_command() {
        let fake = FakeSvn::new();

        svnapi(&config_for(&fake))
            .args(["mkdir", "trunk/slow", "-m", "wait", "--timeout", "1", "-u", "admin", "-p", "secret"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("timed out"));
    }
}

//! テストヘルパー関数
//!
//! 本物の`svn`を使わずにクライアントとCLIを動かすための偽`svn`スクリプトを提供する。

use super::test_fixtures::{
    HEAD_REVISION, INFO_XML, LAST_CHANGED_REVISION, LIST_XML, LOG_XML, WRONG_PASSWORD,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// 一時ディレクトリに置かれた偽の`svn`実行ファイル
///
/// 受け取った引数を1行ずつ`calls.log`に記録し、サブコマンドに応じて
/// フィクスチャのXMLや`svn`形式のエラーメッセージを返す。
pub struct FakeSvn {
    dir: TempDir,
    script: PathBuf,
    log: PathBuf,
}

impl FakeSvn {
    /// 偽`svn`スクリプトを作成
    #[cfg(unix)]
    pub fn new() -> Self {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().expect("Failed to create temp directory");
        let script = dir.path().join("svn");
        let log = dir.path().join("calls.log");

        fs::write(&script, Self::script_body(&log)).expect("Failed to write fake svn");
        let mut permissions = fs::metadata(&script)
            .expect("Failed to stat fake svn")
            .permissions();
        permissions.set_mode(0o755);
        fs::set_permissions(&script, permissions).expect("Failed to chmod fake svn");

        Self { dir, script, log }
    }

    /// スクリプトのパス（`SvnClient::with_executable`に渡す）
    pub fn executable(&self) -> String {
        self.script.to_string_lossy().into_owned()
    }

    /// 作業用の一時ディレクトリ
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// これまでの呼び出しの引数（1呼び出し1行）
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(&self.log)
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    fn script_body(log: &Path) -> String {
        format!(
            r#"#!/bin/sh
printf '%s\n' "$*" >> '{log}'
for arg in "$@"; do
  if [ "$arg" = '{wrong}' ]; then
    echo "svn: E170001: Authentication error from server: Password incorrect" >&2
    exit 1
  fi
done
case "$*" in
  *slow*) exec sleep 5 ;;
esac
case "$1" in
  info)
    case "$*" in
      *"--show-item revision"*) printf '%s' {head} ;;
      *"--show-item last-changed-revision"*) printf '%s' {last_changed} ;;
      *)
        cat <<'XML'
{info}
XML
        ;;
    esac
    ;;
  list)
    cat <<'XML'
{list}
XML
    ;;
  log)
    cat <<'XML'
{log_xml}
XML
    ;;
  cat)
    printf 'hello from %s\n' "$2"
    ;;
  propget)
    echo "svn: warning: W200017: Property 'svn:mime-type' not found on '$3'" >&2
    exit 1
    ;;
  mkdir|move|lock|unlock|export)
    exit 0
    ;;
  *)
    echo "svn: E205001: Unknown subcommand: '$1'" >&2
    exit 1
    ;;
esac
"#,
            log = log.display(),
            wrong = WRONG_PASSWORD,
            head = HEAD_REVISION,
            last_changed = LAST_CHANGED_REVISION,
            info = INFO_XML,
            list = LIST_XML,
            log_xml = LOG_XML,
        )
    }
}

/// プロセスがまだ存在するか（Linuxでは`/proc`で確認する）
#[cfg(target_os = "linux")]
pub fn process_exists(pid: u32) -> bool {
    Path::new(&format!("/proc/{}", pid)).exists()
}

/// 引数に`marker`を含む生存中のプロセス数（ゾンビはcmdlineが空なので数えない）
#[cfg(target_os = "linux")]
pub fn count_processes_with_arg(marker: &str) -> usize {
    let Ok(entries) = fs::read_dir("/proc") else {
        return 0;
    };
    entries
        .flatten()
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.chars().all(|c| c.is_ascii_digit()))
        })
        .filter_map(|entry| fs::read(entry.path().join("cmdline")).ok())
        .filter(|cmdline| {
            cmdline
                .split(|byte| *byte == 0)
                .any(|arg| arg == marker.as_bytes())
        })
        .count()
}

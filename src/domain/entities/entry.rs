use super::{commit::Commit, lock::Lock};
use crate::domain::value_objects::node_kind::NodeKind;
use serde::{Deserialize, Serialize};

/// リポジトリ一覧で得られるファイル・ディレクトリのエントリ
///
/// `size`と`extension`は`kind`が`File`の場合のみ値を持つ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// ノードの種類
    pub kind: NodeKind,

    /// ファイル名またはディレクトリ名
    pub name: String,

    /// リポジトリルートからの相対パス
    pub path: String,

    /// 親ディレクトリの相対パス（ルート直下の場合は空文字列）
    pub parent_path: String,

    /// フルパス（URL）
    pub full_path: String,

    /// リポジトリのHEADリビジョン
    pub head_revision: u64,

    /// 最終変更リビジョン
    pub last_changed_revision: Option<u64>,

    /// ファイルサイズ（ファイルのみ）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,

    /// 拡張子（ファイルのみ、ドットを含まない名前は空文字列）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,

    /// MIMEタイプ（呼び出し側で別途設定する）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,

    /// 最終変更コミット
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit: Option<Commit>,

    /// ロック情報
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lock: Option<Lock>,
}

impl Entry {
    /// 新しいEntryインスタンスを作成
    ///
    /// `path`は`parent_path`と`name`から、`full_path`は`parent_url`と`name`から組み立てる。
    pub fn new(
        kind: NodeKind,
        name: impl Into<String>,
        parent_path: impl Into<String>,
        parent_url: &str,
        head_revision: u64,
    ) -> Self {
        let name = name.into();
        let parent_path = parent_path.into();
        let path = Self::join_path(&parent_path, &name);
        let full_path = Self::join_path(parent_url, &name);
        let extension = if kind.is_file() {
            Some(Self::extension_of(&name).to_string())
        } else {
            None
        };

        Self {
            kind,
            name,
            path,
            parent_path,
            full_path,
            head_revision,
            last_changed_revision: None,
            size: None,
            extension,
            mime_type: None,
            commit: None,
            lock: None,
        }
    }

    /// ファイルサイズを設定（ファイル以外では無視される）
    pub fn with_size(mut self, size: u64) -> Self {
        if self.kind.is_file() {
            self.size = Some(size);
        }
        self
    }

    /// コミット情報を設定し、最終変更リビジョンも更新する
    pub fn with_commit(mut self, commit: Commit) -> Self {
        self.last_changed_revision = Some(commit.revision);
        self.commit = Some(commit);
        self
    }

    /// ロック情報を設定
    pub fn with_lock(mut self, lock: Lock) -> Self {
        self.lock = Some(lock);
        self
    }

    /// MIMEタイプを設定
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// ロックされているか
    pub fn is_locked(&self) -> bool {
        self.lock.is_some()
    }

    /// 親パスと名前を連結する（親パスが空の場合は先頭のスラッシュを付けない）
    pub fn join_path(parent: &str, name: &str) -> String {
        let parent = parent.trim();
        if parent.is_empty() {
            name.to_string()
        } else {
            format!("{}/{}", parent.trim_end_matches('/'), name)
        }
    }

    /// 最後の「.」以降を拡張子として返す（「.」がなければ空文字列）
    pub fn extension_of(name: &str) -> &str {
        name.rfind('.').map(|idx| &name[idx + 1..]).unwrap_or("")
    }
}

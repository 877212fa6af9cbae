use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// ノードを最後に変更したコミットの情報
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// コミットのリビジョン番号
    pub revision: u64,

    /// コミットした作者（匿名コミットの場合はNone）
    pub author: Option<String>,

    /// コミット日時（`svn:date`が無いリビジョンではNone）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,

    /// コミットメッセージ（一覧出力には含まれないため別途取得する）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Commit {
    /// 新しいCommitインスタンスを作成
    pub fn new(revision: u64, author: Option<String>, date: Option<DateTime<Utc>>) -> Self {
        Self {
            revision,
            author,
            date,
            message: None,
        }
    }

    /// コミットメッセージを設定
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// ファイルに設定されたロックの情報
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lock {
    /// ロックトークン（例: opaquelocktoken:...）
    pub token: String,

    /// ロックの所有者
    pub owner: String,

    /// ロック時のコメント
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    /// ロックの作成日時
    pub created: DateTime<Utc>,
}

impl Lock {
    /// 新しいLockインスタンスを作成
    pub fn new(token: impl Into<String>, owner: impl Into<String>, created: DateTime<Utc>) -> Self {
        Self {
            token: token.into(),
            owner: owner.into(),
            comment: None,
            created,
        }
    }

    /// コメントを設定
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

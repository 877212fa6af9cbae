use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `svn log`の1エントリ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// コミットのリビジョン番号
    pub revision: u64,

    /// コミットした作者
    pub author: Option<String>,

    /// コミット日時
    pub date: Option<DateTime<Utc>>,

    /// コミットメッセージ
    pub message: String,
}

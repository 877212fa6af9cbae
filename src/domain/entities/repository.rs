use crate::domain::value_objects::{repository_type::RepositoryType, svn_protocol::SvnProtocol};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// SVNの認証ユーザー
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SvnUser {
    /// ユーザー名
    pub username: String,
    /// パスワード
    pub password: String,
}

impl SvnUser {
    /// 新しいSvnUserインスタンスを作成
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// コマンドに付与する認証引数
    ///
    /// 認証情報はキャッシュせず、対話プロンプトも出さない。
    pub fn auth_args(&self) -> Vec<String> {
        vec![
            "--username".to_string(),
            self.username.clone(),
            "--password".to_string(),
            self.password.clone(),
            "--no-auth-cache".to_string(),
            "--non-interactive".to_string(),
        ]
    }
}

impl fmt::Debug for SvnUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SvnUser")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// SVNリポジトリ
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SvnRepository {
    /// リポジトリ名
    pub name: String,

    /// リポジトリを格納するローカルのルートディレクトリ
    pub root_path: PathBuf,

    /// バックエンドの種類
    #[serde(default)]
    pub repository_type: RepositoryType,

    /// アクセスプロトコル
    #[serde(default)]
    pub protocol: SvnProtocol,

    /// 管理者アカウント
    pub admin_user: SvnUser,
}

impl SvnRepository {
    /// 新しいSvnRepositoryインスタンスを作成
    pub fn new(
        name: impl Into<String>,
        root_path: impl Into<PathBuf>,
        admin_user: SvnUser,
    ) -> Self {
        Self {
            name: name.into(),
            root_path: root_path.into(),
            repository_type: RepositoryType::default(),
            protocol: SvnProtocol::default(),
            admin_user,
        }
    }

    /// バックエンドの種類を設定
    pub fn with_repository_type(mut self, repository_type: RepositoryType) -> Self {
        self.repository_type = repository_type;
        self
    }

    /// プロトコルを設定
    pub fn with_protocol(mut self, protocol: SvnProtocol) -> Self {
        self.protocol = protocol;
        self
    }

    /// ローカルのリポジトリディレクトリ
    pub fn local_path(&self) -> PathBuf {
        self.root_path.join(&self.name)
    }

    /// リポジトリのルートURL
    ///
    /// `file://`の場合は`host`を無視してローカルのルートディレクトリを使う。
    pub fn url(&self, host: &str) -> String {
        match self.protocol {
            SvnProtocol::File => self
                .protocol
                .repository_url(&path_to_url_string(&self.root_path), &self.name),
            _ => self.protocol.repository_url(host, &self.name),
        }
    }
}

fn path_to_url_string(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

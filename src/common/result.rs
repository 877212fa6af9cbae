use crate::common::error::SvnError;

/// svnapi全体で使用するResult型のエイリアス
///
/// # Examples
///
/// ```
/// use svnapi::common::result::SvnResult;
/// use svnapi::common::error::SvnError;
///
/// fn example_function() -> SvnResult<u64> {
///     Ok(42)
/// }
///
/// fn example_with_error() -> SvnResult<()> {
///     Err(SvnError::malformed_output("missing <list> element"))
/// }
/// ```
pub type SvnResult<T> = Result<T, SvnError>;

/// Optionのエラー変換ヘルパー
pub trait OptionExt<T> {
    /// OptionをSvnResultに変換する
    fn ok_or_svn(self, error: SvnError) -> SvnResult<T>;

    /// NoneをMalformedOutputエラーに変換する
    ///
    /// XML出力で必須要素が欠けている場合に使う。
    ///
    /// # Examples
    ///
    /// ```
    /// use svnapi::common::result::{SvnResult, OptionExt};
    ///
    /// let none_value: Option<String> = None;
    /// let result: SvnResult<String> = none_value.ok_or_malformed_output("missing <name>");
    /// assert!(result.is_err());
    /// ```
    fn ok_or_malformed_output(self, message: impl Into<String>) -> SvnResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_svn(self, error: SvnError) -> SvnResult<T> {
        self.ok_or(error)
    }

    fn ok_or_malformed_output(self, message: impl Into<String>) -> SvnResult<T> {
        self.ok_or_else(|| SvnError::malformed_output(message))
    }
}

/// Resultのエラー変換ヘルパー
pub trait ResultExt<T, E> {
    /// パース失敗をMalformedOutputエラーとして変換する
    fn with_malformed_output(self, message: impl Into<String>) -> SvnResult<T>
    where
        E: std::error::Error + Send + Sync + 'static;

    /// ファイルシステムエラーとして変換する
    fn with_filesystem_error(
        self,
        message: impl Into<String>,
        path: Option<std::path::PathBuf>,
    ) -> SvnResult<T>
    where
        E: Into<std::io::Error>;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
    fn with_malformed_output(self, message: impl Into<String>) -> SvnResult<T>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.map_err(|e| SvnError::malformed_output_with_source(message, e))
    }

    fn with_filesystem_error(
        self,
        message: impl Into<String>,
        path: Option<std::path::PathBuf>,
    ) -> SvnResult<T>
    where
        E: Into<std::io::Error>,
    {
        self.map_err(|e| SvnError::filesystem_error_with_source(message, path, e.into()))
    }
}

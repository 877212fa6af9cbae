//! Turns captured process output into success or a typed tool error.
//!
//! Stderr content is the only failure signal. `svn` reports warnings that
//! callers must see on stderr while still exiting 0, and some callers run
//! commands whose exit code they deliberately ignore, so the exit code is
//! carried on the error for diagnostics but never consulted.

use crate::common::error::SvnError;
use crate::common::result::SvnResult;
use crate::infrastructure::process::ExecutionResult;
use regex::Regex;
use std::sync::OnceLock;

/// Markers of credential failures. Text before them is banner noise.
pub const AUTH_FAILURE_MARKERS: [&str; 2] = ["E170001", "E215004"];

fn error_code_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"[EW]\d{6}").ok())
        .as_ref()
}

/// First `E123456`/`W123456` style code in `text`
pub fn extract_error_code(text: &str) -> Option<String> {
    error_code_pattern()
        .and_then(|pattern| pattern.find(text))
        .map(|m| m.as_str().to_string())
}

/// Cut `message` so it starts at the first authentication failure marker
pub fn trim_to_auth_marker(message: &str) -> &str {
    AUTH_FAILURE_MARKERS
        .iter()
        .filter_map(|marker| message.find(marker))
        .min()
        .map_or(message, |index| &message[index..])
}

/// Fail with `CommandExecution` when the tool wrote anything to stderr
pub fn check(result: &ExecutionResult, ignore_error: bool) -> SvnResult<()> {
    if ignore_error {
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&result.stderr);
    let stderr = stderr.trim();
    if stderr.is_empty() {
        return Ok(());
    }

    let message = trim_to_auth_marker(stderr);
    Err(SvnError::CommandExecution {
        message: message.to_string(),
        error_code: extract_error_code(message),
        exit_code: result.exit_code,
    })
}

/// Pass `result` through when it is not a tool failure
pub fn classify(result: ExecutionResult, ignore_error: bool) -> SvnResult<ExecutionResult> {
    check(&result, ignore_error)?;
    Ok(result)
}

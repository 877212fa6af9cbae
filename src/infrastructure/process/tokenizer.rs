//! Splits a command string into an argument vector.
//!
//! Only whitespace splitting and single/double quoting are understood. There
//! are no escapes, variables or globbing: quoted text is taken verbatim.

use crate::common::error::SvnError;
use crate::common::result::SvnResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuoteState {
    Unquoted,
    InSingleQuote,
    InDoubleQuote,
}

/// Split `command` into tokens.
///
/// A token is emitted when it is non-empty or when it was quoted, so `''`
/// yields an empty argument while runs of whitespace yield nothing.
/// Input that ends inside an open quote is a `MalformedCommand`.
///
/// ```
/// use svnapi::infrastructure::process::tokenizer::tokenize;
///
/// let tokens = tokenize("svn mkdir -m 'first commit' --parents").unwrap();
/// assert_eq!(tokens, vec!["svn", "mkdir", "-m", "first commit", "--parents"]);
/// ```
pub fn tokenize(command: &str) -> SvnResult<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut state = QuoteState::Unquoted;
    let mut quoted = false;

    for ch in command.chars() {
        match state {
            QuoteState::InSingleQuote => {
                if ch == '\'' {
                    state = QuoteState::Unquoted;
                } else {
                    current.push(ch);
                }
            }
            QuoteState::InDoubleQuote => {
                if ch == '"' {
                    state = QuoteState::Unquoted;
                } else {
                    current.push(ch);
                }
            }
            QuoteState::Unquoted => match ch {
                '\'' => {
                    state = QuoteState::InSingleQuote;
                    quoted = true;
                }
                '"' => {
                    state = QuoteState::InDoubleQuote;
                    quoted = true;
                }
                c if c.is_whitespace() => {
                    if quoted || !current.is_empty() {
                        tokens.push(std::mem::take(&mut current));
                    }
                    quoted = false;
                }
                c => current.push(c),
            },
        }
    }

    if state != QuoteState::Unquoted {
        return Err(SvnError::malformed_command(
            "unbalanced quotes in command",
            command,
        ));
    }

    if quoted || !current.is_empty() {
        tokens.push(current);
    }

    Ok(tokens)
}

/// Quote one argument so that `tokenize` returns it unchanged.
///
/// Arguments without whitespace or quotes are returned as-is. An argument
/// holding both quote characters cannot be expressed and is rejected.
pub fn quote_arg(arg: &str) -> SvnResult<String> {
    let needs_quoting =
        arg.is_empty() || arg.chars().any(|c| c.is_whitespace() || c == '"' || c == '\'');
    if !needs_quoting {
        return Ok(arg.to_string());
    }

    if !arg.contains('"') {
        Ok(format!("\"{}\"", arg))
    } else if !arg.contains('\'') {
        Ok(format!("'{}'", arg))
    } else {
        Err(SvnError::malformed_command(
            "argument contains both single and double quotes",
            arg,
        ))
    }
}

/// Quote each argument and join them with single spaces
pub fn join_args<S: AsRef<str>>(args: &[S]) -> SvnResult<String> {
    let quoted = args
        .iter()
        .map(|arg| quote_arg(arg.as_ref()))
        .collect::<SvnResult<Vec<_>>>()?;
    Ok(quoted.join(" "))
}

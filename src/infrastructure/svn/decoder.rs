//! Output decoders. Each runs the classifier before looking at stdout and
//! never re-runs the process.

use crate::common::error::SvnError;
use crate::common::result::SvnResult;
use crate::infrastructure::process::ExecutionResult;
use crate::infrastructure::svn::classifier;
use xmltree::Element;

/// Stdout decoded with the result's charset
pub fn decode_string(result: &ExecutionResult, ignore_error: bool) -> SvnResult<String> {
    classifier::check(result, ignore_error)?;
    result.stdout_text()
}

/// Stdout parsed as a base-10 integer after trimming
pub fn decode_long(result: &ExecutionResult, ignore_error: bool) -> SvnResult<i64> {
    let text = decode_string(result, ignore_error)?;
    let trimmed = text.trim();
    trimmed
        .parse::<i64>()
        .map_err(|e| SvnError::numeric_parse(trimmed, e))
}

/// Stdout parsed as an XML document
pub fn decode_xml(result: &ExecutionResult, ignore_error: bool) -> SvnResult<Element> {
    let text = decode_string(result, ignore_error)?;
    Element::parse(text.as_bytes())
        .map_err(|e| SvnError::malformed_output_with_source("command output is not valid XML", e))
}

//! Error types surfaced by the toolkit.
//!
//! Only two failures are part of the domain contract: a required input that
//! was never supplied, and a boolean input that is not a YAML 1.2 Core Schema
//! literal. Both carry fixed-format messages that orchestrator UIs match on,
//! so the `#[error]` strings here are load-bearing.

use thiserror::Error;

/// Errors returned by toolkit operations.
#[derive(Debug, Error)]
pub enum ToolkitError {
    /// A required input resolved to the empty string.
    ///
    /// The name is the caller-supplied input name uppercased, with spaces
    /// left intact (not the `INPUT_*` environment key).
    #[error("Input required and not supplied: {0}")]
    InputRequired(String),

    /// A boolean input held something outside the YAML 1.2 literal set.
    ///
    /// The name is quoted exactly as the caller gave it.
    #[error(
        "Input does not meet YAML 1.2 \"Core Schema\" specification: {0}\n\
         Support boolean input list: `true | True | TRUE | false | False | FALSE`"
    )]
    InvalidBooleanInput(String),

    /// An exported name or value contained the generated heredoc delimiter.
    #[error("{part} should not contain the delimiter `{delimiter}`")]
    DelimiterCollision {
        part: &'static str,
        delimiter: String,
    },

    /// Failure writing to the command stream or a file command target.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

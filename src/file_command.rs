//! File-based command channel.
//!
//! Newer orchestrators hand each step the path of an append-only file for
//! environment handoff (`GITHUB_ENV`) and PATH extension (`GITHUB_PATH`)
//! instead of scanning stdout for `set-env` / `add-path`. Values may span
//! multiple lines, so key/value records are framed heredoc-style with a
//! randomly generated delimiter:
//!
//! ```text
//! MY_VAR<<ghadelimiter_4ae0c382-...-f2b0
//! line one
//! line two
//! ghadelimiter_4ae0c382-...-f2b0
//! ```

use std::fs::OpenOptions;
use std::io::Write;

use uuid::Uuid;

use crate::error::ToolkitError;

/// Append one record (plus trailing newline) to a file command target.
pub fn append_line(path: &str, message: &str) -> Result<(), ToolkitError> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{message}")?;
    Ok(())
}

/// Frame a key/value pair as a heredoc record.
///
/// Fails if the key or value happens to contain the generated delimiter;
/// retrying is pointless since a collision means the caller is embedding
/// delimiter-shaped text deliberately.
pub fn prepare_key_value_message(key: &str, value: &str) -> Result<String, ToolkitError> {
    let delimiter = format!("ghadelimiter_{}", Uuid::new_v4());

    if key.contains(&delimiter) {
        return Err(ToolkitError::DelimiterCollision {
            part: "Name",
            delimiter,
        });
    }
    if value.contains(&delimiter) {
        return Err(ToolkitError::DelimiterCollision {
            part: "Value",
            delimiter,
        });
    }

    Ok(format!("{key}<<{delimiter}\n{value}\n{delimiter}"))
}

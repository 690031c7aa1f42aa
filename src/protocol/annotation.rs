//! Annotation messages and their source-location metadata.
//!
//! An annotation (`error` / `warning` / `notice`) can carry a title and a
//! file/line/column anchor. The struct field names follow the start/end
//! convention, but the wire uses historical short names: `start_line` maps
//! to `line` and `start_column` to `col`, while only the end-prefixed forms
//! keep their long names. `startLine` / `startColumn` never appear on the
//! wire.

use serde::{Deserialize, Serialize};

/// The body of an annotation.
///
/// A plain message is emitted as-is; a captured error renders with the
/// `Error: ` prefix the orchestrator UI expects for failure annotations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnotationMessage {
    /// Free-form message text
    Plain(String),

    /// Message taken from an error value
    CapturedError(String),
}

impl AnnotationMessage {
    /// Capture anything displayable as an error-sourced message.
    pub fn captured(err: impl std::fmt::Display) -> Self {
        Self::CapturedError(err.to_string())
    }

    /// Render to the message body that goes on the wire (before escaping).
    pub fn render(&self) -> String {
        match self {
            Self::Plain(msg) => msg.clone(),
            Self::CapturedError(msg) => format!("Error: {msg}"),
        }
    }
}

impl From<&str> for AnnotationMessage {
    fn from(msg: &str) -> Self {
        Self::Plain(msg.to_string())
    }
}

impl From<String> for AnnotationMessage {
    fn from(msg: String) -> Self {
        Self::Plain(msg)
    }
}

/// Optional source-location metadata attached to an annotation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationProperties {
    /// Annotation title shown above the message
    pub title: Option<String>,

    /// Path of the file the annotation points at
    pub file: Option<String>,

    /// First line of the annotated range (1-based)
    pub start_line: Option<u32>,

    /// Last line of the annotated range
    pub end_line: Option<u32>,

    /// First column of the annotated range (1-based)
    pub start_column: Option<u32>,

    /// Last column of the annotated range
    pub end_column: Option<u32>,
}

impl AnnotationProperties {
    /// Translate to ordered wire properties.
    ///
    /// Unset fields are skipped entirely; the emission order (title, file,
    /// line, endLine, col, endColumn) is fixed.
    pub fn to_command_properties(&self) -> Vec<(String, String)> {
        let fields = [
            ("title", self.title.clone()),
            ("file", self.file.clone()),
            ("line", self.start_line.map(|n| n.to_string())),
            ("endLine", self.end_line.map(|n| n.to_string())),
            ("col", self.start_column.map(|n| n.to_string())),
            ("endColumn", self.end_column.map(|n| n.to_string())),
        ];

        fields
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| (key.to_string(), v)))
            .collect()
    }
}

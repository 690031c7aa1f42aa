//! The `::command::` wire line and its escaping rules.
//!
//! The orchestrator scans the step's stdout line by line; any line of the
//! form `::<command>[ key=value,...]::<message>` is interpreted as a command
//! and removed from the rendered log. Because the framing characters (`%`,
//! CR, LF, and inside properties `,` and `:`) can appear in user data, they
//! are percent-escaped before emission.

use std::fmt;

/// A single orchestrator command line.
///
/// Serializes to exactly one line via `Display`:
/// `::<command> <k=v,k=v>::<escaped message>`. The property segment and its
/// leading space are omitted when there are no properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Command name as the orchestrator knows it (e.g. `set-output`)
    name: &'static str,

    /// Ordered property list; order is part of the wire format
    properties: Vec<(String, String)>,

    /// Unescaped message body
    message: String,
}

impl Command {
    /// Create a command with a message body and no properties.
    pub fn new(name: &'static str, message: impl Into<String>) -> Self {
        Self {
            name,
            properties: Vec::new(),
            message: message.into(),
        }
    }

    /// Append a property, preserving insertion order.
    pub fn property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.push((key.into(), value.into()));
        self
    }

    /// Append all properties from an ordered list.
    pub fn properties(mut self, props: Vec<(String, String)>) -> Self {
        self.properties.extend(props);
        self
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "::{}", self.name)?;

        for (i, (key, value)) in self.properties.iter().enumerate() {
            let sep = if i == 0 { ' ' } else { ',' };
            write!(f, "{sep}{key}={}", escape_property(value))?;
        }

        write!(f, "::{}", escape_data(&self.message))
    }
}

/// Escape a message body: `%` → `%25`, CR → `%0D`, LF → `%0A`.
///
/// `%` must go first so already-escaped sequences are not double-mangled.
pub fn escape_data(data: &str) -> String {
    data.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Escape a property value: the message rules plus `:` → `%3A`, `,` → `%2C`
/// (the property segment's own delimiters).
pub fn escape_property(value: &str) -> String {
    escape_data(value).replace(':', "%3A").replace(',', "%2C")
}

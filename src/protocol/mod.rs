//! Wire-level types for the orchestrator command protocol.
//!
//! This module contains the data structures behind the line format:
//! - Command: one `::name key=value::message` line and its escaping rules
//! - CommandValue: the closed set of value types a step may emit
//! - Annotations: source-location metadata for error/warning/notice lines

pub mod annotation;
pub mod command;
pub mod value;

// Re-export commonly used types
pub use annotation::{AnnotationMessage, AnnotationProperties};
pub use command::Command;
pub use value::CommandValue;

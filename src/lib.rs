//! runner-toolkit - Workflow command toolkit for CI pipeline steps
//!
//! A pipeline step talks to its orchestrator through two narrow channels:
//! environment variables it reads at startup, and specially formatted lines
//! it writes to stdout. This crate wraps both channels behind a typed API.
//!
//! # Architecture
//!
//! Everything is synchronous string processing:
//! - Inputs and state are read from `INPUT_*` / `STATE_*` environment keys
//! - Outputs, state, annotations, and grouping are emitted as `::command::`
//!   lines on stdout for the orchestrator's log scanner
//! - Environment handoff to later steps goes through the `GITHUB_ENV` and
//!   `GITHUB_PATH` append-only files when the orchestrator provides them
//!
//! # Modules
//!
//! - `protocol`: Wire-level types (Command, CommandValue, annotations)
//! - `toolkit`: The public operation surface
//! - `env`: Environment lookup abstraction (injectable for tests)
//! - `cli`: Command-line interface for shell-based steps
//!
//! # Usage
//!
//! ```no_run
//! use runner_toolkit::Toolkit;
//!
//! let mut toolkit = Toolkit::new();
//! let target = toolkit.get_input("target")?;
//! toolkit.set_output("artifact", format!("build/{target}.tar.gz"))?;
//! # Ok::<(), runner_toolkit::ToolkitError>(())
//! ```

pub mod cli;
pub mod env;
pub mod error;
pub mod file_command;
pub mod protocol;
pub mod toolkit;

// Re-export main types at crate root for convenience
pub use env::{EnvProvider, ProcessEnv};
pub use error::ToolkitError;
pub use protocol::{AnnotationMessage, AnnotationProperties, Command, CommandValue};
pub use toolkit::{InputOptions, Toolkit};

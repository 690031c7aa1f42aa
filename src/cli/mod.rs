//! Command-line interface for shell-based pipeline steps.
//!
//! Every toolkit operation is exposed as a subcommand so that steps written
//! in shell can use the same surface as Rust code:
//!
//! ```bash
//! target=$(runner-toolkit get-input target --required)
//! runner-toolkit start-group "Building $target"
//! runner-toolkit set-output artifact "build/$target.tar.gz"
//! runner-toolkit end-group
//! ```
//!
//! Read accessors print the resolved value to stdout; everything else emits
//! protocol lines. Diagnostics go to stderr via `tracing`.

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::protocol::{AnnotationProperties, CommandValue};
use crate::toolkit::{InputOptions, Toolkit};

/// runner-toolkit - Workflow command toolkit for CI pipeline steps
#[derive(Parser, Debug)]
#[command(name = "runner-toolkit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read a declared input and print it
    GetInput {
        /// Input name (case- and space-insensitive)
        name: String,

        /// Fail when the input is missing or empty
        #[arg(long)]
        required: bool,

        /// Keep surrounding whitespace
        #[arg(long)]
        no_trim: bool,
    },

    /// Read a newline-separated input and print one value per line
    GetMultilineInput {
        name: String,

        #[arg(long)]
        required: bool,

        #[arg(long)]
        no_trim: bool,
    },

    /// Read a boolean input and print `true` or `false`
    GetBooleanInput {
        name: String,

        #[arg(long)]
        required: bool,
    },

    /// Print state saved by a prior step
    GetState {
        name: String,
    },

    /// Print whether the job is running in debug mode
    IsDebug,

    /// Declare a step output
    SetOutput {
        name: String,

        /// Value; JSON booleans and numbers are typed, anything else is text
        value: String,
    },

    /// Persist state for later steps of this job
    SaveState {
        name: String,
        value: String,
    },

    /// Emit an error annotation
    Error {
        message: String,

        #[command(flatten)]
        location: AnnotationArgs,
    },

    /// Emit a warning annotation
    Warning {
        message: String,

        #[command(flatten)]
        location: AnnotationArgs,
    },

    /// Emit a notice annotation
    Notice {
        message: String,

        #[command(flatten)]
        location: AnnotationArgs,
    },

    /// Emit a debug log line
    Debug {
        message: String,
    },

    /// Open a collapsible log group
    StartGroup {
        name: String,
    },

    /// Close the current log group
    EndGroup,

    /// Toggle echoing of commands into the log
    Echo {
        #[arg(value_enum)]
        mode: EchoMode,
    },

    /// Redact a value from subsequent log output
    SetSecret {
        value: String,
    },

    /// Make an environment variable visible to later steps
    ExportVariable {
        name: String,
        value: String,
    },

    /// Prepend a directory to the PATH of later steps
    AddPath {
        path: String,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum EchoMode {
    On,
    Off,
}

/// Source-location flags shared by the annotation subcommands.
#[derive(Args, Debug, Default)]
pub struct AnnotationArgs {
    /// Annotation title
    #[arg(long)]
    pub title: Option<String>,

    /// File the annotation points at
    #[arg(long)]
    pub file: Option<String>,

    /// First line of the annotated range
    #[arg(long)]
    pub start_line: Option<u32>,

    /// Last line of the annotated range
    #[arg(long)]
    pub end_line: Option<u32>,

    /// First column of the annotated range
    #[arg(long)]
    pub start_column: Option<u32>,

    /// Last column of the annotated range
    #[arg(long)]
    pub end_column: Option<u32>,
}

impl From<AnnotationArgs> for AnnotationProperties {
    fn from(args: AnnotationArgs) -> Self {
        Self {
            title: args.title,
            file: args.file,
            start_line: args.start_line,
            end_line: args.end_line,
            start_column: args.start_column,
            end_column: args.end_column,
        }
    }
}

impl Cli {
    /// Run the selected subcommand against the process environment and
    /// stdout.
    pub fn execute(self) -> Result<()> {
        let mut toolkit = Toolkit::new();

        match self.command {
            Commands::GetInput {
                name,
                required,
                no_trim,
            } => {
                tracing::debug!(%name, "reading input");
                let opts = InputOptions {
                    required,
                    trim_whitespace: !no_trim,
                };
                println!("{}", toolkit.get_input_with(&name, opts)?);
            }

            Commands::GetMultilineInput {
                name,
                required,
                no_trim,
            } => {
                let opts = InputOptions {
                    required,
                    trim_whitespace: !no_trim,
                };
                for line in toolkit.get_multiline_input_with(&name, opts)? {
                    println!("{line}");
                }
            }

            Commands::GetBooleanInput { name, required } => {
                let opts = InputOptions {
                    required,
                    ..Default::default()
                };
                println!("{}", toolkit.get_boolean_input_with(&name, opts)?);
            }

            Commands::GetState { name } => {
                println!("{}", toolkit.get_state(&name));
            }

            Commands::IsDebug => {
                println!("{}", toolkit.is_debug());
            }

            Commands::SetOutput { name, value } => {
                toolkit.set_output(&name, parse_value(value))?;
            }

            Commands::SaveState { name, value } => {
                toolkit.save_state(&name, parse_value(value))?;
            }

            Commands::Error { message, location } => {
                toolkit.error_with(message, &location.into())?;
            }

            Commands::Warning { message, location } => {
                toolkit.warning_with(message, &location.into())?;
            }

            Commands::Notice { message, location } => {
                toolkit.notice_with(message, &location.into())?;
            }

            Commands::Debug { message } => {
                toolkit.debug(&message)?;
            }

            Commands::StartGroup { name } => {
                toolkit.start_group(&name)?;
            }

            Commands::EndGroup => {
                toolkit.end_group()?;
            }

            Commands::Echo { mode } => {
                toolkit.set_command_echo(matches!(mode, EchoMode::On))?;
            }

            Commands::SetSecret { value } => {
                toolkit.set_secret(&value)?;
            }

            Commands::ExportVariable { name, value } => {
                tracing::debug!(%name, "exporting variable");
                toolkit.export_variable(&name, parse_value(value))?;
            }

            Commands::AddPath { path } => {
                toolkit.add_path(&path)?;
            }
        }

        Ok(())
    }
}

/// Type a raw CLI argument.
///
/// Bare JSON scalars (`true`, `1.01`) become typed values so booleans and
/// numbers serialize canonically; anything else, including quoted JSON
/// strings, is passed through as text.
fn parse_value(raw: String) -> CommandValue {
    match serde_json::from_str::<CommandValue>(&raw) {
        Ok(value @ (CommandValue::Bool(_) | CommandValue::Number(_))) => value,
        _ => CommandValue::String(raw),
    }
}

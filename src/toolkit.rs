//! The toolkit surface: every operation a step uses to talk to its
//! orchestrator.
//!
//! A [`Toolkit`] owns two injected collaborators: an [`EnvProvider`] for the
//! read side (inputs, state, debug flag, file command targets) and a
//! [`std::io::Write`] for the emit side (command lines). Production code uses
//! [`Toolkit::new`] (process env + stdout); tests inject a `HashMap` and a
//! `Vec<u8>`.
//!
//! Nothing is cached between calls. Other code in the same process may
//! mutate the environment, and the orchestrator consumes stdout as it
//! arrives.

use std::io::{self, Write};

use crate::env::{EnvProvider, ProcessEnv};
use crate::error::ToolkitError;
use crate::file_command;
use crate::protocol::{AnnotationMessage, AnnotationProperties, Command, CommandValue};

/// Lookup options for input accessors.
#[derive(Debug, Clone, Copy)]
pub struct InputOptions {
    /// Fail with [`ToolkitError::InputRequired`] when the input resolves to
    /// the empty string
    pub required: bool,

    /// Trim surrounding whitespace from the resolved value (on by default)
    pub trim_whitespace: bool,
}

impl Default for InputOptions {
    fn default() -> Self {
        Self {
            required: false,
            trim_whitespace: true,
        }
    }
}

impl InputOptions {
    /// Options for a mandatory input.
    pub fn required() -> Self {
        Self {
            required: true,
            ..Self::default()
        }
    }
}

/// Stateless facade over the environment and the command stream.
#[derive(Debug)]
pub struct Toolkit<E = ProcessEnv, W = io::Stdout> {
    env: E,
    out: W,
}

impl Toolkit {
    /// Toolkit over the live process environment and stdout.
    pub fn new() -> Self {
        Self {
            env: ProcessEnv,
            out: io::stdout(),
        }
    }
}

impl Default for Toolkit {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EnvProvider, W: Write> Toolkit<E, W> {
    /// Toolkit over an injected environment and output sink.
    pub fn with_parts(env: E, out: W) -> Self {
        Self { env, out }
    }

    /// Tear down into the injected parts (tests read the captured output
    /// back out this way).
    pub fn into_parts(self) -> (E, W) {
        (self.env, self.out)
    }

    // ------------------------------------------------------------------
    // Inputs
    // ------------------------------------------------------------------

    /// Read a declared input with default options (optional, trimmed).
    ///
    /// Lookup is case- and space-insensitive: the name is uppercased and
    /// spaces become underscores before the `INPUT_` prefix is applied, so
    /// `"My InPuT"` and `"my input"` resolve to the same variable.
    pub fn get_input(&self, name: &str) -> Result<String, ToolkitError> {
        self.get_input_with(name, InputOptions::default())
    }

    /// Read a declared input.
    ///
    /// An unset variable resolves to the empty string. The required check
    /// runs before trimming, so a whitespace-only value still satisfies a
    /// required input.
    pub fn get_input_with(&self, name: &str, opts: InputOptions) -> Result<String, ToolkitError> {
        let raw = self.env.get_or_empty(&input_env_key(name));

        if opts.required && raw.is_empty() {
            // Error text carries the upper-spaced name, not the env key
            return Err(ToolkitError::InputRequired(name.to_uppercase()));
        }

        if opts.trim_whitespace {
            Ok(raw.trim().to_string())
        } else {
            Ok(raw)
        }
    }

    /// Read a newline-separated input as an ordered list.
    pub fn get_multiline_input(&self, name: &str) -> Result<Vec<String>, ToolkitError> {
        self.get_multiline_input_with(name, InputOptions::default())
    }

    /// Read a newline-separated input as an ordered list.
    ///
    /// Empty lines are dropped before trimming, so a whitespace-only line
    /// survives the filter and trims down to an empty entry.
    pub fn get_multiline_input_with(
        &self,
        name: &str,
        opts: InputOptions,
    ) -> Result<Vec<String>, ToolkitError> {
        let raw = self.get_input_with(
            name,
            InputOptions {
                trim_whitespace: false,
                ..opts
            },
        )?;

        let lines = raw.split('\n').filter(|line| !line.is_empty());
        let values = if opts.trim_whitespace {
            lines.map(|line| line.trim().to_string()).collect()
        } else {
            lines.map(str::to_string).collect()
        };

        Ok(values)
    }

    /// Read a boolean input with default options.
    pub fn get_boolean_input(&self, name: &str) -> Result<bool, ToolkitError> {
        self.get_boolean_input_with(name, InputOptions::default())
    }

    /// Read a boolean input.
    ///
    /// Accepts exactly the YAML 1.2 Core Schema literals
    /// `true | True | TRUE | false | False | FALSE`; everything else fails
    /// with [`ToolkitError::InvalidBooleanInput`].
    pub fn get_boolean_input_with(
        &self,
        name: &str,
        opts: InputOptions,
    ) -> Result<bool, ToolkitError> {
        match self.get_input_with(name, opts)?.as_str() {
            "true" | "True" | "TRUE" => Ok(true),
            "false" | "False" | "FALSE" => Ok(false),
            _ => Err(ToolkitError::InvalidBooleanInput(name.to_string())),
        }
    }

    // ------------------------------------------------------------------
    // Outputs & state
    // ------------------------------------------------------------------

    /// Declare a step output for downstream steps.
    ///
    /// The emitted line is preceded by one extra line separator. That quirk
    /// predates this implementation and is part of the wire contract; see
    /// the pinning test in `tests/commands.rs`.
    pub fn set_output(
        &mut self,
        name: &str,
        value: impl Into<CommandValue>,
    ) -> Result<(), ToolkitError> {
        writeln!(self.out)?;
        self.issue(Command::new("set-output", value.into().to_string()).property("name", name))
    }

    /// Persist a key/value pair for later steps of the same job.
    pub fn save_state(
        &mut self,
        name: &str,
        value: impl Into<CommandValue>,
    ) -> Result<(), ToolkitError> {
        self.issue(Command::new("save-state", value.into().to_string()).property("name", name))
    }

    /// Read state saved by a prior step, empty string if unset.
    pub fn get_state(&self, name: &str) -> String {
        self.env.get_or_empty(&format!("STATE_{}", name.to_uppercase()))
    }

    /// Whether the orchestrator is running the job in debug mode.
    pub fn is_debug(&self) -> bool {
        self.env.get("RUNNER_DEBUG").as_deref() == Some("1")
    }

    // ------------------------------------------------------------------
    // Annotations
    // ------------------------------------------------------------------

    /// Emit an error annotation without location metadata.
    pub fn error(&mut self, message: impl Into<AnnotationMessage>) -> Result<(), ToolkitError> {
        self.error_with(message, &AnnotationProperties::default())
    }

    /// Emit an error annotation anchored to a source location.
    pub fn error_with(
        &mut self,
        message: impl Into<AnnotationMessage>,
        props: &AnnotationProperties,
    ) -> Result<(), ToolkitError> {
        self.annotate("error", message.into(), props)
    }

    /// Emit a warning annotation without location metadata.
    pub fn warning(&mut self, message: impl Into<AnnotationMessage>) -> Result<(), ToolkitError> {
        self.warning_with(message, &AnnotationProperties::default())
    }

    /// Emit a warning annotation anchored to a source location.
    pub fn warning_with(
        &mut self,
        message: impl Into<AnnotationMessage>,
        props: &AnnotationProperties,
    ) -> Result<(), ToolkitError> {
        self.annotate("warning", message.into(), props)
    }

    /// Emit a notice annotation without location metadata.
    pub fn notice(&mut self, message: impl Into<AnnotationMessage>) -> Result<(), ToolkitError> {
        self.notice_with(message, &AnnotationProperties::default())
    }

    /// Emit a notice annotation anchored to a source location.
    pub fn notice_with(
        &mut self,
        message: impl Into<AnnotationMessage>,
        props: &AnnotationProperties,
    ) -> Result<(), ToolkitError> {
        self.annotate("notice", message.into(), props)
    }

    /// Emit a debug line (only rendered when the job runs in debug mode).
    pub fn debug(&mut self, message: &str) -> Result<(), ToolkitError> {
        self.issue(Command::new("debug", message))
    }

    fn annotate(
        &mut self,
        kind: &'static str,
        message: AnnotationMessage,
        props: &AnnotationProperties,
    ) -> Result<(), ToolkitError> {
        self.issue(Command::new(kind, message.render()).properties(props.to_command_properties()))
    }

    // ------------------------------------------------------------------
    // Grouping & echo
    // ------------------------------------------------------------------

    /// Open a collapsible log group.
    pub fn start_group(&mut self, name: &str) -> Result<(), ToolkitError> {
        self.issue(Command::new("group", name))
    }

    /// Close the current log group.
    pub fn end_group(&mut self) -> Result<(), ToolkitError> {
        self.issue(Command::new("endgroup", ""))
    }

    /// Run `f` inside a log group. The group is closed even when `f` fails.
    pub fn group<T>(
        &mut self,
        name: &str,
        f: impl FnOnce(&mut Self) -> Result<T, ToolkitError>,
    ) -> Result<T, ToolkitError> {
        self.start_group(name)?;
        let result = f(self);
        self.end_group()?;
        result
    }

    /// Toggle echoing of commands into the rendered log.
    pub fn set_command_echo(&mut self, enabled: bool) -> Result<(), ToolkitError> {
        self.issue(Command::new("echo", if enabled { "on" } else { "off" }))
    }

    // ------------------------------------------------------------------
    // Environment handoff
    // ------------------------------------------------------------------

    /// Register a value to be redacted from subsequent log output.
    pub fn set_secret(&mut self, value: &str) -> Result<(), ToolkitError> {
        self.issue(Command::new("add-mask", value))
    }

    /// Make an environment variable visible to later steps.
    ///
    /// Uses the `GITHUB_ENV` file channel when the orchestrator provides
    /// one, falling back to the legacy `set-env` command otherwise.
    pub fn export_variable(
        &mut self,
        name: &str,
        value: impl Into<CommandValue>,
    ) -> Result<(), ToolkitError> {
        let value = value.into().to_string();

        if let Some(target) = self.file_command_target("GITHUB_ENV") {
            let message = file_command::prepare_key_value_message(name, &value)?;
            file_command::append_line(&target, &message)
        } else {
            self.issue(Command::new("set-env", value).property("name", name))
        }
    }

    /// Prepend a directory to the PATH of later steps.
    ///
    /// Same channel selection as [`Toolkit::export_variable`], over
    /// `GITHUB_PATH` and the legacy `add-path` command.
    pub fn add_path(&mut self, path: &str) -> Result<(), ToolkitError> {
        if let Some(target) = self.file_command_target("GITHUB_PATH") {
            file_command::append_line(&target, path)
        } else {
            self.issue(Command::new("add-path", path))
        }
    }

    /// Resolve a file command target exactly once, so the channel decision
    /// and the write cannot see different values.
    fn file_command_target(&self, key: &str) -> Option<String> {
        // Empty string means the orchestrator predates file commands
        self.env.get(key).filter(|path| !path.is_empty())
    }

    fn issue(&mut self, command: Command) -> Result<(), ToolkitError> {
        writeln!(self.out, "{command}")?;
        Ok(())
    }
}

/// Environment key for a declared input: uppercase, spaces to underscores,
/// `INPUT_` prefix.
fn input_env_key(name: &str) -> String {
    format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn emitted(toolkit: Toolkit<HashMap<String, String>, Vec<u8>>) -> String {
        let (_, out) = toolkit.into_parts();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_input_env_key_normalization() {
        assert_eq!(input_env_key("my input"), "INPUT_MY_INPUT");
        assert_eq!(input_env_key("My InPuT"), "INPUT_MY_INPUT");
        assert_eq!(input_env_key("MISSING"), "INPUT_MISSING");
    }

    #[test]
    fn test_get_input_is_name_insensitive() {
        let toolkit = Toolkit::with_parts(env(&[("INPUT_MY_INPUT", "val")]), Vec::new());
        assert_eq!(toolkit.get_input("my input").unwrap(), "val");
        assert_eq!(toolkit.get_input("My InPuT").unwrap(), "val");
    }

    #[test]
    fn test_get_input_required_missing() {
        let toolkit = Toolkit::with_parts(env(&[]), Vec::new());
        let err = toolkit
            .get_input_with("missing", InputOptions::required())
            .unwrap_err();
        assert_eq!(err.to_string(), "Input required and not supplied: MISSING");
    }

    #[test]
    fn test_get_input_trimming_modes() {
        let toolkit = Toolkit::with_parts(
            env(&[("INPUT_WITH_TRAILING_WHITESPACE", "  some val  ")]),
            Vec::new(),
        );

        assert_eq!(
            toolkit.get_input("with trailing whitespace").unwrap(),
            "some val"
        );
        assert_eq!(
            toolkit
                .get_input_with(
                    "with trailing whitespace",
                    InputOptions {
                        trim_whitespace: false,
                        ..Default::default()
                    },
                )
                .unwrap(),
            "  some val  "
        );
    }

    #[test]
    fn test_get_boolean_input_literal_set() {
        let toolkit = Toolkit::with_parts(
            env(&[
                ("INPUT_T1", "true"),
                ("INPUT_T2", "True"),
                ("INPUT_T3", "TRUE"),
                ("INPUT_F1", "false"),
                ("INPUT_F2", "False"),
                ("INPUT_F3", "FALSE"),
                ("INPUT_WRONG", "wrong"),
            ]),
            Vec::new(),
        );

        for name in ["t1", "t2", "t3"] {
            assert!(toolkit.get_boolean_input(name).unwrap());
        }
        for name in ["f1", "f2", "f3"] {
            assert!(!toolkit.get_boolean_input(name).unwrap());
        }

        let err = toolkit.get_boolean_input("wrong").unwrap_err();
        assert!(matches!(err, ToolkitError::InvalidBooleanInput(ref n) if n == "wrong"));
    }

    #[test]
    fn test_get_multiline_input_drops_empty_lines() {
        let toolkit = Toolkit::with_parts(
            env(&[("INPUT_LIST", "val1\nval2\n\nval3\n")]),
            Vec::new(),
        );
        assert_eq!(
            toolkit.get_multiline_input("list").unwrap(),
            vec!["val1", "val2", "val3"]
        );
    }

    #[test]
    fn test_set_output_leading_separator() {
        let mut toolkit = Toolkit::with_parts(env(&[]), Vec::new());
        toolkit.set_output("o", "v").unwrap();
        assert_eq!(emitted(toolkit), "\n::set-output name=o::v\n");
    }

    #[test]
    fn test_save_state_has_no_leading_separator() {
        let mut toolkit = Toolkit::with_parts(env(&[]), Vec::new());
        toolkit.save_state("s", 1).unwrap();
        assert_eq!(emitted(toolkit), "::save-state name=s::1\n");
    }

    #[test]
    fn test_get_state() {
        let toolkit = Toolkit::with_parts(env(&[("STATE_TEST_1", "state_val")]), Vec::new());
        assert_eq!(toolkit.get_state("TEST_1"), "state_val");
        assert_eq!(toolkit.get_state("test_1"), "state_val");
        assert_eq!(toolkit.get_state("other"), "");
    }

    #[test]
    fn test_is_debug() {
        let on = Toolkit::with_parts(env(&[("RUNNER_DEBUG", "1")]), Vec::new());
        assert!(on.is_debug());

        let off = Toolkit::with_parts(env(&[("RUNNER_DEBUG", "0")]), Vec::new());
        assert!(!off.is_debug());

        let unset = Toolkit::with_parts(env(&[]), Vec::new());
        assert!(!unset.is_debug());
    }

    #[test]
    fn test_error_escapes_message() {
        let mut toolkit = Toolkit::with_parts(env(&[]), Vec::new());
        toolkit.error("Error message\r\n\n").unwrap();
        assert_eq!(emitted(toolkit), "::error::Error message%0D%0A%0A\n");
    }

    #[test]
    fn test_group_closure_always_closes() {
        let mut toolkit = Toolkit::with_parts(env(&[]), Vec::new());
        let result: Result<(), ToolkitError> = toolkit.group("build", |tk| {
            tk.debug("inside")?;
            Err(ToolkitError::InputRequired("X".to_string()))
        });

        assert!(result.is_err());
        assert_eq!(
            emitted(toolkit),
            "::group::build\n::debug::inside\n::endgroup::\n"
        );
    }

    #[test]
    fn test_export_variable_falls_back_to_command() {
        // Empty GITHUB_ENV means no file channel, mirroring older runners
        let mut toolkit = Toolkit::with_parts(env(&[("GITHUB_ENV", "")]), Vec::new());
        toolkit.export_variable("MY_VAR", "my value").unwrap();
        assert_eq!(emitted(toolkit), "::set-env name=MY_VAR::my value\n");
    }

    #[test]
    fn test_add_path_falls_back_to_command() {
        let mut toolkit = Toolkit::with_parts(env(&[]), Vec::new());
        toolkit.add_path("/opt/tools/bin").unwrap();
        assert_eq!(emitted(toolkit), "::add-path::/opt/tools/bin\n");
    }

    #[test]
    fn test_export_variable_resolves_target_once() {
        // A provider that forgets GITHUB_ENV after the first read; the write
        // must land in the file from that single lookup, not fall back
        struct OneShot {
            path: String,
            reads: std::cell::Cell<u32>,
        }
        impl crate::env::EnvProvider for OneShot {
            fn get(&self, key: &str) -> Option<String> {
                if key != "GITHUB_ENV" {
                    return None;
                }
                self.reads.set(self.reads.get() + 1);
                (self.reads.get() == 1).then(|| self.path.clone())
            }
        }

        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("github_env");
        let provider = OneShot {
            path: path.to_str().unwrap().to_string(),
            reads: std::cell::Cell::new(0),
        };

        let mut toolkit = Toolkit::with_parts(provider, Vec::new());
        toolkit.export_variable("MY_VAR", "my value").unwrap();

        let (provider, out) = toolkit.into_parts();
        assert_eq!(provider.reads.get(), 1);
        assert!(std::fs::read_to_string(&path).unwrap().starts_with("MY_VAR<<"));
        assert!(out.is_empty());
    }

    #[test]
    fn test_set_secret() {
        let mut toolkit = Toolkit::with_parts(env(&[]), Vec::new());
        toolkit.set_secret("hunter2").unwrap();
        assert_eq!(emitted(toolkit), "::add-mask::hunter2\n");
    }
}

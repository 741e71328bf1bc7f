//! The tmux boundary: reading user options and installing directives
//!
//! Every call shells out synchronously. Failures are logged and replaced by
//! a caller-supplied fallback; nothing here returns an error to the caller.

use std::process::Command;

use tracing::{debug, info};

use crate::{
    compose::Directive,
    error::{StatuslineError, StatuslineResult},
};

pub const TMUX: &str = "tmux";
/// Prefix tmux requires on user options.
pub const USER_OPTION_PREFIX: char = '@';
/// Argument tmux treats as a command separator.
pub const COMMAND_SEPARATOR: &str = ";";

/// Runs an external program and returns its standard output.
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[String]) -> StatuslineResult<String>;
}

/// Runs commands as child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String]) -> StatuslineResult<String> {
        let command = render_command(program, args);
        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|e| StatuslineError::external_command(&command, e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(StatuslineError::external_command(
                &command,
                format!("{}: {}", output.status, stderr.trim()),
            )
            .into());
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// A handle on the tmux server.
#[derive(Debug, Clone, Default)]
pub struct Tmux<R: CommandRunner = SystemRunner> {
    runner: R,
}

impl Tmux<SystemRunner> {
    pub fn system() -> Self {
        Self::new(SystemRunner)
    }
}

impl<R: CommandRunner> Tmux<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Read a global user option, or `default` if it is unset or tmux fails.
    pub fn option(&self, name: &str, default: &str) -> String {
        let name = user_option(name);
        let args = vec!["show-option".to_string(), "-gqv".to_string(), name.clone()];

        match self.runner.run(TMUX, &args) {
            Ok(out) => {
                let value = out.trim();
                if value.is_empty() {
                    debug!(option = %name, default, "option unset, using default");
                    default.to_string()
                } else {
                    value.to_string()
                }
            }
            Err(err) => {
                debug!(
                    option = %name,
                    default,
                    error = %err,
                    "reading option failed, using default"
                );
                default.to_string()
            }
        }
    }

    /// Install the directives in one tmux invocation. Returns whether tmux
    /// accepted them.
    pub fn apply(&self, directives: &[Directive]) -> bool {
        let args = command_args(directives);
        info!(count = directives.len(), "setting status line options");

        match self.runner.run(TMUX, &args) {
            Ok(_) => true,
            Err(err) => {
                debug!(
                    command = %command_line(directives),
                    error = %err,
                    "setting options failed"
                );
                false
            }
        }
    }
}

/// `name` with the user option prefix.
pub fn user_option(name: &str) -> String {
    if name.starts_with(USER_OPTION_PREFIX) {
        name.to_string()
    } else {
        format!("{}{}", USER_OPTION_PREFIX, name)
    }
}

/// Arguments for one tmux call running every directive. Values are passed
/// whole, so spaces inside them need no quoting.
pub fn command_args(directives: &[Directive]) -> Vec<String> {
    let mut args = Vec::with_capacity(directives.len() * 4);
    for (i, directive) in directives.iter().enumerate() {
        if i > 0 {
            args.push(COMMAND_SEPARATOR.to_string());
        }
        args.push("set-option".to_string());
        args.push(directive.option.to_string());
        args.push(directive.value.clone());
    }
    args
}

/// The directives as a single readable command line.
pub fn command_line(directives: &[Directive]) -> String {
    let commands: Vec<String> = directives.iter().map(ToString::to_string).collect();
    format!("{} {}", TMUX, commands.join(COMMAND_SEPARATOR))
}

fn render_command(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

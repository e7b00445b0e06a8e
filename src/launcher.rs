//! Launching the follow-up command once pinging stops

use std::fmt;
use std::io;
use std::process::{Command, Stdio};
use thiserror::Error;

/// A program plus its argument string, as given to `-c`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    /// Everything after the first space, passed on verbatim
    pub args: String,
}

impl CommandSpec {
    /// Split a `-c` value on its first space
    pub fn parse(value: &str) -> Self {
        match value.split_once(' ') {
            Some((program, args)) => Self {
                program: program.to_string(),
                args: args.to_string(),
            },
            None => Self {
                program: value.to_string(),
                args: String::new(),
            },
        }
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.args.is_empty() {
            write!(f, "{}", self.program)
        } else {
            write!(f, "{} {}", self.program, self.args)
        }
    }
}

#[derive(Debug, Error)]
#[error("Failed to start \"{program}\": {source}")]
pub struct LaunchError {
    pub program: String,
    #[source]
    pub source: io::Error,
}

/// Something that can start a command
pub trait Launcher {
    fn launch(&mut self, command: &CommandSpec) -> Result<(), LaunchError>;
}

impl<T: Launcher + ?Sized> Launcher for &mut T {
    fn launch(&mut self, command: &CommandSpec) -> Result<(), LaunchError> {
        (**self).launch(command)
    }
}

/// Starts the command as a detached child process without waiting for it
#[derive(Debug, Default)]
pub struct ProcessLauncher;

impl ProcessLauncher {
    fn build(command: &CommandSpec) -> Command {
        let mut cmd = Command::new(&command.program);

        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            if !command.args.is_empty() {
                cmd.raw_arg(&command.args);
            }
        }

        #[cfg(not(windows))]
        cmd.args(command.args.split_whitespace());

        cmd.stdin(Stdio::null());
        cmd
    }
}

impl Launcher for ProcessLauncher {
    fn launch(&mut self, command: &CommandSpec) -> Result<(), LaunchError> {
        let child = Self::build(command).spawn().map_err(|source| LaunchError {
            program: command.program.clone(),
            source,
        })?;
        log::debug!("started \"{}\" as pid {}", command, child.id());
        Ok(())
    }
}

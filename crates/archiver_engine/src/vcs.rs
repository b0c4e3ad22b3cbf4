use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use archiver_logging::archiver_debug;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VcsError {
    #[error("failed to launch `{command}`: {source}")]
    Launch {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("`{command}` exited with {status}: {stderr}")]
    Failed {
        command: String,
        status: String,
        stderr: String,
    },
}

/// Version-control commands scoped to the archive's working directory.
pub trait VersionControl: Send + Sync {
    /// `false` when every command is skipped; outputs must not be relied on then.
    fn is_active(&self) -> bool;

    /// Mutating subcommand (`init`, `add`, `commit`); a non-zero exit is an error.
    fn run(&self, args: &[&str]) -> Result<(), VcsError>;

    /// Read-only subcommand; returns trimmed standard output.
    fn query(&self, args: &[&str]) -> Result<String, VcsError>;
}

/// Runs `git -C <work_dir> ...`, or nothing at all when disabled.
#[derive(Debug, Clone)]
pub struct GitReplayer {
    program: OsString,
    work_dir: PathBuf,
    active: bool,
}

impl GitReplayer {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: OsString::from("git"),
            work_dir: work_dir.into(),
            active: true,
        }
    }

    /// A replayer that never spawns a process.
    pub fn disabled(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            active: false,
            ..Self::new(work_dir)
        }
    }

    pub fn with_program(mut self, program: impl Into<OsString>) -> Self {
        self.program = program.into();
        self
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    fn execute(&self, args: &[&str]) -> Result<Output, VcsError> {
        let command = self.describe(args);
        archiver_debug!("Running {}", command);
        let output = Command::new(&self.program)
            .arg("-C")
            .arg(&self.work_dir)
            .args(args)
            .output()
            .map_err(|source| VcsError::Launch {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(VcsError::Failed {
                command,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(output)
    }

    fn describe(&self, args: &[&str]) -> String {
        let subcommand = args.first().copied().unwrap_or_default();
        format!("{} {}", self.program.to_string_lossy(), subcommand)
    }
}

impl VersionControl for GitReplayer {
    fn is_active(&self) -> bool {
        self.active
    }

    fn run(&self, args: &[&str]) -> Result<(), VcsError> {
        if !self.active {
            return Ok(());
        }
        self.execute(args).map(|_| ())
    }

    fn query(&self, args: &[&str]) -> Result<String, VcsError> {
        if !self.active {
            return Ok(String::new());
        }
        let output = self.execute(args)?;
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

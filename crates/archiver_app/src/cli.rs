use std::path::PathBuf;

use archiver_logging::LogDestination;
use clap::{ArgAction, Parser};

use crate::config::DEFAULT_CONFIG_FILE;

/// Archive completed kata solutions into a git repository, one commit per solution.
#[derive(Debug, Parser)]
#[command(name = "kata-archiver", version, about, disable_version_flag = true)]
pub struct Cli {
    /// Don't create a git repository; files are still written
    #[arg(long)]
    pub no_git: bool,

    /// Path to the JSON configuration file
    #[arg(long, value_name = "PATH", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Also write the log to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Print version
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: (),
}

impl Cli {
    pub fn log_destination(&self) -> LogDestination {
        match &self.log_file {
            Some(path) => LogDestination::TerminalAndFile(path.clone()),
            None => LogDestination::Terminal,
        }
    }
}

mod cli;
mod config;

use std::process::ExitCode;

use archiver_core::LanguageMap;
use archiver_engine::{
    ArchiveReport, ArchiveSettings, Archiver, FetchSettings, GitReplayer, ListingTarget,
    ReqwestPageSource,
};
use archiver_logging::{archiver_error, archiver_info};
use clap::Parser;
use log::LevelFilter;

use crate::cli::Cli;
use crate::config::{load_config, ArchiverConfig};

fn main() -> ExitCode {
    let cli = Cli::parse();
    archiver_logging::initialize(cli.log_destination(), LevelFilter::Info);

    match run(&cli) {
        Ok(report) => {
            archiver_info!("{}", report.summary);
            ExitCode::SUCCESS
        }
        Err(err) => {
            archiver_error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<ArchiveReport> {
    let config = load_config(&cli.config)?;
    let runtime = tokio::runtime::Runtime::new()?;
    let report = runtime.block_on(async {
        let archiver = build_archiver(&config, cli.no_git)?;
        anyhow::Ok(archiver.run().await?)
    })?;
    Ok(report)
}

fn build_archiver(config: &ArchiverConfig, no_git: bool) -> anyhow::Result<Archiver> {
    let target = ListingTarget {
        base_url: config.base_url.clone(),
        username: config.username.clone(),
        session_id: config.session_id.clone(),
    };
    let fetch_settings = FetchSettings {
        request_timeout: config.request_timeout,
        ..FetchSettings::default()
    };
    let source = ReqwestPageSource::new(&target, fetch_settings)?;

    let vcs = if no_git {
        GitReplayer::disabled(&config.output_dir)
    } else {
        GitReplayer::new(&config.output_dir)
    };

    let settings = ArchiveSettings {
        output_dir: config.output_dir.clone(),
        base_url: config.base_url.clone(),
        username: config.username.clone(),
        languages: LanguageMap::with_overrides(config.extensions.clone()),
    };
    Ok(Archiver::new(settings, Box::new(source), Box::new(vcs)))
}

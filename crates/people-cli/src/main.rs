//! People table CLI.

use clap::{ColorChoice, Parser};
use people_cli::logging::{LogConfig, LogFormat, init_logging};
use people_cli::session::SessionConfig;
use people_store::CorruptSlotPolicy;
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg, OnCorruptArg, StoreArgs};
use crate::commands::{Status, run_delete, run_edit, run_generate, run_reset, run_show};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let session = session_config_from_cli(&cli.store);
    let result = match &cli.command {
        Command::Show(args) => run_show(&session, args),
        Command::Edit(args) => run_edit(&session, args),
        Command::Delete(args) => run_delete(&session, args),
        Command::Reset => run_reset(&session),
        Command::Generate(args) => run_generate(args, cli.store.seed),
    };
    let exit_code = match result {
        Ok(Status::Done) => 0,
        Ok(Status::Unsaved) => 1,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn session_config_from_cli(args: &StoreArgs) -> SessionConfig {
    SessionConfig::new(&args.store_dir)
        .with_seed_sizes(args.seed_sizes.clone())
        .with_seed(args.seed)
        .with_on_corrupt(match args.on_corrupt {
            OnCorruptArg::Regenerate => CorruptSlotPolicy::Regenerate,
            OnCorruptArg::Fail => CorruptSlotPolicy::Fail,
        })
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.log_data = cli.log_data;
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}

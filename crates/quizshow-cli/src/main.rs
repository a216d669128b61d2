//! Quiz show host CLI.

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use quizshow_cli::logging::{LogConfig, LogFormat, init_logging};
use quizshow_cli::settings::load_settings;
use quizshow_cli::summary::Tables;
use quizshow_core::{AppState, SessionError};
use quizshow_persistence::{FileBlobStore, PersistenceError};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{
    run_cell, run_config, run_pin, run_play_command, run_question, run_quiz, run_section,
    run_session,
};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(cli) {
        Ok(()) => 0,
        Err(error) => {
            report_error(&error);
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: Cli) -> Result<()> {
    let settings = load_settings(cli.config.as_deref());
    let command = match cli.command {
        Command::Config(command) => {
            return run_config(&settings, cli.config.as_deref(), command);
        }
        command => command,
    };

    let tables = Tables::new(&settings.display);
    let data_dir = settings.data_dir(cli.data_dir.as_deref())?;
    let backend = FileBlobStore::new(&data_dir, &settings.storage.namespace);
    let mut app = AppState::open(backend, settings.session.overwrite)
        .with_context(|| format!("open quiz data in {}", data_dir.display()))?;

    let result = match command {
        Command::Quiz(command) => run_quiz(&mut app, &tables, command),
        Command::Section(command) => run_section(&mut app, command),
        Command::Question(command) => run_question(&mut app, command),
        Command::Cell(command) => run_cell(&mut app, command),
        Command::Pin(command) => run_pin(&mut app, command),
        Command::Session(command) => run_session(&mut app, &tables, command),
        Command::Play(args) => run_play_command(&mut app, &tables, &args),
        Command::Config(_) => Ok(()),
    };
    let closed = app.close().context("save quiz data");
    result?;
    closed?;
    Ok(())
}

/// Print an error with any user-facing hint the failing layer provides.
fn report_error(error: &anyhow::Error) {
    if let Some(persistence) = error
        .chain()
        .find_map(|cause| cause.downcast_ref::<PersistenceError>())
    {
        eprintln!("error: {}", persistence.user_message());
        if let Some(hint) = persistence.suggestion() {
            eprintln!("hint: {hint}");
        }
        tracing::debug!("{error:#}");
        return;
    }

    eprintln!("error: {error:#}");
    if let Some(hint) = error
        .chain()
        .find_map(|cause| cause.downcast_ref::<SessionError>())
        .and_then(SessionError::suggestion)
    {
        eprintln!("hint: {hint}");
    }
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
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}

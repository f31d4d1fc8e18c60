#![forbid(unsafe_code)]

mod cli;
mod config;
mod interactive;
mod logging;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use drill_core::scheduler::PolicyKind;
use services::{QuizOptions, QuizService};
use storage::DirectoryRepository;
use tracing::info;

use cli::{Cli, Command, RunArgs};
use config::DrillConfig;

const DEFAULT_LISTS_DIR: &str = "lists";
const DEFAULT_LOG_LEVEL: &str = "warn";

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(2);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => DrillConfig::load(path)?,
        None => DrillConfig::default(),
    };

    let log_level = cli
        .log_level
        .as_deref()
        .or(config.log_level.as_deref())
        .unwrap_or(DEFAULT_LOG_LEVEL);
    logging::init_tracing(log_level);

    let lists_dir = cli
        .lists_dir
        .clone()
        .or_else(|| config.lists_dir.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LISTS_DIR));
    info!(lists_dir = %lists_dir.display(), "using word lists");

    match &cli.command {
        Command::Lists => print_lists(&lists_dir),
        Command::Policies => {
            print_policies();
            Ok(())
        }
        Command::Run(args) => run_drill(lists_dir, config, args),
    }
}

fn print_lists(lists_dir: &Path) -> anyhow::Result<()> {
    let service = QuizService::new(
        Arc::new(DirectoryRepository::new(lists_dir)),
        QuizOptions::default(),
    );
    let names = service
        .available_lists()
        .with_context(|| format!("listing {}", lists_dir.display()))?;
    if names.is_empty() {
        println!("no word lists in {}", lists_dir.display());
    }
    for name in names {
        println!("{name}");
    }
    Ok(())
}

fn print_policies() {
    for kind in PolicyKind::ALL {
        let marker = if kind == PolicyKind::default() { " (default)" } else { "" };
        println!("{:<12} {}{marker}", kind.as_str(), kind.description());
    }
}

fn run_drill(lists_dir: PathBuf, config: DrillConfig, args: &RunArgs) -> anyhow::Result<()> {
    let options = args.apply(config.quiz)?;
    let service = QuizService::new(Arc::new(DirectoryRepository::new(lists_dir)), options);

    let mut session = service
        .start(&args.list, Utc::now())
        .with_context(|| format!("starting drill on {}", args.list))?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    interactive::drill(&mut session, &mut stdin.lock(), &mut out)?;

    let summary = session.summary();
    if args.summary_json {
        writeln!(out, "{}", summary.to_json_pretty()?)?;
    } else {
        interactive::print_summary(&summary, &mut out)?;
    }
    Ok(())
}

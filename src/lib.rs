//! rollcall library root.
//! Exposes CLI parser, high-level run() function, and internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::commands;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let cmd = &cli.command;
    match cmd {
        Commands::Init => commands::init::handle(cli),
        Commands::Config { .. } => commands::config::handle(cmd, cfg),
        Commands::Db { .. } => commands::db::handle(cmd, cfg),
        Commands::Log { .. } => commands::log::handle(cmd, cfg),
        Commands::Teacher { .. } => commands::teacher::handle(cmd, cfg),
        Commands::Classroom { .. } => commands::classroom::handle(cmd, cfg),
        Commands::Schedule { .. } => commands::schedule::handle(cmd, cfg),
        Commands::Scan { .. } => commands::scan::handle(cmd, cfg),
        Commands::Logs { .. } => commands::logs::handle(cmd, cfg),
        Commands::Report { .. } => commands::report::handle(cmd, cfg),
        Commands::Me { .. } => commands::me::handle(cmd, cfg),
        Commands::Sweep { .. } => commands::sweep::handle(cmd, cfg),
        Commands::Notify { .. } | Commands::Notifications { .. } => {
            commands::notify::handle(cmd, cfg)
        }
        Commands::Dashboard => commands::dashboard::handle(cmd, cfg),
        Commands::Backup { .. } => commands::backup::handle(cmd, cfg),
        Commands::Export { .. } => commands::export::handle(cmd, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // loaded once; --db wins over the file
    let mut cfg = Config::load()?;
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    dispatch(&cli, &cfg)
}

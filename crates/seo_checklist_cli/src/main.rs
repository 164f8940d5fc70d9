//! Interactive terminal front-end for the checklist tracker.
//!
//! # Responsibility
//! - Resolve configuration, start logging, open the durable store.
//! - Hand the store and transient view state to the command loop.

mod render;
mod repl;

use clap::Parser;
use log::info;
use seo_checklist_core::db::open_db;
use seo_checklist_core::{
    init_logging, shipped_catalog, AppConfig, ConfigOverrides, ProjectSlot, ProjectStore,
    SqliteKvStore, StoreEvent, ViewState,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "seo-checklist", version, about = "Track SEO audit checklists per project")]
struct Cli {
    /// SQLite file holding the project slot.
    #[arg(long, value_name = "PATH")]
    db: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rolling log files.
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            render::print_error(&message);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let config = AppConfig::resolve(ConfigOverrides {
        db_path: cli.db,
        log_level: cli.log_level,
        log_dir: cli.log_dir,
    })
    .map_err(|err| format!("invalid configuration: {err}"))?;

    init_logging(&config).map_err(|err| format!("logging setup failed: {err}"))?;

    if let Some(parent) = config.db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|err| {
            format!("failed to create database directory `{}`: {err}", parent.display())
        })?;
    }
    let conn = open_db(&config.db_path).map_err(|err| format!("database open failed: {err}"))?;

    let catalog = shipped_catalog();
    let mut store = ProjectStore::open(catalog, ProjectSlot::new(SqliteKvStore::new(&conn)));
    store.subscribe(|event| {
        if let StoreEvent::ItemChecked { item_id, .. } = event {
            render::celebrate(item_id);
        }
    });
    let mut view = ViewState::new(catalog);

    info!(
        "event=cli_start module=cli status=ok project_count={}",
        store.projects().len()
    );
    repl::run(&mut store, &mut view)
}

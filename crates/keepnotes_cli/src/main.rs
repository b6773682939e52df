//! CLI smoke entry point.
//!
//! # Responsibility
//! - Open a local database, load a session and print a metadata summary.
//! - Verify `keepnotes_core` wiring without a rendering layer.
//!
//! Environment:
//! - `KEEPNOTES_DB`: database path (overridden by the first argument).
//! - `KEEPNOTES_CONFIG`: optional JSON file with `NoteStoreConfig` fields.
//! - `KEEPNOTES_LOG_DIR` / `KEEPNOTES_LOG_LEVEL`: enable file logging.

use keepnotes_core::db::open_db;
use keepnotes_core::{
    core_version, default_log_level, init_logging, NoteSession, NoteStoreConfig,
    SqliteKeyValueStore,
};
use log::warn;
use std::process::ExitCode;

const DEFAULT_DB_PATH: &str = "keepnotes.sqlite3";

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("keepnotes error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), String> {
    if let Ok(log_dir) = std::env::var("KEEPNOTES_LOG_DIR") {
        let level = std::env::var("KEEPNOTES_LOG_LEVEL")
            .unwrap_or_else(|_| default_log_level().to_string());
        init_logging(&level, &log_dir)?;
    }

    let config = load_config()?;
    let db_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("KEEPNOTES_DB").ok())
        .unwrap_or_else(|| DEFAULT_DB_PATH.to_string());

    let conn = open_db(&db_path).map_err(|err| format!("failed to open `{db_path}`: {err}"))?;
    let storage = SqliteKeyValueStore::try_new(&conn).map_err(|err| err.to_string())?;
    let session = NoteSession::open(storage, config);
    let store = session.store();
    let pinned = store.notes().iter().filter(|note| note.is_pinned).count();

    println!("keepnotes_core version={}", core_version());
    println!(
        "notes={} pinned={} pages={} page_size={} theme={} load_status={:?}",
        store.len(),
        pinned,
        session.total_pages(),
        store.page_size(),
        session.theme().as_str(),
        store.load_status()
    );
    Ok(())
}

fn load_config() -> Result<NoteStoreConfig, String> {
    let Ok(path) = std::env::var("KEEPNOTES_CONFIG") else {
        return Ok(NoteStoreConfig::default());
    };
    let source = match std::fs::read_to_string(&path) {
        Ok(source) => source,
        Err(err) => {
            warn!("event=config_load module=cli status=degraded error={err}");
            return Ok(NoteStoreConfig::default());
        }
    };
    NoteStoreConfig::from_json(&source).map_err(|err| format!("invalid config `{path}`: {err}"))
}

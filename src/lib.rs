// Library root
// -----------
// This crate exposes a small library surface for the CLI. The binary
// (`main.rs`) uses these modules to implement the interactive CLI.
//
// Module responsibilities:
// - `config`: settings file loading (bucket, credentials profile, MySQL).
// - `db`: typed queries against the MySQL metadata store.
// - `storage`: S3 upload/download/count plus object key generation.
// - `commands`: the seven command handlers, taking constructed arguments.
// - `ui`: the interactive numbered menu, delegating to `commands`.
// - `display`: terminal rendering for downloaded images.
// - `models`, `error`: row types and the shared error enum.
//
// The handlers never read stdin themselves, so they can be exercised
// directly without simulated keystrokes.

pub mod commands;
pub mod config;
pub mod db;
pub mod display;
pub mod error;
pub mod models;
pub mod storage;
pub mod ui;

use crate::config::Settings;
use crate::db::DataTier;
use crate::storage::ObjectStore;

/// Everything a command handler needs: the loaded settings plus the
/// database connection and bucket client opened once at startup. Built in
/// `main` and passed by reference into each handler invocation.
pub struct Session {
    pub settings: Settings,
    pub db: DataTier,
    pub store: ObjectStore,
}

// Entrypoint for the CLI application.
// - Keeps `main` small: load settings, open the database connection and
//   bucket client once, hand the session to the UI loop.
// - Startup failures (missing settings file, unreachable database) exit
//   the process; everything after that is report-and-continue in the loop.

use anyhow::Context;
use dialoguer::Input;
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use photocat_cli::config::{Settings, DEFAULT_SETTINGS_FILE};
use photocat_cli::db::DataTier;
use photocat_cli::storage::ObjectStore;
use photocat_cli::ui::main_menu;
use photocat_cli::Session;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "photocat_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("** Welcome to PhotoApp **");
    println!();

    println!("What settings file to use for this session?");
    let path: String = Input::new()
        .with_prompt("Settings file")
        .default(DEFAULT_SETTINGS_FILE.into())
        .interact_text()?;
    if !Path::new(&path).is_file() {
        anyhow::bail!("settings file '{path}' does not exist, exiting");
    }
    let settings = Settings::from_path(&path)?;
    tracing::info!(file = %path, "settings loaded");

    let store = ObjectStore::connect(&settings.s3).await;
    let db = DataTier::connect(&settings.rds)
        .await
        .context("unable to connect to database, exiting")?;
    tracing::info!(endpoint = %settings.rds.endpoint, "database connection established");

    let session = Session {
        settings,
        db,
        store,
    };

    // Start the interactive menu. This call blocks until the user exits.
    main_menu(&session).await?;

    println!();
    println!("** done **");
    Ok(())
}

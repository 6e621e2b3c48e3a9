mod bootstrap;

use std::sync::Arc;

use admin_api::{ApiClient, SessionEvent};
use admin_core::session::Session;
use admin_core::settings::Settings;
use admin_core::storage::{FileStore, KeyValueStore, MemoryStore};
use admin_runtime::router::Route;
use admin_runtime::transfer::{download_document, upload_document};
use admin_ui::app::App;
use anyhow::{Context, Result};
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("Formation Admin v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "API: {}, View: {}, Theme: {}",
        settings.api_url,
        settings.view,
        settings.theme
    );

    let store: Arc<dyn KeyValueStore> = if settings.ephemeral {
        Arc::new(MemoryStore::new())
    } else {
        let dir = settings
            .storage_dir
            .clone()
            .unwrap_or_else(FileStore::default_dir);
        tracing::debug!(dir = %dir.display(), "using file session store");
        Arc::new(FileStore::new(dir))
    };
    let session = Arc::new(Session::new(store));

    let (events_tx, events_rx) = mpsc::unbounded_channel::<SessionEvent>();
    let client = ApiClient::with_base_url(&settings.api_url, session.clone())
        .with_session_events(events_tx);

    if settings.logout {
        client.auth().sign_out();
        println!("Signed out.");
        return Ok(());
    }

    if let Some(id) = settings.upload_document {
        let file = settings
            .file
            .as_deref()
            .context("--upload-document needs --file")?;
        let response = upload_document(&client, id, file).await?;
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    if let Some(id) = settings.download_document {
        let output = settings
            .output
            .as_deref()
            .context("--download-document needs --output")?;
        let written = download_document(&client, id, output).await?;
        println!("Saved {}", written.display());
        return Ok(());
    }

    let app = App::new(
        client,
        events_rx,
        &settings.theme,
        Route::from_view(&settings.view),
    );

    // Blocks until 'q' / Ctrl+C inside the TUI; raw mode delivers Ctrl+C as a key.
    app.run().await?;

    tracing::info!("Formation Admin exiting");
    Ok(())
}

//! Background page loading.
//!
//! [`PageLoader`] fetches the resource list behind a [`Route`] and maps it into
//! [`TableRecord`]s. [`PageLoader::spawn`] runs the fetch on a tokio task and
//! delivers a [`PageUpdate`] through an `mpsc` channel so the TUI event loop
//! never awaits the network itself.

use admin_api::{ApiClient, ApiError};
use admin_core::records::to_records;
use admin_core::table::TableRecord;
use tokio::sync::mpsc;

use crate::router::Route;

/// Channel capacity for page updates; one in flight per page is the norm.
pub const UPDATE_BUFFER: usize = 16;

pub type PageResult = Result<Vec<TableRecord>, ApiError>;

/// Outcome of one page load, tagged with the route it was requested for.
#[derive(Debug, Clone)]
pub struct PageUpdate {
    pub route: Route,
    pub result: PageResult,
}

#[derive(Debug, Clone)]
pub struct PageLoader {
    client: ApiClient,
}

impl PageLoader {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// A fresh update channel sized for the UI loop.
    pub fn channel() -> (mpsc::Sender<PageUpdate>, mpsc::Receiver<PageUpdate>) {
        mpsc::channel(UPDATE_BUFFER)
    }

    /// Fetch and map the records for `route`. Pages without a table yield an
    /// empty list without touching the network.
    pub async fn load(&self, route: Route) -> PageResult {
        let records = match route {
            Route::Users => to_records(&self.client.users().list().await?),
            Route::Roles => to_records(&self.client.roles().list().await?),
            Route::Locations => to_records(&self.client.locations().list().await?),
            Route::Stages => to_records(&self.client.stages().list().await?),
            Route::Home | Route::Login => Vec::new(),
        };
        tracing::debug!(route = route.path(), count = records.len(), "page loaded");
        Ok(records)
    }

    /// Load `route` on a background task and send the outcome to `tx`.
    pub fn spawn(&self, route: Route, tx: mpsc::Sender<PageUpdate>) -> LoadHandle {
        let loader = self.clone();
        let handle = tokio::spawn(async move {
            let result = loader.load(route).await;
            if let Err(e) = &result {
                tracing::warn!(route = route.path(), error = %e, "page load failed");
            }
            if tx.send(PageUpdate { route, result }).await.is_err() {
                tracing::debug!(route = route.path(), "update receiver dropped");
            }
        });
        LoadHandle { handle }
    }
}

/// Handle to a spawned page load.
pub struct LoadHandle {
    handle: tokio::task::JoinHandle<()>,
}

impl LoadHandle {
    /// Abandon the load; no update will be sent.
    pub fn abort(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

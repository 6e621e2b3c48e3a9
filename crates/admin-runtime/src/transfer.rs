//! Document file transfer between the API and the local filesystem.

use std::path::{Path, PathBuf};

use admin_api::ApiClient;
use anyhow::{Context, Result};
use serde_json::Value;

/// Read `path` and upload it as the file of document `document_id`.
///
/// The multipart file name is the final path component.
pub async fn upload_document(client: &ApiClient, document_id: i64, path: &Path) -> Result<Value> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());

    let size = bytes.len();
    let response = client
        .documents()
        .upload(document_id, &file_name, bytes)
        .await
        .with_context(|| format!("Upload of document {document_id} failed"))?;

    tracing::info!(document_id, file = %file_name, bytes = size, "document uploaded");
    Ok(response)
}

/// Download the file of document `document_id` into `dest`.
///
/// When `dest` is an existing directory the file is written inside it as
/// `document-<id>`. Parent directories are created. Returns the written path.
pub async fn download_document(client: &ApiClient, document_id: i64, dest: &Path) -> Result<PathBuf> {
    let bytes = client
        .documents()
        .download(document_id)
        .await
        .with_context(|| format!("Download of document {document_id} failed"))?;

    let target = if tokio::fs::metadata(dest)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false)
    {
        dest.join(format!("document-{document_id}"))
    } else {
        dest.to_path_buf()
    };

    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    tokio::fs::write(&target, &bytes)
        .await
        .with_context(|| format!("Failed to write {}", target.display()))?;

    tracing::info!(document_id, path = %target.display(), bytes = bytes.len(), "document downloaded");
    Ok(target)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

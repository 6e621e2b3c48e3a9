use admin_core::models::ReadingProgressDto;
use serde::Serialize;

use crate::client::ApiClient;
use crate::error::ApiError;

/// Per-user reading progress over documents.
pub struct Progress<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    pub fn progress(&self) -> Progress<'_> {
        Progress { client: self }
    }
}

impl Progress<'_> {
    pub async fn document(&self, document_id: i64) -> Result<ReadingProgressDto, ApiError> {
        self.client
            .get(&format!("/api/reading-progress/document/{document_id}"))
            .await
    }

    pub async fn update<B: Serialize + ?Sized>(
        &self,
        document_id: i64,
        progress: &B,
    ) -> Result<ReadingProgressDto, ApiError> {
        self.client
            .post(
                &format!("/api/reading-progress/document/{document_id}"),
                progress,
            )
            .await
    }

    pub async fn completed(&self) -> Result<Vec<ReadingProgressDto>, ApiError> {
        self.client.get("/api/reading-progress/completed").await
    }

    pub async fn in_progress(&self) -> Result<Vec<ReadingProgressDto>, ApiError> {
        self.client.get("/api/reading-progress/in-progress").await
    }

    pub async fn recent(&self) -> Result<Vec<ReadingProgressDto>, ApiError> {
        self.client.get("/api/reading-progress/recent").await
    }

    pub async fn reset(&self, document_id: i64) -> Result<(), ApiError> {
        self.client
            .delete(&format!("/api/reading-progress/document/{document_id}"))
            .await
    }
}

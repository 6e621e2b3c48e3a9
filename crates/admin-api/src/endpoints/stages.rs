use admin_core::models::StageDto;
use serde::Serialize;
use serde_json::json;

use crate::client::ApiClient;
use crate::error::ApiError;

/// Formative stages.
pub struct Stages<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    pub fn stages(&self) -> Stages<'_> {
        Stages { client: self }
    }
}

impl Stages<'_> {
    pub async fn list(&self) -> Result<Vec<StageDto>, ApiError> {
        self.client.get("/api/stages").await
    }

    pub async fn get(&self, id: i64) -> Result<StageDto, ApiError> {
        self.client.get(&format!("/api/stages/{id}")).await
    }

    pub async fn by_user(&self, user_id: i64) -> Result<Vec<StageDto>, ApiError> {
        self.client.get(&format!("/api/stages/user/{user_id}")).await
    }

    /// Stages are always created for a specific user.
    pub async fn create<B: Serialize + ?Sized>(
        &self,
        user_id: i64,
        stage: &B,
    ) -> Result<StageDto, ApiError> {
        self.client
            .post(&format!("/api/stages/user/{user_id}"), stage)
            .await
    }

    pub async fn update<B: Serialize + ?Sized>(&self, id: i64, stage: &B) -> Result<StageDto, ApiError> {
        self.client.put(&format!("/api/stages/{id}"), stage).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("/api/stages/{id}")).await
    }

    pub async fn complete(&self, id: i64) -> Result<StageDto, ApiError> {
        self.client
            .put(&format!("/api/stages/{id}/complete"), &json!({}))
            .await
    }

    pub async fn active(&self) -> Result<Vec<StageDto>, ApiError> {
        self.client.get("/api/stages/active").await
    }
}

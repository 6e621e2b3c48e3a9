use admin_core::models::CategoryDto;
use serde::Serialize;

use crate::client::ApiClient;
use crate::error::ApiError;

/// Document categories (a tree via `parentId`).
pub struct Categories<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    pub fn categories(&self) -> Categories<'_> {
        Categories { client: self }
    }
}

impl Categories<'_> {
    pub async fn list(&self) -> Result<Vec<CategoryDto>, ApiError> {
        self.client.get("/api/categories").await
    }

    /// Top-level categories only.
    pub async fn root(&self) -> Result<Vec<CategoryDto>, ApiError> {
        self.client.get("/api/categories/root").await
    }

    pub async fn get(&self, id: i64) -> Result<CategoryDto, ApiError> {
        self.client.get(&format!("/api/categories/{id}")).await
    }

    pub async fn subcategories(&self, id: i64) -> Result<Vec<CategoryDto>, ApiError> {
        self.client
            .get(&format!("/api/categories/{id}/subcategories"))
            .await
    }

    pub async fn create<B: Serialize + ?Sized>(&self, category: &B) -> Result<CategoryDto, ApiError> {
        self.client.post("/api/categories", category).await
    }

    pub async fn update<B: Serialize + ?Sized>(
        &self,
        id: i64,
        category: &B,
    ) -> Result<CategoryDto, ApiError> {
        self.client.put(&format!("/api/categories/{id}"), category).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("/api/categories/{id}")).await
    }
}

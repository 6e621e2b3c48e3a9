use admin_core::models::UserDto;
use serde::Serialize;
use serde_json::json;

use crate::client::ApiClient;
use crate::error::ApiError;

pub struct Users<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    pub fn users(&self) -> Users<'_> {
        Users { client: self }
    }
}

impl Users<'_> {
    pub async fn list(&self) -> Result<Vec<UserDto>, ApiError> {
        self.client.get("/api/users").await
    }

    pub async fn get(&self, id: i64) -> Result<UserDto, ApiError> {
        self.client.get(&format!("/api/users/{id}")).await
    }

    pub async fn create<B: Serialize + ?Sized>(&self, user: &B) -> Result<UserDto, ApiError> {
        self.client.post("/api/users", user).await
    }

    pub async fn update<B: Serialize + ?Sized>(&self, id: i64, user: &B) -> Result<UserDto, ApiError> {
        self.client.put(&format!("/api/users/{id}"), user).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("/api/users/{id}")).await
    }

    pub async fn assign_role(&self, user_id: i64, role_id: i64) -> Result<UserDto, ApiError> {
        self.client
            .put(&format!("/api/users/{user_id}/role/{role_id}"), &json!({}))
            .await
    }
}

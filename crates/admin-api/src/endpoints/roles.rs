use admin_core::models::{RoleDto, UserDto};
use serde::Serialize;

use crate::client::ApiClient;
use crate::error::ApiError;

pub struct Roles<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    pub fn roles(&self) -> Roles<'_> {
        Roles { client: self }
    }
}

impl Roles<'_> {
    pub async fn list(&self) -> Result<Vec<RoleDto>, ApiError> {
        self.client.get("/api/roles").await
    }

    pub async fn get(&self, id: i64) -> Result<RoleDto, ApiError> {
        self.client.get(&format!("/api/roles/{id}")).await
    }

    pub async fn create<B: Serialize + ?Sized>(&self, role: &B) -> Result<RoleDto, ApiError> {
        self.client.post("/api/roles", role).await
    }

    pub async fn update<B: Serialize + ?Sized>(&self, id: i64, role: &B) -> Result<RoleDto, ApiError> {
        self.client.put(&format!("/api/roles/{id}"), role).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("/api/roles/{id}")).await
    }

    /// Members holding role `id`.
    pub async fn users(&self, id: i64) -> Result<Vec<UserDto>, ApiError> {
        self.client.get(&format!("/api/roles/{id}/users")).await
    }
}

#[cfg(test)]
mod tests {
    use crate::client::tests::{make_client, ScriptedTransport};
    use crate::transport::Method;
    use serde_json::json;

    #[tokio::test]
    async fn test_role_crud_paths() {
        let transport = ScriptedTransport::new();
        transport.respond(201, r#"{"id":3,"name":"Formator"}"#);
        transport.respond(200, r#"[{"id":1,"name":"Ana"}]"#);
        let (client, _session, _rx) = make_client(&transport);

        let role = client
            .roles()
            .create(&json!({"name": "Formator"}))
            .await
            .unwrap();
        assert_eq!(role.id, 3);
        assert_eq!(transport.last_request().method, Method::Post);

        let members = client.roles().users(3).await.unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(transport.last_request().path, "/api/roles/3/users");
    }
}

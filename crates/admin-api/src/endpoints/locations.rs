use admin_core::models::{LocationDto, UserDto};
use serde::Serialize;
use serde_json::json;

use super::encode_segment;
use crate::client::ApiClient;
use crate::error::ApiError;

/// Mission locations.
pub struct Locations<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    pub fn locations(&self) -> Locations<'_> {
        Locations { client: self }
    }
}

impl Locations<'_> {
    pub async fn list(&self) -> Result<Vec<LocationDto>, ApiError> {
        self.client.get("/api/locations").await
    }

    pub async fn get(&self, id: i64) -> Result<LocationDto, ApiError> {
        self.client.get(&format!("/api/locations/{id}")).await
    }

    pub async fn create<B: Serialize + ?Sized>(&self, location: &B) -> Result<LocationDto, ApiError> {
        self.client.post("/api/locations", location).await
    }

    pub async fn update<B: Serialize + ?Sized>(
        &self,
        id: i64,
        location: &B,
    ) -> Result<LocationDto, ApiError> {
        self.client.put(&format!("/api/locations/{id}"), location).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("/api/locations/{id}")).await
    }

    pub async fn by_city(&self, city: &str) -> Result<Vec<LocationDto>, ApiError> {
        self.client
            .get(&format!("/api/locations/by-city/{}", encode_segment(city)))
            .await
    }

    pub async fn by_state(&self, state: &str) -> Result<Vec<LocationDto>, ApiError> {
        self.client
            .get(&format!("/api/locations/by-state/{}", encode_segment(state)))
            .await
    }

    pub async fn assign_coordinator(
        &self,
        location_id: i64,
        user_id: i64,
    ) -> Result<LocationDto, ApiError> {
        self.client
            .put(
                &format!("/api/locations/{location_id}/coordinator/{user_id}"),
                &json!({}),
            )
            .await
    }

    /// Users assigned to location `id`.
    pub async fn users(&self, id: i64) -> Result<Vec<UserDto>, ApiError> {
        self.client.get(&format!("/api/locations/{id}/users")).await
    }
}

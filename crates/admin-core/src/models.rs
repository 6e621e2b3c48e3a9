//! Typed payloads exchanged with the formation REST API.
//!
//! Every field the server may omit is an `Option` with `#[serde(default)]`;
//! substitution of display defaults happens in [`crate::records`], never here.
//!
//! Resource records are loosely typed on the wire: a field that usually holds
//! text may arrive as a number. Their fields go through [`lenient`], so one
//! odd value blanks that field instead of rejecting the whole list.

use serde::{Deserialize, Serialize};

use crate::session::CurrentUser;

// ── Lenient fields ─────────────────────────────────────────────────────────────

mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    fn integer(value: Value) -> Option<i64> {
        match value {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Strings as-is; numbers and booleans in their JSON spelling.
    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        })
    }

    /// Integers, or strings holding one, that fit `T`.
    pub fn number<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: TryFrom<i64>,
    {
        Ok(integer(Value::deserialize(d)?).and_then(|n| T::try_from(n).ok()))
    }

    /// Record id; unreadable ids become `0`.
    pub fn id<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
        Ok(integer(Value::deserialize(d)?).unwrap_or_default())
    }
}

// ── Auth ───────────────────────────────────────────────────────────────────────

/// Body of `POST /api/auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub id: i64,
    pub username: String,
    pub name: String,
    pub role: String,
}

impl LoginResponse {
    /// The user record persisted next to the token.
    pub fn to_current_user(&self) -> CurrentUser {
        CurrentUser {
            id: self.id,
            username: self.username.clone(),
            display_name: self.name.clone(),
            role: self.role.clone(),
            life_stage: None,
            mission_location_id: None,
            mission_location_name: None,
        }
    }
}

// ── People and places ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserDto {
    #[serde(deserialize_with = "lenient::id")]
    pub id: i64,
    #[serde(deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub username: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub email: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub role_name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub life_stage: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub mission_location_id: Option<i64>,
    #[serde(deserialize_with = "lenient::text")]
    pub mission_location_name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub formatted_community_time: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub community_years: Option<u32>,
    #[serde(deserialize_with = "lenient::number")]
    pub community_months: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RoleDto {
    #[serde(deserialize_with = "lenient::id")]
    pub id: i64,
    #[serde(deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub user_name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub username: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub location_name: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub user_count: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LocationDto {
    #[serde(deserialize_with = "lenient::id")]
    pub id: i64,
    #[serde(deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub city: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub state: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub coordinator_name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub coordinator: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub role_name: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub user_count: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StageDto {
    #[serde(deserialize_with = "lenient::id")]
    pub id: i64,
    #[serde(deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub user_id: Option<i64>,
    #[serde(deserialize_with = "lenient::text")]
    pub user_name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub username: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub role_name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub stage_name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub location_name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub mission_location_name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub formatted_time: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub duration: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub start_date: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub end_date: Option<String>,
}

// ── Library ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DocumentDto {
    #[serde(deserialize_with = "lenient::id")]
    pub id: i64,
    #[serde(deserialize_with = "lenient::text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub file_name: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub category_id: Option<i64>,
    #[serde(deserialize_with = "lenient::text")]
    pub category_name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub stage: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub mission_location_id: Option<i64>,
    #[serde(deserialize_with = "lenient::number")]
    pub view_count: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CategoryDto {
    #[serde(deserialize_with = "lenient::id")]
    pub id: i64,
    #[serde(deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub parent_id: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReadingProgressDto {
    pub id: Option<i64>,
    pub document_id: i64,
    pub document_title: Option<String>,
    pub current_page: Option<u32>,
    pub total_pages: Option<u32>,
    pub percentage: Option<f64>,
    pub completed: Option<bool>,
    pub last_read_at: Option<String>,
}

// ── Search ─────────────────────────────────────────────────────────────────────

/// Query for `GET /api/search/documents`. Unset fields are left out of the
/// query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentSearch {
    pub query: Option<String>,
    pub category_id: Option<i64>,
    pub stage: Option<String>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

impl DocumentSearch {
    /// `(name, value)` pairs in a stable order.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(q) = &self.query {
            pairs.push(("query".to_string(), q.clone()));
        }
        if let Some(id) = self.category_id {
            pairs.push(("categoryId".to_string(), id.to_string()));
        }
        if let Some(stage) = &self.stage {
            pairs.push(("stage".to_string(), stage.clone()));
        }
        if let Some(page) = self.page {
            pairs.push(("page".to_string(), page.to_string()));
        }
        if let Some(size) = self.size {
            pairs.push(("size".to_string(), size.to_string()));
        }
        pairs
    }
}

/// Paged listing as returned by the search endpoints.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u32,
    pub number: u32,
    pub size: u32,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            content: Vec::new(),
            total_elements: 0,
            total_pages: 0,
            number: 0,
            size: 0,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_response_to_current_user() {
        let resp = LoginResponse {
            token: "t".to_string(),
            id: 4,
            username: "bia".to_string(),
            name: "Bia Lima".to_string(),
            role: "ADMIN".to_string(),
        };
        let user = resp.to_current_user();
        assert_eq!(user.id, 4);
        assert_eq!(user.display_name, "Bia Lima");
        assert!(user.mission_location_name.is_none());
    }

    #[test]
    fn test_user_dto_missing_fields_default_to_none() {
        let user: UserDto = serde_json::from_str(r#"{"id": 9, "name": "Ana"}"#).unwrap();
        assert_eq!(user.id, 9);
        assert_eq!(user.name.as_deref(), Some("Ana"));
        assert!(user.role_name.is_none());
        assert!(user.community_years.is_none());
    }

    #[test]
    fn test_user_dto_reads_camel_case() {
        let user: UserDto = serde_json::from_str(
            r#"{"id":1,"roleName":"Formator","missionLocationName":"Recife","communityYears":2}"#,
        )
        .unwrap();
        assert_eq!(user.role_name.as_deref(), Some("Formator"));
        assert_eq!(user.mission_location_name.as_deref(), Some("Recife"));
        assert_eq!(user.community_years, Some(2));
    }

    #[test]
    fn test_display_fields_accept_numbers_and_bools() {
        let stage: StageDto = serde_json::from_str(
            r#"{"id":"12","duration":180,"status":true,"userId":"4","formattedTime":null}"#,
        )
        .unwrap();
        assert_eq!(stage.id, 12);
        assert_eq!(stage.duration.as_deref(), Some("180"));
        assert_eq!(stage.status.as_deref(), Some("true"));
        assert_eq!(stage.user_id, Some(4));
        assert!(stage.formatted_time.is_none());
    }

    #[test]
    fn test_mismatched_fields_become_none() {
        let stages: Vec<StageDto> = serde_json::from_str(
            r#"[{"id":1,"title":"Novitiate"},{"id":2,"title":["x"],"userId":"abc"}]"#,
        )
        .unwrap();
        assert_eq!(stages.len(), 2);
        assert!(stages[1].title.is_none());
        assert!(stages[1].user_id.is_none());
    }

    #[test]
    fn test_counts_out_of_range_become_none() {
        let role: RoleDto =
            serde_json::from_str(r#"{"id":1,"userCount":-3}"#).unwrap();
        assert!(role.user_count.is_none());
        let role: RoleDto = serde_json::from_str(r#"{"id":1,"userCount":"5"}"#).unwrap();
        assert_eq!(role.user_count, Some(5));
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let stage: StageDto =
            serde_json::from_str(r#"{"id":3,"title":"Novitiate","extra":{"nested":true}}"#)
                .unwrap();
        assert_eq!(stage.title.as_deref(), Some("Novitiate"));
    }

    #[test]
    fn test_document_search_query_pairs() {
        let search = DocumentSearch {
            query: Some("prayer".to_string()),
            page: Some(1),
            size: Some(20),
            ..Default::default()
        };
        assert_eq!(
            search.to_query(),
            vec![
                ("query".to_string(), "prayer".to_string()),
                ("page".to_string(), "1".to_string()),
                ("size".to_string(), "20".to_string()),
            ]
        );
        assert!(DocumentSearch::default().to_query().is_empty());
    }

    #[test]
    fn test_page_defaults_when_fields_missing() {
        let page: Page<DocumentDto> =
            serde_json::from_str(r#"{"content":[{"id":1,"title":"Rule"}]}"#).unwrap();
        assert_eq!(page.content.len(), 1);
        assert_eq!(page.total_elements, 0);
    }
}

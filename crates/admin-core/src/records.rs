//! Mapping from resource payloads to [`TableRecord`] rows.
//!
//! Each resource fills the six generic columns differently; missing or blank
//! values become [`NOT_AVAILABLE`]. Where the API has used two names for the
//! same field over time, the first non-blank one wins.

use crate::formatting::{
    format_city_state, format_community_time, format_user_count, NOT_AVAILABLE,
};
use crate::models::{LocationDto, RoleDto, StageDto, UserDto};
use crate::table::TableRecord;

/// First non-blank candidate, or `"N/A"`.
fn or_na<'a>(candidates: impl IntoIterator<Item = Option<&'a String>>) -> String {
    candidates
        .into_iter()
        .flatten()
        .find(|s| !s.trim().is_empty())
        .cloned()
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

impl From<&UserDto> for TableRecord {
    fn from(user: &UserDto) -> Self {
        let duration = match user.formatted_community_time.as_ref() {
            Some(t) if !t.trim().is_empty() => t.clone(),
            _ => format_community_time(
                user.community_years.unwrap_or(0),
                user.community_months.unwrap_or(0),
            ),
        };

        TableRecord {
            id: user.id,
            name: or_na([user.name.as_ref()]),
            username: or_na([user.username.as_ref()]),
            role: or_na([user.role_name.as_ref()]),
            stage: or_na([user.life_stage.as_ref()]),
            location: or_na([user.mission_location_name.as_ref()]),
            duration,
        }
    }
}

impl From<&RoleDto> for TableRecord {
    fn from(role: &RoleDto) -> Self {
        TableRecord {
            id: role.id,
            name: or_na([role.name.as_ref()]),
            username: or_na([role.user_name.as_ref(), role.username.as_ref()]),
            role: or_na([role.name.as_ref()]),
            stage: or_na([role.description.as_ref()]),
            location: or_na([role.location_name.as_ref()]),
            duration: format_user_count(role.user_count),
        }
    }
}

impl From<&LocationDto> for TableRecord {
    fn from(location: &LocationDto) -> Self {
        TableRecord {
            id: location.id,
            name: or_na([location.name.as_ref()]),
            username: or_na([
                location.coordinator_name.as_ref(),
                location.coordinator.as_ref(),
            ]),
            role: or_na([location.role_name.as_ref()]),
            stage: format_city_state(location.city.as_deref(), location.state.as_deref()),
            location: or_na([location.name.as_ref()]),
            duration: format_user_count(location.user_count),
        }
    }
}

impl From<&StageDto> for TableRecord {
    fn from(stage: &StageDto) -> Self {
        TableRecord {
            id: stage.id,
            name: or_na([stage.name.as_ref(), stage.title.as_ref()]),
            username: or_na([stage.user_name.as_ref(), stage.username.as_ref()]),
            role: or_na([stage.role_name.as_ref()]),
            stage: or_na([stage.status.as_ref(), stage.stage_name.as_ref()]),
            location: or_na([
                stage.location_name.as_ref(),
                stage.mission_location_name.as_ref(),
            ]),
            duration: or_na([stage.formatted_time.as_ref(), stage.duration.as_ref()]),
        }
    }
}

/// Map a whole listing.
pub fn to_records<'a, T>(items: &'a [T]) -> Vec<TableRecord>
where
    TableRecord: From<&'a T>,
{
    items.iter().map(TableRecord::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> Option<String> {
        Some(v.to_string())
    }

    #[test]
    fn test_user_mapping_full() {
        let user = UserDto {
            id: 1,
            name: s("Ana Souza"),
            username: s("ana"),
            role_name: s("Formator"),
            life_stage: s("Novitiate"),
            mission_location_name: s("Recife"),
            formatted_community_time: s("3 anos"),
            ..Default::default()
        };
        let rec = TableRecord::from(&user);
        assert_eq!(rec.id, 1);
        assert_eq!(rec.name, "Ana Souza");
        assert_eq!(rec.role, "Formator");
        assert_eq!(rec.stage, "Novitiate");
        assert_eq!(rec.location, "Recife");
        assert_eq!(rec.duration, "3 anos");
    }

    #[test]
    fn test_user_mapping_defaults() {
        let rec = TableRecord::from(&UserDto {
            id: 2,
            community_years: Some(1),
            community_months: Some(4),
            ..Default::default()
        });
        assert_eq!(rec.name, "N/A");
        assert_eq!(rec.username, "N/A");
        assert_eq!(rec.location, "N/A");
        assert_eq!(rec.duration, "1 year and 4 months");

        let bare = TableRecord::from(&UserDto {
            id: 3,
            ..Default::default()
        });
        assert_eq!(bare.duration, "N/A");
    }

    #[test]
    fn test_blank_strings_count_as_missing() {
        let rec = TableRecord::from(&UserDto {
            id: 4,
            name: s("   "),
            formatted_community_time: s(""),
            ..Default::default()
        });
        assert_eq!(rec.name, "N/A");
        assert_eq!(rec.duration, "N/A");
    }

    #[test]
    fn test_role_mapping_prefers_user_name() {
        let rec = TableRecord::from(&RoleDto {
            id: 5,
            name: s("Coordinator"),
            user_name: s("Bruno"),
            username: s("bruno"),
            description: s("Runs a house"),
            user_count: Some(3),
            ..Default::default()
        });
        assert_eq!(rec.name, "Coordinator");
        assert_eq!(rec.role, "Coordinator");
        assert_eq!(rec.username, "Bruno");
        assert_eq!(rec.stage, "Runs a house");
        assert_eq!(rec.duration, "3 users");
        assert_eq!(rec.location, "N/A");
    }

    #[test]
    fn test_role_mapping_falls_back_to_username() {
        let rec = TableRecord::from(&RoleDto {
            id: 6,
            username: s("carla"),
            user_count: Some(0),
            ..Default::default()
        });
        assert_eq!(rec.username, "carla");
        assert_eq!(rec.duration, "N/A");
    }

    #[test]
    fn test_location_mapping() {
        let rec = TableRecord::from(&LocationDto {
            id: 7,
            name: s("Casa Recife"),
            city: s("Recife"),
            state: s("PE"),
            coordinator: s("dgo"),
            user_count: Some(12),
            ..Default::default()
        });
        assert_eq!(rec.name, "Casa Recife");
        assert_eq!(rec.location, "Casa Recife");
        assert_eq!(rec.username, "dgo");
        assert_eq!(rec.stage, "Recife, PE");
        assert_eq!(rec.duration, "12 users");
    }

    #[test]
    fn test_stage_mapping_fallbacks() {
        let rec = TableRecord::from(&StageDto {
            id: 8,
            title: s("Postulancy"),
            username: s("ana"),
            stage_name: s("In progress"),
            mission_location_name: s("Olinda"),
            duration: s("6 months"),
            ..Default::default()
        });
        assert_eq!(rec.name, "Postulancy");
        assert_eq!(rec.username, "ana");
        assert_eq!(rec.stage, "In progress");
        assert_eq!(rec.location, "Olinda");
        assert_eq!(rec.duration, "6 months");
        assert_eq!(rec.role, "N/A");
    }

    #[test]
    fn test_to_records_preserves_order() {
        let users = vec![
            UserDto {
                id: 2,
                ..Default::default()
            },
            UserDto {
                id: 1,
                ..Default::default()
            },
        ];
        let rows = to_records(&users);
        assert_eq!(rows.iter().map(|r| r.id).collect::<Vec<_>>(), vec![2, 1]);
    }
}

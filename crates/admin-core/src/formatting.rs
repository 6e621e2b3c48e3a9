/// Placeholder shown wherever a display value is missing.
pub const NOT_AVAILABLE: &str = "N/A";

/// Format time spent in community as a human-readable label.
///
/// * `0` years and `0` months → `"N/A"`
/// * years only → `"1 year"` / `"3 years"`
/// * months only → `"1 month"` / `"5 months"`
/// * both → `"2 years and 1 month"`
///
/// # Examples
///
/// ```
/// use admin_core::formatting::format_community_time;
///
/// assert_eq!(format_community_time(0, 0), "N/A");
/// assert_eq!(format_community_time(2, 1), "2 years and 1 month");
/// assert_eq!(format_community_time(0, 7), "7 months");
/// ```
pub fn format_community_time(years: u32, months: u32) -> String {
    let mut parts = Vec::with_capacity(2);
    if years > 0 {
        parts.push(pluralize(years, "year", "years"));
    }
    if months > 0 {
        parts.push(pluralize(months, "month", "months"));
    }

    if parts.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        parts.join(" and ")
    }
}

/// Format a member count, e.g. `"12 users"`. Zero or unknown → `"N/A"`.
pub fn format_user_count(count: Option<u32>) -> String {
    match count {
        Some(n) if n > 0 => format!("{n} users"),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Join a city and state as `"City, ST"`, dropping whichever part is missing.
///
/// ```
/// use admin_core::formatting::format_city_state;
///
/// assert_eq!(format_city_state(Some("Recife"), Some("PE")), "Recife, PE");
/// assert_eq!(format_city_state(None, Some("PE")), "PE");
/// assert_eq!(format_city_state(None, None), "N/A");
/// ```
pub fn format_city_state(city: Option<&str>, state: Option<&str>) -> String {
    let parts: Vec<&str> = [city, state]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    if parts.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        parts.join(", ")
    }
}

fn pluralize(n: u32, singular: &str, plural: &str) -> String {
    if n == 1 {
        format!("{n} {singular}")
    } else {
        format!("{n} {plural}")
    }
}

//! Text classes highlighting incident properties in the popup.

/// Text class for the incident alert level. Unknown or missing levels get no class.
pub fn alert_level_to_class(alert_level: Option<&str>) -> &'static str {
    match alert_level {
        Some("Emergency Warning") => "danger",
        Some("Watch and Act") => "warning",
        Some("Advice") => "info",
        Some("Not Applicable") => "muted",
        _ => "",
    }
}

/// Text class for the incident status. Unknown or missing statuses get no class.
///
/// Unlike icon selection, statuses here are matched with capitalized `Control`.
pub fn status_to_class(status: Option<&str>) -> &'static str {
    match status {
        Some("Out of Control") => "danger",
        Some("Being Controlled") => "warning",
        Some("Under Control") => "info",
        _ => "",
    }
}

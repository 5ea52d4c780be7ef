use chrono::{DateTime, Local, NaiveDateTime};

const DISPLAY_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

/// Renders a server timestamp in local time.
///
/// RFC 3339 values are converted to the local zone, naive ISO-8601 values are
/// already local and only reformatted. Anything else is shown verbatim.
pub fn display_timestamp(raw: &str) -> String {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.with_timezone(&Local).format(DISPLAY_FORMAT).to_string();
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return parsed.format(DISPLAY_FORMAT).to_string();
    }
    raw.to_string()
}

/// `%42.6` style percentage with one decimal; an absent rate shows `%0`.
pub fn display_rate(rate: Option<f64>) -> String {
    match rate {
        Some(rate) => format!("%{rate:.1}"),
        None => "%0".to_string(),
    }
}

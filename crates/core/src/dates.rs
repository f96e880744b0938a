//! Timestamp display

use jiff::{Timestamp, tz::TimeZone};

/// Display form of a timestamp split into date and time parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayTimestamp {
    /// e.g. `01 March 2025`.
    pub date: String,

    /// e.g. `15:30`.
    pub time: String,
}

impl DisplayTimestamp {
    fn unavailable() -> Self {
        Self {
            date: "N/A".to_string(),
            time: String::new(),
        }
    }
}

/// Render an RFC 3339 timestamp in the given zone. Absent or unparsable input renders as
/// `N/A` with an empty time.
pub fn format_timestamp(raw: Option<&str>, zone: &TimeZone) -> DisplayTimestamp {
    let Some(timestamp) = raw.and_then(|raw| raw.parse::<Timestamp>().ok()) else {
        return DisplayTimestamp::unavailable();
    };

    let zoned = timestamp.to_zoned(zone.clone());

    DisplayTimestamp {
        date: zoned.strftime("%d %B %Y").to_string(),
        time: zoned.strftime("%H:%M").to_string(),
    }
}

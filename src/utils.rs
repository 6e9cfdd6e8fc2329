use chrono::{DateTime, Utc};
use chrono_tz::Europe::Brussels;

/// Station-local rendering of an attempt timestamp, used by the archive
/// table and the CSV export. Storage stays UTC.
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Brussels)
        .format("%d/%m/%Y %H:%M:%S")
        .to_string()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn formats_in_station_time_winter() {
        let instant = Utc.with_ymd_and_hms(2026, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(format_timestamp(instant), "15/01/2026 11:30:00");
    }

    #[test]
    fn formats_in_station_time_summer() {
        let instant = Utc.with_ymd_and_hms(2026, 8, 25, 12, 0, 5).unwrap();
        assert_eq!(format_timestamp(instant), "25/08/2026 14:00:05");
    }
}

use chrono::{DateTime, Utc};
use std::time::{SystemTime, UNIX_EPOCH};

pub type EpochMillis = u64;

pub fn now_epoch_millis() -> EpochMillis {
    let duration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    duration.as_millis() as EpochMillis
}

fn datetime(millis: EpochMillis) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis as i64).unwrap_or_default()
}

/// Report timestamps on the wire, e.g. `2026-08-23 14:05:09`.
pub fn report_timestamp(millis: EpochMillis) -> String {
    datetime(millis).format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Message timestamps on the wire, e.g. `2026-08-23T14:05:09Z`.
pub fn message_timestamp(millis: EpochMillis) -> String {
    datetime(millis).format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_timestamp_is_fixed_format() {
        assert_eq!(report_timestamp(0), "1970-01-01 00:00:00");
        assert_eq!(report_timestamp(1_700_000_000_000), "2023-11-14 22:13:20");
    }

    #[test]
    fn message_timestamp_is_iso_with_zulu() {
        assert_eq!(message_timestamp(0), "1970-01-01T00:00:00Z");
    }
}

//! Fixed-timezone clock.
//! All timestamps in the system are IST wall-clock time, stored naive and
//! serialized with a trailing `Z`.

use chrono::{FixedOffset, NaiveDateTime, Utc};

/// IST offset from UTC: +05:30.
const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

fn ist_offset() -> FixedOffset {
    FixedOffset::east_opt(IST_OFFSET_SECS).expect("IST offset is in range")
}

/// Current IST time as a naive wall-clock value.
pub fn now() -> NaiveDateTime {
    Utc::now().with_timezone(&ist_offset()).naive_local()
}

/// Formats a timestamp as `YYYY-MM-DDTHH:MM:SSZ`.
pub fn format_timestamp(ts: NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

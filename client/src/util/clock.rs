//! Wall-clock access that works in the browser and in native tests.

#[cfg(test)]
#[path = "clock_test.rs"]
mod clock_test;

use access::format::iso_date;
use time::OffsetDateTime;

/// Current UTC time.
pub fn now_utc() -> OffsetDateTime {
    #[cfg(feature = "csr")]
    {
        #[allow(clippy::cast_possible_truncation)]
        let millis = js_sys::Date::now() as i128;
        OffsetDateTime::from_unix_timestamp_nanos(millis * 1_000_000).unwrap_or(OffsetDateTime::UNIX_EPOCH)
    }
    #[cfg(not(feature = "csr"))]
    {
        OffsetDateTime::now_utc()
    }
}

/// Today's date as `YYYY-MM-DD`, the value format of a date input.
pub fn today_iso() -> String {
    iso_date(now_utc().date())
}

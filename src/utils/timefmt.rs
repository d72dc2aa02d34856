use chrono::{DateTime, Utc};

/// Minutes since midnight from a clock string.
/// Accepts both "HH:mm" and the dot-delimited "HH.mm" some rows carry.
pub fn minute_of_day(text: &str) -> Option<u32> {
    let t = text.trim();
    let (h, m) = t.split_once(':').or_else(|| t.split_once('.'))?;
    let h: u32 = h.trim().parse().ok()?;
    let m: u32 = m.trim().parse().ok()?;
    if h > 23 || m > 59 {
        return None;
    }
    Some(h * 60 + m)
}

/// UTC calendar date ("YYYY-MM-DD") of an ISO timestamp.
/// Unparsable values fall back to their first ten characters so the row
/// still lands somewhere visible instead of being dropped.
pub fn utc_date_of(iso: &str) -> String {
    match DateTime::parse_from_rfc3339(iso.trim()) {
        Ok(dt) => dt.with_timezone(&Utc).format("%Y-%m-%d").to_string(),
        Err(_) => iso.trim().chars().take(10).collect(),
    }
}

/// UTC clock time ("HH:MM", minute precision) of an ISO timestamp.
/// Empty when the timestamp does not parse.
pub fn utc_time_of(iso: &str) -> String {
    match DateTime::parse_from_rfc3339(iso.trim()) {
        Ok(dt) => dt.with_timezone(&Utc).format("%H:%M").to_string(),
        Err(_) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colon_and_dot_forms_parse_alike() {
        assert_eq!(minute_of_day("09:30"), Some(570));
        assert_eq!(minute_of_day("09.30"), Some(570));
        assert_eq!(minute_of_day(" 9:05 "), Some(545));
    }

    #[test]
    fn bad_clock_strings_yield_none() {
        assert_eq!(minute_of_day(""), None);
        assert_eq!(minute_of_day("0930"), None);
        assert_eq!(minute_of_day("25:00"), None);
        assert_eq!(minute_of_day("10:75"), None);
        assert_eq!(minute_of_day("late"), None);
    }

    #[test]
    fn iso_timestamp_splits_into_utc_date_and_minute() {
        assert_eq!(utc_date_of("2025-06-16T03:00:00Z"), "2025-06-16");
        assert_eq!(utc_time_of("2025-06-16T03:00:00Z"), "03:00");
        // offset timestamps normalize to the UTC calendar date
        assert_eq!(utc_date_of("2025-06-17T01:30:00+07:00"), "2025-06-16");
        assert_eq!(utc_time_of("2025-06-17T01:30:00+07:00"), "18:30");
    }

    #[test]
    fn unparsable_timestamp_degrades_gracefully() {
        assert_eq!(utc_date_of("2025-06-16 morning"), "2025-06-16");
        assert_eq!(utc_time_of("2025-06-16 morning"), "");
    }
}

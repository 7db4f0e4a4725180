use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Best-effort parse of a timestamp string against an ordered format list.
/// The first successful format wins, so day-first patterns placed before ISO
/// resolve ambiguous strings day-first. Returns `None` for empty or
/// unrecognized input; unparsable dates are expected and never an error.
/// All results are naive local time.
pub fn parse_date(text: &str, formats: &[String]) -> Option<NaiveDateTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    for fmt in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(dt);
        }
        // Date-only patterns carry no time fields; retry as a bare date at midnight.
        if let Ok(d) = NaiveDate::parse_from_str(text, fmt) {
            return Some(d.and_time(NaiveTime::MIN));
        }
    }
    None
}

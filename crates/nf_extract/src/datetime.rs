//! Publish-timestamp assembly.
//!
//! Listing pages carry a bare time of day ("14:30"), detail pages a date
//! written out in words ("28 августа 2026") or numerically ("28.08.2026").
//! A stub only gets a timestamp once both halves are present; the merged
//! local datetime is interpreted in the source's publishing timezone and
//! normalised to UTC.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Utc};
use nf_core::{Error, Result};

const MONTHS: [&str; 12] = [
    "января",
    "февраля",
    "марта",
    "апреля",
    "мая",
    "июня",
    "июля",
    "августа",
    "сентября",
    "октября",
    "ноября",
    "декабря",
];

/// Parses the time-of-day fragment from a listing page, e.g. "14:30".
pub fn parse_listing_time(text: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(text.trim(), "%H:%M").ok()
}

/// Parses a detail-page date. Accepts "28.08.2026" and the written form
/// "28 августа 2026" (with or without a trailing "г.").
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    let text = text.trim().trim_end_matches("г.").trim();

    if let Ok(date) = NaiveDate::parse_from_str(text, "%d.%m.%Y") {
        return Ok(date);
    }

    let parts: Vec<&str> = text.split_whitespace().collect();
    if let [day, month, year] = parts[..] {
        let day: u32 = day
            .parse()
            .map_err(|_| Error::Parse(format!("bad day in date: {text}")))?;
        let month = MONTHS
            .iter()
            .position(|m| m.eq_ignore_ascii_case(month) || *m == month.to_lowercase())
            .ok_or_else(|| Error::Parse(format!("unknown month in date: {text}")))?;
        let year: i32 = year
            .parse()
            .map_err(|_| Error::Parse(format!("bad year in date: {text}")))?;
        return NaiveDate::from_ymd_opt(year, month as u32 + 1, day)
            .ok_or_else(|| Error::Parse(format!("date out of range: {text}")));
    }

    Err(Error::Parse(format!("unrecognised date: {text}")))
}

/// Combines a date and a time into one UTC instant, reading the pair as
/// local time at the given fixed offset (hours east of UTC).
pub fn merge(date: NaiveDate, time: NaiveTime, offset_hours: i32) -> Result<DateTime<Utc>> {
    let offset = FixedOffset::east_opt(offset_hours * 3600)
        .ok_or_else(|| Error::Parse(format!("invalid UTC offset: {offset_hours}")))?;
    date.and_time(time)
        .and_local_timezone(offset)
        .single()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| Error::Parse(format!("ambiguous local time: {date} {time}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_parse_listing_time() {
        assert_eq!(
            parse_listing_time(" 14:30 "),
            NaiveTime::from_hms_opt(14, 30, 0)
        );
        assert_eq!(parse_listing_time("вчера"), None);
    }

    #[test]
    fn test_parse_numeric_date() {
        assert_eq!(
            parse_date("28.08.2026").unwrap(),
            NaiveDate::from_ymd_opt(2026, 8, 28).unwrap()
        );
    }

    #[test]
    fn test_parse_written_date() {
        assert_eq!(
            parse_date("28 августа 2026").unwrap(),
            NaiveDate::from_ymd_opt(2026, 8, 28).unwrap()
        );
        assert_eq!(
            parse_date("1 января 2026 г.").unwrap(),
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
        );
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert!(parse_date("yesterday").is_err());
        assert!(parse_date("28 smarch 2026").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn test_merge_converts_to_utc() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 28).unwrap();
        let time = NaiveTime::from_hms_opt(14, 30, 0).unwrap();
        let merged = merge(date, time, 6).unwrap();
        assert_eq!(merged.hour(), 8);
        assert_eq!(merged.minute(), 30);
    }

    #[test]
    fn test_merge_rejects_absurd_offset() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 28).unwrap();
        let time = NaiveTime::from_hms_opt(0, 0, 0).unwrap();
        assert!(merge(date, time, 99).is_err());
    }
}

//! Date coercion and moment-style date patterns.
//!
//! Patterns use the token set of the moment.js family, which is what the
//! localized `Core$MomentFull*` strings are written in:
//!
//! | Token | Output |
//! |-------|--------|
//! | `YYYY` / `YY` | `2024` / `24` |
//! | `M` `MM` `MMM` `MMMM` | `1` `01` `Jan` `January` |
//! | `D` `DD` `Do` | `5` `05` `5th` |
//! | `DDD` `DDDD` | day of year `9` `009` |
//! | `d` `dd` `ddd` `dddd` | `1` `Mo` `Mon` `Monday` |
//! | `H` `HH` / `h` `hh` | 24-hour / 12-hour |
//! | `m` `mm` `s` `ss` | minutes, seconds |
//! | `S`..`SSS` | fraction of a second |
//! | `A` / `a` | `PM` / `pm` |
//! | `[text]` | literal `text` |
//!
//! Anything else is copied through.

use chrono::DateTime;
use chrono::Datelike;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::Timelike;

use crate::model::Value;

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Reads a raw value as a point in time.
///
/// Accepts dates, timestamps (taken in UTC), ISO-8601 / RFC 3339 strings,
/// `M/D/YYYY` strings and numbers as epoch milliseconds. Returns `None` for
/// anything else.
pub fn coerce_datetime(raw: &Value) -> Option<NaiveDateTime> {
    match raw {
        Value::Date(d) => d.and_hms_opt(0, 0, 0),
        Value::DateTime(dt) => Some(dt.naive_utc()),
        Value::String(s) => parse_datetime_str(s),
        Value::Json(serde_json::Value::String(s)) => parse_datetime_str(s),
        Value::Int(_) | Value::Long(_) | Value::Float(_) | Value::Decimal(_) => {
            let millis = raw.as_f64()?;
            if !millis.is_finite() {
                return None;
            }
            DateTime::from_timestamp_millis(millis as i64).map(|dt| dt.naive_utc())
        }
        _ => None,
    }
}

fn parse_datetime_str(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    for layout in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, layout) {
            return Some(dt);
        }
    }
    for layout in ["%Y-%m-%d", "%m/%d/%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, layout) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    None
}

/// Formats a point in time with a moment-style pattern.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use findpick_lib::schema::format_pattern;
///
/// let dt = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap().and_hms_opt(14, 5, 0).unwrap();
/// assert_eq!(format_pattern(&dt, "M/D/YYYY hh:mm A"), "1/15/2024 02:05 PM");
/// ```
pub fn format_pattern(dt: &NaiveDateTime, pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];

        if ch == '[' {
            match chars[i + 1..].iter().position(|&c| c == ']') {
                Some(end) => {
                    out.extend(&chars[i + 1..i + 1 + end]);
                    i += end + 2;
                }
                None => {
                    out.extend(&chars[i..]);
                    i = chars.len();
                }
            }
            continue;
        }

        let run = chars[i..].iter().take_while(|&&c| c == ch).count();

        // Ordinal day: `Do`
        if ch == 'D' && run == 1 && chars.get(i + 1) == Some(&'o') {
            out.push_str(&ordinal(dt.day()));
            i += 2;
            continue;
        }

        let taken = match token(dt, ch, run) {
            Some((text, len)) => {
                out.push_str(&text);
                len
            }
            None => {
                out.push(ch);
                1
            }
        };
        i += taken;
    }

    out
}

/// Formats the longest supported token of `ch` that fits in `run` characters.
fn token(dt: &NaiveDateTime, ch: char, run: usize) -> Option<(String, usize)> {
    let hour12 = match dt.hour() % 12 {
        0 => 12,
        h => h,
    };

    let (text, len) = match (ch, run) {
        ('Y', 4..) => (format!("{:04}", dt.year()), 4),
        ('Y', 2..=3) => (format!("{:02}", dt.year().rem_euclid(100)), 2),
        ('Y', 1) => (dt.year().to_string(), 1),

        ('M', 4..) => (MONTHS[dt.month0() as usize].to_string(), 4),
        ('M', 3) => (MONTHS[dt.month0() as usize][..3].to_string(), 3),
        ('M', 2) => (format!("{:02}", dt.month()), 2),
        ('M', 1) => (dt.month().to_string(), 1),

        ('D', 4..) => (format!("{:03}", dt.ordinal()), 4),
        ('D', 3) => (dt.ordinal().to_string(), 3),
        ('D', 2) => (format!("{:02}", dt.day()), 2),
        ('D', 1) => (dt.day().to_string(), 1),

        ('d', 4..) => (weekday(dt).to_string(), 4),
        ('d', 3) => (weekday(dt)[..3].to_string(), 3),
        ('d', 2) => (weekday(dt)[..2].to_string(), 2),
        ('d', 1) => (dt.weekday().num_days_from_sunday().to_string(), 1),

        ('H', 2..) => (format!("{:02}", dt.hour()), 2),
        ('H', 1) => (dt.hour().to_string(), 1),
        ('h', 2..) => (format!("{:02}", hour12), 2),
        ('h', 1) => (hour12.to_string(), 1),

        ('m', 2..) => (format!("{:02}", dt.minute()), 2),
        ('m', 1) => (dt.minute().to_string(), 1),
        ('s', 2..) => (format!("{:02}", dt.second()), 2),
        ('s', 1) => (dt.second().to_string(), 1),

        ('S', n) => {
            let digits = n.min(9);
            let nanos = format!("{:09}", dt.nanosecond() % 1_000_000_000);
            (nanos[..digits].to_string(), digits)
        }

        ('A', _) => (if dt.hour() < 12 { "AM" } else { "PM" }.to_string(), 1),
        ('a', _) => (if dt.hour() < 12 { "am" } else { "pm" }.to_string(), 1),

        _ => return None,
    };

    Some((text, len))
}

fn weekday(dt: &NaiveDateTime) -> &'static str {
    WEEKDAYS[dt.weekday().num_days_from_sunday() as usize]
}

fn ordinal(day: u32) -> String {
    let suffix = match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{day}{suffix}")
}

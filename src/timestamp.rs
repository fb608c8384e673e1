use chrono::{Duration, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serialize;

/// Local calendar date and time with minute precision. No timezone is attached.
pub type WallClock = NaiveDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Precision {
    Seconds,
    Minutes,
    Date,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTimestamp {
    /// `YYYY-MM-DD HH:MM` or `YYYY-MM-DD`
    pub display_date: String,
    pub instant: WallClock,
    pub precision: Precision,
}

impl ParsedTimestamp {
    pub fn date(&self) -> NaiveDate {
        self.instant.date()
    }

    pub fn has_time(&self) -> bool {
        self.precision != Precision::Date
    }
}

static RE_SECONDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]{4})/([0-9]{1,2})/([0-9]{1,2})\s+([0-9]{1,2}):([0-9]{1,2}):([0-9]{1,2})").unwrap()
});

static RE_MINUTES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]{4})/([0-9]{1,2})/([0-9]{1,2})\s+([0-9]{1,2}):([0-9]{1,2})").unwrap()
});

static RE_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]{4})/([0-9]{1,2})/([0-9]{1,2})").unwrap()
});

/// Parse a `YYYY/M/D[ H:MM[:SS]]` string, most precise shape first.
///
/// The first shape that matches wins. The display keeps the matched fields zero-padded as
/// written; fields past their range (hour 25, 30 February) carry into the next unit of the
/// instant, so `2026/2/30` sits on 2 March.
pub fn parse(raw: &str) -> Option<ParsedTimestamp> {
    if let Some(caps) = RE_SECONDS.captures(raw) {
        return with_time(&caps, Precision::Seconds);
    }
    if let Some(caps) = RE_MINUTES.captures(raw) {
        return with_time(&caps, Precision::Minutes);
    }
    let caps = RE_DATE.captures(raw)?;
    Some(ParsedTimestamp {
        display_date: format!("{}-{}-{}", &caps[1], pad(&caps[2]), pad(&caps[3])),
        instant: rolled(field(&caps, 1)?, field(&caps, 2)?, field(&caps, 3)?, 0, 0)?,
        precision: Precision::Date,
    })
}

fn with_time(caps: &Captures<'_>, precision: Precision) -> Option<ParsedTimestamp> {
    // seconds are matched but never carried into the instant
    let instant = rolled(
        field(caps, 1)?,
        field(caps, 2)?,
        field(caps, 3)?,
        field(caps, 4)?,
        field(caps, 5)?,
    )?;
    Some(ParsedTimestamp {
        display_date: format!(
            "{}-{}-{} {}:{}",
            &caps[1],
            pad(&caps[2]),
            pad(&caps[3]),
            pad(&caps[4]),
            pad(&caps[5])
        ),
        instant,
        precision,
    })
}

/// Calendar fields to a wall clock, carrying overflow (and month or day 0) into the
/// neighbouring unit. Two-digit years land in the 1900s.
fn rolled(year: i64, month: i64, day: i64, hour: i64, minute: i64) -> Option<WallClock> {
    let year = if (0..=99).contains(&year) { year + 1900 } else { year };
    let months = year * 12 + month - 1;
    let first = NaiveDate::from_ymd_opt(
        i32::try_from(months.div_euclid(12)).ok()?,
        u32::try_from(months.rem_euclid(12) + 1).ok()?,
        1,
    )?;
    let offset = Duration::days(day - 1) + Duration::hours(hour) + Duration::minutes(minute);
    first.and_hms_opt(0, 0, 0)?.checked_add_signed(offset)
}

fn pad(digits: &str) -> String {
    format!("{digits:0>2}")
}

fn field(caps: &Captures<'_>, idx: usize) -> Option<i64> {
    caps.get(idx)?.as_str().parse().ok()
}

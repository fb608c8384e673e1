use crate::record::CanonicalEntry;
use crate::timestamp::WallClock;
use chrono::{Datelike, Days, Local, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    #[default]
    All,
    Today,
    Week,
    Month,
    Year,
}

impl TimeWindow {
    pub const ALL: [TimeWindow; 5] =
        [TimeWindow::All, TimeWindow::Today, TimeWindow::Week, TimeWindow::Month, TimeWindow::Year];

    pub fn as_str(self) -> &'static str {
        match self {
            TimeWindow::All => "all",
            TimeWindow::Today => "today",
            TimeWindow::Week => "week",
            TimeWindow::Month => "month",
            TimeWindow::Year => "year",
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown time window: {0} (expected all|today|week|month|year)")]
pub struct UnknownWindow(pub String);

impl FromStr for TimeWindow {
    type Err = UnknownWindow;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" | "" => Ok(TimeWindow::All),
            "today" | "day" => Ok(TimeWindow::Today),
            "week" => Ok(TimeWindow::Week),
            "month" => Ok(TimeWindow::Month),
            "year" => Ok(TimeWindow::Year),
            _ => Err(UnknownWindow(s.to_string())),
        }
    }
}

/// Lower bounds of every window, anchored at midnight of one reference day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowBounds {
    pub today: NaiveDate,
    pub week_start: WallClock,
    pub month_start: WallClock,
    pub year_start: WallClock,
}

impl WindowBounds {
    pub fn at(today: NaiveDate) -> Self {
        Self {
            today,
            week_start: midnight(today.checked_sub_days(Days::new(7)).unwrap_or(NaiveDate::MIN)),
            month_start: midnight(months_back(today, 1)),
            year_start: midnight(months_back(today, 12)),
        }
    }

    pub fn now() -> Self {
        Self::at(local_today())
    }

    /// `today` is an exact calendar-day match; the other windows are `>=` their bound.
    pub fn contains(&self, window: TimeWindow, instant: Option<WallClock>) -> bool {
        if window == TimeWindow::All { return true; }
        let Some(t) = instant else { return false; };
        match window {
            TimeWindow::All => true,
            TimeWindow::Today => t.date() == self.today,
            TimeWindow::Week => t >= self.week_start,
            TimeWindow::Month => t >= self.month_start,
            TimeWindow::Year => t >= self.year_start,
        }
    }
}

pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

fn midnight(d: NaiveDate) -> WallClock {
    d.and_time(NaiveTime::default())
}

/// Step back `n` months keeping the day of month; an overflowing day rolls into the
/// following month (31 March minus one month is 3 March, or 2 March in a leap year).
pub fn months_back(date: NaiveDate, n: u32) -> NaiveDate {
    let total = date.year() * 12 + date.month0() as i32 - n as i32;
    let (y, m0) = (total.div_euclid(12), total.rem_euclid(12) as u32);
    NaiveDate::from_ymd_opt(y, m0 + 1, 1)
        .and_then(|first| first.checked_add_days(Days::new(u64::from(date.day() - 1))))
        .unwrap_or(NaiveDate::MIN)
}

pub fn filter_by_window(entries: &[CanonicalEntry], window: TimeWindow) -> Vec<CanonicalEntry> {
    filter_by_window_at(entries, window, local_today())
}

/// Window filter judged against a fixed reference day.
pub fn filter_by_window_at(
    entries: &[CanonicalEntry],
    window: TimeWindow,
    today: NaiveDate,
) -> Vec<CanonicalEntry> {
    let bounds = WindowBounds::at(today);
    entries
        .iter()
        .filter(|e| bounds.contains(window, e.instant))
        .cloned()
        .collect()
}

/// Exact, case-sensitive type match; `"all"` or an empty label keeps everything.
pub fn filter_by_type(entries: &[CanonicalEntry], entry_type: &str) -> Vec<CanonicalEntry> {
    if entry_type.is_empty() || entry_type == "all" {
        return entries.to_vec();
    }
    entries.iter().filter(|e| e.entry_type == entry_type).cloned().collect()
}

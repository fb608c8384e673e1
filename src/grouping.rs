use crate::record::CanonicalEntry;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateBucket {
    /// `YYYY-MM-DD`
    pub date: String,
    pub entries: Vec<CanonicalEntry>,
}

/// Buckets newest day first; inside a day, latest `HH:MM` first and date-only
/// entries (empty time) last. Equal times keep input order.
pub fn group_by_date(entries: &[CanonicalEntry]) -> Vec<DateBucket> {
    let mut by_day: BTreeMap<String, Vec<CanonicalEntry>> = BTreeMap::new();
    for e in entries {
        by_day.entry(e.date_key().to_string()).or_default().push(e.clone());
    }
    by_day
        .into_iter()
        .rev()
        .map(|(date, mut entries)| {
            entries.sort_by(|a, b| b.time_key().cmp(a.time_key()));
            DateBucket { date, entries }
        })
        .collect()
}

/// Look up one day's entries in grouped output.
pub fn bucket_for<'a>(groups: &'a [DateBucket], date: &str) -> Option<&'a DateBucket> {
    groups.iter().find(|b| b.date == date)
}

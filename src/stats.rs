use crate::filter::{local_today, TimeWindow, WindowBounds};
use crate::record::CanonicalEntry;
use crate::style::StyleTable;
use ahash::AHashMap;
use chrono::NaiveDate;
use serde::Serialize;

/// Label used when an entry reaches aggregation without a type.
pub const UNCATEGORIZED: &str = "未分类";

/// Overlapping counts: one entry may land in every bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WindowCounts {
    pub day: usize,
    pub week: usize,
    pub month: usize,
    pub year: usize,
}

impl WindowCounts {
    pub fn get(&self, window: TimeWindow) -> Option<usize> {
        match window {
            TimeWindow::All => None,
            TimeWindow::Today => Some(self.day),
            TimeWindow::Week => Some(self.week),
            TimeWindow::Month => Some(self.month),
            TimeWindow::Year => Some(self.year),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeStat {
    #[serde(rename = "type")]
    pub entry_type: String,
    pub count: usize,
    /// One decimal place, e.g. `"75.0"`.
    pub percentage: String,
    pub color: String,
    pub icon: String,
}

pub fn compute_window_counts(entries: &[CanonicalEntry]) -> WindowCounts {
    compute_window_counts_at(entries, local_today())
}

pub fn compute_window_counts_at(entries: &[CanonicalEntry], today: NaiveDate) -> WindowCounts {
    let bounds = WindowBounds::at(today);
    let mut counts = WindowCounts::default();
    for e in entries {
        if bounds.contains(TimeWindow::Today, e.instant) { counts.day += 1; }
        if bounds.contains(TimeWindow::Week, e.instant) { counts.week += 1; }
        if bounds.contains(TimeWindow::Month, e.instant) { counts.month += 1; }
        if bounds.contains(TimeWindow::Year, e.instant) { counts.year += 1; }
    }
    counts
}

pub fn compute_type_distribution(entries: &[CanonicalEntry]) -> Vec<TypeStat> {
    compute_type_distribution_with(entries, &StyleTable::default())
}

/// Counts per type, sorted by count descending. Ties keep first-seen order.
pub fn compute_type_distribution_with(entries: &[CanonicalEntry], styles: &StyleTable) -> Vec<TypeStat> {
    let mut order: Vec<(&str, usize)> = Vec::new();
    let mut index: AHashMap<&str, usize> = AHashMap::new();
    for e in entries {
        let t = if e.entry_type.trim().is_empty() { UNCATEGORIZED } else { e.entry_type.as_str() };
        match index.get(t).copied() {
            Some(i) => order[i].1 += 1,
            None => {
                index.insert(t, order.len());
                order.push((t, 1));
            }
        }
    }
    // stable: equal counts stay in encounter order
    order.sort_by(|a, b| b.1.cmp(&a.1));

    let total = entries.len();
    order
        .into_iter()
        .map(|(t, count)| {
            let style = styles.style_for(t);
            TypeStat {
                entry_type: t.to_string(),
                count,
                percentage: percentage_label(count, total),
                color: style.color,
                icon: style.icon,
            }
        })
        .collect()
}

/// `count / total * 100` rounded half away from zero to one decimal.
pub fn percentage_label(count: usize, total: usize) -> String {
    if total == 0 { return "0.0".to_string(); }
    let pct = count as f64 / total as f64 * 100.0;
    format!("{:.1}", (pct * 10.0).round() / 10.0)
}

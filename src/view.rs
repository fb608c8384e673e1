use crate::chart::{self, BarHeight, PieSlice};
use crate::filter::{self, TimeWindow};
use crate::grouping::{self, DateBucket};
use crate::record::CanonicalEntry;
use crate::stats::{self, TypeStat, WindowCounts};
use crate::style::StyleTable;
use chrono::NaiveDate;
use itertools::Itertools;
use serde::Serialize;

/// Which slice of the loaded entries the presentation wants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewRequest {
    pub window: TimeWindow,
    pub type_filter: String,
}

impl Default for ViewRequest {
    fn default() -> Self {
        Self { window: TimeWindow::All, type_filter: "all".to_string() }
    }
}

/// Everything one render of the timeline and stats panel needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub request: ViewRequest,
    pub today: NaiveDate,
    /// Size of the filtered set.
    pub total: usize,
    pub window_counts: WindowCounts,
    pub distribution: Vec<TypeStat>,
    pub pie: Vec<PieSlice>,
    pub bars: Vec<BarHeight>,
    pub groups: Vec<DateBucket>,
    pub type_vocabulary: Vec<String>,
    pub entries: Vec<CanonicalEntry>,
}

impl Snapshot {
    pub fn build(entries: &[CanonicalEntry], request: &ViewRequest, today: NaiveDate) -> Self {
        Self::build_with(entries, request, today, &StyleTable::default())
    }

    pub fn build_with(
        entries: &[CanonicalEntry],
        request: &ViewRequest,
        today: NaiveDate,
        styles: &StyleTable,
    ) -> Self {
        let windowed = filter::filter_by_window_at(entries, request.window, today);
        let filtered = filter::filter_by_type(&windowed, &request.type_filter);

        let distribution = stats::compute_type_distribution_with(&filtered, styles);
        Self {
            request: request.clone(),
            today,
            total: filtered.len(),
            window_counts: stats::compute_window_counts_at(&filtered, today),
            pie: chart::to_pie_slices(&distribution),
            bars: chart::to_bar_heights(&distribution),
            groups: grouping::group_by_date(&filtered),
            type_vocabulary: type_vocabulary(entries),
            distribution,
            entries: filtered,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// Distinct type labels of the unfiltered set, ascending.
pub fn type_vocabulary(entries: &[CanonicalEntry]) -> Vec<String> {
    entries.iter().map(|e| e.entry_type.clone()).unique().sorted().collect()
}

/// Footer label for how long ago the data was refreshed.
pub fn format_time_since(elapsed_secs: i64) -> String {
    let s = elapsed_secs.max(0);
    match s {
        0..=9 => "刚刚".to_string(),
        10..=59 => format!("{s}秒前"),
        60..=3599 => format!("{}分钟前", s / 60),
        3600..=86_399 => format!("{}小时前", s / 3600),
        _ => format!("{}天前", s / 86_400),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_since_buckets() {
        assert_eq!(format_time_since(3), "刚刚");
        assert_eq!(format_time_since(-5), "刚刚");
        assert_eq!(format_time_since(42), "42秒前");
        assert_eq!(format_time_since(125), "2分钟前");
        assert_eq!(format_time_since(7200), "2小时前");
        assert_eq!(format_time_since(3 * 86_400 + 5), "3天前");
    }
}

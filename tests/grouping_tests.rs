use lifelog::grouping::{bucket_for, group_by_date};
use lifelog::record::{RawRow, RecordBuilder};

#[test]
fn buckets_newest_day_first_and_latest_time_first() {
    let rows = vec![
        RawRow::new("morning", "x", "2026/2/4 9:00", "t"),
        RawRow::new("evening", "x", "2026/2/4 18:00", "t"),
        RawRow::new("yesterday", "x", "2026/2/3 10:00", "t"),
    ];
    let groups = group_by_date(&RecordBuilder::new().build_all(&rows));
    let dates: Vec<&str> = groups.iter().map(|b| b.date.as_str()).collect();
    assert_eq!(dates, vec!["2026-02-04", "2026-02-03"]);
    let day: Vec<&str> = groups[0].entries.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(day, vec!["evening", "morning"]);
    assert_eq!(groups[1].entries[0].id, "yesterday");
}

#[test]
fn date_only_entries_sort_last_within_day() {
    let rows = vec![
        RawRow::new("dated", "x", "2026/2/4", "t"),
        RawRow::new("early", "x", "2026/2/4 0:01", "t"),
        RawRow::new("late", "x", "2026/2/4 23:00", "t"),
    ];
    let groups = group_by_date(&RecordBuilder::new().build_all(&rows));
    let day: Vec<&str> = groups[0].entries.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(day, vec!["late", "early", "dated"]);
}

#[test]
fn equal_times_keep_input_order() {
    let rows = vec![
        RawRow::new("first", "x", "2026/2/4 9:00", "t"),
        RawRow::new("second", "x", "2026/2/4 9:00:59", "t"),
    ];
    let groups = group_by_date(&RecordBuilder::new().build_all(&rows));
    let day: Vec<&str> = groups[0].entries.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(day, vec!["first", "second"]);
}

#[test]
fn lookup_and_empty_input() {
    assert!(group_by_date(&[]).is_empty());
    let rows = vec![RawRow::new("a", "x", "2025/12/31 9:00", "t")];
    let groups = group_by_date(&RecordBuilder::new().build_all(&rows));
    assert!(bucket_for(&groups, "2025-12-31").is_some());
    assert!(bucket_for(&groups, "2026-01-01").is_none());
}

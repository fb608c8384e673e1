use crate::{normalize, timestamp};
use crate::timestamp::{Precision, WallClock};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// Type label given to rows whose type attribute is blank.
pub const DEFAULT_TYPE: &str = "记录";

/// One row as returned by the document store query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    pub id: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub updated: Option<String>,
    #[serde(default, alias = "lifelogCreated")]
    pub lifelog_created: Option<String>,
    #[serde(default, alias = "lifelogType")]
    pub lifelog_type: Option<String>,
}

impl RawRow {
    pub fn new(id: &str, content: &str, lifelog_created: &str, lifelog_type: &str) -> Self {
        Self {
            id: id.to_string(),
            content: content.to_string(),
            lifelog_created: Some(lifelog_created.to_string()),
            lifelog_type: Some(lifelog_type.to_string()),
            ..Default::default()
        }
    }

    /// Both lifelog attributes are present.
    pub fn is_eligible(&self) -> bool {
        self.lifelog_created.is_some() && self.lifelog_type.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CanonicalEntry {
    pub id: String,
    pub content: String,
    #[serde(rename = "type")]
    pub entry_type: String,
    pub display_date: String,
    pub instant: Option<WallClock>,
    pub precision: Precision,
    pub raw_timestamp: String,
    pub raw_content: String,
}

impl CanonicalEntry {
    pub fn date(&self) -> Option<NaiveDate> {
        self.instant.map(|t| t.date())
    }

    /// `YYYY-MM-DD` part of the display date.
    pub fn date_key(&self) -> &str {
        self.display_date.split(' ').next().unwrap_or("")
    }

    /// `HH:MM` part of the display date, empty for date-only entries.
    pub fn time_key(&self) -> &str {
        self.display_date.split_once(' ').map(|(_, t)| t).unwrap_or("")
    }
}

/// Builds entries for one load cycle and collects the type labels it meets.
#[derive(Debug, Default)]
pub struct RecordBuilder {
    discovered_types: BTreeSet<String>,
}

impl RecordBuilder {
    pub fn new() -> Self { Self::default() }

    /// `None` when the row has no parseable timestamp.
    pub fn build(&mut self, row: &RawRow) -> Option<CanonicalEntry> {
        let raw_ts = row.lifelog_created.as_deref().unwrap_or("");
        let Some(ts) = timestamp::parse(raw_ts) else {
            debug!(id = %row.id, raw = raw_ts, "dropping row with unparseable timestamp");
            return None;
        };
        let entry_type = match row.lifelog_type.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => DEFAULT_TYPE.to_string(),
        };
        self.discovered_types.insert(entry_type.clone());
        Some(CanonicalEntry {
            id: row.id.clone(),
            content: normalize::normalize(&row.content),
            entry_type,
            display_date: ts.display_date,
            instant: Some(ts.instant),
            precision: ts.precision,
            raw_timestamp: raw_ts.to_string(),
            raw_content: row.content.clone(),
        })
    }

    /// Build every row in order, dropping rows without a timestamp or usable content.
    pub fn build_all<'a, I>(&mut self, rows: I) -> Vec<CanonicalEntry>
    where
        I: IntoIterator<Item = &'a RawRow>,
    {
        rows.into_iter()
            .filter_map(|row| self.build(row))
            .filter(|e| {
                let keep = !e.content.trim().is_empty();
                if !keep { debug!(id = %e.id, "dropping row with empty content"); }
                keep
            })
            .collect()
    }

    pub fn discovered_types(&self) -> &BTreeSet<String> {
        &self.discovered_types
    }

    pub fn into_discovered_types(self) -> BTreeSet<String> {
        self.discovered_types
    }
}

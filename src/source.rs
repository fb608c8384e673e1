use crate::error::SourceError;
use crate::record::{CanonicalEntry, RawRow, RecordBuilder};
use chrono::{DateTime, Local};
use serde_json::Value;
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info};

/// Anything that can hand back query rows for the lifelog attributes.
///
/// A source answers like the store query does: only rows carrying both lifelog
/// attributes, newest `lifelog_created` first, at most `limit` of them. [`eligible_rows`]
/// does this for sources holding unfiltered rows. The [`Loader`] takes the answer as is.
pub trait RowSource {
    fn fetch(&self, limit: usize) -> Result<Vec<RawRow>, SourceError>;
}

impl<F> RowSource for F
where
    F: Fn(usize) -> Result<Vec<RawRow>, SourceError>,
{
    fn fetch(&self, limit: usize) -> Result<Vec<RawRow>, SourceError> {
        self(limit)
    }
}

#[derive(Debug, Clone)]
enum JsonInput {
    File(PathBuf),
    Text(String),
}

/// Rows stored as JSON: an array, a `{"code":0,"data":[...]}` query response,
/// or one object per line.
#[derive(Debug, Clone)]
pub struct JsonRowSource {
    input: JsonInput,
}

impl JsonRowSource {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self { input: JsonInput::File(path.into()) }
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Self { input: JsonInput::Text(text.into()) }
    }

    fn read_text(&self) -> Result<String, SourceError> {
        match &self.input {
            JsonInput::File(p) => Ok(std::fs::read_to_string(p)?),
            JsonInput::Text(t) => Ok(t.clone()),
        }
    }
}

impl RowSource for JsonRowSource {
    fn fetch(&self, limit: usize) -> Result<Vec<RawRow>, SourceError> {
        let text = self.read_text()?;
        let rows = parse_rows(&text)?;
        Ok(eligible_rows(rows, limit))
    }
}

pub fn parse_rows(text: &str) -> Result<Vec<RawRow>, SourceError> {
    let t = text.trim_start();
    if t.is_empty() { return Ok(Vec::new()); }
    if t.starts_with('[') {
        return Ok(serde_json::from_str(t)?);
    }
    if t.starts_with('{') {
        if let Ok(v @ Value::Object(_)) = serde_json::from_str::<Value>(t) {
            if v.get("data").is_some() || v.get("code").is_some() {
                return rows_from_response(v);
            }
            return Ok(vec![serde_json::from_value(v)?]);
        }
    }
    // newline-delimited objects
    let mut out = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() { continue; }
        let row: RawRow = serde_json::from_str(line).map_err(|source| SourceError::Line { line: idx + 1, source })?;
        out.push(row);
    }
    Ok(out)
}

fn rows_from_response(v: Value) -> Result<Vec<RawRow>, SourceError> {
    let code = v.get("code").and_then(Value::as_i64).unwrap_or(0);
    if code != 0 {
        let msg = v.get("msg").and_then(Value::as_str).unwrap_or("unknown error");
        return Err(SourceError::Query(format!("code {code}: {msg}")));
    }
    match v.get("data") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(data) => Ok(serde_json::from_value(data.clone())?),
    }
}

/// Keep rows carrying both lifelog attributes, newest raw timestamp first, at most `limit`.
pub fn eligible_rows(rows: Vec<RawRow>, limit: usize) -> Vec<RawRow> {
    let mut rows: Vec<RawRow> = rows.into_iter().filter(RawRow::is_eligible).collect();
    rows.sort_by(|a, b| b.lifelog_created.cmp(&a.lifelog_created));
    rows.truncate(limit);
    rows
}

/// Result of one fetch-and-build pass.
#[derive(Debug, Clone)]
pub struct LoadCycle {
    pub entries: Vec<CanonicalEntry>,
    pub discovered_types: BTreeSet<String>,
    pub loaded_at: DateTime<Local>,
}

/// Wraps a source so that only one load runs at a time.
pub struct Loader<S> {
    source: S,
    limit: usize,
    in_flight: AtomicBool,
}

struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<S: RowSource> Loader<S> {
    pub fn new(source: S, limit: usize) -> Self {
        Self { source, limit, in_flight: AtomicBool::new(false) }
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// `Ok(None)` when another load is still running; the request is dropped, not queued.
    pub fn load(&self) -> Result<Option<LoadCycle>, SourceError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("load already in flight, ignoring request");
            return Ok(None);
        }
        let _guard = InFlight(&self.in_flight);

        let rows = self.source.fetch(self.limit)?;
        let mut builder = RecordBuilder::new();
        let entries = builder.build_all(&rows);
        let discovered_types = builder.into_discovered_types();
        info!(
            rows = rows.len(),
            entries = entries.len(),
            types = discovered_types.len(),
            "load cycle complete"
        );
        Ok(Some(LoadCycle { entries, discovered_types, loaded_at: Local::now() }))
    }
}

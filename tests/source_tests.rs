use lifelog::error::SourceError;
use lifelog::record::RawRow;
use lifelog::source::{parse_rows, JsonRowSource, Loader, RowSource};
use std::io::Write;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;

const ROWS: &str = r#"[
  {"id":"1","content":"18:47 记录：跑步","created":"20260204184700","lifelog_created":"2026/2/4 18:47:00","lifelog_type":"运动"},
  {"id":"2","content":"读书","created":"20260205090000","lifelog_created":"2026/2/5 9:00","lifelog_type":"阅读"},
  {"id":"3","content":"no attrs","created":"20260205090000"},
  {"id":"4","content":"bad time","created":"20260205090000","lifelog_created":"sometime","lifelog_type":"x"}
]"#;

#[test]
fn array_source_filters_and_orders_rows() {
    let rows = JsonRowSource::from_text(ROWS).fetch(500).unwrap();
    let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
    // "sometime" sorts above the numeric timestamps; it is dropped later by the builder
    assert_eq!(ids, vec!["4", "2", "1"]);
}

#[test]
fn query_response_envelope_is_unwrapped() {
    let body = format!(r#"{{"code":0,"msg":"","data":{ROWS}}}"#);
    assert_eq!(parse_rows(&body).unwrap().len(), 4);
    let failed = parse_rows(r#"{"code":-1,"msg":"sql error","data":null}"#);
    assert!(matches!(failed, Err(SourceError::Query(m)) if m.contains("sql error")));
}

#[test]
fn json_lines_report_bad_line_number() {
    let text = "{\"id\":\"1\",\"lifelog_created\":\"2026/2/4\",\"lifelog_type\":\"t\"}\n\nnot json\n";
    match parse_rows(text) {
        Err(SourceError::Line { line, .. }) => assert_eq!(line, 3),
        other => panic!("expected line error, got {other:?}"),
    }
}

#[test]
fn file_source_reads_from_disk() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    f.write_all(ROWS.as_bytes()).unwrap();
    let loader = Loader::new(JsonRowSource::from_path(f.path()), 500);
    let cycle = loader.load().unwrap().expect("not in flight");
    let ids: Vec<&str> = cycle.entries.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["2", "1"]);
    assert_eq!(cycle.entries[1].content, "跑步");
    let types: Vec<&str> = cycle.discovered_types.iter().map(String::as_str).collect();
    assert_eq!(types.len(), 2);
    assert!(types.contains(&"运动") && types.contains(&"阅读"));
}

#[test]
fn missing_file_is_an_io_error() {
    let loader = Loader::new(JsonRowSource::from_path("/nonexistent/rows.json"), 10);
    assert!(matches!(loader.load(), Err(SourceError::Io(_))));
    assert!(!loader.is_loading());
}

struct GatedSource {
    entered: Mutex<Option<mpsc::Sender<()>>>,
    release: Mutex<mpsc::Receiver<()>>,
}

impl RowSource for GatedSource {
    fn fetch(&self, _limit: usize) -> Result<Vec<RawRow>, SourceError> {
        if let Some(tx) = self.entered.lock().unwrap().take() {
            tx.send(()).unwrap();
        }
        self.release.lock().unwrap().recv().unwrap();
        Ok(vec![RawRow::new("1", "x", "2026/2/4 10:00", "t")])
    }
}

#[test]
fn second_load_while_in_flight_is_ignored() {
    let (entered_tx, entered_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel();
    let loader = Arc::new(Loader::new(
        GatedSource { entered: Mutex::new(Some(entered_tx)), release: Mutex::new(release_rx) },
        10,
    ));

    let bg = {
        let loader = Arc::clone(&loader);
        thread::spawn(move || loader.load())
    };
    entered_rx.recv().unwrap();
    assert!(loader.is_loading());
    assert!(loader.load().unwrap().is_none());

    release_tx.send(()).unwrap();
    let cycle = bg.join().unwrap().unwrap().expect("first load completes");
    assert_eq!(cycle.entries.len(), 1);
    assert!(!loader.is_loading());
}

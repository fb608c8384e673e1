use lifelog::config::{Config, DEFAULT_FETCH_LIMIT};
use lifelog::error::ConfigError;
use std::io::Write;

#[test]
fn missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = Config::load(&dir.path().join("time-record-config.json")).unwrap();
    assert_eq!(cfg, Config::default());
    assert_eq!(cfg.fetch_limit, DEFAULT_FETCH_LIMIT);
}

#[test]
fn file_overrides_and_type_styles() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    write!(
        f,
        r##"{{"author":"tester","fetch_limit":20,"type_styles":{{"工作":{{"color":"#123456"}}}}}}"##
    )
    .unwrap();
    let cfg = Config::load(f.path()).unwrap();
    assert_eq!(cfg.author, "tester");
    assert_eq!(cfg.fetch_limit, 20);
    let style = cfg.style_table().style_for("工作");
    assert_eq!(style.color, "#123456");
    assert_eq!(style.icon, "💼");
}

#[test]
fn broken_file_is_parse_error() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    f.write_all(b"{\"author\": ").unwrap();
    assert!(matches!(Config::load(f.path()), Err(ConfigError::Parse(_))));
}

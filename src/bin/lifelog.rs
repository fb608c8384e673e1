use chrono::{Local, NaiveDate};
use clap::Parser;
use lifelog::config::Config;
use lifelog::filter::TimeWindow;
use lifelog::source::{JsonRowSource, Loader};
use lifelog::view::{self, Snapshot, ViewRequest};
use std::io::{self, Read};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "lifelog", version, about = "Filter and summarise lifelog records")]
struct Cli {
    /// Row file (JSON array, query response, or JSON lines). `-` or absent reads stdin.
    input: Option<String>,

    /// Config file (JSON)
    #[arg(long = "config")]
    config: Option<PathBuf>,

    /// Time window: all | today | week | month | year
    #[arg(long = "window", default_value = "all")]
    window: TimeWindow,

    /// Type label to keep (`all` keeps every type)
    #[arg(long = "type", default_value = "all")]
    type_filter: String,

    /// Print only a section: entries | stats | groups | chart | summary
    #[arg(long = "only")]
    only: Option<String>,

    /// Output format: json | table (defaults to table on a terminal)
    #[arg(long = "format")]
    format: Option<String>,

    /// Maximum rows taken from the source (overrides config)
    #[arg(long = "limit")]
    limit: Option<usize>,

    /// Reference day for windows, YYYY-MM-DD (defaults to the local date)
    #[arg(long = "today")]
    today: Option<NaiveDate>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lifelog=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = match cli.config.as_deref() {
        Some(p) => Config::load(p)?,
        None => Config::default(),
    };
    let limit = cli.limit.unwrap_or(config.fetch_limit);

    let source = match cli.input.as_deref() {
        None | Some("-") => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            JsonRowSource::from_text(text)
        }
        Some(path) => JsonRowSource::from_path(path),
    };
    let Some(cycle) = Loader::new(source, limit).load()? else {
        warn!("another load is in progress");
        return Ok(());
    };

    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());
    let request = ViewRequest { window: cli.window, type_filter: cli.type_filter.clone() };
    let mut snapshot = Snapshot::build_with(&cycle.entries, &request, today, &config.style_table());
    snapshot.type_vocabulary = cycle.discovered_types.iter().cloned().collect();
    info!(total = snapshot.total, window = %request.window, "snapshot built");

    let table = match cli.format.as_deref() {
        Some("table") => true,
        Some(_) => false,
        None => atty::is(atty::Stream::Stdout),
    };
    if table {
        print_table(&snapshot, &config, cli.only.as_deref());
        let elapsed = (Local::now() - cycle.loaded_at).num_seconds();
        println!("\n最后更新: {}  记录总数: {}", view::format_time_since(elapsed), cycle.entries.len());
        return Ok(());
    }

    let out = match cli.only.as_deref() {
        Some("entries") => serde_json::to_value(&snapshot.entries)?,
        Some("stats") => serde_json::json!({
            "total": snapshot.total,
            "window_counts": snapshot.window_counts,
            "distribution": snapshot.distribution,
        }),
        Some("groups") => serde_json::to_value(&snapshot.groups)?,
        Some("chart") => serde_json::json!({ "pie": snapshot.pie, "bars": snapshot.bars }),
        Some("summary") => serde_json::json!({
            "total": snapshot.total,
            "window_counts": snapshot.window_counts,
            "types": snapshot.type_vocabulary,
        }),
        _ => serde_json::to_value(&snapshot)?,
    };
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn print_table(snapshot: &Snapshot, config: &Config, only: Option<&str>) {
    if snapshot.is_empty() {
        println!("没有找到匹配的记录");
        return;
    }
    let show = |section: &str| only.map_or(true, |o| o == section);

    if show("stats") || show("summary") {
        let c = &snapshot.window_counts;
        println!("{:<8} {:<8} {:<8} {:<8}", "今日", "本周", "本月", "今年");
        println!("{:<8} {:<8} {:<8} {:<8}", c.day, c.week, c.month, c.year);
        println!();
        println!("{:<6} {:<8} {:<10} Type", "Count", "Percent", "Bar");
        for (stat, bar) in snapshot.distribution.iter().zip(&snapshot.bars) {
            let width = (bar.height / 10.0).round() as usize;
            println!("{:<6} {:<8} {:<10} {} {}", stat.count, format!("{}%", stat.percentage), "█".repeat(width), stat.icon, stat.entry_type);
        }
    }
    if only == Some("chart") {
        println!("{:<12} {:<10} {:<10} Type", "Start", "End", "LargeArc");
        for s in &snapshot.pie {
            println!("{:<12.2} {:<10.2} {:<10} {}", s.start_angle, s.end_angle, s.large_arc, s.entry_type);
        }
    }
    if show("entries") || show("groups") {
        for bucket in &snapshot.groups {
            println!("\n# {}", bucket.date);
            for e in &bucket.entries {
                println!(
                    "  {} {} | {} {} | {}{}",
                    config.time_icon, e.display_date, config.author_icon, config.author, config.type_icon, e.entry_type
                );
                println!("    {}", e.content);
            }
        }
    }
}

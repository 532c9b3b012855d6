use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing::level_filters::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "taskline", version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute connector paths for a timeline.
    Connect(ConnectArgs),
    /// Print the boxes cards get from their static layout hints.
    Layout(LayoutArgs),
}

#[derive(Parser, Debug)]
struct ConnectArgs {
    /// Input timeline JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output JSON path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Override the same-row tolerance in pixels.
    #[arg(long)]
    epsilon: Option<f64>,

    /// Override the endpoint marker radius in pixels.
    #[arg(long)]
    marker_radius: Option<f64>,

    /// Override the vertical nudge applied to connector endpoints.
    #[arg(long, allow_hyphen_values = true)]
    vertical_offset: Option<f64>,

    /// Fail on invalid timelines and dangling successors instead of warning.
    #[arg(long, default_value_t = false)]
    strict: bool,
}

#[derive(Parser, Debug)]
struct LayoutArgs {
    /// Input timeline JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output JSON path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(serde::Serialize)]
struct ConnectOutput<'a> {
    connectors: &'a [taskline::ConnectorPath],
}

#[derive(serde::Serialize)]
struct PlacedBox<'a> {
    id: &'a taskline::NodeId,
    #[serde(flatten)]
    bbox: taskline::BoundingBox,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Connect(args) => cmd_connect(args),
        Command::Layout(args) => cmd_layout(args),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_connect(args: ConnectArgs) -> anyhow::Result<()> {
    let mut timeline = load(&args.in_path)?;
    if let Some(eps) = args.epsilon {
        timeline.connector.same_row_epsilon = eps;
    }
    if let Some(r) = args.marker_radius {
        timeline.connector.marker_radius = r;
    }
    if let Some(v) = args.vertical_offset {
        timeline.vertical_offset = v;
    }

    timeline
        .validate_geometry()
        .context("invalid connector geometry")?;
    if let Err(e) = timeline.validate() {
        if args.strict {
            return Err(e).context("timeline validation failed");
        }
        tracing::warn!("{e}");
    }

    let dangling = timeline.dangling_successors();
    if args.strict && !dangling.is_empty() {
        let list = dangling
            .iter()
            .map(|(n, s)| format!("{n} -> {s}"))
            .collect::<Vec<_>>()
            .join(", ");
        anyhow::bail!("dangling successors: {list}");
    }
    for (node, successor) in &dangling {
        tracing::warn!(%node, %successor, "successor not found; no connector drawn");
    }

    let connectors = timeline.compute();
    tracing::info!(count = connectors.len(), "computed connectors");
    let json = serde_json::to_string_pretty(&ConnectOutput {
        connectors: &connectors,
    })
    .context("serialize connectors")?;
    emit(args.out.as_deref(), &json)
}

fn cmd_layout(args: LayoutArgs) -> anyhow::Result<()> {
    let timeline = load(&args.in_path)?;
    timeline
        .layout
        .validate()
        .context("invalid layout options")?;

    let layout = timeline.hint_layout();
    let placed: Vec<PlacedBox<'_>> = layout
        .iter()
        .map(|(id, bbox)| PlacedBox { id, bbox })
        .collect();
    let json = serde_json::to_string_pretty(&placed).context("serialize boxes")?;
    emit(args.out.as_deref(), &json)
}

fn load(path: &Path) -> anyhow::Result<taskline::Timeline> {
    taskline::Timeline::from_path(path)
        .with_context(|| format!("load timeline '{}'", path.display()))
}

fn emit(out: Option<&Path>, json: &str) -> anyhow::Result<()> {
    let Some(out) = out else {
        println!("{json}");
        return Ok(());
    };
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(out, json).with_context(|| format!("write '{}'", out.display()))?;
    eprintln!("wrote {}", out.display());
    Ok(())
}

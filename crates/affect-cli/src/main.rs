//! Replays recorded affect API responses through a session and prints one
//! frame per accepted line.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use affect_core::Channel;
use affect_metrics::AffectMetrics;
use affect_session::{load_config, AffectSession, VizConfig};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;


#[derive(Parser)]
#[command(name = "affectviz", about = "Affect visualization replay tool")]
struct Cli {
    /// Log output format.
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Feed a JSON-lines file of API responses through one session.
    Replay {
        /// Input file, one response per line. `-` reads stdin.
        #[arg(long, short)]
        input: PathBuf,
        /// YAML or JSON chart config.
        #[arg(long, short)]
        config: Option<PathBuf>,
        /// Channel to follow, e.g. "Personality/Big Five/Openness".
        #[arg(long)]
        focus: Option<String>,
        /// Print the Prometheus exposition to stderr when done.
        #[arg(long)]
        metrics: bool,
    },
    /// List the channel paths accepted by `--focus`.
    Channels,
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    match cli.cmd {
        Commands::Replay {
            input,
            config,
            focus,
            metrics,
        } => replay(input, config, focus, metrics),
        Commands::Channels => {
            for channel in Channel::ALL {
                println!("{}", channel.display_path());
            }
            Ok(())
        }
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
struct ReplayStats {
    accepted: usize,
    rejected: usize,
}

/// Refresh `session` once per non-blank line of `reader` and write each
/// frame to `out` as one JSON line. Rejected lines are counted and skipped.
fn replay_lines<R: BufRead, W: Write>(
    session: &mut AffectSession,
    metrics: &AffectMetrics,
    reader: R,
    mut out: W,
) -> Result<ReplayStats> {
    let mut stats = ReplayStats::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("reading line {}", index + 1))?;
        if line.trim().is_empty() {
            continue;
        }
        match session.refresh_json(&line) {
            Ok(frame) => {
                metrics.observe_frame(&frame);
                serde_json::to_writer(&mut out, &frame).context("writing frame")?;
                writeln!(out)?;
                stats.accepted += 1;
            }
            Err(e) if e.is_rejected_snapshot() => {
                metrics.observe_rejection();
                warn!(line = index + 1, error = %e, "skipping rejected snapshot");
                stats.rejected += 1;
            }
            Err(e) => return Err(e).with_context(|| format!("line {}", index + 1)),
        }
    }
    out.flush()?;
    Ok(stats)
}

fn replay(
    input: PathBuf,
    config: Option<PathBuf>,
    focus: Option<String>,
    with_metrics: bool,
) -> Result<()> {
    let config = match config {
        Some(path) => {
            load_config(&path).with_context(|| format!("loading config {}", path.display()))?
        }
        None => VizConfig::default(),
    };
    let mut session = AffectSession::new(config).context("creating session")?;
    if let Some(path) = focus {
        let channel = Channel::from_path(&path).with_context(|| format!("focus {path:?}"))?;
        session.set_focus(Some(channel));
    }
    let metrics = AffectMetrics::new().context("registering metrics")?;

    let reader: Box<dyn BufRead> = if input.as_os_str() == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        let file = File::open(&input).with_context(|| format!("opening {}", input.display()))?;
        Box::new(BufReader::new(file))
    };

    info!(session = %session.id(), input = %input.display(), "replay started");
    let out = BufWriter::new(io::stdout().lock());
    let stats = replay_lines(&mut session, &metrics, reader, out)?;

    info!(
        accepted = stats.accepted,
        rejected = stats.rejected,
        "replay finished"
    );
    if with_metrics {
        eprint!("{}", metrics.render().context("rendering metrics")?);
    }
    Ok(())
}

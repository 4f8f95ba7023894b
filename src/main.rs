use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, Level};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Root directory to walk. Every non-hidden file beneath it gets stamped.
    #[arg(default_value = "blogs")]
    root: PathBuf,

    /// Marker text to append instead of the default block.
    #[arg(long)]
    marker: Option<String>,

    /// Number of walk threads. Defaults to the logical CPU count.
    #[arg(long, short = 'j')]
    threads: Option<usize>,

    /// Maximum traversal depth. Unlimited by default.
    #[arg(long)]
    max_depth: Option<usize>,

    /// Silence per-file confirmations; only report errors and the summary.
    #[arg(long, short = 'q')]
    quiet: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.quiet);

    let mut builder = treestamp::stamp(&args.root);
    if let Some(marker) = &args.marker {
        builder = builder.marker(marker.clone());
    }
    if let Some(threads) = args.threads {
        builder = builder.threads(threads);
    }
    if let Some(depth) = args.max_depth {
        builder = builder.max_depth(depth);
    }

    let results = match builder.run() {
        Ok(r) => r,
        Err(e) => {
            error!(error = %e, path = ?e.path(), "walk failed");
            return ExitCode::FAILURE;
        }
    };

    for err in &results.errors {
        match err.path() {
            Some(p) => error!(path = %p.display(), error = %err, "file not stamped"),
            None => error!(error = %err, "file not stamped"),
        }
    }

    println!(
        "stamped {} files ({} files, {} dirs scanned) in {:.3}s",
        results.stamped,
        results.stats.files,
        results.stats.dirs,
        results.stats.duration.as_secs_f64()
    );

    if results.errors.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn init_logging(quiet: bool) {
    let default_level = if quiet { Level::ERROR } else { Level::INFO };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("treestamp={}", default_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

use std::path::Path;
use std::process::ExitCode;

use cornwall_bus::snapshot::{FeedSnapshot, SnapshotError, normalize_feed};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<_> = std::env::args().collect();
    if args.len() < 2 {
        error!("Missing snapshot path. Usage: cornwall-bus <snapshot.json>");
        return ExitCode::from(2);
    }

    match run(Path::new(&args[1])) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(path: &Path) -> Result<String, SnapshotError> {
    info!(path = %path.display(), "Generating Cornwall Transit bus data...");
    let snapshot = FeedSnapshot::load(path)?;
    let adapter = snapshot.adapter();
    let feed = normalize_feed(&adapter, &snapshot)?;
    Ok(serde_json::to_string_pretty(&feed)?)
}

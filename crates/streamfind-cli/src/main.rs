mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Args, ConfigOrigin, default_log_filter, load_config};
use streamfind_core::StreamFinder;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    // Config first: verbose_diagnostics picks the default log level
    let (config, origin) = load_config(args.config.as_deref())?;
    let config = args.apply_to(config);

    // RUST_LOG wins
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_filter(config.verbose_diagnostics)));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match origin {
        ConfigOrigin::Defaults => {}
        ConfigOrigin::File(path) => info!("Loaded config from {:?}", path),
        ConfigOrigin::Fallback { path, error } => {
            warn!("Failed to load config {:?}: {}, using defaults", path, error)
        }
    }

    let finder = StreamFinder::new(config);
    let summary = finder.run().with_context(|| {
        format!(
            "stream search over {} failed",
            finder.config().source_directory.display()
        )
    })?;

    if summary.read_failures + summary.parse_failures > 0 {
        warn!(
            "{} beatmaps could not be read and {} had no [HitObjects] section",
            summary.read_failures, summary.parse_failures
        );
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}

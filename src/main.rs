use anyhow::{Context, Result};
use clap::Parser;
use dummysql::{load, Args};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    // ─── 2) parse & validate arguments ───────────────────────────────
    let config = Args::parse()
        .into_config()
        .context("invalid arguments")?;
    info!(
        file = %config.file.display(),
        database = %config.database.display(),
        table = %config.table,
        "startup"
    );

    // ─── 3) load ─────────────────────────────────────────────────────
    match load(&config) {
        Ok(report) => {
            info!(
                "loaded {} rows into {} ({} skipped)",
                report.rows_loaded,
                report.table,
                report.rows_skipped
            );
            Ok(())
        }
        Err(e) => {
            error!("load failed: {}", e);
            Err(e).with_context(|| format!("loading {}", config.file.display()))
        }
    }
}

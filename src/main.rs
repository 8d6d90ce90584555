use std::io;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use clinic_core::config::data_dir_from_env_value;
use clinic_core::constants::DATA_DIR_ENV;
use clinic_core::{Console, CoreConfig, Session};

/// Main entry point for the clinic login utility
///
/// Runs exactly one login session against `Physician.csv` and `Patient.csv`.
/// The process always exits with status 0; failures are reported on stderr.
///
/// # Environment Variables
/// - `CLINIC_DATA_DIR`: Directory holding both record files (default: ".")
/// - `RUST_LOG`: Log filter for stderr diagnostics (default: "clinic=warn")
fn main() {
    dotenvy::dotenv().ok();

    if let Err(e) = init_tracing() {
        eprintln!("Failed to initialise logging: {e}");
    }

    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
    }
}

fn init_tracing() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("clinic=warn".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .try_init()?;
    Ok(())
}

fn run() -> anyhow::Result<()> {
    let data_dir = data_dir_from_env_value(std::env::var(DATA_DIR_ENV).ok());
    let cfg = CoreConfig::new(data_dir)?;
    tracing::debug!("using data directory {}", cfg.data_dir().display());

    let console = Console::new(io::stdin().lock(), io::stdout().lock());
    let outcome = Session::new(cfg, console).run()?;
    tracing::info!("session finished: {:?}", outcome);
    Ok(())
}

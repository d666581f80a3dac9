use anyhow::{Context, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use course_grades::config::AppConfig;
use course_grades::roster::{load_roster_file, Roster};

fn main() -> Result<()> {
    let config = AppConfig::from_env(std::env::args().nth(1))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(EnvFilter::new(&config.log_filter))
        .init();

    let file = load_roster_file(&config.roster_path)
        .with_context(|| format!("Failed to load roster {}", config.roster_path.display()))?;
    let report = Roster::replay(&file).context("Failed to replay roster")?;

    let json = if config.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", json);

    Ok(())
}

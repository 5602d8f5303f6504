mod commands;
mod config;
mod repo;

use std::{io, path::PathBuf, str::FromStr};

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::filter::LevelFilter;

use commands::{AssumeYes, Confirm, Outcome, SetupPaths, StdinConfirm};
use config::Config;

#[derive(Debug, Parser)]
#[command(name = "secrets-setup")]
#[command(about = "Create .streamlit/secrets.toml from the project's .env file")]
struct Cli {
    /// Project root holding `.env` and `.streamlit/`
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Overwrite an existing secrets file without asking
    #[arg(short, long)]
    yes: bool,

    /// Settings file (defaults to `<root>/config/secrets-setup.toml`)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let conf = Config::load(&cli.root, cli.config.as_deref())
        .context("could not load settings")?;

    let tracing_level = LevelFilter::from_str(&conf.log_level)
        .with_context(|| format!("invalid log_level {:?}", conf.log_level))?;

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(io::stderr)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::debug!(?conf, root = %cli.root.display());

    let paths = SetupPaths::new(&cli.root, &conf.env_file, &conf.secrets_file);
    let mut confirm: Box<dyn Confirm> = if cli.yes {
        Box::new(AssumeYes)
    } else {
        Box::new(StdinConfirm)
    };

    let outcome = commands::materialize_secrets(
        &paths,
        &conf.default_model,
        confirm.as_mut(),
        &mut io::stdout().lock(),
    )?;

    match &outcome {
        Outcome::Written { path, contents } => {
            tracing::info!("secrets written to {} ({} bytes)", path.display(), contents.len())
        }
        Outcome::SourceMissing { expected } => {
            tracing::debug!("nothing to do, {} is missing", expected.display())
        }
        Outcome::MissingFields(keys) => tracing::debug!("nothing written, missing {keys:?}"),
        Outcome::Declined => tracing::debug!("nothing written, overwrite declined"),
    }

    Ok(())
}

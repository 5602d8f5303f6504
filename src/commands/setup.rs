use std::{
    io::Write,
    path::{Path, PathBuf},
};

use tracing::{debug, info, warn};

use super::Confirm;
use crate::repo::{
    env_file::{self, EnvFileErr},
    secrets_file::{self, MistralSecrets, SecretsFileErr},
};

const SETUP_DOC: &str = "app/SECRETS_SETUP.md";
const RUN_HINT: &str = "streamlit run app/streamlit_app.py";
const RULE_WIDTH: usize = 50;

#[derive(Debug, thiserror::Error)]
pub enum SetupErr {
    #[error("SetupErr/EnvFileErr: {0}")]
    EnvFileErr(#[from] EnvFileErr),
    #[error("SetupErr/SecretsFileErr: {0}")]
    SecretsFileErr(#[from] SecretsFileErr),
    #[error("SetupErr/IoErr: {0}")]
    IoErr(#[from] std::io::Error),
}

pub type Result<T, E = SetupErr> = std::result::Result<T, E>;

#[derive(Debug, Clone)]
pub struct SetupPaths {
    pub env_file: PathBuf,
    pub secrets_file: PathBuf,
}

impl SetupPaths {
    pub fn new(root: &Path, env_file: impl AsRef<Path>, secrets_file: impl AsRef<Path>) -> Self {
        Self {
            env_file: root.join(env_file),
            secrets_file: root.join(secrets_file),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    SourceMissing { expected: PathBuf },
    Declined,
    MissingFields(Vec<&'static str>),
    Written { path: PathBuf, contents: String },
}

/// Turns the `.env` file into `secrets.toml`.
///
/// Every guard exit is reported on `out` and returned as an [`Outcome`];
/// only unexpected I/O failures come back as `Err`.
pub fn materialize_secrets(
    paths: &SetupPaths,
    default_model: &str,
    confirm: &mut dyn Confirm,
    out: &mut impl Write,
) -> Result<Outcome> {
    writeln!(out, "🔐 Streamlit Secrets Setup Helper\n")?;

    if !paths.env_file.exists() {
        warn!("source file {} does not exist", paths.env_file.display());
        writeln!(out, "❌ .env file not found!")?;
        writeln!(out, "   Expected location: {}", paths.env_file.display())?;
        manual_setup_hint(out, &paths.secrets_file)?;
        return Ok(Outcome::SourceMissing {
            expected: paths.env_file.clone(),
        });
    }

    let vars = env_file::read(&paths.env_file)?;
    debug!(
        "parsed {} entries from {}",
        vars.len(),
        paths.env_file.display()
    );

    if paths.secrets_file.exists() {
        let prompt = format!(
            "\n⚠️  {} already exists. Overwrite? (y/N): ",
            paths.secrets_file.display()
        );
        if !confirm.confirm(&prompt)? {
            warn!("overwrite of {} declined", paths.secrets_file.display());
            writeln!(out, "❌ Cancelled. Existing file not modified.")?;
            return Ok(Outcome::Declined);
        }
    }

    let secrets = match MistralSecrets::from_env(&vars, default_model) {
        Ok(s) => s,
        Err(missing) => {
            warn!("missing required keys: {}", missing.join(", "));
            writeln!(out, "❌ Missing required values in .env:")?;
            for key in &missing {
                writeln!(out, "   - {key}")?;
            }
            manual_setup_hint(out, &paths.secrets_file)?;
            return Ok(Outcome::MissingFields(missing));
        }
    };

    let contents = secrets.render()?;
    secrets_file::write(&paths.secrets_file, &contents)?;
    info!("wrote {}", paths.secrets_file.display());

    let rule = "-".repeat(RULE_WIDTH);
    writeln!(out, "✅ Created {}", paths.secrets_file.display())?;
    writeln!(out, "\n📋 Contents:")?;
    writeln!(out, "{rule}")?;
    writeln!(out, "{contents}")?;
    writeln!(out, "{rule}")?;
    writeln!(out, "\n✅ You can now run: {RUN_HINT}")?;

    Ok(Outcome::Written {
        path: paths.secrets_file.clone(),
        contents,
    })
}

fn manual_setup_hint(out: &mut impl Write, secrets_file: &Path) -> std::io::Result<()> {
    writeln!(
        out,
        "\n📝 Please create {} manually:",
        secrets_file.display()
    )?;
    writeln!(out, "   See {SETUP_DOC} for instructions")
}

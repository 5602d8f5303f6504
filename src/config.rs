use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::repo::secrets_file::DEFAULT_MODEL;

pub const DEFAULT_CONFIG_PATH: &str = "config/secrets-setup.toml";
pub const ENV_PREFIX: &str = "SECRETS_SETUP_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub log_level: String,
    /// Relative to the project root.
    pub env_file: PathBuf,
    /// Relative to the project root.
    pub secrets_file: PathBuf,
    pub default_model: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "warn".into(),
            env_file: ".env".into(),
            secrets_file: ".streamlit/secrets.toml".into(),
            default_model: DEFAULT_MODEL.into(),
        }
    }
}

impl Config {
    /// Defaults, then the TOML file (missing is fine), then `SECRETS_SETUP_*`.
    pub fn figment(root: &Path, file: Option<&Path>) -> Figment {
        let file = match file {
            Some(f) => f.to_path_buf(),
            None => root.join(DEFAULT_CONFIG_PATH),
        };

        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn load(root: &Path, file: Option<&Path>) -> Result<Self, figment::Error> {
        Self::figment(root, file).extract()
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use figment::Jail;

    use super::*;

    #[test]
    fn test_defaults_without_file() {
        Jail::expect_with(|_jail| {
            let conf = Config::load(Path::new("."), None)?;
            assert_eq!(conf, Config::default());
            assert_eq!(conf.default_model, "mistral-document-ai-2505");
            Ok(())
        });
    }

    #[test]
    fn test_file_overrides_defaults() {
        Jail::expect_with(|jail| {
            std::fs::create_dir(jail.directory().join("config")).unwrap();
            jail.create_file(
                DEFAULT_CONFIG_PATH,
                r#"
                    log_level = "debug"
                    secrets_file = "out/secrets.toml"
                "#,
            )?;

            let conf = Config::load(Path::new("."), None)?;
            assert_eq!(conf.log_level, "debug");
            assert_eq!(conf.secrets_file, PathBuf::from("out/secrets.toml"));
            assert_eq!(conf.env_file, PathBuf::from(".env"));
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("custom.toml", r#"default_model = "from-file""#)?;
            jail.set_env("SECRETS_SETUP_DEFAULT_MODEL", "from-env");
            jail.set_env("SECRETS_SETUP_LOG_LEVEL", "trace");

            let conf = Config::load(Path::new("."), Some(Path::new("custom.toml")))?;
            assert_eq!(conf.default_model, "from-env");
            assert_eq!(conf.log_level, "trace");
            Ok(())
        });
    }

    #[test]
    fn test_bad_file_is_an_error() {
        Jail::expect_with(|jail| {
            jail.create_file("custom.toml", "log_level = [1, 2]")?;
            assert!(Config::load(Path::new("."), Some(Path::new("custom.toml"))).is_err());
            Ok(())
        });
    }
}

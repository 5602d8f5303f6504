use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use super::env_file::EnvMap;

pub const ENDPOINT_KEY: &str = "MISTRAL_OCR_ENDPOINT";
pub const API_KEY_KEY: &str = "API_KEY";
pub const MODEL_KEY: &str = "MISTRAL_MODEL";
pub const DEFAULT_MODEL: &str = "mistral-document-ai-2505";

const HEADER: &str = "\
# Streamlit Secrets Configuration
# Auto-generated from .env file
# DO NOT commit this file to git!
";

#[derive(Debug, thiserror::Error)]
pub enum SecretsFileErr {
    #[error("SecretsFileErr/IoErr: {0}")]
    IoErr(#[from] std::io::Error),
    #[error("SecretsFileErr/TomlErr: {0}")]
    TomlErr(#[from] toml::ser::Error),
}

pub type Result<T, E = SecretsFileErr> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MistralSecrets {
    pub ocr_endpoint: String,
    pub api_key: String,
    pub model: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SecretsDoc {
    pub mistral: MistralSecrets,
}

impl MistralSecrets {
    /// Pulls the recognized keys out of `vars`. On failure, returns the names
    /// of the required keys that are absent or empty, endpoint first.
    pub fn from_env(vars: &EnvMap, default_model: &str) -> Result<Self, Vec<&'static str>> {
        let get = |key: &str| vars.get(key).map(String::as_str).unwrap_or_default();

        let ocr_endpoint = get(ENDPOINT_KEY);
        let api_key = get(API_KEY_KEY);

        let missing: Vec<_> = [(ENDPOINT_KEY, ocr_endpoint), (API_KEY_KEY, api_key)]
            .into_iter()
            .filter(|(_, v)| v.is_empty())
            .map(|(k, _)| k)
            .collect();
        if !missing.is_empty() {
            return Err(missing);
        }

        let model = match get(MODEL_KEY) {
            "" => default_model,
            m => m,
        };

        Ok(Self {
            ocr_endpoint: ocr_endpoint.into(),
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    pub fn render(&self) -> Result<String> {
        let body = toml::to_string(&SecretsDoc {
            mistral: self.clone(),
        })?;
        Ok(format!("{HEADER}\n{body}"))
    }
}

/// Writes `contents` to `path`, creating the parent directory first.
pub fn write(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    Ok(())
}

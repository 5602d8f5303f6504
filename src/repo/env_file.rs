use std::{collections::HashMap, fs, path::Path};

#[derive(Debug, thiserror::Error)]
pub enum EnvFileErr {
    #[error("EnvFileErr/IoErr: {0}")]
    IoErr(#[from] std::io::Error),
}

pub type Result<T, E = EnvFileErr> = std::result::Result<T, E>;

/// Flat `KEY=VALUE` mapping. Values are kept verbatim.
pub type EnvMap = HashMap<String, String>;

pub fn read(path: &Path) -> Result<EnvMap> {
    let contents = fs::read_to_string(path)?;
    Ok(parse(&contents))
}

pub fn parse(contents: &str) -> EnvMap {
    let mut vars = EnvMap::new();

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        // lines without `=` are not assignments
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        vars.insert(key.trim().to_string(), value.trim().to_string());
    }

    vars
}

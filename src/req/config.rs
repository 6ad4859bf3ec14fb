use anyhow::Context;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub const FILE_NAME: &str = "genreq.toml";

/// Optional per-project configuration, read from `genreq.toml` at the project
/// root. Every field has a default so an absent or empty file is valid.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReqConfig {
    /// Venv folder name to use when the flag is omitted.
    #[serde(default)]
    pub venv_folder: Option<String>,
    /// Extra directory names to skip while walking, on top of the built-ins.
    #[serde(default)]
    pub ignore: Vec<String>,
    /// Import-name -> distribution-name overrides.
    #[serde(default)]
    pub mapping: BTreeMap<String, String>,
    /// Distribution-name -> version pins for emitted entries.
    #[serde(default)]
    pub pins: BTreeMap<String, String>,
}

impl ReqConfig {
    pub fn parse(toml_text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str::<ReqConfig>(toml_text)?)
    }

    pub fn load(root: &Path) -> anyhow::Result<Self> {
        let path = root.join(FILE_NAME);
        if !path.exists() {
            return Ok(Self::default());
        }
        let text =
            fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parse {}", path.display()))
    }
}

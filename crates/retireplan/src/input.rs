//! Loading `UserData` documents from disk
//!
//! JSON and YAML are both accepted; the format is picked from the file
//! extension.

use std::fs;
use std::path::Path;

use color_eyre::eyre::{WrapErr, bail};
use retireplan_core::model::UserData;

/// Document formats understood by the loader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Yaml,
}

impl InputFormat {
    /// Format implied by `path`'s extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(InputFormat::Json),
            "yaml" | "yml" => Some(InputFormat::Yaml),
            _ => None,
        }
    }
}

/// Parse a document already in memory
pub fn parse_user_data(content: &str, format: InputFormat) -> color_eyre::Result<UserData> {
    let data = match format {
        InputFormat::Json => serde_json::from_str(content).wrap_err("invalid JSON document")?,
        InputFormat::Yaml => serde_saphyr::from_str(content).wrap_err("invalid YAML document")?,
    };
    Ok(data)
}

/// Read and parse the document at `path`
pub fn load_user_data(path: &Path) -> color_eyre::Result<UserData> {
    let Some(format) = InputFormat::from_path(path) else {
        bail!(
            "cannot tell the format of {}; use a .json, .yaml or .yml file",
            path.display()
        );
    };
    let content = fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read {}", path.display()))?;
    parse_user_data(&content, format).wrap_err_with(|| format!("failed to load {}", path.display()))
}

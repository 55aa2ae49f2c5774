use crate::extract::io_common::resolve_path;
use crate::extract::*;

use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSettings {
    /// A file path, or `stdout`. Missing means `stdout`.
    #[serde(rename = "outputFile")]
    pub output_file: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct TableSource {
    pub provider: Option<String>,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
}

/// The supported formats of extracted tables.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum Provider {
    Pdfplumber,
    Tabula,
    Xlsx,
}

impl TableSource {
    pub fn provider(&self) -> RunResult<Provider> {
        match self.provider.as_deref() {
            None | Some("pdfplumber") => Ok(Provider::Pdfplumber),
            Some("tabula") => Ok(Provider::Tabula),
            Some("xlsx") => Ok(Provider::Xlsx),
            Some(x) => UnknownProviderSnafu { provider: x }.fail(),
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractConfig {
    #[serde(rename = "outputSettings", default)]
    pub output_settings: OutputSettings,
    #[serde(rename = "tableSources")]
    pub table_sources: Vec<TableSource>,
    #[serde(rename = "partiesFile")]
    pub parties_file: Option<String>,
    #[serde(rename = "errorPolicy")]
    pub error_policy: Option<String>,
}

impl ExtractConfig {
    pub fn error_policy(&self) -> RunResult<ErrorPolicy> {
        match self.error_policy.as_deref() {
            None | Some("abort") => Ok(ErrorPolicy::Abort),
            Some("collect") => Ok(ErrorPolicy::Collect),
            Some(x) => UnknownErrorPolicySnafu { policy: x }.fail(),
        }
    }
}

/// Reads a configuration file.
///
/// The relative paths in the file are resolved against the directory of the file.
pub fn read_config(path: &str) -> RunResult<ExtractConfig> {
    let contents = fs::read_to_string(path).context(OpeningFileSnafu { path })?;
    let mut config: ExtractConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    info!("config: {:?}", config);

    let root = parent_dir(path)?;
    for source in config.table_sources.iter_mut() {
        source.file_path = resolve_path(root, &source.file_path);
    }
    config.parties_file = config.parties_file.map(|p| resolve_path(root, &p));
    config.output_settings.output_file = config
        .output_settings
        .output_file
        .map(|p| resolve_path(root, &p));
    debug!("read_config: resolved config: {:?}", config);
    Ok(config)
}

// Reading the tables dumped from pdfplumber.

use crate::extract::*;

use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
struct Settings {
    text_line_dir_rotated: Option<String>,
    text_char_dir_rotated: Option<String>,
    text_keep_blank_chars: Option<bool>,
}

impl Settings {
    fn matches(&self, required: &TableSettings) -> bool {
        self.text_line_dir_rotated.as_deref() == Some(required.text_line_dir_rotated)
            && self.text_char_dir_rotated.as_deref() == Some(required.text_char_dir_rotated)
            && self.text_keep_blank_chars == Some(required.text_keep_blank_chars)
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
struct Page {
    page_number: Option<u32>,
    tables: Vec<Vec<Vec<Option<String>>>>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
struct TableDump {
    settings: Option<Settings>,
    pages: Vec<Page>,
}

pub fn read_pdfplumber(path: &str) -> RunResult<RawDocument> {
    let contents = fs::read_to_string(path).context(OpeningFileSnafu { path })?;
    let dump: TableDump =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;

    match &dump.settings {
        Some(settings) if !settings.matches(&TableSettings::REQUIRED) => {
            warn!(
                "read_pdfplumber: {}: tables were extracted with {:?}, expected {:?}: the tables may not be recognized",
                path,
                settings,
                TableSettings::REQUIRED
            );
        }
        Some(_) => {}
        None => {
            debug!("read_pdfplumber: {}: no extraction settings recorded", path);
        }
    }

    let pages: Vec<RawPage> = dump
        .pages
        .into_iter()
        .enumerate()
        .map(|(idx, page)| RawPage {
            page_number: page.page_number.unwrap_or((idx + 1) as u32),
            tables: page.tables.into_iter().map(RawTable::new).collect(),
        })
        .collect();
    debug!(
        "read_pdfplumber: {}: {} pages, {} tables",
        path,
        pages.len(),
        pages.iter().map(|p| p.tables.len()).sum::<usize>()
    );
    Ok(RawDocument { pages })
}

// Reading the tables written by `tabula --format JSON`.

use crate::extract::io_common::text_to_cell;
use crate::extract::*;

use serde::Deserialize;
use std::fs;

#[derive(Debug, Deserialize)]
struct JsonTable {
    page_number: u32,
    data: Vec<Vec<JsonCell>>,
}

#[derive(Debug, Deserialize)]
struct JsonCell {
    text: String,
}

impl JsonTable {
    fn into_raw(self) -> RawTable {
        RawTable::new(
            self.data
                .into_iter()
                .map(|row| row.into_iter().map(|c| text_to_cell(c.text)).collect())
                .collect(),
        )
    }
}

/// Tabula writes every cell as text: empty cells are read as blank.
pub fn read_tabula(path: &str) -> RunResult<RawDocument> {
    let contents = fs::read_to_string(path).context(OpeningFileSnafu { path })?;
    let tables: Vec<JsonTable> =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    debug!("read_tabula: {}: {} tables", path, tables.len());
    Ok(group_pages(tables))
}

// Tables of the same page are grouped, keeping the order of the first appearance of each page.
fn group_pages(tables: Vec<JsonTable>) -> RawDocument {
    let mut pages: Vec<RawPage> = Vec::new();
    for table in tables {
        let page_number = table.page_number;
        let raw = table.into_raw();
        match pages.iter_mut().find(|p| p.page_number == page_number) {
            Some(page) => page.tables.push(raw),
            None => pages.push(RawPage {
                page_number,
                tables: vec![raw],
            }),
        }
    }
    RawDocument { pages }
}

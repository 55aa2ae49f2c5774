use crate::extract::*;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct PartyRow {
    #[serde(rename = "Party code")]
    code: String,
    #[serde(rename = "Party description")]
    description: String,
}

/// Reads the party registry from a CSV file with the columns `Party code` and `Party description`.
///
/// Other columns are ignored. Duplicate codes keep their first description.
pub fn read_parties(path: &str) -> RunResult<PartyRegistry> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .context(ReadingCsvSnafu { path })?;
    let mut registry = PartyRegistry::new();
    for (idx, result) in rdr.deserialize().enumerate() {
        let row: PartyRow = result.context(ReadingCsvSnafu { path })?;
        if row.code.is_empty() {
            warn!("read_parties: {}: line {}: empty party code, skipped", path, idx + 2);
            continue;
        }
        debug!("read_parties: {:?}", row);
        if !registry.insert(row.code.clone(), row.description) {
            warn!(
                "read_parties: {}: duplicate party code {:?}, keeping the first description",
                path, row.code
            );
        }
    }
    info!("Read {} parties from {:?}", registry.len(), path);
    Ok(registry)
}

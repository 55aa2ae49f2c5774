// Writing the records as CSV, and comparing them with a reference file.

use crate::extract::io_common::STDOUT;
use crate::extract::*;

use serde::Serialize;
use std::fs;
use text_diff::print_diff;

pub const OUTPUT_COLUMNS: [&str; 6] = ["Race", "Precinct", "PrecinctCode", "Name", "Party", "Votes"];

#[derive(Debug, Serialize)]
struct OutputRow<'a> {
    #[serde(rename = "Race")]
    race: &'a str,
    #[serde(rename = "Precinct")]
    precinct: &'a str,
    #[serde(rename = "PrecinctCode")]
    precinct_code: Option<u32>,
    #[serde(rename = "Name")]
    name: &'a str,
    #[serde(rename = "Party")]
    party: Option<&'a str>,
    #[serde(rename = "Votes")]
    votes: Option<u64>,
}

impl<'a> From<&'a ResultRecord> for OutputRow<'a> {
    fn from(r: &'a ResultRecord) -> Self {
        OutputRow {
            race: &r.race,
            precinct: &r.precinct_label,
            precinct_code: r.precinct_code,
            name: &r.candidate_name,
            party: r.party.as_deref(),
            votes: r.votes,
        }
    }
}

/// The CSV text of the records. The header is always written, even without records.
pub fn records_to_csv(records: &[ResultRecord]) -> RunResult<String> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    wtr.write_record(OUTPUT_COLUMNS).context(WritingCsvSnafu {})?;
    for record in records {
        wtr.serialize(OutputRow::from(record))
            .context(WritingCsvSnafu {})?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
        .context(WritingCsvSnafu {})?;
    match String::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(e) => whatever!("The CSV output is not valid UTF-8: {}", e),
    }
}

/// Writes to the given path, or to the standard output when the path is `stdout` or missing.
pub fn write_output(path: Option<&str>, contents: &str) -> RunResult<()> {
    match path {
        None | Some(STDOUT) => {
            print!("{}", contents);
        }
        Some(p) => {
            fs::write(p, contents).context(WritingOutputSnafu { path: p })?;
            info!("Wrote results to {:?}", p);
        }
    }
    Ok(())
}

/// Fails if the produced CSV differs from the reference file, after printing the differences.
pub fn check_reference(path: &str, produced: &str) -> RunResult<()> {
    let reference = fs::read_to_string(path)
        .context(OpeningFileSnafu { path })?
        .replace("\r\n", "\n");
    if reference != produced {
        warn!("Found differences with the reference file {:?}", path);
        print_diff(reference.as_str(), produced, "\n");
        return ReferenceMismatchSnafu { path }.fail();
    }
    info!("The results match the reference file {:?}", path);
    Ok(())
}

// ********* Input data structures ***********

use std::collections::HashMap;
use std::error::Error;
use std::fmt::Display;

/// The text that marks the row just above the candidate names of a race.
pub const VOTE_FOR_MARKERS: [&str; 2] = ["VOTE FOR 1", "VOTE FOR 2"];

/// A single cell of an extracted table.
///
/// `None` is a blank cell, or the continuation of a merged cell.
pub type Cell = Option<String>;

/// A table as produced by the upstream PDF table extraction.
///
/// It is expected to be rectangular (all the rows as wide as the header row)
/// but the extraction code does not rely on it: every access is checked.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct RawTable {
    rows: Vec<Vec<Cell>>,
}

impl RawTable {
    pub fn new(rows: Vec<Vec<Cell>>) -> RawTable {
        RawTable { rows }
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// The first row, which holds the race names.
    pub fn header(&self) -> &[Cell] {
        self.rows.first().map(|r| r.as_slice()).unwrap_or(&[])
    }

    /// Number of columns, as defined by the header row.
    pub fn num_columns(&self) -> usize {
        self.header().len()
    }

    /// The text of a cell. Blank and out of range cells both return `None`.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .and_then(|c| c.as_deref())
    }
}

/// All the tables found on one page of a document.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RawPage {
    /// 1-based, as printed by PDF tools.
    pub page_number: u32,
    pub tables: Vec<RawTable>,
}

/// The tables of a whole document, in page order.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct RawDocument {
    pub pages: Vec<RawPage>,
}

/// The text orientation settings that the upstream table extraction must use.
///
/// The reports are printed with rotated header cells. Changing any of these
/// changes how the cells are segmented, and the tables are not recognized
/// anymore.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct TableSettings {
    pub text_line_dir_rotated: &'static str,
    pub text_char_dir_rotated: &'static str,
    pub text_keep_blank_chars: bool,
}

impl TableSettings {
    pub const REQUIRED: TableSettings = TableSettings {
        text_line_dir_rotated: "rtl",
        text_char_dir_rotated: "ttb",
        text_keep_blank_chars: true,
    };
}

/// Mapping from the short party codes printed before candidate names to the full party names.
///
/// ```
/// use precinct_results::PartyRegistry;
///
/// let registry = PartyRegistry::from_pairs(vec![
///     ("DEM".to_string(), "Democratic Party".to_string()),
///     ("DEM".to_string(), "Ignored".to_string()),
/// ]);
/// assert_eq!(registry.lookup("DEM"), Some("Democratic Party"));
/// assert_eq!(registry.lookup("REP"), None);
/// ```
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct PartyRegistry {
    parties: HashMap<String, String>,
}

impl PartyRegistry {
    pub fn new() -> PartyRegistry {
        PartyRegistry::default()
    }

    /// Builds a registry from (code, description) pairs.
    /// When a code appears multiple times, the first description is kept.
    pub fn from_pairs<I>(pairs: I) -> PartyRegistry
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut registry = PartyRegistry::new();
        for (code, description) in pairs {
            registry.insert(code, description);
        }
        registry
    }

    /// Adds a party. Returns false (and keeps the existing entry) if the code is already registered.
    pub fn insert(&mut self, code: String, description: String) -> bool {
        if self.parties.contains_key(&code) {
            return false;
        }
        self.parties.insert(code, description);
        true
    }

    pub fn lookup(&self, code: &str) -> Option<&str> {
        self.parties.get(code).map(|s| s.as_str())
    }

    /// Reverse lookup: the code registered for a full party name.
    pub fn code_for(&self, description: &str) -> Option<&str> {
        self.parties
            .iter()
            .filter(|(_, d)| d.as_str() == description)
            .map(|(c, _)| c.as_str())
            .min()
    }

    pub fn len(&self) -> usize {
        self.parties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parties.is_empty()
    }
}

/// What to do when a table fails to be extracted.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Default)]
pub enum ErrorPolicy {
    /// Stop at the first table that fails.
    #[default]
    Abort,
    /// Attempt all the tables and report all the failures at the end.
    /// No record is returned if any table failed.
    Collect,
}

// ******** Intermediate data structures *********

/// A contiguous range of columns `[start, end)` holding the results of one race.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RaceBand {
    /// The race name, as found in the header cell at `start`.
    pub race: String,
    pub start: usize,
    pub end: usize,
}

impl RaceBand {
    pub fn width(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct Candidate {
    pub name: String,
    pub party: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct Precinct {
    pub label: String,
    /// The leading number of the label, if any (`12` for `12 - Main St`).
    pub code: Option<u32>,
}

// ******** Output data structures *********

/// The result of one candidate in one precinct.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct ResultRecord {
    pub race: String,
    pub precinct_label: String,
    pub precinct_code: Option<u32>,
    pub candidate_name: String,
    pub party: Option<String>,
    /// `None` when the tally cell was blank. This is different from zero votes.
    pub votes: Option<u64>,
}

/// All the records of a document, with some counters for reporting.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Extraction {
    pub records: Vec<ResultRecord>,
    pub pages: usize,
    pub tables_seen: usize,
    pub tables_extracted: usize,
}

/// Errors that prevent a table from being extracted.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum ExtractionError {
    /// A tally cell that is not a non-negative integer once the separators are removed.
    MalformedTally { text: String },
    /// No marker row (or no row after it) for this race.
    NoCandidatesFound { race: String },
    CandidateRowTooShort {
        race: String,
        row: usize,
        width: usize,
        needed: usize,
    },
    BlankCandidate {
        race: String,
        row: usize,
        column: usize,
    },
    MissingPrecinct { row: usize },
    TallyRowTooShort {
        row: usize,
        width: usize,
        needed: usize,
    },
    /// The header row does not start with a race name after the precinct column.
    MissingRaceName { column: usize },
    /// The candidates given for a band do not match its columns.
    CandidateCountMismatch {
        race: String,
        candidates: usize,
        columns: usize,
    },
}

impl Error for ExtractionError {}

impl Display for ExtractionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractionError::MalformedTally { text } => {
                write!(f, "malformed tally {:?}", text)
            }
            ExtractionError::NoCandidatesFound { race } => {
                write!(f, "no candidates found for race {:?}", race)
            }
            ExtractionError::CandidateRowTooShort {
                race,
                row,
                width,
                needed,
            } => write!(
                f,
                "candidate row {} of race {:?} has {} columns, {} needed",
                row, race, width, needed
            ),
            ExtractionError::BlankCandidate { race, row, column } => write!(
                f,
                "blank candidate name in race {:?} at row {}, column {}",
                race, row, column
            ),
            ExtractionError::MissingPrecinct { row } => {
                write!(f, "missing precinct label at row {}", row)
            }
            ExtractionError::TallyRowTooShort { row, width, needed } => write!(
                f,
                "tally row {} has {} columns, {} needed",
                row, width, needed
            ),
            ExtractionError::MissingRaceName { column } => {
                write!(f, "missing race name in header column {}", column)
            }
            ExtractionError::CandidateCountMismatch {
                race,
                candidates,
                columns,
            } => write!(
                f,
                "{} candidates given for race {:?}, which has {} columns",
                candidates, race, columns
            ),
        }
    }
}

/// An extraction error, located in the document.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct TableError {
    pub page_number: u32,
    /// 0-based index of the table within its page.
    pub table_index: usize,
    pub error: ExtractionError,
}

impl Display for TableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "page {} table {}: {}",
            self.page_number, self.table_index, self.error
        )
    }
}

/// Errors that prevent a document from being extracted. Always contains at least one error.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct DocumentError {
    pub errors: Vec<TableError>,
}

impl Error for DocumentError {}

impl Display for DocumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.errors.as_slice() {
            [e] => write!(f, "{}", e),
            errs => {
                write!(f, "{} tables failed:", errs.len())?;
                for e in errs {
                    write!(f, "\n  {}", e)?;
                }
                Ok(())
            }
        }
    }
}

/*!
Recovers per-precinct election results from the tables of PDF result reports.

The tables are expected to be already extracted from the PDF (as a grid of optional strings per
table). A single table may hold several races side by side: the first row holds the race names,
and each race occupies a band of columns, separated from the next one by blank columns.

```text
|               | Mayor         |         |         | Sheriff    |   |
|               | VOTE FOR 1    |         |         | VOTE FOR 1 |   |
|               | DEM Ann Smith | Bob Roe |         | Carl Poe   |   |
| 1 - Astoria   | 1,204         | 1,012   |         | 2,001      |   |
| 2 - Warrenton | 611           |         |         | 598        |   |
```

The main entry points are [extract_results] for a single table and [extract_document] for all
the tables of a document. The lower level steps ([segment_bands], [extract_candidates],
[extract_tallies]) are also available.
*/
mod config;
pub mod builder;
pub mod manual;
pub mod normalize;

use log::{debug, info, warn};

pub use crate::config::*;
use crate::normalize::*;

/// True if the table contains a marker row, i.e. if it holds election results.
///
/// Other tables (cover pages, notes) are not results and should be skipped.
pub fn is_result_table(table: &RawTable) -> bool {
    table
        .rows()
        .iter()
        .any(|row| row.iter().any(is_marker))
}

fn is_marker(cell: &Cell) -> bool {
    match cell {
        Some(text) => VOTE_FOR_MARKERS.contains(&text.as_str()),
        None => false,
    }
}

/// Splits the columns of a table into one band per race, using the header row.
///
/// Column 0 holds the precincts and is never part of a band. A race name is only written in
/// the first column of its band, the other columns are blank. The blank column just before the
/// next race name is a gap and does not belong to any band. The last column of the table does
/// not belong to any band either.
///
/// The same race name repeated after a gap continues the same band.
pub fn segment_bands(header: &[Cell]) -> Result<Vec<RaceBand>, ExtractionError> {
    let mut race: &str = match header.get(1) {
        Some(Some(name)) => name,
        _ => return Err(ExtractionError::MissingRaceName { column: 1 }),
    };
    let mut band_start: usize = 1;
    let mut gap_start: usize = 1;
    let mut bands: Vec<RaceBand> = Vec::new();

    for (idx, cell) in header.iter().enumerate().skip(1) {
        match cell {
            None => {
                gap_start = idx;
            }
            Some(name) if name != race => {
                bands.push(make_band(race, band_start, gap_start));
                band_start = idx;
                race = name;
            }
            Some(_) => {}
        }
    }
    bands.push(make_band(race, band_start, header.len() - 1));

    debug!("segment_bands: bands: {:?}", bands);
    Ok(bands)
}

// Races that are not separated by a gap end up with an empty band.
fn make_band(race: &str, start: usize, end: usize) -> RaceBand {
    RaceBand {
        race: race.to_string(),
        start,
        end: end.max(start),
    }
}

/// Finds the candidates of a race.
///
/// The candidates are in the row just after the first marker row of the band. Returns the
/// candidates, in column order, and the index of the first row of tallies.
/// A blank or whitespace-only name cell is an error.
pub fn extract_candidates(
    table: &RawTable,
    band: &RaceBand,
    parties: &PartyRegistry,
) -> Result<(Vec<Candidate>, usize), ExtractionError> {
    let no_candidates = || ExtractionError::NoCandidatesFound {
        race: band.race.clone(),
    };

    let marker_row = table
        .rows()
        .iter()
        .position(|row| row.get(band.start).map(is_marker).unwrap_or(false))
        .ok_or_else(no_candidates)?;
    if band.is_empty() {
        return Err(no_candidates());
    }

    let names_row = marker_row + 1;
    let row = table.rows().get(names_row).ok_or_else(no_candidates)?;
    if row.len() < band.end {
        return Err(ExtractionError::CandidateRowTooShort {
            race: band.race.clone(),
            row: names_row,
            width: row.len(),
            needed: band.end,
        });
    }

    let mut candidates: Vec<Candidate> = Vec::with_capacity(band.width());
    for column in band.start..band.end {
        match &row[column] {
            Some(text) if !text.trim().is_empty() => {
                candidates.push(parse_candidate(text, parties))
            }
            _ => {
                return Err(ExtractionError::BlankCandidate {
                    race: band.race.clone(),
                    row: names_row,
                    column,
                })
            }
        }
    }
    debug!(
        "extract_candidates: race {:?}: marker row {}: candidates: {:?}",
        band.race, marker_row, candidates
    );
    Ok((candidates, marker_row + 2))
}

/// Lazily walks the tallies of a race, starting at row `offset`.
///
/// One record is produced per precinct row and per candidate, row by row, then column by
/// column. Blank cells produce a record without votes.
/// After the first error, the iterator stops.
///
/// `candidates` must have one entry per column of the band, as returned by
/// [extract_candidates]. Otherwise the only item is a `CandidateCountMismatch` error.
pub fn extract_tallies<'a>(
    table: &'a RawTable,
    band: &RaceBand,
    candidates: &'a [Candidate],
    offset: usize,
) -> TallyIter<'a> {
    let mismatch = if candidates.len() != band.width() {
        Some(ExtractionError::CandidateCountMismatch {
            race: band.race.clone(),
            candidates: candidates.len(),
            columns: band.width(),
        })
    } else {
        None
    };
    TallyIter {
        table,
        race: parse_race(&band.race),
        start: band.start,
        end: band.end,
        candidates,
        row_idx: offset,
        column: band.start,
        precinct: None,
        mismatch,
        done: false,
    }
}

/// Iterator returned by [extract_tallies].
pub struct TallyIter<'a> {
    table: &'a RawTable,
    race: String,
    start: usize,
    end: usize,
    candidates: &'a [Candidate],
    row_idx: usize,
    column: usize,
    // Parsed once for all the cells of the current row.
    precinct: Option<Precinct>,
    mismatch: Option<ExtractionError>,
    done: bool,
}

impl<'a> TallyIter<'a> {
    fn fail(&mut self, err: ExtractionError) -> Option<Result<ResultRecord, ExtractionError>> {
        self.done = true;
        Some(Err(err))
    }
}

impl<'a> Iterator for TallyIter<'a> {
    type Item = Result<ResultRecord, ExtractionError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if let Some(err) = self.mismatch.take() {
            return self.fail(err);
        }
        let table = self.table;
        loop {
            let row = match table.rows().get(self.row_idx) {
                Some(row) => row,
                None => {
                    self.done = true;
                    return None;
                }
            };
            if self.column >= self.end {
                self.row_idx += 1;
                self.column = self.start;
                self.precinct = None;
                continue;
            }

            if self.precinct.is_none() {
                let label = match row.first() {
                    Some(Some(label)) => label,
                    _ => {
                        return self.fail(ExtractionError::MissingPrecinct { row: self.row_idx });
                    }
                };
                if row.len() < self.end {
                    return self.fail(ExtractionError::TallyRowTooShort {
                        row: self.row_idx,
                        width: row.len(),
                        needed: self.end,
                    });
                }
                self.precinct = Some(parse_precinct(label));
            }

            let votes = match row[self.column].as_deref() {
                None | Some("") => None,
                Some(text) => match parse_tally(text) {
                    Ok(v) => Some(v),
                    Err(e) => return self.fail(e),
                },
            };
            let candidate = &self.candidates[self.column - self.start];
            self.column += 1;

            let precinct = self.precinct.as_ref()?;
            return Some(Ok(ResultRecord {
                race: self.race.clone(),
                precinct_label: precinct.label.clone(),
                precinct_code: precinct.code,
                candidate_name: candidate.name.clone(),
                party: candidate.party.clone(),
                votes,
            }));
        }
    }
}

/// Extracts all the records of one table, race after race.
///
/// The table is assumed to be a result table (see [is_result_table]).
pub fn extract_results(
    table: &RawTable,
    parties: &PartyRegistry,
) -> Result<Vec<ResultRecord>, ExtractionError> {
    let bands = segment_bands(table.header())?;
    let mut res: Vec<ResultRecord> = Vec::new();
    for band in bands.iter() {
        let (candidates, offset) = extract_candidates(table, band, parties)?;
        for record in extract_tallies(table, band, &candidates, offset) {
            res.push(record?);
        }
    }
    debug!(
        "extract_results: {} races, {} records",
        bands.len(),
        res.len()
    );
    Ok(res)
}

/// Extracts the records of all the result tables of a document.
///
/// Records are in the order of the pages, then of the tables within a page.
/// Tables that are not result tables are skipped.
pub fn extract_document(
    document: &RawDocument,
    parties: &PartyRegistry,
    policy: ErrorPolicy,
) -> Result<Extraction, DocumentError> {
    info!(
        "extract_document: processing {} pages, {} registered parties, policy {:?}",
        document.pages.len(),
        parties.len(),
        policy
    );
    let mut extraction = Extraction {
        pages: document.pages.len(),
        ..Extraction::default()
    };
    let mut errors: Vec<TableError> = Vec::new();

    for page in document.pages.iter() {
        for (table_index, table) in page.tables.iter().enumerate() {
            extraction.tables_seen += 1;
            if !is_result_table(table) {
                debug!(
                    "extract_document: page {} table {}: not a result table, skipping",
                    page.page_number, table_index
                );
                continue;
            }
            match extract_results(table, parties) {
                Ok(mut records) => {
                    debug!(
                        "extract_document: page {} table {}: {} records",
                        page.page_number,
                        table_index,
                        records.len()
                    );
                    extraction.tables_extracted += 1;
                    extraction.records.append(&mut records);
                }
                Err(error) => {
                    let err = TableError {
                        page_number: page.page_number,
                        table_index,
                        error,
                    };
                    warn!("extract_document: {}", err);
                    errors.push(err);
                    if policy == ErrorPolicy::Abort {
                        return Err(DocumentError { errors });
                    }
                }
            }
        }
    }

    if !errors.is_empty() {
        return Err(DocumentError { errors });
    }
    info!(
        "extract_document: {} records from {} result tables ({} tables seen)",
        extraction.records.len(),
        extraction.tables_extracted,
        extraction.tables_seen
    );
    Ok(extraction)
}

#[cfg(test)]
mod tests {
    use super::builder::Builder;
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn s(x: &str) -> Cell {
        Some(x.to_string())
    }

    fn row(cells: &[Option<&str>]) -> Vec<Cell> {
        cells.iter().map(|c| c.map(|x| x.to_string())).collect()
    }

    fn band(race: &str, start: usize, end: usize) -> RaceBand {
        RaceBand {
            race: race.to_string(),
            start,
            end,
        }
    }

    fn parties() -> PartyRegistry {
        PartyRegistry::from_pairs(vec![
            ("DEM".to_string(), "Democratic Party".to_string()),
            ("REP".to_string(), "Republican Party".to_string()),
        ])
    }

    fn record(
        race: &str,
        precinct: &str,
        code: Option<u32>,
        name: &str,
        party: Option<&str>,
        votes: Option<u64>,
    ) -> ResultRecord {
        ResultRecord {
            race: race.to_string(),
            precinct_label: precinct.to_string(),
            precinct_code: code,
            candidate_name: name.to_string(),
            party: party.map(|p| p.to_string()),
            votes,
        }
    }

    // Two races side by side, as found in the county reports.
    fn two_race_table() -> RawTable {
        RawTable::new(vec![
            row(&[None, Some("Mayor"), None, None, Some("Measure\n4-231"), None, None]),
            row(&[None, Some("VOTE FOR 1"), None, None, Some("VOTE FOR 1"), None, None]),
            row(&[None, Some("DEM Ann\nSmith"), Some("Write-in"), None, Some("Yes"), Some("No"), None]),
            row(&[Some("1 - Astoria\nNorth"), Some("1,204"), Some("3"), None, Some("900"), Some("1,100"), None]),
            row(&[Some("Total"), Some("1,204"), Some(""), None, Some("900"), Some("1,100"), None]),
        ])
    }

    #[test]
    fn classify_result_table() {
        assert!(is_result_table(&two_race_table()));
        let t = RawTable::new(vec![row(&[Some("x"), Some("VOTE FOR 2")])]);
        assert!(is_result_table(&t));
    }

    #[test]
    fn classify_other_tables() {
        let t = RawTable::new(vec![
            row(&[Some("Official results"), None]),
            row(&[Some("VOTE FOR 1 "), Some("vote for 1")]),
        ]);
        assert!(!is_result_table(&t));
        assert!(!is_result_table(&RawTable::default()));
    }

    #[test]
    fn single_band() {
        init();
        let header = row(&[None, Some("Mayor"), None, None, None]);
        assert_eq!(segment_bands(&header), Ok(vec![band("Mayor", 1, 4)]));
        let header = row(&[Some("Precinct"), Some("Mayor"), None, None]);
        assert_eq!(segment_bands(&header), Ok(vec![band("Mayor", 1, 3)]));
    }

    #[test]
    fn bands_exclude_gap() {
        init();
        let header = row(&[None, Some("A"), None, None, Some("B"), None, None]);
        assert_eq!(
            segment_bands(&header),
            Ok(vec![band("A", 1, 3), band("B", 4, 6)])
        );
    }

    #[test]
    fn three_bands() {
        let header = row(&[
            None,
            Some("A"),
            None,
            Some("B"),
            None,
            None,
            None,
            Some("C"),
            None,
        ]);
        assert_eq!(
            segment_bands(&header),
            Ok(vec![band("A", 1, 2), band("B", 3, 6), band("C", 7, 8)])
        );
    }

    #[test]
    fn repeated_race_is_one_band() {
        let header = row(&[None, Some("A"), None, None, Some("A"), None, None]);
        assert_eq!(segment_bands(&header), Ok(vec![band("A", 1, 6)]));
    }

    #[test]
    fn races_without_gap() {
        let header = row(&[None, Some("A"), Some("B"), None]);
        assert_eq!(
            segment_bands(&header),
            Ok(vec![band("A", 1, 1), band("B", 2, 3)])
        );
    }

    #[test]
    fn missing_race_name() {
        let err = Err(ExtractionError::MissingRaceName { column: 1 });
        assert_eq!(segment_bands(&row(&[None, None, Some("A")])), err);
        assert_eq!(segment_bands(&row(&[Some("A")])), err);
        assert_eq!(segment_bands(&[]), err);
    }

    #[test]
    fn candidates_and_offset() {
        let table = two_race_table();
        let (cands, offset) = extract_candidates(&table, &band("Mayor", 1, 3), &parties()).unwrap();
        assert_eq!(offset, 3);
        assert_eq!(
            cands,
            vec![
                Candidate {
                    name: "Ann Smith".to_string(),
                    party: Some("Democratic Party".to_string())
                },
                Candidate {
                    name: "Write-in".to_string(),
                    party: None
                },
            ]
        );
    }

    #[test]
    fn no_marker_row() {
        let table = RawTable::new(vec![
            row(&[None, Some("A"), None]),
            row(&[None, Some("Ann"), None]),
            row(&[Some("1 - X"), Some("1"), None]),
        ]);
        assert_eq!(
            extract_candidates(&table, &band("A", 1, 2), &parties()),
            Err(ExtractionError::NoCandidatesFound {
                race: "A".to_string()
            })
        );
        // The marker must be at the start of the band.
        let table = RawTable::new(vec![
            row(&[None, Some("A"), None, None]),
            row(&[None, None, Some("VOTE FOR 1"), None]),
            row(&[None, Some("Ann"), Some("Bob"), None]),
        ]);
        assert!(matches!(
            extract_candidates(&table, &band("A", 1, 3), &parties()),
            Err(ExtractionError::NoCandidatesFound { .. })
        ));
    }

    #[test]
    fn marker_on_last_row() {
        let table = RawTable::new(vec![
            row(&[None, Some("A"), None]),
            row(&[None, Some("VOTE FOR 1"), None]),
        ]);
        assert!(matches!(
            extract_candidates(&table, &band("A", 1, 2), &parties()),
            Err(ExtractionError::NoCandidatesFound { .. })
        ));
    }

    #[test]
    fn empty_band_has_no_candidates() {
        let table = RawTable::new(vec![
            row(&[None, Some("A"), Some("B"), None]),
            row(&[None, Some("VOTE FOR 1"), Some("VOTE FOR 1"), None]),
            row(&[None, Some("Ann"), Some("Bob"), None]),
        ]);
        assert!(matches!(
            extract_candidates(&table, &band("A", 1, 1), &parties()),
            Err(ExtractionError::NoCandidatesFound { .. })
        ));
        assert!(matches!(
            extract_results(&table, &parties()),
            Err(ExtractionError::NoCandidatesFound { .. })
        ));
    }

    #[test]
    fn short_candidate_row() {
        let table = RawTable::new(vec![
            row(&[None, Some("A"), None, None, None]),
            row(&[None, Some("VOTE FOR 1"), None, None, None]),
            row(&[None, Some("Ann"), Some("Bob")]),
        ]);
        assert_eq!(
            extract_candidates(&table, &band("A", 1, 4), &parties()),
            Err(ExtractionError::CandidateRowTooShort {
                race: "A".to_string(),
                row: 2,
                width: 3,
                needed: 4
            })
        );
    }

    #[test]
    fn blank_candidate() {
        let table = RawTable::new(vec![
            row(&[None, Some("A"), None, None]),
            row(&[None, Some("VOTE FOR 1"), None, None]),
            row(&[None, Some("Ann"), None, None]),
        ]);
        assert_eq!(
            extract_candidates(&table, &band("A", 1, 3), &parties()),
            Err(ExtractionError::BlankCandidate {
                race: "A".to_string(),
                row: 2,
                column: 2
            })
        );
        for text in ["", "  ", "\n"] {
            let table = RawTable::new(vec![
                row(&[None, Some("A"), None, None]),
                row(&[None, Some("VOTE FOR 1"), None, None]),
                row(&[None, Some("Ann"), Some(text), None]),
                row(&[Some("1 - X"), Some("3"), Some("7"), None]),
            ]);
            assert_eq!(
                extract_results(&table, &parties()),
                Err(ExtractionError::BlankCandidate {
                    race: "A".to_string(),
                    row: 2,
                    column: 2
                }),
                "{:?}",
                text
            );
        }
    }

    #[test]
    fn tallies_order_and_blanks() {
        let table = two_race_table();
        let b = band("Mayor", 1, 3);
        let (cands, offset) = extract_candidates(&table, &b, &parties()).unwrap();
        let records: Vec<ResultRecord> = extract_tallies(&table, &b, &cands, offset)
            .collect::<Result<_, _>>()
            .unwrap();
        let dem = Some("Democratic Party");
        assert_eq!(
            records,
            vec![
                record("Mayor", "1 - Astoria North", Some(1), "Ann Smith", dem, Some(1204)),
                record("Mayor", "1 - Astoria North", Some(1), "Write-in", None, Some(3)),
                record("Mayor", "Total", None, "Ann Smith", dem, Some(1204)),
                record("Mayor", "Total", None, "Write-in", None, None),
            ]
        );
    }

    #[test]
    fn tallies_are_restartable() {
        let table = two_race_table();
        let b = band("Mayor", 1, 3);
        let (cands, offset) = extract_candidates(&table, &b, &parties()).unwrap();
        let first: Vec<_> = extract_tallies(&table, &b, &cands, offset).collect();
        let second: Vec<_> = extract_tallies(&table, &b, &cands, offset).collect();
        assert_eq!(first.len(), 4);
        assert_eq!(first, second);
    }

    #[test]
    fn tallies_need_one_candidate_per_column() {
        let table = two_race_table();
        let b = band("Mayor", 1, 3);
        let (cands, offset) = extract_candidates(&table, &b, &parties()).unwrap();
        let records: Vec<_> = extract_tallies(&table, &b, &cands[..1], offset).collect();
        assert_eq!(
            records,
            vec![Err(ExtractionError::CandidateCountMismatch {
                race: "Mayor".to_string(),
                candidates: 1,
                columns: 2
            })]
        );
        let wide = band("Mayor", 1, 4);
        assert_eq!(extract_tallies(&table, &wide, &cands, offset).count(), 1);
    }

    #[test]
    fn malformed_tally_stops() {
        let table = RawTable::new(vec![
            row(&[None, Some("A"), None, None]),
            row(&[None, Some("VOTE FOR 1"), None, None]),
            row(&[None, Some("Ann"), Some("Bob"), None]),
            row(&[Some("1 - X"), Some("12a"), Some("3"), None]),
            row(&[Some("2 - Y"), Some("1"), Some("3"), None]),
        ]);
        let b = band("A", 1, 3);
        let (cands, offset) = extract_candidates(&table, &b, &parties()).unwrap();
        let records: Vec<_> = extract_tallies(&table, &b, &cands, offset).collect();
        assert_eq!(
            records,
            vec![Err(ExtractionError::MalformedTally {
                text: "12a".to_string()
            })]
        );
        assert_eq!(
            extract_results(&table, &parties()),
            Err(ExtractionError::MalformedTally {
                text: "12a".to_string()
            })
        );
    }

    #[test]
    fn missing_precinct_and_short_row() {
        let header = vec![
            row(&[None, Some("A"), None]),
            row(&[None, Some("VOTE FOR 1"), None]),
            row(&[None, Some("Ann"), None]),
        ];
        let mut rows = header.clone();
        rows.push(row(&[None, Some("1"), None]));
        assert_eq!(
            extract_results(&RawTable::new(rows), &parties()),
            Err(ExtractionError::MissingPrecinct { row: 3 })
        );
        let mut rows = header;
        rows.push(row(&[Some("1 - X")]));
        assert_eq!(
            extract_results(&RawTable::new(rows), &parties()),
            Err(ExtractionError::TallyRowTooShort {
                row: 3,
                width: 1,
                needed: 2
            })
        );
    }

    #[test]
    fn extract_two_races() {
        init();
        let records = extract_results(&two_race_table(), &parties()).unwrap();
        assert_eq!(records.len(), 8);
        assert_eq!(
            records[4],
            record("Measure 4-231", "1 - Astoria North", Some(1), "Yes", None, Some(900))
        );
        assert_eq!(
            records[7],
            record("Measure 4-231", "Total", None, "No", None, Some(1100))
        );
    }

    #[test]
    fn round_trip() {
        init();
        let parties = parties();
        let expected = vec![
            record("Mayor", "1 - Astoria", Some(1), "Jane Smith", Some("Democratic Party"), Some(1234)),
            record("Mayor", "1 - Astoria", Some(1), "John Doe", None, Some(87)),
            record("Mayor", "2 - Warrenton", Some(2), "Jane Smith", Some("Democratic Party"), Some(0)),
            record("Mayor", "2 - Warrenton", Some(2), "John Doe", None, None),
        ];
        let mut builder = Builder::new(&parties);
        for r in expected.iter() {
            builder.add_record(r).unwrap();
        }
        let table = builder.build();
        assert!(is_result_table(&table));
        assert_eq!(extract_results(&table, &parties), Ok(expected));
    }

    #[test]
    fn round_trip_several_races() {
        let parties = parties();
        let expected = vec![
            record("Mayor", "1 - Astoria", Some(1), "Jane Smith", Some("Democratic Party"), Some(1)),
            record("Mayor", "1 - Astoria", Some(1), "Bob Roe", Some("Republican Party"), Some(2)),
            record("Mayor", "Total", None, "Jane Smith", Some("Democratic Party"), Some(1)),
            record("Mayor", "Total", None, "Bob Roe", Some("Republican Party"), Some(2)),
            record("Sheriff", "1 - Astoria", Some(1), "Carl Poe", None, Some(3)),
            record("Sheriff", "Total", None, "Carl Poe", None, Some(3)),
        ];
        let mut builder = Builder::new(&parties);
        for r in expected.iter() {
            builder.add_record(r).unwrap();
        }
        let records = extract_results(&builder.build(), &parties).unwrap();
        assert_eq!(records, expected);
    }

    fn document(tables: Vec<Vec<RawTable>>) -> RawDocument {
        RawDocument {
            pages: tables
                .into_iter()
                .enumerate()
                .map(|(idx, tables)| RawPage {
                    page_number: (idx + 1) as u32,
                    tables,
                })
                .collect(),
        }
    }

    fn broken_table() -> RawTable {
        RawTable::new(vec![
            row(&[None, Some("A"), None]),
            row(&[None, Some("VOTE FOR 1"), None]),
            row(&[None, Some("Ann"), None]),
            row(&[Some("1 - X"), Some("many"), None]),
        ])
    }

    #[test]
    fn document_skips_other_tables() {
        init();
        let cover = RawTable::new(vec![vec![s("Clatsop County"), s("Official Results")]]);
        let doc = document(vec![vec![cover.clone()], vec![two_race_table(), cover]]);
        let res = extract_document(&doc, &parties(), ErrorPolicy::Abort).unwrap();
        assert_eq!(res.pages, 2);
        assert_eq!(res.tables_seen, 3);
        assert_eq!(res.tables_extracted, 1);
        assert_eq!(res.records.len(), 8);

        let doc = document(vec![vec![RawTable::new(vec![vec![s("notes")]])]]);
        let res = extract_document(&doc, &parties(), ErrorPolicy::Abort).unwrap();
        assert!(res.records.is_empty());
    }

    #[test]
    fn document_abort_policy() {
        let doc = document(vec![
            vec![two_race_table(), broken_table()],
            vec![broken_table()],
        ]);
        let err = extract_document(&doc, &parties(), ErrorPolicy::Abort).unwrap_err();
        assert_eq!(
            err.errors,
            vec![TableError {
                page_number: 1,
                table_index: 1,
                error: ExtractionError::MalformedTally {
                    text: "many".to_string()
                }
            }]
        );
    }

    #[test]
    fn document_collect_policy() {
        let doc = document(vec![
            vec![two_race_table(), broken_table()],
            vec![broken_table(), two_race_table()],
        ]);
        let err = extract_document(&doc, &parties(), ErrorPolicy::Collect).unwrap_err();
        let positions: Vec<(u32, usize)> = err
            .errors
            .iter()
            .map(|e| (e.page_number, e.table_index))
            .collect();
        assert_eq!(positions, vec![(1, 1), (2, 0)]);
        assert!(err.to_string().starts_with("2 tables failed:"));
    }
}

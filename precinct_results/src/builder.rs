pub use crate::config::*;

use std::collections::HashMap;
use std::error::Error;
use std::fmt::Display;

use crate::normalize::parse_precinct;

/// Lays out result records as a report table, the way they appear in the PDF reports.
///
/// This is mostly useful to build test fixtures: extracting the built table returns the
/// records that were added.
///
/// ```
/// use precinct_results::builder::Builder;
/// use precinct_results::{extract_results, PartyRegistry, ResultRecord};
/// # use precinct_results::builder::BuilderError;
///
/// let parties = PartyRegistry::from_pairs(vec![("DEM".to_string(), "Democratic Party".to_string())]);
/// let record = ResultRecord {
///     race: "Mayor".to_string(),
///     precinct_label: "1 - Astoria".to_string(),
///     precinct_code: Some(1),
///     candidate_name: "Jane Smith".to_string(),
///     party: Some("Democratic Party".to_string()),
///     votes: Some(1234),
/// };
///
/// let mut builder = Builder::new(&parties);
/// builder.add_record(&record)?;
/// let table = builder.build();
///
/// assert_eq!(extract_results(&table, &parties), Ok(vec![record]));
/// # Ok::<(), BuilderError>(())
/// ```
pub struct Builder<'a> {
    parties: &'a PartyRegistry,
    // Races and their candidates, in order of appearance.
    races: Vec<(String, Vec<Candidate>)>,
    precincts: Vec<String>,
    // (race index, candidate index, precinct index) -> votes
    tallies: HashMap<(usize, usize, usize), Option<u64>>,
}

/// Records that cannot be laid out in a table that extracts back to them.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum BuilderError {
    UnknownParty { party: String },
    /// The name would be read back differently (e.g. it starts with a party code).
    AmbiguousCandidate { name: String },
    InconsistentPrecinctCode { label: String, code: Option<u32> },
    DuplicateRecord {
        race: String,
        precinct: String,
        candidate: String,
    },
}

impl Error for BuilderError {}

impl Display for BuilderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuilderError::UnknownParty { party } => write!(f, "unknown party {:?}", party),
            BuilderError::AmbiguousCandidate { name } => {
                write!(f, "candidate name {:?} cannot be read back", name)
            }
            BuilderError::InconsistentPrecinctCode { label, code } => write!(
                f,
                "precinct code {:?} does not match label {:?}",
                code, label
            ),
            BuilderError::DuplicateRecord {
                race,
                precinct,
                candidate,
            } => write!(
                f,
                "duplicate record for {:?} in race {:?}, precinct {:?}",
                candidate, race, precinct
            ),
        }
    }
}

impl<'a> Builder<'a> {
    pub fn new(parties: &'a PartyRegistry) -> Builder<'a> {
        Builder {
            parties,
            races: Vec::new(),
            precincts: Vec::new(),
            tallies: HashMap::new(),
        }
    }

    pub fn add_record(&mut self, record: &ResultRecord) -> Result<(), BuilderError> {
        if parse_precinct(&record.precinct_label).code != record.precinct_code {
            return Err(BuilderError::InconsistentPrecinctCode {
                label: record.precinct_label.clone(),
                code: record.precinct_code,
            });
        }
        self.check_candidate(record)?;

        let race_idx = match self.races.iter().position(|(r, _)| *r == record.race) {
            Some(idx) => idx,
            None => {
                self.races.push((record.race.clone(), Vec::new()));
                self.races.len() - 1
            }
        };
        let candidate = Candidate {
            name: record.candidate_name.clone(),
            party: record.party.clone(),
        };
        let candidates = &mut self.races[race_idx].1;
        let cand_idx = match candidates.iter().position(|c| *c == candidate) {
            Some(idx) => idx,
            None => {
                candidates.push(candidate);
                candidates.len() - 1
            }
        };
        let precinct_idx = match self
            .precincts
            .iter()
            .position(|p| *p == record.precinct_label)
        {
            Some(idx) => idx,
            None => {
                self.precincts.push(record.precinct_label.clone());
                self.precincts.len() - 1
            }
        };

        let key = (race_idx, cand_idx, precinct_idx);
        if self.tallies.contains_key(&key) {
            return Err(BuilderError::DuplicateRecord {
                race: record.race.clone(),
                precinct: record.precinct_label.clone(),
                candidate: record.candidate_name.clone(),
            });
        }
        self.tallies.insert(key, record.votes);
        Ok(())
    }

    fn check_candidate(&self, record: &ResultRecord) -> Result<(), BuilderError> {
        let name = &record.candidate_name;
        let first_token = name.split_whitespace().next();
        let ambiguous = match &record.party {
            Some(party) => {
                if self.parties.code_for(party).is_none() {
                    return Err(BuilderError::UnknownParty {
                        party: party.clone(),
                    });
                }
                // The name is rebuilt from its tokens when a party code is present.
                name.split_whitespace().collect::<Vec<_>>().join(" ") != *name
            }
            // A blank name cell cannot be extracted.
            None => first_token
                .map(|t| self.parties.lookup(t).is_some())
                .unwrap_or(true),
        };
        if ambiguous || name.contains(['\n', '\r']) {
            return Err(BuilderError::AmbiguousCandidate { name: name.clone() });
        }
        Ok(())
    }

    /// Builds the table.
    ///
    /// Every race gets a band of one column per candidate, followed by a blank column.
    /// Precincts that have no record for a candidate get a blank tally cell.
    pub fn build(&self) -> RawTable {
        let num_columns = 1 + self
            .races
            .iter()
            .map(|(_, cands)| cands.len() + 1)
            .sum::<usize>();

        let mut header: Vec<Cell> = vec![None; num_columns];
        let mut markers: Vec<Cell> = vec![None; num_columns];
        let mut names: Vec<Cell> = vec![None; num_columns];
        let mut data: Vec<Vec<Cell>> = self
            .precincts
            .iter()
            .map(|p| {
                let mut row: Vec<Cell> = vec![None; num_columns];
                row[0] = Some(p.clone());
                row
            })
            .collect();

        let mut start = 1;
        for (race_idx, (race, candidates)) in self.races.iter().enumerate() {
            header[start] = Some(race.clone());
            markers[start] = Some(VOTE_FOR_MARKERS[0].to_string());
            for (cand_idx, cand) in candidates.iter().enumerate() {
                let col = start + cand_idx;
                names[col] = Some(self.candidate_text(cand));
                for (precinct_idx, row) in data.iter_mut().enumerate() {
                    let votes = self
                        .tallies
                        .get(&(race_idx, cand_idx, precinct_idx))
                        .cloned()
                        .flatten();
                    row[col] = Some(votes.map(format_tally).unwrap_or_default());
                }
            }
            start += candidates.len() + 1;
        }

        let mut rows = vec![header, markers, names];
        rows.append(&mut data);
        RawTable::new(rows)
    }

    fn candidate_text(&self, cand: &Candidate) -> String {
        match cand.party.as_deref().and_then(|p| self.parties.code_for(p)) {
            Some(code) if cand.name.is_empty() => code.to_string(),
            Some(code) => format!("{} {}", code, cand.name),
            None => cand.name.clone(),
        }
    }
}

/// Formats a count with thousands separators, as printed in the reports.
fn format_tally(votes: u64) -> String {
    let digits = votes.to_string();
    let mut res = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, c) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            res.push(',');
        }
        res.push(c);
    }
    res
}

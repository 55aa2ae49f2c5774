//! Cleaning of individual cells into typed fields.

use log::debug;

use crate::config::*;

const PRECINCT_SEPARATOR: &str = " - ";

/// Replaces the line breaks embedded in a cell by single spaces.
fn clean_text(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\n', '\r'], " ")
}

/// Parses a vote count such as `1,234`.
///
/// Empty cells are not tallies: callers should turn them into a missing count
/// before calling this function.
pub fn parse_tally(text: &str) -> Result<u64, ExtractionError> {
    let digits: String = text.chars().filter(|c| *c != ',').collect();
    digits
        .trim()
        .parse::<u64>()
        .map_err(|_| ExtractionError::MalformedTally {
            text: text.to_string(),
        })
}

/// Parses a precinct label such as `12 - Main St`.
pub fn parse_precinct(text: &str) -> Precinct {
    let label = clean_text(text);
    let code = label
        .split(PRECINCT_SEPARATOR)
        .next()
        .filter(|tok| !tok.is_empty() && tok.chars().all(|c| c.is_ascii_digit()))
        .and_then(|tok| tok.parse::<u32>().ok());
    Precinct { label, code }
}

pub fn parse_race(text: &str) -> String {
    clean_text(text)
}

/// Parses a candidate name, which may start with a party code (`DEM Jane Smith`).
pub fn parse_candidate(text: &str, parties: &PartyRegistry) -> Candidate {
    let name = clean_text(text);
    let mut tokens = name.split_whitespace();
    if let Some(party) = tokens.next().and_then(|code| parties.lookup(code)) {
        let rest: Vec<&str> = tokens.collect();
        debug!("parse_candidate: {:?} -> party {:?}", name, party);
        return Candidate {
            name: rest.join(" "),
            party: Some(party.to_string()),
        };
    }
    Candidate { name, party: None }
}

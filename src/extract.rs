use log::{debug, info, warn};

use precinct_results::*;
use snafu::{prelude::*, Snafu};

use std::path::Path;

use crate::args::Args;
use crate::extract::config_reader::*;
use crate::extract::io_output::{check_reference, records_to_csv, write_output};

pub mod config_reader;
pub mod io_common;
pub mod io_output;
pub mod io_parties;
pub mod io_plumber;
pub mod io_tabula;
pub mod io_xlsx;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum RunError {
    #[snafu(display("Error opening file {path}"))]
    OpeningFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON file {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error opening Excel file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("Worksheet {name:?} not found in {path}"))]
    MissingWorksheet { name: String, path: String },
    #[snafu(display("Error reading CSV file {path}"))]
    ReadingCsv { source: csv::Error, path: String },
    #[snafu(display("Error writing CSV output"))]
    WritingCsv { source: csv::Error },
    #[snafu(display("Error writing output file {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Extraction failed, no output written: {source}"))]
    Extraction { source: DocumentError },
    #[snafu(display("No table source in the configuration"))]
    NoTableSource {},
    #[snafu(display("Unknown table provider {provider:?}"))]
    UnknownProvider { provider: String },
    #[snafu(display("Unknown error policy {policy:?}"))]
    UnknownErrorPolicy { policy: String },
    #[snafu(display("Missing parent directory for {path}"))]
    MissingParentDir { path: String },
    #[snafu(display("The extracted results differ from the reference {path}"))]
    ReferenceMismatch { path: String },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type RunResult<T> = Result<T, RunError>;

/// Runs the program with the command line arguments.
///
/// The arguments given on the command line take precedence over the configuration file.
pub fn run(args: &Args) -> RunResult<()> {
    let mut config = match (&args.config, &args.input) {
        (Some(config_path), _) => read_config(config_path)?,
        (None, Some(_)) => ExtractConfig::default(),
        (None, None) => {
            whatever!("No input: one of the --config or --input options must be provided")
        }
    };

    if let Some(input) = &args.input {
        config.table_sources = vec![TableSource {
            provider: args.input_type.clone(),
            file_path: input.clone(),
            excel_worksheet_name: args.excel_worksheet_name.clone(),
        }];
    }
    if args.out.is_some() {
        config.output_settings.output_file = args.out.clone();
    }
    if args.parties.is_some() {
        config.parties_file = args.parties.clone();
    }
    if args.keep_going {
        config.error_policy = Some("collect".to_string());
    }
    debug!("run: config: {:?}", config);

    run_extraction(&config, args.reference.as_deref())?;
    Ok(())
}

/// Reads all the tables, extracts the records and writes them.
///
/// Nothing is written unless all the result tables were extracted.
pub fn run_extraction(config: &ExtractConfig, reference: Option<&str>) -> RunResult<Extraction> {
    let policy = config.error_policy()?;
    ensure!(!config.table_sources.is_empty(), NoTableSourceSnafu {});

    let parties = match &config.parties_file {
        Some(path) => io_parties::read_parties(path)?,
        None => {
            warn!("No parties file provided, the candidates will not have a party");
            PartyRegistry::new()
        }
    };

    let mut document = RawDocument::default();
    for source in config.table_sources.iter() {
        let mut source_doc = read_table_source(source)?;
        info!(
            "Read {} pages from {:?}",
            source_doc.pages.len(),
            source.file_path
        );
        document.pages.append(&mut source_doc.pages);
    }

    let extraction = extract_document(&document, &parties, policy).context(ExtractionSnafu {})?;
    info!(
        "Extracted {} records from {} tables",
        extraction.records.len(),
        extraction.tables_extracted
    );

    let contents = records_to_csv(&extraction.records)?;
    write_output(config.output_settings.output_file.as_deref(), &contents)?;

    if let Some(reference_path) = reference {
        check_reference(reference_path, &contents)?;
    }
    Ok(extraction)
}

fn read_table_source(source: &TableSource) -> RunResult<RawDocument> {
    info!("Attempting to read table file {:?}", source.file_path);
    let path = source.file_path.as_str();
    match source.provider()? {
        Provider::Pdfplumber => io_plumber::read_pdfplumber(path),
        Provider::Tabula => io_tabula::read_tabula(path),
        Provider::Xlsx => io_xlsx::read_xlsx(path, source.excel_worksheet_name.as_deref()),
    }
}

pub(crate) fn parent_dir(path: &str) -> RunResult<&Path> {
    Path::new(path)
        .parent()
        .context(MissingParentDirSnafu { path })
}

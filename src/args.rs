use clap::Parser;

/// This program extracts per-precinct election results from the tables of PDF result reports.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) The JSON configuration file describing the tables to read and where to
    /// write the results. See the manual for the format of this file.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) A reference CSV file. If provided, precinctcsv will check that the extracted
    /// results match the reference, and print the differences otherwise.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the results will be written in CSV format to the
    /// given location. Setting this option overrides the path that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path or empty) The file containing the extracted tables. Setting this option overrides
    /// the table sources that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (default pdfplumber) The type of the input: pdfplumber, tabula or xlsx.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (file path, optional) The CSV file mapping the party codes to the party names, with the
    /// columns 'Party code' and 'Party description'.
    #[clap(short, long, value_parser)]
    pub parties: Option<String>,

    /// When using an Excel file, only read the worksheet with this name.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// If passed as an argument, all the tables are attempted and all the failures are reported,
    /// instead of stopping at the first failure. No output is written if any table fails.
    #[clap(long, takes_value = false)]
    pub keep_going: bool,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard error.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::args::validation::{check_bind_addr, check_data_dir, check_readable_file};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory holding rounds.json, courses.json, matches.json and session.json.
    /// Created if missing.
    #[arg(
        long,
        value_name = "DATA_DIR",
        default_value = "./data",
        value_parser = check_data_dir
    )]
    pub data_dir: PathBuf,
    #[command(subcommand)]
    pub command: Cmd,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Cmd {
    /// Serve the JSON API and the handicap page.
    Serve {
        #[arg(long, value_name = "ADDR", default_value = "0.0.0.0:8081", value_parser = check_bind_addr)]
        bind: String,
    },
    /// Replace the round history with the rounds in a spreadsheet export.
    ImportCsv {
        #[arg(value_name = "CSV_FILE", value_parser = check_readable_file)]
        file: PathBuf,
        /// Round numbers to leave out, comma separated.
        #[arg(long, value_name = "ROUND_NUMBERS", value_delimiter = ',')]
        skip: Vec<u64>,
    },
    /// Print the current handicap snapshot as JSON.
    Handicap,
}

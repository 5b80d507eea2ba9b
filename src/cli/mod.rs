//! Command line interface.

pub mod command;
pub mod years;

use std::path::PathBuf;

use clap::Parser;

use crate::{download::DEFAULT_BLOCKSIZE, resolve::DEFAULT_BASE_URL};

#[derive(Parser, Debug)]
#[command(version, about = "Download INMET BDMEP data", long_about = None)]
pub struct Cli {
    /// Years to download, either `2020` or an inclusive range such as `1990:1995`
    #[arg(required = true, num_args = 1..)]
    pub years: Vec<String>,

    /// Destination directory
    #[arg(long, env = "INMET_DATADIR")]
    pub datadir: PathBuf,

    /// Portal directory holding the yearly archives
    #[arg(long, env = "INMET_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Largest number of bytes written to disk at once
    #[arg(long, default_value_t = DEFAULT_BLOCKSIZE as u64, value_parser = clap::value_parser!(u64).range(1..))]
    pub blocksize: u64,

    /// Hide progress bars
    #[arg(long, short)]
    pub quiet: bool,
}

// -- Tests -------------------------------------------------------------------

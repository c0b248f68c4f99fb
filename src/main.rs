// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

use clap::{Parser, ValueEnum};
use std::error::Error;
use std::path::PathBuf;

use liberty_catalog::convert::{convert, ConvertOptions};
use liberty_catalog::export::CatalogFormat;
use liberty_catalog::MalformedCellPolicy;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Json,
    Csv,
}

impl From<FormatArg> for CatalogFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => CatalogFormat::Json,
            FormatArg::Csv => CatalogFormat::Csv,
        }
    }
}

/// Extract combinational cells and their logic functions from a Liberty library
#[derive(Parser)]
#[command(version, about)]
struct ProgramOptions {
    /// Liberty (.lib) input file
    liberty: PathBuf,
    /// Catalog output file
    output: PathBuf,
    /// Output format (default: from the output file extension)
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,
    /// Skip cells with unnamed pins or functionless outputs instead of failing
    #[arg(long)]
    skip_malformed: bool,
    /// Verbose Output Mode
    #[arg(short, long)]
    verbose: bool,
}

impl From<ProgramOptions> for ConvertOptions {
    fn from(options: ProgramOptions) -> Self {
        ConvertOptions {
            liberty: options.liberty,
            out: options.output,
            format: options.format.map(CatalogFormat::from),
            malformed: if options.skip_malformed {
                MalformedCellPolicy::Skip
            } else {
                MalformedCellPolicy::Abort
            },
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let options = ProgramOptions::parse();

    let default_level = if options.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    convert(&options.into())?;
    Ok(())
}

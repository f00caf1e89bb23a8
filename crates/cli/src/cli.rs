//! CLI definitions and command dispatch.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use font_collection::Options;

use crate::{inspect::inspect_collection, merge::merge_fonts};

#[derive(Parser)]
#[command(name = "fontglue", version)]
#[command(about = "Glue fonts into a TrueType collection, storing shared tables once")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Merge fonts into a collection
    #[command(after_help = "Example:\n  fontglue merge Family.ttc Family-Regular.ttf Family-Bold.ttf")]
    Merge {
        /// Output collection file
        output: PathBuf,
        /// Input font files, in collection order
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        /// Compare bytes before sharing tables with equal digests
        #[arg(long)]
        verify_digests: bool,
        /// Suppress the summary line
        #[arg(short, long)]
        quiet: bool,
    },
    /// List the fonts and table records of a collection
    Inspect {
        input: PathBuf,
    },
}

impl Commands {
    pub fn run(self) -> Result<()> {
        match self {
            Commands::Merge { output, inputs, verify_digests, quiet } => {
                let options = Options::new().verify_digests(verify_digests);
                let stats = merge_fonts(&inputs, &output, options)?;
                if !quiet {
                    println!("{}: {stats}", output.display());
                }
            }
            Commands::Inspect { input } => {
                print!("{}", inspect_collection(&input)?);
            }
        }
        Ok(())
    }
}

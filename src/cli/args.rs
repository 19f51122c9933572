use crate::processors::Source;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "station-register")]
#[command(about = "Normalize, map and submit monitoring station records")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(
        long,
        global = true,
        help = "Settings file [default: station-register.toml if present]"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Normalize an uploaded template into station records
    Normalize {
        #[arg(short, long, help = "Input template (.xlsx, .txt, .tsv or .csv)")]
        input: PathBuf,

        #[arg(
            short,
            long,
            help = "Output JSON file path [default: output/{input}-normalized-{YYMMDD}.json]"
        )]
        output: Option<PathBuf>,
    },

    /// Build map layers from the station register
    Map {
        #[arg(short, long, help = "Register export [default: register_path setting]")]
        register: Option<PathBuf>,

        #[arg(long, help = "Uploaded template drawn as a separate layer")]
        overlay: Option<PathBuf>,

        #[arg(
            short,
            long,
            help = "Output JSON file path [default: output/station-map-{YYMMDD}.json]"
        )]
        output: Option<PathBuf>,
    },

    /// Normalize a template and post every station to the register
    Submit {
        #[arg(short, long, help = "Input template")]
        input: PathBuf,

        #[arg(long, default_value = "false", help = "Normalize and report without posting")]
        dry_run: bool,
    },

    /// Print the detected encoding and pipeline report for a file
    Inspect {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long, value_enum, default_value_t = SourceArg::Template)]
        source: SourceArg,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceArg {
    Register,
    Template,
}

impl From<SourceArg> for Source {
    fn from(arg: SourceArg) -> Self {
        match arg {
            SourceArg::Register => Source::Register,
            SourceArg::Template => Source::Template,
        }
    }
}

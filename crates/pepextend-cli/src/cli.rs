use crate::utils::parser;
use clap::{Args, Parser, Subcommand};
use pepextend::engine::config::PlacementMethod;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "pepextend contributors",
    version,
    about = "pepextend - Append amino-acid residues to protein structure files using idealized residue templates.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Append one residue to the end of a chain and write the extended structure.
    Extend(ExtendArgs),
    /// List the residue templates available for extension.
    Templates(TemplatesArgs),
}

/// Arguments for the `extend` subcommand.
#[derive(Args, Debug)]
pub struct ExtendArgs {
    // --- Core Arguments ---
    /// Path to the input structure file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the extended output structure file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Residue to append, as a one-letter code (e.g., 'W') or a three-letter code (e.g., 'TRP').
    #[arg(short, long, required = true, value_name = "CODE")]
    pub residue: String,

    /// Path to an optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Overrides ---
    /// Residue templates to use instead of the built-in library.
    /// Either a TOML file or a directory of <CODE>.txt / <CODE>.pdb record files.
    #[arg(long, value_name = "PATH")]
    pub templates: Option<PathBuf>,

    /// Chain to extend. Defaults to the first chain in the file.
    #[arg(long, value_name = "ID", value_parser = parser::parse_chain_id)]
    pub chain: Option<char>,

    /// How the template is rotated onto the chain end.
    #[arg(long, value_name = "METHOD", value_parser = parser::parse_placement_method)]
    pub method: Option<PlacementMethod>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S placement.method=rotation-matrix
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `templates` subcommand.
#[derive(Args, Debug)]
pub struct TemplatesArgs {
    /// Residue templates to list instead of the built-in library.
    #[arg(long, value_name = "PATH")]
    pub templates: Option<PathBuf>,
}

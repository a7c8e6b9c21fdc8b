pub mod report;

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Command-line arguments for neuroselect
#[derive(Parser, Debug)]
#[command(name = "neuroselect")]
#[command(about = "Convert only the best T1 (and optional FLAIR) series of a DICOM tree to BIDS NIfTI")]
#[command(version)]
pub struct Cli {
    /// DICOM input folder (scanned recursively)
    #[arg(short, long, value_name = "DIR")]
    pub input: PathBuf,

    /// BIDS output root
    #[arg(short = 'o', long, value_name = "DIR", required_unless_present = "list")]
    pub bids_root: Option<PathBuf>,

    /// Subject label (without "sub-")
    #[arg(short, long, required_unless_present = "list")]
    pub subject: Option<String>,

    /// Session label (without "ses-")
    #[arg(long)]
    pub session: Option<String>,

    /// Also convert the best FLAIR
    #[arg(long)]
    pub with_flair: bool,

    /// Timeout in seconds for each converter run (0 = none)
    #[arg(long, default_value_t = 0)]
    pub timeout: u64,

    /// Write .nii instead of .nii.gz
    #[arg(long)]
    pub no_gzip: bool,

    /// Skip JSON sidecars
    #[arg(long)]
    pub no_json: bool,

    /// List indexed series with their inferred kind and exit
    #[arg(long)]
    pub list: bool,

    /// Output format for --list
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Converter executable
    #[arg(long, default_value = "dcm2niix")]
    pub converter: String,

    /// Read headers in parallel
    #[arg(long)]
    pub parallel: bool,

    /// JSON file overriding the classifier rule tables
    #[cfg(feature = "json")]
    #[arg(long, value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Output format options
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format
    Text,
    /// JSON format
    Json,
}

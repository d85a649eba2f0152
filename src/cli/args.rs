use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "little-r-processor")]
#[command(about = "Convert WindBorne super observations to little_r")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(long, global = true, help = "TOML configuration file")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write one little_r file per observation: {output_dir}/{mission}/{id}.little_r
    Convert {
        #[arg(short, long, help = "Page file or directory of saved API response pages")]
        input: PathBuf,

        #[arg(short, long, help = "Output directory [default: data]")]
        output_dir: Option<PathBuf>,

        #[arg(
            required = true,
            num_args = 1..=2,
            help = "Start and optional end time, YYYY-mm-dd_HH:MM UTC (end defaults to now)"
        )]
        times: Vec<String>,
    },

    /// Write one little_r file per mission and time bucket, named by the bucket midpoint
    Bucket {
        #[arg(short, long, help = "Page file or directory of saved API response pages")]
        input: PathBuf,

        #[arg(short, long, help = "Output directory [default: data]")]
        output_dir: Option<PathBuf>,

        #[arg(short, long, help = "Bucket width in hours [default: 6]")]
        bucket_hours: Option<f64>,

        #[arg(
            required = true,
            num_args = 1..=2,
            help = "Start and optional end time, YYYY-mm-dd_HH:MM UTC (end defaults to now)"
        )]
        times: Vec<String>,
    },

    /// Render a single value with a Fortran format such as F13.5, I10, A40 or L10
    Format {
        #[arg(short, long)]
        spec: String,

        #[arg(
            allow_hyphen_values = true,
            help = "Value to format; omit for a missing value"
        )]
        value: Option<String>,
    },
}

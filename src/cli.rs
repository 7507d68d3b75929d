use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "appgallery", version, about = "Huawei AppGallery metadata CLI")]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(long, global = true, help = "Suppress non-error log output")]
    pub quiet: bool,
    #[arg(
        long,
        global = true,
        help = "Settings file (default: ~/.config/appgallery/config.toml)"
    )]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug)]
pub struct LookupArgs {
    #[arg(help = "AppGallery app ID (e.g. C100000000)")]
    pub app_id: Option<String>,
    #[arg(long, help = "File with app IDs, one per line")]
    pub bulk: Option<PathBuf>,
    #[arg(long, help = "Worker threads for bulk lookups")]
    pub threads: Option<usize>,
    #[arg(
        long,
        conflicts_with = "bulk",
        help = "Also write the record as JSON to this file"
    )]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch app metadata for one id or a bulk list
    Info(LookupArgs),
    /// Resolve the download URL for one id or a bulk list (no APK is fetched)
    Download(LookupArgs),
    /// Serve the /fetch HTTP endpoint
    Serve {
        #[arg(long, help = "Listen address (default 0.0.0.0:8080)")]
        bind: Option<String>,
    },
}

impl Commands {
    /// Lookup verb and its arguments; the verb prefixes summary statuses.
    pub fn lookup(&self) -> Option<(&'static str, &LookupArgs)> {
        match self {
            Commands::Info(args) => Some(("info", args)),
            Commands::Download(args) => Some(("download", args)),
            Commands::Serve { .. } => None,
        }
    }
}

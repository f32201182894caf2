use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "serp-check")]
#[command(about = "Extract page metadata, preview the search snippet and submit it for analysis")]
#[command(version)]
pub struct Args {
    /// Page URL to extract metadata from
    #[arg(default_value = "https://example.com")]
    pub url: String,

    /// Focus keyword for the analysis
    #[arg(short, long, default_value = "")]
    pub keyword: String,

    /// Brand for the analysis
    #[arg(short, long, default_value = "")]
    pub brand: String,

    /// Set the title by hand instead of extracting it
    #[arg(long)]
    pub title: Option<String>,

    /// Set the description by hand instead of extracting it
    #[arg(long)]
    pub description: Option<String>,

    /// Skip the extraction step entirely
    #[arg(long)]
    pub no_extract: bool,

    /// Submit the snippet for analysis after the preview
    #[arg(short, long)]
    pub analyze: bool,

    /// Base URL of the analysis server
    #[arg(long)]
    pub api_url: Option<String>,

    /// Path to a JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Provision the server-side API key and exit
    #[arg(long, value_name = "KEY")]
    pub set_key: Option<String>,

    /// Probe the server health endpoint and exit
    #[arg(long)]
    pub check: bool,

    /// Discard the stored identity and start with a fresh one
    #[arg(long)]
    pub reset_identity: bool,
}

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SITE_ROOT: &str = ".";

#[derive(Parser, Debug)]
#[command(name = "folio", version, about = "Portfolio content engine CLI")]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        default_value = DEFAULT_SITE_ROOT,
        help = "Site root containing site.toml and the content documents"
    )]
    pub site: String,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Route {
        fragment: String,
        #[arg(long, help = "Work-index tag filter category")]
        filter: Option<String>,
    },
    List {
        #[arg(value_enum)]
        collection: Collection,
    },
    Validate,
    Maintenance,
    Bypass {
        #[command(subcommand)]
        command: BypassCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum BypassCommands {
    Set,
    Clear,
    Status,
}

#[derive(Clone, Debug, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Work,
    Research,
}

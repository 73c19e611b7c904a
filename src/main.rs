use clap::Parser;
use std::path::PathBuf;

pub mod cli;
pub mod commands;
pub mod content;
pub mod domain;
pub mod services;

pub use cli::{BypassCommands, Cli, Collection, Commands};
pub use content::{ContentError, ContentStore, ResearchItem, WorkItem};
pub use domain::models::*;
pub use services::maintenance::{decide, fetch_maintenance};
pub use services::output::{fail, print_one, print_out};
pub use services::progress::with_progress;
pub use services::router::{extract_bypass, maintenance_page, render_route, NavSession};
pub use services::storage::{audit, load_site_config, load_state, save_state};

fn main() {
    let cli = Cli::parse();
    let json = cli.json;
    if let Err(err) = run(&cli) {
        fail(json, &err);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let root = PathBuf::from(&cli.site);
    let cfg = load_site_config(&root)?;
    let mut state = load_state()?;

    if commands::handle_gate_commands(cli, &cfg, &mut state, &root)? {
        return Ok(());
    }
    commands::handle_runtime_commands(cli, &cfg, &mut state, &root)
}

//! TaskGraph CLI Binary

use clap::Parser;
use std::process;
use taskgraph::config::ConfigLoader;
use taskgraph::logging::init_logging;
use taskgraph::tooling::cli::{resolve_working_dir, Cli, CliContext};

fn main() {
    let cli = Cli::parse();

    let cwd = match resolve_working_dir(cli.workspace.clone()) {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Error resolving working directory: {}", e);
            process::exit(1);
        }
    };

    let context = match CliContext::new(cwd, cli.config.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error initializing workspace: {}", e);
            process::exit(1);
        }
    };

    // A broken config file is reported by the command itself.
    let root = context.find_root().ok().flatten();
    let base = context
        .load_config(root.as_deref())
        .map(|c| c.logging)
        .unwrap_or_else(|_| ConfigLoader::default().logging);
    if let Err(e) = init_logging(Some(&cli.logging_config(base)), cli.log_file.clone()) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    match context.execute(&cli.command) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

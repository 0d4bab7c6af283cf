mod cli;
mod commands;
mod context;
mod output;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    init_logger(cli.global.verbose);

    let result = match cli.command {
        Commands::Compile { input, output } => {
            commands::compile::run(&cli.global, &input, output.as_deref())
        }
        Commands::Tree { input } => commands::tree::run(&cli.global, &input),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logger(verbose: bool) {
    let default_filter = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

//! CLI command structure using clap

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hcml")]
#[command(version, about = "Transpile HCML templates into C++", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Options shared by every command, overriding hcml.toml
#[derive(Args)]
pub struct GlobalArgs {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (defaults to ./hcml.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Tag prefix marking HCML tags, e.g. `cxx` for `<cxx:line>`
    #[arg(long, global = true)]
    pub prefix: Option<String>,

    /// Function literal text is printed with, e.g. `resp.write`
    #[arg(long, global = true, env = "HCML_PRINT_METHOD")]
    pub print_method: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Transpile an .hcml file
    Compile {
        /// Source file
        input: PathBuf,

        /// Write generated code here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the parsed tag tree
    Tree {
        /// Source file
        input: PathBuf,
    },
}

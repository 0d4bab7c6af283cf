//! Compile command - transpile an .hcml file

use crate::cli::GlobalArgs;
use crate::context::Context;
use crate::output;
use anyhow::{Context as _, Result};
use colored::Colorize;
use log::info;
use std::fs;
use std::path::Path;

/// Transpile `input`, writing to `output` or stdout
pub fn run(global: &GlobalArgs, input: &Path, output: Option<&Path>) -> Result<()> {
    let ctx = Context::new(global)?;
    let mut session = ctx.session();

    info!("compiling {}", input.display());
    session.parse_file(input)?;

    match output {
        Some(path) => {
            fs::write(path, session.output())
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!(
                "{} Compiled {} → {} ({} bytes)",
                "✓".green().bold(),
                input.display(),
                path.display(),
                session.output_size()
            );
        }
        None => output::write_bytes(session.output())?,
    }

    Ok(())
}

//! Tree command - show how a file is parsed

use crate::cli::GlobalArgs;
use crate::context::Context;
use crate::output;
use anyhow::Result;
use colored::Colorize;
use hcml_core::HcmlError;
use std::fs;
use std::path::Path;

pub fn run(global: &GlobalArgs, input: &Path) -> Result<()> {
    let ctx = Context::new(global)?;
    let session = ctx.session();

    let source = fs::read(input).map_err(|e| HcmlError::SourceRead {
        path: input.to_path_buf(),
        reason: e.to_string(),
    })?;
    let tree = session.parse_tree(&source)?;

    if tree.is_empty() {
        println!("{} {} is empty", "!".yellow(), input.display());
        return Ok(());
    }
    if ctx.verbose {
        println!("{} {} node(s)", "→".cyan(), tree.len());
    }
    output::print_text(tree.dump().trim_end())?;

    Ok(())
}

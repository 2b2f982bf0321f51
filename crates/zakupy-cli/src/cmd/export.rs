use crate::Ctx;
use anyhow::{Context as _, Result, bail};
use clap::Args;
use std::path::PathBuf;
use zakupy_core::{recurring, transfer};

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Write to a file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn run(args: &ExportArgs, ctx: &Ctx) -> Result<()> {
    if recurring::all(&ctx.store)?.is_empty() {
        bail!("no recurring items to export");
    }

    // Already JSON, so the --json flag changes nothing here.
    let text = transfer::export_recurring(&ctx.store)?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, &text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            if !ctx.mode.is_json() {
                println!("Exported to {}", path.display());
            }
        }
        None => println!("{text}"),
    }
    Ok(())
}

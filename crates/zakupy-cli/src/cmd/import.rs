use crate::Ctx;
use crate::cmd::confirm;
use crate::output::render;
use anyhow::{Context as _, Result, bail};
use clap::Args;
use std::io::Write as _;
use std::path::PathBuf;
use zakupy_core::{locations, recurring, transfer};

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// JSON file: an array of {name, quantity, location} objects.
    path: PathBuf,
}

pub fn run(args: &ImportArgs, ctx: &Ctx) -> Result<()> {
    let text = std::fs::read_to_string(&args.path)
        .with_context(|| format!("Failed to read {}", args.path.display()))?;
    let items = transfer::parse_import(&text)?;

    let existing = recurring::all(&ctx.store)?.len();
    let incoming = items.len();
    let prompt =
        format!("Replace {existing} recurring items with {incoming} imported items?");
    if !confirm(ctx, &prompt)? {
        bail!("aborted");
    }

    let count = transfer::import_recurring(&ctx.store, &items)?;
    // Structure the bare location names merged in by the import.
    locations::clean_duplicates(&ctx.store)?;

    render(ctx.mode, &serde_json::json!({ "imported": count }), |_, out| {
        writeln!(out, "Imported {count} recurring items")
    })
}

use crate::Ctx;
use crate::cmd::confirm;
use crate::output::render;
use anyhow::{Result, bail};
use clap::Args;
use std::io::Write as _;
use zakupy_core::transfer;

#[derive(Args, Debug)]
pub struct ClearArgs {}

pub fn run(_args: &ClearArgs, ctx: &Ctx) -> Result<()> {
    let prompt = "Delete the active list, recurring items, and locations? History is kept.";
    if !confirm(ctx, prompt)? {
        bail!("aborted");
    }
    transfer::clear_all(&ctx.store)?;
    render(ctx.mode, &serde_json::json!({ "cleared": true }), |_, out| {
        writeln!(out, "All data cleared (history kept)")
    })
}

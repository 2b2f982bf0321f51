use crate::Ctx;
use crate::cmd::confirm;
use crate::output::render;
use anyhow::{Result, bail};
use clap::Args;
use std::io::Write as _;
use zakupy_core::transfer;

#[derive(Args, Debug)]
pub struct DemoArgs {}

pub fn run(_args: &DemoArgs, ctx: &Ctx) -> Result<()> {
    if !confirm(ctx, "Add sample recurring items and locations?")? {
        bail!("aborted");
    }
    let count = transfer::load_demo(&ctx.store)?;
    render(ctx.mode, &serde_json::json!({ "added": count }), |_, out| {
        writeln!(out, "Added {count} sample recurring items")
    })
}

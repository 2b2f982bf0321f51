use crate::Ctx;
use crate::output::render;
use anyhow::Result;
use clap::Args;
use serde_json::json;
use std::io::Write as _;
use zakupy_core::list;

#[derive(Args, Debug)]
pub struct HideArgs {
    /// Location group to collapse or expand.
    location: String,
}

pub fn run(args: &HideArgs, ctx: &Ctx) -> Result<()> {
    let hidden = list::toggle_hidden(&ctx.store, &args.location)?;
    let state = json!({ "location": &args.location, "hidden": hidden });
    render(ctx.mode, &state, |_, out| {
        let verb = if hidden { "Collapsed" } else { "Expanded" };
        writeln!(out, "{verb} {}", args.location)
    })
}

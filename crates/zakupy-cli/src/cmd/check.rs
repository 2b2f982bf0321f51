use crate::Ctx;
use crate::output::render;
use anyhow::Result;
use clap::Args;
use serde_json::json;
use std::io::Write as _;
use zakupy_core::list;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Item id to toggle.
    #[arg(required_unless_present = "location", conflicts_with = "location")]
    id: Option<String>,

    /// Toggle a whole location group instead: all checked when any item
    /// is unchecked, all unchecked otherwise.
    #[arg(short, long)]
    location: Option<String>,
}

pub fn run(args: &CheckArgs, ctx: &Ctx) -> Result<()> {
    let (checked, subject) = match (&args.id, &args.location) {
        (_, Some(location)) => (
            list::toggle_location(&ctx.store, location)?,
            location.clone(),
        ),
        (Some(id), None) => (list::toggle_item(&ctx.store, id)?, id.clone()),
        (None, None) => unreachable!("clap enforces one of id or --location"),
    };

    let state = json!({ "subject": &subject, "checked": checked });
    render(ctx.mode, &state, |_, out| {
        let verb = if checked { "Checked" } else { "Unchecked" };
        writeln!(out, "{verb} {subject}")
    })
}

use crate::Ctx;
use crate::cmd::location_choice;
use crate::output::render;
use anyhow::Result;
use clap::Args;
use std::io::Write as _;
use zakupy_core::list::{self, UNKNOWN_GROUP};

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Item name.
    name: String,

    /// Quantity, free text.
    #[arg(short, long, default_value = "1")]
    quantity: String,

    /// Existing location to put the item under.
    #[arg(short, long, conflicts_with = "new_location")]
    location: Option<String>,

    /// Create a fresh location with this name, replacing any
    /// case-insensitive duplicate.
    #[arg(long)]
    new_location: Option<String>,

    /// Also save the item as a recurring template.
    #[arg(short, long)]
    recurring: bool,
}

pub fn run(args: &AddArgs, ctx: &Ctx) -> Result<()> {
    let choice = location_choice(
        args.location.as_ref(),
        args.new_location.as_ref(),
        ctx.default_color.as_ref(),
    );
    let item = list::add_item(&ctx.store, &args.name, &args.quantity, choice, args.recurring)?;

    render(ctx.mode, &item, |item, out| {
        let group = if item.location.is_empty() {
            UNKNOWN_GROUP
        } else {
            &item.location
        };
        writeln!(out, "Added {} (x{}) to {group}", item.name, item.quantity)
    })
}

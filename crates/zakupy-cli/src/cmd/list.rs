use crate::Ctx;
use crate::output::render;
use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::collections::HashMap;
use std::io::Write as _;
use zakupy_core::model::Item;
use zakupy_core::model::location::{FALLBACK_COLOR, name_key};
use zakupy_core::{list, locations};

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Show items in collapsed location groups too.
    #[arg(long)]
    all: bool,
}

#[derive(Debug, Serialize)]
struct GroupView {
    location: String,
    color: String,
    hidden: bool,
    items: Vec<Item>,
}

pub fn run(args: &ListArgs, ctx: &Ctx) -> Result<()> {
    // Repair pass on startup, same as the location manager does before
    // rendering: structure legacy entries and drop duplicate names.
    locations::clean_duplicates(&ctx.store)?;

    let colors: HashMap<String, String> = locations::migrate(&ctx.store)?
        .into_iter()
        .map(|l| (name_key(&l.name), l.color))
        .collect();
    let hidden = list::hidden_locations(&ctx.store)?;
    let items = list::all(&ctx.store)?;

    let groups: Vec<GroupView> = list::grouped(&items)
        .into_iter()
        .map(|(location, members)| GroupView {
            color: colors
                .get(&name_key(&location))
                .cloned()
                .unwrap_or_else(|| FALLBACK_COLOR.to_string()),
            hidden: hidden.contains(&location),
            items: members.into_iter().cloned().collect(),
            location,
        })
        .collect();

    let show_all = args.all;
    render(ctx.mode, &groups, |groups, out| {
        if groups.is_empty() {
            return writeln!(out, "The list is empty.");
        }
        for group in groups {
            writeln!(out, "{} [{}]", group.location, group.color)?;
            if group.hidden && !show_all {
                let count = group.items.len();
                writeln!(out, "  (collapsed, {count} items)")?;
                continue;
            }
            for item in &group.items {
                let mark = if item.checked { "x" } else { " " };
                writeln!(out, "  [{mark}] {} (x{})  {}", item.name, item.quantity, item.id)?;
            }
        }
        Ok(())
    })
}

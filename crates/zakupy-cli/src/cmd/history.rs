use crate::Ctx;
use crate::cmd::confirm;
use crate::output::render;
use anyhow::{Result, bail};
use clap::Subcommand;
use std::io::Write as _;
use zakupy_core::history;
use zakupy_core::model::HistoryItem;

#[derive(Subcommand, Debug)]
pub enum HistoryCommands {
    /// List archived items, newest last.
    List,

    /// Move an entry back onto the active list, unchecked and with a
    /// fresh id.
    Restore {
        /// History entry id.
        #[arg(required_unless_present = "location", conflicts_with = "location")]
        id: Option<String>,

        /// Restore every entry from this location instead
        /// (case-insensitive).
        #[arg(short, long)]
        location: Option<String>,
    },

    /// Delete all history entries.
    Clear,
}

pub fn run(command: &HistoryCommands, ctx: &Ctx) -> Result<()> {
    match command {
        HistoryCommands::List => {
            let entries = history::all(&ctx.store)?;
            render(ctx.mode, &entries, |entries: &Vec<HistoryItem>, out| {
                if entries.is_empty() {
                    return writeln!(out, "History is empty.");
                }
                for e in entries {
                    writeln!(
                        out,
                        "{}  {} (x{})  {}  {}",
                        e.id, e.name, e.quantity, e.location, e.completed_at
                    )?;
                }
                Ok(())
            })
        }
        HistoryCommands::Restore { id, location } => match (id, location) {
            (_, Some(location)) => {
                let count = history::restore_location(&ctx.store, location)?;
                if count == 0 {
                    bail!("no history entries for {location}");
                }
                render(
                    ctx.mode,
                    &serde_json::json!({ "location": location, "restored": count }),
                    |_, out| writeln!(out, "Restored {count} items from {location}"),
                )
            }
            (Some(id), None) => {
                let item = history::restore_item(&ctx.store, id)?;
                render(ctx.mode, &item, |item, out| {
                    writeln!(out, "Restored {} to the list", item.name)
                })
            }
            (None, None) => unreachable!("clap enforces one of id or --location"),
        },
        HistoryCommands::Clear => {
            if !confirm(ctx, "Delete all history entries?")? {
                bail!("aborted");
            }
            history::clear(&ctx.store)?;
            render(ctx.mode, &serde_json::json!({ "cleared": true }), |_, out| {
                writeln!(out, "History cleared")
            })
        }
    }
}

use crate::Ctx;
use crate::output::render;
use anyhow::Result;
use clap::Subcommand;
use std::io::Write as _;
use zakupy_core::locations;
use zakupy_core::model::Location;

#[derive(Subcommand, Debug)]
pub enum LocationCommands {
    /// List all locations.
    List,

    /// Add a location. The name is capitalized; a case-insensitive
    /// duplicate is rejected.
    Add {
        name: String,

        /// Display color, e.g. #FF9800.
        #[arg(short, long)]
        color: Option<String>,
    },

    /// Rename and/or recolor a location. A rename rewrites the location
    /// name on every matching list, recurring, and history item.
    Rename {
        /// Location id (see `zk location list`).
        id: String,

        /// New name.
        name: String,

        /// New color; the current color is kept when omitted.
        #[arg(short, long)]
        color: Option<String>,
    },

    /// Delete a location. Items keep the stale name and fall back to the
    /// default display color.
    Delete {
        /// Location id.
        id: String,
    },
}

pub fn run(command: &LocationCommands, ctx: &Ctx) -> Result<()> {
    match command {
        LocationCommands::List => {
            let cleaned = locations::clean_duplicates(&ctx.store)?;
            render(ctx.mode, &cleaned, |cleaned: &Vec<Location>, out| {
                if cleaned.is_empty() {
                    return writeln!(out, "No locations yet.");
                }
                for location in cleaned {
                    writeln!(out, "{}  {} [{}]", location.id, location.name, location.color)?;
                }
                Ok(())
            })
        }
        LocationCommands::Add { name, color } => {
            let color = color.as_deref().or(ctx.default_color.as_deref());
            let created = locations::add(&ctx.store, name, color)?;
            render(ctx.mode, &created, |created, out| {
                writeln!(out, "Added location {} [{}]", created.name, created.color)
            })
        }
        LocationCommands::Rename { id, name, color } => {
            let current = locations::migrate(&ctx.store)?
                .into_iter()
                .find(|l| l.id == *id);
            let color = match (color, current) {
                (Some(color), _) => color.clone(),
                (None, Some(location)) => location.color,
                // Unknown id: rename reports NotFound below.
                (None, None) => String::new(),
            };
            locations::rename(&ctx.store, id, name, &color)?;
            render(ctx.mode, &serde_json::json!({ "id": id, "name": name }), |_, out| {
                writeln!(out, "Renamed location to {name}")
            })
        }
        LocationCommands::Delete { id } => {
            locations::delete(&ctx.store, id)?;
            render(ctx.mode, &serde_json::json!({ "id": id }), |_, out| {
                writeln!(out, "Deleted location {id}")
            })
        }
    }
}

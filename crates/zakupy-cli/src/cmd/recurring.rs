use crate::Ctx;
use crate::cmd::location_choice;
use crate::output::render;
use anyhow::{Result, bail};
use clap::Subcommand;
use std::io::Write as _;
use zakupy_core::model::RecurringItem;
use zakupy_core::recurring;

#[derive(Subcommand, Debug)]
pub enum RecurringCommands {
    /// List all recurring templates.
    List,

    /// Save a new template.
    Add {
        name: String,

        /// Quantity, free text.
        #[arg(short, long, default_value = "1")]
        quantity: String,

        /// Existing location name.
        #[arg(short, long, conflicts_with = "new_location")]
        location: Option<String>,

        /// Create a fresh location with this name.
        #[arg(long)]
        new_location: Option<String>,
    },

    /// Rewrite a template's fields.
    Edit {
        /// Template id (see `zk recurring list`).
        id: String,
        name: String,
        quantity: String,

        /// Existing location name.
        #[arg(short, long, conflicts_with = "new_location")]
        location: Option<String>,

        /// Create a fresh location with this name.
        #[arg(long)]
        new_location: Option<String>,
    },

    /// Delete a template.
    Delete {
        /// Template id.
        id: String,
    },

    /// Append a copy of every template to the active list.
    Load,
}

pub fn run(command: &RecurringCommands, ctx: &Ctx) -> Result<()> {
    match command {
        RecurringCommands::List => {
            let templates = recurring::all(&ctx.store)?;
            render(ctx.mode, &templates, |templates: &Vec<RecurringItem>, out| {
                if templates.is_empty() {
                    return writeln!(out, "No recurring items yet.");
                }
                for t in templates {
                    writeln!(out, "{}  {} (x{})  {}", t.id, t.name, t.quantity, t.location)?;
                }
                Ok(())
            })
        }
        RecurringCommands::Add {
            name,
            quantity,
            location,
            new_location,
        } => {
            let choice = location_choice(
                location.as_ref(),
                new_location.as_ref(),
                ctx.default_color.as_ref(),
            );
            let template = recurring::add(&ctx.store, name, quantity, choice)?;
            render(ctx.mode, &template, |template, out| {
                writeln!(out, "Saved recurring item {}", template.name)
            })
        }
        RecurringCommands::Edit {
            id,
            name,
            quantity,
            location,
            new_location,
        } => {
            let choice = location_choice(
                location.as_ref(),
                new_location.as_ref(),
                ctx.default_color.as_ref(),
            );
            recurring::edit(&ctx.store, id, name, quantity, choice)?;
            render(ctx.mode, &serde_json::json!({ "id": id }), |_, out| {
                writeln!(out, "Updated recurring item {id}")
            })
        }
        RecurringCommands::Delete { id } => {
            recurring::delete(&ctx.store, id)?;
            render(ctx.mode, &serde_json::json!({ "id": id }), |_, out| {
                writeln!(out, "Deleted recurring item {id}")
            })
        }
        RecurringCommands::Load => {
            let count = recurring::load_all(&ctx.store)?;
            if count == 0 {
                bail!("no recurring items to load");
            }
            render(ctx.mode, &serde_json::json!({ "loaded": count }), |_, out| {
                writeln!(out, "Added {count} items to the list")
            })
        }
    }
}

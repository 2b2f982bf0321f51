//! One module per subcommand.

pub mod add;
pub mod check;
pub mod clear;
pub mod demo;
pub mod export;
pub mod hide;
pub mod history;
pub mod import;
pub mod list;
pub mod locations;
pub mod recurring;

use crate::Ctx;
use anyhow::Result;
use std::io::{self, BufRead, Write};
use zakupy_core::list::LocationChoice;

/// Ask the user to confirm a destructive action. `--yes` skips the
/// prompt.
pub fn confirm(ctx: &Ctx, prompt: &str) -> Result<bool> {
    if ctx.assume_yes {
        return Ok(true);
    }
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(matches!(line.trim(), "y" | "Y" | "yes"))
}

/// Turn the `--location` / `--new-location` flag pair into a choice,
/// stamping the configured default color onto fresh locations. With
/// neither flag the item lands in the unknown group.
pub fn location_choice(
    existing: Option<&String>,
    new: Option<&String>,
    default_color: Option<&String>,
) -> LocationChoice {
    match (existing, new) {
        (_, Some(name)) => LocationChoice::New {
            name: name.clone(),
            color: default_color.cloned(),
        },
        (Some(name), None) => LocationChoice::Existing(name.clone()),
        (None, None) => LocationChoice::Existing(String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::location_choice;
    use zakupy_core::list::LocationChoice;

    #[test]
    fn new_location_wins_over_existing() {
        let existing = "Bakery".to_string();
        let new = "Butcher".to_string();
        assert!(matches!(
            location_choice(Some(&existing), Some(&new), None),
            LocationChoice::New { name, color: None } if name == "Butcher"
        ));
        assert!(matches!(
            location_choice(Some(&existing), None, None),
            LocationChoice::Existing(name) if name == "Bakery"
        ));
        assert!(matches!(
            location_choice(None, None, None),
            LocationChoice::Existing(name) if name.is_empty()
        ));
    }

    #[test]
    fn new_location_carries_the_configured_color() {
        let new = "Butcher".to_string();
        let configured = "#00FF00".to_string();
        assert!(matches!(
            location_choice(None, Some(&new), Some(&configured)),
            LocationChoice::New { color: Some(color), .. } if color == "#00FF00"
        ));
    }
}

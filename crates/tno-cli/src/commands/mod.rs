pub mod annotate;
pub mod classify;
pub mod inspect;
pub mod table;

use std::fs;
use std::path::Path;

use colored::{ColoredString, Colorize};
use tno_core::{AnnotatorConfig, OutcomeBand, RollNotification};

/// Load the annotator config, or the default when no path is given.
fn load_config(path: Option<&Path>) -> Result<AnnotatorConfig, String> {
    match path {
        Some(p) => AnnotatorConfig::from_json(&read(p)?)
            .map_err(|e| format!("config '{}': {e}", p.display())),
        None => Ok(AnnotatorConfig::default()),
    }
}

/// Load a roll notification from a JSON file.
fn load_notification(path: &Path) -> Result<RollNotification, String> {
    serde_json::from_str(&read(path)?)
        .map_err(|e| format!("invalid roll event '{}': {e}", path.display()))
}

fn read(path: &Path) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("cannot read '{}': {e}", path.display()))
}

/// A band name colored for the terminal.
fn paint(band: OutcomeBand) -> ColoredString {
    match band {
        OutcomeBand::Opportunity => band.to_string().green().bold(),
        OutcomeBand::Threat => band.to_string().red().bold(),
        OutcomeBand::None => band.to_string().dimmed(),
    }
}

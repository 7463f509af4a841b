use std::path::Path;

use colored::Colorize;
use tno_core::{Catalog, Disposition, handle_roll};

use crate::store::FileMessage;

pub fn run(
    message_path: &Path,
    event_path: &Path,
    config_path: Option<&Path>,
    catalog_path: Option<&Path>,
) -> Result<(), String> {
    let config = super::load_config(config_path)?;
    let notification = super::load_notification(event_path)?;
    let mut catalog = Catalog::english();
    if let Some(p) = catalog_path {
        let overlay = Catalog::from_json(&super::read(p)?)
            .map_err(|e| format!("catalog '{}': {e}", p.display()))?;
        catalog = catalog.merged(overlay);
    }
    let mut message = FileMessage::open(message_path)?;

    match handle_roll(&notification, &mut message, &config, &catalog) {
        Disposition::Annotated(record) => {
            println!(
                "  {} {} (margin {:+})",
                "Annotated:".bold(),
                super::paint(record.band),
                record.margin
            );
            println!("  Label: {}", record.label);
            Ok(())
        }
        Disposition::Skipped(reason) => {
            println!("  Skipped: {reason}");
            Ok(())
        }
        // The marker may already be on disk; report it rather than hide it.
        Disposition::Failed(e) => Err(format!("annotation not written: {e}")),
    }
}

use std::path::Path;

use tno_core::filter::filter_reason;
use tno_core::{RollEvent, assess, resolve_difficulty};

use crate::store::FileMessage;

pub fn run(
    event_path: &Path,
    message_path: Option<&Path>,
    config_path: Option<&Path>,
) -> Result<(), String> {
    let config = super::load_config(config_path)?;
    let notification = super::load_notification(event_path)?;

    let event = match message_path {
        Some(p) => RollEvent::observe(&notification, &FileMessage::open(p)?, &config),
        None => RollEvent::from_notification(&notification, false),
    };

    let check = event
        .check_type
        .map(|c| c.to_string())
        .unwrap_or_else(|| "—".to_string());
    let total = event
        .roll_total
        .map(|t| t.to_string())
        .unwrap_or_else(|| "—".to_string());
    let dc = resolve_difficulty(&event)
        .map(|d| d.to_string())
        .unwrap_or_else(|| "—".to_string());

    println!("  Check:      {check}");
    println!("  Total:      {total}");
    println!("  Difficulty: {dc}");
    println!("  Processed:  {}", event.already_processed);
    match filter_reason(&event) {
        Some(reason) => println!("  Eligible:   no ({reason})"),
        None => println!("  Eligible:   yes"),
    }

    match assess(&event) {
        Ok(a) => println!("  Band:       {} (margin {:+})", super::paint(a.band), a.margin),
        Err(reason) => println!("  Band:       — ({reason})"),
    }
    Ok(())
}

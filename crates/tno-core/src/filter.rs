//! Roll filter: decides which roll events are eligible for classification.

use crate::event::{CheckType, RollEvent};

/// Why an event was discarded by the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterReason {
    /// Not a completed dice roll belonging to the game system.
    NotSystemRoll,
    /// The notification carried no rolls.
    NoRolls,
    /// The check context was missing.
    Malformed,
    /// The message already carries the processed marker.
    AlreadyProcessed,
    /// The check is a saving throw.
    SavingThrow,
    /// The check is not a skill check.
    NotSkillCheck,
    /// The options mark an attack roll or strike.
    AttackRoll,
}

impl std::fmt::Display for FilterReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotSystemRoll => write!(f, "not a system roll"),
            Self::NoRolls => write!(f, "no rolls"),
            Self::Malformed => write!(f, "missing check context"),
            Self::AlreadyProcessed => write!(f, "already processed"),
            Self::SavingThrow => write!(f, "saving throw"),
            Self::NotSkillCheck => write!(f, "not a skill check"),
            Self::AttackRoll => write!(f, "attack roll or strike"),
        }
    }
}

/// Returns the first rule that discards the event, or `None` if it is eligible.
pub fn filter_reason(event: &RollEvent) -> Option<FilterReason> {
    if !event.system_roll {
        return Some(FilterReason::NotSystemRoll);
    }
    if event.roll_count == 0 || event.roll_total.is_none() {
        return Some(FilterReason::NoRolls);
    }
    if event.already_processed {
        return Some(FilterReason::AlreadyProcessed);
    }
    let Some(check_type) = event.check_type else {
        return Some(FilterReason::Malformed);
    };
    match check_type {
        CheckType::SkillCheck => {}
        CheckType::Save => return Some(FilterReason::SavingThrow),
        CheckType::Attack | CheckType::Other => return Some(FilterReason::NotSkillCheck),
    }
    // Some hosts label strikes as skill checks through an option flag.
    if event.options.marks_attack() {
        return Some(FilterReason::AttackRoll);
    }
    None
}

/// Returns true if the event is a genuine, not-yet-annotated skill check.
pub fn should_process(event: &RollEvent) -> bool {
    filter_reason(event).is_none()
}

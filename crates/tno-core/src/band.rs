//! Margin classification.
//!
//! The margin is the roll total minus the target difficulty. Two fixed
//! literal sets of margins map to the named bands; every other margin maps
//! to [`OutcomeBand::None`]:
//!
//! | margin | band |
//! |---|---|
//! | -3, -2, -1, 7, 8, 9 | Opportunity |
//! | -9, -8, -7, 0, 2 | Threat |
//! | anything else | None |
//!
//! The sets are not symmetric and not contiguous (1, 3 to 6, -4 to -6 and
//! anything at or beyond ±10 all fall through).

use serde::{Deserialize, Serialize};

/// Margins that produce an opportunity.
pub const OPPORTUNITY_MARGINS: [i64; 6] = [-3, -2, -1, 7, 8, 9];
/// Margins that produce a threat.
pub const THREAT_MARGINS: [i64; 5] = [-9, -8, -7, 0, 2];

/// The classification of a skill check's margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeBand {
    /// No annotation applies.
    #[default]
    None,
    /// The roll opens an opportunity.
    Opportunity,
    /// The roll introduces a threat.
    Threat,
}

impl OutcomeBand {
    /// Returns true for the two annotated bands.
    pub fn is_annotated(self) -> bool {
        !matches!(self, Self::None)
    }
}

impl std::fmt::Display for OutcomeBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Opportunity => write!(f, "opportunity"),
            Self::Threat => write!(f, "threat"),
        }
    }
}

/// Signed margin between a roll total and its difficulty.
pub fn margin(roll_total: i64, difficulty: i64) -> i64 {
    roll_total.saturating_sub(difficulty)
}

/// Map a margin to its band. Opportunity is tested first.
pub fn band_for_margin(margin: i64) -> OutcomeBand {
    if OPPORTUNITY_MARGINS.contains(&margin) {
        OutcomeBand::Opportunity
    } else if THREAT_MARGINS.contains(&margin) {
        OutcomeBand::Threat
    } else {
        OutcomeBand::None
    }
}

/// Classify a roll total against a difficulty.
pub fn classify(roll_total: i64, difficulty: i64) -> OutcomeBand {
    band_for_margin(margin(roll_total, difficulty))
}

//! End-to-end handling of one roll notification.
//!
//! filter → resolve difficulty → classify → annotate. Every outcome is
//! reported as a [`Disposition`]; nothing here panics or fails the host's
//! message flow.

use tracing::{debug, error};

use crate::annotate::{AnnotationRecord, annotate};
use crate::band::{self, OutcomeBand};
use crate::config::AnnotatorConfig;
use crate::difficulty::resolve_difficulty;
use crate::error::TnoError;
use crate::event::{RollEvent, RollNotification};
use crate::filter::{FilterReason, filter_reason};
use crate::i18n::Localizer;
use crate::message::MessageHandle;

/// Why a notification produced no annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The roll filter discarded the event.
    FilteredOut(FilterReason),
    /// No difficulty could be resolved.
    MissingDifficulty,
    /// The margin fell outside both bands.
    NoBandMatched {
        /// Roll total minus difficulty.
        margin: i64,
    },
    /// The marker was set between filtering and writing.
    AlreadyProcessed,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FilteredOut(reason) => write!(f, "filtered out ({reason})"),
            Self::MissingDifficulty => write!(f, "no difficulty"),
            Self::NoBandMatched { margin } => write!(f, "no band for margin {margin}"),
            Self::AlreadyProcessed => write!(f, "already processed"),
        }
    }
}

/// What happened to one notification.
#[derive(Debug)]
pub enum Disposition {
    /// The message was annotated.
    Annotated(AnnotationRecord),
    /// The message was left untouched.
    Skipped(SkipReason),
    /// Persisting the annotation failed. The message may be marked without
    /// a visible annotation.
    Failed(TnoError),
}

impl Disposition {
    /// The annotation, if one was written.
    pub fn record(&self) -> Option<&AnnotationRecord> {
        match self {
            Self::Annotated(record) => Some(record),
            _ => None,
        }
    }

    /// The skip reason, if the message was left untouched.
    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            Self::Skipped(reason) => Some(*reason),
            _ => None,
        }
    }
}

/// The classification of an event, without side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assessment {
    /// Resolved difficulty.
    pub difficulty: i64,
    /// Roll total minus difficulty.
    pub margin: i64,
    /// The resulting band.
    pub band: OutcomeBand,
}

/// Run the filter, difficulty resolution and classifier on an event.
pub fn assess(event: &RollEvent) -> Result<Assessment, SkipReason> {
    if let Some(reason) = filter_reason(event) {
        debug!(%reason, "roll filtered out");
        return Err(SkipReason::FilteredOut(reason));
    }
    let Some(difficulty) = resolve_difficulty(event) else {
        debug!("no difficulty on skill check, skipping");
        return Err(SkipReason::MissingDifficulty);
    };
    // The filter guarantees a first roll.
    let total = event.roll_total.unwrap_or_default();
    let margin = band::margin(total, difficulty);
    Ok(Assessment {
        difficulty,
        margin,
        band: band::band_for_margin(margin),
    })
}

/// Handle a roll notification for `message`.
pub fn handle_roll<M, L>(
    notification: &RollNotification,
    message: &mut M,
    config: &AnnotatorConfig,
    localizer: &L,
) -> Disposition
where
    M: MessageHandle + ?Sized,
    L: Localizer + ?Sized,
{
    let event = RollEvent::observe(notification, message, config);

    let assessment = match assess(&event) {
        Ok(a) => a,
        Err(reason) => return Disposition::Skipped(reason),
    };
    if !assessment.band.is_annotated() {
        return Disposition::Skipped(SkipReason::NoBandMatched {
            margin: assessment.margin,
        });
    }

    match annotate(message, assessment.band, assessment.margin, config, localizer) {
        Ok(Some(record)) => Disposition::Annotated(record),
        Ok(None) => Disposition::Skipped(SkipReason::AlreadyProcessed),
        Err(e) => {
            error!(error = %e, band = %assessment.band, "failed to persist annotation");
            Disposition::Failed(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotate::count_blocks;
    use crate::error::{StoreError, StoreResult};
    use crate::event::{CheckContext, CheckType, TAG_ACTION_STRIKE};
    use crate::i18n::Catalog;
    use crate::message::ChatMessage;
    use tracing_test::traced_test;

    const CARD: &str = r#"<div class="dice-roll"><h4 class="dice-total">?</h4></div>"#;

    fn skill(total: i64, dc: i64) -> RollNotification {
        RollNotification::single(total, CheckContext::new(CheckType::SkillCheck).with_dc(dc))
    }

    fn run(n: &RollNotification, msg: &mut ChatMessage) -> Disposition {
        handle_roll(n, msg, &AnnotatorConfig::default(), &Catalog::english())
    }

    /// Refuses every write.
    struct ReadOnly(ChatMessage);

    impl MessageHandle for ReadOnly {
        fn flag(&self, scope: &str, key: &str) -> Option<bool> {
            self.0.flag(scope, key)
        }
        fn set_flag(&mut self, _scope: &str, _key: &str, _value: bool) -> StoreResult<()> {
            Err(StoreError::Rejected("read-only".to_string()))
        }
        fn content(&self) -> &str {
            self.0.content()
        }
        fn update_content(&mut self, _content: String) -> StoreResult<()> {
            Err(StoreError::Rejected("read-only".to_string()))
        }
    }

    #[test]
    fn margin_two_is_threat() {
        let cfg = AnnotatorConfig::default();
        let mut msg = ChatMessage::new(CARD);
        let out = run(&skill(15, 13), &mut msg);
        let record = out.record().unwrap();
        assert_eq!(record.band, OutcomeBand::Threat);
        assert_eq!(record.margin, 2);
        assert_eq!(msg.flag(&cfg.namespace, &cfg.processed_key), Some(true));
        assert!(msg.content.contains(r#"class="tno-annotation tno-threat""#));
        assert!(msg.content.contains(">THREAT<"));
        assert_eq!(count_blocks(&msg.content, &cfg), 1);
    }

    #[test]
    fn margin_minus_three_is_opportunity() {
        let mut msg = ChatMessage::new(CARD);
        let out = run(&skill(10, 13), &mut msg);
        assert_eq!(out.record().unwrap().band, OutcomeBand::Opportunity);
        assert!(msg.content.contains(">OPPORTUNITY<"));
    }

    #[test]
    fn rerender_does_not_write_again() {
        let mut msg = ChatMessage::new(CARD);
        run(&skill(15, 13), &mut msg);
        let after_first = msg.clone();

        let out = run(&skill(15, 13), &mut msg);
        assert_eq!(
            out.skip_reason(),
            Some(SkipReason::FilteredOut(FilterReason::AlreadyProcessed))
        );
        assert_eq!(msg, after_first);
    }

    #[test]
    fn attack_with_skill_like_options_is_filtered() {
        let n = RollNotification::single(
            20,
            CheckContext::new(CheckType::Attack)
                .with_dc(18)
                .with_option("skill:athletics")
                .with_option(TAG_ACTION_STRIKE),
        );
        let mut msg = ChatMessage::new(CARD);
        let out = run(&n, &mut msg);
        assert_eq!(
            out.skip_reason(),
            Some(SkipReason::FilteredOut(FilterReason::NotSkillCheck))
        );
        assert_eq!(msg.content, CARD);
        assert!(msg.flags.is_empty());
    }

    #[traced_test]
    #[test]
    fn missing_difficulty_aborts() {
        let n = RollNotification::single(12, CheckContext::new(CheckType::SkillCheck));
        let mut msg = ChatMessage::new(CARD);
        let out = run(&n, &mut msg);
        assert_eq!(out.skip_reason(), Some(SkipReason::MissingDifficulty));
        assert!(msg.flags.is_empty());
        assert!(logs_contain("no difficulty on skill check"));
    }

    #[test]
    fn difficulty_from_roll_option() {
        let n = RollNotification::single(
            17,
            CheckContext::new(CheckType::SkillCheck).with_roll_option("dc:10"),
        );
        let mut msg = ChatMessage::new(CARD);
        let out = run(&n, &mut msg);
        assert_eq!(out.record().unwrap().band, OutcomeBand::Opportunity);
    }

    #[test]
    fn unmatched_margin_stays_unprocessed() {
        let mut msg = ChatMessage::new(CARD);
        let out = run(&skill(14, 13), &mut msg);
        assert_eq!(
            out.skip_reason(),
            Some(SkipReason::NoBandMatched { margin: 1 })
        );
        assert!(msg.flags.is_empty());
        assert_eq!(msg.content, CARD);
    }

    #[traced_test]
    #[test]
    fn persistence_failure_is_reported_not_raised() {
        let mut msg = ReadOnly(ChatMessage::new(CARD));
        let out = handle_roll(
            &skill(15, 13),
            &mut msg,
            &AnnotatorConfig::default(),
            &Catalog::english(),
        );
        assert!(matches!(out, Disposition::Failed(TnoError::Persistence(_))));
        assert_eq!(msg.content(), CARD);
        assert!(logs_contain("failed to persist annotation"));
    }

    #[test]
    fn assess_reports_margin_and_band() {
        let event = RollEvent::from_notification(&skill(4, 13), false);
        let a = assess(&event).unwrap();
        assert_eq!(a.difficulty, 13);
        assert_eq!(a.margin, -9);
        assert_eq!(a.band, OutcomeBand::Threat);
    }
}

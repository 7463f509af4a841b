//! Target difficulty resolution.

use crate::event::{DC_TAG_PREFIX, RollEvent};

/// Resolve the difficulty a roll was made against.
///
/// The structured `dc.value` wins. Otherwise the first roll option of the
/// form `dc:<integer>` is used. Returns `None` when neither source has one.
pub fn resolve_difficulty(event: &RollEvent) -> Option<i64> {
    event
        .target_difficulty
        .or_else(|| event.roll_options.prefixed_int(DC_TAG_PREFIX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{CheckContext, CheckType, RollNotification};

    fn event(check: CheckContext) -> RollEvent {
        RollEvent::from_notification(&RollNotification::single(10, check), false)
    }

    #[test]
    fn structured_field_wins() {
        let e = event(
            CheckContext::new(CheckType::SkillCheck)
                .with_dc(13)
                .with_roll_option("dc:20"),
        );
        assert_eq!(resolve_difficulty(&e), Some(13));
    }

    #[test]
    fn falls_back_to_roll_option() {
        let e = event(CheckContext::new(CheckType::SkillCheck).with_roll_option("dc:18"));
        assert_eq!(resolve_difficulty(&e), Some(18));
    }

    #[test]
    fn check_options_are_not_a_difficulty_source() {
        let e = event(CheckContext::new(CheckType::SkillCheck).with_option("dc:18"));
        assert_eq!(resolve_difficulty(&e), None);
    }

    #[test]
    fn dc_without_value_falls_back() {
        let mut ctx = CheckContext::new(CheckType::SkillCheck).with_roll_option("dc:9");
        ctx.dc = Some(Default::default());
        assert_eq!(resolve_difficulty(&event(ctx)), Some(9));
    }

    #[test]
    fn first_dc_tag_in_host_order_wins() {
        let json = r#"{
            "system_roll": true,
            "rolls": [{ "total": 17 }],
            "context": { "type": "skill-check", "roll": { "options": ["dc:20", "dc:15"] } }
        }"#;
        let n: RollNotification = serde_json::from_str(json).unwrap();
        let e = RollEvent::from_notification(&n, false);
        let dc = resolve_difficulty(&e);
        assert_eq!(dc, Some(20));
        assert_eq!(
            crate::band::classify(17, 20),
            crate::band::OutcomeBand::Opportunity
        );
    }

    #[test]
    fn nothing_resolvable() {
        let e = event(CheckContext::new(CheckType::SkillCheck).with_roll_option("dc:easy"));
        assert_eq!(resolve_difficulty(&e), None);
    }
}

//! Inbound roll events.
//!
//! The host delivers a [`RollNotification`] whenever a roll message is
//! rendered. The annotator turns it into an immutable [`RollEvent`] by pairing
//! it with the message's processed marker; everything downstream reads only
//! the event.

use serde::{Deserialize, Serialize};

use crate::config::AnnotatorConfig;
use crate::message::MessageHandle;

/// Option tag marking an attack roll.
pub const TAG_ATTACK_ROLL: &str = "attack-roll";
/// Option tag marking a strike action.
pub const TAG_ACTION_STRIKE: &str = "action:strike";
/// Prefix of the roll-option tag carrying a difficulty, as in `dc:15`.
pub const DC_TAG_PREFIX: &str = "dc:";

/// The category of check a roll represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CheckType {
    /// A skill check (`skill-check`).
    SkillCheck,
    /// An attack roll (`attack` or `attack-roll`).
    Attack,
    /// A saving throw (`save` or `saving-throw`).
    Save,
    /// Any other roll category.
    Other,
}

impl CheckType {
    /// Parse a check type from its wire tag. Unknown tags map to [`CheckType::Other`].
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "skill-check" => Self::SkillCheck,
            "attack" | "attack-roll" => Self::Attack,
            "save" | "saving-throw" => Self::Save,
            _ => Self::Other,
        }
    }
}

impl From<String> for CheckType {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

impl From<CheckType> for String {
    fn from(check: CheckType) -> Self {
        check.to_string()
    }
}

impl std::fmt::Display for CheckType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SkillCheck => write!(f, "skill-check"),
            Self::Attack => write!(f, "attack"),
            Self::Save => write!(f, "save"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// A set of free-form option tags attached to a roll.
///
/// Tags keep the order the host delivered them in; duplicates are dropped.
/// Matching is exact: a tag is present only if the same string was inserted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct TagSet(Vec<String>);

impl TagSet {
    /// Create an empty tag set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tag at the end, unless it is already present.
    pub fn insert(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        if !self.contains(&tag) {
            self.0.push(tag);
        }
    }

    /// Returns true if the exact tag is present.
    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }

    /// Iterate over the tags in the order they were delivered.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Number of tags.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set has no tags.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if the tags mark an attack roll or a strike.
    pub fn marks_attack(&self) -> bool {
        self.contains(TAG_ATTACK_ROLL) || self.contains(TAG_ACTION_STRIKE)
    }

    /// Find the first tag, in delivery order, starting with `prefix` whose
    /// remainder parses as an integer, and return that integer.
    pub fn prefixed_int(&self, prefix: &str) -> Option<i64> {
        self.iter()
            .filter_map(|tag| tag.strip_prefix(prefix))
            .find_map(|rest| rest.parse::<i64>().ok())
    }
}

impl<S: Into<String>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut tags = Self::new();
        for tag in iter {
            tags.insert(tag);
        }
        tags
    }
}

impl From<Vec<String>> for TagSet {
    fn from(tags: Vec<String>) -> Self {
        tags.into_iter().collect()
    }
}

impl From<TagSet> for Vec<String> {
    fn from(tags: TagSet) -> Self {
        tags.0
    }
}

/// One rolled result. Only the total is of interest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOutcome {
    /// The roll's final total, modifiers included.
    pub total: i64,
}

/// The structured difficulty attached to a check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DcContext {
    /// The target difficulty, if the host could determine one.
    #[serde(default)]
    pub value: Option<i64>,
}

/// Options attached to the roll itself (as opposed to the check).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOptions {
    /// Free-form roll tags; may include a `dc:<int>` entry.
    #[serde(default)]
    pub options: TagSet,
}

/// Metadata describing the check a roll belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckContext {
    /// The check category.
    #[serde(rename = "type")]
    pub check_type: CheckType,
    /// Free-form check tags.
    #[serde(default)]
    pub options: TagSet,
    /// Structured target difficulty.
    #[serde(default)]
    pub dc: Option<DcContext>,
    /// Roll-level options.
    #[serde(default)]
    pub roll: Option<RollOptions>,
}

impl CheckContext {
    /// Create a context of the given type with no options and no difficulty.
    pub fn new(check_type: CheckType) -> Self {
        Self {
            check_type,
            options: TagSet::new(),
            dc: None,
            roll: None,
        }
    }

    /// Set the structured difficulty.
    pub fn with_dc(mut self, value: i64) -> Self {
        self.dc = Some(DcContext { value: Some(value) });
        self
    }

    /// Add a check option tag.
    pub fn with_option(mut self, tag: impl Into<String>) -> Self {
        self.options.insert(tag);
        self
    }

    /// Add a roll option tag.
    pub fn with_roll_option(mut self, tag: impl Into<String>) -> Self {
        self.roll
            .get_or_insert_with(RollOptions::default)
            .options
            .insert(tag);
        self
    }
}

/// The payload the host delivers when a roll message is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollNotification {
    /// Whether this is a completed dice roll belonging to the game system.
    #[serde(default)]
    pub system_roll: bool,
    /// Roll results in order. Only the first is used.
    #[serde(default)]
    pub rolls: Vec<RollOutcome>,
    /// Check metadata; absent when the host could not attach any.
    #[serde(default)]
    pub context: Option<CheckContext>,
}

impl RollNotification {
    /// A system roll with a single total and the given context.
    pub fn single(total: i64, context: CheckContext) -> Self {
        Self {
            system_roll: true,
            rolls: vec![RollOutcome { total }],
            context: Some(context),
        }
    }
}

/// An immutable view of one roll, as seen by the filter and classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollEvent {
    /// Whether the roll belongs to the game system.
    pub system_roll: bool,
    /// How many rolls the notification carried.
    pub roll_count: usize,
    /// Total of the first roll.
    pub roll_total: Option<i64>,
    /// Check category; `None` when the context was missing.
    pub check_type: Option<CheckType>,
    /// Check option tags.
    pub options: TagSet,
    /// Structured target difficulty.
    pub target_difficulty: Option<i64>,
    /// Roll option tags.
    pub roll_options: TagSet,
    /// Whether the message already carries the processed marker.
    pub already_processed: bool,
}

impl RollEvent {
    /// Build an event from a notification and the current marker state.
    pub fn from_notification(notification: &RollNotification, already_processed: bool) -> Self {
        let context = notification.context.as_ref();
        Self {
            system_roll: notification.system_roll,
            roll_count: notification.rolls.len(),
            roll_total: notification.rolls.first().map(|r| r.total),
            check_type: context.map(|c| c.check_type),
            options: context.map(|c| c.options.clone()).unwrap_or_default(),
            target_difficulty: context.and_then(|c| c.dc.as_ref()).and_then(|dc| dc.value),
            roll_options: context
                .and_then(|c| c.roll.as_ref())
                .map(|r| r.options.clone())
                .unwrap_or_default(),
            already_processed,
        }
    }

    /// Build an event, reading the processed marker from the message.
    pub fn observe<M: MessageHandle + ?Sized>(
        notification: &RollNotification,
        message: &M,
        config: &AnnotatorConfig,
    ) -> Self {
        let processed = message
            .flag(&config.namespace, &config.processed_key)
            .unwrap_or(false);
        Self::from_notification(notification, processed)
    }

    /// Returns true if the check context was missing.
    pub fn is_malformed(&self) -> bool {
        self.check_type.is_none()
    }
}

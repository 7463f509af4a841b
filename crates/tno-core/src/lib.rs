//! Threat and opportunity annotation for skill-check roll messages.
//!
//! When the host renders a roll message, [`handle_roll`] decides whether the
//! roll is an eligible skill check, measures its margin against the target
//! difficulty, and, if the margin falls into one of two fixed bands, writes a
//! one-time annotation into the message. The message itself stays owned by
//! the host and is reached only through [`MessageHandle`].

pub mod annotate;
pub mod band;
pub mod config;
pub mod difficulty;
pub mod error;
pub mod event;
pub mod filter;
pub mod i18n;
pub mod message;
pub mod pipeline;

pub use annotate::{AnnotationRecord, annotate};
pub use band::{OutcomeBand, band_for_margin, classify};
pub use config::AnnotatorConfig;
pub use difficulty::resolve_difficulty;
pub use error::{StoreError, StoreResult, TnoError, TnoResult};
pub use event::{CheckContext, CheckType, RollEvent, RollNotification, TagSet};
pub use filter::{FilterReason, should_process};
pub use i18n::{Catalog, Localizer};
pub use message::{ChatMessage, MessageHandle, MessageId};
pub use pipeline::{Disposition, SkipReason, assess, handle_roll};

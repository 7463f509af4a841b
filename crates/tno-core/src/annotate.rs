//! One-time annotation of a message's rendered content.
//!
//! The processed marker is written before the content. If the content write
//! fails, the message stays marked without a visible annotation; it is never
//! annotated twice.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::band::OutcomeBand;
use crate::config::AnnotatorConfig;
use crate::error::TnoResult;
use crate::i18n::{Localizer, label_key};
use crate::message::MessageHandle;

/// The annotation written onto a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationRecord {
    /// The band the roll fell into.
    pub band: OutcomeBand,
    /// Localized display text.
    pub label: String,
    /// Band-specific style class.
    pub style_class: String,
    /// Always true once the record exists.
    pub processed_marker: bool,
    /// Roll total minus difficulty.
    pub margin: i64,
    /// When the annotation was written.
    pub annotated_at: DateTime<Utc>,
}

/// Render the annotation block for a band.
pub fn render_block(
    band: OutcomeBand,
    label: &str,
    style_class: &str,
    config: &AnnotatorConfig,
) -> String {
    format!(
        r#"<div class="{} {}" data-band="{}">{}</div>"#,
        config.block_class,
        style_class,
        band,
        escape_html(label)
    )
}

/// Count annotation blocks in rendered content.
pub fn count_blocks(content: &str, config: &AnnotatorConfig) -> usize {
    let needle = format!(r#"<div class="{} "#, config.block_class);
    content.matches(&needle).count()
}

/// Insert `block` inside the first `<div>` carrying `container_class`, just
/// before its closing tag. Falls back to appending when no such container
/// exists or its markup is unbalanced.
pub fn splice_block(content: &str, block: &str, container_class: &str) -> String {
    match container_end(content, container_class) {
        Some(at) => {
            let mut out = String::with_capacity(content.len() + block.len());
            out.push_str(&content[..at]);
            out.push_str(block);
            out.push_str(&content[at..]);
            out
        }
        None => format!("{content}{block}"),
    }
}

/// Annotate a message for `band`, once.
///
/// Returns `Ok(None)` when the band is [`OutcomeBand::None`] or the message is
/// already marked. The marker is persisted before the content.
pub fn annotate<M, L>(
    message: &mut M,
    band: OutcomeBand,
    margin: i64,
    config: &AnnotatorConfig,
    localizer: &L,
) -> TnoResult<Option<AnnotationRecord>>
where
    M: MessageHandle + ?Sized,
    L: Localizer + ?Sized,
{
    let (Some(key), Some(style_class)) = (label_key(band), config.style_class(band)) else {
        return Ok(None);
    };
    let label = localizer.localize(key);

    if message.flag(&config.namespace, &config.processed_key) == Some(true) {
        warn!(%band, "message already annotated, skipping");
        return Ok(None);
    }

    message.set_flag(&config.namespace, &config.processed_key, true)?;

    let block = render_block(band, &label, style_class, config);
    let content = splice_block(message.content(), &block, &config.container_class);
    message.update_content(content)?;

    info!(%band, margin, "annotated roll message");
    Ok(Some(AnnotationRecord {
        band,
        label,
        style_class: style_class.to_string(),
        processed_marker: true,
        margin,
        annotated_at: Utc::now(),
    }))
}

/// Byte offset of the closing tag of the first matching container.
fn container_end(content: &str, container_class: &str) -> Option<usize> {
    let mut search = 0;
    while let Some(start) = find_div_open(content, search) {
        let tag_end = start + content[start..].find('>')?;
        let tag = &content[start..=tag_end];
        if has_class(tag, container_class) {
            return matching_close(content, tag_end + 1);
        }
        search = tag_end + 1;
    }
    None
}

/// Position of the `</div` closing the element whose body starts at `from`.
fn matching_close(content: &str, from: usize) -> Option<usize> {
    let mut depth = 1usize;
    let mut pos = from;
    loop {
        let open = find_div_open(content, pos);
        let close = find_div_close(content, pos)?;
        match open {
            Some(o) if o < close => {
                let tag_end = o + content[o..].find('>')?;
                if !content[..tag_end].ends_with('/') {
                    depth += 1;
                }
                pos = tag_end + 1;
            }
            _ => {
                depth -= 1;
                if depth == 0 {
                    return Some(close);
                }
                pos = close + 5;
            }
        }
    }
}

/// Next `<div` start tag at or after `from`, skipping look-alikes such as `<divider`.
fn find_div_open(content: &str, from: usize) -> Option<usize> {
    let mut pos = from;
    while let Some(i) = content[pos..].find("<div") {
        let at = pos + i;
        match content[at + 4..].chars().next() {
            Some(c) if c == '>' || c == '/' || c.is_whitespace() => return Some(at),
            _ => pos = at + 4,
        }
    }
    None
}

/// Next `</div` end tag at or after `from`, skipping look-alikes such as `</divider`.
fn find_div_close(content: &str, from: usize) -> Option<usize> {
    let mut pos = from;
    while let Some(i) = content[pos..].find("</div") {
        let at = pos + i;
        match content[at + 5..].chars().next() {
            Some(c) if c == '>' || c.is_whitespace() => return Some(at),
            _ => pos = at + 5,
        }
    }
    None
}

/// Whether a start tag's `class` attribute lists `class`.
///
/// Accepts whitespace around `=` and double-quoted, single-quoted or
/// unquoted values.
fn has_class(tag: &str, class: &str) -> bool {
    tag.match_indices("class")
        .filter(|&(i, _)| tag[..i].ends_with(char::is_whitespace))
        .filter_map(|(i, _)| class_value(&tag[i + 5..]))
        .any(|value| value.split_whitespace().any(|c| c == class))
}

/// The attribute value following an attribute name, if `rest` starts with `=`.
fn class_value(rest: &str) -> Option<&str> {
    let rest = rest.trim_start().strip_prefix('=')?.trim_start();
    match rest.chars().next()? {
        quote @ ('"' | '\'') => {
            let value = &rest[1..];
            value.find(quote).map(|end| &value[..end])
        }
        _ => {
            let end = rest
                .find(|c: char| c.is_whitespace() || c == '>' || c == '/')
                .unwrap_or(rest.len());
            Some(&rest[..end])
        }
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

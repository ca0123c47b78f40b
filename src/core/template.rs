//! Example env template generation.
//!
//! Groups secrets by identical tag sets and renders a commented `KEY=default`
//! file. Untagged secrets come first without a banner; every other group gets
//! a centered banner naming its tags, in order of increasing tag count.

use std::collections::HashMap;

use tracing::debug;

use crate::core::cipher::hash;
use crate::core::constants::{BANNER_WIDTH, DEFAULT_MARKER};
use crate::core::domain::{SecretEntry, Tag};
use crate::core::types::Digest;

/// Hash of a tag set; identical for any ordering of the same slugs.
pub fn tags_hash<S: AsRef<str>>(slugs: &[S]) -> Digest {
    let mut sorted: Vec<&str> = slugs.iter().map(AsRef::as_ref).collect();
    sorted.sort_unstable();
    sorted.dedup();

    // length-prefixed so ["ab", "c"] and ["a", "bc"] differ
    let encoded: String = sorted
        .iter()
        .map(|slug| format!("{}:{};", slug.len(), slug))
        .collect();
    hash(encoded.as_bytes())
}

/// Secrets sharing one tag set.
#[derive(Debug, Clone)]
pub struct TagGroup<'a> {
    pub tags_hash: Digest,
    /// The set's tags, ordered by slug.
    pub tags: Vec<Tag>,
    /// Members ordered by key.
    pub members: Vec<&'a SecretEntry>,
}

impl TagGroup<'_> {
    /// Tag names joined for the banner.
    pub fn heading(&self) -> String {
        self.tags
            .iter()
            .map(|t| t.name.as_str())
            .collect::<Vec<_>>()
            .join(" & ")
    }

    fn first_key(&self) -> &str {
        self.members.first().map(|m| m.key.as_str()).unwrap_or("")
    }
}

fn distinct_tags(entry: &SecretEntry) -> Vec<Tag> {
    let mut tags = entry.tags.clone();
    tags.sort_by(|a, b| a.slug.cmp(&b.slug));
    tags.dedup_by(|a, b| a.slug == b.slug);
    tags
}

/// Group entries by identical tag set.
///
/// Groups are ordered by tag count, then by their first member's key, then
/// by tags hash, so output never depends on input order.
pub fn group_by_tags(entries: &[SecretEntry]) -> Vec<TagGroup<'_>> {
    let mut groups: HashMap<Digest, TagGroup<'_>> = HashMap::new();

    for entry in entries {
        let digest = tags_hash(entry.tag_slugs().as_slice());
        groups
            .entry(digest.clone())
            .or_insert_with(|| TagGroup {
                tags_hash: digest,
                tags: distinct_tags(entry),
                members: Vec::new(),
            })
            .members
            .push(entry);
    }

    let mut groups: Vec<TagGroup<'_>> = groups.into_values().collect();
    for group in &mut groups {
        group.members.sort_by(|a, b| a.key.cmp(&b.key));
    }
    groups.sort_by(|a, b| {
        a.tags
            .len()
            .cmp(&b.tags.len())
            .then_with(|| a.first_key().cmp(b.first_key()))
            .then_with(|| a.tags_hash.cmp(&b.tags_hash))
    });

    debug!(groups = groups.len(), secrets = entries.len(), "grouped by tags");
    groups
}

/// Split a secret comment into `(comment, default_value)`.
///
/// Everything after the last `DEFAULT:` marker is the default value and
/// everything before it the comment, both trimmed. Without a marker the
/// comment is returned as is with an empty default.
pub fn parse_comment(comment: &str) -> (String, String) {
    match comment.rfind(DEFAULT_MARKER) {
        Some(at) => (
            comment[..at].trim().to_string(),
            comment[at + DEFAULT_MARKER.len()..].trim().to_string(),
        ),
        None => (comment.to_string(), String::new()),
    }
}

/// Render a heading centered in a star rule inside a `#` border.
pub fn banner(heading: &str) -> String {
    let title = format!(" {} ", heading.to_uppercase());
    let stars = BANNER_WIDTH.saturating_sub(title.chars().count());
    let left = stars / 2;
    let right = stars - left;

    let line = format!("# {}{}{} #", "*".repeat(left), title, "*".repeat(right));
    let border = "#".repeat(line.chars().count());
    format!("{border}\n{line}\n{border}")
}

fn render_row(entry: &SecretEntry) -> String {
    let (comment, default_value) = parse_comment(&entry.comment);
    let assignment = format!("{}={}", entry.key.trim(), default_value);

    let comment = comment.trim();
    if comment.is_empty() {
        return assignment;
    }

    let mut lines: Vec<String> = comment
        .lines()
        .map(|line| format!("# {}", line).trim_end().to_string())
        .collect();
    lines.push(assignment);
    lines.join("\n")
}

/// Render the example env template for `entries`.
pub fn render(entries: &[SecretEntry]) -> String {
    let sections: Vec<String> = group_by_tags(entries)
        .iter()
        .map(|group| {
            let rows = group
                .members
                .iter()
                .map(|entry| render_row(entry))
                .collect::<Vec<_>>()
                .join("\n\n");
            if group.tags.is_empty() {
                rows
            } else {
                format!("{}\n\n{}", banner(&group.heading()), rows)
            }
        })
        .collect();

    if sections.is_empty() {
        return String::new();
    }
    let mut out = sections.join("\n\n\n");
    out.push('\n');
    out
}

// ABOUTME: Search query normalization and merging of per-field result groups
// ABOUTME: Produces a deduplicated relevance-ordered list ready for the search listings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE_RUN: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\s+").ok());

/// Turn free text into a full-text match expression
///
/// Quotes are dropped and whitespace runs become `&`, so every word must
/// match. Returns `None` when nothing searchable remains.
#[must_use]
pub fn normalize_query(raw: &str) -> Option<String> {
    let stripped: String = raw.chars().filter(|c| !matches!(c, '"' | '\'')).collect();
    let trimmed = stripped.trim();
    if trimmed.is_empty() {
        return None;
    }

    let joined = WHITESPACE_RUN.as_ref().map_or_else(
        || trimmed.split_whitespace().collect::<Vec<_>>().join("&"),
        |pattern| pattern.replace_all(trimmed, "&").into_owned(),
    );
    Some(joined)
}

/// Concatenate result groups, keeping only the first occurrence of each key
///
/// Groups are taken in priority order (e.g. content matches before title
/// matches) and order within a group is preserved.
pub fn merge_unique<T, I, F>(groups: I, key_fn: F) -> Vec<T>
where
    I: IntoIterator<Item = Vec<T>>,
    F: Fn(&T) -> &str,
{
    let mut seen: HashSet<String> = HashSet::new();
    let mut merged = Vec::new();
    for item in groups.into_iter().flatten() {
        if seen.insert(key_fn(&item).to_owned()) {
            merged.push(item);
        }
    }
    merged
}

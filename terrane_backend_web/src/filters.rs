// Copyright 2026 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Filter-string translation.
//!
//! A toolkit filter string takes one of two shapes:
//!
//! ```text
//! Images (*.png *.jpg)      description + parenthesized pattern list
//! *.txt                     bare pattern list
//! ```
//!
//! The File System Access API matches by filename suffix only — it has no
//! wildcard support and never matches the filename body. A pattern is
//! therefore representable only if it is an optional `*` followed by a
//! `.suffix`; the leading `*` is discarded. A catch-all pattern (`*`,
//! `**`, `*.*`, ...) is unrepresentable and poisons its whole group: the
//! group is dropped rather than silently widened or narrowed.

use std::sync::LazyLock;

use regex::Regex;

/// One user-facing file-type choice: a label plus its accepted suffixes.
///
/// Fields are immutable after parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterType {
    /// Trimmed description, possibly empty for bare pattern lists.
    pub description: String,
    /// Dot-prefixed suffixes, in the order written.
    pub extensions: Vec<String>,
}

/// Either `DESC (PATTERNS)` — groups 1 and 2 — or bare `PATTERNS`, group 3.
static FILTER_GRAMMAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:([^(]*)\(([^()]+)\)[^)]*|([^()]+))").expect("filter grammar regex is valid")
});

/// Any number of asterisks, or asterisks with a single dot between them.
static CATCH_ALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\*+|\*+\.\*+)$").expect("catch-all regex is valid"));

/// Optional leading `*`, then a dot-prefixed wildcard-free suffix.
static SUFFIX_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\*?)(\.[^*]+)$").expect("suffix regex is valid"));

/// Parses one filter string into a [`FilterType`].
///
/// Returns `None` when the string fits neither grammar or when any of its
/// patterns is unrepresentable as a suffix match.
#[must_use]
pub fn parse_filter(filter: &str) -> Option<FilterType> {
    let groups = FILTER_GRAMMAR.captures(filter)?;
    let description = groups.get(1).map_or("", |m| m.as_str()).trim();
    let patterns = groups.get(2).or_else(|| groups.get(3))?.as_str();

    let mut extensions = Vec::new();
    for pattern in patterns.split_whitespace() {
        extensions.push(parse_extension(pattern)?);
    }
    if extensions.is_empty() {
        return None;
    }

    Some(FilterType {
        description: description.to_owned(),
        extensions,
    })
}

/// Maps a filter list to accept groups, dropping unrepresentable ones.
///
/// Input order is preserved; nothing is deduplicated. An empty result means
/// "no filter restriction" and callers omit the type list entirely rather
/// than sending an empty one.
pub fn filter_list_to_types<I, F>(filters: I) -> Vec<FilterType>
where
    I: IntoIterator<Item = F>,
    F: AsRef<str>,
{
    filters
        .into_iter()
        .filter_map(|filter| parse_filter(filter.as_ref()))
        .collect()
}

/// Reduces one pattern to the `.suffix` the web API can match on.
fn parse_extension(pattern: &str) -> Option<String> {
    if CATCH_ALL.is_match(pattern) {
        return None;
    }
    let suffix = SUFFIX_PATTERN.captures(pattern)?;
    Some(suffix[2].to_owned())
}

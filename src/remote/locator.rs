//! Identifier extraction from API locators.
//!
//! The catalog API refers to entities by URL
//! (`https://host/api/v2/pokemon/25/`); the identifier is the trailing
//! numeric path segment.

use std::sync::LazyLock;

use regex::Regex;

static TRAILING_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/(\d+)/?$").expect("trailing id regex should be valid"));

/// Parse the identifier out of a locator's trailing numeric segment.
///
/// Query strings and fragments are ignored. Returns `None` when the last
/// segment is not a positive integer.
pub fn id_from_locator(locator: &str) -> Option<u32> {
    let path = locator
        .split(['?', '#'])
        .next()
        .unwrap_or(locator)
        .trim();

    TRAILING_ID
        .captures(path)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .filter(|&id| id >= 1)
}

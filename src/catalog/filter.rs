//! Filter state: category, subgroup range and free-text search.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::error::{DexError, Result};

/// Inclusive identifier ranges of each subgroup (national dex generations)
pub const SUBGROUP_RANGES: [(u8, u32, u32); 7] = [
    (1, 1, 151),
    (2, 152, 251),
    (3, 252, 386),
    (4, 387, 493),
    (5, 494, 649),
    (6, 650, 721),
    (7, 722, 809),
];

/// Category restriction
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn is_all(&self) -> bool {
        matches!(self, CategoryFilter::All)
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            CategoryFilter::All => None,
            CategoryFilter::Only(name) => Some(name),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = DexError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_lowercase();
        if name.is_empty() || name == "all" {
            return Ok(CategoryFilter::All);
        }

        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(DexError::InvalidCategory(
                s.to_string(),
                "only letters, digits and '-' are allowed".to_string(),
            ));
        }

        Ok(CategoryFilter::Only(name))
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => write!(f, "all"),
            CategoryFilter::Only(name) => write!(f, "{name}"),
        }
    }
}

/// Contiguous identifier range of the universe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Subgroup {
    #[default]
    All,
    Generation(u8),
}

impl Subgroup {
    pub fn is_all(self) -> bool {
        matches!(self, Subgroup::All)
    }

    /// Inclusive identifier bounds. `All` covers every identifier; the base
    /// pool itself is already capped at the universe maximum.
    pub fn range(self) -> RangeInclusive<u32> {
        match self {
            Subgroup::All => 1..=u32::MAX,
            Subgroup::Generation(generation) => SUBGROUP_RANGES
                .iter()
                .find(|(g, _, _)| *g == generation)
                .map(|&(_, min, max)| min..=max)
                .unwrap_or(1..=u32::MAX),
        }
    }
}

impl FromStr for Subgroup {
    type Err = DexError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") || trimmed.is_empty() {
            return Ok(Subgroup::All);
        }

        trimmed
            .parse::<u8>()
            .ok()
            .filter(|g| SUBGROUP_RANGES.iter().any(|(known, _, _)| known == g))
            .map(Subgroup::Generation)
            .ok_or_else(|| DexError::InvalidSubgroup(s.to_string()))
    }
}

impl fmt::Display for Subgroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subgroup::All => write!(f, "all"),
            Subgroup::Generation(g) => write!(f, "{g}"),
        }
    }
}

/// Result ordering. Only ascending id exists today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    IdAsc,
}

/// The user's current filters
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    search: String,
    pub category: CategoryFilter,
    pub subgroup: Subgroup,
    pub sort: SortOrder,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Search text, already trimmed and lowercased
    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, raw: &str) {
        self.search = raw.trim().to_lowercase();
    }

    pub fn with_search(mut self, raw: &str) -> Self {
        self.set_search(raw);
        self
    }

    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    pub fn with_subgroup(mut self, subgroup: Subgroup) -> Self {
        self.subgroup = subgroup;
        self
    }

    /// True when no filter restricts the universe, which selects remote mode
    pub fn is_unfiltered(&self) -> bool {
        self.category.is_all() && self.search.is_empty() && self.subgroup.is_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unfiltered() {
        assert!(FilterState::new().is_unfiltered());
    }

    #[test]
    fn test_any_single_filter_is_filtered() {
        assert!(!FilterState::new().with_search("pika").is_unfiltered());
        assert!(
            !FilterState::new()
                .with_category(CategoryFilter::Only("fire".to_string()))
                .is_unfiltered()
        );
        assert!(
            !FilterState::new()
                .with_subgroup(Subgroup::Generation(1))
                .is_unfiltered()
        );
    }

    #[test]
    fn test_whitespace_search_is_unfiltered() {
        assert!(FilterState::new().with_search("   ").is_unfiltered());
    }

    #[test]
    fn test_search_is_normalized() {
        let filters = FilterState::new().with_search("  PikA ");
        assert_eq!(filters.search(), "pika");
    }

    #[test]
    fn test_subgroup_parse() {
        assert_eq!("all".parse::<Subgroup>().unwrap(), Subgroup::All);
        assert_eq!("ALL".parse::<Subgroup>().unwrap(), Subgroup::All);
        assert_eq!("3".parse::<Subgroup>().unwrap(), Subgroup::Generation(3));
        assert!("0".parse::<Subgroup>().is_err());
        assert!("8".parse::<Subgroup>().is_err());
        assert!("three".parse::<Subgroup>().is_err());
    }

    #[test]
    fn test_subgroup_ranges() {
        assert_eq!(Subgroup::Generation(1).range(), 1..=151);
        assert_eq!(Subgroup::Generation(3).range(), 252..=386);
        assert_eq!(Subgroup::Generation(7).range(), 722..=809);
        assert!(Subgroup::All.range().contains(&809));
    }

    #[test]
    fn test_subgroup_ranges_are_contiguous() {
        for pair in SUBGROUP_RANGES.windows(2) {
            assert_eq!(pair[0].2 + 1, pair[1].1);
        }
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            " Fire ".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only("fire".to_string())
        );
        assert!("fire/../x".parse::<CategoryFilter>().is_err());
    }

    #[test]
    fn test_display_roundtrip() {
        let category = CategoryFilter::Only("water".to_string());
        assert_eq!(category.to_string().parse::<CategoryFilter>().unwrap(), category);
        assert_eq!(Subgroup::Generation(5).to_string(), "5");
    }
}

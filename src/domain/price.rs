//! Price tier parsing.
//!
//! Venues advertise price as a run of dollar signs (`"$"` to `"$$$$"`). The
//! tier is parsed once at the storage boundary into [`PriceTier`] and written
//! back out in the same dollar-sign form, so the presentation string and the
//! ordinal can never drift apart.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordinal price tier, 1 (`$`) through 4 (`$$$$`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PriceTier(u8);

impl PriceTier {
    /// Cheapest tier (`$`).
    pub const MIN: u8 = 1;

    /// Most expensive tier (`$$$$`).
    pub const MAX: u8 = 4;

    /// Builds a tier from its level, returning `None` outside `1..=4`.
    #[must_use]
    pub const fn new(level: u8) -> Option<Self> {
        if level >= Self::MIN && level <= Self::MAX {
            Some(Self(level))
        } else {
            None
        }
    }

    /// Parses a dollar-sign string such as `"$$"`.
    ///
    /// Surrounding whitespace is ignored; any other character or a length
    /// outside `1..=4` yields `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use gfradar::domain::PriceTier;
    ///
    /// assert_eq!(PriceTier::parse("$$").map(|t| t.level()), Some(2));
    /// assert!(PriceTier::parse("$$$$$").is_none());
    /// assert!(PriceTier::parse("cheap").is_none());
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || !trimmed.chars().all(|c| c == '$') {
            return None;
        }
        u8::try_from(trimmed.len()).ok().and_then(Self::new)
    }

    /// Numeric level, 1 through 4.
    #[must_use]
    pub const fn level(self) -> u8 {
        self.0
    }

    /// Whether the tier counts as budget (`$` or `$$`).
    #[must_use]
    pub const fn is_budget(self) -> bool {
        self.0 <= 2
    }

    /// All tiers, cheapest first.
    #[must_use]
    pub fn all() -> [Self; 4] {
        [Self(1), Self(2), Self(3), Self(4)]
    }
}

impl fmt::Display for PriceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.0 {
            f.write_str("$")?;
        }
        Ok(())
    }
}

impl TryFrom<String> for PriceTier {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("invalid price range: {value:?}"))
    }
}

impl From<PriceTier> for String {
    fn from(tier: PriceTier) -> Self {
        tier.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_every_tier() {
        for (raw, level) in [("$", 1), ("$$", 2), ("$$$", 3), ("$$$$", 4)] {
            assert_eq!(PriceTier::parse(raw).map(PriceTier::level), Some(level));
        }
    }

    #[test]
    fn test_rejects_out_of_range_and_garbage() {
        assert!(PriceTier::parse("").is_none());
        assert!(PriceTier::parse("$$$$$").is_none());
        assert!(PriceTier::parse("$a").is_none());
        assert!(PriceTier::new(0).is_none());
        assert!(PriceTier::new(5).is_none());
    }

    #[test]
    fn test_display_matches_wire_form() {
        let tier = PriceTier::parse(" $$$ ").unwrap();
        assert_eq!(tier.to_string(), "$$$");
        assert_eq!(serde_json::to_string(&tier).unwrap(), "\"$$$\"");
    }

    #[test]
    fn test_budget_tiers() {
        let budget: Vec<u8> = PriceTier::all()
            .into_iter()
            .filter(|t| t.is_budget())
            .map(PriceTier::level)
            .collect();
        assert_eq!(budget, vec![1, 2]);
    }
}

// rarity.rs - Rarity tiers for residues at a position

use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete rarity label for one residue at one position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RarityTier {
    Unique,
    OnlyTwo,
    OnlyThree,
    OnlyFour,
    OnlyFive,
    HighlyConserved,
    Conserved,
    Majority,
    Regular,
    Common,
    Often,
    Occasional,
    Unusual,
    Rare,
    VeryRare,
    ExtremelyRare,
}

/// Percentage thresholds, highest first. Order is significant.
pub const RARITY_THRESHOLDS: &[(RarityTier, f64)] = &[
    (RarityTier::HighlyConserved, 95.0),
    (RarityTier::Conserved, 87.0),
    (RarityTier::Majority, 51.0),
    (RarityTier::Regular, 30.0),
    (RarityTier::Common, 20.0),
    (RarityTier::Often, 15.0),
    (RarityTier::Occasional, 10.0),
    (RarityTier::Unusual, 5.0),
    (RarityTier::Rare, 2.5),
    (RarityTier::VeryRare, 1.0),
    (RarityTier::ExtremelyRare, 0.5),
];

/// Tiers for residues seen one to five times, checked before any percentage
const LOW_COUNT_TIERS: [RarityTier; 5] = [
    RarityTier::Unique,
    RarityTier::OnlyTwo,
    RarityTier::OnlyThree,
    RarityTier::OnlyFour,
    RarityTier::OnlyFive,
];

impl RarityTier {
    pub fn label(&self) -> &'static str {
        match self {
            RarityTier::Unique => "unique",
            RarityTier::OnlyTwo => "only_two",
            RarityTier::OnlyThree => "only_three",
            RarityTier::OnlyFour => "only_four",
            RarityTier::OnlyFive => "only_five",
            RarityTier::HighlyConserved => "highly_conserved",
            RarityTier::Conserved => "conserved",
            RarityTier::Majority => "majority",
            RarityTier::Regular => "regular",
            RarityTier::Common => "common",
            RarityTier::Often => "often",
            RarityTier::Occasional => "occasional",
            RarityTier::Unusual => "unusual",
            RarityTier::Rare => "rare",
            RarityTier::VeryRare => "very_rare",
            RarityTier::ExtremelyRare => "extremely_rare",
        }
    }
}

impl fmt::Display for RarityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a residue from its percentage and raw count at a position.
///
/// Counts of one to five map straight to `unique`..`only_five`. Otherwise the
/// first tier in `RARITY_THRESHOLDS` whose threshold is `<= percentage` wins.
/// Percentages below every threshold fall back to the last entry of the table.
pub fn classify_rarity(percentage: f64, count: usize) -> RarityTier {
    if (1..=LOW_COUNT_TIERS.len()).contains(&count) {
        return LOW_COUNT_TIERS[count - 1];
    }

    let fallback = RARITY_THRESHOLDS
        .last()
        .map_or(RarityTier::ExtremelyRare, |(tier, _)| *tier);

    RARITY_THRESHOLDS
        .iter()
        .find(|(_, threshold)| *threshold <= percentage)
        .map_or(fallback, |(tier, _)| *tier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_count_overrides() {
        for percentage in [0.1, 50.0, 100.0] {
            assert_eq!(classify_rarity(percentage, 1), RarityTier::Unique);
            assert_eq!(classify_rarity(percentage, 2), RarityTier::OnlyTwo);
            assert_eq!(classify_rarity(percentage, 3), RarityTier::OnlyThree);
            assert_eq!(classify_rarity(percentage, 4), RarityTier::OnlyFour);
            assert_eq!(classify_rarity(percentage, 5), RarityTier::OnlyFive);
        }
    }

    #[test]
    fn test_percentage_tiers() {
        assert_eq!(classify_rarity(96.0, 50), RarityTier::HighlyConserved);
        assert_eq!(classify_rarity(95.0, 50), RarityTier::HighlyConserved);
        assert_eq!(classify_rarity(94.99, 50), RarityTier::Conserved);
        assert_eq!(classify_rarity(51.0, 50), RarityTier::Majority);
        assert_eq!(classify_rarity(30.5, 50), RarityTier::Regular);
        assert_eq!(classify_rarity(20.0, 50), RarityTier::Common);
        assert_eq!(classify_rarity(15.0, 50), RarityTier::Often);
        assert_eq!(classify_rarity(10.0, 50), RarityTier::Occasional);
        assert_eq!(classify_rarity(7.5, 50), RarityTier::Unusual);
        assert_eq!(classify_rarity(2.5, 50), RarityTier::Rare);
        assert_eq!(classify_rarity(1.2, 50), RarityTier::VeryRare);
        assert_eq!(classify_rarity(0.5, 50), RarityTier::ExtremelyRare);
    }

    #[test]
    fn test_below_every_threshold() {
        assert_eq!(classify_rarity(0.3, 50), RarityTier::ExtremelyRare);
        assert_eq!(classify_rarity(0.0, 6), RarityTier::ExtremelyRare);
    }

    #[test]
    fn test_zero_count_uses_percentage() {
        assert_eq!(classify_rarity(60.0, 0), RarityTier::Majority);
    }

    #[test]
    fn test_threshold_table_is_descending() {
        for pair in RARITY_THRESHOLDS.windows(2) {
            assert!(pair[0].1 > pair[1].1);
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(RarityTier::OnlyTwo.to_string(), "only_two");

        let tiers = LOW_COUNT_TIERS
            .iter()
            .chain(RARITY_THRESHOLDS.iter().map(|(tier, _)| tier));
        for tier in tiers {
            let json = serde_json::to_string(&tier).unwrap();
            assert_eq!(json, format!("\"{}\"", tier.label()));
        }
    }
}

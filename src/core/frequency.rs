// frequency.rs - Residue frequency normalization

use super::ingest::PositionCounts;

/// Share of one residue at a position, before rarity classification
#[derive(Debug, Clone, PartialEq)]
pub struct ResidueShare {
    pub residue: char,
    pub count: usize,
    pub percentage: f64,
}

/// Round to two decimals from the exact binary value of `value`
pub fn round_percentage(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

/// Turn raw counts into first-seen ordered percentages.
///
/// An all-gap position (total of zero) yields no shares rather than dividing by zero.
pub fn aggregate_frequencies(counts: &PositionCounts) -> Vec<ResidueShare> {
    let total = counts.total();
    if total == 0 {
        return Vec::new();
    }

    counts
        .iter()
        .map(|(residue, count)| ResidueShare {
            residue,
            count,
            percentage: round_percentage(count as f64 * 100.0 / total as f64),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(pairs: &[(char, usize)]) -> PositionCounts {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_worked_example() {
        let shares = aggregate_frequencies(&counts(&[('A', 2), ('C', 1)]));

        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].residue, 'A');
        assert_eq!(shares[0].count, 2);
        assert_eq!(shares[0].percentage, 66.67);
        assert_eq!(shares[1].residue, 'C');
        assert_eq!(shares[1].percentage, 33.33);
    }

    #[test]
    fn test_order_is_not_alphabetical() {
        let shares = aggregate_frequencies(&counts(&[('Y', 1), ('D', 1), ('A', 2)]));
        let labels: Vec<char> = shares.iter().map(|s| s.residue).collect();
        assert_eq!(labels, vec!['Y', 'D', 'A']);
    }

    #[test]
    fn test_percentages_sum_to_hundred() {
        let shares = aggregate_frequencies(&counts(&[('A', 1), ('C', 1), ('D', 1), ('E', 4), ('F', 7)]));
        let sum: f64 = shares.iter().map(|s| s.percentage).sum();
        assert!((sum - 100.0).abs() <= 0.1, "sum was {}", sum);
    }

    #[test]
    fn test_all_gap_position() {
        assert!(aggregate_frequencies(&PositionCounts::new()).is_empty());
    }

    #[test]
    fn test_round_percentage() {
        assert_eq!(round_percentage(100.0), 100.0);
        assert_eq!(round_percentage(12.3456), 12.35);
        assert_eq!(round_percentage(1.0 / 3.0 * 100.0), 33.33);
        // 2.675 is stored just below the tie, so it rounds down
        assert_eq!(round_percentage(2.675), 2.67);
    }
}

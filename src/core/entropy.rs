// entropy.rs - Shannon entropy of residue distributions

/// Size of the amino-acid alphabet used to normalise entropy
pub const AMINO_ACID_ALPHABET_SIZE: usize = 20;

/// Raw and normalised Shannon entropy for one position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntropyScores {
    pub shannon: f64,
    pub normalised: f64,
}

impl EntropyScores {
    pub fn zero() -> Self {
        Self {
            shannon: 0.0,
            normalised: 0.0,
        }
    }
}

/// Maximum entropy of a uniform distribution over the amino-acid alphabet
pub fn max_alphabet_entropy() -> f64 {
    (AMINO_ACID_ALPHABET_SIZE as f64).log2()
}

/// Shannon entropy (bits) of the distribution given by `counts`.
///
/// The normalised score always divides by `log2(20)`, whatever the number of
/// residues observed, so it exceeds 1.0 when more than 20 symbols occur.
pub fn shannon_entropy(counts: &[usize]) -> EntropyScores {
    let total: usize = counts.iter().sum();
    if total == 0 {
        return EntropyScores::zero();
    }

    let total = total as f64;
    let sum: f64 = counts
        .iter()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let p = count as f64 / total;
            p * p.log2()
        })
        .sum();

    // A single residue gives -0.0
    let shannon = if sum == 0.0 { 0.0 } else { -sum };

    EntropyScores {
        shannon,
        normalised: shannon / max_alphabet_entropy(),
    }
}

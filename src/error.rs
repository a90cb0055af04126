// error.rs - Error types for the variability statistics core

use thiserror::Error;

/// Failures raised while turning loci into variability records
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VariabilityError {
    /// Locus has no sequences at all
    #[error("Locus '{locus}' has no sequences")]
    EmptyLocus { locus: String },

    /// Residue outside the accepted alphabet (strict alphabet checking only)
    #[error("Locus '{locus}', sequence '{sequence}': residue '{residue}' at position {position} is not an accepted amino acid")]
    MalformedResidue {
        locus: String,
        sequence: String,
        position: usize,
        residue: char,
    },

    /// Same locus name supplied twice to one corpus
    #[error("Locus '{locus}' appears more than once in the corpus")]
    DuplicateLocus { locus: String },
}

/// Result alias for the statistics core
pub type Result<T> = std::result::Result<T, VariabilityError>;

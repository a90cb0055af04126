// lib.rs - locus-variability library root

//! # locus-variability - Per-position amino-acid variability for aligned allele loci
//!
//! This library turns aligned protein sequences of a locus (e.g. an HLA allele
//! family) into per-position statistics: residue counts in first-seen order,
//! two-decimal percentages, Shannon entropy normalised by the 20-letter
//! amino-acid alphabet, and a rarity tier for every residue.
//!
//! ## Features
//!
//! - **Deterministic**: identical input gives byte-identical JSON, label order included
//! - **Gap aware**: gaps consume a position but are never counted
//! - **Parallel**: loci are independent and processed with rayon
//! - **Multiple inputs**: aligned FASTA or JSON arrays, one file per locus
//!
//! ## Basic Usage
//!
//! ```rust
//! use locus_variability::prelude::*;
//!
//! let locus = Locus::from_strings("HLA-A", ["A", "A", "C"]);
//! let variability = VariabilityBuilder::default().build_locus_variability(&locus)?;
//!
//! let position = variability.get(1).unwrap();
//! assert_eq!(position.labels(), vec!["A", "C"]);
//! assert_eq!(position.percentages(), vec![66.67, 33.33]);
//! assert_eq!(classify_rarity(96.0, 50), RarityTier::HighlyConserved);
//! # Ok::<(), locus_variability::VariabilityError>(())
//! ```

// Re-export all main modules
pub mod cli;
pub mod core;
pub mod data;
pub mod error;
pub mod output;

// Convenience prelude for common imports
pub mod prelude {
    pub use crate::cli::{validate_args, Args, ValidationResult};
    pub use crate::core::{classify_rarity, ingest_alignment, shannon_entropy};
    pub use crate::core::{IngestOptions, PositionCounts, RarityTier};
    pub use crate::core::{LocusVariability, PositionStatistics, VariabilityBuilder, VariabilityCorpus};
    pub use crate::data::{load_loci, AlignedSequence, InputFormat, Locus, LocusSelection};
    pub use crate::error::VariabilityError;
    pub use crate::output::{write_corpus, write_entropy_table, write_locus_variability};
}

// Re-export main types at the root level for convenience
pub use cli::{Args, ValidationResult};
pub use core::{LocusVariability, PositionStatistics, RarityTier, VariabilityBuilder, VariabilityCorpus};
pub use data::{AlignedSequence, Locus};
pub use error::VariabilityError;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library information
pub fn get_info() -> String {
    format!(
        "locus-variability v{} - Per-position variability and entropy for aligned loci",
        VERSION
    )
}

// mod.rs - Variability statistics core

pub mod entropy;
pub mod frequency;
pub mod ingest;
pub mod rarity;
pub mod variability;

// Re-export main types for convenience
pub use entropy::{max_alphabet_entropy, shannon_entropy, EntropyScores, AMINO_ACID_ALPHABET_SIZE};
pub use frequency::{aggregate_frequencies, round_percentage, ResidueShare};
pub use ingest::{ingest_alignment, IngestOptions, PositionCounts};
pub use rarity::{classify_rarity, RarityTier, RARITY_THRESHOLDS};
pub use variability::{
    build_position_statistics, LocusSummary, LocusVariability, PositionStatistics,
    ResidueFrequency, VariabilityBuilder, VariabilityCorpus,
};

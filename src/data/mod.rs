// mod.rs - Data structures module

pub mod alignment;
pub mod loaders;
pub mod selection;

// Re-export main types for convenience
pub use alignment::{AlignedSequence, Locus, ACCEPTED_RESIDUES, DEFAULT_GAP_CHAR};
pub use loaders::{load_loci, InputFormat};
pub use selection::LocusSelection;

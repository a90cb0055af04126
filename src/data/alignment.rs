// alignment.rs - Aligned sequences grouped by locus

use crate::error::{Result, VariabilityError};

/// Standard amino acids plus the unknown residue `X` and the stop marker `*`
pub const ACCEPTED_RESIDUES: &str = "ACDEFGHIKLMNPQRSTVWYX*";

/// Default gap marker used by aligned allele sequences
pub const DEFAULT_GAP_CHAR: char = '-';

/// A single aligned protein sequence
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedSequence {
    pub id: String,
    pub residues: String,
}

impl AlignedSequence {
    pub fn new(id: impl Into<String>, residues: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            residues: residues.into(),
        }
    }

    /// Number of alignment columns covered by this sequence (gaps included)
    pub fn aligned_length(&self) -> usize {
        self.residues.chars().filter(|c| !c.is_whitespace()).count()
    }
}

/// Named collection of aligned sequences, analysed as one unit
#[derive(Debug, Clone, PartialEq)]
pub struct Locus {
    pub name: String,
    pub sequences: Vec<AlignedSequence>,
}

impl Locus {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sequences: Vec::new(),
        }
    }

    /// Build a locus from bare residue strings, numbering them in input order
    pub fn from_strings<I, S>(name: impl Into<String>, sequences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut locus = Self::new(name);
        for (index, residues) in sequences.into_iter().enumerate() {
            locus.add_sequence(AlignedSequence::new(format!("seq{}", index + 1), residues));
        }
        locus
    }

    pub fn add_sequence(&mut self, sequence: AlignedSequence) {
        self.sequences.push(sequence);
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Residue strings in input order
    pub fn residue_strings(&self) -> impl Iterator<Item = &str> {
        self.sequences.iter().map(|s| s.residues.as_str())
    }

    /// Shortest and longest aligned length, or None for an empty locus
    pub fn length_range(&self) -> Option<(usize, usize)> {
        let lengths = self.sequences.iter().map(AlignedSequence::aligned_length);
        let min = lengths.clone().min()?;
        let max = lengths.max()?;
        Some((min, max))
    }

    /// True when every sequence covers the same number of columns
    pub fn has_uniform_length(&self) -> bool {
        match self.length_range() {
            Some((min, max)) => min == max,
            None => true,
        }
    }

    /// Reject residues outside `ACCEPTED_RESIDUES`. Case is significant, so
    /// lowercase residues are rejected rather than counted as a second category.
    pub fn validate_alphabet(&self, gap_char: char) -> Result<()> {
        for sequence in &self.sequences {
            let columns = sequence.residues.chars().filter(|c| !c.is_whitespace());
            for (offset, residue) in columns.enumerate() {
                if residue == gap_char {
                    continue;
                }
                if !ACCEPTED_RESIDUES.contains(residue) {
                    return Err(VariabilityError::MalformedResidue {
                        locus: self.name.clone(),
                        sequence: sequence.id.clone(),
                        position: offset + 1,
                        residue,
                    });
                }
            }
        }
        Ok(())
    }
}

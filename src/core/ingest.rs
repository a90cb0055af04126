// ingest.rs - Alignment ingestion into per-position residue counts

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;

use crate::data::alignment::DEFAULT_GAP_CHAR;

/// Residue counts at one alignment position, kept in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionCounts {
    entries: Vec<(char, usize)>,
}

impl PositionCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more occurrence of `residue`, appending it when first seen
    pub fn increment(&mut self, residue: char) {
        match self.entries.iter_mut().find(|(r, _)| *r == residue) {
            Some((_, count)) => *count += 1,
            None => self.entries.push((residue, 1)),
        }
    }

    pub fn get(&self, residue: char) -> Option<usize> {
        self.entries
            .iter()
            .find(|(r, _)| *r == residue)
            .map(|(_, count)| *count)
    }

    /// Total residues observed (gaps are never counted)
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// Number of distinct residues
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, usize)> + '_ {
        self.entries.iter().copied()
    }

    /// Raw counts in first-seen order
    pub fn values(&self) -> Vec<usize> {
        self.entries.iter().map(|(_, count)| *count).collect()
    }
}

impl FromIterator<(char, usize)> for PositionCounts {
    fn from_iter<I: IntoIterator<Item = (char, usize)>>(iter: I) -> Self {
        let mut counts = PositionCounts::new();
        for (residue, count) in iter {
            match counts.entries.iter_mut().find(|(r, _)| *r == residue) {
                Some((_, existing)) => *existing += count,
                None => counts.entries.push((residue, count)),
            }
        }
        counts
    }
}

// Serialized as a JSON object whose keys follow first-seen order
impl Serialize for PositionCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (residue, count) in &self.entries {
            map.serialize_entry(&residue.to_string(), count)?;
        }
        map.end()
    }
}

/// Options controlling how aligned strings are scanned
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IngestOptions {
    pub gap_char: char,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            gap_char: DEFAULT_GAP_CHAR,
        }
    }
}

/// Scan aligned sequences into `position -> counts`.
///
/// Positions are 1-based. Every character advances the position, gaps included,
/// but only non-gap characters are counted, so an all-gap column still gets an
/// (empty) entry. Sequences shorter than others simply stop contributing.
pub fn ingest_alignment<I, S>(sequences: I, options: IngestOptions) -> BTreeMap<usize, PositionCounts>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut positions: BTreeMap<usize, PositionCounts> = BTreeMap::new();

    for sequence in sequences {
        let columns = sequence.as_ref().chars().filter(|c| !c.is_whitespace());
        for (offset, residue) in columns.enumerate() {
            let counts = positions.entry(offset + 1).or_default();
            if residue != options.gap_char {
                counts.increment(residue);
            }
        }
    }

    positions
}

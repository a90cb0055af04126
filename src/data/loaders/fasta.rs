// fasta.rs - Aligned FASTA loader

use bio::io::fasta;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::data::{AlignedSequence, Locus};

impl Locus {
    /// Load every record of an aligned FASTA file into one locus
    pub fn from_fasta(fasta_path: &Path, locus_name: &str) -> Result<Self, String> {
        let file = File::open(fasta_path)
            .map_err(|e| format!("Failed to open FASTA file {}: {}", fasta_path.display(), e))?;

        let reader = fasta::Reader::new(BufReader::new(file));
        let mut locus = Locus::new(locus_name);

        for record_result in reader.records() {
            let record = record_result
                .map_err(|e| format!("Invalid FASTA record in {}: {}", fasta_path.display(), e))?;

            let residues = String::from_utf8(record.seq().to_vec()).map_err(|_| {
                format!(
                    "Sequence '{}' in {} is not valid UTF-8",
                    record.id(),
                    fasta_path.display()
                )
            })?;

            locus.add_sequence(AlignedSequence::new(record.id(), residues));
        }

        Ok(locus)
    }
}

// json.rs - JSON loader for per-locus sequence arrays

use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::data::{AlignedSequence, Locus};

/// A JSON entry: either a bare aligned string or a named record
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonSequence {
    Plain(String),
    Named { id: String, sequence: String },
}

impl Locus {
    /// Load a JSON array of aligned sequences (strings or `{"id", "sequence"}` objects)
    pub fn from_json(json_path: &Path, locus_name: &str) -> Result<Self, String> {
        let file = File::open(json_path)
            .map_err(|e| format!("Failed to open JSON file {}: {}", json_path.display(), e))?;

        let entries: Vec<JsonSequence> = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| format!("Invalid sequence array in {}: {}", json_path.display(), e))?;

        let mut locus = Locus::new(locus_name);
        for (index, entry) in entries.into_iter().enumerate() {
            let sequence = match entry {
                JsonSequence::Plain(residues) => {
                    AlignedSequence::new(format!("seq{}", index + 1), residues)
                }
                JsonSequence::Named { id, sequence } => AlignedSequence::new(id, sequence),
            };
            locus.add_sequence(sequence);
        }

        Ok(locus)
    }
}

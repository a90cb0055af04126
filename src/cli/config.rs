// config.rs - Configuration file support

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    // Input/Output
    pub input: Option<String>,
    pub format: Option<String>,
    pub output: Option<String>,
    pub corpus_name: Option<String>,

    // Locus selection
    pub loci: Option<Vec<String>>,
    pub include_loci: Option<String>,
    pub exclude_loci: Option<String>,
    pub include_loci_list: Option<String>,
    pub exclude_loci_list: Option<String>,

    // Alignment
    pub gap_char: Option<String>,
    pub strict_alphabet: Option<bool>,

    // Reporting
    pub report_positions: Option<Vec<usize>>,
    pub entropy_table: Option<String>,

    // Performance
    pub threads: Option<usize>,

    // Flags
    pub dry_run: Option<bool>,
}

impl Config {
    /// Create a new empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| format!("Failed to parse config file '{}': {}", path.display(), e))?;

        println!("📄 Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), String> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        fs::write(path, content)
            .map_err(|e| format!("Failed to write config file '{}': {}", path.display(), e))?;

        println!("📄 Saved configuration to: {}", path.display());
        Ok(())
    }

    /// Generate a sample configuration file with comments
    pub fn generate_sample() -> String {
        r#"# locusvar.toml - Configuration file for locusvar
# Command line arguments will override these settings

# =============================================================================
# INPUT/OUTPUT
# =============================================================================

# Aligned sequences: a FASTA/JSON file (one locus) or a directory with one file per locus
input = "/path/to/loci"

# Input format: fasta, json, auto
format = "auto"

# Output root; results go to <output>/polymorphisms/
output = "output"

# Name of the combined corpus file (written as <output>/polymorphisms/<name>.json)
corpus_name = "hla_loci"

# =============================================================================
# LOCUS SELECTION
# =============================================================================

# Process only these loci, in this order
# loci = ["HLA-A", "HLA-B", "HLA-C"]

# Include only loci matching regex pattern
# include_loci = "^HLA-"

# Exclude loci matching regex pattern
# exclude_loci = "DRB"

# Include only loci listed in a file (one locus per line)
# include_loci_list = "class_i.txt"

# Exclude loci listed in a file (one locus per line)
# exclude_loci_list = "blacklist.txt"

# =============================================================================
# ALIGNMENT
# =============================================================================

# Gap character used in the alignment
gap_char = "-"

# Reject residues outside the 20 amino acids, X and *
strict_alphabet = false

# =============================================================================
# REPORTING
# =============================================================================

# Print {percentage: rarity} pairs and normalised entropy for these positions
# report_positions = [3, 24, 45, 67, 68, 71, 7, 9, 11]

# Tab-delimited per-position entropy table
# entropy_table = "entropy.tsv"

# =============================================================================
# PERFORMANCE
# =============================================================================

# Number of threads (omit for auto-detection)
# threads = 8

# =============================================================================
# FLAGS
# =============================================================================

# Validate inputs without computation (dry run)
dry_run = false
"#
        .to_string()
    }
}

// merge.rs - Merge configuration file with CLI arguments

use crate::cli::{Args, Config};

impl Args {
    /// Merge with configuration from file
    /// CLI arguments take precedence over config file values
    pub fn merge_with_config(mut self, config: Config) -> Self {
        // Input/Output
        if self.input.is_none() {
            self.input = config.input;
        }

        // Core settings (only override defaults, not explicit CLI values)
        if let Some(format) = config.format.filter(|_| self.format == "auto") {
            self.format = format;
        }
        if let Some(output) = config.output.filter(|_| self.output == "output") {
            self.output = output;
        }
        if let Some(name) = config.corpus_name.filter(|_| self.corpus_name == "hla_loci") {
            self.corpus_name = name;
        }
        if let Some(gap_char) = config.gap_char.filter(|_| self.gap_char == "-") {
            self.gap_char = gap_char;
        }

        // Locus selection
        if self.loci.is_none() {
            self.loci = config.loci.map(|loci| loci.join(","));
        }
        if self.include_loci.is_none() {
            self.include_loci = config.include_loci;
        }
        if self.exclude_loci.is_none() {
            self.exclude_loci = config.exclude_loci;
        }
        if self.include_loci_list.is_none() {
            self.include_loci_list = config.include_loci_list;
        }
        if self.exclude_loci_list.is_none() {
            self.exclude_loci_list = config.exclude_loci_list;
        }

        // Reporting
        if self.report_positions.is_none() {
            self.report_positions = config.report_positions.map(|positions| {
                positions
                    .iter()
                    .map(|p| p.to_string())
                    .collect::<Vec<_>>()
                    .join(",")
            });
        }
        if self.entropy_table.is_none() {
            self.entropy_table = config.entropy_table;
        }

        // Performance
        if self.threads.is_none() {
            self.threads = config.threads;
        }

        // Flags (CLI flags take precedence, config only sets if not explicitly set)
        if !self.strict_alphabet && config.strict_alphabet.unwrap_or(false) {
            self.strict_alphabet = true;
        }
        if !self.dry_run && config.dry_run.unwrap_or(false) {
            self.dry_run = true;
        }

        self
    }

    /// Load configuration and merge with CLI args
    pub fn with_config_file(self, config_path: &str) -> Result<Self, String> {
        let config = Config::from_file(config_path)?;
        Ok(self.merge_with_config(config))
    }
}

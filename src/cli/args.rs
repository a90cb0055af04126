// args.rs - Command line arguments definition

use argh::FromArgs;

#[derive(FromArgs)]
/// locusvar - Per-position amino-acid variability and entropy for aligned loci
pub struct Args {
    /// aligned sequence input: a FASTA/JSON file (one locus) or a directory of them
    #[argh(option)]
    pub input: Option<String>,

    /// input format: fasta, json, auto (default: auto, from file extension)
    #[argh(option, default = "String::from(\"auto\")")]
    pub format: String,

    /// output root directory (default: output)
    #[argh(option, default = "String::from(\"output\")")]
    pub output: String,

    /// name of the combined corpus file, without extension (default: hla_loci)
    #[argh(option, default = "String::from(\"hla_loci\")")]
    pub corpus_name: String,

    /// comma-separated loci to process, in output order
    #[argh(option)]
    pub loci: Option<String>,

    /// include only loci matching regex pattern
    #[argh(option)]
    pub include_loci: Option<String>,

    /// exclude loci matching regex pattern
    #[argh(option)]
    pub exclude_loci: Option<String>,

    /// include only loci listed in a file (one locus per line)
    #[argh(option)]
    pub include_loci_list: Option<String>,

    /// exclude loci listed in a file (one locus per line)
    #[argh(option)]
    pub exclude_loci_list: Option<String>,

    /// alignment gap character (default: -)
    #[argh(option, default = "String::from(\"-\")")]
    pub gap_char: String,

    /// reject residues outside the 20 amino acids, X and *
    #[argh(switch)]
    pub strict_alphabet: bool,

    /// comma-separated positions to print a rarity/entropy report for
    #[argh(option)]
    pub report_positions: Option<String>,

    /// write a tab-delimited per-position entropy table to this file
    #[argh(option)]
    pub entropy_table: Option<String>,

    /// number of threads (default: auto-detect)
    #[argh(option)]
    pub threads: Option<usize>,

    /// validate inputs without computation (dry run)
    #[argh(switch)]
    pub dry_run: bool,

    /// path to TOML configuration file
    #[argh(option)]
    pub config: Option<String>,

    /// generate sample configuration file and exit
    #[argh(switch)]
    pub generate_config: bool,
}

// validation.rs - Input validation utilities

use regex::Regex;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::str::FromStr;

use crate::cli::args::Args;
use crate::core::IngestOptions;
use crate::data::{InputFormat, LocusSelection};

pub struct ValidationResult {
    pub input_format: InputFormat,
    pub ingest: IngestOptions,
    pub selection: LocusSelection,
    pub report_positions: Vec<usize>,
}

/// Validate all command line arguments
pub fn validate_args(args: &Args) -> Result<ValidationResult, String> {
    let input_format = InputFormat::from_str(&args.format)?;

    // Gap marker must be exactly one character
    let mut gap_chars = args.gap_char.chars();
    let gap_char = match (gap_chars.next(), gap_chars.next()) {
        (Some(c), None) if !c.is_whitespace() => c,
        _ => {
            return Err(format!(
                "Gap character must be a single non-whitespace character, got '{}'",
                args.gap_char
            ))
        }
    };

    if args.corpus_name.trim().is_empty() {
        return Err("Corpus name must not be empty".to_string());
    }

    if args.threads == Some(0) {
        return Err("Thread count must be at least 1".to_string());
    }

    let report_positions = match &args.report_positions {
        Some(list) => parse_positions(list)?,
        None => Vec::new(),
    };

    // Explicit locus list
    let ordered = args.loci.as_ref().map(|list| {
        list.split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(String::from)
            .collect::<Vec<_>>()
    });
    if let Some(names) = &ordered {
        if names.is_empty() {
            return Err("--loci must name at least one locus".to_string());
        }
        let unique: HashSet<&String> = names.iter().collect();
        if unique.len() != names.len() {
            return Err("--loci lists the same locus more than once".to_string());
        }
    }

    // Compile regex patterns
    let include_regex = if let Some(pattern) = &args.include_loci {
        Some(Regex::new(pattern).map_err(|e| format!("Invalid include_loci regex: {}", e))?)
    } else {
        None
    };

    let exclude_regex = if let Some(pattern) = &args.exclude_loci {
        Some(Regex::new(pattern).map_err(|e| format!("Invalid exclude_loci regex: {}", e))?)
    } else {
        None
    };

    // Load filter sets from files
    let include_set = if let Some(file_path) = &args.include_loci_list {
        Some(load_set_from_file(file_path)?)
    } else {
        None
    };

    let exclude_set = if let Some(file_path) = &args.exclude_loci_list {
        Some(load_set_from_file(file_path)?)
    } else {
        None
    };

    Ok(ValidationResult {
        input_format,
        ingest: IngestOptions { gap_char },
        selection: LocusSelection {
            ordered,
            include_regex,
            exclude_regex,
            include_set,
            exclude_set,
        },
        report_positions,
    })
}

/// Parse a comma-separated list of 1-based positions
fn parse_positions(list: &str) -> Result<Vec<usize>, String> {
    list.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| match item.parse::<usize>() {
            Ok(position) if position >= 1 => Ok(position),
            _ => Err(format!("Invalid position '{}': positions are integers starting at 1", item)),
        })
        .collect()
}

/// Load a set of strings from a file (one per line)
fn load_set_from_file(file_path: &str) -> Result<HashSet<String>, String> {
    let file = File::open(file_path)
        .map_err(|e| format!("Failed to open filter file '{}': {}", file_path, e))?;

    let reader = BufReader::new(file);
    let mut set = HashSet::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| format!("Failed to read line {} from '{}': {}",
                                           line_num + 1, file_path, e))?;
        let trimmed = line.trim();
        if !trimmed.is_empty() && !trimmed.starts_with('#') {
            set.insert(trimmed.to_string());
        }
    }

    println!("📋 Loaded {} items from filter file '{}'", set.len(), file_path);
    Ok(set)
}

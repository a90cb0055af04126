// mod.rs - Output writers for variability results

use serde::Serialize;
use std::collections::HashMap;
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::core::{LocusVariability, VariabilityCorpus};

/// Folders created under the output root before anything is written
pub const OUTPUT_FOLDERS: [&str; 2] = ["polymorphisms", "polymorphisms/loci"];

/// File-name friendly form of a locus name (`HLA-A` -> `hla_a`)
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_separator = false;

    for c in name.chars() {
        if c.is_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('_');
            }
            pending_separator = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_separator = true;
        }
    }

    slug
}

/// Ensure parent directory exists before creating file
fn ensure_parent_dir(file_path: &Path) -> Result<(), String> {
    if let Some(parent) = file_path.parent() {
        create_dir_all(parent)
            .map_err(|e| format!("Failed to create parent directory '{}': {}", parent.display(), e))?;
    }
    Ok(())
}

/// Create the output folder structure, returning how many folders were ensured
pub fn create_folder_structure(output_root: &Path) -> Result<usize, String> {
    let mut created = 0;
    for folder in OUTPUT_FOLDERS {
        let path = output_root.join(folder);
        create_dir_all(&path)
            .map_err(|e| format!("Failed to create folder '{}': {}", path.display(), e))?;
        created += 1;
    }
    Ok(created)
}

/// Path of the per-locus variability file
pub fn locus_output_path(output_root: &Path, locus: &str) -> PathBuf {
    output_root
        .join("polymorphisms/loci")
        .join(format!("{}_variability.json", slugify(locus)))
}

/// Fail when two loci would share one per-locus output file
pub fn check_locus_output_paths(output_root: &Path, corpus: &VariabilityCorpus) -> Result<(), String> {
    let mut claimed: HashMap<PathBuf, &str> = HashMap::new();
    for locus in corpus.locus_names() {
        let path = locus_output_path(output_root, locus);
        if let Some(previous) = claimed.get(&path) {
            return Err(format!(
                "Loci '{}' and '{}' map to the same output file '{}'",
                previous,
                locus,
                path.display()
            ));
        }
        claimed.insert(path, locus);
    }
    Ok(())
}

/// Path of the corpus file holding every locus
pub fn corpus_output_path(output_root: &Path, corpus_name: &str) -> PathBuf {
    output_root
        .join("polymorphisms")
        .join(format!("{}.json", corpus_name))
}

/// Write any serializable value as pretty JSON
pub fn write_json<T: Serialize + ?Sized>(file_path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(file_path)?;
    let file = File::create(file_path)
        .map_err(|e| format!("Failed to create output file '{}': {}", file_path.display(), e))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, value)
        .map_err(|e| format!("Failed to serialize '{}': {}", file_path.display(), e))?;
    writeln!(writer).map_err(|e| format!("Write error: {}", e))?;

    writer.flush().map_err(|e| format!("Flush error: {}", e))?;
    Ok(())
}

/// Write one locus to `polymorphisms/loci/{slug}_variability.json`
pub fn write_locus_variability(
    output_root: &Path,
    locus: &str,
    variability: &LocusVariability,
) -> Result<PathBuf, String> {
    let path = locus_output_path(output_root, locus);
    write_json(&path, variability)?;
    Ok(path)
}

/// Write every locus to `polymorphisms/{corpus_name}.json`
pub fn write_corpus(
    output_root: &Path,
    corpus_name: &str,
    corpus: &VariabilityCorpus,
) -> Result<PathBuf, String> {
    let path = corpus_output_path(output_root, corpus_name);
    write_json(&path, corpus)?;
    println!("✅ Corpus written to: {} ({} loci)", path.display(), corpus.len());
    Ok(path)
}

/// Write a tab-delimited per-position entropy table for the whole corpus
pub fn write_entropy_table(
    file_path: &Path,
    corpus: &VariabilityCorpus,
    command_line: &str,
) -> Result<usize, String> {
    ensure_parent_dir(file_path)?;
    let file = File::create(file_path)
        .map_err(|e| format!("Failed to create output file '{}': {}", file_path.display(), e))?;
    let mut writer = BufWriter::new(file);

    // Write command header
    writeln!(writer, "# Command: {}", command_line).map_err(|e| format!("Write error: {}", e))?;
    writeln!(writer, "# Generated: {}", chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC"))
        .map_err(|e| format!("Write error: {}", e))?;
    writeln!(writer, "# locus-variability v{}", env!("CARGO_PKG_VERSION"))
        .map_err(|e| format!("Write error: {}", e))?;

    let mut table = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_writer(writer);

    table
        .write_record([
            "locus",
            "position",
            "residues_counted",
            "distinct_residues",
            "consensus",
            "consensus_percentage",
            "shannon_entropy",
            "normalised_shannon_entropy",
        ])
        .map_err(|e| format!("Write error: {}", e))?;

    let mut rows = 0;
    for (locus, variability) in corpus.iter() {
        for (position, stats) in variability.iter() {
            let (consensus, consensus_percentage) = match stats.consensus() {
                Some(residue) => (residue.residue.to_string(), residue.percentage.to_string()),
                None => ("-".to_string(), "NA".to_string()),
            };
            table
                .write_record([
                    locus.to_string(),
                    position.to_string(),
                    stats.total().to_string(),
                    stats.residues().len().to_string(),
                    consensus,
                    consensus_percentage,
                    stats.shannon_entropy().to_string(),
                    stats.normalised_shannon_entropy().to_string(),
                ])
                .map_err(|e| format!("Write error: {}", e))?;
            rows += 1;
        }
    }

    table.flush().map_err(|e| format!("Flush error: {}", e))?;
    println!("✅ Entropy table written to: {} ({} positions)", file_path.display(), rows);
    Ok(rows)
}

/// Print `{percentage: rarity}` pairs and normalised entropy for selected positions
pub fn print_position_report(locus: &str, variability: &LocusVariability, positions: &[usize]) {
    println!("🔎 Position report for {}", locus);
    for &position in positions {
        println!("Position {}", position);
        match variability.get(position) {
            Some(stats) => {
                let pairs: Vec<String> = stats
                    .residues()
                    .iter()
                    .map(|r| format!("{} {}: {}", r.residue, r.percentage, r.rarity))
                    .collect();
                println!("  {{{}}}", pairs.join(", "));
                println!("  {}", stats.normalised_shannon_entropy());
            }
            None => println!("  ⚠️  Position {} is beyond the alignment ({} positions)", position, variability.len()),
        }
        println!();
    }
}

// mod.rs - Sequence loaders for aligned loci

pub mod fasta;
pub mod json;

use std::path::Path;
use std::str::FromStr;

use crate::data::Locus;

const FASTA_EXTENSIONS: [&str; 4] = ["fasta", "fa", "fas", "faa"];
const JSON_EXTENSIONS: [&str; 1] = ["json"];

/// Format of the aligned sequence input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Fasta,
    Json,
    /// Decide per file from its extension
    Auto,
}

impl FromStr for InputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fasta" | "fa" => Ok(InputFormat::Fasta),
            "json" => Ok(InputFormat::Json),
            "auto" => Ok(InputFormat::Auto),
            _ => Err(format!("Invalid input format: {}. Use: fasta, json, auto", s)),
        }
    }
}

impl InputFormat {
    pub fn description(&self) -> &str {
        match self {
            InputFormat::Fasta => "aligned FASTA",
            InputFormat::Json => "JSON array of aligned sequences",
            InputFormat::Auto => "detected from file extension",
        }
    }

    /// Format of a single file, or None when it is not a sequence file for this format
    fn resolve(&self, path: &Path) -> Option<InputFormat> {
        let extension = path.extension()?.to_string_lossy().to_lowercase();
        let is_fasta = FASTA_EXTENSIONS.contains(&extension.as_str());
        let is_json = JSON_EXTENSIONS.contains(&extension.as_str());
        match self {
            InputFormat::Fasta if is_fasta => Some(InputFormat::Fasta),
            InputFormat::Json if is_json => Some(InputFormat::Json),
            InputFormat::Auto if is_fasta => Some(InputFormat::Fasta),
            InputFormat::Auto if is_json => Some(InputFormat::Json),
            _ => None,
        }
    }
}

/// Locus name for a sequence file (its file stem)
fn locus_name_for(path: &Path) -> Result<String, String> {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .ok_or_else(|| format!("Cannot derive a locus name from '{}'", path.display()))
}

fn load_file(path: &Path, format: InputFormat) -> Result<Locus, String> {
    let name = locus_name_for(path)?;
    match format {
        InputFormat::Json => Locus::from_json(path, &name),
        _ => Locus::from_fasta(path, &name),
    }
}

/// Load loci from a single file (one locus) or a directory (one locus per file).
///
/// Directory entries are read in file-name order so repeated runs see the same loci order.
pub fn load_loci(input: &Path, format: InputFormat) -> Result<Vec<Locus>, String> {
    if input.is_file() {
        let file_format = match format {
            InputFormat::Auto => format.resolve(input).ok_or_else(|| {
                format!(
                    "Cannot detect input format of '{}' (expected .fasta, .fa, .fas, .faa or .json)",
                    input.display()
                )
            })?,
            explicit => explicit,
        };
        println!("🧬 Loading {} from file: {}", file_format.description(), input.display());
        return Ok(vec![load_file(input, file_format)?]);
    }

    if !input.is_dir() {
        return Err(format!("Input path does not exist: {}", input.display()));
    }

    println!("🧬 Loading loci from directory: {}", input.display());
    let entries = std::fs::read_dir(input)
        .map_err(|e| format!("Failed to read input directory '{}': {}", input.display(), e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| format!("Failed to read directory entry: {}", e))?;
        let path = entry.path();
        if path.is_file() {
            if let Some(file_format) = format.resolve(&path) {
                files.push((path, file_format));
            }
        }
    }
    files.sort_by(|a, b| a.0.cmp(&b.0));

    if files.is_empty() {
        return Err(format!(
            "No sequence files ({}) found in '{}'",
            format.description(),
            input.display()
        ));
    }

    let mut loci = Vec::with_capacity(files.len());
    for (path, file_format) in files {
        let locus = load_file(&path, file_format)?;
        println!("  📄 {}: {} sequences loaded", locus.name, locus.len());
        loci.push(locus);
    }

    Ok(loci)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_input_format_parsing() {
        assert_eq!("FASTA".parse::<InputFormat>().unwrap(), InputFormat::Fasta);
        assert_eq!("json".parse::<InputFormat>().unwrap(), InputFormat::Json);
        assert_eq!("auto".parse::<InputFormat>().unwrap(), InputFormat::Auto);
        assert!("xml".parse::<InputFormat>().is_err());
    }

    #[test]
    fn test_resolve_by_extension() {
        assert_eq!(InputFormat::Auto.resolve(Path::new("a/HLA-A.fas")), Some(InputFormat::Fasta));
        assert_eq!(InputFormat::Auto.resolve(Path::new("HLA-A.JSON")), Some(InputFormat::Json));
        assert_eq!(InputFormat::Fasta.resolve(Path::new("HLA-A.json")), None);
        assert_eq!(InputFormat::Auto.resolve(Path::new("README")), None);
    }

    #[test]
    fn test_load_directory_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("HLA-B.fasta"), ">B*07:02\nMLVMAPRTV\n>B*08:01\nMLVMAPRTV\n").unwrap();
        fs::write(dir.path().join("HLA-A.json"), r#"["GSHSMRYF", "GSHSMRYF", "GSHSM-YF"]"#).unwrap();
        fs::write(dir.path().join("notes.txt"), "not a locus").unwrap();

        let loci = load_loci(dir.path(), InputFormat::Auto).unwrap();
        assert_eq!(loci.len(), 2);
        assert_eq!(loci[0].name, "HLA-A");
        assert_eq!(loci[0].len(), 3);
        assert_eq!(loci[1].name, "HLA-B");
        assert_eq!(loci[1].sequences[0].id, "B*07:02");

        let fasta_only = load_loci(dir.path(), InputFormat::Fasta).unwrap();
        assert_eq!(fasta_only.len(), 1);
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_loci(dir.path(), InputFormat::Auto).is_err());
        assert!(load_loci(&dir.path().join("missing.fasta"), InputFormat::Auto).is_err());

        let unknown = dir.path().join("HLA-A.txt");
        fs::write(&unknown, "ACDE").unwrap();
        assert!(load_loci(&unknown, InputFormat::Auto).is_err());
    }
}

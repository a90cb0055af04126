// selection.rs - Locus selection and ordering

use regex::Regex;
use std::collections::HashSet;

use crate::data::Locus;

/// Which loci to process, and in which order
#[derive(Debug, Default)]
pub struct LocusSelection {
    /// Explicit locus list; when set, output follows this order and every name must exist
    pub ordered: Option<Vec<String>>,
    pub include_regex: Option<Regex>,
    pub exclude_regex: Option<Regex>,
    pub include_set: Option<HashSet<String>>,
    pub exclude_set: Option<HashSet<String>>,
}

impl LocusSelection {
    pub fn is_active(&self) -> bool {
        self.ordered.is_some()
            || self.include_regex.is_some()
            || self.exclude_regex.is_some()
            || self.include_set.is_some()
            || self.exclude_set.is_some()
    }

    fn keeps(&self, name: &str) -> bool {
        // Include regex filter
        if let Some(regex) = &self.include_regex {
            if !regex.is_match(name) {
                return false;
            }
        }

        // Exclude regex filter
        if let Some(regex) = &self.exclude_regex {
            if regex.is_match(name) {
                return false;
            }
        }

        // Include set filter
        if let Some(set) = &self.include_set {
            if !set.contains(name) {
                return false;
            }
        }

        // Exclude set filter
        if let Some(set) = &self.exclude_set {
            if set.contains(name) {
                return false;
            }
        }

        true
    }

    /// Filter (and with an explicit list, reorder) the loaded loci
    pub fn apply(&self, mut loci: Vec<Locus>) -> Result<Vec<Locus>, String> {
        if !self.is_active() {
            return Ok(loci);
        }

        let initial_loci = loci.len();
        loci.retain(|locus| self.keeps(&locus.name));

        if let Some(ordered) = &self.ordered {
            let mut picked = Vec::with_capacity(ordered.len());
            for name in ordered {
                let index = loci
                    .iter()
                    .position(|locus| &locus.name == name)
                    .ok_or_else(|| format!("Requested locus '{}' was not found in the input", name))?;
                picked.push(loci.swap_remove(index));
            }
            loci = picked;
        }

        if loci.len() != initial_loci {
            println!(
                "Locus filters: kept {} loci (removed {})",
                loci.len(),
                initial_loci - loci.len()
            );
        }

        if loci.is_empty() {
            return Err("No loci left after applying locus filters".to_string());
        }

        Ok(loci)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loci(names: &[&str]) -> Vec<Locus> {
        names.iter().map(|name| Locus::from_strings(*name, ["A"])).collect()
    }

    fn names(loci: &[Locus]) -> Vec<&str> {
        loci.iter().map(|l| l.name.as_str()).collect()
    }

    #[test]
    fn test_inactive_selection_keeps_everything() {
        let selection = LocusSelection::default();
        let kept = selection.apply(loci(&["HLA-A", "HLA-B"])).unwrap();
        assert_eq!(names(&kept), vec!["HLA-A", "HLA-B"]);
    }

    #[test]
    fn test_regex_and_set_filters() {
        let selection = LocusSelection {
            include_regex: Some(Regex::new("^HLA-").unwrap()),
            exclude_regex: Some(Regex::new("DRB").unwrap()),
            exclude_set: Some(["HLA-C".to_string()].into_iter().collect()),
            ..Default::default()
        };
        let kept = selection
            .apply(loci(&["HLA-A", "HLA-DRB1", "HLA-C", "MICA", "HLA-B"]))
            .unwrap();
        assert_eq!(names(&kept), vec!["HLA-A", "HLA-B"]);
    }

    #[test]
    fn test_explicit_order() {
        let selection = LocusSelection {
            ordered: Some(vec!["HLA-C".to_string(), "HLA-A".to_string()]),
            ..Default::default()
        };
        let kept = selection.apply(loci(&["HLA-A", "HLA-B", "HLA-C"])).unwrap();
        assert_eq!(names(&kept), vec!["HLA-C", "HLA-A"]);

        let missing = LocusSelection {
            ordered: Some(vec!["HLA-G".to_string()]),
            ..Default::default()
        };
        assert!(missing.apply(loci(&["HLA-A"])).is_err());
    }

    #[test]
    fn test_everything_filtered_out() {
        let selection = LocusSelection {
            include_set: Some(HashSet::new()),
            ..Default::default()
        };
        assert!(selection.apply(loci(&["HLA-A"])).is_err());
    }
}

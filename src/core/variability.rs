// variability.rs - Per-position variability records and locus/corpus folding

use indicatif::ProgressBar;
use rayon::prelude::*;
use serde::ser::{Serialize, SerializeMap, SerializeStruct, Serializer};
use std::collections::{BTreeMap, HashSet};

use super::entropy::{shannon_entropy, EntropyScores};
use super::frequency::aggregate_frequencies;
use super::ingest::{ingest_alignment, IngestOptions, PositionCounts};
use super::rarity::{classify_rarity, RarityTier};
use crate::data::Locus;
use crate::error::{Result, VariabilityError};

/// One observed residue at a position with its derived statistics
#[derive(Debug, Clone, PartialEq)]
pub struct ResidueFrequency {
    pub residue: char,
    pub count: usize,
    pub percentage: f64,
    pub rarity: RarityTier,
}

/// Statistics for one alignment position
#[derive(Debug, Clone, PartialEq)]
pub struct PositionStatistics {
    counts: PositionCounts,
    residues: Vec<ResidueFrequency>,
    entropy: EntropyScores,
}

impl PositionStatistics {
    /// Sentinel record for a column where every sequence has a gap
    pub fn empty() -> Self {
        Self {
            counts: PositionCounts::new(),
            residues: Vec::new(),
            entropy: EntropyScores::zero(),
        }
    }

    pub fn counts(&self) -> &PositionCounts {
        &self.counts
    }

    /// Residues in first-seen order
    pub fn residues(&self) -> &[ResidueFrequency] {
        &self.residues
    }

    pub fn labels(&self) -> Vec<String> {
        self.residues.iter().map(|r| r.residue.to_string()).collect()
    }

    pub fn values(&self) -> Vec<usize> {
        self.residues.iter().map(|r| r.count).collect()
    }

    pub fn percentages(&self) -> Vec<f64> {
        self.residues.iter().map(|r| r.percentage).collect()
    }

    pub fn rarities(&self) -> Vec<RarityTier> {
        self.residues.iter().map(|r| r.rarity).collect()
    }

    pub fn shannon_entropy(&self) -> f64 {
        self.entropy.shannon
    }

    pub fn normalised_shannon_entropy(&self) -> f64 {
        self.entropy.normalised
    }

    /// Number of non-gap residues counted at this position
    pub fn total(&self) -> usize {
        self.counts.total()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    /// Most frequent residue; ties go to the residue seen first
    pub fn consensus(&self) -> Option<&ResidueFrequency> {
        self.residues
            .iter()
            .fold(None, |best: Option<&ResidueFrequency>, r| match best {
                Some(b) if b.count >= r.count => Some(b),
                _ => Some(r),
            })
    }
}

impl Serialize for PositionStatistics {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("PositionStatistics", 7)?;
        state.serialize_field("variability", &self.counts)?;
        state.serialize_field("percentages", &self.percentages())?;
        state.serialize_field("values", &self.values())?;
        state.serialize_field("rarities", &self.rarities())?;
        state.serialize_field("labels", &self.labels())?;
        state.serialize_field("shannon_entropy", &self.entropy.shannon)?;
        state.serialize_field("normalised_shannon_entropy", &self.entropy.normalised)?;
        state.end()
    }
}

/// Derive the statistics record for one position from its raw counts
pub fn build_position_statistics(counts: PositionCounts) -> PositionStatistics {
    let shares = aggregate_frequencies(&counts);
    if shares.is_empty() {
        return PositionStatistics::empty();
    }

    let values: Vec<usize> = shares.iter().map(|s| s.count).collect();
    let entropy = shannon_entropy(&values);

    let residues = shares
        .into_iter()
        .map(|share| ResidueFrequency {
            rarity: classify_rarity(share.percentage, share.count),
            residue: share.residue,
            count: share.count,
            percentage: share.percentage,
        })
        .collect();

    PositionStatistics {
        counts,
        residues,
        entropy,
    }
}

/// Position-ordered statistics for one locus. Positions start at 1 and are contiguous.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct LocusVariability {
    positions: BTreeMap<usize, PositionStatistics>,
}

impl LocusVariability {
    pub fn get(&self, position: usize) -> Option<&PositionStatistics> {
        self.positions.get(&position)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &PositionStatistics)> {
        self.positions.iter().map(|(p, s)| (*p, s))
    }

    /// Positions where every sequence carries a gap
    pub fn empty_positions(&self) -> Vec<usize> {
        self.iter()
            .filter(|(_, stats)| stats.is_empty())
            .map(|(position, _)| position)
            .collect()
    }

    pub fn summary(&self) -> LocusSummary {
        let mut variable_positions = 0;
        let mut empty_positions = 0;
        let mut entropy_sum = 0.0;
        let mut most_variable: Option<(usize, f64)> = None;

        for (position, stats) in self.iter() {
            if stats.is_empty() {
                empty_positions += 1;
                continue;
            }
            if stats.residues().len() > 1 {
                variable_positions += 1;
            }
            let entropy = stats.normalised_shannon_entropy();
            entropy_sum += entropy;
            if most_variable.map_or(true, |(_, best)| entropy > best) {
                most_variable = Some((position, entropy));
            }
        }

        let scored = self.len() - empty_positions;
        LocusSummary {
            positions: self.len(),
            variable_positions,
            empty_positions,
            mean_normalised_entropy: if scored > 0 {
                entropy_sum / scored as f64
            } else {
                0.0
            },
            most_variable,
        }
    }
}

/// Headline numbers for one locus
#[derive(Debug, Clone, PartialEq)]
pub struct LocusSummary {
    pub positions: usize,
    pub variable_positions: usize,
    pub empty_positions: usize,
    pub mean_normalised_entropy: f64,
    /// Position with the highest normalised entropy and that entropy
    pub most_variable: Option<(usize, f64)>,
}

/// Variability for every locus, in the order loci were supplied
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariabilityCorpus {
    loci: Vec<(String, LocusVariability)>,
}

impl VariabilityCorpus {
    pub fn get(&self, locus: &str) -> Option<&LocusVariability> {
        self.loci
            .iter()
            .find(|(name, _)| name == locus)
            .map(|(_, variability)| variability)
    }

    pub fn len(&self) -> usize {
        self.loci.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loci.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LocusVariability)> {
        self.loci.iter().map(|(name, v)| (name.as_str(), v))
    }

    pub fn locus_names(&self) -> Vec<&str> {
        self.loci.iter().map(|(name, _)| name.as_str()).collect()
    }
}

impl Serialize for VariabilityCorpus {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.loci.len()))?;
        for (name, variability) in &self.loci {
            map.serialize_entry(name, variability)?;
        }
        map.end()
    }
}

/// Builds locus and corpus variability from aligned sequences
#[derive(Debug, Clone, Default)]
pub struct VariabilityBuilder {
    pub ingest: IngestOptions,
    /// Reject residues outside the accepted amino-acid alphabet
    pub strict_alphabet: bool,
}

impl VariabilityBuilder {
    pub fn new(ingest: IngestOptions, strict_alphabet: bool) -> Self {
        Self {
            ingest,
            strict_alphabet,
        }
    }

    /// Fold every position of one locus into its variability mapping
    pub fn build_locus_variability(&self, locus: &Locus) -> Result<LocusVariability> {
        if locus.is_empty() {
            return Err(VariabilityError::EmptyLocus {
                locus: locus.name.clone(),
            });
        }
        if self.strict_alphabet {
            locus.validate_alphabet(self.ingest.gap_char)?;
        }

        let positions = ingest_alignment(locus.residue_strings(), self.ingest)
            .into_iter()
            .map(|(position, counts)| (position, build_position_statistics(counts)))
            .collect();

        Ok(LocusVariability { positions })
    }

    pub fn build_corpus(&self, loci: &[Locus]) -> Result<VariabilityCorpus> {
        self.build_corpus_with_progress(loci, &ProgressBar::hidden())
    }

    /// Build every locus in parallel; the corpus keeps the input order
    pub fn build_corpus_with_progress(
        &self,
        loci: &[Locus],
        pb: &ProgressBar,
    ) -> Result<VariabilityCorpus> {
        let mut seen = HashSet::new();
        for locus in loci {
            if !seen.insert(locus.name.as_str()) {
                return Err(VariabilityError::DuplicateLocus {
                    locus: locus.name.clone(),
                });
            }
        }

        let loci = loci
            .par_iter()
            .map(|locus| {
                let variability = self.build_locus_variability(locus)?;
                pb.inc(1);
                Ok((locus.name.clone(), variability))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(VariabilityCorpus { loci })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entropy::max_alphabet_entropy;

    fn build(name: &str, sequences: &[&str]) -> LocusVariability {
        VariabilityBuilder::default()
            .build_locus_variability(&Locus::from_strings(name, sequences.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_worked_example() {
        let variability = build("HLA-A", &["A", "A", "C"]);
        let stats = variability.get(1).unwrap();

        assert_eq!(variability.len(), 1);
        assert_eq!(stats.counts().get('A'), Some(2));
        assert_eq!(stats.counts().get('C'), Some(1));
        assert_eq!(stats.total(), 3);
        assert_eq!(stats.labels(), vec!["A", "C"]);
        assert_eq!(stats.values(), vec![2, 1]);
        assert_eq!(stats.percentages(), vec![66.67, 33.33]);
        assert_eq!(stats.rarities(), vec![RarityTier::OnlyTwo, RarityTier::Unique]);
        assert!((stats.shannon_entropy() - 0.9183).abs() < 1e-4);
        assert!((stats.normalised_shannon_entropy() - 0.2125).abs() < 1e-4);
    }

    #[test]
    fn test_parallel_arrays_stay_aligned() {
        let mut sequences = vec!["GSHSMRYFYT"; 40];
        sequences.extend(vec!["GSHSMRYFFT"; 12]);
        sequences.extend(vec!["CSHSLRYFDT"; 7]);
        sequences.extend(vec!["GSH-MKYFHT"; 2]);
        let variability = build("HLA-A", &sequences);

        assert_eq!(variability.len(), 10);
        for (position, stats) in variability.iter() {
            let n = stats.labels().len();
            assert_eq!(stats.values().len(), n);
            assert_eq!(stats.percentages().len(), n);
            assert_eq!(stats.rarities().len(), n);

            let sum: f64 = stats.percentages().iter().sum();
            assert!((sum - 100.0).abs() <= 0.1, "position {} sums to {}", position, sum);

            let distinct = stats.residues().len() as f64;
            assert!(stats.shannon_entropy() >= 0.0);
            assert!(stats.shannon_entropy() <= distinct.log2() + 1e-12);
            assert_eq!(
                stats.normalised_shannon_entropy(),
                stats.shannon_entropy() / max_alphabet_entropy()
            );
        }

        let position_9 = variability.get(9).unwrap();
        assert_eq!(position_9.labels(), vec!["Y", "F", "D", "H"]);
        assert_eq!(position_9.values(), vec![40, 12, 7, 2]);
        assert_eq!(
            position_9.rarities(),
            vec![
                RarityTier::Majority,
                RarityTier::Often,
                RarityTier::Occasional,
                RarityTier::OnlyTwo
            ]
        );
    }

    #[test]
    fn test_gap_handling() {
        let variability = build("HLA-B", &["A-C", "AAC"]);
        assert_eq!(variability.get(1).unwrap().values(), vec![2]);
        assert_eq!(variability.get(2).unwrap().values(), vec![1]);
        assert_eq!(variability.get(2).unwrap().percentages(), vec![100.0]);
        assert_eq!(variability.get(3).unwrap().labels(), vec!["C"]);
    }

    #[test]
    fn test_all_gap_column_is_sentinel() {
        let variability = build("HLA-C", &["A-C", "A-D"]);
        let stats = variability.get(2).unwrap();

        assert!(stats.is_empty());
        assert_eq!(stats.total(), 0);
        assert_eq!(stats.shannon_entropy(), 0.0);
        assert_eq!(variability.empty_positions(), vec![2]);
        assert_eq!(variability.len(), 3);
    }

    #[test]
    fn test_empty_locus_is_rejected() {
        let err = VariabilityBuilder::default()
            .build_locus_variability(&Locus::new("HLA-DRB1"))
            .unwrap_err();
        assert_eq!(
            err,
            VariabilityError::EmptyLocus {
                locus: "HLA-DRB1".to_string()
            }
        );
    }

    #[test]
    fn test_strict_alphabet() {
        let locus = Locus::from_strings("HLA-A", ["GSH", "GS1"]);
        let lenient = VariabilityBuilder::default().build_locus_variability(&locus).unwrap();
        assert_eq!(lenient.get(3).unwrap().labels(), vec!["H", "1"]);

        let strict = VariabilityBuilder::new(IngestOptions::default(), true);
        assert!(matches!(
            strict.build_locus_variability(&locus),
            Err(VariabilityError::MalformedResidue { position: 3, residue: '1', .. })
        ));
    }

    #[test]
    fn test_consensus_and_summary() {
        let variability = build("HLA-A", &["AC-", "AD-", "CD-", "AE-"]);
        assert_eq!(variability.get(1).unwrap().consensus().unwrap().residue, 'A');
        assert_eq!(variability.get(2).unwrap().consensus().unwrap().residue, 'D');

        let summary = variability.summary();
        assert_eq!(summary.positions, 3);
        assert_eq!(summary.variable_positions, 2);
        assert_eq!(summary.empty_positions, 1);
        assert_eq!(summary.most_variable.map(|(p, _)| p), Some(2));
        assert!(summary.mean_normalised_entropy > 0.0);
    }

    #[test]
    fn test_corpus_keeps_input_order() {
        let loci = vec![
            Locus::from_strings("HLA-C", ["A"]),
            Locus::from_strings("HLA-A", ["C", "D"]),
            Locus::from_strings("HLA-B", ["E"]),
        ];
        let corpus = VariabilityBuilder::default().build_corpus(&loci).unwrap();

        assert_eq!(corpus.len(), 3);
        assert_eq!(corpus.locus_names(), vec!["HLA-C", "HLA-A", "HLA-B"]);
        assert_eq!(corpus.get("HLA-A").unwrap().get(1).unwrap().labels(), vec!["C", "D"]);
        assert!(corpus.get("HLA-E").is_none());
    }

    #[test]
    fn test_corpus_errors() {
        let duplicated = vec![
            Locus::from_strings("HLA-A", ["A"]),
            Locus::from_strings("HLA-A", ["C"]),
        ];
        assert!(matches!(
            VariabilityBuilder::default().build_corpus(&duplicated),
            Err(VariabilityError::DuplicateLocus { .. })
        ));

        let with_empty = vec![Locus::from_strings("HLA-A", ["A"]), Locus::new("HLA-B")];
        let err = VariabilityBuilder::default().build_corpus(&with_empty).unwrap_err();
        assert_eq!(
            err,
            VariabilityError::EmptyLocus {
                locus: "HLA-B".to_string()
            }
        );
    }

    #[test]
    fn test_json_shape() {
        let variability = build("HLA-A", &["A", "A", "C"]);
        let json = serde_json::to_value(&variability).unwrap();
        let position = &json["1"];

        assert_eq!(position["variability"]["A"], 2);
        assert_eq!(position["variability"]["C"], 1);
        assert_eq!(position["percentages"], serde_json::json!([66.67, 33.33]));
        assert_eq!(position["values"], serde_json::json!([2, 1]));
        assert_eq!(position["rarities"], serde_json::json!(["only_two", "unique"]));
        assert_eq!(position["labels"], serde_json::json!(["A", "C"]));
        assert!(position["shannon_entropy"].as_f64().is_some());
        assert!(position["normalised_shannon_entropy"].as_f64().is_some());
    }

    #[test]
    fn test_json_is_deterministic() {
        let loci = vec![
            Locus::from_strings("HLA-A", ["WYAC", "YWAC", "W-AD", "YWCD"]),
            Locus::from_strings("HLA-B", ["MRVT", "MRVA", "LRVA"]),
        ];
        let builder = VariabilityBuilder::default();
        let first = serde_json::to_string_pretty(&builder.build_corpus(&loci).unwrap()).unwrap();
        let second = serde_json::to_string_pretty(&builder.build_corpus(&loci).unwrap()).unwrap();

        assert_eq!(first, second);
        assert!(first.find("\"HLA-A\"").unwrap() < first.find("\"HLA-B\"").unwrap());
        // first-seen order W before Y at position 1
        let raw = serde_json::to_string(&builder.build_corpus(&loci).unwrap()).unwrap();
        assert!(raw.contains(r#""1":{"variability":{"W":2,"Y":2}"#));
    }
}

// Copyright (c) 2025 Brian G. Milnes
// SPDX-License-Identifier: MIT

//! Analysis configuration
//!
//! Thresholds, target counts and word lists for every part-of-speech adapter.
//! An `AnalysisConfig` is built once per run (defaults plus optional JSON
//! overrides) and passed by reference into the adapters.

use crate::corpus::{ExclusionRule, ExclusionScope};
use crate::coverage::{AttentionRule, CoverageMetric};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use std::path::Path;

/// Metric selection plus one tuned threshold per metric.
///
/// Thresholds are percentages. The two metrics have very different scales,
/// so each keeps its own value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScanRules {
    pub metric: CoverageMetric,
    pub word_percentage: AttentionRule,
    pub questions_containing: AttentionRule,
}

impl ScanRules {
    /// Rule for the currently selected metric
    pub fn rule(&self) -> AttentionRule {
        match self.metric {
            CoverageMetric::WordPercentage => self.word_percentage,
            CoverageMetric::QuestionsContaining => self.questions_containing,
        }
    }

    pub fn with_metric(mut self, metric: CoverageMetric) -> Self {
        self.metric = metric;
        self
    }

    /// Replace the threshold of the selected metric, keeping its comparison
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        match self.metric {
            CoverageMetric::WordPercentage => self.word_percentage.threshold = threshold,
            CoverageMetric::QuestionsContaining => self.questions_containing.threshold = threshold,
        }
        self
    }
}

/// Verb conjugation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConjugationConfig {
    /// Verbs at or below this form coverage need attention
    pub rule: AttentionRule,
    /// Number of verbs the pool expansion tries to collect
    pub target_verbs: usize,
    pub initial_pool: usize,
    pub pool_step: usize,
    /// Verbs examined by the per-verb conjugation report
    pub report_verbs: usize,
    /// Missing forms listed per verb in the per-verb report
    pub missing_per_verb: usize,
    /// Homographs that are not conjugated forms in specific questions
    pub exclusions: Vec<ExclusionRule>,
    /// Literary or rare forms never suggested as missing
    pub literary_forms: BTreeSet<String>,
}

impl Default for ConjugationConfig {
    fn default() -> Self {
        ConjugationConfig {
            rule: AttentionRule::at_most(20.0),
            target_verbs: 25,
            initial_pool: 250,
            pool_step: 50,
            report_verbs: 25,
            missing_per_verb: 8,
            exclusions: vec![ExclusionRule {
                // "en crue" (in flood), not the participle of croire
                term: "crue".to_string(),
                scope: ExclusionScope::Records(["602".to_string()].into_iter().collect()),
            }],
            literary_forms: to_set(LITERARY_VERB_FORMS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdverbConfig {
    pub rules: ScanRules,
    /// Multi-word adverbs matched as whole phrases
    pub compounds: Vec<String>,
}

impl Default for AdverbConfig {
    fn default() -> Self {
        AdverbConfig {
            rules: ScanRules {
                metric: CoverageMetric::WordPercentage,
                word_percentage: AttentionRule::below(0.0018),
                questions_containing: AttentionRule::below(0.18),
            },
            compounds: to_vec(COMPOUND_ADVERBS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdjectiveConfig {
    pub rules: ScanRules,
    /// Adjectives examined by the per-form report
    pub form_report_limit: usize,
}

impl Default for AdjectiveConfig {
    fn default() -> Self {
        AdjectiveConfig {
            rules: ScanRules {
                metric: CoverageMetric::QuestionsContaining,
                word_percentage: AttentionRule::below(0.01),
                questions_containing: AttentionRule::below(0.1),
            },
            form_report_limit: 150,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NounConfig {
    pub rules: ScanRules,
    /// Nouns with limited teaching value, dropped from the reference
    pub blacklist: BTreeSet<String>,
    /// Hyphenated family nouns added to the reference when absent
    pub compounds: Vec<String>,
    /// Reference frequency assigned to added compounds
    pub compound_frequency: f64,
}

impl Default for NounConfig {
    fn default() -> Self {
        NounConfig {
            rules: ScanRules {
                metric: CoverageMetric::QuestionsContaining,
                word_percentage: AttentionRule::below(0.0009),
                questions_containing: AttentionRule::below(0.09),
            },
            blacklist: to_set(NOUN_BLACKLIST),
            compounds: to_vec(HYPHENATED_COMPOUND_NOUNS),
            compound_frequency: 50.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagConfig {
    /// Top/bottom tags shown by the coverage report
    pub report_limit: usize,
    /// Tags and pairs shown by the network report
    pub network_top: usize,
    pub min_tag_frequency: usize,
    pub min_pair_frequency: usize,
}

impl Default for TagConfig {
    fn default() -> Self {
        TagConfig {
            report_limit: 10,
            network_top: 15,
            min_tag_frequency: 2,
            min_pair_frequency: 1,
        }
    }
}

/// Complete configuration for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Rows printed per prioritized list
    pub display_rows: usize,
    pub conjugations: ConjugationConfig,
    pub adverbs: AdverbConfig,
    pub adjectives: AdjectiveConfig,
    pub nouns: NounConfig,
    pub tags: TagConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            display_rows: 30,
            conjugations: ConjugationConfig::default(),
            adverbs: AdverbConfig::default(),
            adjectives: AdjectiveConfig::default(),
            nouns: NounConfig::default(),
            tags: TagConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Load overrides from a JSON file; omitted fields keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Failed to parse config JSON: {}", path.display()))
    }

    /// Apply a JSON override on top of the defaults. Objects merge key by
    /// key at every depth, so `{"adverbs":{"rules":{"metric":..}}}` keeps the
    /// adverb thresholds; arrays and scalars replace the default value.
    pub fn from_json(json: &str) -> Result<Self> {
        let overrides: Value = serde_json::from_str(json).context("Failed to parse config JSON")?;
        let mut merged = serde_json::to_value(Self::default()).context("Failed to encode default config")?;
        merge(&mut merged, overrides);
        let config: Self = serde_json::from_value(merged).context("Failed to parse config JSON")?;
        Ok(config)
    }

    /// Defaults, or the given override file
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }
}

fn merge(base: &mut Value, overrides: Value) {
    match (base, overrides) {
        (Value::Object(base), Value::Object(overrides)) => {
            for (key, value) in overrides {
                match base.get_mut(&key) {
                    Some(slot) => merge(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

fn to_set(words: &[&str]) -> BTreeSet<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn to_vec(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

const COMPOUND_ADVERBS: &[&str] = &[
    "à tâtons",
    "aux aguets",
    "à l'improviste",
    "ici-bas",
    "à jeun",
    "à grand-peine",
    "outre-mer",
];

const HYPHENATED_COMPOUND_NOUNS: &[&str] = &[
    "grand-père",
    "grand-mère",
    "grand-parents",
    "beau-père",
    "beau-frère",
    "belle-mère",
    "belle-sœur",
    "ex-mari",
    "ex-femme",
    "arrière-grand-père",
    "arrière-grand-mère",
    "demi-frère",
    "demi-sœur",
];

const NOUN_BLACKLIST: &[&str] = &[
    // Military ranks and titles
    "lieutenant", "colonel", "général", "commandant", "capitaine",
    "sergent", "maréchal", "amiral", "brigadier",
    // Vulgar slang
    "bordel", "putain", "merde", "connard", "salaud", "con", "pute",
    // Specialized terms
    "métaphysique", "épistémologie", "ontologie", "herméneutique",
    // Archaic
    "damoiseau", "jouvenceau", "occis", "gent", "iceux",
    // Religious/supernatural
    "diable", "démon", "ange", "archange", "séraphin",
    // Informal profession slang
    "flic", "keuf", "toubib", "instit",
    "anglais", "prince", "crime",
];

const LITERARY_VERB_FORMS: &[&str] = &[
    // Passé simple
    "mourut", "commença", "devint", "vint", "tint", "prit", "fit", "dit",
    "vit", "fut", "eut", "alla", "donna", "porta", "parla", "regarda",
    "trouva", "passa", "sentit", "sortit", "partit", "rentra", "arriva",
    "resta", "tomba", "leva", "tourna", "plut", "ouvrit", "offrit",
    "couvrit", "souffrit", "découvrit",
    // Rare/morbid
    "mourrait", "mourrais", "mourrons", "mourrez", "mortes", "morts",
    // Imperfect subjunctive
    "sût", "eût", "fût", "dût", "pût", "vînt", "tînt", "prît", "fît",
    "dît", "vît",
    // Low-frequency conditionals
    "plairais", "plairas", "plairont", "plaisais",
    // Archaic
    "messied", "messiéront", "gît", "gisent", "gisant",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_tuned_values() {
        let config = AnalysisConfig::default();
        assert_eq!(config.adverbs.rules.rule(), AttentionRule::below(0.0018));
        assert_eq!(config.adjectives.rules.rule(), AttentionRule::below(0.1));
        assert_eq!(config.nouns.rules.rule(), AttentionRule::below(0.09));
        assert_eq!(config.conjugations.rule, AttentionRule::at_most(20.0));
        assert_eq!(config.conjugations.initial_pool, 250);
        assert_eq!(config.conjugations.pool_step, 50);
        assert!(config.nouns.blacklist.contains("lieutenant"));
        assert!(config.conjugations.literary_forms.contains("fut"));
    }

    #[test]
    fn test_partial_json_override() {
        let json = r#"{
            "display_rows": 5,
            "nouns": { "compound_frequency": 12.5 },
            "conjugations": { "target_verbs": 3 }
        }"#;
        let config = AnalysisConfig::from_json(json).unwrap();
        assert_eq!(config.display_rows, 5);
        assert_eq!(config.nouns.compound_frequency, 12.5);
        assert_eq!(config.conjugations.target_verbs, 3);
        // untouched fields keep defaults
        assert_eq!(config.conjugations.pool_step, 50);
        assert!(config.nouns.blacklist.contains("merde"));
    }

    #[test]
    fn test_metric_only_override_keeps_thresholds() {
        let json = r#"{"adverbs": {"rules": {"metric": "questions-containing"}}}"#;
        let config = AnalysisConfig::from_json(json).unwrap();
        let rules = config.adverbs.rules;
        assert_eq!(rules.metric, CoverageMetric::QuestionsContaining);
        assert_eq!(rules.rule(), AttentionRule::below(0.18));
        assert_eq!(rules.word_percentage, AttentionRule::below(0.0018));
        // other parts of speech untouched
        assert_eq!(config.adjectives.rules, AdjectiveConfig::default().rules);
        assert_eq!(config.adverbs.compounds, AdverbConfig::default().compounds);
    }

    #[test]
    fn test_threshold_only_override_keeps_comparison() {
        let json = r#"{"nouns": {"rules": {"questions_containing": {"threshold": 0.5}}}}"#;
        let rules = AnalysisConfig::from_json(json).unwrap().nouns.rules;
        assert_eq!(rules.rule(), AttentionRule::below(0.5));
    }

    #[test]
    fn test_unknown_metric_spelling_rejected() {
        let json = r#"{"adverbs": {"rules": {"metric": "questions_containing"}}}"#;
        assert!(AnalysisConfig::from_json(json).is_err());
    }

    #[test]
    fn test_switching_metric_switches_threshold() {
        let rules = AdjectiveConfig::default().rules;
        let word = rules.with_metric(CoverageMetric::WordPercentage);
        assert_eq!(word.rule(), AttentionRule::below(0.01));
        let tuned = word.with_threshold(0.5);
        assert_eq!(tuned.rule().threshold, 0.5);
        assert_eq!(tuned.questions_containing.threshold, 0.1);
    }
}

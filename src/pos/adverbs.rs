// Copyright (c) 2025 Brian G. Milnes
// SPDX-License-Identifier: MIT

//! Adverb coverage
//!
//! Tokens may contain apostrophes and hyphens ("aujourd'hui", "peut-être"),
//! and multi-word adverbs such as "à tâtons" are counted as whole phrases.

use super::{scan_reference, AttentionReport, PartOfSpeech, ScanInput};
use crate::config::AdverbConfig;
use crate::corpus::{extract_multiset, ExclusionSet, PhraseMatcher, Tokenizer};
use crate::coverage::percentage;
use crate::error::LoadResult;
use crate::lexicon::{self, LemmaRecord};
use crate::questions::QuestionRecord;
use std::path::Path;

/// Missing adverbs listed by the usage report
pub const MISSING_LIST_LEN: usize = 15;

/// Best-used adverbs listed by the usage report
pub const WELL_REPRESENTED_LEN: usize = 10;

/// Adverbs needing attention, read from `reference_path`
pub fn analyze(
    questions: &[QuestionRecord],
    reference_path: &Path,
    config: &AdverbConfig,
    limit: usize,
) -> LoadResult<AttentionReport> {
    let reference = lexicon::load_ranked(reference_path)?;
    scan(questions, &reference, config, limit)
}

pub fn scan(
    questions: &[QuestionRecord],
    reference: &[LemmaRecord],
    config: &AdverbConfig,
    limit: usize,
) -> LoadResult<AttentionReport> {
    let tokenizer = Tokenizer::compound()?;
    let phrases = PhraseMatcher::new(&config.compounds)?;
    let exclusions = ExclusionSet::default();
    let input = ScanInput {
        questions,
        tokenizer: &tokenizer,
        exclusions: &exclusions,
        phrases: (!phrases.is_empty()).then_some(&phrases),
    };
    Ok(scan_reference(PartOfSpeech::Adverb, reference, input, config.rules, limit))
}

/// Corpus usage of one reference adverb
#[derive(Debug, Clone, PartialEq)]
pub struct AdverbUsage {
    pub lemma: String,
    pub rank: usize,
    pub frequency: f64,
    pub usage: usize,
    /// Share of all corpus tokens
    pub percentage: f64,
}

#[derive(Debug, Clone, Default)]
pub struct UsageReport {
    pub adverbs: Vec<AdverbUsage>,
}

impl UsageReport {
    pub fn found(&self) -> usize {
        self.adverbs.iter().filter(|a| a.usage > 0).count()
    }

    pub fn found_percentage(&self) -> f64 {
        percentage(self.found(), self.adverbs.len())
    }

    /// Unused adverbs, most frequent first
    pub fn missing(&self) -> Vec<&AdverbUsage> {
        let mut missing: Vec<_> = self.adverbs.iter().filter(|a| a.usage == 0).collect();
        missing.sort_by(|a, b| b.frequency.total_cmp(&a.frequency));
        missing.truncate(MISSING_LIST_LEN);
        missing
    }

    /// Used adverbs, most used first
    pub fn well_represented(&self) -> Vec<&AdverbUsage> {
        let mut used: Vec<_> = self.adverbs.iter().filter(|a| a.usage > 0).collect();
        used.sort_by(|a, b| b.usage.cmp(&a.usage));
        used.truncate(WELL_REPRESENTED_LEN);
        used
    }
}

/// Usage of the `top` most frequent adverbs, whatever their coverage
pub fn usage_report(
    questions: &[QuestionRecord],
    reference: &[LemmaRecord],
    config: &AdverbConfig,
    top: usize,
) -> LoadResult<UsageReport> {
    let tokenizer = Tokenizer::compound()?;
    let phrases = PhraseMatcher::new(&config.compounds)?;
    let corpus = extract_multiset(
        questions,
        &tokenizer,
        &ExclusionSet::default(),
        (!phrases.is_empty()).then_some(&phrases),
    );
    let total = corpus.tokens.total();
    let adverbs = reference
        .iter()
        .take(top)
        .enumerate()
        .map(|(i, record)| {
            let usage = corpus.tokens.count(&record.lemma);
            AdverbUsage {
                lemma: record.lemma.clone(),
                rank: i + 1,
                frequency: record.corpus_frequency,
                usage,
                percentage: percentage(usage, total),
            }
        })
        .collect();
    Ok(UsageReport { adverbs })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coverage::AttentionRule;

    fn q(text: &str) -> QuestionRecord {
        QuestionRecord {
            question: Some(text.to_string()),
            ..QuestionRecord::default()
        }
    }

    #[test]
    fn test_compound_adverbs_counted_as_phrases() {
        let questions = vec![
            q("Il cherche à tâtons dans le noir."),
            q("Aujourd'hui il part outre-mer."),
        ];
        let reference = vec![
            LemmaRecord::new("aujourd'hui", 500.0),
            LemmaRecord::new("à tâtons", 3.0),
            LemmaRecord::new("outre-mer", 2.0),
            LemmaRecord::new("ailleurs", 1.0),
        ];
        let mut config = AdverbConfig::default();
        config.rules.word_percentage = AttentionRule::below(0.0001);
        let report = scan(&questions, &reference, &config, 10).unwrap();
        // only the unused adverb stays below the threshold
        let lemmas: Vec<_> = report.results.iter().map(|r| r.lemma.as_str()).collect();
        assert_eq!(lemmas, vec!["ailleurs"]);
        assert_eq!(report.results[0].rank, 4);
    }

    #[test]
    fn test_limit_caps_results() {
        let questions = vec![q("rien")];
        let reference: Vec<_> = ["bien", "mal", "ici"].iter().map(|l| LemmaRecord::new(*l, 1.0)).collect();
        let report = scan(&questions, &reference, &AdverbConfig::default(), 2).unwrap();
        assert_eq!(report.results.len(), 2);
    }

    #[test]
    fn test_usage_report() {
        let questions = vec![q("Il vient ici, toujours ici. Peut-être demain.")];
        let reference: Vec<_> = [("ici", 900.0), ("jamais", 800.0), ("peut-être", 700.0), ("demain", 10.0)]
            .iter()
            .map(|(l, f)| LemmaRecord::new(*l, *f))
            .collect();
        let report = usage_report(&questions, &reference, &AdverbConfig::default(), 3).unwrap();
        assert_eq!(report.adverbs.len(), 3);
        assert_eq!(report.adverbs[0].usage, 2);
        // 7 tokens: il vient ici toujours ici peut-être demain
        assert!((report.adverbs[0].percentage - 200.0 / 7.0).abs() < 1e-9);
        assert_eq!(report.found(), 2);
        let missing: Vec<_> = report.missing().iter().map(|a| a.lemma.as_str()).collect();
        assert_eq!(missing, vec!["jamais"]);
        assert_eq!(report.well_represented()[0].lemma, "ici");
    }
}

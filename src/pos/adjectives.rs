// Copyright (c) 2025 Brian G. Milnes
// SPDX-License-Identifier: MIT

//! Adjective coverage
//!
//! Lemma-level ranking uses each adjective's most frequent form. The
//! form report then checks every gender/number spelling of the top
//! adjectives against the corpus.

use super::{scan_reference, AttentionReport, PartOfSpeech, ScanInput};
use crate::config::{AdjectiveConfig, ScanRules};
use crate::corpus::{extract_multiset, ExclusionSet, TokenMultiset, Tokenizer};
use crate::coverage::{form_coverage, FormCoverage};
use crate::error::LoadResult;
use crate::lexicon::{self, LemmaGroup, LemmaRecord};
use crate::questions::QuestionRecord;
use std::path::Path;

/// Coverage below this is listed as a priority
pub const PRIORITY_COVERAGE: f64 = 30.0;

/// Completely missing adjectives listed
pub const MISSING_LIST_LEN: usize = 10;

pub fn load_reference(path: &Path) -> LoadResult<Vec<LemmaGroup>> {
    lexicon::load_grouped(path)
}

pub fn scan(
    questions: &[QuestionRecord],
    groups: &[LemmaGroup],
    rules: ScanRules,
    limit: usize,
) -> LoadResult<AttentionReport> {
    let reference: Vec<LemmaRecord> = groups.iter().map(LemmaGroup::to_record).collect();
    let tokenizer = Tokenizer::plain()?;
    let exclusions = ExclusionSet::default();
    let input = ScanInput {
        questions,
        tokenizer: &tokenizer,
        exclusions: &exclusions,
        phrases: None,
    };
    Ok(scan_reference(PartOfSpeech::Adjective, &reference, input, rules, limit))
}

pub fn analyze(
    questions: &[QuestionRecord],
    reference_path: &Path,
    config: &AdjectiveConfig,
    limit: usize,
) -> LoadResult<AttentionReport> {
    let groups = load_reference(reference_path)?;
    scan(questions, &groups, config.rules, limit)
}

#[derive(Debug, Clone)]
pub struct AdjectiveForms {
    pub lemma: String,
    pub rank: usize,
    pub max_frequency: f64,
    pub coverage: FormCoverage,
}

#[derive(Debug, Clone, Default)]
pub struct FormReport {
    pub entries: Vec<AdjectiveForms>,
}

impl FormReport {
    pub fn average_coverage(&self) -> f64 {
        if self.entries.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.entries.iter().map(|e| e.coverage.coverage_percentage).sum();
        sum / self.entries.len() as f64
    }

    /// Adjectives below the priority coverage, most frequent first
    pub fn priorities(&self) -> Vec<&AdjectiveForms> {
        let mut low: Vec<_> = self
            .entries
            .iter()
            .filter(|e| e.coverage.coverage_percentage < PRIORITY_COVERAGE)
            .collect();
        low.sort_by(|a, b| b.max_frequency.total_cmp(&a.max_frequency));
        low
    }

    /// Adjectives with no form in the corpus, most frequent first
    pub fn completely_missing(&self) -> Vec<&AdjectiveForms> {
        let mut missing: Vec<_> = self
            .entries
            .iter()
            .filter(|e| e.coverage.found_count() == 0)
            .collect();
        missing.sort_by(|a, b| b.max_frequency.total_cmp(&a.max_frequency));
        missing.truncate(MISSING_LIST_LEN);
        missing
    }
}

/// Corpus multiset used by the form report
pub fn corpus_tokens(questions: &[QuestionRecord]) -> LoadResult<TokenMultiset> {
    let tokenizer = Tokenizer::plain()?;
    Ok(extract_multiset(questions, &tokenizer, &ExclusionSet::default(), None).tokens)
}

/// Form coverage of the `limit` most frequent adjectives
pub fn form_report(groups: &[LemmaGroup], tokens: &TokenMultiset, limit: usize) -> FormReport {
    let entries = groups
        .iter()
        .take(limit)
        .enumerate()
        .filter_map(|(i, group)| {
            let forms = group.unique_forms();
            if forms.is_empty() {
                return None;
            }
            Some(AdjectiveForms {
                lemma: group.lemma.clone(),
                rank: i + 1,
                max_frequency: group.max_frequency,
                coverage: form_coverage(None, &forms, tokens),
            })
        })
        .collect();
    FormReport { entries }
}

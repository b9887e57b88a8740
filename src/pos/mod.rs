// Copyright (c) 2025 Brian G. Milnes
// SPDX-License-Identifier: MIT

//! Part-of-speech adapters
//!
//! Each adapter binds a reference source, a tokenizer, exclusion rules and
//! scan rules to the coverage scanner. `scan_reference` builds whichever
//! corpus representation the selected metric needs.

pub mod adjectives;
pub mod adverbs;
pub mod nouns;
pub mod verbs;

use crate::config::ScanRules;
use crate::corpus::{extract_multiset, ExclusionSet, MembershipIndex, PhraseMatcher, Tokenizer};
use crate::coverage::{scan_needs_attention, AttentionRule, CoverageMetric, CoverageResult};
use crate::error::LoadError;
use crate::lexicon::LemmaRecord;
use crate::questions::QuestionRecord;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartOfSpeech {
    Verb,
    Adjective,
    Adverb,
    Noun,
}

impl PartOfSpeech {
    /// Plural lowercase name used in report text
    pub fn plural(&self) -> &'static str {
        match self {
            PartOfSpeech::Verb => "verbs",
            PartOfSpeech::Adjective => "adjectives",
            PartOfSpeech::Adverb => "adverbs",
            PartOfSpeech::Noun => "nouns",
        }
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PartOfSpeech::Verb => "verb",
            PartOfSpeech::Adjective => "adjective",
            PartOfSpeech::Adverb => "adverb",
            PartOfSpeech::Noun => "noun",
        };
        f.write_str(name)
    }
}

/// Corpus inputs for one scan
#[derive(Clone, Copy)]
pub struct ScanInput<'a> {
    pub questions: &'a [QuestionRecord],
    pub tokenizer: &'a Tokenizer,
    pub exclusions: &'a ExclusionSet,
    pub phrases: Option<&'a PhraseMatcher>,
}

/// Needs-attention lemmas of one part of speech
#[derive(Debug, Clone)]
pub struct AttentionReport {
    pub pos: PartOfSpeech,
    pub metric: CoverageMetric,
    pub rule: AttentionRule,
    /// Total tokens or total questions, per metric
    pub denominator: usize,
    /// Lemmas in the reference list
    pub reference_len: usize,
    pub results: Vec<CoverageResult>,
}

impl AttentionReport {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Scan `reference` with the metric selected by `rules`
pub fn scan_reference(
    pos: PartOfSpeech,
    reference: &[LemmaRecord],
    input: ScanInput<'_>,
    rules: ScanRules,
    target: usize,
) -> AttentionReport {
    let rule = rules.rule();
    let (denominator, results) = match rules.metric {
        CoverageMetric::WordPercentage => {
            let corpus = extract_multiset(input.questions, input.tokenizer, input.exclusions, input.phrases);
            let results = scan_needs_attention(reference, &corpus.tokens, rule, target);
            (corpus.tokens.total(), results)
        }
        CoverageMetric::QuestionsContaining => {
            let index = MembershipIndex::build(input.questions, input.tokenizer, input.exclusions, input.phrases);
            let results = scan_needs_attention(reference, &index, rule, target);
            (index.len(), results)
        }
    };
    log::debug!(
        "{pos}: {} of {} reference lemmas need attention ({} {} {})",
        results.len(),
        reference.len(),
        rules.metric,
        rule.symbol(),
        rule.threshold
    );
    AttentionReport {
        pos,
        metric: rules.metric,
        rule,
        denominator,
        reference_len: reference.len(),
        results,
    }
}

/// A report section that either ran or could not
#[derive(Debug)]
pub enum AnalysisOutcome<T> {
    Complete(T),
    Unavailable(LoadError),
}

impl<T> AnalysisOutcome<T> {
    /// Log a load failure and keep going
    pub fn from_result(section: &str, result: Result<T, LoadError>) -> Self {
        match result {
            Ok(value) => AnalysisOutcome::Complete(value),
            Err(e) => {
                log::warn!("{section}: {e}");
                AnalysisOutcome::Unavailable(e)
            }
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, AnalysisOutcome::Complete(_))
    }

    pub fn as_complete(&self) -> Option<&T> {
        match self {
            AnalysisOutcome::Complete(value) => Some(value),
            AnalysisOutcome::Unavailable(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionStatus {
    Completed,
    Unavailable(String),
}

/// Which sections of a run produced output
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    sections: Vec<(String, SectionStatus)>,
}

impl RunSummary {
    pub fn record<T>(&mut self, section: &str, outcome: &AnalysisOutcome<T>) {
        let status = match outcome {
            AnalysisOutcome::Complete(_) => SectionStatus::Completed,
            AnalysisOutcome::Unavailable(e) => SectionStatus::Unavailable(e.to_string()),
        };
        self.sections.push((section.to_string(), status));
    }

    pub fn completed(&self) -> usize {
        self.sections
            .iter()
            .filter(|(_, s)| *s == SectionStatus::Completed)
            .count()
    }

    /// Sections that could not run, with their reasons
    pub fn unavailable(&self) -> Vec<(&str, &str)> {
        self.sections
            .iter()
            .filter_map(|(name, status)| match status {
                SectionStatus::Unavailable(reason) => Some((name.as_str(), reason.as_str())),
                SectionStatus::Completed => None,
            })
            .collect()
    }

    pub fn sections(&self) -> &[(String, SectionStatus)] {
        &self.sections
    }
}

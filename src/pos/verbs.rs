// Copyright (c) 2025 Brian G. Milnes
// SPDX-License-Identifier: MIT

//! Verb conjugation coverage
//!
//! A verb's coverage is the share of its spellings (infinitive plus every
//! conjugated form in Lexique) that occur in the corpus. Verbs at or below
//! the coverage ceiling are collected by dynamic pool expansion over the
//! frequency-ranked verb list; their missing forms are then prioritized by
//! reference frequency.

use crate::config::ConjugationConfig;
use crate::corpus::{extract_multiset, ExcludedToken, ExclusionSet, TokenMultiset, Tokenizer};
use crate::coverage::{expand_pool, form_coverage, percentage, ExpansionOutcome, FormCoverage, PoolExpansion};
use crate::error::LoadResult;
use crate::lexicon::LemmaRecord;
use crate::lexique::LexiqueDb;
use crate::questions::QuestionRecord;
use serde::Serialize;
use std::path::Path;

/// Verbs below this coverage are listed as priorities in the per-verb report
pub const PRIORITY_COVERAGE: f64 = 30.0;

/// Verb tokens of the corpus with conjugate exclusions applied
#[derive(Debug, Clone)]
pub struct VerbCorpus {
    pub tokens: TokenMultiset,
    pub excluded: Vec<ExcludedToken>,
}

pub fn verb_corpus(questions: &[QuestionRecord], config: &ConjugationConfig) -> LoadResult<VerbCorpus> {
    let tokenizer = Tokenizer::plain()?;
    let exclusions = ExclusionSet::new(&config.exclusions);
    let corpus = extract_multiset(questions, &tokenizer, &exclusions, None);
    Ok(VerbCorpus {
        tokens: corpus.tokens,
        excluded: corpus.excluded,
    })
}

#[derive(Debug, Clone)]
pub struct VerbCoverage {
    pub verb: String,
    /// 1-based position among all verbs
    pub rank: usize,
    pub frequency: f64,
    pub coverage: FormCoverage,
}

/// Verbs selected by pool expansion
#[derive(Debug, Clone)]
pub struct VerbSelection {
    pub outcome: ExpansionOutcome<VerbCoverage>,
}

impl VerbSelection {
    pub fn verbs(&self) -> &[VerbCoverage] {
        &self.outcome.selected
    }

    pub fn total_verbs(&self) -> usize {
        self.outcome.reference_len
    }
}

/// Coverage of one verb, `None` when Lexique lists no conjugated forms
pub fn verb_coverage(db: &LexiqueDb, record: &LemmaRecord, rank: usize, tokens: &TokenMultiset) -> LoadResult<Option<VerbCoverage>> {
    let forms = db.conjugated_forms(&record.lemma)?;
    if forms.is_empty() {
        log::debug!("no conjugated forms for {}", record.lemma);
        return Ok(None);
    }
    Ok(Some(VerbCoverage {
        verb: record.lemma.clone(),
        rank,
        frequency: record.corpus_frequency,
        coverage: form_coverage(Some(&record.lemma), &forms, tokens),
    }))
}

/// Collect up to `config.target_verbs` verbs needing attention, widening
/// the scanned window of the ranked verb list as needed
pub fn select_verbs(db: &LexiqueDb, tokens: &TokenMultiset, config: &ConjugationConfig) -> LoadResult<VerbSelection> {
    let ranked = db.ranked_verbs()?;
    select_from(db, &ranked, tokens, config)
}

pub fn select_from(
    db: &LexiqueDb,
    ranked: &[LemmaRecord],
    tokens: &TokenMultiset,
    config: &ConjugationConfig,
) -> LoadResult<VerbSelection> {
    let expansion = PoolExpansion {
        initial: config.initial_pool,
        step: config.pool_step,
    };
    let rule = config.rule;
    let outcome = expand_pool(ranked, config.target_verbs, expansion, |i, record| -> LoadResult<_> {
        let verb = verb_coverage(db, record, i + 1, tokens)?;
        Ok(verb.filter(|v| rule.needs_attention(v.coverage.coverage_percentage)))
    })?;
    Ok(VerbSelection { outcome })
}

/// Selection and missing forms for one run
#[derive(Debug, Clone)]
pub struct VerbAnalysis {
    pub corpus: VerbCorpus,
    pub selection: VerbSelection,
    pub missing: MissingConjugates,
}

/// Verbs needing attention and their prioritized missing forms, reading
/// verbs from the Lexique database at `db_path`
pub fn analyze(questions: &[QuestionRecord], db_path: &Path, config: &ConjugationConfig) -> LoadResult<VerbAnalysis> {
    let corpus = verb_corpus(questions, config)?;
    let db = LexiqueDb::open(db_path)?;
    let selection = select_verbs(&db, &corpus.tokens, config)?;
    let missing = missing_conjugates(selection.verbs(), &corpus.tokens, config);
    Ok(VerbAnalysis {
        corpus,
        selection,
        missing,
    })
}

/// A missing conjugated form with its owning verb
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingConjugate {
    pub form: String,
    pub category: String,
    pub frequency: f64,
    pub verb: String,
    pub verb_rank: usize,
    /// Occurrences of the form in the corpus
    pub usage: usize,
    /// Usage as a share of all corpus tokens
    pub percentage: f64,
}

#[derive(Debug, Clone, Default)]
pub struct MissingConjugates {
    /// Ordered by reference frequency, then verb rank
    pub forms: Vec<MissingConjugate>,
    /// Literary forms skipped
    pub filtered: usize,
}

pub fn missing_conjugates(verbs: &[VerbCoverage], tokens: &TokenMultiset, config: &ConjugationConfig) -> MissingConjugates {
    let mut result = MissingConjugates::default();
    for verb in verbs {
        for form in &verb.coverage.missing {
            if config.literary_forms.contains(&form.form) {
                result.filtered += 1;
                continue;
            }
            let usage = tokens.count(&form.form);
            result.forms.push(MissingConjugate {
                form: form.form.clone(),
                category: form.category.clone(),
                frequency: form.frequency,
                verb: verb.verb.clone(),
                verb_rank: verb.rank,
                usage,
                percentage: percentage(usage, tokens.total()),
            });
        }
    }
    result
        .forms
        .sort_by(|a, b| b.frequency.total_cmp(&a.frequency).then(a.verb_rank.cmp(&b.verb_rank)));
    result
}

/// Coverage of the top verbs, for the per-verb report
#[derive(Debug, Clone)]
pub struct ConjugationReport {
    pub verbs: Vec<VerbReportEntry>,
}

#[derive(Debug, Clone)]
pub struct VerbReportEntry {
    pub verb: String,
    pub rank: usize,
    pub frequency: f64,
    /// `None` when the database has no conjugated forms
    pub coverage: Option<FormCoverage>,
}

impl ConjugationReport {
    pub fn covered(&self) -> impl Iterator<Item = (&VerbReportEntry, &FormCoverage)> {
        self.verbs.iter().filter_map(|v| v.coverage.as_ref().map(|c| (v, c)))
    }

    pub fn average_coverage(&self) -> f64 {
        let values: Vec<f64> = self.covered().map(|(_, c)| c.coverage_percentage).collect();
        if values.is_empty() {
            0.0
        } else {
            values.iter().sum::<f64>() / values.len() as f64
        }
    }

    /// Verbs below the priority coverage, least covered first
    pub fn priorities(&self) -> Vec<(&VerbReportEntry, &FormCoverage)> {
        let mut low: Vec<_> = self
            .covered()
            .filter(|(_, c)| c.coverage_percentage < PRIORITY_COVERAGE)
            .collect();
        low.sort_by(|a, b| a.1.coverage_percentage.total_cmp(&b.1.coverage_percentage));
        low
    }
}

pub fn conjugation_report(db: &LexiqueDb, top: usize, tokens: &TokenMultiset) -> LoadResult<ConjugationReport> {
    let mut verbs = Vec::new();
    for (i, record) in db.top_verbs(top)?.iter().enumerate() {
        let coverage = verb_coverage(db, record, i + 1, tokens)?.map(|v| v.coverage);
        verbs.push(VerbReportEntry {
            verb: record.lemma.clone(),
            rank: i + 1,
            frequency: record.corpus_frequency,
            coverage,
        });
    }
    Ok(ConjugationReport { verbs })
}

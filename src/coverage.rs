// Copyright (c) 2025 Brian G. Milnes
// SPDX-License-Identifier: MIT

//! Coverage scanner
//!
//! Measures how well each lemma of a ranked reference list is represented in
//! the question corpus, and selects the lemmas that need attention.
//!
//! Two metrics are available:
//!
//! - **Word percentage**: occurrences of the lemma over all corpus tokens.
//!   The denominator grows by every word of every added question, so a
//!   lemma's value drifts down as the bank grows even when its own usage is
//!   unchanged. Thresholds tuned for this metric assume that behavior.
//! - **Questions containing**: questions whose token set holds the lemma over
//!   the number of questions. The denominator grows by one per question, so
//!   values stay comparable across bank growth.

use crate::corpus::{MembershipIndex, TokenMultiset};
use crate::lexicon::{InflectedForm, LemmaRecord};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum CoverageMetric {
    WordPercentage,
    QuestionsContaining,
}

impl CoverageMetric {
    pub fn label(&self) -> &'static str {
        match self {
            CoverageMetric::WordPercentage => "word percentage",
            CoverageMetric::QuestionsContaining => "questions containing",
        }
    }
}

impl fmt::Display for CoverageMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Threshold test deciding whether a coverage value needs attention
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttentionRule {
    /// Percentage in [0, 100]
    pub threshold: f64,
    /// `<=` when true, `<` otherwise
    #[serde(default)]
    pub inclusive: bool,
}

impl AttentionRule {
    /// Coverage strictly below `threshold`
    pub fn below(threshold: f64) -> Self {
        AttentionRule { threshold, inclusive: false }
    }

    /// Coverage at or below `threshold`
    pub fn at_most(threshold: f64) -> Self {
        AttentionRule { threshold, inclusive: true }
    }

    pub fn needs_attention(&self, coverage: f64) -> bool {
        if self.inclusive {
            coverage <= self.threshold
        } else {
            coverage < self.threshold
        }
    }

    pub fn symbol(&self) -> &'static str {
        if self.inclusive {
            "<="
        } else {
            "<"
        }
    }
}

/// `count / total * 100`, zero for an empty denominator
pub fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

/// A corpus representation that one metric can be computed over
pub trait CoverageSource {
    fn metric(&self) -> CoverageMetric;

    /// Numerator for `lemma`
    fn match_count(&self, lemma: &str) -> usize;

    fn denominator(&self) -> usize;

    fn coverage(&self, lemma: &str) -> (usize, f64) {
        let matches = self.match_count(lemma);
        (matches, percentage(matches, self.denominator()))
    }
}

impl CoverageSource for TokenMultiset {
    fn metric(&self) -> CoverageMetric {
        CoverageMetric::WordPercentage
    }

    fn match_count(&self, lemma: &str) -> usize {
        self.count(lemma)
    }

    fn denominator(&self) -> usize {
        self.total()
    }
}

impl CoverageSource for MembershipIndex {
    fn metric(&self) -> CoverageMetric {
        CoverageMetric::QuestionsContaining
    }

    fn match_count(&self, lemma: &str) -> usize {
        self.questions_containing(lemma)
    }

    fn denominator(&self) -> usize {
        self.len()
    }
}

/// Coverage of one reference lemma
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageResult {
    pub lemma: String,
    pub corpus_frequency: f64,
    /// 1-based position in the reference ordering
    pub rank: usize,
    pub match_count: usize,
    pub coverage_percentage: f64,
}

/// Walk `reference` in rank order and keep lemmas the rule flags, stopping
/// once `target` have been collected.
pub fn scan_needs_attention<S: CoverageSource + ?Sized>(
    reference: &[LemmaRecord],
    source: &S,
    rule: AttentionRule,
    target: usize,
) -> Vec<CoverageResult> {
    let mut selected = Vec::new();
    if target == 0 {
        return selected;
    }
    for (i, record) in reference.iter().enumerate() {
        let (match_count, coverage) = source.coverage(&record.lemma);
        if rule.needs_attention(coverage) {
            selected.push(CoverageResult {
                lemma: record.lemma.clone(),
                corpus_frequency: record.corpus_frequency,
                rank: i + 1,
                match_count,
                coverage_percentage: coverage,
            });
            if selected.len() >= target {
                break;
            }
        }
    }
    selected
}

// ============================================================================
// Dynamic pool expansion
// ============================================================================

/// Window sizes for dynamic pool expansion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolExpansion {
    pub initial: usize,
    pub step: usize,
}

/// One widening of the window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStep {
    pub window: usize,
    /// Qualifying candidates found within `window`
    pub qualifying: usize,
}

#[derive(Debug, Clone)]
pub struct ExpansionOutcome<T> {
    pub selected: Vec<T>,
    pub steps: Vec<PoolStep>,
    pub reference_len: usize,
    pub target: usize,
}

impl<T> ExpansionOutcome<T> {
    pub fn reached_target(&self) -> bool {
        self.selected.len() >= self.target
    }

    /// Window size of the last step
    pub fn final_window(&self) -> usize {
        self.steps.last().map(|s| s.window).unwrap_or(0)
    }
}

/// Collect `target` qualifying candidates from a ranked list, scanning a
/// window that starts at `expansion.initial` and widens by
/// `expansion.step` until the target is met or the list is exhausted.
///
/// Each candidate is evaluated at most once: a widening only examines the
/// candidates it adds. The result equals rescanning every window from the
/// top. `evaluate` receives the 0-based rank and returns `Some` when the
/// candidate qualifies.
pub fn expand_pool<C, T, E, F>(
    candidates: &[C],
    target: usize,
    expansion: PoolExpansion,
    mut evaluate: F,
) -> Result<ExpansionOutcome<T>, E>
where
    F: FnMut(usize, &C) -> Result<Option<T>, E>,
{
    let len = candidates.len();
    let step = expansion.step.max(1);
    let mut window = expansion.initial.max(1).min(len);
    let mut cursor = 0;
    let mut outcome = ExpansionOutcome {
        selected: Vec::new(),
        steps: Vec::new(),
        reference_len: len,
        target,
    };

    if target == 0 || len == 0 {
        return Ok(outcome);
    }

    loop {
        while cursor < window && outcome.selected.len() < target {
            if let Some(item) = evaluate(cursor, &candidates[cursor])? {
                outcome.selected.push(item);
            }
            cursor += 1;
        }
        outcome.steps.push(PoolStep {
            window,
            qualifying: outcome.selected.len(),
        });
        log::debug!(
            "pool window {window}: {} of {target} qualifying",
            outcome.selected.len()
        );

        if outcome.reached_target() || window == len {
            break;
        }
        window = (window + step).min(len);
    }

    Ok(outcome)
}

// ============================================================================
// Form-level coverage
// ============================================================================

/// An inflected form found in the corpus
#[derive(Debug, Clone, PartialEq)]
pub struct FormHit {
    pub form: String,
    pub category: String,
    /// Occurrences in the corpus
    pub usage: usize,
    pub frequency: f64,
}

/// Which inflected forms of one lemma the corpus uses
#[derive(Debug, Clone, PartialEq)]
pub struct FormCoverage {
    pub found: Vec<FormHit>,
    /// Missing forms in reference-frequency order
    pub missing: Vec<InflectedForm>,
    pub total_forms: usize,
    pub coverage_percentage: f64,
}

impl FormCoverage {
    pub fn found_count(&self) -> usize {
        self.found.len()
    }
}

/// Form coverage of one lemma.
///
/// When `base` is given (a verb infinitive) it counts as one extra form in
/// the denominator and as a hit when present. Found forms are ordered by
/// corpus usage, missing forms by reference frequency; ties keep input order.
pub fn form_coverage(base: Option<&str>, forms: &[InflectedForm], tokens: &TokenMultiset) -> FormCoverage {
    let mut found = Vec::new();
    let mut missing = Vec::new();

    if let Some(base) = base {
        if tokens.contains(base) {
            found.push(FormHit {
                form: base.to_string(),
                category: "infinitive".to_string(),
                usage: tokens.count(base),
                frequency: 0.0,
            });
        }
    }

    for form in forms {
        if tokens.contains(&form.form) {
            found.push(FormHit {
                form: form.form.clone(),
                category: form.category.clone(),
                usage: tokens.count(&form.form),
                frequency: form.frequency,
            });
        } else {
            missing.push(form.clone());
        }
    }

    found.sort_by(|a, b| b.usage.cmp(&a.usage));
    missing.sort_by(|a, b| b.frequency.total_cmp(&a.frequency));

    let total_forms = forms.len() + usize::from(base.is_some());
    let coverage_percentage = percentage(found.len(), total_forms);

    FormCoverage {
        found,
        missing,
        total_forms,
        coverage_percentage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{ExclusionSet, Tokenizer};
    use crate::questions::QuestionRecord;

    fn records(items: &[(&str, f64)]) -> Vec<LemmaRecord> {
        items.iter().map(|(l, f)| LemmaRecord::new(*l, *f)).collect()
    }

    fn form(f: &str, freq: f64) -> InflectedForm {
        InflectedForm {
            form: f.to_string(),
            category: "VER".to_string(),
            frequency: freq,
        }
    }

    #[test]
    fn test_word_percentage_example() {
        let mut tokens: Vec<&str> = vec!["parler"; 5];
        tokens.extend(std::iter::repeat("mot").take(995));
        let multiset = TokenMultiset::from_tokens(tokens);
        assert_eq!(multiset.total(), 1000);

        let reference = records(&[("parler", 100.0), ("manger", 80.0), ("rare", 0.5)]);
        let result = scan_needs_attention(&reference, &multiset, AttentionRule::below(1.0), 10);
        let lemmas: Vec<_> = result.iter().map(|r| r.lemma.as_str()).collect();
        assert_eq!(lemmas, vec!["parler", "manger", "rare"]);
        assert!((result[0].coverage_percentage - 0.5).abs() < 1e-9);
        assert_eq!(result[1].coverage_percentage, 0.0);
        assert_eq!(result[2].rank, 3);
    }

    #[test]
    fn test_questions_containing_example() {
        let mut questions = Vec::new();
        for i in 0..10 {
            let text = if i < 3 { "un point important" } else { "rien ici" };
            questions.push(QuestionRecord {
                question: Some(text.to_string()),
                ..QuestionRecord::default()
            });
        }
        let index = MembershipIndex::build(&questions, &Tokenizer::plain().unwrap(), &ExclusionSet::default(), None);
        assert_eq!(index.coverage("important"), (3, 30.0));

        let reference = records(&[("important", 90.0), ("rarissime", 1.0)]);
        let result = scan_needs_attention(&reference, &index, AttentionRule::below(25.0), 10);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].lemma, "rarissime");
        assert_eq!(result[0].rank, 2);
    }

    #[test]
    fn test_scan_stops_at_target() {
        let multiset = TokenMultiset::from_tokens(["x"]);
        let reference = records(&[("a", 5.0), ("b", 4.0), ("c", 3.0)]);
        let result = scan_needs_attention(&reference, &multiset, AttentionRule::below(1.0), 2);
        assert_eq!(result.len(), 2);
        assert!(scan_needs_attention(&reference, &multiset, AttentionRule::below(1.0), 0).is_empty());
    }

    #[test]
    fn test_metric_spelling_matches_cli_and_json() {
        for metric in [CoverageMetric::WordPercentage, CoverageMetric::QuestionsContaining] {
            let cli = metric.to_possible_value().unwrap();
            let json = serde_json::to_string(&metric).unwrap();
            assert_eq!(json, format!("\"{}\"", cli.get_name()));
            let back: CoverageMetric = serde_json::from_str(&json).unwrap();
            assert_eq!(back, metric);
        }
        assert_eq!(
            CoverageMetric::from_str("questions-containing", false).unwrap(),
            CoverageMetric::QuestionsContaining
        );
    }

    #[test]
    fn test_inclusive_rule() {
        assert!(AttentionRule::at_most(20.0).needs_attention(20.0));
        assert!(!AttentionRule::below(20.0).needs_attention(20.0));
    }

    #[test]
    fn test_etre_form_coverage() {
        let forms: Vec<_> = ["suis", "es", "est", "sommes", "êtes", "sont"]
            .iter()
            .map(|f| form(f, 10.0))
            .collect();
        let tokens = TokenMultiset::from_tokens(["est", "sommes", "est"]);
        let cov = form_coverage(Some("être"), &forms, &tokens);
        assert_eq!(cov.total_forms, 7);
        assert_eq!(cov.found_count(), 2);
        assert!((cov.coverage_percentage - 200.0 / 7.0).abs() < 1e-9);
        assert_eq!(cov.found[0].form, "est");
        assert_eq!(cov.missing.len(), 4);
    }

    #[test]
    fn test_infinitive_counts_as_hit() {
        let forms = vec![form("parle", 5.0), form("parlons", 1.0)];
        let tokens = TokenMultiset::from_tokens(["parler"]);
        let cov = form_coverage(Some("parler"), &forms, &tokens);
        assert_eq!(cov.found[0].category, "infinitive");
        assert_eq!(cov.found_count(), 1);
        assert_eq!(cov.missing[0].form, "parle");
    }

    #[test]
    fn test_expansion_widens_until_target() {
        // every third candidate qualifies
        let candidates: Vec<usize> = (0..20).collect();
        let outcome: ExpansionOutcome<usize> = expand_pool(
            &candidates,
            4,
            PoolExpansion { initial: 5, step: 3 },
            |_, c| Ok::<_, ()>((c % 3 == 0).then_some(*c)),
        )
        .unwrap();
        assert_eq!(outcome.selected, vec![0, 3, 6, 9]);
        let windows: Vec<_> = outcome.steps.iter().map(|s| s.window).collect();
        assert_eq!(windows, vec![5, 8, 11]);
        assert!(outcome.reached_target());
    }

    #[test]
    fn test_expansion_matches_full_rescan() {
        let candidates: Vec<usize> = (0..37).collect();
        let qualifies = |c: usize| c % 4 == 1 || c % 7 == 0;
        let mut evaluations = 0;
        let outcome = expand_pool(&candidates, 6, PoolExpansion { initial: 4, step: 5 }, |_, c| {
            evaluations += 1;
            Ok::<_, ()>(qualifies(*c).then_some(*c))
        })
        .unwrap();

        // rescanning the final window from the top gives the same set
        let rescanned: Vec<usize> = candidates[..outcome.final_window()]
            .iter()
            .copied()
            .filter(|c| qualifies(*c))
            .take(6)
            .collect();
        assert_eq!(outcome.selected, rescanned);
        assert!(evaluations <= outcome.final_window());
    }

    #[test]
    fn test_expansion_exhausts_reference() {
        let candidates: Vec<usize> = (0..12).collect();
        let outcome = expand_pool(&candidates, 10, PoolExpansion { initial: 5, step: 5 }, |_, c| {
            Ok::<_, ()>((*c < 3).then_some(*c))
        })
        .unwrap();
        assert!(!outcome.reached_target());
        assert_eq!(outcome.final_window(), 12);
        assert_eq!(outcome.selected.len(), 3);
    }

    #[test]
    fn test_expansion_propagates_errors() {
        let candidates = vec![1, 2, 3];
        let result: Result<ExpansionOutcome<i32>, &str> =
            expand_pool(&candidates, 2, PoolExpansion { initial: 2, step: 1 }, |rank, _| {
                if rank == 1 {
                    Err("boom")
                } else {
                    Ok(None)
                }
            });
        assert_eq!(result.unwrap_err(), "boom");
    }
}

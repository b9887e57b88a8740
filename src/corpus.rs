// Copyright (c) 2025 Brian G. Milnes
// SPDX-License-Identifier: MIT

//! Corpus text extraction
//!
//! Turns question records into either a corpus-wide token multiset or one
//! token set per question, honoring exclusion rules and whole-phrase matches
//! for multi-word lemmas.

use crate::questions::QuestionRecord;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};

/// Lowercase Latin letters plus the French accented set
const LETTERS: &str = "a-záàâäéèêëíìîïóòôöúùûüýÿñçœ";

/// Which characters make up a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenPattern {
    /// Letters only; "l'homme" yields "l" and "homme"
    Plain,
    /// Letters plus inner apostrophes and hyphens; "aujourd'hui" stays whole
    Compound,
}

/// Word splitter over lowercased text
#[derive(Debug, Clone)]
pub struct Tokenizer {
    pattern: TokenPattern,
    regex: Regex,
}

impl Tokenizer {
    pub fn new(pattern: TokenPattern) -> Result<Self, regex::Error> {
        let source = match pattern {
            TokenPattern::Plain => format!(r"\b[{LETTERS}]+\b"),
            TokenPattern::Compound => format!(r"\b[{LETTERS}'\-]+\b"),
        };
        Ok(Tokenizer {
            pattern,
            regex: Regex::new(&source)?,
        })
    }

    pub fn plain() -> Result<Self, regex::Error> {
        Self::new(TokenPattern::Plain)
    }

    pub fn compound() -> Result<Self, regex::Error> {
        Self::new(TokenPattern::Compound)
    }

    pub fn pattern(&self) -> TokenPattern {
        self.pattern
    }

    /// Case-fold then split into tokens
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        self.regex
            .find_iter(&lowered)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

/// Where an exclusion applies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionScope {
    Always,
    /// Question identifiers, compared as strings
    Records(BTreeSet<String>),
}

/// A token that must not count as a match in the given scope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionRule {
    pub term: String,
    pub scope: ExclusionScope,
}

/// Exclusion rules indexed by lowercased term; rules for the same term merge
#[derive(Debug, Clone, Default)]
pub struct ExclusionSet {
    rules: HashMap<String, ExclusionScope>,
}

impl ExclusionSet {
    pub fn new(rules: &[ExclusionRule]) -> Self {
        let mut set = ExclusionSet::default();
        for rule in rules {
            set.add(rule.clone());
        }
        set
    }

    pub fn add(&mut self, rule: ExclusionRule) {
        let term = rule.term.to_lowercase();
        let merged = match (self.rules.remove(&term), rule.scope) {
            (Some(ExclusionScope::Always), _) | (_, ExclusionScope::Always) => ExclusionScope::Always,
            (Some(ExclusionScope::Records(mut a)), ExclusionScope::Records(b)) => {
                a.extend(b);
                ExclusionScope::Records(a)
            }
            (None, scope) => scope,
        };
        self.rules.insert(term, merged);
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// True when `token` must be dropped from the question keyed `question_id`
    pub fn is_excluded(&self, token: &str, question_id: &str) -> bool {
        match self.rules.get(token) {
            Some(ExclusionScope::Always) => true,
            Some(ExclusionScope::Records(ids)) => ids.contains(question_id),
            None => false,
        }
    }
}

/// Whole-phrase matcher for lemmas that word splitting cannot rebuild
#[derive(Debug, Clone, Default)]
pub struct PhraseMatcher {
    phrases: Vec<(String, Regex)>,
}

impl PhraseMatcher {
    pub fn new<S: AsRef<str>>(phrases: &[S]) -> Result<Self, regex::Error> {
        let mut compiled = Vec::with_capacity(phrases.len());
        for phrase in phrases {
            let phrase = phrase.as_ref().to_lowercase();
            let regex = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(&phrase)))?;
            compiled.push((phrase, regex));
        }
        Ok(PhraseMatcher { phrases: compiled })
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    /// Occurrence count of each phrase in `text`, zero counts omitted
    pub fn count_in(&self, text: &str) -> Vec<(&str, usize)> {
        let lowered = text.to_lowercase();
        self.phrases
            .iter()
            .filter_map(|(phrase, regex)| {
                let n = regex.find_iter(&lowered).count();
                (n > 0).then_some((phrase.as_str(), n))
            })
            .collect()
    }
}

/// Token occurrence counts across the whole corpus
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenMultiset {
    counts: HashMap<String, usize>,
    total: usize,
}

impl TokenMultiset {
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = TokenMultiset::default();
        for token in tokens {
            set.add(token.into(), 1);
        }
        set
    }

    pub fn add(&mut self, token: String, n: usize) {
        *self.counts.entry(token).or_insert(0) += n;
        self.total += n;
    }

    /// Overwrite the count of one entry, keeping the total consistent
    pub fn set_count(&mut self, token: &str, n: usize) {
        let previous = self.counts.insert(token.to_string(), n).unwrap_or(0);
        self.total = self.total - previous + n;
    }

    pub fn count(&self, token: &str) -> usize {
        self.counts.get(token).copied().unwrap_or(0)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.count(token) > 0
    }

    /// Sum of all counts
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of distinct tokens
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }
}

/// A token dropped by an exclusion rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExcludedToken {
    pub term: String,
    pub question_id: String,
}

/// Result of extracting the corpus-wide multiset
#[derive(Debug, Clone, Default)]
pub struct ExtractedCorpus {
    pub tokens: TokenMultiset,
    pub excluded: Vec<ExcludedToken>,
}

/// Tokens of one question after exclusions
fn record_tokens(
    record: &QuestionRecord,
    tokenizer: &Tokenizer,
    exclusions: &ExclusionSet,
    excluded: &mut Vec<ExcludedToken>,
) -> Vec<String> {
    let id = record.id_key();
    let mut tokens = Vec::new();
    for part in record.text_fields() {
        for token in tokenizer.tokenize(part) {
            if exclusions.is_excluded(&token, &id) {
                log::debug!("excluded '{token}' in question {id}");
                excluded.push(ExcludedToken {
                    term: token,
                    question_id: id.clone(),
                });
            } else {
                tokens.push(token);
            }
        }
    }
    tokens
}

/// Build the corpus-wide token multiset.
///
/// Phrase counts replace any single-token entry with the same text.
pub fn extract_multiset(
    questions: &[QuestionRecord],
    tokenizer: &Tokenizer,
    exclusions: &ExclusionSet,
    phrases: Option<&PhraseMatcher>,
) -> ExtractedCorpus {
    let mut corpus = ExtractedCorpus::default();
    let mut phrase_totals: Vec<(String, usize)> = Vec::new();

    for record in questions {
        for token in record_tokens(record, tokenizer, exclusions, &mut corpus.excluded) {
            corpus.tokens.add(token, 1);
        }
        if let Some(matcher) = phrases {
            for (phrase, n) in matcher.count_in(&record.joined_text()) {
                match phrase_totals.iter_mut().find(|(p, _)| p == phrase) {
                    Some((_, total)) => *total += n,
                    None => phrase_totals.push((phrase.to_string(), n)),
                }
            }
        }
    }

    for (phrase, n) in phrase_totals {
        corpus.tokens.set_count(&phrase, n);
    }
    corpus
}

/// Distinct tokens per question, for questions-containing counts
#[derive(Debug, Clone, Default)]
pub struct MembershipIndex {
    sets: Vec<HashSet<String>>,
}

impl MembershipIndex {
    pub fn build(
        questions: &[QuestionRecord],
        tokenizer: &Tokenizer,
        exclusions: &ExclusionSet,
        phrases: Option<&PhraseMatcher>,
    ) -> Self {
        let mut excluded = Vec::new();
        let sets = questions
            .iter()
            .map(|record| {
                let mut set: HashSet<String> =
                    record_tokens(record, tokenizer, exclusions, &mut excluded)
                        .into_iter()
                        .collect();
                if let Some(matcher) = phrases {
                    for (phrase, _) in matcher.count_in(&record.joined_text()) {
                        set.insert(phrase.to_string());
                    }
                }
                set
            })
            .collect();
        MembershipIndex { sets }
    }

    /// Number of questions whose token set contains `lemma`
    pub fn questions_containing(&self, lemma: &str) -> usize {
        let lemma = lemma.to_lowercase();
        self.sets.iter().filter(|set| set.contains(&lemma)).count()
    }

    pub fn contains_in(&self, question: usize, lemma: &str) -> bool {
        self.sets
            .get(question)
            .is_some_and(|set| set.contains(&lemma.to_lowercase()))
    }

    /// Number of indexed questions
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

// Copyright (c) 2025 Brian G. Milnes
// SPDX-License-Identifier: MIT

//! Noun coverage
//!
//! The reference drops blacklisted nouns and gains the hyphenated family
//! nouns ("grand-père") that the frequency export lacks. Those compounds are
//! matched as whole phrases, since word splitting breaks them apart.

use super::{scan_reference, AttentionReport, PartOfSpeech, ScanInput};
use crate::config::NounConfig;
use crate::corpus::{ExclusionSet, PhraseMatcher, Tokenizer};
use crate::error::LoadResult;
use crate::lexicon::{self, sort_by_frequency, LemmaRecord};
use crate::questions::QuestionRecord;
use std::path::Path;

/// Apply the blacklist and add missing compounds, then re-rank
pub fn prepare_reference(mut reference: Vec<LemmaRecord>, config: &NounConfig) -> Vec<LemmaRecord> {
    let before = reference.len();
    reference.retain(|r| !config.blacklist.contains(&r.lemma));
    log::debug!("noun blacklist removed {} entries", before - reference.len());

    for compound in &config.compounds {
        if !reference.iter().any(|r| &r.lemma == compound) {
            reference.push(LemmaRecord::new(compound.clone(), config.compound_frequency));
        }
    }
    sort_by_frequency(&mut reference);
    reference
}

pub fn analyze(
    questions: &[QuestionRecord],
    reference_path: &Path,
    config: &NounConfig,
    limit: usize,
) -> LoadResult<AttentionReport> {
    let reference = prepare_reference(lexicon::load_ranked(reference_path)?, config);
    scan(questions, &reference, config, limit)
}

/// Scan an already prepared reference
pub fn scan(
    questions: &[QuestionRecord],
    reference: &[LemmaRecord],
    config: &NounConfig,
    limit: usize,
) -> LoadResult<AttentionReport> {
    let tokenizer = Tokenizer::plain()?;
    let phrases = PhraseMatcher::new(&config.compounds)?;
    let exclusions = ExclusionSet::default();
    let input = ScanInput {
        questions,
        tokenizer: &tokenizer,
        exclusions: &exclusions,
        phrases: (!phrases.is_empty()).then_some(&phrases),
    };
    Ok(scan_reference(PartOfSpeech::Noun, reference, input, config.rules, limit))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(text: &str) -> QuestionRecord {
        QuestionRecord {
            question: Some(text.to_string()),
            ..QuestionRecord::default()
        }
    }

    #[test]
    fn test_blacklist_and_compounds() {
        let reference = vec![
            LemmaRecord::new("maison", 400.0),
            LemmaRecord::new("lieutenant", 90.0),
            LemmaRecord::new("grand-mère", 70.0),
            LemmaRecord::new("clé", 30.0),
        ];
        let prepared = prepare_reference(reference, &NounConfig::default());
        assert!(prepared.iter().all(|r| r.lemma != "lieutenant"));
        // existing entry keeps its own frequency
        let grand_mere = prepared.iter().find(|r| r.lemma == "grand-mère").unwrap();
        assert_eq!(grand_mere.corpus_frequency, 70.0);
        let grand_pere = prepared.iter().find(|r| r.lemma == "grand-père").unwrap();
        assert_eq!(grand_pere.corpus_frequency, 50.0);
        assert_eq!(prepared[0].lemma, "maison");
        assert_eq!(prepared[1].lemma, "grand-mère");
        // added compounds keep list order among equal frequencies
        assert_eq!(prepared[2].lemma, "grand-père");
        assert_eq!(prepared[3].lemma, "grand-parents");
    }

    #[test]
    fn test_compound_nouns_found_in_questions() {
        let mut questions = vec![q("Mon grand-père habite ici."), q("La maison est grande.")];
        for _ in 0..8 {
            questions.push(q("Bonjour"));
        }
        let reference = vec![LemmaRecord::new("grand-père", 50.0), LemmaRecord::new("voiture", 40.0)];
        let mut config = NounConfig::default();
        config.rules.questions_containing.threshold = 5.0;
        let report = scan(&questions, &reference, &config, 10).unwrap();
        // grand-père is in 1 of 10 questions (10%), above the threshold
        let lemmas: Vec<_> = report.results.iter().map(|r| r.lemma.as_str()).collect();
        assert_eq!(lemmas, vec!["voiture"]);
        assert_eq!(report.denominator, 10);
    }
}

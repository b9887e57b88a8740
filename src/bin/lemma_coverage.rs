// Copyright (c) 2025 Brian G. Milnes
// SPDX-License-Identifier: MIT

//! Unified lemma coverage report
//!
//! Runs every analysis over the compiled question bank: verb conjugations
//! (dynamic pool expansion), adverbs, adjectives, nouns, tags, question
//! statistics and verification status. A missing reference source marks its
//! section unavailable; the rest of the report still runs.
//!
//! Binary: lemmacov-coverage

use anyhow::Result;
use clap::Parser;
use lemmacov::pos::{adjectives, adverbs, nouns, verbs, AnalysisOutcome, PartOfSpeech, RunSummary};
use lemmacov::report::{configure_color, init_logging, Printer, Status};
use lemmacov::stats::QuestionStats;
use lemmacov::tags::summarize_tags;
use lemmacov::{sections, CommonArgs, QuestionBank};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "lemmacov-coverage")]
#[command(about = "Unified French lemma coverage analyzer for the question bank")]
struct Args {
    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> Result<()> {
    let start = Instant::now();
    let args = Args::parse();
    init_logging();
    configure_color(args.common.no_color);

    let config = args.common.load_config()?;
    let paths = args.common.paths();
    let limit = args.common.limit;
    let rows = config.display_rows;
    let mut p = Printer::stdout();

    sections::header(&mut p, "🔍 Unified French Lemma Coverage Analyzer")?;

    let bank = QuestionBank::load(&args.common.question_files());
    sections::loaded_questions(&mut p, &bank)?;
    if bank.is_empty() {
        p.status(Status::Miss, "No questions found")?;
        p.flush()?;
        std::process::exit(1);
    }
    let questions = &bank.questions;
    let mut summary = RunSummary::default();

    // ========================================================================
    // Verb conjugations
    // ========================================================================
    p.heading("VERB CONJUGATION ANALYSIS")?;
    let verb_run = AnalysisOutcome::from_result(
        "verb conjugations",
        verbs::analyze(questions, &paths.lexique, &config.conjugations),
    );
    match &verb_run {
        AnalysisOutcome::Complete(run) => {
            sections::blacklisted_tokens(&mut p, &run.corpus.excluded)?;
            sections::verb_selection(&mut p, &run.selection)?;
            if run.selection.verbs().is_empty() {
                p.status(Status::Miss, "No verbs need attention")?;
            } else {
                sections::missing_conjugates(
                    &mut p,
                    run.selection.verbs().len(),
                    &run.missing,
                    &config.conjugations,
                    rows,
                )?;
            }
        }
        AnalysisOutcome::Unavailable(e) => sections::unavailable(&mut p, "verb", e)?,
    }
    summary.record("verb conjugations", &verb_run);

    // ========================================================================
    // Adverbs, adjectives, nouns
    // ========================================================================
    let adverb_run = AnalysisOutcome::from_result(
        "adverbs",
        adverbs::analyze(questions, &paths.adverbs, &config.adverbs, limit),
    );
    sections::attention_outcome(&mut p, PartOfSpeech::Adverb, &adverb_run, rows)?;
    summary.record("adverbs", &adverb_run);

    let adjective_run = AnalysisOutcome::from_result(
        "adjectives",
        adjectives::analyze(questions, &paths.adjectives, &config.adjectives, limit),
    );
    sections::attention_outcome(&mut p, PartOfSpeech::Adjective, &adjective_run, rows)?;
    summary.record("adjectives", &adjective_run);

    let noun_run = AnalysisOutcome::from_result(
        "nouns",
        nouns::analyze(questions, &paths.nouns, &config.nouns, limit),
    );
    sections::attention_outcome(&mut p, PartOfSpeech::Noun, &noun_run, rows)?;
    summary.record("nouns", &noun_run);

    // ========================================================================
    // Tags and question metadata
    // ========================================================================
    let tag_limit = config.tags.report_limit;
    sections::tag_summary(&mut p, &summarize_tags(questions, tag_limit), tag_limit)?;

    let stats = QuestionStats::collect(questions);
    sections::question_stats(&mut p, &stats)?;
    sections::verification(&mut p, &stats)?;

    sections::completion(&mut p, &summary)?;
    p.line(&format!("\nCompleted in {}ms", start.elapsed().as_millis()))?;
    p.flush()?;
    Ok(())
}

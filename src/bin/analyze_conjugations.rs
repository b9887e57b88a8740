// Copyright (c) 2025 Brian G. Milnes
// SPDX-License-Identifier: MIT

//! Per-verb conjugation coverage
//!
//! For each of the most frequent Lexique verbs, lists which conjugated forms
//! the question bank uses and which high-frequency forms are missing.
//!
//! Binary: lemmacov-conjugations

use anyhow::Result;
use clap::Parser;
use lemmacov::lexique::LexiqueDb;
use lemmacov::pos::verbs::{conjugation_report, verb_corpus};
use lemmacov::pos::{AnalysisOutcome, RunSummary};
use lemmacov::report::{configure_color, init_logging, Printer, Status};
use lemmacov::{sections, CommonArgs, LoadResult, QuestionBank};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "lemmacov-conjugations")]
#[command(about = "Conjugation coverage of the most frequent French verbs")]
struct Args {
    #[command(flatten)]
    common: CommonArgs,

    /// Number of top verbs to examine (default from config: 25)
    #[arg(long)]
    verbs: Option<usize>,
}

fn main() -> Result<()> {
    let start = Instant::now();
    let args = Args::parse();
    init_logging();
    configure_color(args.common.no_color);

    let config = args.common.load_config()?;
    let paths = args.common.paths();
    let top = args.verbs.unwrap_or(config.conjugations.report_verbs);
    let mut p = Printer::stdout();

    sections::header(&mut p, "🔍 French Conjugation Coverage Analyzer")?;

    let bank = QuestionBank::load(&args.common.question_files());
    sections::loaded_questions(&mut p, &bank)?;
    if bank.is_empty() {
        p.status(Status::Miss, "No questions found")?;
        p.flush()?;
        std::process::exit(1);
    }

    let run = AnalysisOutcome::from_result(
        "verb conjugations",
        (|| -> LoadResult<_> {
            let corpus = verb_corpus(&bank.questions, &config.conjugations)?;
            let db = LexiqueDb::open(&paths.lexique)?;
            let report = conjugation_report(&db, top, &corpus.tokens)?;
            Ok((corpus, report))
        })(),
    );

    match &run {
        AnalysisOutcome::Complete((corpus, report)) => {
            sections::blacklisted_tokens(&mut p, &corpus.excluded)?;
            if report.verbs.is_empty() {
                p.status(Status::Miss, "No verbs with a positive frequency in Lexique")?;
            } else {
                sections::conjugation_detail(&mut p, report, config.conjugations.missing_per_verb)?;
            }
        }
        AnalysisOutcome::Unavailable(e) => sections::unavailable(&mut p, "verb", e)?,
    }

    let mut summary = RunSummary::default();
    summary.record("verb conjugations", &run);
    sections::completion(&mut p, &summary)?;
    p.line(&format!("\nCompleted in {}ms", start.elapsed().as_millis()))?;
    p.flush()?;
    Ok(())
}

// Copyright (c) 2025 Brian G. Milnes
// SPDX-License-Identifier: MIT

//! Adjective coverage
//!
//! Scans the frequency-ranked adjective list for lemmas below the coverage
//! threshold, then checks every gender/number form of the top adjectives.
//!
//! Binary: lemmacov-adjectives

use anyhow::Result;
use clap::Parser;
use lemmacov::coverage::CoverageMetric;
use lemmacov::pos::adjectives::{self, corpus_tokens, form_report};
use lemmacov::pos::{AnalysisOutcome, RunSummary};
use lemmacov::report::{configure_color, init_logging, Printer, Status};
use lemmacov::{sections, CommonArgs, LoadResult, QuestionBank};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "lemmacov-adjectives")]
#[command(about = "High-frequency French adjectives missing from the question bank")]
struct Args {
    #[command(flatten)]
    common: CommonArgs,

    /// Coverage metric for the needs-attention scan
    #[arg(long, value_enum)]
    metric: Option<CoverageMetric>,

    /// Attention threshold in percent for the selected metric
    #[arg(long)]
    threshold: Option<f64>,

    /// Adjectives examined form by form (default from config: 150)
    #[arg(long)]
    forms: Option<usize>,
}

fn main() -> Result<()> {
    let start = Instant::now();
    let args = Args::parse();
    init_logging();
    configure_color(args.common.no_color);

    let config = args.common.load_config()?;
    let paths = args.common.paths();
    let mut rules = config.adjectives.rules;
    if let Some(metric) = args.metric {
        rules = rules.with_metric(metric);
    }
    if let Some(threshold) = args.threshold {
        rules = rules.with_threshold(threshold);
    }
    let form_limit = args.forms.unwrap_or(config.adjectives.form_report_limit);
    let mut p = Printer::stdout();

    sections::header(&mut p, "🔍 French Adjective Coverage Analyzer")?;

    let bank = QuestionBank::load(&args.common.question_files());
    sections::loaded_questions(&mut p, &bank)?;
    if bank.is_empty() {
        p.status(Status::Miss, "No questions found")?;
        p.flush()?;
        std::process::exit(1);
    }

    let run = AnalysisOutcome::from_result(
        "adjectives",
        (|| -> LoadResult<_> {
            let groups = adjectives::load_reference(&paths.adjectives)?;
            let scan = adjectives::scan(&bank.questions, &groups, rules, args.common.limit)?;
            let forms = form_report(&groups, &corpus_tokens(&bank.questions)?, form_limit);
            Ok((scan, forms))
        })(),
    );

    match &run {
        AnalysisOutcome::Complete((scan, forms)) => {
            sections::attention_table(&mut p, scan, args.common.limit)?;
            sections::adjective_forms(&mut p, forms)?;
        }
        AnalysisOutcome::Unavailable(e) => sections::unavailable(&mut p, "adjective", e)?,
    }

    let mut summary = RunSummary::default();
    summary.record("adjectives", &run);
    sections::completion(&mut p, &summary)?;
    p.line(&format!("\nCompleted in {}ms", start.elapsed().as_millis()))?;
    p.flush()?;
    Ok(())
}

// Copyright (c) 2025 Brian G. Milnes
// SPDX-License-Identifier: MIT

//! Adverb coverage
//!
//! Scans the frequency-ranked adverb list for adverbs below the usage
//! threshold, then reports corpus usage of each of the top adverbs.
//! Compound adverbs ("à tâtons", "peut-être") are matched whole.
//!
//! Binary: lemmacov-adverbs

use anyhow::Result;
use clap::Parser;
use lemmacov::coverage::CoverageMetric;
use lemmacov::lexicon;
use lemmacov::pos::adverbs::{self, usage_report};
use lemmacov::pos::{AnalysisOutcome, RunSummary};
use lemmacov::report::{configure_color, init_logging, Printer, Status};
use lemmacov::{sections, CommonArgs, LoadResult, QuestionBank};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "lemmacov-adverbs")]
#[command(about = "High-frequency French adverbs missing from the question bank")]
struct Args {
    #[command(flatten)]
    common: CommonArgs,

    /// Coverage metric for the needs-attention scan
    #[arg(long, value_enum)]
    metric: Option<CoverageMetric>,

    /// Attention threshold in percent for the selected metric
    #[arg(long)]
    threshold: Option<f64>,
}

fn main() -> Result<()> {
    let start = Instant::now();
    let args = Args::parse();
    init_logging();
    configure_color(args.common.no_color);

    let mut config = args.common.load_config()?.adverbs;
    if let Some(metric) = args.metric {
        config.rules = config.rules.with_metric(metric);
    }
    if let Some(threshold) = args.threshold {
        config.rules = config.rules.with_threshold(threshold);
    }
    let paths = args.common.paths();
    let limit = args.common.limit;
    let mut p = Printer::stdout();

    sections::header(&mut p, "🔍 French Adverb Coverage Analyzer")?;

    let bank = QuestionBank::load(&args.common.question_files());
    sections::loaded_questions(&mut p, &bank)?;
    if bank.is_empty() {
        p.status(Status::Miss, "No questions found")?;
        p.flush()?;
        std::process::exit(1);
    }

    let run = AnalysisOutcome::from_result(
        "adverbs",
        (|| -> LoadResult<_> {
            let reference = lexicon::load_ranked(&paths.adverbs)?;
            let scan = adverbs::scan(&bank.questions, &reference, &config, limit)?;
            let usage = usage_report(&bank.questions, &reference, &config, limit)?;
            Ok((scan, usage))
        })(),
    );

    match &run {
        AnalysisOutcome::Complete((scan, usage)) => {
            sections::attention_table(&mut p, scan, limit)?;
            sections::adverb_usage(&mut p, usage)?;
        }
        AnalysisOutcome::Unavailable(e) => sections::unavailable(&mut p, "adverb", e)?,
    }

    let mut summary = RunSummary::default();
    summary.record("adverbs", &run);
    sections::completion(&mut p, &summary)?;
    p.line(&format!("\nCompleted in {}ms", start.elapsed().as_millis()))?;
    p.flush()?;
    Ok(())
}

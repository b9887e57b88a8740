// Copyright (c) 2025 Brian G. Milnes
// SPDX-License-Identifier: MIT

//! Tag co-occurrence network
//!
//! Counts tags and tag pairs over the question bank, prints the strongest
//! connections and the category distribution, and writes the graph as JSON
//! (`nodes` with id/size/category, `links` with source/target/weight).
//!
//! Binary: lemmacov-tag-network

use anyhow::{Context, Result};
use clap::Parser;
use lemmacov::report::{configure_color, init_logging, Printer, Status};
use lemmacov::tags::{Cooccurrence, TagNetwork};
use lemmacov::{sections, CommonArgs, QuestionBank};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "lemmacov-tag-network")]
#[command(about = "Tag co-occurrence analysis and network export")]
struct Args {
    #[command(flatten)]
    common: CommonArgs,

    /// Output JSON file for the network visualizer
    #[arg(short = 'o', long, default_value = "util/tag-network-data.json")]
    output: PathBuf,
}

fn main() -> Result<()> {
    let start = Instant::now();
    let args = Args::parse();
    init_logging();
    configure_color(args.common.no_color);

    let config = args.common.load_config()?.tags;
    let mut p = Printer::stdout();

    sections::header(&mut p, "🏷️  Tag Co-occurrence Network Analyzer")?;

    let bank = QuestionBank::load(&args.common.question_files());
    sections::loaded_questions(&mut p, &bank)?;
    if bank.is_empty() {
        p.status(Status::Miss, "No questions loaded!")?;
        p.flush()?;
        std::process::exit(1);
    }

    let cooccurrence = Cooccurrence::build(&bank.questions);
    sections::tag_network(&mut p, &cooccurrence, config.network_top)?;

    let network = TagNetwork::build(&cooccurrence, config.min_tag_frequency, config.min_pair_frequency);
    if let Some(parent) = args.output.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    let json = network.to_json().context("Failed to serialize tag network")?;
    fs::write(&args.output, json)
        .with_context(|| format!("Failed to write tag network: {}", args.output.display()))?;
    sections::network_saved(&mut p, &args.output, &network)?;

    p.line(&format!("\nCompleted in {}ms", start.elapsed().as_millis()))?;
    p.flush()?;
    Ok(())
}

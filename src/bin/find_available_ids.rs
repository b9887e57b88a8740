// Copyright (c) 2025 Brian G. Milnes
// SPDX-License-Identifier: MIT

//! Free question identifiers
//!
//! Collects identifiers from the compiled question files and the individual
//! source questions, then lists unused identifiers in each proficiency band.
//! Read-only.
//!
//! Binary: lemmacov-available-ids

use anyhow::Result;
use clap::Parser;
use lemmacov::ids::{availability, collect_ids};
use lemmacov::report::{configure_color, init_logging, Printer, Status};
use lemmacov::{sections, CommonArgs};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "lemmacov-available-ids")]
#[command(about = "List unused question identifiers per CEFR band")]
struct Args {
    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> Result<()> {
    let start = Instant::now();
    let args = Args::parse();
    init_logging();
    configure_color(args.common.no_color);

    let paths = args.common.paths();
    let mut p = Printer::stdout();

    let existing = collect_ids(&args.common.question_files(), &paths.source_dir());
    for (path, error) in &existing.unreadable {
        let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        p.status(Status::Warn, &format!("Could not read {name}"))?;
        log::debug!("{error}");
    }
    sections::available_ids(&mut p, existing.ids.len(), &availability(&existing.ids))?;

    p.line(&format!("\nCompleted in {}ms", start.elapsed().as_millis()))?;
    p.flush()?;
    Ok(())
}

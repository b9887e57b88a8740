// Copyright (c) 2025 Brian G. Milnes
// SPDX-License-Identifier: MIT

//! Report sections shared by the lemmacov binaries
//!
//! Each function renders one block of console output from an analysis
//! result. Nothing here computes coverage.

use crate::args::format_number;
use crate::config::ConjugationConfig;
use crate::corpus::ExcludedToken;
use crate::coverage::CoverageMetric;
use crate::error::LoadError;
use crate::ids::{BandAvailability, SHOWN_IDS};
use crate::pos::adjectives::FormReport;
use crate::pos::adverbs::UsageReport;
use crate::pos::verbs::{ConjugationReport, MissingConjugates, VerbSelection};
use crate::pos::{AnalysisOutcome, AttentionReport, PartOfSpeech, RunSummary};
use crate::questions::QuestionBank;
use crate::report::{CoverageBand, Printer, Status};
use crate::stats::QuestionStats;
use crate::tags::{Cooccurrence, TagNetwork, TagSummary};
use colored::Colorize;
use std::io::{self, Write};

/// Found forms listed per adjective
const FOUND_FORMS_SHOWN: usize = 5;

/// Missing forms listed per adjective
const MISSING_FORMS_SHOWN: usize = 8;

/// Isolated tags per output row
const ISOLATED_COLUMNS: usize = 4;

// ============================================================================
// Run framing
// ============================================================================

pub fn header<W: Write>(p: &mut Printer<W>, title: &str) -> io::Result<()> {
    p.title(title)?;
    let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S %Z");
    p.line(&format!("Generated: {timestamp}"))
}

/// Per-file load results and the overall question count
pub fn loaded_questions<W: Write>(p: &mut Printer<W>, bank: &QuestionBank) -> io::Result<()> {
    for file in &bank.files {
        let name = file
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.path.display().to_string());
        p.status(Status::Ok, &format!("Loaded {} questions from {name}", file.question_count))?;
        if let Some(meta) = &file.metadata {
            p.line(&format!(
                "   📊 Compiled: {}",
                meta.compiled_at.as_deref().unwrap_or("unknown")
            ))?;
            p.line(&format!(
                "   📈 Sources: {} original + {} individual",
                meta.original_questions.unwrap_or(0),
                meta.source_questions.unwrap_or(0)
            ))?;
        }
    }
    for failure in bank.failures.iter().filter(|e| !e.is_not_found()) {
        p.status(Status::Warn, &failure.to_string())?;
    }

    if bank.files.is_empty() {
        p.status(Status::Miss, "Failed to load question files")
    } else {
        p.note(&format!(
            "📊 Loaded {} questions from {} files",
            format_number(bank.len()),
            bank.files.len()
        ))
    }
}

pub fn unavailable<W: Write>(p: &mut Printer<W>, what: &str, error: &LoadError) -> io::Result<()> {
    p.status(Status::Miss, &format!("Cannot proceed without {what} data"))?;
    p.line(&format!("   {error}"))
}

/// Unavailable sections, then the completion marker
pub fn completion<W: Write>(p: &mut Printer<W>, summary: &RunSummary) -> io::Result<()> {
    let unavailable = summary.unavailable();
    p.blank()?;
    if !unavailable.is_empty() {
        p.status(
            Status::Warn,
            &format!(
                "{} of {} sections unavailable:",
                unavailable.len(),
                summary.sections().len()
            ),
        )?;
        for (section, reason) in unavailable {
            p.line(&format!("   {section}: {reason}"))?;
        }
    }
    p.status(Status::Ok, "Analysis complete!")
}

// ============================================================================
// Verb conjugations
// ============================================================================

pub fn blacklisted_tokens<W: Write>(p: &mut Printer<W>, excluded: &[ExcludedToken]) -> io::Result<()> {
    for token in excluded {
        p.status(
            Status::Warn,
            &format!(
                "Blacklisted '{}' in question {} (not a conjugate)",
                token.term, token.question_id
            ),
        )?;
    }
    Ok(())
}

/// Window-by-window progress of the dynamic verb pool
pub fn verb_selection<W: Write>(p: &mut Printer<W>, selection: &VerbSelection) -> io::Result<()> {
    let outcome = &selection.outcome;
    p.note(&format!(
        "🔄 Dynamic verb pool expansion (targeting {} verbs needing attention)...",
        outcome.target
    ))?;
    for (i, step) in outcome.steps.iter().enumerate() {
        p.line(&format!("📊 Checking coverage for top {} verbs...", step.window).yellow().to_string())?;
        if let Some(next) = outcome.steps.get(i + 1) {
            p.line(
                &format!(
                    "🔄 Only found {} verbs needing attention, expanding pool from {} to {}...",
                    step.qualifying, step.window, next.window
                )
                .yellow()
                .to_string(),
            )?;
        }
    }
    if outcome.reached_target() {
        p.status(
            Status::Ok,
            &format!(
                "Found {} verbs needing attention from pool of {}",
                outcome.selected.len(),
                outcome.final_window()
            ),
        )
    } else {
        p.status(
            Status::Warn,
            &format!(
                "Only found {} verbs needing attention (out of {} total verbs)",
                outcome.selected.len(),
                format_number(selection.total_verbs())
            ),
        )
    }
}

pub fn missing_conjugates<W: Write>(
    p: &mut Printer<W>,
    verb_count: usize,
    missing: &MissingConjugates,
    config: &ConjugationConfig,
    rows: usize,
) -> io::Result<()> {
    p.note(&format!(
        "📊 Analyzing {verb_count} verbs needing attention for conjugation coverage..."
    ))?;
    p.blank()?;
    p.note(&format!(
        "📋 Analyzing {verb_count} verbs needing attention ({}{}% coverage)",
        config.rule.symbol(),
        config.rule.threshold
    ))?;
    if missing.filtered > 0 {
        p.note(&format!("🚫 Filtered out {} literary/rare forms", missing.filtered))?;
    }

    p.subheading("🎯 PRIORITIZED MISSING CONJUGATES:")?;
    p.note("   (Sorted by Lexique frequency)")?;
    p.rule(50)?;
    for (i, form) in missing.forms.iter().take(rows).enumerate() {
        p.line(&format!(
            "   {:2}. {:15} - freq: {:6.1} ({:5.3}%) ({}, {})",
            i + 1,
            form.form,
            form.frequency,
            form.percentage,
            form.verb,
            form.category
        ))?;
    }
    Ok(())
}

/// Per-verb found and missing forms for the top verbs
pub fn conjugation_detail<W: Write>(
    p: &mut Printer<W>,
    report: &ConjugationReport,
    missing_shown: usize,
) -> io::Result<()> {
    p.blank()?;
    p.title("📊 CONJUGATION COVERAGE ANALYSIS")?;

    for entry in &report.verbs {
        p.blank()?;
        p.line(
            &format!("🔍 {:2}. {} (Rank #{})", entry.rank, entry.verb.to_uppercase(), entry.rank)
                .bold()
                .blue()
                .to_string(),
        )?;
        p.line(&"-".repeat(50))?;

        let Some(coverage) = &entry.coverage else {
            p.line(&format!("   {} No conjugated forms found in database", Status::Miss.marker()))?;
            continue;
        };
        p.line(&format!(
            "   {} FOUND FORMS: {} forms found in questions",
            Status::Ok.marker(),
            coverage.found_count()
        ))?;
        p.line(&format!(
            "   {} MISSING FORMS ({}) - Top by frequency:",
            Status::Miss.marker(),
            coverage.missing.len()
        ))?;
        for form in coverage.missing.iter().take(missing_shown) {
            p.line(&format!(
                "      {:12} ({:15}) - freq: {:6.1}",
                form.form, form.category, form.frequency
            ))?;
        }
        if coverage.missing.len() > missing_shown {
            p.line(&format!(
                "      ... and {} more missing forms",
                coverage.missing.len() - missing_shown
            ))?;
        }
        p.line(&format!(
            "   📈 Coverage: {}/{} forms ({:.1}%)",
            coverage.found_count(),
            coverage.total_forms,
            coverage.coverage_percentage
        ))?;
    }

    p.blank()?;
    p.title("📊 OVERALL CONJUGATION COVERAGE SUMMARY")?;
    p.line(&format!(
        "Average coverage across top {} verbs: {:.1}%",
        report.verbs.len(),
        report.average_coverage()
    ))?;
    p.blank()?;
    p.line("🎯 COVERAGE BY VERB:")?;
    for (entry, coverage) in report.covered() {
        p.line(&format!(
            "  {} {:12} {:2}/{:2} ({:5.1}%)",
            CoverageBand::of(coverage.coverage_percentage).symbol(),
            entry.verb,
            coverage.found_count(),
            coverage.total_forms,
            coverage.coverage_percentage
        ))?;
    }

    let priorities = report.priorities();
    if !priorities.is_empty() {
        p.blank()?;
        p.line("🚨 PRIORITY VERBS NEEDING MORE CONJUGATIONS:")?;
        for (entry, coverage) in priorities {
            p.line(&format!(
                "   {:12} - only {:4.1}% coverage",
                entry.verb, coverage.coverage_percentage
            ))?;
        }
    }
    Ok(())
}

// ============================================================================
// Lemma-level needs-attention lists
// ============================================================================

/// Needs-attention list of one part of speech, under its own heading
pub fn attention_report<W: Write>(p: &mut Printer<W>, report: &AttentionReport, rows: usize) -> io::Result<()> {
    let plural = report.pos.plural();
    p.heading(&format!("{} ANALYSIS", report.pos.to_string().to_uppercase()))?;

    let scale = match report.metric {
        CoverageMetric::WordPercentage => format!(
            "{}% threshold, {} words",
            report.rule.threshold,
            format_number(report.denominator)
        ),
        CoverageMetric::QuestionsContaining => format!(
            "{}% question coverage threshold, {} questions",
            report.rule.threshold,
            format_number(report.denominator)
        ),
    };
    p.note(&format!("📊 Analyzing {plural} needing attention (below {scale})..."))?;

    if report.is_empty() {
        p.status(Status::Ok, &format!("All {plural} are well-represented!"))?;
        return Ok(());
    }

    p.subheading(&format!("🎯 PRIORITIZED MISSING {}:", plural.to_uppercase()))?;
    match report.metric {
        CoverageMetric::WordPercentage => {
            p.note("   (Sorted by Lexique frequency)")?;
            p.rule(50)?;
        }
        CoverageMetric::QuestionsContaining => {
            p.note("   (Sorted by Lexique frequency, showing question coverage)")?;
            p.rule(65)?;
        }
    }

    for (i, result) in report.results.iter().take(rows).enumerate() {
        let marker = Status::found(result.match_count).marker();
        let line = match report.metric {
            CoverageMetric::WordPercentage => format!(
                "   {:2}. {:15} - freq: {:6.1} ({:6.4}%) {marker}",
                i + 1,
                result.lemma,
                result.corpus_frequency,
                result.coverage_percentage
            ),
            CoverageMetric::QuestionsContaining if report.pos == PartOfSpeech::Noun => format!(
                "   {:2}. {:15} - freq: {:6.1} ({:2} questions, {:4.3}%) {marker}",
                i + 1,
                result.lemma,
                result.corpus_frequency,
                result.match_count,
                result.coverage_percentage
            ),
            CoverageMetric::QuestionsContaining => format!(
                "   {:2}. {:15} - freq: {:6.1} ({:2} questions, {:6.4}%) {marker}",
                i + 1,
                result.lemma,
                result.corpus_frequency,
                result.match_count,
                result.coverage_percentage
            ),
        };
        p.line(&line)?;
    }
    Ok(())
}

/// Needs-attention list, or the reason it could not be produced
pub fn attention_outcome<W: Write>(
    p: &mut Printer<W>,
    pos: PartOfSpeech,
    outcome: &AnalysisOutcome<AttentionReport>,
    rows: usize,
) -> io::Result<()> {
    match outcome {
        AnalysisOutcome::Complete(report) => attention_report(p, report, rows),
        AnalysisOutcome::Unavailable(e) => {
            p.heading(&format!("{} ANALYSIS", pos.to_string().to_uppercase()))?;
            unavailable(p, &pos.to_string(), e)
        }
    }
}

/// Ranked scan table: global rank, corpus frequency, coverage, status
pub fn attention_table<W: Write>(p: &mut Printer<W>, report: &AttentionReport, target: usize) -> io::Result<()> {
    let plural = report.pos.plural();
    p.blank()?;
    p.line(&format!("🎯 TOP {target} HIGH-FREQUENCY {} NEEDING ATTENTION:", plural.to_uppercase()))?;
    let unit = match report.metric {
        CoverageMetric::WordPercentage => "total word instances",
        CoverageMetric::QuestionsContaining => "questions",
    };
    p.line(&format!(
        "     (Scanning the reference for {target} {plural} with coverage {} {}% - based on {} {unit})",
        if report.rule.inclusive { "<=" } else { "<" },
        report.rule.threshold,
        format_number(report.denominator)
    ))?;
    let name = report.pos.to_string();
    let name = format!("{}{}", name[..1].to_uppercase(), &name[1..]);
    p.line(&format!("     {:15}   {:>8}   {:>7}   Status", name, "Corpus", "%"))?;
    p.line(&format!("     {}   {}   {}   ------", "-".repeat(15), "-".repeat(8), "-".repeat(7)))?;

    for result in &report.results {
        p.line(&format!(
            "{:3}. {:15} - {:7.1}   {:6.3}   {}",
            result.rank,
            result.lemma,
            result.corpus_frequency,
            result.coverage_percentage,
            Status::found(result.match_count).marker()
        ))?;
    }

    if report.is_empty() {
        p.line(&format!("     🎉 All {plural} are well-represented!"))?;
    } else if report.results.len() < target {
        p.line(&format!(
            "     (Found only {} {plural} needing attention in entire reference of {})",
            report.results.len(),
            format_number(report.reference_len)
        ))?;
    }
    Ok(())
}

// ============================================================================
// Adverb usage and adjective forms
// ============================================================================

pub fn adverb_usage<W: Write>(p: &mut Printer<W>, report: &UsageReport) -> io::Result<()> {
    p.blank()?;
    p.title("📊 ADVERB COVERAGE ANALYSIS")?;
    for adverb in &report.adverbs {
        p.blank()?;
        p.line(&format!("🔍 {:2}. {} (Rank #{})", adverb.rank, adverb.lemma.to_uppercase(), adverb.rank))?;
        p.line(&"-".repeat(50))?;
        p.line(&format!("   📊 Corpus frequency: {:7.1}", adverb.frequency))?;
        p.line(&format!(
            "   📝 Question usage: {} times ({:.4}% of all words)",
            adverb.usage, adverb.percentage
        ))?;
        let (status, label) = if adverb.usage > 0 {
            (Status::Ok, "FOUND")
        } else {
            (Status::Miss, "MISSING")
        };
        p.line(&format!("   {} {label}", status.marker()))?;
    }

    p.blank()?;
    p.title("📊 OVERALL ADVERB COVERAGE SUMMARY")?;
    p.line(&format!(
        "Coverage: {}/{} adverbs found ({:.1}%)",
        report.found(),
        report.adverbs.len(),
        report.found_percentage()
    ))?;
    p.blank()?;
    p.line("🎯 COVERAGE BY ADVERB:")?;
    for adverb in &report.adverbs {
        let band = if adverb.usage > 0 { CoverageBand::High } else { CoverageBand::Low };
        p.line(&format!(
            "  {} {:15} - used {:2} times ({:5.3}%) - freq: {:7.1}",
            band.symbol(),
            adverb.lemma,
            adverb.usage,
            adverb.percentage,
            adverb.frequency
        ))?;
    }

    let missing = report.missing();
    if !missing.is_empty() {
        p.blank()?;
        p.line("🚨 HIGH-FREQUENCY ADVERBS COMPLETELY MISSING:")?;
        for adverb in missing {
            p.line(&format!(
                "   {:15} - rank #{:2}, freq: {:7.1}",
                adverb.lemma, adverb.rank, adverb.frequency
            ))?;
        }
    }

    let used = report.well_represented();
    if !used.is_empty() {
        p.blank()?;
        p.line("✅ WELL-REPRESENTED ADVERBS:")?;
        for adverb in used {
            p.line(&format!(
                "   {:15} - used {:2} times, rank #{:2}, freq: {:7.1}",
                adverb.lemma, adverb.usage, adverb.rank, adverb.frequency
            ))?;
        }
    }
    Ok(())
}

pub fn adjective_forms<W: Write>(p: &mut Printer<W>, report: &FormReport) -> io::Result<()> {
    p.blank()?;
    p.title("📊 ADJECTIVE COVERAGE ANALYSIS")?;

    for entry in &report.entries {
        let coverage = &entry.coverage;
        p.blank()?;
        p.line(&format!("🔍 {:2}. {} (Rank #{})", entry.rank, entry.lemma.to_uppercase(), entry.rank))?;
        p.line(&"-".repeat(50))?;

        p.line(&format!(
            "   {} FOUND FORMS: {} forms found in questions",
            Status::Ok.marker(),
            coverage.found_count()
        ))?;
        for hit in coverage.found.iter().take(FOUND_FORMS_SHOWN) {
            p.line(&format!(
                "      {:12} ({:4}) - used {:2} times, freq: {:6.1}",
                hit.form,
                category_label(&hit.category),
                hit.usage,
                hit.frequency
            ))?;
        }
        if coverage.found_count() > FOUND_FORMS_SHOWN {
            p.line(&format!(
                "      ... and {} more found forms",
                coverage.found_count() - FOUND_FORMS_SHOWN
            ))?;
        }

        p.line(&format!(
            "   {} MISSING FORMS ({}) - Top by frequency:",
            Status::Miss.marker(),
            coverage.missing.len()
        ))?;
        for form in coverage.missing.iter().take(MISSING_FORMS_SHOWN) {
            p.line(&format!(
                "      {:12} ({:4}) - freq: {:6.1}",
                form.form,
                category_label(&form.category),
                form.frequency
            ))?;
        }
        if coverage.missing.len() > MISSING_FORMS_SHOWN {
            p.line(&format!(
                "      ... and {} more missing forms",
                coverage.missing.len() - MISSING_FORMS_SHOWN
            ))?;
        }
        p.line(&format!(
            "   📈 Coverage: {}/{} forms ({:.1}%)",
            coverage.found_count(),
            coverage.total_forms,
            coverage.coverage_percentage
        ))?;
    }

    p.blank()?;
    p.title("📊 OVERALL ADJECTIVE COVERAGE SUMMARY")?;
    p.line(&format!(
        "Average coverage across top {} adjectives: {:.1}%",
        report.entries.len(),
        report.average_coverage()
    ))?;
    p.blank()?;
    p.line("🎯 COVERAGE BY ADJECTIVE:")?;
    for entry in &report.entries {
        let coverage = &entry.coverage;
        p.line(&format!(
            "  {} {:15} {:2}/{:2} ({:5.1}%) - freq: {:6.1}",
            CoverageBand::of(coverage.coverage_percentage).symbol(),
            entry.lemma,
            coverage.found_count(),
            coverage.total_forms,
            coverage.coverage_percentage,
            entry.max_frequency
        ))?;
    }

    let priorities = report.priorities();
    if !priorities.is_empty() {
        p.blank()?;
        p.line("🚨 PRIORITY ADJECTIVES NEEDING MORE COVERAGE:")?;
        for entry in priorities {
            p.line(&format!(
                "   {:15} - only {:4.1}% coverage, freq: {:6.1}",
                entry.lemma, entry.coverage.coverage_percentage, entry.max_frequency
            ))?;
        }
    }

    let missing = report.completely_missing();
    if !missing.is_empty() {
        p.blank()?;
        p.line("🚨 HIGH-FREQUENCY ADJECTIVES COMPLETELY MISSING:")?;
        for entry in missing {
            p.line(&format!("   {:15} - freq: {:6.1} (0% coverage)", entry.lemma, entry.max_frequency))?;
        }
    }
    Ok(())
}

fn category_label(category: &str) -> &str {
    if category.is_empty() {
        "base"
    } else {
        category
    }
}

// ============================================================================
// Tags and question metadata
// ============================================================================

pub fn tag_summary<W: Write>(p: &mut Printer<W>, summary: &TagSummary, limit: usize) -> io::Result<()> {
    p.heading("TAG ANALYSIS")?;
    if summary.top.is_empty() {
        return p.status(Status::Miss, "No tags found in questions");
    }
    p.note(&format!(
        "📊 Analyzing tag usage across {} questions...",
        format_number(summary.total_questions)
    ))?;

    p.subheading(&format!("🎯 TOP {limit} WELL-REPRESENTED TOPICS:"))?;
    p.note("   (Most frequently used content tags)")?;
    p.rule(50)?;
    for (i, tag) in summary.top.iter().enumerate() {
        p.line(&format!(
            "   {:2}. {:20} - {:3} questions ({:5.1}%)",
            i + 1,
            tag.tag,
            tag.count,
            tag.percentage
        ))?;
    }

    p.blank()?;
    p.line(
        &format!("🎯 BOTTOM {} UNDER-REPRESENTED TOPICS:", summary.bottom.len())
            .bold()
            .yellow()
            .to_string(),
    )?;
    p.note("   (Least used content tags with >1 occurrence)")?;
    p.rule(50)?;
    for (i, tag) in summary.bottom.iter().enumerate() {
        p.line(&format!(
            "   {:2}. {:20} - {:3} questions ({:5.1}%)",
            i + 1,
            tag.tag,
            tag.count,
            tag.percentage
        ))?;
    }
    Ok(())
}

pub fn question_stats<W: Write>(p: &mut Printer<W>, stats: &QuestionStats) -> io::Result<()> {
    p.heading("QUESTION STATISTICS")?;
    p.note("📊 Question Types:")?;
    p.rule(30)?;
    for share in &stats.types {
        p.line(&format!(
            "   {:15} - {:3} questions ({:5.1}%) - {}",
            share.name, share.count, share.percentage, share.description
        ))?;
    }

    p.blank()?;
    p.note("📊 CEFR Difficulty Levels:")?;
    p.rule(30)?;
    for share in &stats.levels {
        p.line(&format!(
            "   {:3} {:18} - {:3} questions ({:5.1}%)",
            share.name, share.description, share.count, share.percentage
        ))?;
    }
    Ok(())
}

pub fn verification<W: Write>(p: &mut Printer<W>, stats: &QuestionStats) -> io::Result<()> {
    p.heading("VERIFICATION STATUS")?;
    p.note("📊 Question Verification Status:")?;
    p.rule(40)?;
    p.line(&format!(
        "   {}     {:4} questions ({:5.1}%)",
        "Verified:".green(),
        stats.verified,
        stats.verified_percentage()
    ))?;
    p.line(&format!(
        "   {} {:4} questions ({:5.1}%)",
        "Not Verified:".red(),
        stats.not_verified(),
        stats.not_verified_percentage()
    ))?;
    p.line(&format!("   {}        {:4} questions", "Total:".bold(), stats.total))
}

pub fn tag_network<W: Write>(
    p: &mut Printer<W>,
    cooccurrence: &Cooccurrence,
    top: usize,
) -> io::Result<()> {
    p.heading("TAG CO-OCCURRENCE NETWORK ANALYSIS")?;

    p.blank()?;
    p.line("📊 OVERVIEW:")?;
    p.line(&format!("   Total unique tags: {}", cooccurrence.tags.len()))?;
    p.line(&format!("   Total tag pairs: {}", cooccurrence.pairs.len()))?;
    p.line(&format!("   Questions analyzed: {}", cooccurrence.tagged_questions))?;

    p.blank()?;
    p.line(&format!("🔥 TOP {top} MOST FREQUENT TAGS:"))?;
    for (tag, count) in cooccurrence.tags.most_common(top) {
        p.line(&format!("   {tag:25} {count:3} questions"))?;
    }

    p.blank()?;
    p.line(&format!("🔗 TOP {top} STRONGEST TAG CONNECTIONS:"))?;
    for ((a, b), count) in cooccurrence.pairs.most_common(top) {
        p.line(&format!("   {a:20} ↔ {b:20} ({count:2} connections)"))?;
    }

    p.blank()?;
    p.line("🏝️  ISOLATED TAGS (appear in only 1 question):")?;
    for row in cooccurrence.isolated().chunks(ISOLATED_COLUMNS) {
        let cells: String = row.iter().map(|tag| format!("{tag:18} ")).collect();
        p.line(&format!("   {}", cells.trim_end()))?;
    }

    p.blank()?;
    p.line("📈 CATEGORY DISTRIBUTION:")?;
    for (category, count) in cooccurrence.category_distribution() {
        p.line(&format!("   {category:15} {count:3} total occurrences"))?;
    }
    Ok(())
}

pub fn network_saved<W: Write>(p: &mut Printer<W>, path: &std::path::Path, network: &TagNetwork) -> io::Result<()> {
    p.blank()?;
    p.line(&format!("💾 Network data saved to: {}", path.display()))?;
    p.line(&format!("   Nodes: {}", network.nodes.len()))?;
    p.line(&format!("   Links: {}", network.links.len()))
}

// ============================================================================
// Identifier bands
// ============================================================================

pub fn available_ids<W: Write>(p: &mut Printer<W>, existing: usize, bands: &[BandAvailability]) -> io::Result<()> {
    p.line(&format!("Found {} existing IDs", format_number(existing)))?;
    for band in bands {
        p.blank()?;
        p.line(&format!(
            "{} ({}-{}): {} available IDs",
            band.band.name,
            band.band.min,
            band.band.max,
            band.available.len()
        ))?;
        if band.available.is_empty() {
            continue;
        }
        let shown: Vec<String> = band.first(SHOWN_IDS).iter().map(|id| id.to_string()).collect();
        p.line(&format!("  First {SHOWN_IDS} available: {}", shown.join(", ")))?;
        if band.remaining(SHOWN_IDS) > 0 {
            p.line(&format!("  ... and {} more", band.remaining(SHOWN_IDS)))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coverage::{AttentionRule, CoverageResult};
    use crate::ids::availability;
    use crate::questions::QuestionRecord;
    use crate::tags::summarize_tags;
    use serial_test::serial;
    use std::collections::BTreeSet;

    fn render(f: impl FnOnce(&mut Printer<Vec<u8>>) -> io::Result<()>) -> String {
        colored::control::set_override(false);
        let mut printer = Printer::new(Vec::new());
        f(&mut printer).unwrap();
        colored::control::unset_override();
        String::from_utf8(printer.into_inner()).unwrap()
    }

    fn report(pos: PartOfSpeech, metric: CoverageMetric) -> AttentionReport {
        AttentionReport {
            pos,
            metric,
            rule: AttentionRule::below(0.1),
            denominator: 1200,
            reference_len: 3,
            results: vec![
                CoverageResult {
                    lemma: "vraiment".into(),
                    corpus_frequency: 120.5,
                    rank: 1,
                    match_count: 1,
                    coverage_percentage: 0.0833,
                },
                CoverageResult {
                    lemma: "ailleurs".into(),
                    corpus_frequency: 40.0,
                    rank: 3,
                    match_count: 0,
                    coverage_percentage: 0.0,
                },
            ],
        }
    }

    #[test]
    #[serial]
    fn test_word_percentage_rows() {
        let out = render(|p| attention_report(p, &report(PartOfSpeech::Adverb, CoverageMetric::WordPercentage), 30));
        assert!(out.contains("🔍 ADVERB ANALYSIS"));
        assert!(out.contains("1,200 words"));
        assert!(out.contains("    1. vraiment        - freq:  120.5 (0.0833%) [OK]"));
        assert!(out.contains("    2. ailleurs        - freq:   40.0 (0.0000%) [MISS]"));
    }

    #[test]
    #[serial]
    fn test_question_rows_precision_per_pos() {
        let adj = render(|p| attention_report(p, &report(PartOfSpeech::Adjective, CoverageMetric::QuestionsContaining), 30));
        assert!(adj.contains("( 1 questions, 0.0833%) [OK]"));
        let noun = render(|p| attention_report(p, &report(PartOfSpeech::Noun, CoverageMetric::QuestionsContaining), 1));
        assert!(noun.contains("( 1 questions, 0.083%) [OK]"));
        assert!(!noun.contains("ailleurs"));
    }

    #[test]
    #[serial]
    fn test_attention_table_uses_global_rank() {
        let out = render(|p| attention_table(p, &report(PartOfSpeech::Adverb, CoverageMetric::WordPercentage), 30));
        assert!(out.contains("  3. ailleurs        -    40.0    0.000   [MISS]"));
        assert!(out.contains("Found only 2 adverbs needing attention"));
    }

    #[test]
    #[serial]
    fn test_tag_summary_and_isolated_columns() {
        let questions: Vec<QuestionRecord> = [vec!["food", "a"], vec!["food", "b"], vec!["c", "d", "e", "f", "g"]]
            .iter()
            .map(|tags| QuestionRecord {
                tags: Some(tags.iter().map(|t| t.to_string()).collect()),
                ..QuestionRecord::default()
            })
            .collect();
        let out = render(|p| tag_summary(p, &summarize_tags(&questions, 10), 10));
        assert!(out.contains("    1. food                 -   2 questions ( 66.7%)"));

        let network = render(|p| tag_network(p, &Cooccurrence::build(&questions), 15));
        let isolated: Vec<_> = network
            .lines()
            .skip_while(|l| !l.contains("ISOLATED"))
            .skip(1)
            .take_while(|l| !l.is_empty())
            .collect();
        assert_eq!(isolated.len(), 2);
        assert!(isolated[0].starts_with("   a "));
    }

    #[test]
    #[serial]
    fn test_available_ids_output() {
        let ids: BTreeSet<i64> = (1..=150).collect();
        let out = render(|p| available_ids(p, ids.len(), &availability(&ids)));
        assert!(out.contains("Found 150 existing IDs"));
        assert!(out.contains("A-level (1-199): 49 available IDs"));
        assert!(out.contains("  First 10 available: 151, 152, 153, 154, 155, 156, 157, 158, 159, 160"));
        assert!(out.contains("  ... and 39 more"));
        assert!(out.contains("C-level (400-499): 100 available IDs"));
    }

    #[test]
    #[serial]
    fn test_completion_lists_unavailable_sections() {
        let mut summary = RunSummary::default();
        summary.record(
            "nouns",
            &AnalysisOutcome::<()>::Unavailable(LoadError::NotFound {
                kind: "frequency reference",
                path: "res/nouns.csv".into(),
            }),
        );
        let out = render(|p| completion(p, &summary));
        assert!(out.contains("[WARN] 1 of 1 sections unavailable:"));
        assert!(out.contains("   nouns: frequency reference not found at res/nouns.csv"));
        assert!(out.trim_end().ends_with("[OK] Analysis complete!"));
    }
}

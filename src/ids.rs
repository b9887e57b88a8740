// Copyright (c) 2025 Brian G. Milnes
// SPDX-License-Identifier: MIT

//! Free question identifiers per proficiency band
//!
//! Identifiers are collected from the compiled files and from the individual
//! `q*.json` source questions. Nothing is written.

use crate::error::LoadError;
use crate::questions::{QuestionDocument, QuestionRecord};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdBand {
    pub name: &'static str,
    pub min: i64,
    pub max: i64,
}

pub const ID_BANDS: [IdBand; 3] = [
    IdBand { name: "A-level", min: 1, max: 199 },
    IdBand { name: "B-level", min: 200, max: 399 },
    IdBand { name: "C-level", min: 400, max: 499 },
];

/// Identifiers shown per band before summarizing the rest
pub const SHOWN_IDS: usize = 10;

#[derive(Debug, Default)]
pub struct ExistingIds {
    pub ids: BTreeSet<i64>,
    /// Source files that could not be read
    pub unreadable: Vec<(PathBuf, LoadError)>,
}

/// Identifiers used by compiled documents and source questions. Missing
/// compiled files are skipped.
pub fn collect_ids(compiled: &[PathBuf], source_dir: &Path) -> ExistingIds {
    let mut existing = ExistingIds::default();

    for path in compiled {
        match QuestionDocument::from_file(path) {
            Ok(doc) => existing.extend(doc.questions()),
            Err(e) if e.is_not_found() => log::debug!("{e}"),
            Err(e) => {
                log::warn!("{e}");
                existing.unreadable.push((path.clone(), e));
            }
        }
    }

    for path in source_files(source_dir) {
        match read_source_question(&path) {
            Ok(question) => existing.extend(std::slice::from_ref(&question)),
            Err(e) => existing.unreadable.push((path, e)),
        }
    }

    existing
}

impl ExistingIds {
    fn extend(&mut self, questions: &[QuestionRecord]) {
        self.ids
            .extend(questions.iter().filter_map(|q| q.id.as_ref()?.as_number()));
    }
}

/// `q*.json` files directly inside `dir`, sorted
fn source_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            let name = e.file_name().to_string_lossy();
            name.starts_with('q') && name.ends_with(".json")
        })
        .map(|e| e.into_path())
        .collect();
    files.sort();
    files
}

fn read_source_question(path: &Path) -> Result<QuestionRecord, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|e| LoadError::parse("source question", path, e))
}

#[derive(Debug, Clone)]
pub struct BandAvailability {
    pub band: IdBand,
    /// Ascending
    pub available: Vec<i64>,
}

impl BandAvailability {
    pub fn first(&self, n: usize) -> &[i64] {
        &self.available[..n.min(self.available.len())]
    }

    /// Free identifiers beyond the first `n`
    pub fn remaining(&self, n: usize) -> usize {
        self.available.len().saturating_sub(n)
    }
}

pub fn availability(ids: &BTreeSet<i64>) -> Vec<BandAvailability> {
    ID_BANDS
        .iter()
        .map(|band| BandAvailability {
            band: *band,
            available: (band.min..=band.max).filter(|id| !ids.contains(id)).collect(),
        })
        .collect()
}

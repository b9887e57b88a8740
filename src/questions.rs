// Copyright (c) 2025 Brian G. Milnes
// SPDX-License-Identifier: MIT

//! Question bank documents
//!
//! A compiled question file is either a bare JSON list of questions or an
//! object with a `questions` list and optional compilation `metadata`.
//! Use `QuestionBank::load()` to combine several files.

use crate::error::{LoadError, LoadResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Question identifier; the bank uses numbers but strings are accepted
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuestionId {
    Number(i64),
    Text(String),
}

impl QuestionId {
    /// Numeric value, parsing textual ids like "602"
    pub fn as_number(&self) -> Option<i64> {
        match self {
            QuestionId::Number(n) => Some(*n),
            QuestionId::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionId::Number(n) => write!(f, "{n}"),
            QuestionId::Text(s) => write!(f, "{s}"),
        }
    }
}

/// One question as stored in the bank
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRecord {
    #[serde(default)]
    pub id: Option<QuestionId>,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub options: Option<Vec<String>>,
    #[serde(default)]
    pub explanation: Option<String>,
    /// Transcript for listening questions
    #[serde(default)]
    pub audio_text: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub question_type: Option<String>,
    /// CEFR level (A1..C2)
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub verified: Option<bool>,
}

impl QuestionRecord {
    /// Learner-facing text in the order transcript, prompt, options, explanation
    pub fn text_fields(&self) -> Vec<&str> {
        let mut parts = Vec::new();
        if let Some(audio) = &self.audio_text {
            parts.push(audio.as_str());
        }
        if let Some(question) = &self.question {
            parts.push(question.as_str());
        }
        if let Some(options) = &self.options {
            parts.extend(options.iter().map(|o| o.as_str()));
        }
        if let Some(explanation) = &self.explanation {
            parts.push(explanation.as_str());
        }
        parts
    }

    /// All text fields joined by spaces
    pub fn joined_text(&self) -> String {
        self.text_fields().join(" ")
    }

    /// Key used to match scoped exclusions; empty when the record has no id
    pub fn id_key(&self) -> String {
        self.id.as_ref().map(|id| id.to_string()).unwrap_or_default()
    }

    pub fn tag_list(&self) -> &[String] {
        self.tags.as_deref().unwrap_or(&[])
    }

    pub fn is_verified(&self) -> bool {
        self.verified.unwrap_or(false)
    }
}

/// Compilation metadata written by the question compiler
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilationMetadata {
    #[serde(default)]
    pub compiled_at: Option<String>,
    /// Questions carried over from the level file
    #[serde(default)]
    pub original_questions: Option<u64>,
    /// Questions merged from individual source files
    #[serde(default)]
    pub source_questions: Option<u64>,
}

/// A question document in either supported shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuestionDocument {
    Compiled {
        questions: Vec<QuestionRecord>,
        #[serde(default)]
        metadata: Option<CompilationMetadata>,
    },
    Bare(Vec<QuestionRecord>),
}

impl QuestionDocument {
    pub fn from_file(path: &Path) -> LoadResult<Self> {
        if !path.is_file() {
            return Err(LoadError::NotFound {
                kind: "question file",
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|e| LoadError::parse("question document", path, e))
    }

    pub fn from_str(json: &str) -> LoadResult<Self> {
        serde_json::from_str(json).map_err(|e| LoadError::parse("question document", "<inline>", e))
    }

    pub fn questions(&self) -> &[QuestionRecord] {
        match self {
            QuestionDocument::Compiled { questions, .. } => questions,
            QuestionDocument::Bare(questions) => questions,
        }
    }

    pub fn metadata(&self) -> Option<&CompilationMetadata> {
        match self {
            QuestionDocument::Compiled { metadata, .. } => metadata.as_ref(),
            QuestionDocument::Bare(_) => None,
        }
    }

    pub fn into_parts(self) -> (Vec<QuestionRecord>, Option<CompilationMetadata>) {
        match self {
            QuestionDocument::Compiled { questions, metadata } => (questions, metadata),
            QuestionDocument::Bare(questions) => (questions, None),
        }
    }
}

/// A file that contributed questions
#[derive(Debug, Clone)]
pub struct LoadedFile {
    pub path: PathBuf,
    pub question_count: usize,
    pub metadata: Option<CompilationMetadata>,
}

/// All questions of one run, combined from several documents
#[derive(Debug, Default)]
pub struct QuestionBank {
    pub questions: Vec<QuestionRecord>,
    pub files: Vec<LoadedFile>,
    /// Files that were missing or unreadable
    pub failures: Vec<LoadError>,
}

impl QuestionBank {
    /// Load every document in order. Missing or malformed files are recorded
    /// in `failures` and skipped.
    pub fn load(paths: &[PathBuf]) -> Self {
        let mut bank = QuestionBank::default();
        for path in paths {
            match QuestionDocument::from_file(path) {
                Ok(doc) => {
                    let (questions, metadata) = doc.into_parts();
                    log::debug!("loaded {} questions from {}", questions.len(), path.display());
                    bank.files.push(LoadedFile {
                        path: path.clone(),
                        question_count: questions.len(),
                        metadata,
                    });
                    bank.questions.extend(questions);
                }
                Err(e) => {
                    if e.is_not_found() {
                        log::debug!("{e}");
                    } else {
                        log::warn!("{e}");
                    }
                    bank.failures.push(e);
                }
            }
        }
        bank
    }

    pub fn from_questions(questions: Vec<QuestionRecord>) -> Self {
        QuestionBank {
            questions,
            ..QuestionBank::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }
}

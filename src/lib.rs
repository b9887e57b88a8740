// Copyright (c) 2025 Brian G. Milnes
// SPDX-License-Identifier: MIT

//! Lemmacov - lexical coverage analysis for a French question bank
//!
//! This library finds high-frequency verbs, adjectives, adverbs and nouns
//! that are under-represented in the question bank, and summarizes tag,
//! question type and verification distributions.

pub mod args;
pub mod config;
pub mod corpus;
pub mod coverage;
pub mod error;
pub mod ids;
pub mod lexicon;
pub mod lexique;
pub mod pos;
pub mod questions;
pub mod report;
pub mod sections;
pub mod stats;
pub mod tags;

// Re-export commonly used items
pub use args::{format_number, CommonArgs, DataPaths};
pub use config::AnalysisConfig;
pub use error::{LoadError, LoadResult};
pub use questions::{QuestionBank, QuestionRecord};

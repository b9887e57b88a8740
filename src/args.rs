// Copyright (c) 2025 Brian G. Milnes
// SPDX-License-Identifier: MIT

//! Standard argument parsing for all lemmacov tools
//!
//! Every binary flattens `CommonArgs` into its own clap parser, so data
//! locations and output switches behave the same across the suite.

use crate::config::AnalysisConfig;
use anyhow::Result;
use clap::Args;
use std::path::{Path, PathBuf};

pub const QUESTIONS_DIR: &str = "questions";
pub const COMPILED_FILES: [&str; 3] = ["q-compiled-a.json", "q-compiled-b.json", "q-compiled-c.json"];
pub const SOURCE_DIR: &str = "source";
pub const RES_DIR: &str = "res";
pub const ADJECTIVES_CSV: &str = "adj.csv";
pub const ADVERBS_CSV: &str = "adverbs.csv";
pub const NOUNS_CSV: &str = "nouns.csv";
pub const LEXIQUE_DB: &str = "database/lexique-experiments/lexique.sqlite3";

/// Options shared by every lemmacov tool
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Number of items to analyze
    #[arg(long, default_value_t = 50)]
    pub limit: usize,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Project root; data is looked up here, then one level up
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Directory holding the compiled question files
    #[arg(long)]
    pub questions_dir: Option<PathBuf>,

    /// Directory holding adj.csv, adverbs.csv and nouns.csv
    #[arg(long)]
    pub res_dir: Option<PathBuf>,

    /// Lexique SQLite database
    #[arg(long)]
    pub lexique: Option<PathBuf>,

    /// Question document to analyze instead of the compiled set. May be repeated.
    #[arg(short, long)]
    pub file: Vec<PathBuf>,

    /// JSON file overriding analysis thresholds and word lists
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Default for CommonArgs {
    fn default() -> Self {
        CommonArgs {
            limit: 50,
            no_color: false,
            root: PathBuf::from("."),
            questions_dir: None,
            res_dir: None,
            lexique: None,
            file: Vec::new(),
            config: None,
        }
    }
}

impl CommonArgs {
    /// Resolved data locations, explicit flags taking precedence
    pub fn paths(&self) -> DataPaths {
        let mut paths = DataPaths::resolve(&self.root);
        if let Some(dir) = &self.questions_dir {
            paths.questions_dir = dir.clone();
        }
        if let Some(dir) = &self.res_dir {
            paths.adjectives = dir.join(ADJECTIVES_CSV);
            paths.adverbs = dir.join(ADVERBS_CSV);
            paths.nouns = dir.join(NOUNS_CSV);
        }
        if let Some(db) = &self.lexique {
            paths.lexique = db.clone();
        }
        paths
    }

    /// Question documents to load: `--file` entries, else the compiled set
    pub fn question_files(&self) -> Vec<PathBuf> {
        if self.file.is_empty() {
            self.paths().compiled_files()
        } else {
            self.file.clone()
        }
    }

    pub fn load_config(&self) -> Result<AnalysisConfig> {
        AnalysisConfig::load(self.config.as_deref())
    }
}

/// Where each data source lives for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub questions_dir: PathBuf,
    pub adjectives: PathBuf,
    pub adverbs: PathBuf,
    pub nouns: PathBuf,
    pub lexique: PathBuf,
}

impl DataPaths {
    /// Look up each source under `root`, then under `root/..`
    pub fn resolve(root: &Path) -> Self {
        let first_compiled = Path::new(QUESTIONS_DIR).join(COMPILED_FILES[0]);
        let questions_dir = locate(root, &first_compiled)
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| root.join(QUESTIONS_DIR));
        let res = |name: &str| locate(root, &Path::new(RES_DIR).join(name));

        DataPaths {
            questions_dir,
            adjectives: res(ADJECTIVES_CSV),
            adverbs: res(ADVERBS_CSV),
            nouns: res(NOUNS_CSV),
            lexique: locate(root, Path::new(LEXIQUE_DB)),
        }
    }

    pub fn compiled_files(&self) -> Vec<PathBuf> {
        COMPILED_FILES.iter().map(|f| self.questions_dir.join(f)).collect()
    }

    /// Directory of individual `q*.json` source questions
    pub fn source_dir(&self) -> PathBuf {
        self.questions_dir.join(SOURCE_DIR)
    }
}

/// First existing candidate, or the first candidate so diagnostics name
/// the expected location
pub fn locate(root: &Path, relative: &Path) -> PathBuf {
    let candidates = [root.join(relative), root.join("..").join(relative)];
    for candidate in &candidates {
        if candidate.exists() {
            return candidate.clone();
        }
    }
    candidates[0].clone()
}

/// Decimal digits grouped by thousands with commas
pub fn format_number(n: usize) -> String {
    let digits = n.to_string().into_bytes();
    let groups: Vec<&str> = digits
        .rchunks(3)
        .rev()
        .filter_map(|chunk| std::str::from_utf8(chunk).ok())
        .collect();
    groups.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        common: CommonArgs,
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
        assert_eq!(format_number(100000), "100,000");
        assert_eq!(format_number(12345), "12,345");
    }

    #[test]
    fn test_defaults_and_repeated_files() {
        let cli = TestCli::parse_from(["tool", "--no-color", "-f", "a.json", "--file", "b.json"]);
        assert_eq!(cli.common.limit, 50);
        assert!(cli.common.no_color);
        assert_eq!(cli.common.question_files(), vec![PathBuf::from("a.json"), PathBuf::from("b.json")]);
    }

    #[test]
    fn test_parent_directory_fallback() {
        let tmp = tempfile::tempdir().unwrap();
        let project = tmp.path();
        let util = project.join("util");
        fs::create_dir_all(util.join("res")).unwrap();
        fs::create_dir_all(project.join("res")).unwrap();
        fs::create_dir_all(project.join("questions")).unwrap();
        fs::write(project.join("res/nouns.csv"), "lemme,overall_freq\n").unwrap();
        fs::write(util.join("res/adj.csv"), "lemme,overall_freq\n").unwrap();
        fs::write(project.join("questions/q-compiled-a.json"), "[]").unwrap();

        let paths = DataPaths::resolve(&util);
        assert_eq!(paths.nouns, util.join("../res/nouns.csv"));
        assert_eq!(paths.adjectives, util.join("res/adj.csv"));
        assert_eq!(paths.questions_dir, util.join("../questions"));
        // nothing exists: the first candidate is reported
        assert_eq!(paths.lexique, util.join(LEXIQUE_DB));
    }

    #[test]
    fn test_explicit_dirs_override_resolution() {
        let args = CommonArgs {
            res_dir: Some(PathBuf::from("/data/res")),
            lexique: Some(PathBuf::from("/data/lex.db")),
            questions_dir: Some(PathBuf::from("/data/q")),
            ..CommonArgs::default()
        };
        let paths = args.paths();
        assert_eq!(paths.adverbs, PathBuf::from("/data/res/adverbs.csv"));
        assert_eq!(paths.lexique, PathBuf::from("/data/lex.db"));
        assert_eq!(args.question_files()[2], PathBuf::from("/data/q/q-compiled-c.json"));
        assert_eq!(paths.source_dir(), PathBuf::from("/data/q/source"));
    }
}

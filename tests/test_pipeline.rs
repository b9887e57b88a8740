// Copyright (c) 2025 Brian G. Milnes
// SPDX-License-Identifier: MIT

//! End-to-end tests over an on-disk project layout: compiled question
//! files, CSV frequency references and a Lexique SQLite database.

use lemmacov::config::ConjugationConfig;
use lemmacov::ids::{availability, collect_ids};
use lemmacov::pos::{adjectives, adverbs, nouns, verbs, AnalysisOutcome, PartOfSpeech, RunSummary};
use lemmacov::report::Printer;
use lemmacov::stats::QuestionStats;
use lemmacov::tags::{summarize_tags, Cooccurrence, TagNetwork};
use lemmacov::{sections, AnalysisConfig, DataPaths, QuestionBank};
use rusqlite::{params, Connection};
use serial_test::serial;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const LEVEL_A: &str = r#"{
    "questions": [
        {"id": 1, "question": "Il est ici avec son grand chat.", "tags": ["animals", "home"],
         "questionType": "multiple-choice", "difficulty": "A1", "verified": true},
        {"id": 2, "question": "Elle a vraiment une grande maison.", "tags": ["home", "family"],
         "questionType": "multiple-choice", "difficulty": "A2"}
    ],
    "metadata": {"compiledAt": "2025-06-01T10:00:00Z", "originalQuestions": 2, "sourceQuestions": 0}
}"#;

const LEVEL_B: &str = r#"[
    {"id": "205", "audioText": "Ils sont partis peut-être hier.", "question": "Où sont-ils ?",
     "options": ["À la maison", "Au travail"], "tags": ["home", "travel"],
     "questionType": "listening", "difficulty": "B1", "verified": false}
]"#;

const ADVERBS: &str = "lemme,overall_freq\n\
vraiment,120.5\n\
ailleurs,80.0\n\
peut-être,75.0\n\
hier,60.0\n";

const ADJECTIVES: &str = "lemme,ortho,genre,nombre,overall_freq\n\
grand,grand,m,s,300.0\n\
grand,grande,f,s,250.0\n\
grand,grands,m,p,90.0\n\
petit,petit,m,s,280.0\n\
petit,petite,f,s,200.0\n";

const NOUNS: &str = "lemme,overall_freq\n\
maison,400.0\n\
chat,150.0\n\
voiture,120.0\n";

/// Project root with compiled questions, reference CSVs and a Lexique file
fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("questions/source")).unwrap();
    fs::create_dir_all(root.join("res")).unwrap();
    fs::create_dir_all(root.join("database/lexique-experiments")).unwrap();

    fs::write(root.join("questions/q-compiled-a.json"), LEVEL_A).unwrap();
    fs::write(root.join("questions/q-compiled-b.json"), LEVEL_B).unwrap();
    fs::write(root.join("questions/source/q210.json"), r#"{"id": 210}"#).unwrap();
    fs::write(root.join("questions/source/q211.json"), "{ not json").unwrap();
    fs::write(root.join("res/adverbs.csv"), ADVERBS).unwrap();
    fs::write(root.join("res/adj.csv"), ADJECTIVES).unwrap();
    fs::write(root.join("res/nouns.csv"), NOUNS).unwrap();
    write_lexique(&root.join("database/lexique-experiments/lexique.sqlite3"));
    dir
}

fn write_lexique(path: &Path) {
    let conn = Connection::open(path).unwrap();
    conn.execute_batch(
        "CREATE TABLE verbe (lemme TEXT, freqfilms2 REAL);
         CREATE TABLE lexique (ortho TEXT, lemme TEXT, cgram TEXT, freqfilms2 REAL);",
    )
    .unwrap();
    for (lemma, freq) in [("être", 900.0), ("avoir", 800.0), ("parler", 50.0), ("choir", 0.0)] {
        conn.execute("INSERT INTO verbe VALUES (?1, ?2)", params![lemma, freq]).unwrap();
    }
    let forms = [
        ("est", "être", "VER", 500.0),
        ("sont", "être", "VER", 200.0),
        ("était", "être", "VER", 150.0),
        ("a", "avoir", "VER", 400.0),
        ("ont", "avoir", "VER", 100.0),
        ("parle", "parler", "VER", 30.0),
        ("parlé", "parler", "VER", 12.0),
        ("parlons", "parler", "VER", 4.0),
    ];
    for (ortho, lemma, cgram, freq) in forms {
        conn.execute(
            "INSERT INTO lexique VALUES (?1, ?2, ?3, ?4)",
            params![ortho, lemma, cgram, freq],
        )
        .unwrap();
    }
}

fn load(root: &Path) -> (DataPaths, QuestionBank) {
    let paths = DataPaths::resolve(root);
    let bank = QuestionBank::load(&paths.compiled_files());
    (paths, bank)
}

#[test]
fn test_bank_combines_both_document_shapes() {
    let dir = project();
    let (_, bank) = load(dir.path());
    assert_eq!(bank.len(), 3);
    assert_eq!(bank.files.len(), 2);
    // level C file is absent
    assert_eq!(bank.failures.len(), 1);
    assert!(bank.failures[0].is_not_found());
    let metadata = bank.files[0].metadata.as_ref().unwrap();
    assert_eq!(metadata.original_questions, Some(2));
    assert!(bank.files[1].metadata.is_none());
}

#[test]
fn test_verbs_from_database_file() {
    let dir = project();
    let (paths, bank) = load(dir.path());
    let config = ConjugationConfig {
        target_verbs: 1,
        initial_pool: 1,
        pool_step: 1,
        ..ConjugationConfig::default()
    };
    let run = verbs::analyze(&bank.questions, &paths.lexique, &config).unwrap();

    // être (est, sont) and avoir (a) are covered above 20%
    let selected: Vec<&str> = run.selection.verbs().iter().map(|v| v.verb.as_str()).collect();
    assert_eq!(selected, vec!["parler"]);
    assert_eq!(run.selection.verbs()[0].rank, 3);
    assert_eq!(run.selection.total_verbs(), 3);
    let windows: Vec<usize> = run.selection.outcome.steps.iter().map(|s| s.window).collect();
    assert_eq!(windows, vec![1, 2, 3]);

    let missing: Vec<&str> = run.missing.forms.iter().map(|f| f.form.as_str()).collect();
    assert_eq!(missing, vec!["parle", "parlé", "parlons"]);
    assert!(run.missing.forms.iter().all(|f| f.verb == "parler" && f.usage == 0));
}

#[test]
fn test_missing_database_is_not_found() {
    let dir = project();
    let (_, bank) = load(dir.path());
    let err = verbs::analyze(
        &bank.questions,
        &dir.path().join("nowhere.sqlite3"),
        &ConjugationConfig::default(),
    )
    .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_reference_scans_from_csv_files() {
    let dir = project();
    let (paths, bank) = load(dir.path());
    let config = AnalysisConfig::default();

    let adverb_report = adverbs::analyze(&bank.questions, &paths.adverbs, &config.adverbs, 50).unwrap();
    let flagged: Vec<&str> = adverb_report.results.iter().map(|r| r.lemma.as_str()).collect();
    assert_eq!(flagged, vec!["ailleurs"]);
    assert_eq!(adverb_report.reference_len, 4);

    let adjective_report =
        adjectives::analyze(&bank.questions, &paths.adjectives, &config.adjectives, 50).unwrap();
    let flagged: Vec<&str> = adjective_report.results.iter().map(|r| r.lemma.as_str()).collect();
    // adjectives match on the lemma spelling only
    assert_eq!(flagged, vec!["petit"]);
    assert_eq!(adjective_report.denominator, 3);

    let noun_report = nouns::analyze(&bank.questions, &paths.nouns, &config.nouns, 50).unwrap();
    let flagged: Vec<&str> = noun_report.results.iter().map(|r| r.lemma.as_str()).collect();
    assert!(flagged.contains(&"voiture"));
    assert!(!flagged.contains(&"maison"));
    assert!(!flagged.contains(&"chat"));
}

#[test]
fn test_missing_reference_marks_section_unavailable() {
    let dir = project();
    fs::remove_file(dir.path().join("res/nouns.csv")).unwrap();
    let (paths, bank) = load(dir.path());
    let config = AnalysisConfig::default();

    let mut summary = RunSummary::default();
    let adverb_run = AnalysisOutcome::from_result(
        "adverbs",
        adverbs::analyze(&bank.questions, &paths.adverbs, &config.adverbs, 50),
    );
    summary.record("adverbs", &adverb_run);
    let noun_run = AnalysisOutcome::from_result(
        "nouns",
        nouns::analyze(&bank.questions, &paths.nouns, &config.nouns, 50),
    );
    summary.record("nouns", &noun_run);

    assert!(adverb_run.is_complete());
    assert!(!noun_run.is_complete());
    assert_eq!(summary.completed(), 1);
    let unavailable = summary.unavailable();
    assert_eq!(unavailable.len(), 1);
    assert_eq!(unavailable[0].0, "nouns");
}

#[test]
#[serial]
fn test_unified_report_reaches_completion_marker() {
    let dir = project();
    fs::remove_file(dir.path().join("res/adj.csv")).unwrap();
    let (paths, bank) = load(dir.path());
    let config = AnalysisConfig::default();
    let questions = &bank.questions;

    colored::control::set_override(false);
    let mut p = Printer::new(Vec::new());
    let mut summary = RunSummary::default();

    sections::loaded_questions(&mut p, &bank).unwrap();
    let adjective_run = AnalysisOutcome::from_result(
        "adjectives",
        adjectives::analyze(questions, &paths.adjectives, &config.adjectives, 50),
    );
    sections::attention_outcome(&mut p, PartOfSpeech::Adjective, &adjective_run, 30).unwrap();
    summary.record("adjectives", &adjective_run);
    let adverb_run = AnalysisOutcome::from_result(
        "adverbs",
        adverbs::analyze(questions, &paths.adverbs, &config.adverbs, 50),
    );
    sections::attention_outcome(&mut p, PartOfSpeech::Adverb, &adverb_run, 30).unwrap();
    summary.record("adverbs", &adverb_run);
    sections::tag_summary(&mut p, &summarize_tags(questions, 10), 10).unwrap();
    let stats = QuestionStats::collect(questions);
    sections::question_stats(&mut p, &stats).unwrap();
    sections::verification(&mut p, &stats).unwrap();
    sections::completion(&mut p, &summary).unwrap();
    colored::control::unset_override();

    let out = String::from_utf8(p.into_inner()).unwrap();
    assert!(out.contains("📊 Loaded 3 questions from 2 files"));
    assert!(out.contains("ADJECTIVE ANALYSIS"));
    assert!(out.contains("[MISS] Cannot proceed without adjective data"));
    assert!(out.contains("ailleurs"));
    assert!(out.contains("[WARN] 1 of 2 sections unavailable:"));
    assert!(out.trim_end().ends_with("[OK] Analysis complete!"));
}

#[test]
fn test_tag_network_written_and_read_back() {
    let dir = project();
    let (_, bank) = load(dir.path());
    let cooccurrence = Cooccurrence::build(&bank.questions);
    assert_eq!(cooccurrence.tags.get(&"home".to_string()), 3);

    let network = TagNetwork::build(&cooccurrence, 1, 1);
    let out = dir.path().join("util/tag-network-data.json");
    fs::create_dir_all(out.parent().unwrap()).unwrap();
    fs::write(&out, network.to_json().unwrap()).unwrap();

    let read: TagNetwork = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(read, network);
    assert_eq!(read.nodes[0].id, "home");
    assert_eq!(read.nodes[0].size, 3);
    assert!(read.links.iter().all(|l| l.source < l.target));
}

#[test]
fn test_available_ids_across_compiled_and_source() {
    let dir = project();
    let paths = DataPaths::resolve(dir.path());
    let existing = collect_ids(&paths.compiled_files(), &paths.source_dir());

    assert_eq!(existing.ids.iter().copied().collect::<Vec<_>>(), vec![1, 2, 205, 210]);
    assert_eq!(existing.unreadable.len(), 1);
    assert!(existing.unreadable[0].0.ends_with("q211.json"));

    let bands = availability(&existing.ids);
    assert_eq!(bands[0].first(3), &[3, 4, 5]);
    assert_eq!(bands[0].available.len(), 197);
    assert_eq!(bands[1].available.len(), 198);
    assert_eq!(bands[2].available.len(), 100);
}

// Copyright (c) 2025 Brian G. Milnes
// SPDX-License-Identifier: MIT

//! Lexical reference loader for CSV frequency exports
//!
//! Reference files carry at least a `lemme` and an `overall_freq` column;
//! adjective exports add `genre` and `nombre`. An optional `ortho` column
//! gives the inflected spelling when it differs from the lemma.
//! Results are ranked by descending frequency, ties in file order.

use crate::error::{LoadError, LoadResult};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::io::Read;
use std::path::Path;

pub const LEMMA_COLUMN: &str = "lemme";
pub const FREQUENCY_COLUMN: &str = "overall_freq";
pub const FORM_COLUMN: &str = "ortho";
pub const GENDER_COLUMN: &str = "genre";
pub const NUMBER_COLUMN: &str = "nombre";

/// One ranked reference entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LemmaRecord {
    pub lemma: String,
    pub corpus_frequency: f64,
    /// Grammatical attributes such as gender and number
    pub attributes: BTreeMap<String, String>,
}

impl LemmaRecord {
    pub fn new(lemma: impl Into<String>, corpus_frequency: f64) -> Self {
        LemmaRecord {
            lemma: lemma.into(),
            corpus_frequency,
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }
}

/// A spelling of a lemma with its grammatical category and frequency
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InflectedForm {
    pub form: String,
    /// "VER:ind:pre:3s" for verbs, gender plus number ("fp") for adjectives
    pub category: String,
    pub frequency: f64,
}

/// All rows sharing one lemma
#[derive(Debug, Clone, PartialEq)]
pub struct LemmaGroup {
    pub lemma: String,
    /// Frequency of the most frequent form
    pub max_frequency: f64,
    /// Forms in file order
    pub forms: Vec<InflectedForm>,
}

impl LemmaGroup {
    /// Forms deduplicated by spelling, keeping the most frequent row
    pub fn unique_forms(&self) -> Vec<InflectedForm> {
        let mut unique: Vec<InflectedForm> = Vec::new();
        for form in &self.forms {
            match unique.iter_mut().find(|u| u.form == form.form) {
                Some(existing) => {
                    if form.frequency > existing.frequency {
                        *existing = form.clone();
                    }
                }
                None => unique.push(form.clone()),
            }
        }
        unique
    }

    pub fn to_record(&self) -> LemmaRecord {
        LemmaRecord::new(self.lemma.clone(), self.max_frequency)
    }
}

/// Stable sort by descending frequency
pub fn sort_by_frequency(records: &mut [LemmaRecord]) {
    records.sort_by(|a, b| b.corpus_frequency.total_cmp(&a.corpus_frequency));
}

struct Row {
    lemma: String,
    form: String,
    frequency: f64,
    attributes: BTreeMap<String, String>,
}

fn parse_frequency(raw: &str, line: usize, path: &Path) -> LoadResult<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0.0);
    }
    let value: f64 = raw.parse().map_err(|_| {
        LoadError::parse(
            "frequency reference",
            path,
            format!("line {line}: '{raw}' is not a number"),
        )
    })?;
    if !value.is_finite() || value < 0.0 {
        return Err(LoadError::parse(
            "frequency reference",
            path,
            format!("line {line}: frequency {raw} out of range"),
        ));
    }
    Ok(value)
}

fn read_rows<R: Read>(mut reader: csv::Reader<R>, path: &Path) -> LoadResult<Vec<Row>> {
    let headers = reader
        .headers()
        .map_err(|e| LoadError::parse("frequency reference", path, e))?
        .clone();
    let column = |name: &str| headers.iter().position(|h| h.trim() == name);

    let lemma_idx = column(LEMMA_COLUMN).ok_or_else(|| {
        LoadError::parse("frequency reference", path, format!("missing column '{LEMMA_COLUMN}'"))
    })?;
    let freq_idx = column(FREQUENCY_COLUMN).ok_or_else(|| {
        LoadError::parse("frequency reference", path, format!("missing column '{FREQUENCY_COLUMN}'"))
    })?;
    let form_idx = column(FORM_COLUMN);
    let attribute_columns: Vec<(&str, usize)> = [GENDER_COLUMN, NUMBER_COLUMN]
        .into_iter()
        .filter_map(|name| column(name).map(|idx| (name, idx)))
        .collect();

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // header is line 1
        let line = idx + 2;
        let record = result.map_err(|e| LoadError::parse("frequency reference", path, e))?;
        let lemma = record.get(lemma_idx).unwrap_or("").trim().trim_matches('"').to_string();
        if lemma.is_empty() {
            log::debug!("{}: skipping line {line} without a lemma", path.display());
            continue;
        }
        let frequency = parse_frequency(record.get(freq_idx).unwrap_or(""), line, path)?;
        let form = form_idx
            .and_then(|i| record.get(i))
            .map(|s| s.trim().trim_matches('"'))
            .filter(|s| !s.is_empty())
            .unwrap_or(lemma.as_str())
            .to_string();
        let attributes = attribute_columns
            .iter()
            .map(|(name, i)| (name.to_string(), record.get(*i).unwrap_or("").trim().to_string()))
            .collect();
        rows.push(Row {
            lemma,
            form,
            frequency,
            attributes,
        });
    }
    Ok(rows)
}

fn open(path: &Path) -> LoadResult<csv::Reader<std::fs::File>> {
    if !path.is_file() {
        return Err(LoadError::NotFound {
            kind: "frequency reference",
            path: path.to_path_buf(),
        });
    }
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(csv::Reader::from_reader(file))
}

fn ranked_from_rows(rows: Vec<Row>, path: &Path) -> LoadResult<Vec<LemmaRecord>> {
    if rows.is_empty() {
        return Err(LoadError::Empty {
            kind: "frequency reference",
            path: path.to_path_buf(),
        });
    }
    let mut records: Vec<LemmaRecord> = rows
        .into_iter()
        .map(|row| LemmaRecord {
            lemma: row.lemma,
            corpus_frequency: row.frequency,
            attributes: row.attributes,
        })
        .collect();
    sort_by_frequency(&mut records);
    Ok(records)
}

fn grouped_from_rows(rows: Vec<Row>, path: &Path) -> LoadResult<Vec<LemmaGroup>> {
    if rows.is_empty() {
        return Err(LoadError::Empty {
            kind: "frequency reference",
            path: path.to_path_buf(),
        });
    }
    let mut groups: Vec<LemmaGroup> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    for row in rows {
        let category: String = [GENDER_COLUMN, NUMBER_COLUMN]
            .iter()
            .filter_map(|name| row.attributes.get(*name))
            .map(|s| s.as_str())
            .collect();
        let form = InflectedForm {
            form: row.form,
            category,
            frequency: row.frequency,
        };
        match positions.get(&row.lemma) {
            Some(&i) => {
                let group = &mut groups[i];
                group.max_frequency = group.max_frequency.max(form.frequency);
                group.forms.push(form);
            }
            None => {
                positions.insert(row.lemma.clone(), groups.len());
                groups.push(LemmaGroup {
                    lemma: row.lemma,
                    max_frequency: form.frequency,
                    forms: vec![form],
                });
            }
        }
    }
    groups.sort_by(|a, b| b.max_frequency.total_cmp(&a.max_frequency));
    Ok(groups)
}

/// One record per row, ranked by descending frequency
pub fn load_ranked(path: &Path) -> LoadResult<Vec<LemmaRecord>> {
    let rows = read_rows(open(path)?, path)?;
    ranked_from_rows(rows, path)
}

/// Rows grouped by lemma, ranked by each lemma's most frequent form
pub fn load_grouped(path: &Path) -> LoadResult<Vec<LemmaGroup>> {
    let rows = read_rows(open(path)?, path)?;
    grouped_from_rows(rows, path)
}

/// `load_ranked` over in-memory CSV text
pub fn ranked_from_str(content: &str) -> LoadResult<Vec<LemmaRecord>> {
    let path = Path::new("<inline>");
    let rows = read_rows(csv::Reader::from_reader(content.as_bytes()), path)?;
    ranked_from_rows(rows, path)
}

/// `load_grouped` over in-memory CSV text
pub fn grouped_from_str(content: &str) -> LoadResult<Vec<LemmaGroup>> {
    let path = Path::new("<inline>");
    let rows = read_rows(csv::Reader::from_reader(content.as_bytes()), path)?;
    grouped_from_rows(rows, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranked_sorted_descending_stable() {
        let csv = "lemme,overall_freq\nlentement,12.5\n\"ainsi\",40\nvite,12.5\nguère,\n";
        let records = ranked_from_str(csv).unwrap();
        let lemmas: Vec<_> = records.iter().map(|r| r.lemma.as_str()).collect();
        assert_eq!(lemmas, vec!["ainsi", "lentement", "vite", "guère"]);
        assert_eq!(records[3].corpus_frequency, 0.0);
    }

    #[test]
    fn test_grouped_keeps_max_frequency_and_first_seen_order() {
        let csv = "lemme,genre,nombre,overall_freq\n\
                   grand,m,s,300\n\
                   petit,m,s,300\n\
                   grand,f,p,20\n\
                   grand,m,s,310\n";
        let groups = grouped_from_str(csv).unwrap();
        assert_eq!(groups[0].lemma, "grand");
        assert_eq!(groups[0].max_frequency, 310.0);
        assert_eq!(groups[0].forms.len(), 3);
        assert_eq!(groups[0].forms[1].category, "fp");
        assert_eq!(groups[1].lemma, "petit");

        let unique = groups[0].unique_forms();
        assert_eq!(unique.len(), 1);
        assert_eq!(unique[0].frequency, 310.0);
    }

    #[test]
    fn test_ortho_column_gives_form_text() {
        let csv = "lemme,ortho,genre,nombre,overall_freq\nbeau,belles,f,p,10\nbeau,beau,m,s,90\n";
        let groups = grouped_from_str(csv).unwrap();
        let forms: Vec<_> = groups[0].unique_forms().into_iter().map(|f| f.form).collect();
        assert_eq!(forms, vec!["belles", "beau"]);
    }

    #[test]
    fn test_attributes_kept_on_records() {
        let records = ranked_from_str("lemme,genre,nombre,overall_freq\nbon,m,s,5\n").unwrap();
        assert_eq!(records[0].attribute("genre"), Some("m"));
        assert_eq!(records[0].attribute("nombre"), Some("s"));
    }

    #[test]
    fn test_negative_frequency_rejected() {
        let err = ranked_from_str("lemme,overall_freq\nmal,-3\n").unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_missing_column_rejected() {
        let err = ranked_from_str("word,freq\nbien,1\n").unwrap_err();
        assert!(err.to_string().contains("lemme"));
    }

    #[test]
    fn test_header_only_is_empty() {
        let err = ranked_from_str("lemme,overall_freq\n").unwrap_err();
        assert!(matches!(err, LoadError::Empty { .. }));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = load_ranked(Path::new("/nonexistent/res/adverbs.csv")).unwrap_err();
        assert!(err.is_not_found());
    }
}

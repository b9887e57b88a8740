// Copyright (c) 2025 Brian G. Milnes
// SPDX-License-Identifier: MIT

//! Read-only access to the Lexique verb database
//!
//! Two tables are used: `verbe` (one row per verb lemma with its film
//! frequency) and `lexique` (one row per spelling with its lemma, grammatical
//! category and frequency).

use crate::error::{LoadError, LoadResult};
use crate::lexicon::{InflectedForm, LemmaRecord};
use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};

const RANKED_VERBS_SQL: &str = "SELECT lemme, freqfilms2 FROM verbe \
     WHERE freqfilms2 > 0 ORDER BY freqfilms2 DESC";

const CONJUGATED_FORMS_SQL: &str = "SELECT ortho, cgram, freqfilms2 FROM lexique \
     WHERE lemme = ?1 AND cgram LIKE '%VER%' ORDER BY freqfilms2 DESC";

pub struct LexiqueDb {
    conn: Connection,
    path: PathBuf,
}

impl LexiqueDb {
    pub fn open(path: &Path) -> LoadResult<Self> {
        if !path.is_file() {
            return Err(LoadError::NotFound {
                kind: "lexique database",
                path: path.to_path_buf(),
            });
        }
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(path, flags)?;
        log::debug!("opened lexique database {}", path.display());
        Ok(LexiqueDb {
            conn,
            path: path.to_path_buf(),
        })
    }

    /// Wrap an existing connection, e.g. an in-memory fixture
    pub fn from_connection(conn: Connection) -> Self {
        LexiqueDb {
            conn,
            path: PathBuf::from(":memory:"),
        }
    }

    /// Every verb with a positive frequency, most frequent first
    pub fn ranked_verbs(&self) -> LoadResult<Vec<LemmaRecord>> {
        let mut stmt = self.conn.prepare_cached(RANKED_VERBS_SQL)?;
        let verbs = stmt
            .query_map([], |row| Ok(LemmaRecord::new(row.get::<_, String>(0)?, row.get::<_, f64>(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;
        if verbs.is_empty() {
            return Err(LoadError::Empty {
                kind: "verb table",
                path: self.path.clone(),
            });
        }
        Ok(verbs)
    }

    pub fn top_verbs(&self, limit: usize) -> LoadResult<Vec<LemmaRecord>> {
        let mut verbs = self.ranked_verbs()?;
        verbs.truncate(limit);
        Ok(verbs)
    }

    /// Verb spellings of `infinitive` by descending frequency, the
    /// infinitive itself excluded
    pub fn conjugated_forms(&self, infinitive: &str) -> LoadResult<Vec<InflectedForm>> {
        let mut stmt = self.conn.prepare_cached(CONJUGATED_FORMS_SQL)?;
        let forms = stmt
            .query_map([infinitive], |row| {
                Ok(InflectedForm {
                    form: row.get(0)?,
                    category: row.get(1)?,
                    frequency: row.get::<_, Option<f64>>(2)?.unwrap_or(0.0),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(forms.into_iter().filter(|f| f.form != infinitive).collect())
    }
}

/// In-memory database with the two Lexique tables, for tests
#[cfg(test)]
pub(crate) fn fixture(verbs: &[(&str, f64)], forms: &[(&str, &str, &str, f64)]) -> LexiqueDb {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE verbe (lemme TEXT, freqfilms2 REAL);
         CREATE TABLE lexique (ortho TEXT, lemme TEXT, cgram TEXT, freqfilms2 REAL);",
    )
    .unwrap();
    for (lemma, freq) in verbs {
        conn.execute("INSERT INTO verbe VALUES (?1, ?2)", rusqlite::params![lemma, freq])
            .unwrap();
    }
    for (ortho, lemma, cgram, freq) in forms {
        conn.execute(
            "INSERT INTO lexique VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![ortho, lemma, cgram, freq],
        )
        .unwrap();
    }
    LexiqueDb::from_connection(conn)
}

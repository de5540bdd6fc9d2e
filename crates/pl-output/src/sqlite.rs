//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `trace.db` file in the configured output directory with
//! two tables: `events` and `completions`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{CompletionRow, EventRow, OutputResult};

/// Writes the event trace and completions to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `trace.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("trace.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS events (
                 tick        INTEGER NOT NULL,
                 kind        TEXT    NOT NULL,
                 carrier     INTEGER,
                 manipulator INTEGER,
                 station     INTEGER,
                 detail      TEXT    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS completions (
                 carrier INTEGER PRIMARY KEY,
                 recipe  TEXT    NOT NULL,
                 tick    INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_events(&mut self, rows: &[EventRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO events (tick, kind, carrier, manipulator, station, detail) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.tick as i64,
                    row.kind,
                    row.carrier,
                    row.manipulator,
                    row.station,
                    row.detail,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_completion(&mut self, row: &CompletionRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO completions (carrier, recipe, tick) VALUES (?1, ?2, ?3)",
            rusqlite::params![row.carrier, row.recipe, row.tick as i64],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}

//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `events.csv`
//! - `completions.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{CompletionRow, EventRow, OutputResult};

/// Writes the event trace and completions to two CSV files.
pub struct CsvWriter {
    events:      Writer<File>,
    completions: Writer<File>,
    finished:    bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut events = Writer::from_path(dir.join("events.csv"))?;
        events.write_record(["tick", "kind", "carrier", "manipulator", "station", "detail"])?;

        let mut completions = Writer::from_path(dir.join("completions.csv"))?;
        completions.write_record(["carrier", "recipe", "tick"])?;

        Ok(Self {
            events,
            completions,
            finished: false,
        })
    }
}

fn opt(v: Option<u32>) -> String {
    v.map(|v| v.to_string()).unwrap_or_default()
}

impl OutputWriter for CsvWriter {
    fn write_events(&mut self, rows: &[EventRow]) -> OutputResult<()> {
        for row in rows {
            self.events.write_record(&[
                row.tick.to_string(),
                row.kind.to_owned(),
                opt(row.carrier),
                opt(row.manipulator),
                opt(row.station),
                row.detail.clone(),
            ])?;
        }
        Ok(())
    }

    fn write_completion(&mut self, row: &CompletionRow) -> OutputResult<()> {
        self.completions.write_record(&[
            row.carrier.to_string(),
            row.recipe.clone(),
            row.tick.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.events.flush()?;
        self.completions.flush()?;
        Ok(())
    }
}

//! `pl-output` — trace and completion writers for the plating-line twin.
//!
//! Two backends are provided:
//!
//! | Feature   | Backend | Files created                       |
//! |-----------|---------|-------------------------------------|
//! | *(none)*  | CSV     | `events.csv`, `completions.csv`     |
//! | `sqlite`  | SQLite  | `trace.db`                          |
//!
//! Both implement [`OutputWriter`] and are driven by
//! [`TraceOutputObserver`], which implements `pl_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use pl_output::{CsvWriter, TraceOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = TraceOutputObserver::new(writer);
//! let report = sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::TraceOutputObserver;
pub use row::{CompletionRow, EventRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;

//! The `OutputWriter` trait implemented by all backend writers.

use crate::{CompletionRow, EventRow, OutputResult};

/// Trait implemented by the CSV and SQLite writers.
///
/// Errors surface to the observer, which keeps the first one for
/// [`TraceOutputObserver::take_error`][crate::TraceOutputObserver::take_error].
pub trait OutputWriter {
    /// Write one tick's worth of events.
    fn write_events(&mut self, rows: &[EventRow]) -> OutputResult<()>;

    /// Write one finished carrier.
    fn write_completion(&mut self, row: &CompletionRow) -> OutputResult<()>;

    /// Flush and close all underlying handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}

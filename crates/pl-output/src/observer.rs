//! `TraceOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use pl_core::Tick;
use pl_rail::LineEvent;
use pl_sim::{Completion, Outcome, SimObserver, SimView};

use crate::writer::OutputWriter;
use crate::{CompletionRow, EventRow, OutputError, OutputResult};

/// A [`SimObserver`] that writes the event trace and completions to any
/// [`OutputWriter`] backend.
///
/// Events are buffered and written once per tick.  Errors from the writer
/// are stored internally because `SimObserver` methods have no return
/// value; check with [`take_error`][Self::take_error] after the run.
pub struct TraceOutputObserver<W: OutputWriter> {
    writer:     W,
    pending:    Vec<EventRow>,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> TraceOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pending:    Vec::new(),
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }

    fn flush_events(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let result = self.writer.write_events(&self.pending);
        self.pending.clear();
        self.store_err(result);
    }
}

impl<W: OutputWriter> SimObserver for TraceOutputObserver<W> {
    fn on_event(&mut self, event: &LineEvent) {
        self.pending.push(EventRow::from(event));
    }

    fn on_carrier_finished(&mut self, completion: &Completion) {
        let result = self.writer.write_completion(&CompletionRow::from(completion));
        self.store_err(result);
    }

    fn on_tick_end(&mut self, _tick: Tick, _view: SimView<'_>) {
        self.flush_events();
    }

    fn on_sim_end(&mut self, _final_tick: Tick, _outcome: Outcome) {
        self.flush_events();
        let result = self.writer.finish();
        self.store_err(result);
    }
}

//! Simulation observer trait for tracing, data collection and checks.

use pl_core::{CarrierId, Tick};
use pl_line::World;
use pl_rail::{EventKind, LineEvent, Rail};

use crate::{Completion, Outcome};

/// Read-only view of the line at a tick boundary.
#[derive(Copy, Clone)]
pub struct SimView<'a> {
    pub world: &'a World,
    pub rail:  &'a Rail,
}

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — completion printer
///
/// ```rust,ignore
/// struct Printer;
///
/// impl SimObserver for Printer {
///     fn on_carrier_finished(&mut self, c: &Completion) {
///         println!("{} done at {}", c.carrier, c.tick);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once per event, in the order the events happened, after the
    /// tick has been processed.
    fn on_event(&mut self, _event: &LineEvent) {}

    /// Called when a carrier is drained from the exit station.
    fn on_carrier_finished(&mut self, _completion: &Completion) {}

    /// Called at the end of each tick with the state every invariant must
    /// hold on.
    fn on_tick_end(&mut self, _tick: Tick, _view: SimView<'_>) {}

    /// Called once after the final tick.
    fn on_sim_end(&mut self, _final_tick: Tick, _outcome: Outcome) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// Runs two observers side by side, `.0` first.
impl<A: SimObserver, B: SimObserver> SimObserver for (A, B) {
    fn on_tick_start(&mut self, tick: Tick) {
        self.0.on_tick_start(tick);
        self.1.on_tick_start(tick);
    }

    fn on_event(&mut self, event: &LineEvent) {
        self.0.on_event(event);
        self.1.on_event(event);
    }

    fn on_carrier_finished(&mut self, completion: &Completion) {
        self.0.on_carrier_finished(completion);
        self.1.on_carrier_finished(completion);
    }

    fn on_tick_end(&mut self, tick: Tick, view: SimView<'_>) {
        self.0.on_tick_end(tick, view);
        self.1.on_tick_end(tick, view);
    }

    fn on_sim_end(&mut self, final_tick: Tick, outcome: Outcome) {
        self.0.on_sim_end(final_tick, outcome);
        self.1.on_sim_end(final_tick, outcome);
    }
}

/// Keeps every event in memory.
#[derive(Default, Debug)]
pub struct EventLog {
    pub events: Vec<LineEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events touching `carrier`, in order.
    pub fn for_carrier(&self, carrier: CarrierId) -> impl Iterator<Item = &LineEvent> + '_ {
        self.events.iter().filter(move |e| e.kind.carrier() == Some(carrier))
    }

    pub fn matching<'a>(
        &'a self,
        pred: impl Fn(&EventKind) -> bool + 'a,
    ) -> impl Iterator<Item = &'a LineEvent> + 'a {
        self.events.iter().filter(move |e| pred(&e.kind))
    }
}

impl SimObserver for EventLog {
    fn on_event(&mut self, event: &LineEvent) {
        self.events.push(event.clone());
    }
}

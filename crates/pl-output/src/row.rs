//! Plain data row types written by output backends.

use pl_rail::LineEvent;
use pl_sim::Completion;

/// One line event, flattened.  Id columns the event does not involve are
/// `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRow {
    pub tick:        u64,
    pub kind:        &'static str,
    pub carrier:     Option<u32>,
    pub manipulator: Option<u32>,
    pub station:     Option<u32>,
    pub detail:      String,
}

impl From<&LineEvent> for EventRow {
    fn from(event: &LineEvent) -> Self {
        Self {
            tick:        event.tick.0,
            kind:        event.kind.name(),
            carrier:     event.kind.carrier().map(|c| c.0),
            manipulator: event.kind.manipulator().map(|m| m.0),
            station:     event.kind.station().map(|s| s.0),
            detail:      event.kind.detail(),
        }
    }
}

/// A carrier leaving the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRow {
    pub carrier: u32,
    pub recipe:  String,
    pub tick:    u64,
}

impl From<&Completion> for CompletionRow {
    fn from(c: &Completion) -> Self {
        Self {
            carrier: c.carrier.0,
            recipe:  c.recipe.clone(),
            tick:    c.tick.0,
        }
    }
}

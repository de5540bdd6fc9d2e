//! Structured event stream.
//!
//! Every observable state change on the line is pushed to a [`Trace`] as a
//! [`LineEvent`].  The scheduler drains the trace once per tick and hands
//! the events to its observer; nothing here formats text.

use pl_core::{CarrierId, ManipulatorId, Millimetres, StationId, Tick};
use pl_line::CarrierState;

use crate::ManipulatorState;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    /// A carrier left the work order and was placed on the entry station.
    CarrierAdmitted { carrier: CarrierId, station: StationId },
    /// A carrier was removed from the exit station.
    CarrierFinished { carrier: CarrierId, station: StationId },
    CarrierState {
        carrier: CarrierId,
        from:    CarrierState,
        to:      CarrierState,
    },
    ManipulatorState {
        manipulator: ManipulatorId,
        from:        ManipulatorState,
        to:          ManipulatorState,
    },
    /// The scheduler sent a manipulator to pick a carrier up.
    Tasked {
        manipulator: ManipulatorId,
        carrier:     CarrierId,
        station:     StationId,
    },
    Arrived { manipulator: ManipulatorId, station: StationId },
    Deposited {
        manipulator: ManipulatorId,
        carrier:     CarrierId,
        station:     StationId,
    },
    Lifted {
        manipulator: ManipulatorId,
        carrier:     CarrierId,
        station:     StationId,
    },
    /// `manipulator` was pushed to `to` by the neighbor `by`.
    Shoved {
        by:          ManipulatorId,
        manipulator: ManipulatorId,
        to:          Millimetres,
    },
    /// `manipulator` backed off because `blocker` is in a protected state.
    Yielded {
        manipulator: ManipulatorId,
        blocker:     ManipulatorId,
    },
    /// A move toward a station outside the manipulator's reach was refused.
    MoveRejected { manipulator: ManipulatorId, station: StationId },
}

impl EventKind {
    /// Stable snake_case name, used as the `kind` column in output files.
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::CarrierAdmitted { .. }  => "carrier_admitted",
            EventKind::CarrierFinished { .. }  => "carrier_finished",
            EventKind::CarrierState { .. }     => "carrier_state",
            EventKind::ManipulatorState { .. } => "manipulator_state",
            EventKind::Tasked { .. }           => "tasked",
            EventKind::Arrived { .. }          => "arrived",
            EventKind::Deposited { .. }        => "deposited",
            EventKind::Lifted { .. }           => "lifted",
            EventKind::Shoved { .. }           => "shoved",
            EventKind::Yielded { .. }          => "yielded",
            EventKind::MoveRejected { .. }     => "move_rejected",
        }
    }

    pub fn carrier(&self) -> Option<CarrierId> {
        match *self {
            EventKind::CarrierAdmitted { carrier, .. }
            | EventKind::CarrierFinished { carrier, .. }
            | EventKind::CarrierState { carrier, .. }
            | EventKind::Tasked { carrier, .. }
            | EventKind::Deposited { carrier, .. }
            | EventKind::Lifted { carrier, .. } => Some(carrier),
            _ => None,
        }
    }

    pub fn manipulator(&self) -> Option<ManipulatorId> {
        match *self {
            EventKind::ManipulatorState { manipulator, .. }
            | EventKind::Tasked { manipulator, .. }
            | EventKind::Arrived { manipulator, .. }
            | EventKind::Deposited { manipulator, .. }
            | EventKind::Lifted { manipulator, .. }
            | EventKind::Shoved { manipulator, .. }
            | EventKind::Yielded { manipulator, .. }
            | EventKind::MoveRejected { manipulator, .. } => Some(manipulator),
            _ => None,
        }
    }

    pub fn station(&self) -> Option<StationId> {
        match *self {
            EventKind::CarrierAdmitted { station, .. }
            | EventKind::CarrierFinished { station, .. }
            | EventKind::Tasked { station, .. }
            | EventKind::Arrived { station, .. }
            | EventKind::Deposited { station, .. }
            | EventKind::Lifted { station, .. }
            | EventKind::MoveRejected { station, .. } => Some(station),
            _ => None,
        }
    }

    /// Free-form remainder not covered by the id accessors.
    pub fn detail(&self) -> String {
        match self {
            EventKind::CarrierState { from, to, .. } => format!("{from}->{to}"),
            EventKind::ManipulatorState { from, to, .. } => format!("{from}->{to}"),
            EventKind::Shoved { by, to, .. } => format!("by {by} to {}", to.0),
            EventKind::Yielded { blocker, .. } => format!("blocked by {blocker}"),
            _ => String::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineEvent {
    pub tick: Tick,
    pub kind: EventKind,
}

/// Per-tick event buffer stamped with the current tick.
#[derive(Debug, Default)]
pub struct Trace {
    tick:   Tick,
    events: Vec<LineEvent>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn tick(&self) -> Tick {
        self.tick
    }

    pub fn set_tick(&mut self, tick: Tick) {
        self.tick = tick;
    }

    pub fn push(&mut self, kind: EventKind) {
        self.events.push(LineEvent { tick: self.tick, kind });
    }

    pub fn events(&self) -> &[LineEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Take every buffered event, leaving the trace empty.
    pub fn drain(&mut self) -> std::vec::Drain<'_, LineEvent> {
        self.events.drain(..)
    }
}

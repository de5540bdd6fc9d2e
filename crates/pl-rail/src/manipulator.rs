//! The manipulator entity.

use std::collections::BTreeSet;

use pl_core::{CarrierId, ManipulatorId, Millimetres, StationId};

use crate::{EventKind, ManipulatorState, Trace};

/// Configuration record for one manipulator, given in rail order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ManipulatorSpec {
    /// Stations this manipulator may visit.
    pub reach: Vec<StationId>,
    /// Station the manipulator is parked over at tick 0.
    pub start: StationId,
}

impl ManipulatorSpec {
    pub fn new(reach: impl IntoIterator<Item = StationId>, start: StationId) -> Self {
        Self {
            reach: reach.into_iter().collect(),
            start,
        }
    }

    /// Reach covering the contiguous station range `first..=last`.
    pub fn span(first: u32, last: u32, start: u32) -> Self {
        Self::new((first..=last).map(StationId), StationId(start))
    }
}

/// A rail-bound transfer agent.
///
/// Fields that motion and handling mutate are crate-private; everything is
/// readable through accessors.
#[derive(Clone, Debug)]
pub struct Manipulator {
    pub id:                ManipulatorId,
    reach:                 BTreeSet<StationId>,
    pub(crate) rail_pos:   Millimetres,
    pub(crate) position:   StationId,
    pub(crate) state:      ManipulatorState,
    pub(crate) held:       Option<CarrierId>,
    pub(crate) target:     Option<StationId>,
    /// Ticks spent in the current timed operation (or travelling).
    pub(crate) elapsed:    u32,
}

impl Manipulator {
    pub(crate) fn new(
        id:       ManipulatorId,
        reach:    BTreeSet<StationId>,
        start:    StationId,
        rail_pos: Millimetres,
    ) -> Self {
        Self {
            id,
            reach,
            rail_pos,
            position: start,
            state:    ManipulatorState::Idle,
            held:     None,
            target:   None,
            elapsed:  0,
        }
    }

    pub fn reach(&self) -> &BTreeSet<StationId> {
        &self.reach
    }

    #[inline]
    pub fn can_reach(&self, station: StationId) -> bool {
        self.reach.contains(&station)
    }

    /// Continuous rail coordinate.
    #[inline]
    pub fn rail_pos(&self) -> Millimetres {
        self.rail_pos
    }

    /// The last station the manipulator arrived at.
    #[inline]
    pub fn position(&self) -> StationId {
        self.position
    }

    #[inline]
    pub fn state(&self) -> ManipulatorState {
        self.state
    }

    #[inline]
    pub fn held(&self) -> Option<CarrierId> {
        self.held
    }

    #[inline]
    pub fn target(&self) -> Option<StationId> {
        self.target
    }

    #[inline]
    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    #[inline]
    pub fn is_protected(&self) -> bool {
        self.state.is_protected()
    }

    /// Idle, empty-handed, and without a pending target: free for tasking.
    #[inline]
    pub fn is_available(&self) -> bool {
        self.state == ManipulatorState::Idle && self.held.is_none() && self.target.is_none()
    }

    /// Switch state, recording the transition.  Re-entering the current
    /// state records nothing.
    pub(crate) fn enter(&mut self, to: ManipulatorState, trace: &mut Trace) {
        if self.state == to {
            return;
        }
        let from = self.state;
        self.state = to;
        trace.push(EventKind::ManipulatorState { manipulator: self.id, from, to });
    }
}

//! Rail motion and local collision avoidance.

use std::cmp::Ordering;

use pl_core::{ManipulatorId, Millimetres, StationId};
use pl_line::World;
use tracing::{debug, warn};

use crate::{EventKind, Manipulator, ManipulatorState, Rail, RailError, RailResult, Trace};

/// Direction of travel along the rail.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum Heading {
    Left,
    Right,
}

impl Heading {
    fn reversed(self) -> Heading {
        match self {
            Heading::Left => Heading::Right,
            Heading::Right => Heading::Left,
        }
    }
}

impl Rail {
    /// Send manipulator `id` toward `target` and take the first movement
    /// increment immediately.
    ///
    /// A target outside the manipulator's reach is refused with
    /// [`RailError::OutOfReach`] and a `MoveRejected` event; the manipulator
    /// is left untouched.
    pub fn move_to(
        &mut self,
        id:     ManipulatorId,
        target: StationId,
        world:  &World,
        trace:  &mut Trace,
    ) -> RailResult<()> {
        let m = self.get_mut(id)?;
        if !m.can_reach(target) {
            warn!(manipulator = %id, station = %target, "move rejected: station out of reach");
            trace.push(EventKind::MoveRejected { manipulator: id, station: target });
            return Err(RailError::OutOfReach { manipulator: id, station: target });
        }

        m.target = Some(target);
        m.elapsed = 0;
        m.enter(ManipulatorState::Moving, trace);
        self.update_movement(id, world, trace)?;
        Ok(())
    }

    /// Advance a moving manipulator by one speed increment, resolving any
    /// contact with the neighbor ahead.
    ///
    /// Returns `true` on the tick the manipulator comes to rest exactly over
    /// its target.  On arrival the state becomes `Idle` but the target is
    /// kept: the follow-up operation has not happened yet.
    pub fn update_movement(
        &mut self,
        id:    ManipulatorId,
        world: &World,
        trace: &mut Trace,
    ) -> RailResult<bool> {
        let speed = self.speed();
        let m = self.get_mut(id)?;
        if m.state != ManipulatorState::Moving {
            return Ok(false);
        }
        let target = m.target.ok_or(RailError::NoTarget(id))?;
        let goal = world.stations.distance(target)?;

        let heading = if m.rail_pos < goal {
            m.rail_pos = (m.rail_pos + speed).min(goal);
            m.elapsed += 1;
            Some(Heading::Right)
        } else if m.rail_pos > goal {
            m.rail_pos = (m.rail_pos - speed).max(goal);
            m.elapsed += 1;
            Some(Heading::Left)
        } else {
            None
        };

        if let Some(heading) = heading {
            self.resolve_contact(id, heading, world, trace);
        }

        let m = self.get_mut(id)?;
        if m.rail_pos == goal {
            m.position = target;
            m.elapsed = 0;
            m.enter(ManipulatorState::Idle, trace);
            trace.push(EventKind::Arrived { manipulator: id, station: target });
            debug!(manipulator = %id, station = %target, "arrived");
            return Ok(true);
        }
        Ok(false)
    }

    /// Which way `id` is travelling, if it is moving at all.
    fn heading(&self, id: ManipulatorId, world: &World) -> Option<Heading> {
        let m = self.get(id).ok()?;
        if m.state != ManipulatorState::Moving {
            return None;
        }
        let goal = world.stations.distance(m.target?).ok()?;
        match m.rail_pos.cmp(&goal) {
            Ordering::Less => Some(Heading::Right),
            Ordering::Greater => Some(Heading::Left),
            Ordering::Equal => None,
        }
    }

    /// Greedy one-neighbor collision check after `id` has moved.
    ///
    /// Only the immediate neighbor in the direction of travel is inspected.
    /// If the mover reached or crossed it, the neighbor is shoved one speed
    /// increment onward.  The mover retreats one increment instead when the
    /// neighbor is in a protected state, or when the neighbor is travelling
    /// head-on toward it and has right of way.
    fn resolve_contact(&mut self, id: ManipulatorId, heading: Heading, world: &World, trace: &mut Trace) {
        let neighbor = match heading {
            Heading::Right => self.next(id),
            Heading::Left => self.previous(id),
        };
        let Some(neighbor) = neighbor else {
            return;
        };
        let oncoming = self.heading(neighbor, world) == Some(heading.reversed());

        let speed = self.speed();
        let (me, other) = self.pair_mut(id, neighbor);
        let touching = match heading {
            Heading::Right => me.rail_pos >= other.rail_pos,
            Heading::Left => me.rail_pos <= other.rail_pos,
        };
        if !touching {
            return;
        }

        let step = match heading {
            Heading::Right => speed,
            Heading::Left => Millimetres(-speed.0),
        };

        if other.is_protected() || (oncoming && !has_right_of_way(me, other)) {
            me.rail_pos -= step;
            trace.push(EventKind::Yielded { manipulator: id, blocker: neighbor });
            debug!(manipulator = %id, blocker = %neighbor, state = %other.state, oncoming, "yielding to neighbor");
        } else {
            other.rail_pos += step;
            trace.push(EventKind::Shoved { by: id, manipulator: neighbor, to: other.rail_pos });
            debug!(manipulator = %neighbor, by = %id, to = other.rail_pos.0, "shoved out of the way");
        }
    }
}

/// Priority between two manipulators meeting head-on: a loaded manipulator
/// beats an empty one, otherwise the lower id goes first.
fn has_right_of_way(me: &Manipulator, other: &Manipulator) -> bool {
    match (me.held.is_some(), other.held.is_some()) {
        (true, false) => true,
        (false, true) => false,
        _ => me.id < other.id,
    }
}

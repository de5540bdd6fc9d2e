//! Carrier handling: the timed operations a manipulator performs once it
//! is over a station, and the per-tick dispatch that drives them.
//!
//! A full transfer of one carrier between two stations looks like:
//!
//! ```text
//!   Moving ─► Idle(target) ─► Lifting ─► Dripping ─► Moving ─► Idle(target)
//!                                                                  │
//!                                Idle ◄─ Submerging ◄─ (Holding) ◄─┘
//! ```
//!
//! The entry station replaces `Lifting`/`Dripping` with `Loading`.

use pl_core::{CarrierId, ManipulatorId, StationId};
use pl_line::{CarrierState, World};
use tracing::debug;

use crate::{EventKind, ManipulatorState, Rail, RailError, RailResult, Trace};

/// Move `carrier` to state `to`, recording the transition.
pub fn transition_carrier(
    world:   &mut World,
    trace:   &mut Trace,
    carrier: CarrierId,
    to:      CarrierState,
) -> RailResult<()> {
    let from = world.carrier_mut(carrier)?.transition(to)?;
    trace.push(EventKind::CarrierState { carrier, from, to });
    debug!(carrier = %carrier, %from, %to, "carrier state");
    Ok(())
}

impl Rail {
    /// Run one tick of manipulator `id`.
    ///
    /// A manipulator that completes its travel this tick also starts its
    /// follow-up operation this tick.
    pub fn step(&mut self, id: ManipulatorId, world: &mut World, trace: &mut Trace) -> RailResult<()> {
        let m = self.get(id)?;
        match m.state() {
            ManipulatorState::Idle => {
                if m.target().is_some() {
                    self.on_arrival(id, world, trace)?;
                }
                Ok(())
            }
            ManipulatorState::Moving => {
                if self.update_movement(id, world, trace)? {
                    self.on_arrival(id, world, trace)?;
                }
                Ok(())
            }
            ManipulatorState::Submerging => self.lower_carrier(id, world, trace),
            ManipulatorState::Lifting => self.lift_carrier(id, world, trace),
            ManipulatorState::Dripping => self.drip_carrier(id, world, trace),
            ManipulatorState::Loading => self.continue_loading(id, world, trace),
            ManipulatorState::Holding => self.hold(id, world, trace),
        }
    }

    /// Decide the follow-up for a manipulator idling over its target.
    fn on_arrival(&mut self, id: ManipulatorId, world: &mut World, trace: &mut Trace) -> RailResult<()> {
        if !self.is_over_target(id, world)? {
            self.resume_travel(id, world, trace)?;
            return Ok(());
        }

        let m = self.get(id)?;
        let target = m.target().ok_or(RailError::NoTarget(id))?;

        if m.held().is_some() {
            if world.stations.occupant(target)?.is_none() {
                self.dismount_carrier(id, trace)?;
            } else {
                self.get_mut(id)?.enter(ManipulatorState::Holding, trace);
            }
            return Ok(());
        }

        let occupant = world.occupant_of(target)?.map(|c| c.state());
        match occupant {
            Some(CarrierState::ToBeLoaded) if target == world.stations.entry() => {
                let m = self.get_mut(id)?;
                m.elapsed = 0;
                m.enter(ManipulatorState::Loading, trace);
                if self.load_ticks() == 0 {
                    self.load_into_line(id, world, trace)?;
                }
            }
            Some(CarrierState::BathServiced) => self.mount_carrier(id, trace)?,
            _ => {
                let m = self.get_mut(id)?;
                m.target = None;
                m.enter(ManipulatorState::Idle, trace);
            }
        }
        Ok(())
    }

    /// Begin lowering the held carrier into the target station.
    pub fn dismount_carrier(&mut self, id: ManipulatorId, trace: &mut Trace) -> RailResult<()> {
        let m = self.get_mut(id)?;
        if m.held.is_none() {
            return Err(RailError::NotHolding(id));
        }
        m.elapsed = 0;
        m.enter(ManipulatorState::Submerging, trace);
        Ok(())
    }

    /// Count down the submerge operation; on completion the carrier is in
    /// the station and bathing, and the manipulator is free.
    pub fn lower_carrier(&mut self, id: ManipulatorId, world: &mut World, trace: &mut Trace) -> RailResult<()> {
        let lift_ticks = self.lift_ticks();
        let m = self.get_mut(id)?;
        m.elapsed += 1;
        if m.elapsed < lift_ticks {
            return Ok(());
        }

        let carrier = m.held.ok_or(RailError::NotHolding(id))?;
        let station = m.target.ok_or(RailError::NoTarget(id))?;
        world.stations.place(station, carrier)?;
        transition_carrier(world, trace, carrier, CarrierState::Bathing)?;

        let m = self.get_mut(id)?;
        m.held = None;
        m.target = None;
        m.elapsed = 0;
        m.enter(ManipulatorState::Idle, trace);
        trace.push(EventKind::Deposited { manipulator: id, carrier, station });
        debug!(manipulator = %id, carrier = %carrier, station = %station, "carrier deposited");
        Ok(())
    }

    /// Begin raising the carrier out of the target station.
    pub fn mount_carrier(&mut self, id: ManipulatorId, trace: &mut Trace) -> RailResult<()> {
        let m = self.get_mut(id)?;
        m.elapsed = 0;
        m.enter(ManipulatorState::Lifting, trace);
        Ok(())
    }

    /// Count down the lift operation; on completion the carrier is held
    /// above the station and starts dripping.
    pub fn lift_carrier(&mut self, id: ManipulatorId, world: &mut World, trace: &mut Trace) -> RailResult<()> {
        let lift_ticks = self.lift_ticks();
        let m = self.get_mut(id)?;
        m.elapsed += 1;
        if m.elapsed < lift_ticks {
            return Ok(());
        }

        let station = m.target.ok_or(RailError::NoTarget(id))?;
        let carrier = world
            .stations
            .take(station)?
            .ok_or(RailError::NothingToPickUp { manipulator: id, station })?;
        let c = world.carrier_mut(carrier)?;
        c.complete_current_step();
        c.advance_step()?;
        transition_carrier(world, trace, carrier, CarrierState::Dripping)?;

        let m = self.get_mut(id)?;
        m.held = Some(carrier);
        m.elapsed = 0;
        m.enter(ManipulatorState::Dripping, trace);
        trace.push(EventKind::Lifted { manipulator: id, carrier, station });
        debug!(manipulator = %id, carrier = %carrier, station = %station, "carrier lifted");
        Ok(())
    }

    /// Hold the lifted carrier over its old station for the drip time of
    /// the step it just finished, then carry it on.
    pub fn drip_carrier(&mut self, id: ManipulatorId, world: &mut World, trace: &mut Trace) -> RailResult<()> {
        let m = self.get(id)?;
        let carrier = m.held().ok_or(RailError::NotHolding(id))?;
        let c = world.carrier(carrier)?;
        let drip_ticks = c.previous_step().map_or(0, |s| s.drip_ticks);
        let destination = c
            .current_station()
            .ok_or(pl_line::LineError::RecipeExhausted(carrier))?;

        let m = self.get_mut(id)?;
        m.elapsed += 1;
        if m.elapsed < drip_ticks {
            return Ok(());
        }
        if !m.can_reach(destination) {
            return Err(RailError::OutOfReach { manipulator: id, station: destination });
        }

        transition_carrier(world, trace, carrier, CarrierState::Serviced)?;
        self.move_to(id, destination, world, trace)
    }

    fn continue_loading(&mut self, id: ManipulatorId, world: &mut World, trace: &mut Trace) -> RailResult<()> {
        if !self.is_over_target(id, world)? {
            return self.resume_travel(id, world, trace);
        }
        let load_ticks = self.load_ticks();
        let m = self.get_mut(id)?;
        m.elapsed += 1;
        if m.elapsed >= load_ticks {
            self.load_into_line(id, world, trace)?;
        }
        Ok(())
    }

    /// Take the waiting carrier off the entry station and head for the
    /// first processing station of its recipe.
    pub fn load_into_line(&mut self, id: ManipulatorId, world: &mut World, trace: &mut Trace) -> RailResult<()> {
        let entry = world.stations.entry();
        let carrier = world
            .stations
            .occupant(entry)?
            .ok_or(RailError::NothingToPickUp { manipulator: id, station: entry })?;
        let destination = world
            .carrier(carrier)?
            .next_station()
            .ok_or(pl_line::LineError::RecipeExhausted(carrier))?;
        if !self.get(id)?.can_reach(destination) {
            return Err(RailError::OutOfReach { manipulator: id, station: destination });
        }

        world.stations.take(entry)?;
        let c = world.carrier_mut(carrier)?;
        c.complete_current_step();
        c.advance_step()?;
        transition_carrier(world, trace, carrier, CarrierState::Serviced)?;

        let m = self.get_mut(id)?;
        m.held = Some(carrier);
        m.elapsed = 0;
        trace.push(EventKind::Lifted { manipulator: id, carrier, station: entry });
        debug!(manipulator = %id, carrier = %carrier, "carrier loaded into line");
        self.move_to(id, destination, world, trace)
    }

    /// Wait over an occupied target with a carrier in hand.
    fn hold(&mut self, id: ManipulatorId, world: &mut World, trace: &mut Trace) -> RailResult<()> {
        if !self.is_over_target(id, world)? {
            return self.resume_travel(id, world, trace);
        }
        let target = self.get(id)?.target().ok_or(RailError::NoTarget(id))?;
        if world.stations.occupant(target)?.is_none() {
            self.dismount_carrier(id, trace)?;
        }
        Ok(())
    }

    fn is_over_target(&self, id: ManipulatorId, world: &World) -> RailResult<bool> {
        let m = self.get(id)?;
        let target: StationId = m.target().ok_or(RailError::NoTarget(id))?;
        Ok(m.rail_pos() == world.stations.distance(target)?)
    }

    /// Head back to the target after being shoved off it.
    fn resume_travel(&mut self, id: ManipulatorId, world: &mut World, trace: &mut Trace) -> RailResult<()> {
        let m = self.get_mut(id)?;
        m.enter(ManipulatorState::Moving, trace);
        if self.update_movement(id, world, trace)? {
            self.on_arrival(id, world, trace)?;
        }
        Ok(())
    }
}

//! The `Sim` struct and its tick loop.

use std::collections::BTreeSet;

use pl_core::{CarrierId, LineConfig, ManipulatorId, StationId, Tick};
use pl_line::{CarrierState, WorkOrder, World};
use pl_rail::{transition_carrier, EventKind, Rail, RailError, Trace};
use tracing::{debug, info, warn};

use crate::{Completion, Outcome, RunReport, SimObserver, SimResult, SimView};

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The line scheduler.
///
/// Every tick runs five phases in a fixed order:
///
/// 1. **Admit**: if the entry station is empty, the next carrier of the
///    work order is placed on it.
/// 2. **Drain**: a carrier on the exit station is finished and its tick
///    recorded.
/// 3. **Manipulators**: one operation per manipulator, in ascending id
///    (rail) order.
/// 4. **Tasking**: stations are scanned in line order for carriers that
///    are `Unserviced` or `BathCompleted`; each is given to the first
///    available manipulator reaching both its current and next station,
///    provided the next station is free and unclaimed.
/// 5. **Timers**: every bathing carrier accrues one tick of submersion.
///
/// Nothing in the loop is random, so equal inputs give equal runs.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    pub config:     LineConfig,
    /// Stations and carriers.
    pub world:      World,
    /// Manipulators in rail order.
    pub rail:       Rail,
    /// Carriers not yet admitted.
    pub work_order: WorkOrder,
    pub(crate) now:      Tick,
    pub(crate) trace:    Trace,
    pub(crate) finished: Vec<Completion>,
}

impl Sim {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run until every carrier has finished or the tick ceiling is reached.
    ///
    /// A stalled run is not an error here: it is reported through
    /// [`RunReport::outcome`].  Use [`RunReport::into_result`] to treat it
    /// as one.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<RunReport> {
        let outcome = loop {
            if self.is_complete() {
                break Outcome::Completed;
            }
            if self.now.0 >= self.config.max_ticks {
                warn!(
                    ticks = self.now.0,
                    pending = self.work_order.remaining(),
                    finished = self.finished.len(),
                    "tick ceiling reached; line stalled"
                );
                break Outcome::Stalled;
            }
            self.step(observer)?;
        };
        observer.on_sim_end(self.now, outcome);
        Ok(self.report(outcome))
    }

    /// Run exactly `n` ticks, or fewer if the work order completes first.
    ///
    /// Ignores the tick ceiling.  Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            if self.is_complete() {
                break;
            }
            self.step(observer)?;
        }
        Ok(())
    }

    /// Process one tick.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.now;
        observer.on_tick_start(now);
        self.trace.set_tick(now);
        let finished_before = self.finished.len();

        self.admit(now)?;
        self.drain_exit(now)?;
        self.drive_manipulators()?;
        self.assign_tasks()?;
        self.advance_timers()?;

        for event in self.trace.drain() {
            observer.on_event(&event);
        }
        for completion in &self.finished[finished_before..] {
            observer.on_carrier_finished(completion);
        }
        observer.on_tick_end(now, SimView { world: &self.world, rail: &self.rail });

        self.now = now.next();
        Ok(())
    }

    /// The next tick to be processed; equally, the number processed so far.
    #[inline]
    pub fn now(&self) -> Tick {
        self.now
    }

    /// `true` once every carrier of the work order has left the line.
    pub fn is_complete(&self) -> bool {
        self.work_order.is_exhausted() && self.finished.len() == self.work_order.total()
    }

    pub fn completions(&self) -> &[Completion] {
        &self.finished
    }

    /// Snapshot the run so far.
    pub fn report(&self, outcome: Outcome) -> RunReport {
        let pending: Vec<CarrierId> = self.work_order.pending().collect();
        let done: BTreeSet<CarrierId> = self.finished.iter().map(|c| c.carrier).collect();
        let waiting: BTreeSet<CarrierId> = pending.iter().copied().collect();
        let active = self
            .world
            .carriers
            .iter()
            .map(|c| c.id)
            .filter(|id| !done.contains(id) && !waiting.contains(id))
            .collect();
        RunReport::new(outcome, self.now.0, self.finished.clone(), pending, active)
    }

    // ── Tick phases ───────────────────────────────────────────────────────

    fn admit(&mut self, now: Tick) -> SimResult<()> {
        let entry = self.world.stations.entry();
        if self.world.stations.occupant(entry)?.is_some() {
            return Ok(());
        }
        let Some(carrier) = self.work_order.pop_next() else {
            return Ok(());
        };
        self.world.stations.place(entry, carrier)?;
        self.trace.push(EventKind::CarrierAdmitted { carrier, station: entry });
        info!(tick = %now, carrier = %carrier, "carrier admitted");
        Ok(())
    }

    fn drain_exit(&mut self, now: Tick) -> SimResult<()> {
        let exit = self.world.stations.exit();
        let Some(carrier) = self.world.stations.take(exit)? else {
            return Ok(());
        };
        let c = self.world.carrier_mut(carrier)?;
        c.complete_current_step();
        let completion = Completion {
            carrier,
            template: c.template,
            recipe:   c.recipe().name().to_owned(),
            tick:     now,
        };
        self.trace.push(EventKind::CarrierFinished { carrier, station: exit });
        info!(tick = %now, carrier = %carrier, recipe = %completion.recipe, "carrier finished");
        self.finished.push(completion);
        Ok(())
    }

    fn drive_manipulators(&mut self) -> SimResult<()> {
        let ids: Vec<_> = self.rail.ids().collect();
        for id in ids {
            match self.rail.step(id, &mut self.world, &mut self.trace) {
                Ok(()) => {}
                Err(e) if e.is_local() => {
                    warn!(manipulator = %id, error = %e, "manipulator operation refused");
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    fn assign_tasks(&mut self) -> SimResult<()> {
        let ready: Vec<(StationId, CarrierId)> = self
            .world
            .stationed()
            .filter(|&(_, c)| {
                self.world.carrier(c).is_ok_and(|c| {
                    matches!(c.state(), CarrierState::Unserviced | CarrierState::BathCompleted)
                })
            })
            .collect();

        for (station, carrier) in ready {
            let Some(next) = self.world.carrier(carrier)?.next_station() else {
                continue;
            };
            if !self.world.stations.get(next)?.is_free() {
                continue;
            }
            let Some(m) = self.rail.find_available(&[station, next]) else {
                continue;
            };

            self.dispatch(m, station, carrier, next)?;
        }
        Ok(())
    }

    /// Send manipulator `m` to pick `carrier` up from `station` for delivery
    /// to `next`.
    ///
    /// The carrier's state and the claim on `next` change only once the move
    /// has been accepted; a refused move leaves both untouched and returns
    /// `false`.
    pub(crate) fn dispatch(
        &mut self,
        m:       ManipulatorId,
        station: StationId,
        carrier: CarrierId,
        next:    StationId,
    ) -> SimResult<bool> {
        match self.rail.move_to(m, station, &self.world, &mut self.trace) {
            Ok(()) => {}
            Err(e @ RailError::OutOfReach { .. }) => {
                warn!(manipulator = %m, error = %e, "tasked move refused");
                return Ok(false);
            }
            Err(e) => return Err(e.into()),
        }

        let to = match self.world.carrier(carrier)?.state() {
            CarrierState::Unserviced => CarrierState::ToBeLoaded,
            _ => CarrierState::BathServiced,
        };
        transition_carrier(&mut self.world, &mut self.trace, carrier, to)?;
        self.world.stations.claim(next, carrier)?;
        self.trace.push(EventKind::Tasked { manipulator: m, carrier, station });
        debug!(manipulator = %m, carrier = %carrier, from = %station, to = %next, "tasked");
        Ok(true)
    }

    fn advance_timers(&mut self) -> SimResult<()> {
        let bathing: Vec<CarrierId> = self
            .world
            .stationed()
            .map(|(_, c)| c)
            .filter(|&c| {
                self.world
                    .carrier(c)
                    .is_ok_and(|c| c.state() == CarrierState::Bathing)
            })
            .collect();

        for carrier in bathing {
            if self.world.carrier_mut(carrier)?.advance_submersion_timer()? {
                self.trace.push(EventKind::CarrierState {
                    carrier,
                    from: CarrierState::Bathing,
                    to:   CarrierState::BathCompleted,
                });
            }
        }
        Ok(())
    }
}

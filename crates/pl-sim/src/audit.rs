//! Replay check for externally planned schedules.
//!
//! An offline optimizer hands back, per carrier, the tick each recipe
//! station is entered, plus an overall cycle time.  [`audit_schedule`]
//! checks such a plan against the recipes without running the tick loop.
//! [`ScheduleRecorder`] produces the same format from a simulated run.

use std::collections::BTreeMap;
use std::fmt;

use pl_core::{CarrierId, StationId, Tick};
use pl_line::World;
use pl_rail::{EventKind, LineEvent};

use crate::{Completion, SimObserver};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlannedRun {
    pub carrier: CarrierId,
    /// `(station, start tick)` per recipe step.
    pub visits:  Vec<(StationId, Tick)>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlannedSchedule {
    pub runs:       Vec<PlannedRun>,
    pub cycle_time: Tick,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScheduleViolation {
    UnknownCarrier(CarrierId),
    /// The planned stations differ from the carrier's recipe.
    RouteMismatch { carrier: CarrierId },
    /// A visit starts before the previous step's submersion is over.
    TooEarly {
        carrier:  CarrierId,
        station:  StationId,
        start:    Tick,
        earliest: Tick,
    },
    /// Two carriers planned into one station at once.
    Overlap {
        station: StationId,
        first:   CarrierId,
        second:  CarrierId,
        at:      Tick,
    },
    CycleTimeTooShort { cycle_time: Tick, last_start: Tick },
}

impl fmt::Display for ScheduleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleViolation::UnknownCarrier(c) => write!(f, "{c} is not part of the work order"),
            ScheduleViolation::RouteMismatch { carrier } => {
                write!(f, "{carrier}: planned stations differ from its recipe")
            }
            ScheduleViolation::TooEarly { carrier, station, start, earliest } => write!(
                f,
                "{carrier}: enters {station} at {start}, earliest possible is {earliest}"
            ),
            ScheduleViolation::Overlap { station, first, second, at } => {
                write!(f, "{station}: {second} planned in at {at} while {first} is still there")
            }
            ScheduleViolation::CycleTimeTooShort { cycle_time, last_start } => write!(
                f,
                "cycle time {cycle_time} ends before the last planned start {last_start}"
            ),
        }
    }
}

/// Ticks a planned visit blocks its station: the submersion time, and at
/// least one tick.
fn blocking_ticks(submersion: u32) -> u64 {
    u64::from(submersion.max(1))
}

/// Statically check `plan` against the recipes of the carriers in `world`.
///
/// Returns every violation found; an empty vector means the plan is
/// consistent with the capacity and submersion constraints.
pub fn audit_schedule(plan: &PlannedSchedule, world: &World) -> Vec<ScheduleViolation> {
    let mut violations = Vec::new();
    let mut occupancy: BTreeMap<StationId, Vec<(Tick, Tick, CarrierId)>> = BTreeMap::new();
    let mut last_start = Tick::ZERO;

    for run in &plan.runs {
        let Ok(carrier) = world.carrier(run.carrier) else {
            violations.push(ScheduleViolation::UnknownCarrier(run.carrier));
            continue;
        };
        let steps = carrier.recipe().steps();
        let route_matches = steps.len() == run.visits.len()
            && steps.iter().zip(&run.visits).all(|(s, &(station, _))| s.station == station);
        if !route_matches {
            violations.push(ScheduleViolation::RouteMismatch { carrier: run.carrier });
            continue;
        }

        let mut earliest = Tick::ZERO;
        for (step, &(station, start)) in steps.iter().zip(&run.visits) {
            if start < earliest {
                violations.push(ScheduleViolation::TooEarly {
                    carrier: run.carrier,
                    station,
                    start,
                    earliest,
                });
            }
            let end = start + blocking_ticks(step.submersion_ticks);
            occupancy.entry(station).or_default().push((start, end, run.carrier));
            earliest = end;
            last_start = last_start.max(start);
        }
    }

    for (&station, intervals) in occupancy.iter_mut() {
        intervals.sort();
        for pair in intervals.windows(2) {
            let (_, first_end, first) = pair[0];
            let (second_start, _, second) = pair[1];
            if second_start < first_end {
                violations.push(ScheduleViolation::Overlap { station, first, second, at: second_start });
            }
        }
    }

    if plan.cycle_time < last_start {
        violations.push(ScheduleViolation::CycleTimeTooShort { cycle_time: plan.cycle_time, last_start });
    }

    violations
}

// ── ScheduleRecorder ──────────────────────────────────────────────────────────

/// Records a simulated run as a [`PlannedSchedule`]: admission at the entry,
/// then every deposit.
#[derive(Default, Debug)]
pub struct ScheduleRecorder {
    visits:      BTreeMap<CarrierId, Vec<(StationId, Tick)>>,
    last_finish: Tick,
}

impl ScheduleRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded schedule; the cycle time is the last completion tick.
    pub fn into_schedule(self) -> PlannedSchedule {
        PlannedSchedule {
            runs: self
                .visits
                .into_iter()
                .map(|(carrier, visits)| PlannedRun { carrier, visits })
                .collect(),
            cycle_time: self.last_finish,
        }
    }
}

impl SimObserver for ScheduleRecorder {
    fn on_event(&mut self, event: &LineEvent) {
        match event.kind {
            EventKind::CarrierAdmitted { carrier, station }
            | EventKind::Deposited { carrier, station, .. } => {
                self.visits.entry(carrier).or_default().push((station, event.tick));
            }
            _ => {}
        }
    }

    fn on_carrier_finished(&mut self, completion: &Completion) {
        self.last_finish = self.last_finish.max(completion.tick);
    }
}

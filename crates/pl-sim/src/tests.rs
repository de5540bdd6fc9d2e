//! Integration tests for pl-sim.

use std::collections::BTreeSet;

use pl_core::{CarrierId, LineConfig, ManipulatorId, StationId, TemplateId, Tick};
use pl_line::{CarrierState, StationSpec, TemplateLibrary};
use pl_rail::{EventKind, ManipulatorSpec};

use crate::{
    EventLog, Infeasibility, NoopObserver, Outcome, Sim, SimBuilder, SimError, SimObserver, SimView,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// `n` stations `spacing_m` apart; first and last are the loader and
/// unloader.
fn evenly_spaced(n: usize, spacing_m: f64) -> Vec<StationSpec> {
    (0..n)
        .map(|i| {
            let endpoint = i == 0 || i + 1 == n;
            StationSpec::new(format!("S{i}"), i as f64 * spacing_m, !endpoint)
        })
        .collect()
}

fn template(steps: &[(u32, u32)]) -> (TemplateLibrary, TemplateId) {
    let mut lib = TemplateLibrary::new();
    let id = lib
        .add("recipe", steps.iter().map(|&(s, t)| (StationId(s), t)).collect())
        .unwrap();
    (lib, id)
}

/// One manipulator over entry (0 m), one bath (6 m), exit (12 m).
fn single_manipulator_sim(carriers: usize, config: LineConfig) -> Sim {
    let (lib, t) = template(&[(0, 0), (1, 3), (2, 0)]);
    SimBuilder::new(config, lib)
        .stations(evenly_spaced(3, 6.0))
        .manipulators([ManipulatorSpec::span(0, 2, 0)])
        .work_order(vec![t; carriers])
        .build()
        .unwrap()
}

/// Seven stations 3 m apart and three manipulators handing off
/// at stations 2 and 4.
fn three_manipulator_sim(carriers: usize) -> Sim {
    let (lib, t) = template(&[(0, 0), (1, 5), (2, 3), (3, 5), (4, 3), (5, 5), (6, 0)]);
    SimBuilder::new(LineConfig::default(), lib)
        .stations(evenly_spaced(7, 3.0))
        .manipulators([
            ManipulatorSpec::span(0, 2, 0),
            ManipulatorSpec::span(2, 4, 3),
            ManipulatorSpec::span(4, 6, 5),
        ])
        .work_order(vec![t; carriers])
        .build()
        .unwrap()
}

/// The 24-station pretreatment line: five manipulators, four recipes and
/// a five-carrier order.
fn production_line_sim() -> Sim {
    const DISTANCES_MM: [u32; 24] = [
        0, 2752, 6016, 9626, 12338, 15069, 17381, 19706, 22018, 24822, 27241, 29550, 31859,
        34282, 36696, 39006, 41323, 43633, 45955, 49805, 53073, 55377, 57687, 60000,
    ];
    let stations = DISTANCES_MM.iter().enumerate().map(|(i, &mm)| {
        let endpoint = i == 0 || i + 1 == DISTANCES_MM.len();
        StationSpec::new(format!("S{i}"), f64::from(mm) / 1000.0, !endpoint)
    });

    let mut lib = TemplateLibrary::new();
    let recipes: [&[(u32, u32)]; 4] = [
        &[(0, 0), (5, 1), (10, 3), (12, 5), (17, 3), (23, 0)],
        &[(0, 0), (5, 4), (10, 3), (12, 5), (17, 3), (23, 0)],
        &[(0, 0), (5, 4), (10, 2), (12, 5), (17, 3), (23, 0)],
        &[(0, 0), (4, 50), (8, 60), (13, 13), (17, 10), (23, 0)],
    ];
    let ids: Vec<TemplateId> = recipes
        .iter()
        .enumerate()
        .map(|(i, steps)| {
            lib.add(format!("T{}", i + 1), steps.iter().map(|&(s, t)| (StationId(s), t)).collect())
                .unwrap()
        })
        .collect();

    SimBuilder::new(LineConfig::default(), lib)
        .stations(stations)
        .manipulators([
            ManipulatorSpec::span(0, 5, 0),
            ManipulatorSpec::span(4, 10, 5),
            ManipulatorSpec::span(8, 13, 9),
            ManipulatorSpec::span(12, 17, 14),
            ManipulatorSpec::span(17, 23, 18),
        ])
        .work_order(vec![ids[0], ids[3], ids[1], ids[2], ids[0]])
        .build()
        .unwrap()
}

/// Checks at every tick end that no carrier is in two places at once.
#[derive(Default)]
struct PlacementCheck {
    ticks:      u64,
    violations: Vec<(Tick, CarrierId)>,
}

impl SimObserver for PlacementCheck {
    fn on_tick_end(&mut self, tick: Tick, view: SimView<'_>) {
        self.ticks += 1;
        let mut seen = BTreeSet::new();
        let stationed = view.world.stations.iter().filter_map(|s| s.occupant());
        let held = view.rail.iter().filter_map(|m| m.held());
        for carrier in stationed.chain(held) {
            if !seen.insert(carrier) {
                self.violations.push((tick, carrier));
            }
        }
    }
}

const M0: ManipulatorId = ManipulatorId(0);
const M1: ManipulatorId = ManipulatorId(1);

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_with_valid_line() {
        let sim = single_manipulator_sim(2, LineConfig::default());
        assert_eq!(sim.world.stations.len(), 3);
        assert_eq!(sim.rail.len(), 1);
        assert_eq!(sim.work_order.total(), 2);
        assert_eq!(sim.now(), Tick::ZERO);
    }

    #[test]
    fn zero_speed_rejected() {
        let (lib, t) = template(&[(0, 0), (1, 3), (2, 0)]);
        let config = LineConfig { speed_mm_per_tick: 0, ..LineConfig::default() };
        let result = SimBuilder::new(config, lib)
            .stations(evenly_spaced(3, 6.0))
            .manipulators([ManipulatorSpec::span(0, 2, 0)])
            .work_order(vec![t])
            .build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn malformed_station_list_rejected() {
        let (lib, t) = template(&[(0, 0), (1, 0)]);
        let result = SimBuilder::new(LineConfig::default(), lib)
            .stations([StationSpec::new("in", 5.0, false), StationSpec::new("out", 1.0, false)])
            .manipulators([ManipulatorSpec::span(0, 1, 0)])
            .work_order(vec![t])
            .build();
        assert!(matches!(result, Err(SimError::Line(_))));
    }

    #[test]
    fn start_outside_reach_rejected() {
        let (lib, t) = template(&[(0, 0), (1, 3), (2, 0)]);
        let result = SimBuilder::new(LineConfig::default(), lib)
            .stations(evenly_spaced(3, 6.0))
            .manipulators([ManipulatorSpec::span(0, 1, 2)])
            .work_order(vec![t])
            .build();
        assert!(matches!(result, Err(SimError::Rail(_))));
    }

    #[test]
    fn unknown_template_rejected() {
        let (lib, _) = template(&[(0, 0), (1, 3), (2, 0)]);
        let result = SimBuilder::new(LineConfig::default(), lib)
            .stations(evenly_spaced(3, 6.0))
            .manipulators([ManipulatorSpec::span(0, 2, 0)])
            .work_order(vec![TemplateId(9)])
            .build();
        assert!(matches!(result, Err(SimError::Line(_))));
    }

    #[test]
    fn mixed_work_order_is_seeded() {
        let build = || {
            let mut lib = TemplateLibrary::new();
            lib.add("a", vec![(StationId(0), 0), (StationId(1), 2), (StationId(2), 0)]).unwrap();
            lib.add("b", vec![(StationId(0), 0), (StationId(1), 5), (StationId(2), 0)]).unwrap();
            SimBuilder::new(LineConfig::default(), lib)
                .stations(evenly_spaced(3, 6.0))
                .manipulators([ManipulatorSpec::span(0, 2, 0)])
                .mixed_work_order(8, 11)
                .build()
                .unwrap()
        };
        let a = build();
        let b = build();
        let templates = |sim: &Sim| sim.world.carriers.iter().map(|c| c.template).collect::<Vec<_>>();
        assert_eq!(a.work_order.total(), 8);
        assert_eq!(templates(&a), templates(&b));
    }
}

// ── Validator ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod validator_tests {
    use super::*;

    fn build_with(
        steps: &[(u32, u32)],
        manipulators: Vec<ManipulatorSpec>,
    ) -> Result<Sim, SimError> {
        let (lib, t) = template(steps);
        SimBuilder::new(LineConfig::default(), lib)
            .stations(evenly_spaced(5, 3.0))
            .manipulators(manipulators)
            .work_order(vec![t])
            .build()
    }

    fn problems(result: Result<Sim, SimError>) -> Vec<Infeasibility> {
        match result {
            Err(SimError::Infeasible(p)) => p,
            Err(e) => panic!("unexpected error: {e}"),
            Ok(_) => panic!("work order accepted"),
        }
    }

    /// Stations 1 and 3 have no common manipulator.
    #[test]
    fn disjoint_reach_rejected_before_tick_zero() {
        let result = build_with(
            &[(0, 0), (1, 1), (3, 1), (4, 0)],
            vec![ManipulatorSpec::span(0, 2, 0), ManipulatorSpec::span(2, 4, 3)],
        );
        assert_eq!(
            problems(result),
            vec![Infeasibility::NoHandOff { carrier: CarrierId(0), from: StationId(1), to: StationId(3) }]
        );
    }

    #[test]
    fn wrong_endpoints_rejected() {
        let result = build_with(&[(1, 0), (2, 1), (4, 0)], vec![ManipulatorSpec::span(0, 4, 0)]);
        assert_eq!(
            problems(result),
            vec![Infeasibility::WrongEndpoints { carrier: CarrierId(0), first: StationId(1), last: StationId(4) }]
        );
    }

    #[test]
    fn unknown_station_rejected() {
        let result = build_with(&[(0, 0), (7, 1), (4, 0)], vec![ManipulatorSpec::span(0, 4, 0)]);
        assert_eq!(
            problems(result),
            vec![Infeasibility::UnknownStation { carrier: CarrierId(0), station: StationId(7) }]
        );
    }

    #[test]
    fn rail_gap_reported() {
        let result = build_with(
            &[(0, 0), (1, 1), (4, 0)],
            vec![ManipulatorSpec::span(0, 1, 0), ManipulatorSpec::span(2, 4, 2)],
        );
        let p = problems(result);
        assert_eq!(p[0], Infeasibility::RailGap { left: M0, right: M1 });
        assert!(p.contains(&Infeasibility::NoHandOff { carrier: CarrierId(0), from: StationId(1), to: StationId(4) }));
    }

    #[test]
    fn interior_loader_visit_rejected() {
        let result = build_with(&[(0, 0), (1, 1), (0, 1), (4, 0)], vec![ManipulatorSpec::span(0, 4, 0)]);
        assert_eq!(
            problems(result),
            vec![Infeasibility::NotSubmersible { carrier: CarrierId(0), station: StationId(0) }]
        );
    }

    #[test]
    fn back_to_back_visit_rejected() {
        let result = build_with(&[(0, 0), (1, 1), (1, 1), (4, 0)], vec![ManipulatorSpec::span(0, 4, 0)]);
        assert_eq!(
            problems(result),
            vec![Infeasibility::RepeatedStation { carrier: CarrierId(0), station: StationId(1) }]
        );
    }

    #[test]
    fn infeasible_error_message_names_first_problem() {
        let err = build_with(
            &[(0, 0), (1, 1), (3, 1), (4, 0)],
            vec![ManipulatorSpec::span(0, 2, 0), ManipulatorSpec::span(2, 4, 3)],
        )
        .err()
        .unwrap();
        let msg = err.to_string();
        assert!(msg.contains("1 problem(s)"), "{msg}");
        assert!(msg.contains("StationId(1)") && msg.contains("StationId(3)"), "{msg}");
    }
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod scenario_tests {
    use super::*;

    /// Completion tick follows from the line constants.
    #[test]
    fn single_carrier_completion_tick() {
        let config = LineConfig::default();
        let mut sim = single_manipulator_sim(1, config.clone());
        let report = sim.run(&mut NoopObserver).unwrap();

        let travel = 12_000 / config.speed_mm_per_tick as u64;
        let lifts = 3 * u64::from(config.lift_ticks);
        let submersion = 3;
        let drip = 20;
        let load = u64::from(config.load_ticks);
        // Plus the tick on which the exit is drained.
        let expected = travel + lifts + submersion + drip + load + 1;

        assert_eq!(expected, 93);
        assert_eq!(report.outcome, Outcome::Completed);
        assert_eq!(report.completion_ticks(), vec![Tick(expected)]);
        assert_eq!(report.ticks, expected + 1);
        assert_eq!(report.average_interval, 0.0);
        assert!(report.pending.is_empty() && report.active.is_empty());
    }

    #[test]
    fn carrier_follows_state_cycle() {
        let mut sim = single_manipulator_sim(1, LineConfig::default());
        let mut log = EventLog::new();
        sim.run(&mut log).unwrap();

        let states: Vec<CarrierState> = log
            .for_carrier(CarrierId(0))
            .filter_map(|e| match e.kind {
                EventKind::CarrierState { to, .. } => Some(to),
                _ => None,
            })
            .collect();
        use CarrierState::*;
        assert_eq!(
            states,
            vec![
                ToBeLoaded, Serviced, Bathing, BathCompleted, BathServiced, Dripping, Serviced,
                Bathing, BathCompleted,
            ]
        );
        let carrier = sim.world.carrier(CarrierId(0)).unwrap();
        assert_eq!(carrier.recipe().completed_steps(), 3);
    }

    /// The hand-off station is served by both manipulators.
    #[test]
    fn hand_off_between_adjacent_manipulators() {
        let (lib, t) = template(&[(0, 0), (1, 2), (2, 1), (3, 2), (4, 0)]);
        let mut sim = SimBuilder::new(LineConfig::default(), lib)
            .stations(evenly_spaced(5, 3.0))
            .manipulators([ManipulatorSpec::span(0, 2, 0), ManipulatorSpec::span(2, 4, 3)])
            .work_order(vec![t])
            .build()
            .unwrap();
        let mut observer = (EventLog::new(), PlacementCheck::default());
        let report = sim.run(&mut observer).unwrap();
        let (log, check) = observer;

        assert!(report.is_completed());
        assert!(check.violations.is_empty(), "{:?}", check.violations);
        assert_eq!(check.ticks, report.ticks);

        let deposited = log
            .matching(|k| {
                matches!(k, EventKind::Deposited { manipulator: M0, station: StationId(2), .. })
            })
            .map(|e| e.tick)
            .collect::<Vec<_>>();
        let lifted = log
            .matching(|k| matches!(k, EventKind::Lifted { manipulator: M1, station: StationId(2), .. }))
            .map(|e| e.tick)
            .collect::<Vec<_>>();
        assert_eq!(deposited.len(), 1);
        assert_eq!(lifted.len(), 1);
        assert!(deposited[0] < lifted[0]);
    }

    /// Five carriers through three manipulators.
    #[test]
    fn five_carriers_complete_in_order() {
        let mut sim = three_manipulator_sim(5);
        let mut check = PlacementCheck::default();
        let report = sim.run(&mut check).unwrap().into_result().unwrap();

        let ticks = report.completion_ticks();
        assert_eq!(ticks.len(), 5);
        assert!(ticks.windows(2).all(|w| w[0] < w[1]), "{ticks:?}");
        assert!(report.average_interval > 0.0);
        assert!(check.violations.is_empty(), "{:?}", check.violations);
        let finished: Vec<CarrierId> = report.completions.iter().map(|c| c.carrier).collect();
        assert_eq!(finished, (0..5).map(CarrierId).collect::<Vec<_>>());
    }

    /// Manipulators 1 and 2 meet head-on between stations 8 and 10 while
    /// the first carriers are handed along; the loaded one must get through.
    #[test]
    fn production_line_completes() {
        let mut sim = production_line_sim();
        let mut observers = (EventLog::new(), PlacementCheck::default());
        let report = sim.run(&mut observers).unwrap();
        let (log, check) = observers;

        assert_eq!(report.outcome, Outcome::Completed, "{report}");
        assert_eq!(report.completion_ticks(), [350, 621, 756, 891, 1026].map(Tick));
        assert_eq!(report.ticks, 1027);
        let finished: Vec<CarrierId> = report.completions.iter().map(|c| c.carrier).collect();
        assert_eq!(finished, (0..5).map(CarrierId).collect::<Vec<_>>());
        assert!(check.violations.is_empty(), "{:?}", check.violations);
        assert!(log.matching(|k| matches!(k, EventKind::Yielded { .. })).count() > 0);
    }

    #[test]
    fn refused_dispatch_leaves_carrier_and_claim_untouched() {
        let mut sim = three_manipulator_sim(1);
        let c = sim.work_order.pop_next().unwrap();
        sim.world.stations.place(StationId(0), c).unwrap();

        let m2 = ManipulatorId(2);
        assert!(!sim.dispatch(m2, StationId(0), c, StationId(1)).unwrap());
        assert_eq!(sim.world.carrier(c).unwrap().state(), CarrierState::Unserviced);
        assert!(sim.world.stations.get(StationId(1)).unwrap().is_free());
        assert!(sim.rail.get(m2).unwrap().is_available());
        assert!(sim.trace.events().iter().any(|e| matches!(
            e.kind,
            EventKind::MoveRejected { manipulator, station: StationId(0) } if manipulator == m2
        )));

        assert!(sim.dispatch(M0, StationId(0), c, StationId(1)).unwrap());
        assert_eq!(sim.world.carrier(c).unwrap().state(), CarrierState::ToBeLoaded);
        assert_eq!(sim.world.stations.get(StationId(1)).unwrap().claimed_by(), Some(c));
    }

    #[test]
    fn runs_are_deterministic() {
        let run = || {
            let mut sim = three_manipulator_sim(5);
            let mut log = EventLog::new();
            let report = sim.run(&mut log).unwrap();
            (report.completion_ticks(), log.events)
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn tick_ceiling_reports_stall() {
        let config = LineConfig { max_ticks: 50, ..LineConfig::default() };
        let mut sim = single_manipulator_sim(2, config);
        let report = sim.run(&mut NoopObserver).unwrap();

        assert_eq!(report.outcome, Outcome::Stalled);
        assert_eq!(report.ticks, 50);
        assert!(report.completions.is_empty());
        assert!(report.pending.is_empty());
        assert_eq!(report.active, vec![CarrierId(0), CarrierId(1)]);
        assert!(matches!(
            report.into_result(),
            Err(SimError::Stalled { ticks: 50, pending: 0, active: 2 })
        ));
    }

    #[test]
    fn empty_work_order_completes_immediately() {
        let (lib, _) = template(&[(0, 0), (1, 3), (2, 0)]);
        let mut sim = SimBuilder::new(LineConfig::default(), lib)
            .stations(evenly_spaced(3, 6.0))
            .manipulators([ManipulatorSpec::span(0, 2, 0)])
            .build()
            .unwrap();
        let report = sim.run(&mut NoopObserver).unwrap();
        assert!(report.is_completed());
        assert_eq!(report.ticks, 0);
    }

    #[test]
    fn run_ticks_steps_incrementally() {
        let mut sim = single_manipulator_sim(1, LineConfig::default());
        sim.run_ticks(1, &mut NoopObserver).unwrap();
        let entry = sim.world.stations.entry();
        let carrier = sim.world.occupant_of(entry).unwrap().unwrap();
        assert_eq!(carrier.state(), CarrierState::ToBeLoaded);
        assert_eq!(sim.world.stations.get(StationId(1)).unwrap().claimed_by(), Some(carrier.id));

        sim.run_ticks(500, &mut NoopObserver).unwrap();
        assert!(sim.is_complete());
        assert_eq!(sim.now(), Tick(94));
    }

    #[test]
    fn second_carrier_waits_for_entry() {
        let mut sim = single_manipulator_sim(2, LineConfig::default());
        let mut log = EventLog::new();
        sim.run(&mut log).unwrap();
        let admitted: Vec<Tick> = log
            .matching(|k| matches!(k, EventKind::CarrierAdmitted { .. }))
            .map(|e| e.tick)
            .collect();
        // Loader is emptied when the first carrier is loaded at tick 2.
        assert_eq!(admitted, vec![Tick(0), Tick(3)]);
    }
}

// ── Report ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod report_tests {
    use crate::average_interval;
    use pl_core::Tick;

    #[test]
    fn average_of_gaps() {
        assert_eq!(average_interval(&[]), 0.0);
        assert_eq!(average_interval(&[Tick(7)]), 0.0);
        assert_eq!(average_interval(&[Tick(10), Tick(20), Tick(40)]), 15.0);
    }
}

// ── Schedule audit ────────────────────────────────────────────────────────────

#[cfg(test)]
mod audit_tests {
    use super::*;
    use crate::{audit_schedule, PlannedRun, PlannedSchedule, ScheduleRecorder, ScheduleViolation};

    fn plan(runs: Vec<(u32, Vec<(u32, u64)>)>, cycle_time: u64) -> PlannedSchedule {
        PlannedSchedule {
            runs: runs
                .into_iter()
                .map(|(c, visits)| PlannedRun {
                    carrier: CarrierId(c),
                    visits:  visits.into_iter().map(|(s, t)| (StationId(s), Tick(t))).collect(),
                })
                .collect(),
            cycle_time: Tick(cycle_time),
        }
    }

    #[test]
    fn simulated_schedule_passes_audit() {
        let mut sim = three_manipulator_sim(5);
        let mut recorder = ScheduleRecorder::new();
        let report = sim.run(&mut recorder).unwrap();
        let schedule = recorder.into_schedule();

        assert_eq!(schedule.runs.len(), 5);
        assert_eq!(Some(&schedule.cycle_time), report.completion_ticks().last());
        assert_eq!(audit_schedule(&schedule, &sim.world), vec![]);
    }

    #[test]
    fn consistent_plan_accepted() {
        let sim = single_manipulator_sim(2, LineConfig::default());
        let p = plan(vec![(0, vec![(0, 0), (1, 1), (2, 5)]), (1, vec![(0, 1), (1, 4), (2, 8)])], 10);
        assert_eq!(audit_schedule(&p, &sim.world), vec![]);
    }

    #[test]
    fn overlap_detected() {
        let sim = single_manipulator_sim(2, LineConfig::default());
        let p = plan(vec![(0, vec![(0, 0), (1, 1), (2, 5)]), (1, vec![(0, 1), (1, 3), (2, 8)])], 10);
        assert_eq!(
            audit_schedule(&p, &sim.world),
            vec![ScheduleViolation::Overlap {
                station: StationId(1),
                first:   CarrierId(0),
                second:  CarrierId(1),
                at:      Tick(3),
            }]
        );
    }

    #[test]
    fn early_start_detected() {
        let sim = single_manipulator_sim(1, LineConfig::default());
        let p = plan(vec![(0, vec![(0, 0), (1, 1), (2, 2)])], 10);
        assert_eq!(
            audit_schedule(&p, &sim.world),
            vec![ScheduleViolation::TooEarly {
                carrier:  CarrierId(0),
                station:  StationId(2),
                start:    Tick(2),
                earliest: Tick(4),
            }]
        );
    }

    #[test]
    fn route_and_carrier_mismatches_detected() {
        let sim = single_manipulator_sim(1, LineConfig::default());
        let p = plan(vec![(0, vec![(0, 0), (2, 5)]), (4, vec![(0, 0)])], 3);
        assert_eq!(
            audit_schedule(&p, &sim.world),
            vec![
                ScheduleViolation::RouteMismatch { carrier: CarrierId(0) },
                ScheduleViolation::UnknownCarrier(CarrierId(4)),
            ]
        );
    }

    #[test]
    fn short_cycle_time_detected() {
        let sim = single_manipulator_sim(1, LineConfig::default());
        let p = plan(vec![(0, vec![(0, 0), (1, 1), (2, 5)])], 4);
        assert_eq!(
            audit_schedule(&p, &sim.world),
            vec![ScheduleViolation::CycleTimeTooShort { cycle_time: Tick(4), last_start: Tick(5) }]
        );
    }
}

// ── Validator properties ──────────────────────────────────────────────────────

#[cfg(test)]
mod validator_properties {
    use super::*;
    use crate::validate_work_order;
    use pl_line::{Carriers, StationRegistryBuilder};
    use pl_rail::RailBuilder;
    use proptest::prelude::*;

    fn check(route: &[u32], manipulators: Vec<ManipulatorSpec>) -> Vec<Infeasibility> {
        let stations = StationRegistryBuilder::new()
            .stations(evenly_spaced(5, 3.0))
            .build()
            .unwrap();
        let rail = RailBuilder::new()
            .manipulators(manipulators)
            .build(&stations, &LineConfig::default())
            .unwrap();
        let (lib, t) = template(&route.iter().map(|&s| (s, 1)).collect::<Vec<_>>());
        let mut carriers = Carriers::new();
        carriers.spawn(lib.get(t).unwrap());
        validate_work_order(&stations, &rail, carriers.iter())
    }

    proptest! {
        #[test]
        fn bad_endpoints_always_rejected(route in prop::collection::vec(0u32..5, 1..8)) {
            let first = route[0];
            let last = route[route.len() - 1];
            prop_assume!(first != 0 || last != 4);

            let problems = check(&route, vec![ManipulatorSpec::span(0, 4, 0)]);
            let rejected = problems
                .iter()
                .any(|p| matches!(p, Infeasibility::WrongEndpoints { .. }));
            prop_assert!(rejected);
        }

        #[test]
        fn coverage_gap_always_rejected(
            (split, a, b) in (1u32..4).prop_flat_map(|split| (Just(split), 0..split, (split + 1)..5))
        ) {
            let manipulators = vec![ManipulatorSpec::span(0, split, 0), ManipulatorSpec::span(split, 4, split)];
            let problems = check(&[0, a, b, 4], manipulators);
            let gap = Infeasibility::NoHandOff {
                carrier: CarrierId(0),
                from:    StationId(a),
                to:      StationId(b),
            };
            prop_assert!(problems.contains(&gap));
        }
    }
}

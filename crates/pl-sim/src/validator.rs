//! Static work-order feasibility check.
//!
//! Run once before tick 0.  It proves reachability only: every carrier can
//! be carried from each recipe station to the next by some manipulator.
//! It does not prove the run is free of livelock.

use std::fmt;

use pl_core::{CarrierId, ManipulatorId, StationId};
use pl_line::{Carrier, StationRegistry};
use pl_rail::Rail;

#[cfg(feature = "fx-hash")]
type PairSet = rustc_hash::FxHashSet<(StationId, StationId)>;
#[cfg(not(feature = "fx-hash"))]
type PairSet = std::collections::HashSet<(StationId, StationId)>;

/// One reason a work order cannot be run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Infeasibility {
    /// Two rail-adjacent manipulators share no station.
    RailGap { left: ManipulatorId, right: ManipulatorId },
    /// The recipe does not start at the entry or does not end at the exit.
    WrongEndpoints {
        carrier: CarrierId,
        first:   StationId,
        last:    StationId,
    },
    /// No single manipulator reaches both stations of a consecutive pair.
    NoHandOff {
        carrier: CarrierId,
        from:    StationId,
        to:      StationId,
    },
    UnknownStation { carrier: CarrierId, station: StationId },
    /// An intermediate step names a station that cannot be submerged into.
    NotSubmersible { carrier: CarrierId, station: StationId },
    /// Two consecutive steps name the same station; the carrier would have
    /// to be handed into the station it already occupies.
    RepeatedStation { carrier: CarrierId, station: StationId },
}

impl fmt::Display for Infeasibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Infeasibility::RailGap { left, right } => {
                write!(f, "{left} and {right} share no hand-off station")
            }
            Infeasibility::WrongEndpoints { carrier, first, last } => write!(
                f,
                "{carrier} recipe runs {first}..{last} instead of entry..exit"
            ),
            Infeasibility::NoHandOff { carrier, from, to } => {
                write!(f, "{carrier}: no manipulator reaches both {from} and {to}")
            }
            Infeasibility::UnknownStation { carrier, station } => {
                write!(f, "{carrier}: recipe names unknown station {station}")
            }
            Infeasibility::NotSubmersible { carrier, station } => {
                write!(f, "{carrier}: recipe submerges into non-submersible {station}")
            }
            Infeasibility::RepeatedStation { carrier, station } => {
                write!(f, "{carrier}: recipe visits {station} twice in a row")
            }
        }
    }
}

/// Check every carrier's recipe against the station layout and the
/// manipulators' reach sets.
///
/// Returns every problem found (empty means accepted), rail gaps first and
/// then per carrier in iteration order.
pub fn validate_work_order<'a>(
    stations: &StationRegistry,
    rail:     &Rail,
    carriers: impl IntoIterator<Item = &'a Carrier>,
) -> Vec<Infeasibility> {
    let mut problems = Vec::new();

    for pair in rail.iter().collect::<Vec<_>>().windows(2) {
        if pair[0].reach().is_disjoint(pair[1].reach()) {
            problems.push(Infeasibility::RailGap { left: pair[0].id, right: pair[1].id });
        }
    }

    let handoffs = hand_off_pairs(rail);
    let (entry, exit) = (stations.entry(), stations.exit());

    for carrier in carriers {
        let route: Vec<StationId> = carrier.recipe().stations().collect();
        let (Some(&first), Some(&last)) = (route.first(), route.last()) else {
            continue;
        };

        let mut known = true;
        for &station in &route {
            if !stations.contains(station) {
                problems.push(Infeasibility::UnknownStation { carrier: carrier.id, station });
                known = false;
            }
        }
        if !known {
            continue;
        }

        if first != entry || last != exit || route.len() < 2 {
            problems.push(Infeasibility::WrongEndpoints { carrier: carrier.id, first, last });
        }

        let interior = route.iter().skip(1).take(route.len().saturating_sub(2));
        for &station in interior {
            if stations.get(station).is_ok_and(|s| !s.submersible) {
                problems.push(Infeasibility::NotSubmersible { carrier: carrier.id, station });
            }
        }

        for pair in route.windows(2) {
            if pair[0] == pair[1] {
                problems.push(Infeasibility::RepeatedStation { carrier: carrier.id, station: pair[0] });
            } else if !handoffs.contains(&(pair[0], pair[1])) {
                problems.push(Infeasibility::NoHandOff {
                    carrier: carrier.id,
                    from:    pair[0],
                    to:      pair[1],
                });
            }
        }
    }

    problems
}

/// Every ordered pair of distinct stations some single manipulator can
/// serve.
fn hand_off_pairs(rail: &Rail) -> PairSet {
    let mut pairs = PairSet::default();
    for m in rail.iter() {
        for &a in m.reach() {
            for &b in m.reach().iter().filter(|&&b| b != a) {
                pairs.insert((a, b));
            }
        }
    }
    pairs
}

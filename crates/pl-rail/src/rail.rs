//! The rail: manipulators in rail order.

use std::collections::BTreeSet;

use pl_core::{IdAllocator, LineConfig, ManipulatorId, Millimetres, StationId};
use pl_line::StationRegistry;

use crate::{Manipulator, ManipulatorSpec, RailError, RailResult};

// ── Rail ──────────────────────────────────────────────────────────────────────

/// Owns every manipulator, indexed by `ManipulatorId`.
///
/// Identifier order is rail order: `previous(id)` is always to the left and
/// `next(id)` to the right.  Neighbor lookups are the only adjacency
/// information collision avoidance needs.
#[derive(Debug)]
pub struct Rail {
    manipulators: Vec<Manipulator>,
    speed:        Millimetres,
    lift_ticks:   u32,
    load_ticks:   u32,
}

impl Rail {
    #[inline]
    pub fn len(&self) -> usize {
        self.manipulators.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.manipulators.is_empty()
    }

    pub fn get(&self, id: ManipulatorId) -> RailResult<&Manipulator> {
        self.manipulators
            .get(id.index())
            .ok_or(RailError::UnknownManipulator(id))
    }

    pub(crate) fn get_mut(&mut self, id: ManipulatorId) -> RailResult<&mut Manipulator> {
        self.manipulators
            .get_mut(id.index())
            .ok_or(RailError::UnknownManipulator(id))
    }

    /// Manipulators in rail order.
    pub fn iter(&self) -> impl Iterator<Item = &Manipulator> + '_ {
        self.manipulators.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = ManipulatorId> + '_ {
        self.manipulators.iter().map(|m| m.id)
    }

    /// Left-hand neighbor, or `None` for the first manipulator.
    pub fn previous(&self, id: ManipulatorId) -> Option<ManipulatorId> {
        let i = id.index();
        (i > 0 && i <= self.manipulators.len()).then(|| ManipulatorId(id.0 - 1))
    }

    /// Right-hand neighbor, or `None` for the last manipulator.
    pub fn next(&self, id: ManipulatorId) -> Option<ManipulatorId> {
        (id.index() + 1 < self.manipulators.len()).then(|| ManipulatorId(id.0 + 1))
    }

    #[inline]
    pub fn speed(&self) -> Millimetres {
        self.speed
    }

    #[inline]
    pub fn lift_ticks(&self) -> u32 {
        self.lift_ticks
    }

    #[inline]
    pub fn load_ticks(&self) -> u32 {
        self.load_ticks
    }

    /// First available manipulator, in id order, whose reach covers every
    /// station in `stations`.
    pub fn find_available(&self, stations: &[StationId]) -> Option<ManipulatorId> {
        self.manipulators
            .iter()
            .find(|m| m.is_available() && stations.iter().all(|&s| m.can_reach(s)))
            .map(|m| m.id)
    }

    /// Two distinct manipulators borrowed mutably at once.
    pub(crate) fn pair_mut(
        &mut self,
        a: ManipulatorId,
        b: ManipulatorId,
    ) -> (&mut Manipulator, &mut Manipulator) {
        let (i, j) = (a.index(), b.index());
        debug_assert_ne!(i, j);
        if i < j {
            let (lo, hi) = self.manipulators.split_at_mut(j);
            (&mut lo[i], &mut hi[0])
        } else {
            let (lo, hi) = self.manipulators.split_at_mut(i);
            (&mut hi[0], &mut lo[j])
        }
    }
}

// ── RailBuilder ───────────────────────────────────────────────────────────────

/// Collects manipulator specs in rail order and validates them against the
/// station layout.
#[derive(Default)]
pub struct RailBuilder {
    alloc: IdAllocator<ManipulatorId>,
    specs: Vec<(ManipulatorId, ManipulatorSpec)>,
}

impl RailBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn manipulator(mut self, spec: ManipulatorSpec) -> Self {
        let id = self.alloc.allocate();
        self.specs.push((id, spec));
        self
    }

    pub fn manipulators<I: IntoIterator<Item = ManipulatorSpec>>(mut self, specs: I) -> Self {
        for spec in specs {
            self = self.manipulator(spec);
        }
        self
    }

    /// Validate and build.
    ///
    /// Rejects an empty rail, empty or unknown reach, a start station
    /// outside reach, and start positions that are not in rail order.
    pub fn build(self, stations: &StationRegistry, config: &LineConfig) -> RailResult<Rail> {
        if self.specs.is_empty() {
            return Err(RailError::Config("a line needs at least one manipulator".into()));
        }

        let mut manipulators = Vec::with_capacity(self.specs.len());
        let mut last_pos: Option<Millimetres> = None;

        for (id, spec) in self.specs {
            if spec.reach.is_empty() {
                return Err(RailError::Config(format!("{id} has an empty reach")));
            }
            for &station in &spec.reach {
                if !stations.contains(station) {
                    return Err(RailError::Config(format!(
                        "{id} lists unknown station {station} in its reach"
                    )));
                }
            }
            let reach: BTreeSet<StationId> = spec.reach.into_iter().collect();
            if !reach.contains(&spec.start) {
                return Err(RailError::OutOfReach { manipulator: id, station: spec.start });
            }

            let rail_pos = stations.distance(spec.start)?;
            if last_pos.is_some_and(|prev| rail_pos < prev) {
                return Err(RailError::Config(format!(
                    "{id} starts left of its predecessor; manipulators must be given in rail order"
                )));
            }
            last_pos = Some(rail_pos);

            manipulators.push(Manipulator::new(id, reach, spec.start, rail_pos));
        }

        Ok(Rail {
            manipulators,
            speed:      config.speed(),
            lift_ticks: config.lift_ticks,
            load_ticks: config.load_ticks,
        })
    }
}

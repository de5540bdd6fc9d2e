//! Fluent builder for constructing a [`Sim`].

use pl_core::{LineConfig, SimRng, TemplateId, Tick};
use pl_line::{Carriers, StationRegistryBuilder, StationSpec, TemplateLibrary, WorkOrder, World};
use pl_rail::{ManipulatorSpec, RailBuilder, Trace};
use tracing::{info, warn};

use crate::{validate_work_order, Sim, SimError, SimResult};

/// Where the carriers of the run come from.
enum OrderSource {
    Templates(Vec<TemplateId>),
    Mixed { count: usize, seed: u64 },
}

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`LineConfig`]: speed, lift/load durations, tick ceiling
/// - [`TemplateLibrary`]: the recipes carriers are stamped from
///
/// # Line description
///
/// | Method                   | Content                                       |
/// |--------------------------|-----------------------------------------------|
/// | `.stations(v)`           | Stations in line order, entry first           |
/// | `.manipulators(v)`       | Manipulators in rail order                    |
/// | `.work_order(v)`         | One carrier per template id, in admission order |
/// | `.mixed_work_order(n, s)`| `n` carriers with seeded random templates     |
///
/// `build()` validates everything, including the static feasibility of the
/// work order, before a single tick runs.
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(LineConfig::default(), library)
///     .stations(stations)
///     .manipulators(manipulators)
///     .work_order(vec![t1, t4, t2])
///     .build()?;
/// let report = sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    config:       LineConfig,
    library:      TemplateLibrary,
    stations:     Vec<StationSpec>,
    manipulators: Vec<ManipulatorSpec>,
    order:        OrderSource,
}

impl SimBuilder {
    pub fn new(config: LineConfig, library: TemplateLibrary) -> Self {
        Self {
            config,
            library,
            stations:     Vec::new(),
            manipulators: Vec::new(),
            order:        OrderSource::Templates(Vec::new()),
        }
    }

    pub fn stations(mut self, stations: impl IntoIterator<Item = StationSpec>) -> Self {
        self.stations.extend(stations);
        self
    }

    pub fn manipulators(mut self, manipulators: impl IntoIterator<Item = ManipulatorSpec>) -> Self {
        self.manipulators.extend(manipulators);
        self
    }

    /// Admit one carrier per template, in the given order.
    pub fn work_order(mut self, templates: Vec<TemplateId>) -> Self {
        self.order = OrderSource::Templates(templates);
        self
    }

    /// Admit `count` carriers with templates drawn from the library using
    /// `seed`.
    pub fn mixed_work_order(mut self, count: usize, seed: u64) -> Self {
        self.order = OrderSource::Mixed { count, seed };
        self
    }

    /// Validate inputs, instantiate carriers, and return a ready-to-run
    /// [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        self.config
            .validate()
            .map_err(|e| SimError::Config(e.to_string()))?;

        // ── Line layout ───────────────────────────────────────────────────
        let stations = StationRegistryBuilder::new().stations(self.stations).build()?;
        let rail = RailBuilder::new()
            .manipulators(self.manipulators)
            .build(&stations, &self.config)?;

        // ── Carriers ──────────────────────────────────────────────────────
        let mut carriers = Carriers::new();
        let work_order = match self.order {
            OrderSource::Templates(ids) => {
                WorkOrder::from_templates(&self.library, &ids, &mut carriers)?
            }
            OrderSource::Mixed { count, seed } => {
                WorkOrder::mixed(&self.library, count, &mut SimRng::new(seed), &mut carriers)?
            }
        };

        // ── Static feasibility ────────────────────────────────────────────
        let problems = validate_work_order(&stations, &rail, carriers.iter());
        if !problems.is_empty() {
            for problem in &problems {
                warn!(%problem, "infeasible work order");
            }
            return Err(SimError::Infeasible(problems));
        }

        info!(
            stations = stations.len(),
            manipulators = rail.len(),
            carriers = work_order.total(),
            "line built"
        );

        Ok(Sim {
            config:   self.config,
            world:    World::new(stations, carriers),
            rail,
            work_order,
            now:      Tick::ZERO,
            trace:    Trace::new(),
            finished: Vec::new(),
        })
    }
}

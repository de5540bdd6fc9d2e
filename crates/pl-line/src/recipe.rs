//! Process definitions: steps, recipes, and the templates that stamp them out.
//!
//! A [`RecipeTemplate`] is shared by every carrier that follows the same
//! process.  [`RecipeTemplate::instantiate`] hands each carrier its own
//! [`Recipe`] so that completion flags are never shared between carriers.

use std::sync::Arc;

use pl_core::{IdAllocator, StationId, TemplateId};

use crate::{LineError, LineResult};

// ── RecipeStep ────────────────────────────────────────────────────────────────

/// One station visit: where, how long submerged, how long to drip afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecipeStep {
    pub station:          StationId,
    pub submersion_ticks: u32,
    pub drip_ticks:       u32,
    completed:            bool,
}

impl RecipeStep {
    /// Drip time used by the production line for every step.
    pub const DEFAULT_DRIP_TICKS: u32 = 20;

    pub fn new(station: StationId, submersion_ticks: u32, drip_ticks: u32) -> Self {
        Self {
            station,
            submersion_ticks,
            drip_ticks,
            completed: false,
        }
    }

    #[inline]
    pub fn is_completed(&self) -> bool {
        self.completed
    }
}

// ── Recipe ────────────────────────────────────────────────────────────────────

/// A carrier's own copy of its process.  The step sequence never changes;
/// only completion flags are written.
#[derive(Clone, Debug)]
pub struct Recipe {
    name:  Arc<str>,
    steps: Vec<RecipeStep>,
}

impl Recipe {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn steps(&self) -> &[RecipeStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[inline]
    pub fn step(&self, index: usize) -> Option<&RecipeStep> {
        self.steps.get(index)
    }

    /// The stations visited, in order.
    pub fn stations(&self) -> impl Iterator<Item = StationId> + '_ {
        self.steps.iter().map(|s| s.station)
    }

    /// Number of steps whose completion flag is set.
    pub fn completed_steps(&self) -> usize {
        self.steps.iter().filter(|s| s.completed).count()
    }

    pub(crate) fn mark_completed(&mut self, index: usize) {
        if let Some(step) = self.steps.get_mut(index) {
            step.completed = true;
        }
    }
}

// ── RecipeTemplate ────────────────────────────────────────────────────────────

/// Reusable process definition: an ordered list of (station, submersion
/// ticks) pairs plus the drip time stamped onto every step.
#[derive(Clone, Debug)]
pub struct RecipeTemplate {
    pub id:         TemplateId,
    name:           Arc<str>,
    steps:          Vec<(StationId, u32)>,
    pub drip_ticks: u32,
}

impl RecipeTemplate {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn steps(&self) -> &[(StationId, u32)] {
        &self.steps
    }

    /// Produce a fresh [`Recipe`] with every step incomplete.
    pub fn instantiate(&self) -> Recipe {
        Recipe {
            name:  Arc::clone(&self.name),
            steps: self
                .steps
                .iter()
                .map(|&(station, submersion)| RecipeStep::new(station, submersion, self.drip_ticks))
                .collect(),
        }
    }
}

// ── TemplateLibrary ───────────────────────────────────────────────────────────

/// Every recipe template known to the line, indexed by `TemplateId`.
#[derive(Default)]
pub struct TemplateLibrary {
    alloc:     IdAllocator<TemplateId>,
    templates: Vec<RecipeTemplate>,
}

impl TemplateLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template using the line's default drip time.
    pub fn add(
        &mut self,
        name:  impl Into<String>,
        steps: Vec<(StationId, u32)>,
    ) -> LineResult<TemplateId> {
        self.add_with_drip(name, steps, RecipeStep::DEFAULT_DRIP_TICKS)
    }

    /// Register a template with an explicit drip time.
    ///
    /// Templates without steps are rejected: a carrier must at least start
    /// somewhere.
    pub fn add_with_drip(
        &mut self,
        name:       impl Into<String>,
        steps:      Vec<(StationId, u32)>,
        drip_ticks: u32,
    ) -> LineResult<TemplateId> {
        let name: String = name.into();
        if steps.is_empty() {
            return Err(LineError::EmptyRecipe(name));
        }
        let id = self.alloc.allocate();
        self.templates.push(RecipeTemplate {
            id,
            name: name.into(),
            steps,
            drip_ticks,
        });
        Ok(id)
    }

    pub fn get(&self, id: TemplateId) -> LineResult<&RecipeTemplate> {
        self.templates.get(id.index()).ok_or(LineError::UnknownTemplate(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &RecipeTemplate> + '_ {
        self.templates.iter()
    }

    /// All template IDs in registration order.
    pub fn ids(&self) -> Vec<TemplateId> {
        self.templates.iter().map(|t| t.id).collect()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

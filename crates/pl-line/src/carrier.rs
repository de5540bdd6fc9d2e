//! Carriers and their process state machine.

use std::fmt;

use pl_core::{CarrierId, IdAllocator, StationId, TemplateId};

use crate::{LineError, LineResult, Recipe, RecipeStep, RecipeTemplate};

// ── CarrierState ──────────────────────────────────────────────────────────────

/// Where a carrier is in its per-step cycle.
///
/// ```text
/// Unserviced → ToBeLoaded → Serviced → Bathing → BathCompleted
///     → BathServiced → Dripping → Serviced → Bathing → …
/// ```
///
/// The first two states only occur at the entry station.  Leaving the exit
/// station removes the carrier from the line and has no state of its own.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CarrierState {
    /// At the entry station, no manipulator tasked yet.
    Unserviced,
    /// A manipulator is on its way to take it off the entry station.
    ToBeLoaded,
    /// Held by a manipulator, in transit.
    Serviced,
    /// Submerged; the submersion timer runs.
    Bathing,
    /// Submersion done, waiting for a manipulator.
    BathCompleted,
    /// A manipulator is on its way to lift it.
    BathServiced,
    /// Lifted and held over the station while it drips.
    Dripping,
}

impl CarrierState {
    /// `true` if `next` directly follows `self` in the cycle.
    pub fn can_transition_to(self, next: CarrierState) -> bool {
        use CarrierState::*;
        matches!(
            (self, next),
            (Unserviced, ToBeLoaded)
                | (ToBeLoaded, Serviced)
                | (Serviced, Bathing)
                | (Bathing, BathCompleted)
                | (BathCompleted, BathServiced)
                | (BathServiced, Dripping)
                | (Dripping, Serviced)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CarrierState::Unserviced    => "unserviced",
            CarrierState::ToBeLoaded    => "to_be_loaded",
            CarrierState::Serviced      => "serviced",
            CarrierState::Bathing       => "bathing",
            CarrierState::BathCompleted => "bath_completed",
            CarrierState::BathServiced  => "bath_serviced",
            CarrierState::Dripping      => "dripping",
        }
    }
}

impl fmt::Display for CarrierState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Carrier ───────────────────────────────────────────────────────────────────

/// A work-piece frame travelling through its recipe.
#[derive(Clone, Debug)]
pub struct Carrier {
    pub id:       CarrierId,
    pub template: TemplateId,
    recipe:       Recipe,
    step_index:   usize,
    state:        CarrierState,
    /// Ticks spent in the current timed state (only `Bathing` uses it).
    elapsed:      u32,
}

impl Carrier {
    pub fn new(id: CarrierId, template: TemplateId, recipe: Recipe) -> Self {
        Self {
            id,
            template,
            recipe,
            step_index: 0,
            state: CarrierState::Unserviced,
            elapsed: 0,
        }
    }

    #[inline]
    pub fn state(&self) -> CarrierState {
        self.state
    }

    #[inline]
    pub fn step_index(&self) -> usize {
        self.step_index
    }

    #[inline]
    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    /// The step the carrier is at (or travelling to).
    #[inline]
    pub fn current_step(&self) -> Option<&RecipeStep> {
        self.recipe.step(self.step_index)
    }

    /// The step after the current one.
    #[inline]
    pub fn next_step(&self) -> Option<&RecipeStep> {
        self.recipe.step(self.step_index + 1)
    }

    /// The step before the current one.
    #[inline]
    pub fn previous_step(&self) -> Option<&RecipeStep> {
        self.step_index.checked_sub(1).and_then(|i| self.recipe.step(i))
    }

    pub fn current_station(&self) -> Option<StationId> {
        self.current_step().map(|s| s.station)
    }

    pub fn next_station(&self) -> Option<StationId> {
        self.next_step().map(|s| s.station)
    }

    pub fn is_on_final_step(&self) -> bool {
        self.step_index + 1 >= self.recipe.len()
    }

    /// Move to `next`, which must directly follow the current state.
    ///
    /// Returns the previous state.  Any other transition is an
    /// [`LineError::IllegalTransition`]: it means the scheduler or a
    /// manipulator acted on a carrier it should not have.
    pub fn transition(&mut self, next: CarrierState) -> LineResult<CarrierState> {
        let from = self.state;
        if !from.can_transition_to(next) {
            return Err(LineError::IllegalTransition { carrier: self.id, from, to: next });
        }
        self.state = next;
        self.elapsed = 0;
        Ok(from)
    }

    /// Accrue one tick of submersion.
    ///
    /// Returns `true` on the tick the required submersion time is reached;
    /// the carrier is then `BathCompleted` and its timer is reset.  Calling
    /// this outside `Bathing` is an [`LineError::UnexpectedState`].
    pub fn advance_submersion_timer(&mut self) -> LineResult<bool> {
        if self.state != CarrierState::Bathing {
            return Err(LineError::UnexpectedState {
                carrier:  self.id,
                expected: CarrierState::Bathing,
                found:    self.state,
            });
        }
        let required = self
            .current_step()
            .map(|s| s.submersion_ticks)
            .ok_or(LineError::RecipeExhausted(self.id))?;
        self.elapsed += 1;
        if self.elapsed >= required {
            self.transition(CarrierState::BathCompleted)?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Flag the current step as done.
    pub fn complete_current_step(&mut self) {
        self.recipe.mark_completed(self.step_index);
    }

    /// Move on to the next recipe step.
    pub fn advance_step(&mut self) -> LineResult<()> {
        if self.is_on_final_step() {
            return Err(LineError::RecipeExhausted(self.id));
        }
        self.step_index += 1;
        Ok(())
    }
}

// ── Carriers ──────────────────────────────────────────────────────────────────

/// Arena of every carrier created for a run, indexed by `CarrierId`.
///
/// Carriers are never removed: a finished carrier stays here so its ID keeps
/// resolving for reports and traces.
#[derive(Default)]
pub struct Carriers {
    alloc: IdAllocator<CarrierId>,
    slots: Vec<Carrier>,
}

impl Carriers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a carrier following a fresh instance of `template`.
    pub fn spawn(&mut self, template: &RecipeTemplate) -> CarrierId {
        let id = self.alloc.allocate();
        self.slots.push(Carrier::new(id, template.id, template.instantiate()));
        id
    }

    pub fn get(&self, id: CarrierId) -> LineResult<&Carrier> {
        self.slots.get(id.index()).ok_or(LineError::UnknownCarrier(id))
    }

    pub fn get_mut(&mut self, id: CarrierId) -> LineResult<&mut Carrier> {
        self.slots.get_mut(id.index()).ok_or(LineError::UnknownCarrier(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Carrier> + '_ {
        self.slots.iter()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

//! End-of-run summary.

use std::fmt;

use pl_core::{CarrierId, TemplateId, Tick};

use crate::{SimError, SimResult};

/// How a run ended.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Outcome {
    /// Every carrier in the work order left through the exit.
    Completed,
    /// The tick ceiling was reached first.
    Stalled,
}

/// A carrier leaving the exit station.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Completion {
    pub carrier:  CarrierId,
    pub template: TemplateId,
    pub recipe:   String,
    pub tick:     Tick,
}

#[derive(Clone, Debug)]
pub struct RunReport {
    pub outcome:          Outcome,
    /// Ticks processed.
    pub ticks:            u64,
    pub completions:      Vec<Completion>,
    /// Mean gap between consecutive completions, 0 with fewer than two.
    pub average_interval: f64,
    /// Carriers never admitted.
    pub pending:          Vec<CarrierId>,
    /// Carriers admitted but not finished.
    pub active:           Vec<CarrierId>,
}

impl RunReport {
    pub(crate) fn new(
        outcome:     Outcome,
        ticks:       u64,
        completions: Vec<Completion>,
        pending:     Vec<CarrierId>,
        active:      Vec<CarrierId>,
    ) -> Self {
        let ticks_done: Vec<Tick> = completions.iter().map(|c| c.tick).collect();
        Self {
            outcome,
            ticks,
            average_interval: average_interval(&ticks_done),
            completions,
            pending,
            active,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.outcome == Outcome::Completed
    }

    pub fn completion_ticks(&self) -> Vec<Tick> {
        self.completions.iter().map(|c| c.tick).collect()
    }

    /// `Err(SimError::Stalled)` for a stalled run, the report otherwise.
    pub fn into_result(self) -> SimResult<Self> {
        match self.outcome {
            Outcome::Completed => Ok(self),
            Outcome::Stalled => Err(SimError::Stalled {
                ticks:   self.ticks,
                pending: self.pending.len(),
                active:  self.active.len(),
            }),
        }
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = match self.outcome {
            Outcome::Completed => "completed",
            Outcome::Stalled => "STALLED",
        };
        writeln!(f, "outcome:          {outcome}")?;
        writeln!(f, "ticks:            {}", self.ticks)?;
        writeln!(f, "finished:         {}", self.completions.len())?;
        writeln!(f, "average interval: {:.1} ticks", self.average_interval)?;
        writeln!(f, "pending:          {}", self.pending.len())?;
        write!(f, "active:           {}", self.active.len())?;
        for c in &self.completions {
            write!(f, "\n  {} ({}) finished at {}", c.carrier, c.recipe, c.tick)?;
        }
        Ok(())
    }
}

/// Mean of consecutive differences of `ticks`.
pub fn average_interval(ticks: &[Tick]) -> f64 {
    if ticks.len() < 2 {
        return 0.0;
    }
    let total: u64 = ticks.windows(2).map(|w| w[1].since(w[0])).sum();
    total as f64 / (ticks.len() - 1) as f64
}

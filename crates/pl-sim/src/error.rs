use pl_line::LineError;
use pl_rail::RailError;
use thiserror::Error;

use crate::Infeasibility;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    /// The work order failed static validation; no tick was run.
    #[error("work order is infeasible ({} problem(s)); first: {}", .0.len(), first_problem(.0))]
    Infeasible(Vec<Infeasibility>),

    #[error("line invariant violated: {0}")]
    Line(#[from] LineError),

    #[error("rail invariant violated: {0}")]
    Rail(#[from] RailError),

    /// The safety ceiling was reached before every carrier finished.
    #[error("line stalled after {ticks} ticks with {pending} carrier(s) waiting and {active} on the line")]
    Stalled {
        ticks:   u64,
        pending: usize,
        active:  usize,
    },
}

fn first_problem(problems: &[Infeasibility]) -> String {
    problems.first().map_or_else(String::new, ToString::to_string)
}

pub type SimResult<T> = Result<T, SimError>;

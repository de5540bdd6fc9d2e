//! `pl-sim` — the plating-line scheduler.
//!
//! # Tick loop
//!
//! ```text
//! until every carrier finished (or config.max_ticks reached → Stalled):
//!   ① Admit        — next work-order carrier onto the empty entry station
//!   ② Drain        — carrier on the exit station → finished, tick recorded
//!   ③ Manipulators — Rail::step for each manipulator in ascending id order
//!   ④ Tasking      — station scan; Unserviced / BathCompleted carriers get
//!                    the first available manipulator reaching current+next
//!   ⑤ Timers       — every Bathing carrier accrues one tick
//! ```
//!
//! Before tick 0, [`SimBuilder::build`] runs [`validate_work_order`]; an
//! infeasible order never starts.
//!
//! # Cargo features
//!
//! | Feature   | Effect                                                     |
//! |-----------|------------------------------------------------------------|
//! | `fx-hash` | FxHash instead of SipHash for the validator's pair set.    |
//! | `serde`   | Serde derives on configuration and event types.            |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use pl_core::LineConfig;
//! use pl_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(LineConfig::default(), library)
//!     .stations(stations)
//!     .manipulators(manipulators)
//!     .work_order(order)
//!     .build()?;
//! let report = sim.run(&mut NoopObserver)?.into_result()?;
//! ```

pub mod audit;
pub mod builder;
pub mod error;
pub mod observer;
pub mod report;
pub mod sim;
pub mod validator;

#[cfg(test)]
mod tests;

pub use audit::{audit_schedule, PlannedRun, PlannedSchedule, ScheduleRecorder, ScheduleViolation};
pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{EventLog, NoopObserver, SimObserver, SimView};
pub use report::{average_interval, Completion, Outcome, RunReport};
pub use sim::Sim;
pub use validator::{validate_work_order, Infeasibility};

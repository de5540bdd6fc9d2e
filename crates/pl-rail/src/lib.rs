//! `pl-rail` — manipulators and the rail they share.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                          |
//! |-----------------|-------------------------------------------------------------------|
//! | [`state`]       | `ManipulatorState` and the protected-state rule                   |
//! | [`manipulator`] | `ManipulatorSpec`, `Manipulator`                                  |
//! | [`rail`]        | `Rail` (rail-order owner, neighbor queries) + `RailBuilder`       |
//! | [`motion`]      | `move_to`, `update_movement` — motion and collision avoidance     |
//! | [`handling`]    | lift / lower / drip / load operations and the per-tick dispatch   |
//! | [`event`]       | `LineEvent`, `EventKind`, `Trace` — the structured event stream   |
//! | [`error`]       | `RailError`, `RailResult<T>`                                      |
//!
//! # Motion model
//!
//! Manipulators move at a uniform speed (no acceleration) along a single
//! rail.  Identifier order is rail order, and each manipulator only ever
//! inspects its immediate neighbor in the direction of travel:
//!
//! ```text
//!   moving right ──►  check next(id)       moving left ◄──  check previous(id)
//!
//!   neighbor not protected  → shove it one speed increment out of the way
//!   neighbor protected      → back off one speed increment and retry
//! ```
//!
//! Protected states (`Lifting`, `Submerging`, `Dripping`) are short
//! non-preemptible operations: a manipulator in one of them is never
//! displaced.  The policy is greedy and local; it can livelock on a badly
//! designed line, which the scheduler's tick ceiling reports.

pub mod error;
pub mod event;
pub mod handling;
pub mod manipulator;
pub mod motion;
pub mod rail;
pub mod state;


pub use error::{RailError, RailResult};
pub use event::{EventKind, LineEvent, Trace};
pub use handling::transition_carrier;
pub use manipulator::{Manipulator, ManipulatorSpec};
pub use rail::{Rail, RailBuilder};
pub use state::ManipulatorState;

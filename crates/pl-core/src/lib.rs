//! `pl-core` — foundational types for the plating-line digital twin.
//!
//! This crate is a dependency of every other `pl-*` crate.  It has no `pl-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`ids`]         | `StationId`, `ManipulatorId`, `CarrierId`, `TemplateId`, `IdAllocator` |
//! | [`time`]        | `Tick`                                                     |
//! | [`units`]       | `Millimetres` rail coordinate                              |
//! | [`config`]      | `LineConfig` — motion constants and the safety ceiling     |
//! | [`rng`]         | `SimRng` (seeded, deterministic)                           |
//! | [`error`]       | `PlError`, `PlResult`                                      |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;
pub mod units;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::LineConfig;
pub use error::{PlError, PlResult};
pub use ids::{CarrierId, DenseId, IdAllocator, ManipulatorId, StationId, TemplateId};
pub use rng::SimRng;
pub use time::Tick;
pub use units::Millimetres;

//! `pl-line` — the line's data model.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                       |
//! |-----------------|----------------------------------------------------------------|
//! | [`station`]     | `StationSpec`, `Station`, `StationRegistry` + builder          |
//! | [`recipe`]      | `RecipeStep`, `Recipe`, `RecipeTemplate`, `TemplateLibrary`    |
//! | [`carrier`]     | `CarrierState`, `Carrier`, the `Carriers` arena                |
//! | [`work_order`]  | `WorkOrder` — the FIFO of carriers waiting for the loader      |
//! | [`world`]       | `World` — stations + carriers, passed into every operation     |
//! | [`error`]       | `LineError`, `LineResult<T>`                                   |
//!
//! # Ownership model
//!
//! Stations and carriers live in dense arenas indexed by their IDs.  A
//! station refers to its occupant by `CarrierId`, never by reference, so the
//! scheduler and the manipulators can mutate both through one `&mut World`
//! without ownership cycles.

pub mod carrier;
pub mod error;
pub mod recipe;
pub mod station;
pub mod work_order;
pub mod world;


pub use carrier::{Carrier, CarrierState, Carriers};
pub use error::{LineError, LineResult};
pub use recipe::{Recipe, RecipeStep, RecipeTemplate, TemplateLibrary};
pub use station::{Station, StationRegistry, StationRegistryBuilder, StationSpec};
pub use work_order::WorkOrder;
pub use world::World;

//! Floor-plan logic for HomePlan.
//!
//! Everything here is pure data in, data out: rooms, walls, doors and the
//! waypoint graph agents walk on. No renderer, physics or storage backend
//! is involved, so every module is unit-testable and the same plans can be
//! consumed by any front end.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`builder`] | `PlanBuilder`, the authoring tool every plan goes through |
//! | [`constants`] | Plan-space scale, wall/door dimensions, palette |
//! | [`error`] | `PlanError`, the crate's fallible-operation error |
//! | [`furniture`] | Per-template furniture anchor clusters |
//! | [`generator`] | Seeded procedural floor-plan generator and its config |
//! | [`geometry`] | Rectangles, wall lines and wall-with-gaps splitting |
//! | [`model`] | Serializable plan data contract (rooms, walls, waypoints, ...) |
//! | [`neighborhood`] | Reproducible neighbor houses for the street |
//! | [`presets`] | Hand-authored built-in plans (studio ... mansion) |
//! | [`registry`] | Plan catalog, id resolution with default fallback, active plan |
//! | [`rng`] | Portable Park–Miller seeded random source |
//! | [`sharing`] | Base64 share envelopes and the shared-creations list |
//! | [`store`] | Bounded most-recent-first lists (custom plans) |
//! | [`templates`] | Room template catalog |
//! | [`validation`] | Structural plan checks (overlaps, doors, connectivity) |
//! | [`waypoints`] | Two-pass multi-floor waypoint graph builder and queries |

pub mod builder;
pub mod constants;
pub mod error;
pub mod furniture;
pub mod generator;
pub mod geometry;
pub mod model;
pub mod neighborhood;
pub mod presets;
pub mod registry;
pub mod rng;
pub mod sharing;
pub mod store;
pub mod templates;
pub mod validation;
pub mod waypoints;

pub use error::PlanError;
pub use generator::{generate, FloorPlanGenerator, GeneratorConfig};
pub use model::FloorPlanPreset;
pub use neighborhood::generate_neighborhood;
pub use registry::{FloorPlanRegistry, PlanCatalog};

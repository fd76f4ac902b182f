//! Error type shared by every fallible floor-plan operation.
//!
//! Geometry, catalog and builder failures abort the plan being built.
//! Boundary decoding recovers locally and only surfaces `MalformedImport`
//! from the explicit `import_*` entry points.

use crate::generator::ConfigError;
use thiserror::Error;

/// Errors that can occur while building, resolving or importing a plan.
#[derive(Error, Debug)]
pub enum PlanError {
    /// Wall-gap input was malformed (unsorted, overlapping or off the line).
    #[error("invalid geometry: {reason}")]
    InvalidGeometry {
        /// What was wrong with the input.
        reason: String,
    },

    /// The template catalog cannot satisfy the generator's minimum.
    #[error("invalid template catalog: {0}")]
    InvalidTemplateCatalog(String),

    /// The generator configuration was rejected before drawing anything.
    #[error("invalid generator config: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// Two entities of the same kind share an id.
    #[error("duplicate {kind} id: {id}")]
    DuplicateId {
        /// Entity kind ("room", "waypoint", "plan", ...).
        kind: &'static str,
        /// The colliding id.
        id: String,
    },

    /// A link references a waypoint that was never declared.
    #[error("waypoint {from} links to unknown waypoint {to}")]
    DanglingConnection {
        /// Declared endpoint.
        from: String,
        /// Missing endpoint.
        to: String,
    },

    /// A stairs or elevator connector has no hallway node to attach to.
    #[error("no hallway waypoint on floor {floor} to attach a connector to")]
    MissingFloorHub {
        /// Floor that lacks a hub.
        floor: i32,
    },

    /// An imported plan or envelope is structurally unusable.
    #[error("malformed import: {0}")]
    MalformedImport(String),

    /// A plan id did not match any known plan.
    #[error("unresolved plan id: {0}")]
    UnresolvedPlanId(String),

    /// JSON (de)serialization failed.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PlanError {
    pub(crate) fn geometry(reason: impl Into<String>) -> Self {
        PlanError::InvalidGeometry {
            reason: reason.into(),
        }
    }
}

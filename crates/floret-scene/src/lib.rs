#![warn(missing_docs)]

//! Scene-graph host capability layer for the floret petal-scattering kernel.
//!
//! The scattering pipeline does not talk to any concrete 3D application.
//! It talks to the [`SceneHost`] trait: a narrow capability contract for
//! reading sheet meshes, duplicating and editing curve objects, freezing
//! transforms, baking curves into meshes, and managing named groups.
//!
//! [`MemoryScene`] is the reference host: a slotmap-backed in-process scene
//! used by the test suite and by anyone embedding the kernel without an
//! external host application.

mod host;
mod memory;
mod mesh;

pub use host::SceneHost;
pub use memory::{MemoryScene, ObjectData, SceneObject};
pub use mesh::MeshData;

use floret_curve::CurveError;
use floret_tessellate::TessellationError;
use thiserror::Error;

slotmap::new_key_type! {
    /// Identifier of an object in a scene.
    pub struct ObjectId;

    /// Identifier of a group in a scene.
    pub struct GroupId;
}

/// Errors from scene-graph operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    /// The object id does not refer to a live object.
    #[error("unknown object id")]
    UnknownObject,

    /// The group id does not refer to a live group.
    #[error("unknown group id")]
    UnknownGroup,

    /// A mesh operation was requested on a non-mesh object.
    #[error("object '{0}' is not a mesh")]
    NotAMesh(String),

    /// A curve operation was requested on a non-curve object.
    #[error("object '{0}' is not a curve")]
    NotACurve(String),

    /// The object has no geometry from which to derive a bounding box.
    #[error("object '{0}' has no geometry to bound")]
    NoBoundingData(String),

    /// A curve edit failed.
    #[error("curve edit failed: {0}")]
    Curve(#[from] CurveError),

    /// Baking a curve into a mesh failed.
    #[error("bake failed: {0}")]
    Bake(#[from] TessellationError),
}

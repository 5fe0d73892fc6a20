#![warn(missing_docs)]

//! Petal scattering over planar sheet meshes.
//!
//! Given a planar sheet mesh and a beveled-curve petal template, the
//! kernel places two mirrored petal copies at the midpoint of every sheet
//! edge long enough to clear the petal's bounding extent, orients them
//! along the edge, bakes each into a triangle mesh through the host scene,
//! and collects the results into an output group. Transient curve
//! instances are released on every exit path.
//!
//! The kernel talks to the scene only through the
//! [`SceneHost`](floret_scene::SceneHost) capability trait; templates are
//! injected as resolved object ids, never looked up by name.
//!
//! # Example
//!
//! ```
//! use floret_curve::CurveObject;
//! use floret_kernel::{scatter_petals, ScatterConfig, ScatterTemplates};
//! use floret_math::Point3;
//! use floret_scene::{MemoryScene, MeshData};
//!
//! let mut scene = MemoryScene::new();
//! let sheet = scene.add_mesh("Sheet", MeshData::quad(2.0));
//! let petal = CurveObject::petal(
//!     [
//!         Point3::new(0.0, 0.1, 0.0),
//!         Point3::new(0.6, 0.0, 0.0),
//!         Point3::new(0.0, -0.1, 0.0),
//!     ],
//!     0.02,
//! )
//! .unwrap();
//! let template = scene.add_curve("Petal", petal);
//!
//! let config = ScatterConfig {
//!     margin: 0.1,
//!     ..ScatterConfig::default()
//! };
//! let outcome =
//!     scatter_petals(&mut scene, sheet, &ScatterTemplates::single(template), &config).unwrap();
//!
//! // Two mirrored petals on each of the four edges
//! assert_eq!(outcome.baked.len(), 8);
//! ```

pub use floret_curve;
pub use floret_math;
pub use floret_scene;
pub use floret_tessellate;

pub mod error;
pub mod plan;
pub mod queries;
pub mod scatter;

pub use error::{Result, ScatterError};
pub use plan::{plan_edges, qualifies, ClassExtents, EdgeClass, EdgePlan, PlanSummary};
pub use queries::{bounding_x_extent, edge_midpoint, edge_rotation};
pub use scatter::{scatter_petals, ScatterConfig, ScatterOutcome, ScatterTemplates};

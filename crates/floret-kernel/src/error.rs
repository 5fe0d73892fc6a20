//! Error types for the scatter pipeline.

use floret_curve::CurveError;
use floret_scene::SceneError;
use thiserror::Error;

/// Errors that can occur while scattering petals over a sheet.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScatterError {
    /// The sheet's vertices do not lie in a single plane orthogonal to Z.
    #[error("sheet is not planar orthogonal to Z: z spread {0:.6}")]
    SheetNotPlanar(f64),

    /// A template violates the petal curve convention.
    #[error("invalid petal template: {0}")]
    InvalidTemplate(#[from] CurveError),

    /// A template's body does not extend along its local +X axis.
    #[error("petal template does not extend along +X: bounding max x is {0}")]
    TemplateFacesBackward(f64),

    /// The configured reference axis has zero length.
    #[error("reference axis is zero")]
    ZeroReferenceAxis,

    /// A host scene operation failed.
    #[error("scene operation failed: {0}")]
    Scene(#[from] SceneError),
}

/// Result type for scatter operations.
pub type Result<T> = std::result::Result<T, ScatterError>;

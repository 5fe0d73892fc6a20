//! The host capability contract.

use floret_curve::CurveObject;
use floret_math::{Placement, Point3};
use floret_tessellate::TessellationParams;

use crate::{GroupId, MeshData, ObjectId, SceneError};

/// Capabilities the scattering pipeline requires from a scene host.
///
/// The pipeline holds a single `&mut dyn SceneHost` for the duration of one
/// invocation: exclusive single-writer access, no interior concurrency.
/// Implementations must make [`duplicate_object`](Self::duplicate_object)
/// a deep copy: edits to a duplicate's control points must never alias the
/// source object's storage.
pub trait SceneHost {
    /// Read-only snapshot of a mesh object's geometry.
    fn read_mesh(&self, object: ObjectId) -> Result<MeshData, SceneError>;

    /// Overwrite a mesh object's geometry.
    fn commit_mesh(&mut self, object: ObjectId, data: MeshData) -> Result<(), SceneError>;

    /// The eight local-space bounding-box corners of an object's geometry.
    fn bounding_box(&self, object: ObjectId) -> Result<[Point3; 8], SceneError>;

    /// Read-only snapshot of a curve object.
    fn read_curve(&self, object: ObjectId) -> Result<CurveObject, SceneError>;

    /// Deep-duplicate an object, geometry included. Returns the new id.
    fn duplicate_object(&mut self, object: ObjectId) -> Result<ObjectId, SceneError>;

    /// Move one control point of one spline of a curve object.
    fn set_curve_control_point(
        &mut self,
        object: ObjectId,
        spline: usize,
        point: usize,
        position: Point3,
    ) -> Result<(), SceneError>;

    /// An object's current world placement.
    fn placement(&self, object: ObjectId) -> Result<Placement, SceneError>;

    /// Set an object's world placement.
    fn set_placement(&mut self, object: ObjectId, placement: Placement)
        -> Result<(), SceneError>;

    /// Bake the object's placement into its geometry and reset the
    /// placement to identity.
    fn freeze_transform(&mut self, object: ObjectId) -> Result<(), SceneError>;

    /// Tessellate a curve object (with its bevel) into a new mesh object.
    ///
    /// The new object is created with identity placement and the curve
    /// object's name; its id is returned.
    fn bake_to_mesh(
        &mut self,
        curve: ObjectId,
        params: &TessellationParams,
    ) -> Result<ObjectId, SceneError>;

    /// Create a named group.
    fn create_group(&mut self, name: &str) -> GroupId;

    /// Delete a group. Its member objects are left in the scene.
    fn delete_group(&mut self, group: GroupId) -> Result<(), SceneError>;

    /// Link an object into a group.
    fn add_to_group(&mut self, group: GroupId, object: ObjectId) -> Result<(), SceneError>;

    /// The current members of a group, in link order.
    fn group_members(&self, group: GroupId) -> Result<Vec<ObjectId>, SceneError>;

    /// Remove an object from the scene (and from every group).
    fn remove_object(&mut self, object: ObjectId) -> Result<(), SceneError>;
}

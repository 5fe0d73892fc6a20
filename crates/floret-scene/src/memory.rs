//! In-memory reference implementation of the host contract.

use floret_curve::CurveObject;
use floret_math::{Aabb, Placement, Point3};
use floret_tessellate::{bake_curve_object, TessellationParams, TriangleMesh};
use slotmap::SlotMap;

use crate::{GroupId, MeshData, ObjectId, SceneError, SceneHost};

/// Geometry payload of a scene object.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectData {
    /// A polygon mesh (sheets).
    Mesh(MeshData),
    /// A curve object (petal templates and instances).
    Curve(CurveObject),
    /// A baked triangle mesh (scatter output).
    Baked(TriangleMesh),
}

/// An object in a [`MemoryScene`]: a name, a world placement, and geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    /// Display name. Duplicates get a numeric suffix.
    pub name: String,
    /// World placement.
    pub placement: Placement,
    /// Geometry payload.
    pub data: ObjectData,
}

#[derive(Debug, Clone)]
struct Group {
    name: String,
    members: Vec<ObjectId>,
}

/// A self-contained in-process scene graph.
///
/// Backs the full [`SceneHost`] contract with slotmap storage: stale ids
/// (objects already removed) fail with [`SceneError::UnknownObject`] rather
/// than aliasing a recycled slot.
#[derive(Debug, Default)]
pub struct MemoryScene {
    objects: SlotMap<ObjectId, SceneObject>,
    groups: SlotMap<GroupId, Group>,
    duplicates: u64,
}

impl MemoryScene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a polygon mesh object at identity placement.
    pub fn add_mesh(&mut self, name: &str, data: MeshData) -> ObjectId {
        self.objects.insert(SceneObject {
            name: name.to_string(),
            placement: Placement::identity(),
            data: ObjectData::Mesh(data),
        })
    }

    /// Add a curve object at identity placement.
    pub fn add_curve(&mut self, name: &str, curve: CurveObject) -> ObjectId {
        self.objects.insert(SceneObject {
            name: name.to_string(),
            placement: Placement::identity(),
            data: ObjectData::Curve(curve),
        })
    }

    /// Look up an object.
    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id)
    }

    /// Number of live objects.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Number of live groups.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Find a group by name.
    pub fn find_group(&self, name: &str) -> Option<GroupId> {
        self.groups
            .iter()
            .find(|(_, g)| g.name == name)
            .map(|(id, _)| id)
    }

    fn get(&self, id: ObjectId) -> Result<&SceneObject, SceneError> {
        self.objects.get(id).ok_or(SceneError::UnknownObject)
    }

    fn get_mut(&mut self, id: ObjectId) -> Result<&mut SceneObject, SceneError> {
        self.objects.get_mut(id).ok_or(SceneError::UnknownObject)
    }

    fn local_bounds(object: &SceneObject) -> Option<Aabb> {
        match &object.data {
            ObjectData::Mesh(mesh) => mesh.bounds(),
            ObjectData::Curve(curve) => curve.local_bounds(),
            ObjectData::Baked(mesh) => {
                let positions: Vec<Point3> =
                    (0..mesh.num_vertices()).map(|i| mesh.vertex(i)).collect();
                Aabb::from_points(positions.iter())
            }
        }
    }
}

impl SceneHost for MemoryScene {
    fn read_mesh(&self, object: ObjectId) -> Result<MeshData, SceneError> {
        let obj = self.get(object)?;
        match &obj.data {
            ObjectData::Mesh(mesh) => Ok(mesh.clone()),
            _ => Err(SceneError::NotAMesh(obj.name.clone())),
        }
    }

    fn commit_mesh(&mut self, object: ObjectId, data: MeshData) -> Result<(), SceneError> {
        let obj = self.get_mut(object)?;
        match &mut obj.data {
            ObjectData::Mesh(mesh) => {
                *mesh = data;
                Ok(())
            }
            _ => Err(SceneError::NotAMesh(obj.name.clone())),
        }
    }

    fn bounding_box(&self, object: ObjectId) -> Result<[Point3; 8], SceneError> {
        let obj = self.get(object)?;
        Self::local_bounds(obj)
            .map(|bb| bb.corners())
            .ok_or_else(|| SceneError::NoBoundingData(obj.name.clone()))
    }

    fn read_curve(&self, object: ObjectId) -> Result<CurveObject, SceneError> {
        let obj = self.get(object)?;
        match &obj.data {
            ObjectData::Curve(curve) => Ok(curve.clone()),
            _ => Err(SceneError::NotACurve(obj.name.clone())),
        }
    }

    fn duplicate_object(&mut self, object: ObjectId) -> Result<ObjectId, SceneError> {
        let source = self.get(object)?.clone();
        self.duplicates += 1;
        let name = format!("{}.{:03}", source.name, self.duplicates);
        Ok(self.objects.insert(SceneObject { name, ..source }))
    }

    fn set_curve_control_point(
        &mut self,
        object: ObjectId,
        spline: usize,
        point: usize,
        position: Point3,
    ) -> Result<(), SceneError> {
        let obj = self.get_mut(object)?;
        match &mut obj.data {
            ObjectData::Curve(curve) => {
                curve.set_control_point(spline, point, position)?;
                Ok(())
            }
            _ => Err(SceneError::NotACurve(obj.name.clone())),
        }
    }

    fn placement(&self, object: ObjectId) -> Result<Placement, SceneError> {
        Ok(self.get(object)?.placement)
    }

    fn set_placement(
        &mut self,
        object: ObjectId,
        placement: Placement,
    ) -> Result<(), SceneError> {
        self.get_mut(object)?.placement = placement;
        Ok(())
    }

    fn freeze_transform(&mut self, object: ObjectId) -> Result<(), SceneError> {
        let obj = self.get_mut(object)?;
        let placement = obj.placement;
        match &mut obj.data {
            ObjectData::Mesh(mesh) => {
                for v in &mut mesh.vertices {
                    *v = placement.apply_point(v);
                }
            }
            ObjectData::Curve(curve) => {
                curve.map_points(|p| placement.apply_point(p));
            }
            ObjectData::Baked(mesh) => {
                for i in 0..mesh.num_vertices() {
                    let p = placement.apply_point(&mesh.vertex(i));
                    mesh.vertices[i * 3] = p.x as f32;
                    mesh.vertices[i * 3 + 1] = p.y as f32;
                    mesh.vertices[i * 3 + 2] = p.z as f32;
                }
            }
        }
        obj.placement = Placement::identity();
        Ok(())
    }

    fn bake_to_mesh(
        &mut self,
        curve: ObjectId,
        params: &TessellationParams,
    ) -> Result<ObjectId, SceneError> {
        let obj = self.get(curve)?;
        let curve_data = match &obj.data {
            ObjectData::Curve(c) => c,
            _ => return Err(SceneError::NotACurve(obj.name.clone())),
        };
        let baked = bake_curve_object(curve_data, params)?;
        let name = obj.name.clone();
        Ok(self.objects.insert(SceneObject {
            name,
            placement: Placement::identity(),
            data: ObjectData::Baked(baked),
        }))
    }

    fn create_group(&mut self, name: &str) -> GroupId {
        self.groups.insert(Group {
            name: name.to_string(),
            members: Vec::new(),
        })
    }

    fn delete_group(&mut self, group: GroupId) -> Result<(), SceneError> {
        self.groups
            .remove(group)
            .map(|_| ())
            .ok_or(SceneError::UnknownGroup)
    }

    fn add_to_group(&mut self, group: GroupId, object: ObjectId) -> Result<(), SceneError> {
        if !self.objects.contains_key(object) {
            return Err(SceneError::UnknownObject);
        }
        let g = self.groups.get_mut(group).ok_or(SceneError::UnknownGroup)?;
        g.members.push(object);
        Ok(())
    }

    fn group_members(&self, group: GroupId) -> Result<Vec<ObjectId>, SceneError> {
        Ok(self
            .groups
            .get(group)
            .ok_or(SceneError::UnknownGroup)?
            .members
            .clone())
    }

    fn remove_object(&mut self, object: ObjectId) -> Result<(), SceneError> {
        self.objects
            .remove(object)
            .ok_or(SceneError::UnknownObject)?;
        for group in self.groups.values_mut() {
            group.members.retain(|&m| m != object);
        }
        Ok(())
    }
}

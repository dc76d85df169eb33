//! The polygonal mesh aggregate.

use std::path::{Path, PathBuf};

use nalgebra::{Point2, Point3, Vector3};

use super::group::Group;
use super::index::{FacetId, GroupId, MaterialId, NormalId, TexcoordId, TriangleId, VertexId};
use super::material::Material;

/// One triangle of a mesh.
///
/// Each corner carries a vertex index plus optional normal and texture
/// coordinate indices ([`NONE`](NormalId::NONE) when absent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Triangle {
    /// Vertex index per corner.
    pub vertices: [VertexId; 3],
    /// Vertex-normal index per corner.
    pub normals: [NormalId; 3],
    /// Texture-coordinate index per corner.
    pub texcoords: [TexcoordId; 3],
    /// Facet normal of the whole triangle.
    pub facet: FacetId,
}

impl Triangle {
    /// A triangle with only vertex indices set.
    pub fn new(vertices: [VertexId; 3]) -> Self {
        Self {
            vertices,
            ..Default::default()
        }
    }
}

/// A triangulated Wavefront-style mesh.
///
/// Stores positions, vertex normals, texture coordinates and facet normals in
/// separate arrays addressed by 1-based ids, triangles referencing them per
/// corner, a partition of the triangles into named groups, and the material
/// table. Material 0 is always the synthesized default.
///
/// The generators in [`crate::algo`] read and rewrite these arrays in place.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub(crate) path: Option<PathBuf>,
    pub(crate) material_library: Option<String>,
    pub(crate) vertices: Vec<Point3<f32>>,
    pub(crate) normals: Vec<Vector3<f32>>,
    pub(crate) texcoords: Vec<Point2<f32>>,
    pub(crate) facet_normals: Vec<Vector3<f32>>,
    pub(crate) triangles: Vec<Triangle>,
    pub(crate) groups: Vec<Group>,
    pub(crate) materials: Vec<Material>,
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

impl Mesh {
    /// Create an empty mesh holding only the default material.
    pub fn new() -> Self {
        Self {
            path: None,
            material_library: None,
            vertices: Vec::new(),
            normals: Vec::new(),
            texcoords: Vec::new(),
            facet_normals: Vec::new(),
            triangles: Vec::new(),
            groups: Vec::new(),
            materials: vec![Material::default()],
        }
    }

    // ==================== Accessors ====================

    /// Path the mesh was read from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Name of the material library referenced by the source file.
    pub fn material_library(&self) -> Option<&str> {
        self.material_library.as_deref()
    }

    /// Get the number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of vertex normals.
    #[inline]
    pub fn num_normals(&self) -> usize {
        self.normals.len()
    }

    /// Get the number of texture coordinates.
    #[inline]
    pub fn num_texcoords(&self) -> usize {
        self.texcoords.len()
    }

    /// Get the number of facet normals.
    #[inline]
    pub fn num_facet_normals(&self) -> usize {
        self.facet_normals.len()
    }

    /// Get the number of triangles.
    #[inline]
    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }

    /// Get the number of groups.
    #[inline]
    pub fn num_groups(&self) -> usize {
        self.groups.len()
    }

    /// Get the number of materials, including the default.
    #[inline]
    pub fn num_materials(&self) -> usize {
        self.materials.len()
    }

    /// All vertex positions; [`VertexId`] `n` is at offset `n - 1`.
    pub fn vertices(&self) -> &[Point3<f32>] {
        &self.vertices
    }

    /// All vertex normals; [`NormalId`] `n` is at offset `n - 1`.
    pub fn normals(&self) -> &[Vector3<f32>] {
        &self.normals
    }

    /// All texture coordinates; [`TexcoordId`] `n` is at offset `n - 1`.
    pub fn texcoords(&self) -> &[Point2<f32>] {
        &self.texcoords
    }

    /// All facet normals; [`FacetId`] `n` is at offset `n - 1`.
    pub fn facet_normals(&self) -> &[Vector3<f32>] {
        &self.facet_normals
    }

    /// All triangles in creation order.
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// All groups in creation order.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// All materials; index 0 is the default.
    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    /// Get a vertex position by ID.
    #[inline]
    pub fn vertex(&self, id: VertexId) -> &Point3<f32> {
        &self.vertices[id.offset()]
    }

    /// Get a vertex normal by ID.
    #[inline]
    pub fn normal(&self, id: NormalId) -> &Vector3<f32> {
        &self.normals[id.offset()]
    }

    /// Get a texture coordinate by ID.
    #[inline]
    pub fn texcoord(&self, id: TexcoordId) -> &Point2<f32> {
        &self.texcoords[id.offset()]
    }

    /// Get a facet normal by ID.
    #[inline]
    pub fn facet_normal(&self, id: FacetId) -> &Vector3<f32> {
        &self.facet_normals[id.offset()]
    }

    /// Get a triangle by ID.
    #[inline]
    pub fn triangle(&self, id: TriangleId) -> &Triangle {
        &self.triangles[id.index()]
    }

    /// Get a group by ID.
    #[inline]
    pub fn group(&self, id: GroupId) -> &Group {
        &self.groups[id.index()]
    }

    /// Get a material by ID.
    #[inline]
    pub fn material(&self, id: MaterialId) -> &Material {
        &self.materials[id.index()]
    }

    /// Positions of a triangle's three corners.
    pub fn triangle_positions(&self, id: TriangleId) -> [Point3<f32>; 3] {
        let t = self.triangle(id);
        [
            *self.vertex(t.vertices[0]),
            *self.vertex(t.vertices[1]),
            *self.vertex(t.vertices[2]),
        ]
    }

    /// Iterate over triangle IDs.
    pub fn triangle_ids(&self) -> impl Iterator<Item = TriangleId> + '_ {
        (0..self.triangles.len()).map(TriangleId::new)
    }

    /// Iterate over group IDs.
    pub fn group_ids(&self) -> impl Iterator<Item = GroupId> + '_ {
        (0..self.groups.len()).map(GroupId::new)
    }

    /// Find a group by exact name.
    pub fn find_group(&self, name: &str) -> Option<GroupId> {
        self.groups
            .iter()
            .position(|g| g.name == name)
            .map(GroupId::new)
    }

    /// Find a material by exact, case-sensitive name.
    pub fn find_material(&self, name: &str) -> Option<MaterialId> {
        self.materials
            .iter()
            .position(|m| m.name == name)
            .map(MaterialId::new)
    }

    /// Whether facet normals exist for every triangle.
    pub fn has_facet_normals(&self) -> bool {
        !self.facet_normals.is_empty() && self.triangles.iter().all(|t| t.facet.is_some())
    }

    /// Whether vertex normals exist.
    pub fn has_normals(&self) -> bool {
        !self.normals.is_empty()
    }

    /// Whether texture coordinates exist.
    pub fn has_texcoords(&self) -> bool {
        !self.texcoords.is_empty()
    }

    /// Compute the bounding box of the mesh.
    pub fn bounding_box(&self) -> Option<(Point3<f32>, Point3<f32>)> {
        crate::math::bounds(&self.vertices)
    }

    /// Groups batched by material, in order of each material's first use.
    ///
    /// Render layers submit one batch per material instead of switching
    /// material state for every group. Empty groups are skipped.
    pub fn material_batches(&self) -> Vec<(MaterialId, Vec<GroupId>)> {
        let mut batches: Vec<(MaterialId, Vec<GroupId>)> = Vec::new();
        for (id, group) in self.group_ids().zip(&self.groups) {
            if group.triangles.is_empty() {
                continue;
            }
            match batches.iter_mut().find(|(m, _)| *m == group.material) {
                Some((_, groups)) => groups.push(id),
                None => batches.push((group.material, vec![id])),
            }
        }
        batches
    }

    // ==================== Construction ====================

    /// Add a new vertex and return its ID.
    pub fn add_vertex(&mut self, position: Point3<f32>) -> VertexId {
        self.vertices.push(position);
        VertexId::from_offset(self.vertices.len() - 1)
    }

    /// Append a group, or return the existing one with the same name.
    pub fn add_group(&mut self, name: &str) -> GroupId {
        if let Some(id) = self.find_group(name) {
            return id;
        }
        self.groups.push(Group::new(name));
        GroupId::new(self.groups.len() - 1)
    }

    /// Append a triangle to `group`.
    pub fn add_triangle(&mut self, group: GroupId, triangle: Triangle) -> TriangleId {
        let id = TriangleId::new(self.triangles.len());
        self.triangles.push(triangle);
        self.groups[group.index()].triangles.push(id);
        id
    }

    // ==================== Validation ====================

    /// Check that every index is in range and the groups partition the triangles.
    pub fn is_valid(&self) -> bool {
        let in_range = |value: usize, len: usize, required: bool| {
            if value == 0 {
                !required
            } else {
                value <= len
            }
        };

        for t in &self.triangles {
            for c in 0..3 {
                if !in_range(t.vertices[c].get(), self.vertices.len(), true)
                    || !in_range(t.normals[c].get(), self.normals.len(), false)
                    || !in_range(t.texcoords[c].get(), self.texcoords.len(), false)
                {
                    return false;
                }
            }
            if !in_range(t.facet.get(), self.facet_normals.len(), false) {
                return false;
            }
        }

        let mut owner = vec![false; self.triangles.len()];
        for group in &self.groups {
            if group.material.index() >= self.materials.len() {
                return false;
            }
            for t in &group.triangles {
                let Some(seen) = owner.get_mut(t.index()) else {
                    return false;
                };
                if *seen {
                    return false;
                }
                *seen = true;
            }
        }
        owner.into_iter().all(|seen| seen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_groups() -> Mesh {
        let mut mesh = Mesh::new();
        let a = mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
        let b = mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
        let c = mesh.add_vertex(Point3::new(0.0, 1.0, 0.0));
        let g0 = mesh.add_group("default");
        let g1 = mesh.add_group("lid");
        mesh.add_triangle(g0, Triangle::new([a, b, c]));
        mesh.add_triangle(g1, Triangle::new([a, c, b]));
        mesh
    }

    #[test]
    fn test_default_material_present() {
        let mesh = Mesh::new();
        assert_eq!(mesh.num_materials(), 1);
        assert_eq!(mesh.material(MaterialId::DEFAULT).name, "default");
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_add_group_is_idempotent() {
        let mut mesh = two_groups();
        assert_eq!(mesh.add_group("lid"), GroupId::new(1));
        assert_eq!(mesh.num_groups(), 2);
        assert_eq!(mesh.find_group("missing"), None);
    }

    #[test]
    fn test_find_material_is_case_sensitive() {
        let mut mesh = Mesh::new();
        mesh.materials.push(Material::named("Brass"));
        assert_eq!(mesh.find_material("Brass"), Some(MaterialId::new(1)));
        assert_eq!(mesh.find_material("brass"), None);
    }

    #[test]
    fn test_facet_normals_must_cover_every_triangle() {
        let mut mesh = two_groups();
        assert!(!mesh.has_facet_normals());

        mesh.facet_normals.push(Vector3::z());
        mesh.triangles[0].facet = FacetId::new(1);
        assert!(!mesh.has_facet_normals());

        mesh.facet_normals.push(-Vector3::z());
        mesh.triangles[1].facet = FacetId::new(2);
        assert!(mesh.has_facet_normals());
    }

    #[test]
    fn test_is_valid_detects_shared_triangle() {
        let mut mesh = two_groups();
        assert!(mesh.is_valid());
        mesh.groups[1].triangles.push(TriangleId::new(0));
        assert!(!mesh.is_valid());
    }

    #[test]
    fn test_is_valid_detects_out_of_range_normal() {
        let mut mesh = two_groups();
        mesh.triangles[0].normals[1] = NormalId::new(1);
        assert!(!mesh.is_valid());
    }

    #[test]
    fn test_material_batches_merge_groups() {
        let mut mesh = two_groups();
        mesh.materials.push(Material::named("red"));
        let g = mesh.add_group("rim");
        let v = VertexId::new(1);
        mesh.add_triangle(g, Triangle::new([v, VertexId::new(2), VertexId::new(3)]));
        mesh.groups[1].material = MaterialId::new(1);

        let batches = mesh.material_batches();
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0], (MaterialId::DEFAULT, vec![GroupId::new(0), GroupId::new(2)]));
        assert_eq!(batches[1], (MaterialId::new(1), vec![GroupId::new(1)]));
    }
}

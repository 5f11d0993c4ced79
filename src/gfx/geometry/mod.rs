//! # Mesh Geometry
//!
//! Vertex data owned by a [`Mesh`](crate::gfx::scene::Mesh) plus procedural
//! primitives used for placeholder and test geometry.
//!
//! The auto-framer treats geometry as opaque apart from its local bounding
//! box, which is computed once when the geometry is built.
//!
//! ## Usage
//!
//! ```rust
//! use autoframe::gfx::geometry::{generate_box, generate_plane};
//!
//! // A 2 x 1 x 4 box centered at the origin
//! let crate_box = generate_box(2.0, 1.0, 4.0);
//!
//! // A 10x10 ground plane with 4 subdivisions
//! let ground = generate_plane(10.0, 10.0, 4, 4);
//! assert_eq!(ground.vertex_count(), 25);
//! ```

pub mod primitives;

pub use primitives::*;

use crate::gfx::{bounds::BoundingBox, scene::vertex::Vertex3D};

/// Triangle geometry with a cached local-space bounding box
#[derive(Debug, Clone)]
pub struct Geometry {
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    indices: Vec<u32>,
    bounding_box: Option<BoundingBox>,
}

impl Geometry {
    /// Build geometry from positions, normals and triangle indices
    pub fn new(positions: Vec<[f32; 3]>, normals: Vec<[f32; 3]>, indices: Vec<u32>) -> Self {
        let bounding_box = BoundingBox::from_vertices(&positions);
        Self {
            positions,
            normals,
            indices,
            bounding_box,
        }
    }

    /// Build geometry from flat `f32` buffers as produced by OBJ parsers
    ///
    /// Normals are computed from the triangles when `normals` does not carry
    /// one normal per position.
    pub fn from_flat(positions: &[f32], normals: &[f32], indices: Vec<u32>) -> Self {
        let normals = if !normals.is_empty() && normals.len() == positions.len() {
            normals.to_vec()
        } else {
            log::warn!("Geometry has no usable normals, calculating face normals");
            Self::calculate_face_normals(positions, &indices)
        };

        let positions = positions
            .chunks_exact(3)
            .map(|p| [p[0], p[1], p[2]])
            .collect();
        let normals = normals
            .chunks_exact(3)
            .map(|n| [n[0], n[1], n[2]])
            .collect();

        Self::new(positions, normals, indices)
    }

    /// Geometry with no vertices, e.g. after its resources were released
    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new(), Vec::new())
    }

    /// Local-space bounding box, `None` when there are no vertices
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        self.bounding_box
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn normals(&self) -> &[[f32; 3]] {
        &self.normals
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Get the number of vertices in this geometry
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Get the number of triangles in this geometry
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Interleaved vertices for upload; missing normals default to +Y
    pub fn vertices(&self) -> Vec<Vertex3D> {
        self.positions
            .iter()
            .enumerate()
            .map(|(i, position)| Vertex3D {
                position: *position,
                normal: self.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Drop all vertex data
    pub fn clear(&mut self) {
        self.positions = Vec::new();
        self.normals = Vec::new();
        self.indices = Vec::new();
        self.bounding_box = None;
    }

    /// Averaged per-vertex normals from triangle faces, for meshes that ship
    /// without normals
    pub fn calculate_face_normals(positions: &[f32], indices: &[u32]) -> Vec<f32> {
        let vertex_count = positions.len() / 3;
        let mut normals = vec![0.0; vertex_count * 3];
        let mut counts = vec![0u32; vertex_count];

        for triangle in indices.chunks_exact(3) {
            let (i0, i1, i2) = (
                triangle[0] as usize,
                triangle[1] as usize,
                triangle[2] as usize,
            );
            if i0 >= vertex_count || i1 >= vertex_count || i2 >= vertex_count {
                continue;
            }

            let v0 = &positions[i0 * 3..i0 * 3 + 3];
            let v1 = &positions[i1 * 3..i1 * 3 + 3];
            let v2 = &positions[i2 * 3..i2 * 3 + 3];

            let edge1 = [v1[0] - v0[0], v1[1] - v0[1], v1[2] - v0[2]];
            let edge2 = [v2[0] - v0[0], v2[1] - v0[1], v2[2] - v0[2]];

            let face_normal = [
                edge1[1] * edge2[2] - edge1[2] * edge2[1],
                edge1[2] * edge2[0] - edge1[0] * edge2[2],
                edge1[0] * edge2[1] - edge1[1] * edge2[0],
            ];

            for &vertex_idx in &[i0, i1, i2] {
                normals[vertex_idx * 3] += face_normal[0];
                normals[vertex_idx * 3 + 1] += face_normal[1];
                normals[vertex_idx * 3 + 2] += face_normal[2];
                counts[vertex_idx] += 1;
            }
        }

        for i in 0..vertex_count {
            if counts[i] == 0 {
                continue;
            }
            let n = &mut normals[i * 3..i * 3 + 3];
            let length = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            if length > 0.0 {
                n.iter_mut().for_each(|c| *c /= length);
            }
        }

        normals
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self::empty()
    }
}

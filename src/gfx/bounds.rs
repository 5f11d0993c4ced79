//! # Axis-Aligned Bounding Boxes
//!
//! World-space extents used by the auto-framer. A box always satisfies
//! `min <= max` on every axis; "no measurable content" is expressed as
//! `Option::None` by the functions that produce boxes, never as a zero box.

use cgmath::{Matrix4, Vector3, Vector4};

/// Axis-aligned bounding box in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Minimum corner of the bounding box
    pub min: Vector3<f64>,
    /// Maximum corner of the bounding box
    pub max: Vector3<f64>,
}

impl BoundingBox {
    /// Create a box from two opposite corners in any order
    pub fn new(a: Vector3<f64>, b: Vector3<f64>) -> Self {
        Self {
            min: Vector3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Vector3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// A zero-sized box around a single point
    pub fn from_point(point: Vector3<f64>) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    /// Create a box enclosing all points, or `None` when there are none
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vector3<f64>>,
    {
        let mut points = points.into_iter();
        let first = points.next()?;
        Some(points.fold(Self::from_point(first), |bbox, p| bbox.include_point(p)))
    }

    /// Create a box from raw `f32` vertex positions, as stored in mesh geometry
    pub fn from_vertices(vertices: &[[f32; 3]]) -> Option<Self> {
        Self::from_points(
            vertices
                .iter()
                .map(|v| Vector3::new(v[0] as f64, v[1] as f64, v[2] as f64)),
        )
    }

    /// Grow the box to include a point
    pub fn include_point(mut self, p: Vector3<f64>) -> Self {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.min.z = self.min.z.min(p.z);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
        self.max.z = self.max.z.max(p.z);
        self
    }

    /// Smallest box enclosing both boxes
    pub fn union(&self, other: &BoundingBox) -> Self {
        self.include_point(other.min).include_point(other.max)
    }

    /// Extent along each axis
    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    pub fn center(&self) -> Vector3<f64> {
        (self.min + self.max) * 0.5
    }

    /// Largest extent across the three axes
    pub fn max_dimension(&self) -> f64 {
        let size = self.size();
        size.x.max(size.y).max(size.z)
    }

    /// `dx * dy * dz`; zero for flat or degenerate boxes
    pub fn volume(&self) -> f64 {
        let size = self.size();
        size.x * size.y * size.z
    }

    /// Apply a transformation matrix to the box
    ///
    /// All 8 corners are transformed and re-bounded, so the result stays
    /// axis-aligned under rotation.
    pub fn transform(&self, matrix: &Matrix4<f64>) -> Self {
        let corners = [
            Vector3::new(self.min.x, self.min.y, self.min.z),
            Vector3::new(self.max.x, self.min.y, self.min.z),
            Vector3::new(self.min.x, self.max.y, self.min.z),
            Vector3::new(self.min.x, self.min.y, self.max.z),
            Vector3::new(self.max.x, self.max.y, self.min.z),
            Vector3::new(self.max.x, self.min.y, self.max.z),
            Vector3::new(self.min.x, self.max.y, self.max.z),
            Vector3::new(self.max.x, self.max.y, self.max.z),
        ];

        let transformed = corners.iter().map(|corner| {
            let homogeneous = matrix * Vector4::new(corner.x, corner.y, corner.z, 1.0);
            Vector3::new(
                homogeneous.x / homogeneous.w,
                homogeneous.y / homogeneous.w,
                homogeneous.z / homogeneous.w,
            )
        });

        // Eight corners are always present.
        Self::from_points(transformed).unwrap_or(*self)
    }

    /// Union of an iterator of boxes, `None` when the iterator is empty
    pub fn union_all<I>(boxes: I) -> Option<Self>
    where
        I: IntoIterator<Item = BoundingBox>,
    {
        boxes.into_iter().reduce(|acc, b| acc.union(&b))
    }
}

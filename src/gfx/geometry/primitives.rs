//! # Primitive Shape Generation
//!
//! Boxes and planes with outward normals. The viewer is Y-up, so planes lie
//! in the XZ plane.

use super::Geometry;

/// Generate a box of the given size centered at the origin
///
/// Each face has its own four vertices so normals stay flat per face.
pub fn generate_box(width: f32, height: f32, depth: f32) -> Geometry {
    let (x, y, z) = (width * 0.5, height * 0.5, depth * 0.5);

    #[rustfmt::skip]
    let positions = vec![
        // Front face
        [-x, -y,  z], [ x, -y,  z], [ x,  y,  z], [-x,  y,  z],
        // Back face
        [-x, -y, -z], [-x,  y, -z], [ x,  y, -z], [ x, -y, -z],
        // Left face
        [-x, -y, -z], [-x, -y,  z], [-x,  y,  z], [-x,  y, -z],
        // Right face
        [ x, -y,  z], [ x, -y, -z], [ x,  y, -z], [ x,  y,  z],
        // Top face
        [-x,  y,  z], [ x,  y,  z], [ x,  y, -z], [-x,  y, -z],
        // Bottom face
        [-x, -y, -z], [ x, -y, -z], [ x, -y,  z], [-x, -y,  z],
    ];

    let face_normals = [
        [0.0, 0.0, 1.0],
        [0.0, 0.0, -1.0],
        [-1.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, -1.0, 0.0],
    ];
    let normals = face_normals
        .iter()
        .flat_map(|n| std::iter::repeat(*n).take(4))
        .collect();

    // Two counter-clockwise triangles per face
    let indices = (0..6u32)
        .flat_map(|face| {
            let b = face * 4;
            [b, b + 1, b + 2, b + 2, b + 3, b]
        })
        .collect();

    Geometry::new(positions, normals, indices)
}

/// Generate a unit cube centered at the origin
///
/// Returns a cube with vertices from -0.5 to 0.5 on all axes.
pub fn generate_cube() -> Geometry {
    generate_box(1.0, 1.0, 1.0)
}

/// Generate a flat plane in the XZ plane with normal +Y
///
/// # Arguments
/// * `width` - Extent along X
/// * `depth` - Extent along Z
/// * `width_segments` - Number of subdivisions along X
/// * `depth_segments` - Number of subdivisions along Z
pub fn generate_plane(width: f32, depth: f32, width_segments: u32, depth_segments: u32) -> Geometry {
    let w_segs = width_segments.max(1);
    let d_segs = depth_segments.max(1);

    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut indices = Vec::new();

    for row in 0..=d_segs {
        let v = row as f32 / d_segs as f32;
        let pos_z = (v - 0.5) * depth;

        for col in 0..=w_segs {
            let u = col as f32 / w_segs as f32;
            let pos_x = (u - 0.5) * width;

            positions.push([pos_x, 0.0, pos_z]);
            normals.push([0.0, 1.0, 0.0]);
        }
    }

    for row in 0..d_segs {
        for col in 0..w_segs {
            let i = row * (w_segs + 1) + col;
            let next_row = i + w_segs + 1;

            indices.extend_from_slice(&[i, next_row, i + 1]);
            indices.extend_from_slice(&[next_row, next_row + 1, i + 1]);
        }
    }

    Geometry::new(positions, normals, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_generation() {
        let cube = generate_cube();
        assert_eq!(cube.vertex_count(), 24); // 6 faces * 4 vertices
        assert_eq!(cube.indices().len(), 36); // 6 faces * 2 triangles * 3 indices
        assert_eq!(cube.triangle_count(), 12);
        assert_eq!(cube.normals().len(), 24);
    }

    #[test]
    fn test_box_bounds_match_size() {
        let bbox = generate_box(2.0, 4.0, 6.0).bounding_box().unwrap();
        assert_eq!(bbox.size().x, 2.0);
        assert_eq!(bbox.size().y, 4.0);
        assert_eq!(bbox.size().z, 6.0);
        assert_eq!(bbox.center().y, 0.0);
    }

    #[test]
    fn test_plane_generation() {
        let plane = generate_plane(2.0, 2.0, 2, 2);
        assert_eq!(plane.vertex_count(), 9); // 3x3 grid
        assert_eq!(plane.indices().len(), 24); // 4 quads * 2 triangles * 3 indices

        let bbox = plane.bounding_box().unwrap();
        assert_eq!(bbox.volume(), 0.0);
        assert_eq!(bbox.max_dimension(), 2.0);
    }
}

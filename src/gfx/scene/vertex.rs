//! # Vertex Data Structures
//!
//! Interleaved vertex format handed to the renderer when a mesh is uploaded.

/// A 3D vertex with position and normal data.
///
/// `#[repr(C)]` keeps the layout stable so a slice of vertices can be cast
/// straight to bytes for a vertex buffer.
///
/// # Examples
///
/// ```
/// use autoframe::gfx::scene::vertex::Vertex3D;
///
/// let vertex = Vertex3D {
///     position: [0.0, 1.0, 0.0],
///     normal: [0.0, 1.0, 0.0],
/// };
/// assert_eq!(bytemuck::bytes_of(&vertex).len(), Vertex3D::STRIDE);
/// ```
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex3D {
    /// 3D position coordinates [x, y, z]
    pub position: [f32; 3],
    /// 3D normal vector [nx, ny, nz] for lighting calculations
    pub normal: [f32; 3],
}

impl Vertex3D {
    /// Size of one vertex in a vertex buffer, in bytes
    pub const STRIDE: usize = std::mem::size_of::<Vertex3D>();
}

use cgmath::{Matrix4, One, Quaternion, SquareMatrix, Vector3, Zero};

use super::mesh::Mesh;

/// Local translation, rotation and scale of a node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vector3<f64>,
    pub rotation: Quaternion<f64>,
    pub scale: Vector3<f64>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vector3::zero(),
            rotation: Quaternion::one(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Local matrix, composed as T * R * S
    pub fn matrix(&self) -> Matrix4<f64> {
        Matrix4::from_translation(self.translation)
            * Matrix4::from(self.rotation)
            * Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }
}

/// What a node holds: children, or drawable geometry
#[derive(Debug, Clone)]
pub enum NodeKind {
    Group { children: Vec<SceneNode> },
    Mesh(Mesh),
}

/// A positioned entity in the scene hierarchy
///
/// World matrices are cached and only refreshed by
/// [`update_world_matrices`](SceneNode::update_world_matrices); anything that
/// measures world-space extents must refresh first.
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub name: String,
    pub transform: Transform,
    pub kind: NodeKind,
    world_matrix: Matrix4<f64>,
}

impl SceneNode {
    /// Create an empty group node
    pub fn group(name: impl Into<String>) -> Self {
        Self::with_kind(name, NodeKind::Group { children: Vec::new() })
    }

    /// Create a mesh leaf
    pub fn mesh(name: impl Into<String>, mesh: Mesh) -> Self {
        Self::with_kind(name, NodeKind::Mesh(mesh))
    }

    fn with_kind(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            transform: Transform::default(),
            kind,
            world_matrix: Matrix4::identity(),
        }
    }

    /// Builder pattern: add a child to a group
    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.add_child(child);
        self
    }

    /// Builder pattern: set the local translation
    pub fn with_translation(mut self, translation: Vector3<f64>) -> Self {
        self.transform.translation = translation;
        self
    }

    /// Builder pattern: set a uniform local scale
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.transform.scale = Vector3::new(scale, scale, scale);
        self
    }

    /// Builder pattern: set the local rotation
    pub fn with_rotation(mut self, rotation: Quaternion<f64>) -> Self {
        self.transform.rotation = rotation;
        self
    }

    /// Append a child
    ///
    /// Meshes are leaves, so adding to a mesh node is refused and the child
    /// is handed back.
    pub fn add_child(&mut self, child: SceneNode) -> Option<SceneNode> {
        match &mut self.kind {
            NodeKind::Group { children } => {
                children.push(child);
                None
            }
            NodeKind::Mesh(_) => {
                log::warn!("Cannot add '{}' under mesh node '{}'", child.name, self.name);
                Some(child)
            }
        }
    }

    pub fn children(&self) -> &[SceneNode] {
        match &self.kind {
            NodeKind::Group { children } => children,
            NodeKind::Mesh(_) => &[],
        }
    }

    pub fn children_mut(&mut self) -> &mut [SceneNode] {
        match &mut self.kind {
            NodeKind::Group { children } => children,
            NodeKind::Mesh(_) => &mut [],
        }
    }

    /// Remove and return all children of a group
    pub fn take_children(&mut self) -> Vec<SceneNode> {
        match &mut self.kind {
            NodeKind::Group { children } => std::mem::take(children),
            NodeKind::Mesh(_) => Vec::new(),
        }
    }

    pub fn as_mesh(&self) -> Option<&Mesh> {
        match &self.kind {
            NodeKind::Mesh(mesh) => Some(mesh),
            NodeKind::Group { .. } => None,
        }
    }

    /// World matrix as of the last refresh
    pub fn world_matrix(&self) -> &Matrix4<f64> {
        &self.world_matrix
    }

    /// World-space origin of this node as of the last refresh
    pub fn world_position(&self) -> Vector3<f64> {
        self.world_matrix.w.truncate()
    }

    /// Recompute world matrices for this subtree, treating this node as a root
    pub fn update_world_matrices(&mut self) {
        self.update_world_matrix(&Matrix4::identity());
    }

    /// Recompute world matrices for this subtree under a parent matrix
    pub fn update_world_matrix(&mut self, parent: &Matrix4<f64>) {
        self.world_matrix = parent * self.transform.matrix();
        let world = self.world_matrix;
        for child in self.children_mut() {
            child.update_world_matrix(&world);
        }
    }

    /// Depth-first pre-order visit of the subtree
    pub fn traverse<'a>(&'a self, visit: &mut impl FnMut(&'a SceneNode)) {
        visit(self);
        for child in self.children() {
            child.traverse(visit);
        }
    }

    /// Depth-first pre-order visit of every mesh leaf in the subtree
    pub fn traverse_meshes_mut(&mut self, visit: &mut impl FnMut(&mut Mesh)) {
        match &mut self.kind {
            NodeKind::Mesh(mesh) => visit(mesh),
            NodeKind::Group { children } => {
                for child in children {
                    child.traverse_meshes_mut(visit);
                }
            }
        }
    }

    /// Number of mesh leaves in the subtree
    pub fn mesh_count(&self) -> usize {
        let mut count = 0;
        self.traverse(&mut |node| {
            if node.as_mesh().is_some() {
                count += 1;
            }
        });
        count
    }

    /// Free geometry of every mesh in the subtree
    pub fn release(&mut self) {
        let mut released = 0;
        self.traverse_meshes_mut(&mut |mesh| {
            mesh.release();
            released += 1;
        });
        log::debug!("Released {} mesh(es) under '{}'", released, self.name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::{geometry::generate_cube, scene::Material};
    use approx::assert_relative_eq;
    use cgmath::{Deg, Rotation3};

    fn cube(name: &str) -> SceneNode {
        SceneNode::mesh(name, Mesh::new(generate_cube(), Material::default()))
    }

    #[test]
    fn test_world_matrices_compose_down_the_tree() {
        let mut root = SceneNode::group("root")
            .with_translation(Vector3::new(10.0, 0.0, 0.0))
            .with_scale(2.0)
            .with_child(
                SceneNode::group("arm")
                    .with_translation(Vector3::new(1.0, 0.0, 0.0))
                    .with_child(cube("hand").with_translation(Vector3::new(0.0, 1.0, 0.0))),
            );
        root.update_world_matrices();

        let hand = &root.children()[0].children()[0];
        let p = hand.world_position();
        assert_relative_eq!(p.x, 12.0);
        assert_relative_eq!(p.y, 2.0);
        assert_relative_eq!(p.z, 0.0);
    }

    #[test]
    fn test_world_matrices_are_stale_until_refreshed() {
        let mut root = SceneNode::group("root").with_child(cube("a"));
        root.update_world_matrices();
        root.transform.translation = Vector3::new(0.0, 5.0, 0.0);

        assert_eq!(root.children()[0].world_position().y, 0.0);
        root.update_world_matrices();
        assert_eq!(root.children()[0].world_position().y, 5.0);
    }

    #[test]
    fn test_rotation_in_transform() {
        let mut node = cube("spun")
            .with_rotation(Quaternion::from_angle_y(Deg(90.0)))
            .with_translation(Vector3::new(0.0, 0.0, 3.0));
        node.update_world_matrices();

        let x_axis = node.world_matrix().x.truncate();
        assert_relative_eq!(x_axis.z, -1.0, epsilon = 1e-12);
        assert_relative_eq!(node.world_position().z, 3.0);
    }

    #[test]
    fn test_mesh_nodes_refuse_children() {
        let mut leaf = cube("leaf");
        let rejected = leaf.add_child(SceneNode::group("orphan"));
        assert!(rejected.is_some());
        assert!(leaf.children().is_empty());
    }

    #[test]
    fn test_mesh_count_and_release() {
        let mut root = SceneNode::group("root")
            .with_child(cube("a"))
            .with_child(SceneNode::group("empty"))
            .with_child(SceneNode::group("nested").with_child(cube("b")));
        assert_eq!(root.mesh_count(), 2);

        root.release();
        let mut any_geometry = false;
        root.traverse(&mut |node| {
            if let Some(mesh) = node.as_mesh() {
                any_geometry |= !mesh.geometry.is_empty();
            }
        });
        assert!(!any_geometry);
    }
}

use super::node::SceneNode;

/// Synthetic group that owns a loaded model
///
/// Framing edits (scale, translation) are applied to the pivot so the loaded
/// hierarchy keeps its own transforms. A pivot lives until the next model
/// replaces it; [`Pivot::release`] frees its geometry on the way out.
#[derive(Debug, Clone)]
pub struct Pivot {
    node: SceneNode,
}

impl Pivot {
    /// Wrap a freshly loaded model
    pub fn wrap(model: SceneNode) -> Self {
        let mut node = SceneNode::group(format!("pivot:{}", model.name));
        // A fresh group always accepts children.
        let _ = node.add_child(model);
        node.update_world_matrices();
        Self { node }
    }

    /// The wrapper node that framing operates on
    pub fn node(&self) -> &SceneNode {
        &self.node
    }

    pub fn node_mut(&mut self) -> &mut SceneNode {
        &mut self.node
    }

    /// The loaded hierarchy, untouched by framing
    pub fn model(&self) -> Option<&SceneNode> {
        self.node.children().first()
    }

    /// Detach the model and free its resources
    pub fn release(mut self) {
        log::debug!("Releasing {}", self.node.name);
        for mut child in self.node.take_children() {
            child.release();
        }
    }
}

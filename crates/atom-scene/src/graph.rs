//! Scene-graph contract and the in-memory tree the renderer draws from

use crate::error::SceneError;
use glam::Vec3;
use std::collections::BTreeMap;

/// Handle to a node in a [`SceneGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Group,
    Sphere {
        radius: f32,
        color: [f32; 3],
        /// 0.0 is fully lit, 1.0 ignores lighting
        emissive: f32,
    },
    Polyline {
        points: Vec<Vec3>,
        color: [f32; 3],
    },
    Label {
        text: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub kind: NodeKind,
    /// Offset from the parent node
    pub position: Vec3,
    pub visible: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl SceneNode {
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Node storage the scene is composed into.
///
/// Nodes are addressed by [`NodeId`] and positioned relative to their parent.
/// Removing a node removes its whole subtree.
pub trait SceneGraph {
    fn insert(
        &mut self,
        parent: Option<NodeId>,
        kind: NodeKind,
        position: Vec3,
    ) -> Result<NodeId, SceneError>;

    fn remove(&mut self, id: NodeId) -> Result<(), SceneError>;

    fn node(&self, id: NodeId) -> Option<&SceneNode>;

    fn set_position(&mut self, id: NodeId, position: Vec3) -> Result<(), SceneError>;

    fn set_visible(&mut self, id: NodeId, visible: bool) -> Result<(), SceneError>;

    fn children(&self, id: NodeId) -> Result<&[NodeId], SceneError> {
        self.node(id)
            .map(SceneNode::children)
            .ok_or(SceneError::UnknownNode(id))
    }

    fn add_group(&mut self, parent: Option<NodeId>, position: Vec3) -> Result<NodeId, SceneError> {
        self.insert(parent, NodeKind::Group, position)
    }

    fn add_sphere(
        &mut self,
        parent: Option<NodeId>,
        position: Vec3,
        radius: f32,
        color: [f32; 3],
        emissive: f32,
    ) -> Result<NodeId, SceneError> {
        self.insert(
            parent,
            NodeKind::Sphere {
                radius,
                color,
                emissive,
            },
            position,
        )
    }

    fn add_polyline(
        &mut self,
        parent: Option<NodeId>,
        points: Vec<Vec3>,
        color: [f32; 3],
    ) -> Result<NodeId, SceneError> {
        self.insert(parent, NodeKind::Polyline { points, color }, Vec3::ZERO)
    }

    fn add_label(
        &mut self,
        parent: Option<NodeId>,
        position: Vec3,
        text: &str,
    ) -> Result<NodeId, SceneError> {
        self.insert(
            parent,
            NodeKind::Label {
                text: text.to_owned(),
            },
            position,
        )
    }

    /// Remove every child of `id`, keeping `id` itself.
    fn clear_children(&mut self, id: NodeId) -> Result<(), SceneError> {
        let children = self.children(id)?.to_vec();
        for child in children {
            self.remove(child)?;
        }
        Ok(())
    }
}

/// Arena-backed [`SceneGraph`].
///
/// `revision` increases on every structural or visibility change, so
/// consumers can cache derived data (such as uploaded line vertices) until the
/// tree actually changes shape. Position updates do not bump it.
#[derive(Debug, Default)]
pub struct SceneTree {
    nodes: BTreeMap<NodeId, SceneNode>,
    next_id: u32,
    revision: u64,
}

impl SceneTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// All nodes in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> {
        self.nodes.iter().map(|(id, node)| (*id, node))
    }

    /// Position of `id` in scene space, accumulated up the parent chain.
    pub fn world_position(&self, id: NodeId) -> Option<Vec3> {
        let mut node = self.nodes.get(&id)?;
        let mut position = node.position;
        while let Some(parent) = node.parent {
            node = self.nodes.get(&parent)?;
            position += node.position;
        }
        Some(position)
    }

    /// Whether `id` and all of its ancestors are visible.
    pub fn is_shown(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(id) = current {
            match self.nodes.get(&id) {
                Some(node) if node.visible => current = node.parent,
                _ => return false,
            }
        }
        true
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut SceneNode, SceneError> {
        self.nodes.get_mut(&id).ok_or(SceneError::UnknownNode(id))
    }
}

impl SceneGraph for SceneTree {
    fn insert(
        &mut self,
        parent: Option<NodeId>,
        kind: NodeKind,
        position: Vec3,
    ) -> Result<NodeId, SceneError> {
        let id = NodeId(self.next_id);
        if let Some(parent) = parent {
            self.node_mut(parent)?.children.push(id);
        }
        self.next_id += 1;
        self.nodes.insert(
            id,
            SceneNode {
                kind,
                position,
                visible: true,
                parent,
                children: Vec::new(),
            },
        );
        self.revision += 1;
        Ok(id)
    }

    fn remove(&mut self, id: NodeId) -> Result<(), SceneError> {
        let node = self.nodes.remove(&id).ok_or(SceneError::UnknownNode(id))?;
        if let Some(parent) = node.parent.and_then(|p| self.nodes.get_mut(&p)) {
            parent.children.retain(|child| *child != id);
        }

        let mut pending = node.children;
        while let Some(child) = pending.pop() {
            if let Some(removed) = self.nodes.remove(&child) {
                pending.extend(removed.children);
            }
        }
        self.revision += 1;
        Ok(())
    }

    fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(&id)
    }

    fn set_position(&mut self, id: NodeId, position: Vec3) -> Result<(), SceneError> {
        self.node_mut(id)?.position = position;
        Ok(())
    }

    fn set_visible(&mut self, id: NodeId, visible: bool) -> Result<(), SceneError> {
        let node = self.node_mut(id)?;
        if node.visible != visible {
            node.visible = visible;
            self.revision += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn children_are_tracked() {
        let mut tree = SceneTree::new();
        let group = tree.add_group(None, Vec3::ZERO).unwrap();
        let a = tree
            .add_sphere(Some(group), Vec3::X, 0.5, [1.0; 3], 0.0)
            .unwrap();
        let b = tree.add_label(Some(group), Vec3::Y, "b").unwrap();
        assert_eq!(tree.children(group).unwrap(), &[a, b]);
        assert_eq!(tree.node(a).unwrap().parent(), Some(group));
    }

    #[test]
    fn world_position_accumulates_parents() {
        let mut tree = SceneTree::new();
        let outer = tree.add_group(None, Vec3::new(1.0, 0.0, 0.0)).unwrap();
        let inner = tree.add_group(Some(outer), Vec3::new(0.0, 2.0, 0.0)).unwrap();
        let leaf = tree.add_label(Some(inner), Vec3::new(0.0, 0.0, 3.0), "x").unwrap();
        assert_eq!(tree.world_position(leaf), Some(Vec3::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn remove_drops_subtree() {
        let mut tree = SceneTree::new();
        let root = tree.add_group(None, Vec3::ZERO).unwrap();
        let group = tree.add_group(Some(root), Vec3::ZERO).unwrap();
        let leaf = tree.add_label(Some(group), Vec3::ZERO, "leaf").unwrap();

        tree.remove(group).unwrap();
        assert!(tree.node(group).is_none());
        assert!(tree.node(leaf).is_none());
        assert!(tree.children(root).unwrap().is_empty());
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn clear_children_keeps_parent() {
        let mut tree = SceneTree::new();
        let group = tree.add_group(None, Vec3::ZERO).unwrap();
        for i in 0..5 {
            tree.add_sphere(Some(group), Vec3::splat(i as f32), 0.5, [1.0; 3], 0.0)
                .unwrap();
        }
        tree.clear_children(group).unwrap();
        assert!(tree.children(group).unwrap().is_empty());
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn unknown_nodes_are_reported() {
        let mut tree = SceneTree::new();
        let id = tree.add_group(None, Vec3::ZERO).unwrap();
        tree.remove(id).unwrap();
        assert_eq!(
            tree.set_position(id, Vec3::ONE),
            Err(SceneError::UnknownNode(id))
        );
        assert_eq!(tree.remove(id), Err(SceneError::UnknownNode(id)));
        assert!(tree.add_group(Some(id), Vec3::ZERO).is_err());
    }

    #[test]
    fn visibility_is_inherited() {
        let mut tree = SceneTree::new();
        let group = tree.add_group(None, Vec3::ZERO).unwrap();
        let leaf = tree.add_label(Some(group), Vec3::ZERO, "leaf").unwrap();
        assert!(tree.is_shown(leaf));
        tree.set_visible(group, false).unwrap();
        assert!(!tree.is_shown(leaf));
    }

    #[test]
    fn revision_ignores_moves() {
        let mut tree = SceneTree::new();
        let id = tree.add_group(None, Vec3::ZERO).unwrap();
        let revision = tree.revision();
        tree.set_position(id, Vec3::ONE).unwrap();
        assert_eq!(tree.revision(), revision);
        tree.set_visible(id, false).unwrap();
        assert!(tree.revision() > revision);
    }
}

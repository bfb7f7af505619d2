//! Scene nodes for one electron and their per-frame update

use crate::error::SceneError;
use crate::frame::FrameCallback;
use crate::graph::{NodeId, SceneGraph};
use atom_model::{ElectronConfig, ElectronKinematics, OrbitPath, ORBIT_COLOR};
use glam::Vec3;

/// Emissive share for electrons; they glow in their own color
const ELECTRON_EMISSIVE: f32 = 0.6;

/// An electron's group: body sphere, orbit curve and a label that follows the body.
///
/// Only this rig writes to its nodes.
#[derive(Debug, Clone)]
pub struct ElectronRig {
    config: ElectronConfig,
    kinematics: ElectronKinematics,
    path: OrbitPath,
    group: NodeId,
    body: NodeId,
    orbit: NodeId,
    label: NodeId,
}

impl ElectronRig {
    pub fn spawn<G: SceneGraph>(
        graph: &mut G,
        parent: Option<NodeId>,
        config: ElectronConfig,
        size: f32,
    ) -> Result<Self, SceneError> {
        let kinematics = ElectronKinematics::from_config(&config)?;
        let path = OrbitPath::new(config.radius, config.plane);
        let start = kinematics.initial_position();

        let group = graph.add_group(parent, Vec3::ZERO)?;
        let body = graph.add_sphere(Some(group), start, size, config.color, ELECTRON_EMISSIVE)?;
        let orbit = graph.add_polyline(Some(group), path.points().to_vec(), ORBIT_COLOR)?;
        let label = graph.add_label(Some(group), start, config.label)?;

        Ok(Self {
            config,
            kinematics,
            path,
            group,
            body,
            orbit,
            label,
        })
    }

    pub fn config(&self) -> &ElectronConfig {
        &self.config
    }

    pub fn kinematics(&self) -> &ElectronKinematics {
        &self.kinematics
    }

    pub fn path(&self) -> &OrbitPath {
        &self.path
    }

    pub fn group(&self) -> NodeId {
        self.group
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    pub fn orbit(&self) -> NodeId {
        self.orbit
    }

    pub fn label(&self) -> NodeId {
        self.label
    }
}

impl<G: SceneGraph> FrameCallback<G> for ElectronRig {
    fn on_frame(&mut self, graph: &mut G, elapsed: f32) -> Result<(), SceneError> {
        let position = self.kinematics.position_at(elapsed);
        graph.set_position(self.body, position)?;
        graph.set_position(self.label, position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{NodeKind, SceneTree};
    use atom_model::CARBON_ELECTRONS;

    #[test]
    fn spawn_creates_owned_nodes() {
        let mut tree = SceneTree::new();
        let rig = ElectronRig::spawn(&mut tree, None, CARBON_ELECTRONS[0], 0.4).unwrap();

        assert_eq!(
            tree.children(rig.group()).unwrap(),
            &[rig.body(), rig.orbit(), rig.label()]
        );
        assert_eq!(tree.world_position(rig.body()), Some(Vec3::new(4.0, 0.0, 0.0)));
        match &tree.node(rig.orbit()).unwrap().kind {
            NodeKind::Polyline { points, .. } => assert_eq!(points.len(), 101),
            other => panic!("orbit node is {other:?}"),
        }
        match &tree.node(rig.label()).unwrap().kind {
            NodeKind::Label { text } => assert_eq!(text, "Electron 1"),
            other => panic!("label node is {other:?}"),
        }
    }

    #[test]
    fn label_follows_body_every_frame() {
        let mut tree = SceneTree::new();
        let mut rig = ElectronRig::spawn(&mut tree, None, CARBON_ELECTRONS[3], 0.4).unwrap();
        for frame in 0..120 {
            let elapsed = frame as f32 / 60.0;
            rig.on_frame(&mut tree, elapsed).unwrap();
            let body = tree.world_position(rig.body()).unwrap();
            assert_eq!(tree.world_position(rig.label()), Some(body));
            assert_eq!(body, rig.kinematics().position_at(elapsed));
        }
    }

    #[test]
    fn frame_after_removal_reports_missing_node() {
        let mut tree = SceneTree::new();
        let mut rig = ElectronRig::spawn(&mut tree, None, CARBON_ELECTRONS[1], 0.4).unwrap();
        tree.remove(rig.group()).unwrap();
        assert_eq!(
            rig.on_frame(&mut tree, 1.0),
            Err(SceneError::UnknownNode(rig.body()))
        );
    }
}

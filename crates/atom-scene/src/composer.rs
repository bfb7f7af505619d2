//! Composition root for the carbon atom scene

use crate::camera_rig::{CameraPose, CameraRig};
use crate::electron_rig::ElectronRig;
use crate::error::SceneError;
use crate::frame::FrameCallback;
use crate::graph::{NodeId, SceneGraph, SceneTree};
use crate::params::SceneParams;
use atom_model::{Isotope, Nucleon, NucleusModel, CARBON_ELECTRONS};
use glam::Vec3;

/// Emissive share for nucleons
const NUCLEON_EMISSIVE: f32 = 0.25;

/// Owns the scene graph, the selected isotope and everything positioned in it.
///
/// The nucleus is derived from the isotope alone and is rebuilt wholesale on
/// every selection; electrons and the camera are fixed for the scene's life
/// and only move in [`SceneComposer::frame`].
pub struct SceneComposer<G: SceneGraph = SceneTree> {
    graph: G,
    params: SceneParams,
    camera: CameraRig,
    model: NucleusModel,
    isotope: Isotope,
    nucleons: Vec<Nucleon>,
    nucleus: NodeId,
    nucleon_nodes: Vec<NodeId>,
    nucleus_label: NodeId,
    electrons: Vec<ElectronRig>,
}

impl<G: SceneGraph> SceneComposer<G> {
    pub fn new(mut graph: G, params: SceneParams) -> Result<Self, SceneError> {
        // The camera rig must exist before anything that is driven per frame.
        let camera = CameraRig::initialize(&params);

        let model = NucleusModel::new(params.nucleus_radius);
        let isotope = Isotope::default();
        let nucleons = model.build(isotope)?;

        let nucleus = graph.add_group(None, Vec3::ZERO)?;
        let nucleon_nodes = spawn_nucleons(&mut graph, nucleus, &nucleons, &params)?;
        let nucleus_label = graph.add_label(None, params.nucleus_label_offset, "Nucleus")?;

        let electrons = CARBON_ELECTRONS
            .iter()
            .map(|config| ElectronRig::spawn(&mut graph, None, *config, params.electron_size))
            .collect::<Result<Vec<_>, _>>()?;

        let mut composer = Self {
            graph,
            params,
            camera,
            model,
            isotope,
            nucleons,
            nucleus,
            nucleon_nodes,
            nucleus_label,
            electrons,
        };
        composer.apply_visibility()?;

        log::info!(
            "✓ Scene composed: {} with {} nucleons, {} electrons",
            composer.isotope,
            composer.nucleons.len(),
            composer.electrons.len()
        );
        Ok(composer)
    }

    pub fn graph(&self) -> &G {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut G {
        &mut self.graph
    }

    pub fn params(&self) -> &SceneParams {
        &self.params
    }

    pub fn isotope(&self) -> Isotope {
        self.isotope
    }

    pub fn nucleons(&self) -> &[Nucleon] {
        &self.nucleons
    }

    pub fn nucleon_nodes(&self) -> &[NodeId] {
        &self.nucleon_nodes
    }

    pub fn nucleus(&self) -> NodeId {
        self.nucleus
    }

    pub fn nucleus_label(&self) -> NodeId {
        self.nucleus_label
    }

    pub fn electrons(&self) -> &[ElectronRig] {
        &self.electrons
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut CameraRig {
        &mut self.camera
    }

    /// Select an isotope by mass number.
    ///
    /// Anything but 12, 13 or 14 is rejected and the current nucleus stays as
    /// it is. On success the old nucleons are discarded and replaced in one go.
    pub fn set_isotope(&mut self, mass_number: u32) -> Result<Isotope, SceneError> {
        let isotope = match Isotope::try_from(mass_number) {
            Ok(isotope) => isotope,
            Err(err) => {
                log::warn!("Rejected isotope selection: {}", err);
                return Err(err.into());
            }
        };

        // Build first so a failure leaves the current nucleus untouched
        let nucleons = self.model.build(isotope)?;

        self.graph.clear_children(self.nucleus)?;
        self.nucleon_nodes = spawn_nucleons(&mut self.graph, self.nucleus, &nucleons, &self.params)?;
        self.nucleons = nucleons;
        self.isotope = isotope;

        log::info!(
            "Isotope set to {} ({} protons, {} neutrons)",
            isotope,
            isotope.proton_count(),
            isotope.neutron_count()
        );
        Ok(isotope)
    }

    /// Per-frame update: moves every electron to its position at `elapsed`
    /// and advances the camera controller.
    pub fn frame(&mut self, elapsed: f32) -> Result<CameraPose, SceneError> {
        for electron in &mut self.electrons {
            electron.on_frame(&mut self.graph, elapsed)?;
        }
        Ok(self.camera.advance())
    }

    pub fn set_show_orbits(&mut self, show: bool) -> Result<(), SceneError> {
        self.params.show_orbits = show;
        self.apply_visibility()
    }

    pub fn set_show_labels(&mut self, show: bool) -> Result<(), SceneError> {
        self.params.show_labels = show;
        self.apply_visibility()
    }

    pub fn reset_camera(&mut self) {
        self.camera.reset(&self.params);
    }

    fn apply_visibility(&mut self) -> Result<(), SceneError> {
        let SceneParams {
            show_orbits,
            show_labels,
            ..
        } = self.params;

        self.graph.set_visible(self.nucleus_label, show_labels)?;
        for electron in &self.electrons {
            self.graph.set_visible(electron.orbit(), show_orbits)?;
            self.graph.set_visible(electron.label(), show_labels)?;
        }
        Ok(())
    }
}

fn spawn_nucleons<G: SceneGraph>(
    graph: &mut G,
    nucleus: NodeId,
    nucleons: &[Nucleon],
    params: &SceneParams,
) -> Result<Vec<NodeId>, SceneError> {
    nucleons
        .iter()
        .map(|nucleon| {
            graph.add_sphere(
                Some(nucleus),
                nucleon.position,
                params.nucleon_size,
                nucleon.color(),
                NUCLEON_EMISSIVE,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NodeKind;
    use atom_model::{ModelError, NucleonKind};

    fn composer() -> SceneComposer {
        SceneComposer::new(SceneTree::new(), SceneParams::default()).unwrap()
    }

    fn sphere_colors(composer: &SceneComposer) -> Vec<[f32; 3]> {
        composer
            .graph()
            .children(composer.nucleus())
            .unwrap()
            .iter()
            .map(|id| match composer.graph().node(*id).unwrap().kind {
                NodeKind::Sphere { color, .. } => color,
                ref other => panic!("nucleus child is {other:?}"),
            })
            .collect()
    }

    #[test]
    fn starts_with_carbon_12() {
        let composer = composer();
        assert_eq!(composer.isotope(), Isotope::C12);
        assert_eq!(composer.nucleons().len(), 12);
        assert_eq!(composer.graph().children(composer.nucleus()).unwrap().len(), 12);
        assert_eq!(composer.electrons().len(), 6);
    }

    #[test]
    fn switching_isotope_replaces_nucleus() {
        let mut composer = composer();
        let old_nodes = composer.nucleon_nodes().to_vec();

        composer.set_isotope(14).unwrap();

        assert_eq!(composer.isotope(), Isotope::C14);
        let protons = composer
            .nucleons()
            .iter()
            .filter(|n| n.kind == NucleonKind::Proton)
            .count();
        assert_eq!(protons, 6);
        assert_eq!(composer.nucleons().len() - protons, 8);
        assert_eq!(composer.graph().children(composer.nucleus()).unwrap().len(), 14);
        for id in old_nodes {
            assert!(composer.graph().node(id).is_none(), "stale nucleon {id:?}");
        }
    }

    #[test]
    fn nucleon_nodes_mirror_model() {
        let mut composer = composer();
        composer.set_isotope(13).unwrap();
        let colors = sphere_colors(&composer);
        let expected: Vec<_> = composer.nucleons().iter().map(Nucleon::color).collect();
        assert_eq!(colors, expected);

        for (id, nucleon) in composer.nucleon_nodes().iter().zip(composer.nucleons()) {
            assert_eq!(composer.graph().world_position(*id), Some(nucleon.position));
        }
    }

    #[test]
    fn invalid_isotope_keeps_current_nucleus() {
        let mut composer = composer();
        composer.set_isotope(13).unwrap();
        let nodes = composer.nucleon_nodes().to_vec();

        let err = composer.set_isotope(11).unwrap_err();
        assert_eq!(err, SceneError::Model(ModelError::InvalidIsotope(11)));
        assert_eq!(composer.isotope(), Isotope::C13);
        assert_eq!(composer.nucleon_nodes(), nodes.as_slice());
    }

    #[test]
    fn frame_moves_electrons_and_labels() {
        let mut composer = composer();
        composer.frame(std::f32::consts::FRAC_PI_2).unwrap();

        let first = &composer.electrons()[0];
        let body = composer.graph().world_position(first.body()).unwrap();
        assert!(body.distance(Vec3::new(0.0, 0.0, 4.0)) < 1e-5);
        assert_eq!(composer.graph().world_position(first.label()), Some(body));
    }

    #[test]
    fn isotope_change_leaves_electrons_alone() {
        let mut composer = composer();
        composer.frame(2.0).unwrap();
        let before: Vec<_> = composer
            .electrons()
            .iter()
            .map(|e| composer.graph().world_position(e.body()))
            .collect();

        composer.set_isotope(14).unwrap();

        let after: Vec<_> = composer
            .electrons()
            .iter()
            .map(|e| composer.graph().world_position(e.body()))
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn visibility_toggles_reach_the_graph() {
        let mut composer = composer();
        composer.set_show_orbits(false).unwrap();
        composer.set_show_labels(false).unwrap();

        let graph = composer.graph();
        assert!(!graph.is_shown(composer.nucleus_label()));
        for electron in composer.electrons() {
            assert!(!graph.is_shown(electron.orbit()));
            assert!(!graph.is_shown(electron.label()));
            assert!(graph.is_shown(electron.body()));
        }
    }

    #[test]
    fn camera_starts_at_fixed_pose() {
        let mut composer = composer();
        let pose = composer.frame(0.0).unwrap();
        assert_eq!(pose.position, Vec3::new(18.5, 1.5, -0.01));
        assert_eq!(pose.target, Vec3::ZERO);
    }
}

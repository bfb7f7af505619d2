//! Error types for scene composition

use crate::graph::NodeId;
use atom_model::ModelError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("scene node {0:?} does not exist")]
    UnknownNode(NodeId),
}

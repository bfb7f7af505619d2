//! Error types for model construction

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("invalid sphere point request: index {index} of {total}")]
    InvalidArgument { index: usize, total: usize },
    #[error("unsupported carbon isotope: C-{0} (expected 12, 13 or 14)")]
    InvalidIsotope(u32),
    #[error("orbit radius must be positive and finite (got {radius})")]
    InvalidOrbit { radius: f32 },
}

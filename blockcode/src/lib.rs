//! Error-rate evaluation of a short binary linear block code.
//!
//! Source vectors are encoded with a fixed generator matrix, sent through a
//! noisy channel model, decoded by exhaustive nearest-codeword search and
//! compared with what was sent. The Monte Carlo block-error estimate drives a
//! bisection search for the channel quality needed to reach a target error
//! probability, which in turn gives the coding gain over uncoded transmission.

pub mod channel;
pub mod code;
pub mod config;
pub mod decoder;
pub mod dense_matrix;
pub mod gf2;
pub mod simulation;
pub mod threshold;
pub mod vector;

// Re-export main types
pub use channel::{AwgnChannel, BinarySymmetricChannel, ChannelModel, ChannelState, QamOrder};
pub use code::{Codebook, CodebookEntry, LinearCode};
pub use config::{SearchConfig, SimulationConfig};
pub use dense_matrix::{DenseError, Mod2Dense};
pub use gf2::Gf2;
pub use simulation::{ErrorPoint, MonteCarlo};
pub use threshold::GainReport;
pub use vector::{Mod2Vector, SoftVector};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodeError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Generator is not injective: sources {first:?} and {second:?} share a codeword")]
    NotInjective { first: Vec<u8>, second: Vec<u8> },
    #[error("Modulation order must be a power of two >= 2, got {0}")]
    InvalidModulationOrder(u32),
    #[error("Invalid noise parameter: {0}")]
    InvalidNoise(f64),
    #[error("Dense matrix error: {0}")]
    Dense(#[from] dense_matrix::DenseError),
}

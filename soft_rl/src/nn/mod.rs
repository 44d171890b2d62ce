//! Neural network building blocks.

mod mlp;

pub use mlp::{Activation, Mlp, MlpConfig};

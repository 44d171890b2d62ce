//! Gaussian actor network.

use burn::module::Ignored;
use burn::nn::{Linear, LinearConfig};
use burn::prelude::*;
use burn::tensor::activation::tanh;

use crate::nn::{Activation, Mlp, MlpConfig};
use crate::policy::GaussianPolicy;

/// Log standard deviation bounds for the policy head.
pub const LOG_STD_MIN: f32 = -5.0;
pub const LOG_STD_MAX: f32 = 2.0;

/// Soft-clamp log_std into `[LOG_STD_MIN, LOG_STD_MAX]` via tanh rescaling:
///
/// ```text
/// log_std = LOG_STD_MIN + 0.5 * (LOG_STD_MAX - LOG_STD_MIN) * (tanh(raw) + 1)
/// ```
///
/// Unlike a hard clamp this keeps gradients alive at the bounds.
pub fn clamp_log_std<B: Backend>(raw_log_std: Tensor<B, 2>) -> Tensor<B, 2> {
    let half_range = (LOG_STD_MAX - LOG_STD_MIN) / 2.0;
    let offset = LOG_STD_MIN + half_range;
    tanh(raw_log_std).mul_scalar(half_range).add_scalar(offset)
}

/// Configuration for [`GaussianActor`].
#[derive(Debug, Clone)]
pub struct GaussianActorConfig {
    /// Observation dimension.
    pub obs_size: usize,
    /// Action dimension.
    pub action_dim: usize,
    /// Hidden layer width of the encoder.
    pub hidden_size: usize,
    /// Number of hidden layers in the encoder.
    pub hidden_layers: usize,
    /// Encoder activation.
    pub activation: Activation,
    /// Lower action bounds per dimension.
    pub action_low: Vec<f32>,
    /// Upper action bounds per dimension.
    pub action_high: Vec<f32>,
}

impl GaussianActorConfig {
    /// Create a config with symmetric bounds `[-bound, bound]`.
    pub fn new(obs_size: usize, action_dim: usize, bound: f32) -> Self {
        Self {
            obs_size,
            action_dim,
            hidden_size: 256,
            hidden_layers: 1,
            activation: Activation::Gelu,
            action_low: vec![-bound; action_dim],
            action_high: vec![bound; action_dim],
        }
    }

    /// Set explicit per-dimension bounds.
    pub fn with_bounds(mut self, low: Vec<f32>, high: Vec<f32>) -> Self {
        assert_eq!(low.len(), self.action_dim);
        assert_eq!(high.len(), self.action_dim);
        self.action_low = low;
        self.action_high = high;
        self
    }

    /// Set the encoder width.
    pub fn with_hidden_size(mut self, hidden_size: usize) -> Self {
        self.hidden_size = hidden_size;
        self
    }

    /// Set the encoder depth.
    pub fn with_hidden_layers(mut self, hidden_layers: usize) -> Self {
        self.hidden_layers = hidden_layers;
        self
    }

    /// Set the encoder activation.
    pub fn with_activation(mut self, activation: Activation) -> Self {
        self.activation = activation;
        self
    }

    /// Initialize the actor.
    pub fn init<B: Backend>(&self, device: &B::Device) -> GaussianActor<B> {
        let encoder = MlpConfig::new(self.obs_size, self.hidden_size)
            .with_hidden_size(self.hidden_size)
            .with_hidden_layers(self.hidden_layers)
            .with_activation(self.activation)
            .init(device);

        GaussianActor {
            encoder,
            mean_head: LinearConfig::new(self.hidden_size, self.action_dim).init(device),
            log_std_head: LinearConfig::new(self.hidden_size, self.action_dim).init(device),
            bounds: Ignored((self.action_low.clone(), self.action_high.clone())),
        }
    }
}

/// Stochastic Gaussian policy network.
///
/// An MLP encoder feeds separate mean and log-std heads; the resulting
/// diagonal Gaussian is squashed through tanh and scaled to the action
/// bounds by [`GaussianPolicy`].
#[derive(Module, Debug)]
pub struct GaussianActor<B: Backend> {
    encoder: Mlp<B>,
    mean_head: Linear<B>,
    log_std_head: Linear<B>,
    bounds: Ignored<(Vec<f32>, Vec<f32>)>,
}

impl<B: Backend> GaussianActor<B> {
    /// Forward pass producing the policy distribution for a batch of
    /// observations.
    pub fn forward(&self, obs: Tensor<B, 2>) -> GaussianPolicy<B> {
        let features = self.encoder.forward(obs);
        let mean = self.mean_head.forward(features.clone());
        let log_std = clamp_log_std(self.log_std_head.forward(features));

        GaussianPolicy::new(mean, log_std, self.bounds.0.clone())
    }

    /// Action dimension.
    pub fn action_dim(&self) -> usize {
        self.bounds.0 .0.len()
    }

    /// Action bounds: (low, high).
    pub fn bounds(&self) -> &(Vec<f32>, Vec<f32>) {
        &self.bounds.0
    }
}

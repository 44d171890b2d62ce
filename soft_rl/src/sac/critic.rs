//! Twin Q-critic network.

use burn::prelude::*;

use crate::nn::{Activation, Mlp, MlpConfig};

/// Configuration for [`TwinQNet`].
#[derive(Debug, Clone)]
pub struct TwinQNetConfig {
    /// Observation dimension.
    pub obs_size: usize,
    /// Action dimension.
    pub action_dim: usize,
    /// Hidden layer width of both Q-networks.
    pub hidden_size: usize,
    /// Number of hidden layers of both Q-networks.
    pub hidden_layers: usize,
    /// Activation of both Q-networks.
    pub activation: Activation,
}

impl TwinQNetConfig {
    /// Create a new config.
    pub fn new(obs_size: usize, action_dim: usize) -> Self {
        Self {
            obs_size,
            action_dim,
            hidden_size: 256,
            hidden_layers: 1,
            activation: Activation::Gelu,
        }
    }

    /// Set the Q-network width.
    pub fn with_hidden_size(mut self, hidden_size: usize) -> Self {
        self.hidden_size = hidden_size;
        self
    }

    /// Set the Q-network depth.
    pub fn with_hidden_layers(mut self, hidden_layers: usize) -> Self {
        self.hidden_layers = hidden_layers;
        self
    }

    /// Set the Q-network activation.
    pub fn with_activation(mut self, activation: Activation) -> Self {
        self.activation = activation;
        self
    }

    /// Initialize the twin critic.
    pub fn init<B: Backend>(&self, device: &B::Device) -> TwinQNet<B> {
        let mlp = |dev: &B::Device| {
            MlpConfig::new(self.obs_size + self.action_dim, 1)
                .with_hidden_size(self.hidden_size)
                .with_hidden_layers(self.hidden_layers)
                .with_activation(self.activation)
                .init(dev)
        };

        TwinQNet {
            q1: mlp(device),
            q2: mlp(device),
        }
    }
}

/// Output of one critic forward pass.
#[derive(Clone)]
pub struct TwinQOutput<B: Backend> {
    /// Q-values from the first network: [batch, 1]
    pub q1: Tensor<B, 2>,
    /// Q-values from the second network: [batch, 1]
    pub q2: Tensor<B, 2>,
}

impl<B: Backend> TwinQOutput<B> {
    /// Minimum of both Q-values: the pessimistic estimate that counters
    /// the overestimation bias of a single bootstrapped Q-network.
    pub fn min_q(&self) -> Tensor<B, 2> {
        self.q1.clone().min_pair(self.q2.clone())
    }
}

/// Twin Q-networks over `concat(obs, action)`.
///
/// Two independently initialized and independently trained Q-function
/// approximators. Their target copies live in a second `TwinQNet` advanced
/// by Polyak averaging.
#[derive(Module, Debug)]
pub struct TwinQNet<B: Backend> {
    q1: Mlp<B>,
    q2: Mlp<B>,
}

impl<B: Backend> TwinQNet<B> {
    /// Evaluate both Q-networks for a batch of (observation, action) pairs.
    pub fn forward(&self, obs: Tensor<B, 2>, action: Tensor<B, 2>) -> TwinQOutput<B> {
        let input = Tensor::cat(vec![obs, action], 1);
        TwinQOutput {
            q1: self.q1.forward(input.clone()),
            q2: self.q2.forward(input),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;
    use burn::tensor::Distribution;

    type B = NdArray<f32>;

    #[test]
    fn test_forward_shapes() {
        let device = Default::default();
        let critic: TwinQNet<B> = TwinQNetConfig::new(3, 1)
            .with_hidden_size(16)
            .init(&device);

        let obs = Tensor::random([4, 3], Distribution::Normal(0.0, 1.0), &device);
        let action = Tensor::random([4, 1], Distribution::Normal(0.0, 1.0), &device);
        let out = critic.forward(obs, action);

        assert_eq!(out.q1.dims(), [4, 1]);
        assert_eq!(out.q2.dims(), [4, 1]);
    }

    #[test]
    fn test_twins_are_independent() {
        let device = Default::default();
        let critic: TwinQNet<B> = TwinQNetConfig::new(3, 1).init(&device);

        let obs = Tensor::random([8, 3], Distribution::Normal(0.0, 1.0), &device);
        let action = Tensor::random([8, 1], Distribution::Normal(0.0, 1.0), &device);
        let out = critic.forward(obs, action);

        // Independently initialized networks disagree on at least one input
        let q1 = out.q1.into_data();
        let q2 = out.q2.into_data();
        let q1 = q1.as_slice::<f32>().unwrap();
        let q2 = q2.as_slice::<f32>().unwrap();
        assert!(q1.iter().zip(q2.iter()).any(|(a, b)| (a - b).abs() > 1e-6));
    }

    #[test]
    fn test_min_q_is_elementwise_minimum() {
        let device = Default::default();
        let out = TwinQOutput::<B> {
            q1: Tensor::from_floats([[1.0], [5.0]], &device),
            q2: Tensor::from_floats([[2.0], [3.0]], &device),
        };

        let min_q = out.min_q().into_data();
        let slice = min_q.as_slice::<f32>().unwrap();
        assert_eq!(slice, &[1.0, 3.0]);
    }
}

//! Multi-layer perceptron with a configurable number of hidden layers.

use burn::module::Ignored;
use burn::nn::{Linear, LinearConfig};
use burn::prelude::*;
use burn::tensor::activation;

/// Activation function applied after every non-output layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Relu,
    Tanh,
    Gelu,
    Sigmoid,
}

impl Activation {
    /// Apply the activation to a tensor.
    pub fn apply<B: Backend, const D: usize>(&self, x: Tensor<B, D>) -> Tensor<B, D> {
        match self {
            Self::Relu => activation::relu(x),
            Self::Tanh => activation::tanh(x),
            Self::Gelu => activation::gelu(x),
            Self::Sigmoid => activation::sigmoid(x),
        }
    }
}

/// Configuration for [`Mlp`].
#[derive(Debug, Clone)]
pub struct MlpConfig {
    /// Input feature dimension.
    pub input_size: usize,
    /// Output feature dimension.
    pub output_size: usize,
    /// Width of every hidden layer.
    pub hidden_size: usize,
    /// Number of hidden layers between the input and output projections.
    pub hidden_layers: usize,
    /// Activation function for all non-output layers.
    pub activation: Activation,
}

impl MlpConfig {
    /// Create a new config with GELU activation.
    pub fn new(input_size: usize, output_size: usize) -> Self {
        Self {
            input_size,
            output_size,
            hidden_size: 256,
            hidden_layers: 1,
            activation: Activation::Gelu,
        }
    }

    /// Set the hidden layer width.
    pub fn with_hidden_size(mut self, hidden_size: usize) -> Self {
        self.hidden_size = hidden_size;
        self
    }

    /// Set the number of hidden layers.
    pub fn with_hidden_layers(mut self, hidden_layers: usize) -> Self {
        self.hidden_layers = hidden_layers;
        self
    }

    /// Set the activation function.
    pub fn with_activation(mut self, activation: Activation) -> Self {
        self.activation = activation;
        self
    }

    /// Initialize the network.
    pub fn init<B: Backend>(&self, device: &B::Device) -> Mlp<B> {
        let input = LinearConfig::new(self.input_size, self.hidden_size).init(device);
        let hidden = (0..self.hidden_layers)
            .map(|_| LinearConfig::new(self.hidden_size, self.hidden_size).init(device))
            .collect();
        let output = LinearConfig::new(self.hidden_size, self.output_size).init(device);

        Mlp {
            input,
            hidden,
            output,
            activation: Ignored(self.activation),
        }
    }
}

/// Multi-layer perceptron.
///
/// `input -> act -> (hidden -> act)* -> output`, with no activation on the
/// output projection.
#[derive(Module, Debug)]
pub struct Mlp<B: Backend> {
    input: Linear<B>,
    hidden: Vec<Linear<B>>,
    output: Linear<B>,
    activation: Ignored<Activation>,
}

impl<B: Backend> Mlp<B> {
    /// Forward pass for a batch of feature rows.
    pub fn forward(&self, x: Tensor<B, 2>) -> Tensor<B, 2> {
        let mut x = self.activation.0.apply(self.input.forward(x));
        for layer in &self.hidden {
            x = self.activation.0.apply(layer.forward(x));
        }
        self.output.forward(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;
    use burn::tensor::Distribution;

    type B = NdArray<f32>;

    #[test]
    fn test_forward_shape() {
        let device = Default::default();
        let mlp: Mlp<B> = MlpConfig::new(3, 2)
            .with_hidden_size(16)
            .with_hidden_layers(2)
            .init(&device);

        let input = Tensor::random([5, 3], Distribution::Normal(0.0, 1.0), &device);
        let output = mlp.forward(input);
        assert_eq!(output.dims(), [5, 2]);
    }

    #[test]
    fn test_zero_hidden_layers() {
        let device = Default::default();
        let mlp: Mlp<B> = MlpConfig::new(4, 1).with_hidden_layers(0).init(&device);

        let input = Tensor::random([2, 4], Distribution::Normal(0.0, 1.0), &device);
        assert_eq!(mlp.forward(input).dims(), [2, 1]);
    }

    #[test]
    fn test_output_is_finite() {
        let device = Default::default();
        let mlp: Mlp<B> = MlpConfig::new(3, 2)
            .with_activation(Activation::Tanh)
            .init(&device);

        let input = Tensor::random([8, 3], Distribution::Normal(0.0, 10.0), &device);
        let data = mlp.forward(input).into_data();
        for v in data.as_slice::<f32>().unwrap() {
            assert!(v.is_finite());
        }
    }
}

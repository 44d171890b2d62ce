//! Squashed diagonal Gaussian policy for bounded continuous actions.
//!
//! The actor parameterizes a diagonal Gaussian; samples are drawn via
//! reparameterization, squashed through `tanh` to (-1, 1) and scaled to the
//! action bounds. The tanh change of variables requires the standard
//! log-probability correction:
//!
//! ```text
//! log pi(a|s) = log N(u; mean, std) - sum log(1 - tanh^2(u))
//! ```
//!
//! where `u` is the pre-squash sample and `a = tanh(u)`.

use burn::prelude::*;
use burn::tensor::{activation::tanh, Distribution};

/// Hard clamp bounds on log-std applied before sampling.
const LOG_STD_MIN: f32 = -20.0;
const LOG_STD_MAX: f32 = 2.0;
const EPSILON: f32 = 1e-6;

// ============================================================================
// Policy output
// ============================================================================

/// Output of one actor forward pass: a diagonal Gaussian with action bounds.
///
/// All sampling methods keep the autodiff graph intact; detach explicitly
/// (or extract to floats) on rollout paths.
#[derive(Clone)]
pub struct GaussianPolicy<B: Backend> {
    /// Mean of the Gaussian (pre-squash): [batch, action_dim]
    pub mean: Tensor<B, 2>,
    /// Log standard deviation: [batch, action_dim]
    pub log_std: Tensor<B, 2>,
    /// Action bounds for scaling: (low, high)
    pub bounds: (Vec<f32>, Vec<f32>),
}

impl<B: Backend> GaussianPolicy<B> {
    /// Create from mean and log-std tensors.
    pub fn new(mean: Tensor<B, 2>, log_std: Tensor<B, 2>, bounds: (Vec<f32>, Vec<f32>)) -> Self {
        Self {
            mean,
            log_std,
            bounds,
        }
    }

    /// Action dimension.
    pub fn action_dim(&self) -> usize {
        self.mean.dims()[1]
    }

    /// Batch size.
    pub fn batch_size(&self) -> usize {
        self.mean.dims()[0]
    }

    /// Sample actions scaled to the bounds, with corrected log probabilities.
    ///
    /// Gradients flow through both outputs (reparameterization trick).
    pub fn sample(&self) -> (Tensor<B, 2>, Tensor<B, 1>) {
        let (squashed, log_probs) =
            sample_squashed_gaussian(self.mean.clone(), self.log_std.clone());
        let scaled = scale_action(squashed, &self.bounds.0, &self.bounds.1);
        (scaled, log_probs)
    }

    /// Sample actions as plain floats for environment stepping.
    pub fn sample_detached(&self) -> (Vec<Vec<f32>>, Vec<f32>) {
        let (scaled, log_probs) = self.sample();
        tensors_to_actions(scaled.detach(), log_probs.detach())
    }

    /// Deterministic (mean) action, squashed and scaled. Used for evaluation.
    pub fn deterministic(&self) -> Tensor<B, 2> {
        let squashed = tanh(self.mean.clone());
        scale_action(squashed, &self.bounds.0, &self.bounds.1)
    }

    /// Deterministic actions as plain floats.
    pub fn deterministic_detached(&self) -> Vec<Vec<f32>> {
        let scaled = self.deterministic().detach();
        let batch_size = self.batch_size();
        let action_dim = self.action_dim();
        let data = scaled.into_data();
        let slice = data.as_slice::<f32>().unwrap();

        (0..batch_size)
            .map(|i| slice[i * action_dim..(i + 1) * action_dim].to_vec())
            .collect()
    }

    /// Log probability of already-scaled actions (with gradient flow).
    pub fn log_prob(&self, scaled_actions: Tensor<B, 2>) -> Tensor<B, 1> {
        let unscaled = unscale_action(scaled_actions, &self.bounds.0, &self.bounds.1);
        log_prob_squashed_gaussian(unscaled, self.mean.clone(), self.log_std.clone())
    }

    /// Analytical Gaussian entropy, ignoring the tanh correction.
    pub fn entropy(&self) -> Tensor<B, 1> {
        entropy_gaussian(self.log_std.clone())
    }
}

// ============================================================================
// Distribution primitives
// ============================================================================

/// Sample from a diagonal Gaussian (no squashing).
///
/// Returns `(samples, log_probs)` with log probabilities summed over action
/// dimensions. Uses the reparameterization `sample = mean + std * noise`.
pub fn sample_gaussian<B: Backend>(
    mean: Tensor<B, 2>,
    log_std: Tensor<B, 2>,
) -> (Tensor<B, 2>, Tensor<B, 1>) {
    let device = mean.device();
    let [batch_size, action_dim] = mean.dims();

    let log_std = log_std.clamp(LOG_STD_MIN, LOG_STD_MAX);
    let std = log_std.clone().exp();

    let noise: Tensor<B, 2> =
        Tensor::random([batch_size, action_dim], Distribution::Normal(0.0, 1.0), &device);

    let samples = mean + std * noise.clone();

    // log N(x; mean, std) = -0.5 * ((x - mean)/std)^2 - log(std) - 0.5 * log(2pi)
    let log_2pi = (2.0 * std::f32::consts::PI).ln();
    let log_prob_per_dim =
        noise.powf_scalar(2.0).mul_scalar(-0.5) - log_std - 0.5 * log_2pi;
    let log_probs: Tensor<B, 1> = log_prob_per_dim.sum_dim(1).flatten(0, 1);

    (samples, log_probs)
}

/// Sample from a tanh-squashed Gaussian.
///
/// Returns `(squashed_samples, log_probs)` with the squashed samples in
/// (-1, 1) and the log probabilities corrected for the change of variables.
pub fn sample_squashed_gaussian<B: Backend>(
    mean: Tensor<B, 2>,
    log_std: Tensor<B, 2>,
) -> (Tensor<B, 2>, Tensor<B, 1>) {
    let (pre_squash, gaussian_log_prob) = sample_gaussian(mean, log_std);

    let squashed = tanh(pre_squash.clone());
    let correction = squash_correction(pre_squash);

    (squashed, gaussian_log_prob - correction)
}

/// Log probability of a squashed action `a = tanh(u)` under the policy.
pub fn log_prob_squashed_gaussian<B: Backend>(
    squashed_action: Tensor<B, 2>,
    mean: Tensor<B, 2>,
    log_std: Tensor<B, 2>,
) -> Tensor<B, 1> {
    let log_std = log_std.clamp(LOG_STD_MIN, LOG_STD_MAX);

    let clamped = squashed_action.clamp(-1.0 + EPSILON, 1.0 - EPSILON);
    let pre_squash = atanh(clamped);

    let std = log_std.clone().exp();
    let normalized = (pre_squash.clone() - mean) / std;
    let log_2pi = (2.0 * std::f32::consts::PI).ln();
    let log_prob_per_dim =
        normalized.powf_scalar(2.0).mul_scalar(-0.5) - log_std - 0.5 * log_2pi;
    let gaussian_log_prob: Tensor<B, 1> = log_prob_per_dim.sum_dim(1).flatten(0, 1);

    let correction = squash_correction(pre_squash);
    gaussian_log_prob - correction
}

/// Analytical entropy of a diagonal Gaussian.
///
/// `H = 0.5 * D * (1 + log(2pi)) + sum log(std)` per sample.
pub fn entropy_gaussian<B: Backend>(log_std: Tensor<B, 2>) -> Tensor<B, 1> {
    let action_dim = log_std.dims()[1] as f32;
    let log_2pi = (2.0 * std::f32::consts::PI).ln();
    let constant = 0.5 * action_dim * (1.0 + log_2pi);

    let sum_log_std: Tensor<B, 1> = log_std.sum_dim(1).flatten(0, 1);
    sum_log_std.add_scalar(constant)
}

/// Scale a squashed action from [-1, 1] to [low, high].
pub fn scale_action<B: Backend>(
    squashed: Tensor<B, 2>,
    low: &[f32],
    high: &[f32],
) -> Tensor<B, 2> {
    let (scale, offset) = bounds_transform::<B>(low, high, &squashed.device());
    squashed * scale + offset
}

/// Unscale an action from [low, high] back to [-1, 1].
pub fn unscale_action<B: Backend>(action: Tensor<B, 2>, low: &[f32], high: &[f32]) -> Tensor<B, 2> {
    let (scale, offset) = bounds_transform::<B>(low, high, &action.device());
    (action - offset) / scale
}

// ============================================================================
// Helpers
// ============================================================================

/// Affine transform `[-1, 1] -> [low, high]` as broadcastable tensors.
fn bounds_transform<B: Backend>(
    low: &[f32],
    high: &[f32],
    device: &B::Device,
) -> (Tensor<B, 2>, Tensor<B, 2>) {
    assert_eq!(low.len(), high.len());

    let scale: Vec<f32> = low.iter().zip(high).map(|(l, h)| (h - l) / 2.0).collect();
    let offset: Vec<f32> = low.iter().zip(high).map(|(l, h)| (h + l) / 2.0).collect();

    let scale = Tensor::<B, 1>::from_floats(scale.as_slice(), device).unsqueeze_dim(0);
    let offset = Tensor::<B, 1>::from_floats(offset.as_slice(), device).unsqueeze_dim(0);
    (scale, offset)
}

/// Tanh squashing correction: `sum log(1 - tanh^2(u))`, clamped for stability.
fn squash_correction<B: Backend>(pre_squash: Tensor<B, 2>) -> Tensor<B, 1> {
    let squashed = tanh(pre_squash);
    let one_minus_sq = (-squashed.clone() * squashed + 1.0).clamp(EPSILON, 1.0);
    let log_det_per_dim = one_minus_sq.log();
    log_det_per_dim.sum_dim(1).flatten(0, 1)
}

/// Inverse hyperbolic tangent: `atanh(x) = 0.5 * log((1 + x) / (1 - x))`.
///
/// Input must lie strictly inside (-1, 1); a defensive clamp guards the
/// boundaries where atanh diverges.
fn atanh<B: Backend>(x: Tensor<B, 2>) -> Tensor<B, 2> {
    let x = x.clamp(-1.0 + EPSILON, 1.0 - EPSILON);
    let one_plus_x = x.clone() + 1.0;
    let one_minus_x = -x + 1.0;
    (one_plus_x / one_minus_x).clamp(EPSILON, f32::MAX).log() * 0.5
}

/// Split batched action/log-prob tensors into per-row vectors.
fn tensors_to_actions<B: Backend>(
    actions: Tensor<B, 2>,
    log_probs: Tensor<B, 1>,
) -> (Vec<Vec<f32>>, Vec<f32>) {
    let [batch_size, action_dim] = actions.dims();

    let action_data = actions.into_data();
    let action_slice = action_data.as_slice::<f32>().unwrap();
    let log_prob_data = log_probs.into_data();
    let log_prob_slice = log_prob_data.as_slice::<f32>().unwrap();

    let actions = (0..batch_size)
        .map(|i| action_slice[i * action_dim..(i + 1) * action_dim].to_vec())
        .collect();
    (actions, log_prob_slice.to_vec())
}

// ============================================================================
// Tests
// ============================================================================

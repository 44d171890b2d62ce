//! Automatic entropy coefficient tuning.
//!
//! SAC regularizes the policy objective with an entropy bonus weighted by
//! alpha. With automatic tuning, alpha is learned so the policy maintains a
//! fixed target entropy:
//!
//! ```text
//! min_alpha E[alpha * (-log_pi - H_target)]
//! ```
//!
//! Alpha is stored in log-space so it stays positive under gradient steps.

use burn::prelude::*;
use burn::tensor::backend::AutodiffBackend;

/// Target entropy heuristic for continuous action spaces: `-dim(A)`.
///
/// Assumes roughly unit standard deviation per action dimension.
pub fn target_entropy_continuous(action_dim: usize) -> f32 {
    -(action_dim as f32)
}

/// Learnable entropy coefficient.
///
/// Holds `log_alpha` as a tensor so the loss stays differentiable, plus a
/// cached scalar so the hot paths (loss weighting, action selection) avoid
/// tensor reads.
pub struct EntropyTuner<B: AutodiffBackend> {
    /// Log of alpha; optimizing in log-space keeps alpha > 0.
    log_alpha: Tensor<B, 1>,
    /// Target entropy level.
    target_entropy: f32,
    /// Cached alpha value, refreshed after each update step.
    cached_alpha: f32,
}

impl<B: AutodiffBackend> EntropyTuner<B> {
    /// Create a new tuner.
    pub fn new(initial_alpha: f32, target_entropy: f32, device: &B::Device) -> Self {
        let log_alpha = Tensor::from_floats([initial_alpha.ln()], device);
        Self {
            log_alpha,
            target_entropy,
            cached_alpha: initial_alpha,
        }
    }

    /// Current entropy coefficient, computed from the tensor.
    pub fn alpha(&self) -> f32 {
        let exp = self.log_alpha.clone().exp();
        exp.into_data().as_slice::<f32>().unwrap()[0]
    }

    /// Cached entropy coefficient (no tensor read).
    pub fn cached_alpha(&self) -> f32 {
        self.cached_alpha
    }

    /// Target entropy.
    pub fn target_entropy(&self) -> f32 {
        self.target_entropy
    }

    /// Alpha loss for a batch of (detached) log probabilities.
    ///
    /// `L(alpha) = -alpha * (mean_log_pi + H_target)`. Minimizing raises
    /// alpha when entropy drops below the target and lowers it otherwise.
    pub fn loss(&self, log_probs: Tensor<B, 1>) -> Tensor<B, 1> {
        let alpha = self.log_alpha.clone().exp();
        let mean_log_prob = log_probs.mean();
        -(alpha * (mean_log_prob + self.target_entropy))
    }

    /// One gradient step on `log_alpha`.
    ///
    /// `dL/d_alpha = -(mean_log_pi + H_target)`, applied to log_alpha
    /// directly. Returns the scalar loss value for logging.
    pub fn update(&mut self, mean_log_prob: f32, lr: f64, device: &B::Device) -> f32 {
        let log_alpha_val = self.log_alpha.clone().into_data().as_slice::<f32>().unwrap()[0];

        let grad = -(mean_log_prob + self.target_entropy);
        let new_log_alpha = log_alpha_val - lr as f32 * grad;

        self.log_alpha = Tensor::from_floats([new_log_alpha], device);
        self.cached_alpha = new_log_alpha.exp();

        self.cached_alpha * grad
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::{Autodiff, NdArray};

    type B = Autodiff<NdArray<f32>>;

    #[test]
    fn test_target_entropy_continuous() {
        assert_eq!(target_entropy_continuous(1), -1.0);
        assert_eq!(target_entropy_continuous(4), -4.0);
    }

    #[test]
    fn test_tuner_creation() {
        let device = Default::default();
        let tuner: EntropyTuner<B> = EntropyTuner::new(0.2, -3.0, &device);

        assert!((tuner.alpha() - 0.2).abs() < 0.01);
        assert!((tuner.cached_alpha() - 0.2).abs() < 0.01);
        assert_eq!(tuner.target_entropy(), -3.0);
    }

    #[test]
    fn test_loss_value() {
        let device = Default::default();
        let tuner: EntropyTuner<B> = EntropyTuner::new(0.2, -3.0, &device);

        let log_probs: Tensor<B, 1> = Tensor::from_floats([-2.0, -3.0, -4.0], &device);
        let loss = tuner.loss(log_probs);
        let loss_val = loss.into_data().as_slice::<f32>().unwrap()[0];

        // mean_log_prob = -3, L = -0.2 * (-3 + -3) = 1.2
        assert!((loss_val - 1.2).abs() < 0.01);
    }

    #[test]
    fn test_update_raises_alpha_when_entropy_low() {
        let device = Default::default();
        let mut tuner: EntropyTuner<B> = EntropyTuner::new(0.1, -1.0, &device);

        // Entropy too low: log probs well above the target level
        let before = tuner.cached_alpha();
        tuner.update(2.0, 0.1, &device);
        assert!(tuner.cached_alpha() > before);
    }

    #[test]
    fn test_update_lowers_alpha_when_entropy_high() {
        let device = Default::default();
        let mut tuner: EntropyTuner<B> = EntropyTuner::new(0.1, -1.0, &device);

        // Entropy too high: very negative log probs
        let before = tuner.cached_alpha();
        tuner.update(-5.0, 0.1, &device);
        assert!(tuner.cached_alpha() < before);
    }

    #[test]
    fn test_alpha_stays_positive() {
        let device = Default::default();
        let mut tuner: EntropyTuner<B> = EntropyTuner::new(0.05, -1.0, &device);

        for _ in 0..100 {
            tuner.update(-10.0, 0.5, &device);
        }
        assert!(tuner.cached_alpha() > 0.0);
    }

    #[test]
    fn test_cached_tracks_tensor() {
        let device = Default::default();
        let mut tuner: EntropyTuner<B> = EntropyTuner::new(0.2, -1.0, &device);

        tuner.update(0.5, 0.01, &device);
        assert!((tuner.cached_alpha() - tuner.alpha()).abs() < 1e-5);
    }
}

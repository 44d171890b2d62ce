//! SAC configuration and training statistics.

use crate::nn::Activation;

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for the SAC agent.
///
/// Use [`SacConfig::continuous`] for standard continuous-control defaults
/// (Haarnoja et al., 2018) or [`SacConfig::pendulum`] for the small-network
/// pendulum setup.
#[derive(Debug, Clone)]
pub struct SacConfig {
    // ========================================================================
    // Replay buffer
    // ========================================================================
    /// Maximum transitions to store in the replay buffer.
    pub buffer_capacity: usize,
    /// Batch size for training.
    pub batch_size: usize,
    /// Minimum buffer fill before training starts.
    pub min_buffer_size: usize,

    // ========================================================================
    // Algorithm hyperparameters
    // ========================================================================
    /// Discount factor for future rewards.
    pub gamma: f32,
    /// Soft update coefficient for the target critic.
    pub tau: f32,
    /// Actor learning rate.
    pub actor_lr: f64,
    /// Critic learning rate.
    pub critic_lr: f64,
    /// Entropy coefficient learning rate.
    pub alpha_lr: f64,

    // ========================================================================
    // Entropy
    // ========================================================================
    /// Enable automatic entropy tuning (learnable alpha).
    pub auto_entropy_tuning: bool,
    /// Initial entropy coefficient.
    pub initial_alpha: f32,
    /// Target entropy. `None` auto-computes `-action_dim`.
    pub target_entropy: Option<f32>,

    // ========================================================================
    // Update frequencies
    // ========================================================================
    /// Actor/alpha update frequency relative to critic updates.
    pub policy_update_freq: usize,

    // ========================================================================
    // Network architecture
    // ========================================================================
    /// Hidden layer width for actor and critic MLPs.
    pub hidden_size: usize,
    /// Number of hidden layers for actor and critic MLPs.
    pub hidden_layers: usize,
    /// Activation for actor and critic MLPs.
    pub activation: Activation,
}

impl Default for SacConfig {
    fn default() -> Self {
        Self::continuous()
    }
}

impl SacConfig {
    /// Standard continuous-control defaults from the SAC paper.
    pub fn continuous() -> Self {
        Self {
            buffer_capacity: 1_000_000,
            batch_size: 256,
            min_buffer_size: 5_000,

            gamma: 0.99,
            tau: 0.005,
            actor_lr: 3e-4,
            critic_lr: 3e-4,
            alpha_lr: 3e-4,

            auto_entropy_tuning: true,
            initial_alpha: 0.2,
            target_entropy: None,

            policy_update_freq: 2,

            hidden_size: 256,
            hidden_layers: 1,
            activation: Activation::Gelu,
        }
    }

    /// Small-network setup for the pendulum swing-up task.
    ///
    /// A 10-wide single-hidden-layer GELU network with an aggressive
    /// learning rate trains this task in a few dozen episodes.
    pub fn pendulum() -> Self {
        Self {
            buffer_capacity: 100_000,
            batch_size: 200,
            min_buffer_size: 1_000,

            gamma: 0.99,
            tau: 0.005,
            actor_lr: 3e-2,
            critic_lr: 3e-2,
            alpha_lr: 1e-2,

            auto_entropy_tuning: true,
            initial_alpha: 0.05,
            target_entropy: Some(-1.0),

            policy_update_freq: 1,

            hidden_size: 10,
            hidden_layers: 1,
            activation: Activation::Gelu,
        }
    }

    /// Target entropy for the given action dimension.
    ///
    /// The configured value wins; otherwise the SAC-paper heuristic
    /// `-action_dim` applies.
    pub fn compute_target_entropy(&self, action_dim: usize) -> f32 {
        self.target_entropy
            .unwrap_or_else(|| -(action_dim as f32))
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Set the buffer capacity.
    pub fn with_buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity;
        self
    }

    /// Set the batch size.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Set the minimum buffer fill before training.
    pub fn with_min_buffer_size(mut self, min_size: usize) -> Self {
        self.min_buffer_size = min_size;
        self
    }

    /// Set the discount factor.
    pub fn with_gamma(mut self, gamma: f32) -> Self {
        self.gamma = gamma;
        self
    }

    /// Set the soft update coefficient.
    pub fn with_tau(mut self, tau: f32) -> Self {
        self.tau = tau;
        self
    }

    /// Set one learning rate for actor, critic and alpha.
    pub fn with_learning_rate(mut self, lr: f64) -> Self {
        self.actor_lr = lr;
        self.critic_lr = lr;
        self.alpha_lr = lr;
        self
    }

    /// Set the actor learning rate.
    pub fn with_actor_lr(mut self, lr: f64) -> Self {
        self.actor_lr = lr;
        self
    }

    /// Set the critic learning rate.
    pub fn with_critic_lr(mut self, lr: f64) -> Self {
        self.critic_lr = lr;
        self
    }

    /// Set the alpha learning rate.
    pub fn with_alpha_lr(mut self, lr: f64) -> Self {
        self.alpha_lr = lr;
        self
    }

    /// Enable or disable automatic entropy tuning.
    pub fn with_auto_entropy_tuning(mut self, enabled: bool) -> Self {
        self.auto_entropy_tuning = enabled;
        self
    }

    /// Set the initial entropy coefficient.
    pub fn with_initial_alpha(mut self, alpha: f32) -> Self {
        self.initial_alpha = alpha;
        self
    }

    /// Pin the target entropy explicitly.
    pub fn with_target_entropy(mut self, target: f32) -> Self {
        self.target_entropy = Some(target);
        self
    }

    /// Set the actor update frequency.
    pub fn with_policy_update_freq(mut self, freq: usize) -> Self {
        self.policy_update_freq = freq.max(1);
        self
    }

    /// Set the hidden layer width.
    pub fn with_hidden_size(mut self, size: usize) -> Self {
        self.hidden_size = size;
        self
    }

    /// Set the number of hidden layers.
    pub fn with_hidden_layers(mut self, layers: usize) -> Self {
        self.hidden_layers = layers;
        self
    }

    /// Set the network activation.
    pub fn with_activation(mut self, activation: Activation) -> Self {
        self.activation = activation;
        self
    }
}

// ============================================================================
// Statistics
// ============================================================================

/// Training statistics for SAC.
#[derive(Debug, Clone, Default)]
pub struct SacStats {
    /// Total environment steps.
    pub env_steps: usize,
    /// Total gradient updates.
    pub train_steps: usize,
    /// Total episodes completed.
    pub episodes: usize,
    /// Recent episode returns (rolling window).
    pub recent_returns: Vec<f32>,
    /// Mean of the recent episode returns.
    pub mean_return: f32,
    /// Current entropy coefficient.
    pub alpha: f32,
    /// Latest actor loss.
    pub actor_loss: f32,
    /// Latest critic loss.
    pub critic_loss: f32,
    /// Latest alpha loss.
    pub alpha_loss: f32,
    /// Latest mean Q-value.
    pub mean_q: f32,
    /// Latest mean policy entropy.
    pub mean_entropy: f32,
    /// Replay buffer utilization (0.0 to 1.0).
    pub buffer_utilization: f32,
}

impl SacStats {
    /// Create empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an episode return, keeping at most `max_recent` entries.
    pub fn add_episode_return(&mut self, return_val: f32, max_recent: usize) {
        self.episodes += 1;
        self.recent_returns.push(return_val);
        if self.recent_returns.len() > max_recent {
            self.recent_returns.remove(0);
        }
        self.update_mean_return();
    }

    /// Recompute the mean return from the rolling window.
    pub fn update_mean_return(&mut self) {
        if !self.recent_returns.is_empty() {
            self.mean_return =
                self.recent_returns.iter().sum::<f32>() / self.recent_returns.len() as f32;
        }
    }

    /// One-line summary for logging.
    pub fn format(&self) -> String {
        format!(
            "steps={} | episodes={} | return={:.1} | alpha={:.3} | actor_loss={:.3} | critic_loss={:.3}",
            self.env_steps,
            self.episodes,
            self.mean_return,
            self.alpha,
            self.actor_loss,
            self.critic_loss,
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_continuous_defaults() {
        let config = SacConfig::continuous();
        assert_eq!(config.tau, 0.005);
        assert_eq!(config.gamma, 0.99);
        assert_eq!(config.policy_update_freq, 2);
        assert!(config.auto_entropy_tuning);
    }

    #[test]
    fn test_pendulum_preset() {
        let config = SacConfig::pendulum();
        assert_eq!(config.batch_size, 200);
        assert_eq!(config.min_buffer_size, 1_000);
        assert_eq!(config.buffer_capacity, 100_000);
        assert_eq!(config.hidden_size, 10);
        assert_eq!(config.target_entropy, Some(-1.0));
    }

    #[test]
    fn test_target_entropy_auto() {
        let config = SacConfig::continuous();
        assert_eq!(config.compute_target_entropy(3), -3.0);
    }

    #[test]
    fn test_target_entropy_explicit() {
        let config = SacConfig::continuous().with_target_entropy(-5.0);
        assert_eq!(config.compute_target_entropy(3), -5.0);
    }

    #[test]
    fn test_builder_pattern() {
        let config = SacConfig::continuous()
            .with_batch_size(512)
            .with_gamma(0.95)
            .with_learning_rate(1e-3);

        assert_eq!(config.batch_size, 512);
        assert_eq!(config.gamma, 0.95);
        assert_eq!(config.actor_lr, 1e-3);
        assert_eq!(config.critic_lr, 1e-3);
        assert_eq!(config.alpha_lr, 1e-3);
    }

    #[test]
    fn test_policy_update_freq_floor() {
        let config = SacConfig::continuous().with_policy_update_freq(0);
        assert_eq!(config.policy_update_freq, 1);
    }

    #[test]
    fn test_stats_rolling_window() {
        let mut stats = SacStats::new();
        for i in 0..15 {
            stats.add_episode_return(i as f32, 10);
        }

        assert_eq!(stats.episodes, 15);
        assert_eq!(stats.recent_returns.len(), 10);
        assert_eq!(stats.recent_returns[0], 5.0);
        assert!((stats.mean_return - 9.5).abs() < 0.01);
    }
}

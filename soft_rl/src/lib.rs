//! # Soft Actor-Critic on Burn
//!
//! Off-policy maximum entropy reinforcement learning for continuous
//! control, built on Burn's autodiff, modules and optimizers.
//!
//! The agent maintains:
//! - a squashed-Gaussian actor over a bounded continuous action,
//! - twin Q-critics with a slow-moving target copy,
//! - a uniform replay buffer,
//! - a learnable entropy coefficient stored in log-space.
//!
//! Training is single-threaded and synchronous: the caller steps the
//! environment, feeds transitions to the agent and invokes one training
//! iteration per environment step.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use burn::backend::{Autodiff, NdArray};
//! use soft_rl::environment::{Environment, PendulumTask};
//! use soft_rl::runner::run_episode;
//! use soft_rl::sac::{sac_optimizers, SacAgent, SacConfig};
//!
//! type B = Autodiff<NdArray<f32>>;
//!
//! let device = Default::default();
//! let config = SacConfig::pendulum();
//! let mut env = PendulumTask::with_seed(0)?;
//! let (actor_opt, critic_opt) = sac_optimizers::<B, _, _>();
//! let mut agent = SacAgent::for_env(&env, config, actor_opt, critic_opt, &device);
//!
//! for _ in 0..50 {
//!     run_episode(&mut env, &mut agent, true);
//! }
//! ```

pub mod core;
pub mod environment;
pub mod metrics;
pub mod nn;
pub mod policy;
pub mod runner;
pub mod sac;

pub use crate::core::replay_buffer::{ReplayBuffer, ReplayBufferConfig};
pub use crate::core::target_network::{hard_copy, soft_update};
pub use crate::core::transition::Transition;
pub use environment::{EnvStep, Environment, PendulumTask};
pub use metrics::logger::{ConsoleLogger, CsvLogger, MetricsLogger, MultiLogger, TrainingSnapshot};
pub use runner::run_episode;
pub use sac::{sac_optimizers, SacAgent, SacConfig, SacLossInfo, SacStats};

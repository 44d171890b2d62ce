//! Soft Actor-Critic.
//!
//! Off-policy maximum entropy algorithm with:
//! - a squashed-Gaussian policy over a bounded continuous action,
//! - twin Q-networks with a Polyak-averaged target copy,
//! - automatic entropy coefficient tuning towards a fixed target entropy.
//!
//! # Training flow
//!
//! ```text
//! 1. Sample batch from the replay buffer (uniform random)
//!
//! 2. CRITIC UPDATE (every step):
//!    - target: y = r + gamma*(1-d)*(min_Q_target(s',a') - alpha*log_pi(a'|s'))
//!    - regress Q1, Q2 towards y with MSE
//!
//! 3. ACTOR UPDATE:
//!    - maximize E[min_Q(s,a) - alpha*log_pi(a|s)], a reparameterized
//!
//! 4. ALPHA UPDATE (if auto-tuning):
//!    - minimize E[-alpha*(log_pi + H_target)]
//!
//! 5. TARGET UPDATE:
//!    - theta_target <- tau*theta + (1-tau)*theta_target
//! ```

mod actor;
mod agent;
mod config;
mod critic;
mod entropy;
mod losses;

pub use actor::{clamp_log_std, GaussianActor, GaussianActorConfig, LOG_STD_MAX, LOG_STD_MIN};
pub use agent::{sac_optimizers, SacAgent, SacLossInfo};
pub use config::{SacConfig, SacStats};
pub use critic::{TwinQNet, TwinQNetConfig, TwinQOutput};
pub use entropy::{target_entropy_continuous, EntropyTuner};
pub use losses::{sac_actor_loss, sac_critic_loss, sac_td_targets};

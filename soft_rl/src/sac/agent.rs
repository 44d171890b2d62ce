//! The SAC agent: networks, optimizers, buffer and the training iteration.

use burn::module::AutodiffModule;
use burn::optim::{AdamConfig, GradientsParams, Optimizer};
use burn::prelude::*;
use burn::tensor::backend::AutodiffBackend;

use crate::core::replay_buffer::{ReplayBuffer, ReplayBufferConfig};
use crate::core::target_network::{hard_copy, soft_update};
use crate::core::transition::Transition;
use crate::environment::Environment;
use crate::sac::actor::{GaussianActor, GaussianActorConfig};
use crate::sac::config::SacConfig;
use crate::sac::critic::{TwinQNet, TwinQNetConfig};
use crate::sac::entropy::EntropyTuner;
use crate::sac::losses::{sac_actor_loss, sac_critic_loss, sac_td_targets};

/// Create Adam optimizers for the actor and critic.
pub fn sac_optimizers<B, A, C>() -> (impl Optimizer<A, B>, impl Optimizer<C, B>)
where
    B: AutodiffBackend,
    A: AutodiffModule<B>,
    C: AutodiffModule<B>,
{
    (
        AdamConfig::new().with_epsilon(1e-5).init(),
        AdamConfig::new().with_epsilon(1e-5).init(),
    )
}

/// Loss scalars from one training iteration, for logging.
#[derive(Debug, Clone, Default)]
pub struct SacLossInfo {
    /// Critic loss (summed MSE of both Q-networks).
    pub critic_loss: f32,
    /// Actor loss (0.0 on steps without an actor update).
    pub actor_loss: f32,
    /// Alpha loss (0.0 if not auto-tuning or not updated this step).
    pub alpha_loss: f32,
    /// Current entropy coefficient.
    pub alpha: f32,
    /// Mean Q1 prediction over the batch.
    pub mean_q: f32,
    /// Mean policy entropy over the batch.
    pub mean_entropy: f32,
}

/// Soft Actor-Critic agent.
///
/// Owns the actor, the twin critic and its target copy, both optimizers,
/// the entropy tuner and the replay buffer. The caller collects experience
/// via [`SacAgent::act`] / [`SacAgent::observe`] and invokes
/// [`SacAgent::train_step`] once per environment step.
pub struct SacAgent<B, AO, CO>
where
    B: AutodiffBackend,
    AO: Optimizer<GaussianActor<B>, B>,
    CO: Optimizer<TwinQNet<B>, B>,
{
    config: SacConfig,
    actor: GaussianActor<B>,
    critic: TwinQNet<B>,
    target_critic: TwinQNet<B>,
    actor_optimizer: AO,
    critic_optimizer: CO,
    entropy_tuner: EntropyTuner<B>,
    buffer: ReplayBuffer,
    device: B::Device,
    gradient_steps: usize,
}

impl<B, AO, CO> SacAgent<B, AO, CO>
where
    B: AutodiffBackend,
    AO: Optimizer<GaussianActor<B>, B>,
    CO: Optimizer<TwinQNet<B>, B>,
{
    /// Create an agent from pre-built networks.
    ///
    /// The target critic starts as a hard copy of the online critic.
    pub fn new(
        config: SacConfig,
        actor: GaussianActor<B>,
        critic: TwinQNet<B>,
        actor_optimizer: AO,
        critic_optimizer: CO,
        device: &B::Device,
    ) -> Self {
        let target_critic = hard_copy::<B, _>(&critic);
        let target_entropy = config.compute_target_entropy(actor.action_dim());
        let entropy_tuner = EntropyTuner::new(config.initial_alpha, target_entropy, device);
        let buffer = ReplayBuffer::new(ReplayBufferConfig::new(
            config.buffer_capacity,
            config.min_buffer_size,
            config.batch_size,
        ));

        Self {
            config,
            actor,
            critic,
            target_critic,
            actor_optimizer,
            critic_optimizer,
            entropy_tuner,
            buffer,
            device: device.clone(),
            gradient_steps: 0,
        }
    }

    /// Create an agent with networks sized for the given environment.
    pub fn for_env<E: Environment>(
        env: &E,
        config: SacConfig,
        actor_optimizer: AO,
        critic_optimizer: CO,
        device: &B::Device,
    ) -> Self {
        let (low, high) = env.action_bounds();
        let actor = GaussianActorConfig::new(env.obs_size(), env.action_dim(), 1.0)
            .with_bounds(low, high)
            .with_hidden_size(config.hidden_size)
            .with_hidden_layers(config.hidden_layers)
            .with_activation(config.activation)
            .init(device);
        let critic = TwinQNetConfig::new(env.obs_size(), env.action_dim())
            .with_hidden_size(config.hidden_size)
            .with_hidden_layers(config.hidden_layers)
            .with_activation(config.activation)
            .init(device);

        Self::new(config, actor, critic, actor_optimizer, critic_optimizer, device)
    }

    /// Select an action for one observation.
    ///
    /// Samples from the policy during training; returns the deterministic
    /// (squashed mean) action during evaluation.
    pub fn act(&self, obs: &[f32], train: bool) -> Vec<f32> {
        let obs_tensor = Tensor::<B, 1>::from_floats(obs, &self.device).reshape([1, obs.len()]);
        let policy = self.actor.forward(obs_tensor);

        if train {
            let (mut actions, _) = policy.sample_detached();
            actions.remove(0)
        } else {
            let mut actions = policy.deterministic_detached();
            actions.remove(0)
        }
    }

    /// Store a transition in the replay buffer.
    pub fn observe(&mut self, transition: Transition) {
        self.buffer.push(transition);
    }

    /// One SAC training iteration.
    ///
    /// Returns `None` until the replay buffer reaches its minimum fill.
    /// Otherwise: critic regression towards the bootstrapped soft target,
    /// actor update via the reparameterized policy gradient (every
    /// `policy_update_freq` steps, together with the alpha update), and a
    /// Polyak soft-update of the target critic.
    pub fn train_step(&mut self) -> Option<SacLossInfo> {
        if !self.buffer.is_training_ready() {
            return None;
        }
        let batch = self.buffer.sample_batch()?;

        let batch_size = batch.len();
        let obs_size = batch[0].state_dim();
        let action_dim = batch[0].action_dim();
        let alpha = self.entropy_tuner.cached_alpha();

        // Batch tensors
        let states: Vec<f32> = batch.iter().flat_map(|t| t.state.iter().copied()).collect();
        let next_states: Vec<f32> = batch
            .iter()
            .flat_map(|t| t.next_state.iter().copied())
            .collect();
        let actions: Vec<f32> = batch.iter().flat_map(|t| t.action.iter().copied()).collect();
        let rewards: Vec<f32> = batch.iter().map(|t| t.reward).collect();
        let terminals: Vec<f32> = batch
            .iter()
            .map(|t| if t.terminal { 1.0 } else { 0.0 })
            .collect();

        let states = Tensor::<B, 1>::from_floats(states.as_slice(), &self.device)
            .reshape([batch_size, obs_size]);
        let next_states = Tensor::<B, 1>::from_floats(next_states.as_slice(), &self.device)
            .reshape([batch_size, obs_size]);
        let actions = Tensor::<B, 1>::from_floats(actions.as_slice(), &self.device)
            .reshape([batch_size, action_dim]);
        let rewards = Tensor::<B, 1>::from_floats(rewards.as_slice(), &self.device);
        let terminals = Tensor::<B, 1>::from_floats(terminals.as_slice(), &self.device);

        let mut actor = self.actor.clone();
        let mut critic = self.critic.clone();
        let target_critic = self.target_critic.clone();

        // ====================================================================
        // Critic update
        // ====================================================================

        // Bootstrapped soft target from the target critic and a fresh
        // policy sample at s'; fully detached.
        let next_policy = actor.forward(next_states.clone());
        let (next_actions, next_log_probs) = next_policy.sample();
        let target_out = target_critic.forward(next_states, next_actions.detach());
        let min_q_next: Tensor<B, 1> = target_out.min_q().flatten(0, 1);

        let td_targets = sac_td_targets(
            rewards,
            terminals,
            min_q_next,
            next_log_probs.detach(),
            self.config.gamma,
            alpha,
        )
        .detach();

        let out = critic.forward(states.clone(), actions);
        let q1: Tensor<B, 1> = out.q1.flatten(0, 1);
        let q2: Tensor<B, 1> = out.q2.flatten(0, 1);
        let mean_q = scalar(&q1.clone().mean());

        let critic_loss = sac_critic_loss(q1, q2, td_targets);
        let critic_loss_val = scalar(&critic_loss);

        let grads = critic_loss.backward();
        let grads = GradientsParams::from_grads(grads, &critic);
        critic = self
            .critic_optimizer
            .step(self.config.critic_lr, critic, grads);

        // ====================================================================
        // Actor and alpha update
        // ====================================================================

        let mut actor_loss_val = 0.0;
        let mut alpha_loss_val = 0.0;
        let mut mean_entropy = 0.0;

        if self.gradient_steps % self.config.policy_update_freq == 0 {
            let policy = actor.forward(states.clone());
            let (new_actions, new_log_probs) = policy.sample();

            let q_new = critic.forward(states, new_actions);
            let min_q_new: Tensor<B, 1> = q_new.min_q().flatten(0, 1);

            let actor_loss = sac_actor_loss(min_q_new, new_log_probs.clone(), alpha);
            actor_loss_val = scalar(&actor_loss);
            mean_entropy = scalar(&policy.entropy().mean());

            let grads = actor_loss.backward();
            let grads = GradientsParams::from_grads(grads, &actor);
            actor = self
                .actor_optimizer
                .step(self.config.actor_lr, actor, grads);

            if self.config.auto_entropy_tuning {
                let mean_log_prob = scalar(&new_log_probs.detach().mean());
                alpha_loss_val =
                    self.entropy_tuner
                        .update(mean_log_prob, self.config.alpha_lr, &self.device);
            }
        }

        // ====================================================================
        // Target network update
        // ====================================================================

        self.target_critic = soft_update::<B, _>(&critic, target_critic, self.config.tau);
        self.actor = actor;
        self.critic = critic;
        self.gradient_steps += 1;

        Some(SacLossInfo {
            critic_loss: critic_loss_val,
            actor_loss: actor_loss_val,
            alpha_loss: alpha_loss_val,
            alpha: self.entropy_tuner.cached_alpha(),
            mean_q,
            mean_entropy,
        })
    }

    /// Current entropy coefficient.
    pub fn alpha(&self) -> f32 {
        self.entropy_tuner.cached_alpha()
    }

    /// Number of gradient updates performed.
    pub fn gradient_steps(&self) -> usize {
        self.gradient_steps
    }

    /// Replay buffer.
    pub fn buffer(&self) -> &ReplayBuffer {
        &self.buffer
    }

    /// Actor network.
    pub fn actor(&self) -> &GaussianActor<B> {
        &self.actor
    }

    /// Online critic network.
    pub fn critic(&self) -> &TwinQNet<B> {
        &self.critic
    }

    /// Agent configuration.
    pub fn config(&self) -> &SacConfig {
        &self.config
    }
}

/// Extract the scalar from a single-element 1D tensor.
fn scalar<B: Backend>(tensor: &Tensor<B, 1>) -> f32 {
    tensor.clone().into_data().as_slice::<f32>().unwrap()[0]
}

// ============================================================================
// Tests
// ============================================================================

//! Episode driver for synchronous single-environment training.

use burn::optim::Optimizer;
use burn::tensor::backend::AutodiffBackend;

use crate::core::transition::Transition;
use crate::environment::Environment;
use crate::sac::{GaussianActor, SacAgent, SacLossInfo, SacStats, TwinQNet};

/// Episode returns are averaged over this many recent episodes.
const RETURN_WINDOW: usize = 20;

/// Run one episode to termination or truncation.
///
/// In training mode every transition is stored in the replay buffer and one
/// gradient step is taken per environment step (once the buffer is warm).
/// Returns the undiscounted episode return.
pub fn run_episode<B, AO, CO, E>(env: &mut E, agent: &mut SacAgent<B, AO, CO>, train: bool) -> f32
where
    B: AutodiffBackend,
    AO: Optimizer<GaussianActor<B>, B>,
    CO: Optimizer<TwinQNet<B>, B>,
    E: Environment,
{
    run_episode_with_stats(env, agent, train, None)
}

/// Like [`run_episode`], also updating the shared statistics.
pub fn run_episode_with_stats<B, AO, CO, E>(
    env: &mut E,
    agent: &mut SacAgent<B, AO, CO>,
    train: bool,
    mut stats: Option<&mut SacStats>,
) -> f32
where
    B: AutodiffBackend,
    AO: Optimizer<GaussianActor<B>, B>,
    CO: Optimizer<TwinQNet<B>, B>,
    E: Environment,
{
    let mut obs = env.reset();
    let mut episode_return = 0.0;

    loop {
        let action = agent.act(&obs, train);
        let step = env.step(&action);
        episode_return += step.reward;

        if train {
            agent.observe(Transition::new(
                obs,
                action,
                step.reward,
                step.obs.clone(),
                step.terminal,
                step.truncated,
            ));

            let info = agent.train_step();
            if let Some(stats) = stats.as_deref_mut() {
                record_step(stats, agent.buffer().utilization(), info);
            }
        } else if let Some(stats) = stats.as_deref_mut() {
            stats.env_steps += 1;
        }

        obs = step.obs;
        if step.terminal || step.truncated {
            break;
        }
    }

    if let Some(stats) = stats {
        stats.add_episode_return(episode_return, RETURN_WINDOW);
    }

    episode_return
}

fn record_step(stats: &mut SacStats, buffer_utilization: f32, info: Option<SacLossInfo>) {
    stats.env_steps += 1;
    stats.buffer_utilization = buffer_utilization;

    if let Some(info) = info {
        stats.train_steps += 1;
        stats.critic_loss = info.critic_loss;
        stats.alpha = info.alpha;
        stats.mean_q = info.mean_q;
        if info.actor_loss != 0.0 {
            stats.actor_loss = info.actor_loss;
            stats.alpha_loss = info.alpha_loss;
            stats.mean_entropy = info.mean_entropy;
        }
    }
}

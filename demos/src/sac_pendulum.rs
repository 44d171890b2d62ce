//! SAC on the pendulum swing-up task.
//!
//! Single-threaded, synchronous: one environment, one gradient step per
//! environment step. 50 training episodes followed by 50 deterministic
//! evaluation episodes, reporting the average test return.

use burn::backend::{Autodiff, NdArray};
use burn::tensor::backend::Backend;

use soft_rl::environment::PendulumTask;
use soft_rl::metrics::logger::{ConsoleLogger, MetricsLogger, TrainingSnapshot};
use soft_rl::runner::{run_episode, run_episode_with_stats};
use soft_rl::sac::{sac_optimizers, SacAgent, SacConfig, SacStats};

type B = Autodiff<NdArray<f32>>;

const TRAIN_EPISODES: usize = 50;
const TEST_EPISODES: usize = 50;

pub fn run() {
    println!("=== SAC (Pendulum swing-up) ===");
    println!("Observation: [cos(theta), sin(theta), theta_dot]");
    println!(
        "Action: torque in [{}, {}]",
        PendulumTask::ACTION_LOW,
        PendulumTask::ACTION_HIGH
    );
    println!();

    B::seed(420);

    let config = SacConfig::pendulum();
    println!(
        "Buffer: capacity={}, min_size={}, batch={}",
        config.buffer_capacity, config.min_buffer_size, config.batch_size
    );
    println!(
        "Tau: {} | gamma: {} | initial alpha: {} | target entropy: {:?}",
        config.tau, config.gamma, config.initial_alpha, config.target_entropy
    );
    println!();

    let device = Default::default();
    let mut env = PendulumTask::with_seed(0).expect("Failed to create pendulum");
    let (actor_opt, critic_opt) = sac_optimizers::<B, _, _>();
    let mut agent = SacAgent::for_env(&env, config, actor_opt, critic_opt, &device);

    // Training
    let mut stats = SacStats::new();
    let mut logger = ConsoleLogger::new(1);

    for episode in 1..=TRAIN_EPISODES {
        run_episode_with_stats(&mut env, &mut agent, true, Some(&mut stats));

        let snapshot = TrainingSnapshot::new(
            episode,
            stats.env_steps,
            stats.train_steps,
            stats.mean_return,
        )
        .with_losses(stats.critic_loss, stats.actor_loss)
        .with_alpha(stats.alpha)
        .with_entropy(stats.mean_entropy);
        logger.log(&snapshot);
    }
    logger.flush();
    println!();

    // Evaluation with the deterministic policy
    let mut test_returns = Vec::with_capacity(TEST_EPISODES);
    for _ in 0..TEST_EPISODES {
        test_returns.push(run_episode(&mut env, &mut agent, false));
    }

    let avg_test_return: f32 = test_returns.iter().sum::<f32>() / test_returns.len() as f32;
    println!("AVG_TEST_RETURN: {:.1}", avg_test_return);
}

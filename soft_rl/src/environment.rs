//! Environment abstraction and the pendulum adapter.

use pendulum_env::{Pendulum, PendulumConfig, MAX_TORQUE};

/// Result of one environment step.
#[derive(Debug, Clone)]
pub struct EnvStep {
    /// Next observation.
    pub obs: Vec<f32>,
    /// Reward for the transition.
    pub reward: f32,
    /// Episode terminated (failure/goal state).
    pub terminal: bool,
    /// Episode truncated (time limit).
    pub truncated: bool,
}

/// Synchronous single-instance environment.
///
/// The agent drives the environment one step at a time; episodes end when
/// a step reports `terminal` or `truncated`.
pub trait Environment {
    /// Observation dimension.
    fn obs_size(&self) -> usize;

    /// Action dimension.
    fn action_dim(&self) -> usize;

    /// Per-dimension action bounds: (low, high).
    fn action_bounds(&self) -> (Vec<f32>, Vec<f32>);

    /// Reset to an initial state and return the first observation.
    fn reset(&mut self) -> Vec<f32>;

    /// Advance one step with the given action.
    fn step(&mut self, action: &[f32]) -> EnvStep;
}

// ============================================================================
// Pendulum adapter
// ============================================================================

/// Pendulum swing-up task.
///
/// Observation `[cos(theta), sin(theta), theta_dot]`, one torque action in
/// `[-MAX_TORQUE, MAX_TORQUE]`. Episodes truncate at the step limit and
/// never terminate.
pub struct PendulumTask {
    inner: Pendulum,
}

impl PendulumTask {
    /// Observation dimensions.
    pub const OBS_SIZE: usize = pendulum_env::OBS_SIZE;
    /// Action dimensions.
    pub const ACTION_DIM: usize = 1;
    /// Lower torque bound.
    pub const ACTION_LOW: f32 = -MAX_TORQUE;
    /// Upper torque bound.
    pub const ACTION_HIGH: f32 = MAX_TORQUE;

    /// Create the task with default physics and the given seed.
    pub fn with_seed(seed: u64) -> pendulum_env::Result<Self> {
        Ok(Self {
            inner: Pendulum::with_seed(seed)?,
        })
    }

    /// Create the task from an explicit environment configuration.
    pub fn new(config: PendulumConfig) -> pendulum_env::Result<Self> {
        Ok(Self {
            inner: Pendulum::new(config)?,
        })
    }

    /// Access the wrapped simulation.
    pub fn inner(&self) -> &Pendulum {
        &self.inner
    }
}

impl Environment for PendulumTask {
    fn obs_size(&self) -> usize {
        Self::OBS_SIZE
    }

    fn action_dim(&self) -> usize {
        Self::ACTION_DIM
    }

    fn action_bounds(&self) -> (Vec<f32>, Vec<f32>) {
        (vec![Self::ACTION_LOW], vec![Self::ACTION_HIGH])
    }

    fn reset(&mut self) -> Vec<f32> {
        self.inner.reset().to_vec()
    }

    fn step(&mut self, action: &[f32]) -> EnvStep {
        debug_assert_eq!(action.len(), Self::ACTION_DIM);
        let step = self.inner.step(action[0]);
        EnvStep {
            obs: step.obs.to_vec(),
            reward: step.reward,
            terminal: false,
            truncated: step.truncated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pendulum_task_dims() {
        let env = PendulumTask::with_seed(0).unwrap();
        assert_eq!(env.obs_size(), 3);
        assert_eq!(env.action_dim(), 1);
        assert_eq!(env.action_bounds(), (vec![-2.0], vec![2.0]));
    }

    #[test]
    fn test_pendulum_task_episode() {
        let mut env = PendulumTask::with_seed(0).unwrap();
        let obs = env.reset();
        assert_eq!(obs.len(), 3);

        let mut steps = 0;
        loop {
            let step = env.step(&[0.5]);
            steps += 1;
            assert_eq!(step.obs.len(), 3);
            assert!(step.reward <= 0.0);
            assert!(!step.terminal);
            if step.truncated {
                break;
            }
        }
        assert_eq!(steps, 200);
    }
}

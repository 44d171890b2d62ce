//! Single-instance pendulum simulation.

use rand::SeedableRng;

use crate::error::{EnvError, Result};
use crate::rng::{random_uniform, Xoshiro256StarStar};

/// Maximum angular velocity (rad/s).
pub const MAX_SPEED: f32 = 8.0;
/// Maximum applicable torque.
pub const MAX_TORQUE: f32 = 2.0;
/// Integration time step (s).
pub const DT: f32 = 0.05;
/// Gravitational acceleration.
pub const GRAVITY: f32 = 10.0;
/// Pendulum mass.
pub const MASS: f32 = 1.0;
/// Pendulum length.
pub const LENGTH: f32 = 1.0;
/// Default episode length before truncation.
pub const MAX_STEPS: u32 = 200;
/// Observation dimensions: [cos(theta), sin(theta), theta_dot].
pub const OBS_SIZE: usize = 3;

/// Configuration for the pendulum environment.
#[derive(Debug, Clone)]
pub struct PendulumConfig {
    /// Maximum episode length before truncation.
    pub max_steps: u32,
    /// Range for the random initial angle (±range).
    pub init_theta_range: f32,
    /// Range for the random initial angular velocity (±range).
    pub init_theta_dot_range: f32,
    /// Gravitational acceleration.
    pub gravity: f32,
    /// Base RNG seed for resets.
    pub seed: u64,
}

impl Default for PendulumConfig {
    fn default() -> Self {
        Self {
            max_steps: MAX_STEPS,
            init_theta_range: std::f32::consts::PI,
            init_theta_dot_range: 1.0,
            gravity: GRAVITY,
            seed: 0,
        }
    }
}

impl PendulumConfig {
    /// Set the episode step limit.
    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Set the gravitational acceleration.
    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Result of one environment step.
#[derive(Debug, Clone)]
pub struct PendulumStep {
    /// Next observation: [cos(theta), sin(theta), theta_dot].
    pub obs: [f32; OBS_SIZE],
    /// Reward for the transition.
    pub reward: f32,
    /// Episode hit the step limit. The pendulum never terminates.
    pub truncated: bool,
}

/// Pendulum swing-up environment.
///
/// The state is the pole angle `theta` (0 = upright, normalized to
/// `[-pi, pi)`) and angular velocity `theta_dot`. The agent applies a
/// bounded torque each step; the reward penalizes angle, velocity and
/// control effort: `-(theta^2 + 0.1*theta_dot^2 + 0.001*torque^2)`.
#[derive(Debug)]
pub struct Pendulum {
    theta: f32,
    theta_dot: f32,
    tick: u32,
    episode_reward: f32,
    rng: Xoshiro256StarStar,
    config: PendulumConfig,
}

impl Pendulum {
    /// Create a new pendulum environment.
    pub fn new(config: PendulumConfig) -> Result<Self> {
        if config.max_steps == 0 {
            return Err(EnvError::InvalidConfig {
                param: "max_steps".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if !config.init_theta_range.is_finite() || config.init_theta_range < 0.0 {
            return Err(EnvError::InvalidConfig {
                param: "init_theta_range".to_string(),
                message: "must be finite and non-negative".to_string(),
            });
        }
        if !config.init_theta_dot_range.is_finite() || config.init_theta_dot_range < 0.0 {
            return Err(EnvError::InvalidConfig {
                param: "init_theta_dot_range".to_string(),
                message: "must be finite and non-negative".to_string(),
            });
        }

        let rng = Xoshiro256StarStar::seed_from_u64(config.seed);
        Ok(Self {
            theta: 0.0,
            theta_dot: 0.0,
            tick: 0,
            episode_reward: 0.0,
            rng,
            config,
        })
    }

    /// Create with default parameters and the given seed.
    pub fn with_seed(seed: u64) -> Result<Self> {
        Self::new(PendulumConfig::default().with_seed(seed))
    }

    /// Reset to a random initial state and return the observation.
    pub fn reset(&mut self) -> [f32; OBS_SIZE] {
        self.theta = random_uniform(
            &mut self.rng,
            -self.config.init_theta_range,
            self.config.init_theta_range,
        );
        self.theta_dot = random_uniform(
            &mut self.rng,
            -self.config.init_theta_dot_range,
            self.config.init_theta_dot_range,
        );
        self.tick = 0;
        self.episode_reward = 0.0;
        self.observation()
    }

    /// Advance one time step with the given torque.
    ///
    /// The torque is clamped to `[-MAX_TORQUE, MAX_TORQUE]`. The reward is
    /// computed from the pre-step state and the clamped torque.
    pub fn step(&mut self, torque: f32) -> PendulumStep {
        let theta = self.theta;
        let theta_dot = self.theta_dot;

        let torque = torque.clamp(-MAX_TORQUE, MAX_TORQUE);

        let g = self.config.gravity;
        let new_theta_dot = theta_dot
            + (3.0 * g / (2.0 * LENGTH) * theta.sin() + 3.0 / (MASS * LENGTH * LENGTH) * torque)
                * DT;
        let new_theta_dot = new_theta_dot.clamp(-MAX_SPEED, MAX_SPEED);
        let new_theta = angle_normalize(theta + new_theta_dot * DT);

        self.theta = new_theta;
        self.theta_dot = new_theta_dot;
        self.tick += 1;

        let cost = theta * theta + 0.1 * theta_dot * theta_dot + 0.001 * torque * torque;
        let reward = -cost;
        self.episode_reward += reward;

        PendulumStep {
            obs: self.observation(),
            reward,
            truncated: self.tick >= self.config.max_steps,
        }
    }

    /// Current observation: [cos(theta), sin(theta), theta_dot].
    pub fn observation(&self) -> [f32; OBS_SIZE] {
        [self.theta.cos(), self.theta.sin(), self.theta_dot]
    }

    /// Accumulated reward of the running episode.
    pub fn episode_reward(&self) -> f32 {
        self.episode_reward
    }

    /// Steps taken in the running episode.
    pub fn tick(&self) -> u32 {
        self.tick
    }

    /// Current pole angle.
    pub fn theta(&self) -> f32 {
        self.theta
    }

    /// Current angular velocity.
    pub fn theta_dot(&self) -> f32 {
        self.theta_dot
    }

    /// Environment configuration.
    pub fn config(&self) -> &PendulumConfig {
        &self.config
    }
}

/// Normalize an angle to `[-pi, pi)`.
#[inline]
fn angle_normalize(theta: f32) -> f32 {
    use std::f32::consts::PI;
    let wrapped = (theta + PI).rem_euclid(2.0 * PI);
    wrapped - PI
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_invalid_config() {
        let result = Pendulum::new(PendulumConfig::default().with_max_steps(0));
        assert!(matches!(result, Err(EnvError::InvalidConfig { .. })));
    }

    #[test]
    fn test_upright_equilibrium_is_free() {
        let mut env = Pendulum::with_seed(0).unwrap();
        env.reset();
        env.theta = 0.0;
        env.theta_dot = 0.0;

        let step = env.step(0.0);
        // At the upright equilibrium with zero torque the cost is zero
        assert!(step.reward.abs() < 1e-6);
    }

    #[test]
    fn test_step_matches_hand_integration() {
        let mut env = Pendulum::with_seed(0).unwrap();
        env.reset();
        env.theta = 0.5;
        env.theta_dot = 0.2;

        let torque = 1.0f32;
        let step = env.step(torque);

        let expected_theta_dot =
            0.2 + (3.0 * GRAVITY / (2.0 * LENGTH) * 0.5f32.sin() + 3.0 * torque) * DT;
        let expected_theta = 0.5 + expected_theta_dot * DT;
        let expected_reward = -(0.5f32 * 0.5 + 0.1 * 0.2 * 0.2 + 0.001 * torque * torque);

        assert!((env.theta_dot() - expected_theta_dot).abs() < 1e-5);
        assert!((env.theta() - expected_theta).abs() < 1e-5);
        assert!((step.reward - expected_reward).abs() < 1e-5);
        assert!(!step.truncated);
    }

    #[test]
    fn test_torque_is_clamped() {
        let mut env = Pendulum::with_seed(0).unwrap();
        env.reset();
        env.theta = 0.0;
        env.theta_dot = 0.0;

        let step_clamped = env.step(100.0);

        let mut env2 = Pendulum::with_seed(0).unwrap();
        env2.reset();
        env2.theta = 0.0;
        env2.theta_dot = 0.0;
        let step_max = env2.step(MAX_TORQUE);

        assert!((env.theta_dot() - env2.theta_dot()).abs() < 1e-6);
        assert!((step_clamped.reward - step_max.reward).abs() < 1e-6);
    }

    #[test]
    fn test_speed_is_clamped() {
        let mut env = Pendulum::with_seed(0).unwrap();
        env.reset();
        env.theta = PI / 2.0;
        env.theta_dot = MAX_SPEED;

        for _ in 0..50 {
            env.step(MAX_TORQUE);
            assert!(env.theta_dot().abs() <= MAX_SPEED + 1e-6);
        }
    }

    #[test]
    fn test_angle_stays_normalized() {
        let mut env = Pendulum::with_seed(3).unwrap();
        env.reset();
        for _ in 0..300 {
            env.step(MAX_TORQUE);
            assert!(env.theta() > -PI - 1e-6 && env.theta() <= PI + 1e-6);
        }
    }

    #[test]
    fn test_truncates_at_step_limit() {
        let mut env = Pendulum::new(PendulumConfig::default().with_max_steps(5)).unwrap();
        env.reset();

        for i in 1..=5 {
            let step = env.step(0.0);
            assert_eq!(step.truncated, i == 5);
        }
    }

    #[test]
    fn test_reset_is_deterministic_per_seed() {
        let mut a = Pendulum::with_seed(7).unwrap();
        let mut b = Pendulum::with_seed(7).unwrap();

        assert_eq!(a.reset(), b.reset());
        assert_eq!(a.reset(), b.reset());

        let mut c = Pendulum::with_seed(8).unwrap();
        assert_ne!(a.reset(), c.reset());
    }

    #[test]
    fn test_reset_ranges() {
        let mut env = Pendulum::with_seed(11).unwrap();
        for _ in 0..50 {
            env.reset();
            assert!(env.theta().abs() <= PI);
            assert!(env.theta_dot().abs() <= 1.0);
        }
    }

    #[test]
    fn test_angle_normalize() {
        assert!((angle_normalize(0.0) - 0.0).abs() < 1e-6);
        assert!((angle_normalize(2.0 * PI) - 0.0).abs() < 1e-5);
        assert!((angle_normalize(3.0 * PI) + PI).abs() < 1e-5);
        assert!((angle_normalize(-0.5) + 0.5).abs() < 1e-6);
    }
}

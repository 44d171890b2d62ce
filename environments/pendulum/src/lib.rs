//! Pendulum swing-up environment.
//!
//! Classic continuous control task: swing up and balance an inverted
//! pendulum with a bounded torque. Continuous 1-D action space, no terminal
//! state (episodes only truncate at the step limit).

mod env;
mod error;
mod rng;

pub use env::{
    Pendulum, PendulumConfig, PendulumStep, DT, GRAVITY, LENGTH, MASS, MAX_SPEED, MAX_STEPS,
    MAX_TORQUE, OBS_SIZE,
};
pub use error::{EnvError, Result};

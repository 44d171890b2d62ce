//! Core building blocks: transitions, replay storage, target networks.

pub mod replay_buffer;
pub mod target_network;
pub mod transition;

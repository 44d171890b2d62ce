//! Transition type stored in the replay buffer.

/// One environment transition for off-policy training.
///
/// Stores the minimal information a SAC update needs. `terminal` marks a
/// true episode end (the bootstrap is cut); a time-limit truncation is kept
/// separately so the value of the final state still propagates.
#[derive(Debug, Clone)]
pub struct Transition {
    /// Current state observation.
    pub state: Vec<f32>,
    /// Continuous action taken.
    pub action: Vec<f32>,
    /// Reward received.
    pub reward: f32,
    /// Next state observation.
    pub next_state: Vec<f32>,
    /// Episode terminated (goal reached, failure, etc.)
    pub terminal: bool,
    /// Episode truncated (time limit).
    pub truncated: bool,
}

impl Transition {
    /// Create a new transition.
    pub fn new(
        state: Vec<f32>,
        action: Vec<f32>,
        reward: f32,
        next_state: Vec<f32>,
        terminal: bool,
        truncated: bool,
    ) -> Self {
        Self {
            state,
            action,
            reward,
            next_state,
            terminal,
            truncated,
        }
    }

    /// Check if the episode ended (terminal or truncated).
    pub fn done(&self) -> bool {
        self.terminal || self.truncated
    }

    /// State dimension.
    pub fn state_dim(&self) -> usize {
        self.state.len()
    }

    /// Action dimension.
    pub fn action_dim(&self) -> usize {
        self.action.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_new() {
        let t = Transition::new(vec![1.0, 2.0, 3.0], vec![0.5], -1.0, vec![2.0, 3.0, 4.0], false, false);
        assert_eq!(t.state_dim(), 3);
        assert_eq!(t.action_dim(), 1);
        assert_eq!(t.reward, -1.0);
        assert!(!t.done());
    }

    #[test]
    fn test_done_flags() {
        let truncated = Transition::new(vec![0.0], vec![0.0], 0.0, vec![0.0], false, true);
        assert!(truncated.done());
        assert!(!truncated.terminal);

        let terminal = Transition::new(vec![0.0], vec![0.0], 0.0, vec![0.0], true, false);
        assert!(terminal.done());
    }
}

//! SAC loss functions.

use burn::prelude::*;

/// TD targets for the critic update.
///
/// `y = r + gamma * (1 - done) * (min_Q_target(s', a') - alpha * log_pi(a'|s'))`
///
/// The inputs should come from the target critic and a fresh policy sample
/// for `s'`; the caller detaches the result so no gradient reaches the
/// target networks.
pub fn sac_td_targets<B: Backend>(
    rewards: Tensor<B, 1>,
    terminals: Tensor<B, 1>,
    min_q_next: Tensor<B, 1>,
    next_log_probs: Tensor<B, 1>,
    gamma: f32,
    alpha: f32,
) -> Tensor<B, 1> {
    // V(s') = min_Q(s', a') - alpha * log_pi(a'|s')
    let v_next = min_q_next - next_log_probs.mul_scalar(alpha);

    // y = r + gamma * (1 - done) * V(s')
    let not_done = terminals.mul_scalar(-1.0).add_scalar(1.0);
    rewards + not_done.mul_scalar(gamma) * v_next
}

/// Critic loss: MSE of both Q-networks against the shared targets.
///
/// `L = E[(Q1(s,a) - y)^2] + E[(Q2(s,a) - y)^2]`
pub fn sac_critic_loss<B: Backend>(
    q1: Tensor<B, 1>,
    q2: Tensor<B, 1>,
    targets: Tensor<B, 1>,
) -> Tensor<B, 1> {
    let q1_loss = (q1 - targets.clone()).powf_scalar(2.0).mean();
    let q2_loss = (q2 - targets).powf_scalar(2.0).mean();
    q1_loss + q2_loss
}

/// Actor loss: maximize `E[min_Q(s, a) - alpha * log_pi(a|s)]`.
///
/// Returned as a minimization objective: `E[alpha * log_pi - min_Q]`.
pub fn sac_actor_loss<B: Backend>(
    min_q: Tensor<B, 1>,
    log_probs: Tensor<B, 1>,
    alpha: f32,
) -> Tensor<B, 1> {
    (log_probs.mul_scalar(alpha) - min_q).mean()
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type B = NdArray<f32>;

    #[test]
    fn test_td_targets() {
        let device = Default::default();

        let rewards: Tensor<B, 1> = Tensor::from_floats([1.0, 1.0], &device);
        let terminals: Tensor<B, 1> = Tensor::from_floats([0.0, 1.0], &device);
        let min_q_next: Tensor<B, 1> = Tensor::from_floats([10.0, 10.0], &device);
        let next_log_probs: Tensor<B, 1> = Tensor::from_floats([-1.0, -1.0], &device);

        let targets = sac_td_targets(rewards, terminals, min_q_next, next_log_probs, 0.99, 0.2);
        let data = targets.into_data();
        let slice = data.as_slice::<f32>().unwrap();

        // Non-terminal: y = 1 + 0.99 * (10 - 0.2*(-1)) = 11.098
        assert!((slice[0] - 11.098).abs() < 0.01);
        // Terminal: y = 1 (no bootstrap)
        assert!((slice[1] - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_critic_loss() {
        let device = Default::default();

        let q1: Tensor<B, 1> = Tensor::from_floats([1.0, 2.0, 3.0], &device);
        let q2: Tensor<B, 1> = Tensor::from_floats([1.1, 2.1, 3.1], &device);
        let targets: Tensor<B, 1> = Tensor::from_floats([1.0, 2.0, 3.0], &device);

        let loss = sac_critic_loss(q1, q2, targets);
        let loss_val = loss.into_data().as_slice::<f32>().unwrap()[0];

        // Q1 matches exactly; Q2 is off by 0.1 everywhere: loss = 0 + 0.01
        assert!((loss_val - 0.01).abs() < 1e-4);
    }

    #[test]
    fn test_critic_loss_zero_on_exact_fit() {
        let device = Default::default();

        let q: Tensor<B, 1> = Tensor::from_floats([5.0, -3.0], &device);
        let loss = sac_critic_loss(q.clone(), q.clone(), q);
        let loss_val = loss.into_data().as_slice::<f32>().unwrap()[0];
        assert!(loss_val.abs() < 1e-6);
    }

    #[test]
    fn test_actor_loss() {
        let device = Default::default();

        let min_q: Tensor<B, 1> = Tensor::from_floats([10.0, 10.0], &device);
        let log_probs: Tensor<B, 1> = Tensor::from_floats([-1.0, -1.0], &device);

        let loss = sac_actor_loss(min_q, log_probs, 0.2);
        let loss_val = loss.into_data().as_slice::<f32>().unwrap()[0];

        // L = mean(0.2*(-1) - 10) = -10.2
        assert!((loss_val - (-10.2)).abs() < 0.01);
    }

    #[test]
    fn test_actor_loss_prefers_high_q() {
        let device = Default::default();

        let log_probs: Tensor<B, 1> = Tensor::from_floats([-1.0], &device);
        let high_q: Tensor<B, 1> = Tensor::from_floats([10.0], &device);
        let low_q: Tensor<B, 1> = Tensor::from_floats([1.0], &device);

        let loss_high = sac_actor_loss(high_q, log_probs.clone(), 0.2);
        let loss_low = sac_actor_loss(low_q, log_probs, 0.2);

        let high = loss_high.into_data().as_slice::<f32>().unwrap()[0];
        let low = loss_low.into_data().as_slice::<f32>().unwrap()[0];
        assert!(high < low);
    }
}

//! Target network updates via Polyak averaging.
//!
//! Bootstrapped value targets become unstable when the same network produces
//! both the prediction and the target. A slow-moving target copy breaks that
//! feedback loop:
//!
//! ```text
//! theta_target = tau * theta_online + (1 - tau) * theta_target
//! ```
//!
//! with small tau (typically 0.005). Parameters are matched by traversal
//! order, which is deterministic for two models of the same architecture.

use burn::module::{Module, ModuleMapper, ParamId};
use burn::prelude::*;
use std::cell::RefCell;

/// A parameter flattened to 1D with its original shape dropped.
///
/// Storing tensors of mixed rank in one collection requires erasing the
/// const-generic dimension; the shape is recovered from the target side.
struct FlatParam<B: Backend> {
    tensor: Tensor<B, 1>,
}

/// Collects all float parameters of a module in traversal order.
struct ParamCollector<B: Backend> {
    params: Vec<FlatParam<B>>,
}

impl<B: Backend> ModuleMapper<B> for ParamCollector<B> {
    fn map_float<const D: usize>(&mut self, _id: ParamId, tensor: Tensor<B, D>) -> Tensor<B, D> {
        let numel: usize = tensor.dims().iter().product();
        self.params.push(FlatParam {
            tensor: tensor.clone().reshape([numel]),
        });
        tensor
    }
}

/// Interpolates target parameters towards the collected online parameters.
struct PolyakMapper<B: Backend> {
    online: Vec<FlatParam<B>>,
    tau: f32,
    index: RefCell<usize>,
}

impl<B: Backend> ModuleMapper<B> for PolyakMapper<B> {
    fn map_float<const D: usize>(&mut self, _id: ParamId, tensor: Tensor<B, D>) -> Tensor<B, D> {
        let shape = tensor.dims();
        let numel: usize = shape.iter().product();

        let idx = *self.index.borrow();
        *self.index.borrow_mut() = idx + 1;

        match self.online.get(idx) {
            Some(online) => {
                let target_flat = tensor.reshape([numel]);
                let mixed = online.tensor.clone().mul_scalar(self.tau)
                    + target_flat.mul_scalar(1.0 - self.tau);
                mixed.reshape(shape)
            }
            // Architectures diverged; leave the parameter untouched.
            None => tensor,
        }
    }
}

/// Soft-update (Polyak-average) the target model towards the online model.
///
/// `theta_target = tau * theta_online + (1 - tau) * theta_target`.
/// `tau = 1.0` degenerates to a hard copy, `tau = 0.0` to a no-op.
pub fn soft_update<B, M>(online: &M, target: M, tau: f32) -> M
where
    B: Backend,
    M: Module<B>,
{
    if (tau - 1.0).abs() < 1e-6 {
        return online.clone();
    }
    if tau.abs() < 1e-6 {
        return target;
    }

    let mut collector = ParamCollector { params: Vec::new() };
    let _ = online.clone().map(&mut collector);

    let mut mapper = PolyakMapper {
        online: collector.params,
        tau,
        index: RefCell::new(0),
    };
    target.map(&mut mapper)
}

/// Hard copy of the online model (tau = 1.0).
pub fn hard_copy<B, M>(online: &M) -> M
where
    B: Backend,
    M: Module<B> + Clone,
{
    online.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;
    use burn::nn::LinearConfig;

    type B = NdArray<f32>;

    fn weights(linear: &burn::nn::Linear<B>) -> Vec<f32> {
        linear
            .weight
            .val()
            .into_data()
            .as_slice::<f32>()
            .unwrap()
            .to_vec()
    }

    #[test]
    fn test_tau_zero_keeps_target() {
        let device = Default::default();
        let online = LinearConfig::new(4, 4).init::<B>(&device);
        let target = LinearConfig::new(4, 4).init::<B>(&device);

        let before = weights(&target);
        let updated = soft_update::<B, _>(&online, target, 0.0);

        for (t, u) in before.iter().zip(weights(&updated).iter()) {
            assert!((t - u).abs() < 1e-6);
        }
    }

    #[test]
    fn test_tau_one_copies_online() {
        let device = Default::default();
        let online = LinearConfig::new(4, 4).init::<B>(&device);
        let target = LinearConfig::new(4, 4).init::<B>(&device);

        let updated = soft_update::<B, _>(&online, target, 1.0);

        for (o, u) in weights(&online).iter().zip(weights(&updated).iter()) {
            assert!((o - u).abs() < 1e-6);
        }
    }

    #[test]
    fn test_interpolation() {
        let device = Default::default();
        let online = LinearConfig::new(4, 4).init::<B>(&device);
        let target = LinearConfig::new(4, 4).init::<B>(&device);

        let online_w = weights(&online);
        let target_w = weights(&target);

        let tau = 0.5f32;
        let updated = soft_update::<B, _>(&online, target, tau);

        for (i, u) in weights(&updated).iter().enumerate() {
            let expected = tau * online_w[i] + (1.0 - tau) * target_w[i];
            assert!((u - expected).abs() < 1e-5, "index {}: {} vs {}", i, u, expected);
        }
    }

    #[test]
    fn test_typical_tau() {
        let device = Default::default();
        let online = LinearConfig::new(8, 4).init::<B>(&device);
        let target = LinearConfig::new(8, 4).init::<B>(&device);

        let online_w = weights(&online);
        let target_w = weights(&target);

        let tau = 0.005f32;
        let updated = soft_update::<B, _>(&online, target, tau);

        for (i, u) in weights(&updated).iter().enumerate() {
            let expected = tau * online_w[i] + (1.0 - tau) * target_w[i];
            assert!((u - expected).abs() < 1e-5);
        }
    }

    #[test]
    fn test_bias_updated_too() {
        let device = Default::default();
        let online = LinearConfig::new(4, 4).with_bias(true).init::<B>(&device);
        let target = LinearConfig::new(4, 4).with_bias(true).init::<B>(&device);

        let online_b: Vec<f32> = online
            .bias
            .as_ref()
            .unwrap()
            .val()
            .into_data()
            .as_slice::<f32>()
            .unwrap()
            .to_vec();
        let target_b: Vec<f32> = target
            .bias
            .as_ref()
            .unwrap()
            .val()
            .into_data()
            .as_slice::<f32>()
            .unwrap()
            .to_vec();

        let tau = 0.3f32;
        let updated = soft_update::<B, _>(&online, target, tau);
        let updated_b = updated.bias.as_ref().unwrap().val().into_data();
        let updated_b = updated_b.as_slice::<f32>().unwrap();

        for i in 0..online_b.len() {
            let expected = tau * online_b[i] + (1.0 - tau) * target_b[i];
            assert!((updated_b[i] - expected).abs() < 1e-5);
        }
    }

    #[test]
    fn test_hard_copy() {
        let device = Default::default();
        let online = LinearConfig::new(4, 4).init::<B>(&device);
        let copy = hard_copy::<B, _>(&online);

        for (o, c) in weights(&online).iter().zip(weights(&copy).iter()) {
            assert!((o - c).abs() < 1e-6);
        }
    }
}

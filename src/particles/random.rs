//! 随机采样工具
//!
//! 发射和湍流共用的均匀分布与高斯分布采样。

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

/// 按可选种子创建随机数生成器
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// `[min, max)` 上的均匀采样
///
/// 区间为空（`min >= max` 或含 NaN）时直接返回 `min`，不消耗随机数。
#[inline]
pub fn uniform<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    if !(min < max) {
        return min;
    }
    rng.gen_range(min..max)
}

/// 零均值高斯采样（Box-Muller）
#[inline]
pub fn normal<R: Rng + ?Sized>(rng: &mut R, std_dev: f32) -> f32 {
    if std_dev == 0.0 {
        return 0.0;
    }
    // u1 落在 (0, 1]，避免 ln(0)
    let u1 = 1.0 - rng.r#gen::<f32>();
    let u2 = rng.r#gen::<f32>();
    (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos() * std_dev
}

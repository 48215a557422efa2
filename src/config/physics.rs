use super::{ConfigError, ConfigResult};
use crate::impl_default;
use serde::{Deserialize, Serialize};

/// 物理参数配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// 每个参考帧的生命衰减量
    pub decay_rate: f32,

    /// 参考帧率（帧缩放 = dt * reference_hz）
    pub reference_hz: f32,

    /// 湍流噪声的高斯标准差
    pub turbulence_std: f32,

    /// 指针吸引/排斥系数
    pub attraction: f32,

    /// 指针射线投影到 XZ 平面的距离
    pub pointer_reach: f32,

    /// 左右方向键产生的风力
    pub wind_step_x: f32,

    /// 上下方向键产生的风力
    pub wind_step_y: f32,
}

impl_default!(PhysicsConfig {
    decay_rate: 0.012,
    reference_hz: 60.0,
    turbulence_std: 0.002,
    attraction: 0.005,
    pointer_reach: 5.0,
    wind_step_x: 0.02,
    wind_step_y: 0.01,
});

impl PhysicsConfig {
    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.decay_rate > 0.0) {
            return Err(ConfigError::ValidationError(
                "decay_rate must be positive".to_string(),
            ));
        }
        if !(self.reference_hz > 0.0) {
            return Err(ConfigError::ValidationError(
                "reference_hz must be positive".to_string(),
            ));
        }
        if !(self.turbulence_std >= 0.0) {
            return Err(ConfigError::ValidationError(
                "turbulence_std must be non-negative".to_string(),
            ));
        }
        Ok(())
    }

    /// 将帧时间换算为参考帧缩放
    pub fn frame_scale(&self, dt: f32) -> f32 {
        dt * self.reference_hz
    }
}

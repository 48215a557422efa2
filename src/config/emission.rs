use super::{check_range, ConfigError, ConfigResult};
use crate::impl_default;
use serde::{Deserialize, Serialize};

/// 发射分布配置
///
/// 粒子在 XZ 平面的圆盘内生成，Y 固定在场景下方。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmissionConfig {
    /// 发射器高度（Y）
    pub emitter_height: f32,

    /// 发射圆盘半径
    pub emitter_radius: f32,

    /// 水平速度的高斯标准差
    pub horizontal_velocity_std: f32,

    /// 上升速度下限
    pub vertical_velocity_min: f32,

    /// 上升速度上限
    pub vertical_velocity_max: f32,

    /// 公告板半尺寸下限
    pub size_min: f32,

    /// 公告板半尺寸上限
    pub size_max: f32,
}

impl_default!(EmissionConfig {
    emitter_height: -1.5,
    emitter_radius: 0.3,
    horizontal_velocity_std: 0.02,
    vertical_velocity_min: 0.15,
    vertical_velocity_max: 0.35,
    size_min: 0.4,
    size_max: 0.8,
});

impl EmissionConfig {
    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.emitter_radius >= 0.0) {
            return Err(ConfigError::ValidationError(
                "emitter_radius must be non-negative".to_string(),
            ));
        }
        if !(self.horizontal_velocity_std >= 0.0) {
            return Err(ConfigError::ValidationError(
                "horizontal_velocity_std must be non-negative".to_string(),
            ));
        }
        check_range(
            "vertical_velocity",
            self.vertical_velocity_min,
            self.vertical_velocity_max,
        )?;
        check_range("size", self.size_min, self.size_max)?;
        Ok(())
    }
}

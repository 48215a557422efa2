use super::{ConfigError, ConfigResult};
use crate::impl_default;
use serde::{Deserialize, Serialize};

/// 软粒子纹理边长上限
pub const MAX_TEXTURE_SIZE: u32 = 4096;

/// 渲染参数配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// 软粒子纹理边长（像素）
    pub texture_size: u32,

    /// 高斯衰减系数
    pub texture_falloff: f32,

    /// 尺寸随生命收缩的指数
    pub size_exponent: f32,

    /// 参考网格的半边长（格数）
    pub grid_half_extent: u32,

    /// 参考网格所在高度
    pub grid_height: f32,
}

impl_default!(RenderConfig {
    texture_size: 64,
    texture_falloff: 3.0,
    size_exponent: 0.7,
    grid_half_extent: 10,
    grid_height: -2.0,
});

impl RenderConfig {
    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        if self.texture_size == 0 || self.texture_size > MAX_TEXTURE_SIZE {
            return Err(ConfigError::ValidationError(format!(
                "texture_size must be in 1..={}, got {}",
                MAX_TEXTURE_SIZE, self.texture_size
            )));
        }
        if !(self.texture_falloff >= 0.0) {
            return Err(ConfigError::ValidationError(
                "texture_falloff must be non-negative".to_string(),
            ));
        }
        Ok(())
    }
}

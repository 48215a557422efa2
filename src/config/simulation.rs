use super::{ConfigError, ConfigResult};
use crate::impl_default;
use serde::{Deserialize, Serialize};

/// 容量与发射速率控制配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// 启动时的粒子槽位数
    pub initial_capacity: usize,

    /// 每次增减负载的步长
    pub capacity_step: usize,

    /// 缩减负载时的下限
    pub min_capacity: usize,

    /// 初始发射速率（粒子/秒）
    pub emission_rate: u32,

    /// 发射速率调整步长
    pub emission_rate_step: u32,

    /// 发射速率下限
    pub min_emission_rate: u32,

    /// 发射速率上限
    pub max_emission_rate: u32,

    /// 扩容后立即填满新增的空槽位
    pub eager_fill_on_grow: bool,

    /// 目标帧率
    pub target_fps: u32,
}

impl_default!(SimulationConfig {
    initial_capacity: 1000,
    capacity_step: 500,
    min_capacity: 500,
    emission_rate: 30,
    emission_rate_step: 5,
    min_emission_rate: 1,
    max_emission_rate: 5000,
    eager_fill_on_grow: false,
    target_fps: 60,
});

impl SimulationConfig {
    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        if self.capacity_step == 0 {
            return Err(ConfigError::ValidationError(
                "capacity_step must be positive".to_string(),
            ));
        }
        if self.min_emission_rate > self.max_emission_rate {
            return Err(ConfigError::ValidationError(format!(
                "min_emission_rate {} exceeds max_emission_rate {}",
                self.min_emission_rate, self.max_emission_rate
            )));
        }
        if self.target_fps == 0 || self.target_fps > 1000 {
            return Err(ConfigError::ValidationError(
                "Invalid target FPS".to_string(),
            ));
        }
        Ok(())
    }

    /// 将发射速率限制在配置范围内
    pub fn clamp_emission_rate(&self, rate: u32) -> u32 {
        rate.clamp(self.min_emission_rate, self.max_emission_rate)
    }
}

//! 会话控制
//!
//! 把离散的 [`ControlCommand`] 应用到粒子系统和会话状态上：
//! 负载增减、发射速率、暂停与网格开关。交互模式由 `InputState` 自己维护。

use crate::config::SimulationConfig;
use crate::particles::ParticleSystem;
use crate::platform::input::ControlCommand;

/// 命令处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFlow {
    Continue,
    Quit,
}

/// 会话级可变状态
#[derive(Debug, Clone)]
pub struct SessionControls {
    config: SimulationConfig,
    emission_rate: u32,
    paused: bool,
    show_grid: bool,
}

impl SessionControls {
    pub fn new(config: SimulationConfig) -> Self {
        let emission_rate = config.clamp_emission_rate(config.emission_rate);
        Self {
            config,
            emission_rate,
            paused: false,
            show_grid: true,
        }
    }

    pub fn emission_rate(&self) -> u32 {
        self.emission_rate
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn show_grid(&self) -> bool {
        self.show_grid
    }

    /// 缩减后的容量，不低于 `min_capacity`
    pub fn shrunk_capacity(&self, capacity: usize) -> usize {
        capacity
            .saturating_sub(self.config.capacity_step)
            .max(self.config.min_capacity)
    }

    /// 扩充后的容量
    pub fn grown_capacity(&self, capacity: usize) -> usize {
        capacity.saturating_add(self.config.capacity_step)
    }

    /// 应用一条命令
    pub fn apply(&mut self, command: ControlCommand, system: &mut ParticleSystem) -> ControlFlow {
        match command {
            ControlCommand::ShrinkLoad => {
                system.resize(self.shrunk_capacity(system.capacity()));
            }
            ControlCommand::GrowLoad => {
                system.resize(self.grown_capacity(system.capacity()));
            }
            ControlCommand::TogglePause => {
                self.paused = !self.paused;
                tracing::info!(target: "engine", "Paused: {}", self.paused);
            }
            ControlCommand::ToggleGrid => {
                self.show_grid = !self.show_grid;
                tracing::debug!(target: "engine", "Grid visible: {}", self.show_grid);
            }
            ControlCommand::DecreaseEmission => {
                self.set_emission_rate(
                    self.emission_rate
                        .saturating_sub(self.config.emission_rate_step),
                );
            }
            ControlCommand::IncreaseEmission => {
                self.set_emission_rate(
                    self.emission_rate
                        .saturating_add(self.config.emission_rate_step),
                );
            }
            // 模式切换已由输入状态处理
            ControlCommand::ToggleInteractionMode => {}
            ControlCommand::Quit => return ControlFlow::Quit,
        }
        ControlFlow::Continue
    }

    fn set_emission_rate(&mut self, rate: u32) {
        self.emission_rate = self.config.clamp_emission_rate(rate);
        tracing::info!(target: "engine", "Emission rate: {}/s", self.emission_rate);
    }
}

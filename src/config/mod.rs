//! 统一配置系统
//!
//! 提供TOML/JSON配置文件、环境变量和运行时校验

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub mod emission;
pub mod performance;
pub mod physics;
pub mod render;
pub mod simulation;

pub use emission::EmissionConfig;
pub use performance::PerformanceConfig;
pub use physics::PhysicsConfig;
pub use render::RenderConfig;
pub use simulation::SimulationConfig;

/// 引擎配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 文件读取错误
    #[error("Config file error: {0}")]
    FileError(#[from] std::io::Error),
    /// 解析错误
    #[error("Config parse error: {0}")]
    ParseError(String),
    /// 验证错误
    #[error("Config validation error: {0}")]
    ValidationError(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// 引擎主配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// 容量与发射速率控制
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// 发射分布
    #[serde(default)]
    pub emission: EmissionConfig,

    /// 物理参数
    #[serde(default)]
    pub physics: PhysicsConfig,

    /// 渲染参数
    #[serde(default)]
    pub render: RenderConfig,

    /// 性能配置
    #[serde(default)]
    pub performance: PerformanceConfig,

    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl EngineConfig {
    /// 创建默认配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 从TOML文件加载配置
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(ConfigError::FileError)?;
        Self::from_toml_str(&content)
    }

    /// 从TOML字符串解析配置
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// 从JSON文件加载配置
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(ConfigError::FileError)?;
        Self::from_json_str(&content)
    }

    /// 从JSON字符串解析配置
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        serde_json::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// 保存为TOML文件
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> ConfigResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        fs::write(path, content).map_err(ConfigError::FileError)
    }

    /// 保存为JSON文件
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> ConfigResult<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        fs::write(path, content).map_err(ConfigError::FileError)
    }

    /// 从环境变量覆盖配置
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = env::var("FIRE_SIM_CAPACITY") {
            if let Ok(capacity) = val.parse() {
                self.simulation.initial_capacity = capacity;
            }
        }
        if let Ok(val) = env::var("FIRE_SIM_EMISSION_RATE") {
            if let Ok(rate) = val.parse() {
                self.simulation.emission_rate = rate;
            }
        }
        if let Ok(val) = env::var("FIRE_SIM_WORKER_CHUNKS") {
            if let Ok(chunks) = val.parse() {
                self.performance.worker_chunks = chunks;
            }
        }
        if let Ok(val) = env::var("FIRE_SIM_SEED") {
            if let Ok(seed) = val.parse() {
                self.performance.seed = Some(seed);
            }
        }
    }

    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        self.simulation.validate()?;
        self.emission.validate()?;
        self.physics.validate()?;
        self.render.validate()?;
        Ok(())
    }

    /// 自动查找并加载当前目录下的配置文件
    ///
    /// 按以下顺序查找：
    /// 1. ./fire_sim.toml
    /// 2. ./fire_sim.json
    /// 3. 使用默认配置
    ///
    /// 不输出日志：调用方在日志系统就绪后再调用 [`ConfigSource::log`]。
    pub fn load_or_default() -> (Self, ConfigSource) {
        Self::load_or_default_in(Path::new("."))
    }

    /// 在指定目录下查找配置文件
    pub fn load_or_default_in(dir: &Path) -> (Self, ConfigSource) {
        let toml_path = dir.join(CONFIG_FILE_TOML);
        if let Ok(config) = Self::from_toml_file(&toml_path) {
            return (config, ConfigSource::File(toml_path));
        }

        let json_path = dir.join(CONFIG_FILE_JSON);
        if let Ok(config) = Self::from_json_file(&json_path) {
            return (config, ConfigSource::File(json_path));
        }

        (Self::default(), ConfigSource::Default)
    }
}

/// TOML 配置文件名
pub const CONFIG_FILE_TOML: &str = "fire_sim.toml";
/// JSON 配置文件名
pub const CONFIG_FILE_JSON: &str = "fire_sim.json";

/// 配置来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// 从文件加载
    File(PathBuf),
    /// 未找到配置文件
    Default,
}

impl ConfigSource {
    /// 记录配置来源
    pub fn log(&self) {
        match self {
            ConfigSource::File(path) => {
                tracing::info!(target: "config", "Loaded config from {}", path.display());
            }
            ConfigSource::Default => {
                tracing::info!(target: "config", "Using default configuration");
            }
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别（`RUST_LOG` 优先）
    pub level: LogLevel,

    /// 是否输出到控制台
    pub log_to_console: bool,
}

use crate::impl_default;

impl_default!(LoggingConfig {
    level: LogLevel::Info,
    log_to_console: true,
});

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    /// 跟踪
    Trace,
    /// 调试
    Debug,
    /// 信息
    Info,
    /// 警告
    Warn,
    /// 错误
    Error,
}

impl LogLevel {
    /// 转换为 `EnvFilter` 指令
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// 检查区间 `min <= max`，供各子配置复用
pub(crate) fn check_range(name: &str, min: f32, max: f32) -> ConfigResult<()> {
    if !(min <= max) {
        return Err(ConfigError::ValidationError(format!(
            "{} range is empty: min {} > max {}",
            name, min, max
        )));
    }
    Ok(())
}

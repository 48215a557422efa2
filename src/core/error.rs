//! 统一错误处理模块
//!
//! 粒子模拟核心（存储、发射、物理、批次构建）本身不会失败，
//! 只有配置加载和引擎运行循环需要返回错误。

use crate::config::ConfigError;
use thiserror::Error;

/// 引擎核心错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("General error: {0}")]
    General(String),
}

pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_converts() {
        let err: EngineError = ConfigError::ValidationError("bad capacity".to_string()).into();
        assert!(matches!(err, EngineError::Config(_)));
        assert_eq!(
            err.to_string(),
            "Configuration error: Config validation error: bad capacity"
        );
    }

    #[test]
    fn test_general_error_message() {
        let err = EngineError::General("FIRE_SIM_FRAMES is not a frame count".to_string());
        assert_eq!(
            err.to_string(),
            "General error: FIRE_SIM_FRAMES is not a frame count"
        );
    }
}

//! 核心模块
//!
//! 包含引擎的核心功能：
//! - `engine` - 主引擎入口和无窗口会话循环
//! - `controls` - 负载、发射速率、暂停等会话控制
//! - `error` - 错误类型定义

pub mod controls;
pub mod engine;
pub mod error;
#[macro_use]
pub mod macros;

// 重新导出错误类型
pub use error::{EngineError, EngineResult};

// 重新导出主要类型
pub use controls::{ControlFlow, SessionControls};
pub use engine::{Engine, SessionReport};

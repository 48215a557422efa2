use crate::impl_default;
use serde::{Deserialize, Serialize};

/// 性能配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceConfig {
    /// 物理更新的分块数（0表示按逻辑CPU数）
    pub worker_chunks: usize,

    /// 槽位数低于该值时单线程更新
    pub parallel_threshold: usize,

    /// 随机种子（None 表示使用系统熵）
    pub seed: Option<u64>,
}

impl_default!(PerformanceConfig {
    worker_chunks: 4,
    parallel_threshold: 4096,
    seed: None,
});

impl PerformanceConfig {
    /// 实际使用的分块数
    pub fn resolved_chunks(&self) -> usize {
        if self.worker_chunks == 0 {
            num_cpus::get().max(1)
        } else {
            self.worker_chunks
        }
    }

    /// 根据当前容量决定本帧的分块数
    pub fn chunks_for(&self, capacity: usize) -> usize {
        if capacity < self.parallel_threshold {
            1
        } else {
            self.resolved_chunks()
        }
    }
}

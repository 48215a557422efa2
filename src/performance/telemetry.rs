//! 帧遥测
//!
//! 滑动窗口帧时间采样、CPU/GPU 分段耗时，以及定时刷新的标题文本。

use crate::platform::input::InteractionMode;
use std::collections::VecDeque;
use std::time::Duration;

/// 标题刷新间隔
pub const CAPTION_INTERVAL: Duration = Duration::from_millis(500);

/// 默认采样窗口
pub const DEFAULT_SAMPLE_WINDOW: usize = 60;

/// 帧时间采样器
#[derive(Debug, Clone)]
pub struct FrameTimeSampler {
    /// 采样缓冲区
    samples: VecDeque<Duration>,
    /// 最大样本数
    max_samples: usize,
}

impl FrameTimeSampler {
    pub fn new(max_samples: usize) -> Self {
        let max_samples = max_samples.max(1);
        Self {
            samples: VecDeque::with_capacity(max_samples),
            max_samples,
        }
    }

    /// 记录一帧
    pub fn push(&mut self, frame_time: Duration) {
        if self.samples.len() >= self.max_samples {
            self.samples.pop_front();
        }
        self.samples.push_back(frame_time);
    }

    /// 平均帧时间
    pub fn average_frame_time(&self) -> Duration {
        if self.samples.is_empty() {
            return Duration::ZERO;
        }

        let total: Duration = self.samples.iter().sum();
        Duration::from_nanos(total.as_nanos() as u64 / self.samples.len() as u64)
    }

    /// 获取 FPS
    pub fn fps(&self) -> f32 {
        let avg = self.average_frame_time();
        if avg.as_secs_f32() == 0.0 {
            0.0
        } else {
            1.0 / avg.as_secs_f32()
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// 标题栏需要的会话状态
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptionState {
    pub capacity: usize,
    pub emission_rate: u32,
    pub mode: InteractionMode,
    pub paused: bool,
}

/// 每帧遥测
#[derive(Debug, Clone)]
pub struct FrameTelemetry {
    sampler: FrameTimeSampler,
    caption_timer: Duration,
    cpu_time: Duration,
    gpu_time: Duration,
}

impl Default for FrameTelemetry {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTelemetry {
    pub fn new() -> Self {
        Self {
            sampler: FrameTimeSampler::new(DEFAULT_SAMPLE_WINDOW),
            caption_timer: Duration::ZERO,
            cpu_time: Duration::ZERO,
            gpu_time: Duration::ZERO,
        }
    }

    /// 记录一帧并推进标题计时器
    ///
    /// 计时器达到 [`CAPTION_INTERVAL`] 时归零并返回 `true`。
    pub fn record_frame(&mut self, frame_time: Duration) -> bool {
        self.sampler.push(frame_time);
        self.caption_timer += frame_time;
        if self.caption_timer >= CAPTION_INTERVAL {
            self.caption_timer = Duration::ZERO;
            true
        } else {
            false
        }
    }

    /// 模拟（CPU）耗时；暂停时不更新，保留上一次的值
    pub fn record_cpu(&mut self, elapsed: Duration) {
        self.cpu_time = elapsed;
    }

    /// 批次准备（GPU 提交）耗时
    pub fn record_gpu(&mut self, elapsed: Duration) {
        self.gpu_time = elapsed;
    }

    pub fn fps(&self) -> f32 {
        self.sampler.fps()
    }

    pub fn cpu_ms(&self) -> f32 {
        self.cpu_time.as_secs_f32() * 1000.0
    }

    pub fn gpu_ms(&self) -> f32 {
        self.gpu_time.as_secs_f32() * 1000.0
    }

    /// 标题文本
    pub fn caption(&self, state: &CaptionState) -> String {
        format!(
            "Fire Simulation | FPS: {:.1} | Particles: {} | Emit: {}/s | Mode: {} | Paused: {} | CPU: {:.2}ms | GPU: {:.2}ms",
            self.fps(),
            state.capacity,
            state.emission_rate,
            state.mode.label(),
            state.paused,
            self.cpu_ms(),
            self.gpu_ms()
        )
    }
}

//! 引擎主入口
//!
//! 无窗口的固定 60Hz 会话：按脚本注入输入事件，驱动粒子系统、批次构建和遥测。
//! 绘制提交由外部渲染器负责，这里只记录每帧批次大小。

use crate::config::{EngineConfig, LoggingConfig};
use crate::particles::ParticleSystem;
use crate::performance::{CaptionState, FrameTelemetry};
use crate::platform::{InputEvent, InputState, KeyCode, MouseButton};
use crate::render::{CameraBasis, GridLines, SoftParticleTexture};
use glam::Vec2;
use std::env;
use std::time::{Duration, Instant};

use super::controls::{ControlFlow, SessionControls};
use super::error::{EngineError, EngineResult};

/// 默认帧数（10 秒）
pub const DEFAULT_FRAMES: u32 = 600;

/// 默认视口
pub const DEFAULT_VIEWPORT: (u32, u32) = (800, 600);

/// 初始相机俯仰角（度）
pub const INITIAL_PITCH_DEG: f32 = 20.0;

/// 演示会话的输入脚本：`(帧号, 事件)`
const DEMO_SCRIPT: &[(u32, InputEvent)] = &[
    (60, InputEvent::KeyPressed { key: KeyCode::X }),
    (90, InputEvent::KeyPressed { key: KeyCode::V }),
    (90, InputEvent::KeyPressed { key: KeyCode::V }),
    (120, InputEvent::MouseMoved { x: 600.0, y: 300.0 }),
    (120, InputEvent::MouseButtonPressed { button: MouseButton::Right, x: 600.0, y: 300.0 }),
    (180, InputEvent::KeyPressed { key: KeyCode::Space }),
    (240, InputEvent::MouseButtonReleased { button: MouseButton::Right, x: 600.0, y: 300.0 }),
    (240, InputEvent::KeyPressed { key: KeyCode::Space }),
    (270, InputEvent::KeyPressed { key: KeyCode::Right }),
    (270, InputEvent::KeyPressed { key: KeyCode::Up }),
    (330, InputEvent::KeyReleased { key: KeyCode::Right }),
    (330, InputEvent::KeyReleased { key: KeyCode::Up }),
    (360, InputEvent::MouseButtonPressed { button: MouseButton::Left, x: 400.0, y: 300.0 }),
    (370, InputEvent::MouseMoved { x: 460.0, y: 280.0 }),
    (380, InputEvent::MouseButtonReleased { button: MouseButton::Left, x: 460.0, y: 280.0 }),
    (400, InputEvent::KeyPressed { key: KeyCode::P }),
    (430, InputEvent::KeyPressed { key: KeyCode::P }),
    (450, InputEvent::KeyPressed { key: KeyCode::G }),
    (480, InputEvent::KeyPressed { key: KeyCode::Z }),
    (510, InputEvent::KeyPressed { key: KeyCode::C }),
];

/// 会话结束时的汇总
#[derive(Debug, Clone, PartialEq)]
pub struct SessionReport {
    /// 实际运行的帧数
    pub frames: u32,
    /// 调用 `tick` 的帧数（不含暂停帧）
    pub ticks: u32,
    pub final_capacity: usize,
    pub live_count: usize,
    pub total_emitted: u64,
    pub emission_rate: u32,
    /// 最后一帧批次的顶点数
    pub last_vertex_count: usize,
    /// 最后一帧提交的网格顶点数（隐藏时为 0）
    pub last_grid_vertex_count: usize,
    pub paused: bool,
}

/// 引擎主结构
///
/// # 示例
///
/// ```no_run
/// use fire_sim::core::Engine;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     Engine::run()?;
///     Ok(())
/// }
/// ```
///
/// # 生命周期
///
/// 1. **初始化阶段**：加载并校验配置、初始化日志、生成纹理
/// 2. **运行阶段**：固定步长推进脚本会话
/// 3. **关闭阶段**：输出汇总
pub struct Engine;

impl Engine {
    /// 运行引擎主循环
    pub fn run() -> EngineResult<()> {
        let (mut config, source) = EngineConfig::load_or_default();
        config.apply_env_overrides();

        Self::initialize_logging(&config.logging);
        source.log();
        config.validate()?;

        let frames = Self::frame_budget()?;
        let report = Self::run_session(&config, frames, DEMO_SCRIPT)?;

        tracing::info!(
            target: "engine",
            "Session finished: {} frames, {} ticks, {} live / {} slots, {} emitted",
            report.frames,
            report.ticks,
            report.live_count,
            report.final_capacity,
            report.total_emitted
        );
        tracing::info!(target: "engine", "Engine shutting down");
        Ok(())
    }

    /// 初始化日志系统
    ///
    /// `RUST_LOG` 优先，否则使用配置中的级别。
    fn initialize_logging(config: &LoggingConfig) {
        if !config.log_to_console {
            return;
        }
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.level.as_filter()));
        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
        tracing::info!(target: "engine", "Engine starting");
    }

    /// 读取 `FIRE_SIM_FRAMES`
    fn frame_budget() -> EngineResult<u32> {
        match env::var("FIRE_SIM_FRAMES") {
            Ok(val) => val.trim().parse().map_err(|_| {
                EngineError::General(format!("FIRE_SIM_FRAMES is not a frame count: {:?}", val))
            }),
            Err(_) => Ok(DEFAULT_FRAMES),
        }
    }

    /// 以内置演示脚本运行 `frames` 帧
    pub fn run_headless(config: &EngineConfig, frames: u32) -> EngineResult<SessionReport> {
        Self::run_session(config, frames, DEMO_SCRIPT)
    }

    /// 运行一段会话
    ///
    /// `script` 按帧号升序排列；同一帧的事件按顺序处理，先于该帧的模拟。
    pub fn run_session(
        config: &EngineConfig,
        frames: u32,
        script: &[(u32, InputEvent)],
    ) -> EngineResult<SessionReport> {
        config.validate()?;

        let dt = 1.0 / config.simulation.target_fps as f32;
        let frame_time = Duration::from_secs_f32(dt);

        let mut system = ParticleSystem::from_config(config);
        let mut controls = SessionControls::new(config.simulation.clone());
        let mut input = InputState::new(DEFAULT_VIEWPORT);
        input.orbit = Vec2::new(INITIAL_PITCH_DEG, 0.0);
        let mut telemetry = FrameTelemetry::new();

        let texture = SoftParticleTexture::from_config(&config.render);
        tracing::debug!(
            target: "engine",
            "Soft particle texture ready: {} bytes",
            texture.as_bytes().len()
        );

        let grid = GridLines::from_config(&config.render);

        let mut events = script.iter().peekable();
        let mut ticks = 0;
        let mut frames_run = 0;
        let mut last_vertex_count = 0;
        let mut last_grid_vertex_count = 0;

        'frames: for frame in 0..frames {
            while let Some((_, event)) = events.next_if(|(at, _)| *at <= frame) {
                if let Some(command) = input.handle_event(event) {
                    if controls.apply(command, &mut system) == ControlFlow::Quit {
                        tracing::info!(target: "engine", "Quit requested at frame {}", frame);
                        break 'frames;
                    }
                }
            }

            if !controls.paused() {
                let cpu_start = Instant::now();
                system.tick(
                    dt,
                    input.wind(&config.physics),
                    input.pointer_snapshot(&config.physics),
                    controls.emission_rate(),
                );
                telemetry.record_cpu(cpu_start.elapsed());
                ticks += 1;
            }

            let gpu_start = Instant::now();
            last_grid_vertex_count = if controls.show_grid() {
                grid.vertex_count()
            } else {
                0
            };
            let camera = CameraBasis::from_orbit(input.orbit.x, input.orbit.y);
            last_vertex_count = system.build_batch(camera).vertex_count();
            telemetry.record_gpu(gpu_start.elapsed());

            frames_run += 1;
            if telemetry.record_frame(frame_time) {
                let caption = telemetry.caption(&CaptionState {
                    capacity: system.capacity(),
                    emission_rate: controls.emission_rate(),
                    mode: input.mode,
                    paused: controls.paused(),
                });
                tracing::info!(target: "engine", "{}", caption);
            }
        }

        let stats = system.stats();
        Ok(SessionReport {
            frames: frames_run,
            ticks,
            final_capacity: system.capacity(),
            live_count: system.live_count(),
            total_emitted: stats.total_emitted,
            emission_rate: controls.emission_rate(),
            last_vertex_count,
            last_grid_vertex_count,
            paused: controls.paused(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_config() -> EngineConfig {
        let mut config = EngineConfig::default();
        config.performance.seed = Some(42);
        config
    }

    #[test]
    fn test_demo_script_is_sorted() {
        assert!(DEMO_SCRIPT.windows(2).all(|w| w[0].0 <= w[1].0));
    }

    #[test]
    fn test_headless_demo_session() {
        let report = Engine::run_headless(&seeded_config(), DEFAULT_FRAMES).unwrap();

        assert_eq!(report.frames, 600);
        // 暂停 30 帧
        assert_eq!(report.ticks, 570);
        // +500 后 -500
        assert_eq!(report.final_capacity, 1000);
        // 30 + 5 + 5 - 5
        assert_eq!(report.emission_rate, 35);
        assert!(!report.paused);
        assert_eq!(report.last_vertex_count, report.live_count * 4);
        // 第 450 帧隐藏了网格
        assert_eq!(report.last_grid_vertex_count, 0);
        assert!(report.live_count <= report.final_capacity);
    }

    #[test]
    fn test_quit_stops_session() {
        let script = [(10, InputEvent::KeyPressed { key: KeyCode::Escape })];
        let report = Engine::run_session(&seeded_config(), 100, &script).unwrap();
        assert_eq!(report.frames, 10);
        assert_eq!(report.ticks, 10);
    }

    #[test]
    fn test_grid_submitted_until_toggled() {
        let report = Engine::run_session(&seeded_config(), 5, &[]).unwrap();
        assert_eq!(report.last_grid_vertex_count, 84);

        let script = [
            (2, InputEvent::KeyPressed { key: KeyCode::G }),
            (4, InputEvent::KeyPressed { key: KeyCode::G }),
        ];
        let report = Engine::run_session(&seeded_config(), 4, &script).unwrap();
        assert_eq!(report.last_grid_vertex_count, 0);
        let report = Engine::run_session(&seeded_config(), 5, &script).unwrap();
        assert_eq!(report.last_grid_vertex_count, 84);
    }

    #[test]
    fn test_paused_session_does_not_tick() {
        let script = [(0, InputEvent::KeyPressed { key: KeyCode::P })];
        let report = Engine::run_session(&seeded_config(), 30, &script).unwrap();
        assert_eq!(report.ticks, 0);
        assert_eq!(report.live_count, 0);
        assert!(report.paused);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = seeded_config();
        config.simulation.capacity_step = 0;
        let err = Engine::run_session(&config, 1, &[]).unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }
}

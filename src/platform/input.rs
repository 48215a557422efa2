//! 输入状态到每帧快照的映射
//!
//! 风力和指针交互不再是进程级可变全局量，而是每帧由 `InputState`
//! 生成只读快照，再整体交给 `ParticleSystem::tick`。

use super::{InputEvent, KeyCode, MouseButton};
use crate::config::PhysicsConfig;
use glam::{Vec2, Vec3};

/// 指针交互模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    /// 吸引（跟随指针）
    #[default]
    Attract,
    /// 排斥（吹散）
    Repel,
}

impl InteractionMode {
    /// 切换模式
    pub fn toggled(self) -> Self {
        match self {
            InteractionMode::Attract => InteractionMode::Repel,
            InteractionMode::Repel => InteractionMode::Attract,
        }
    }

    /// 标题栏显示用名称
    pub fn label(&self) -> &'static str {
        match self {
            InteractionMode::Attract => "ATTRACT",
            InteractionMode::Repel => "REPEL",
        }
    }
}

/// 单帧指针交互快照
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerSnapshot {
    /// 是否正在交互
    pub active: bool,
    /// 吸引或排斥
    pub mode: InteractionMode,
    /// XZ 平面上的目标点（x 存 X，y 存 Z）
    pub target_xz: Vec2,
}

impl PointerSnapshot {
    /// 无交互
    pub fn inactive() -> Self {
        Self::default()
    }
}

/// 左键拖拽时每像素的相机旋转角度（度）
pub const ORBIT_DEGREES_PER_PIXEL: f32 = 0.5;

/// 屏幕坐标到归一化设备坐标的射线 `(ndc_x, ndc_y, 1)`
pub fn pointer_ray(cursor: Vec2, viewport: (u32, u32)) -> Vec3 {
    let width = viewport.0.max(1) as f32;
    let height = viewport.1.max(1) as f32;
    Vec3::new(
        2.0 * cursor.x / width - 1.0,
        1.0 - 2.0 * cursor.y / height,
        1.0,
    )
}

/// 射线投影到 XZ 平面的目标点
pub fn ray_target_xz(ray: Vec3, reach: f32) -> Vec2 {
    Vec2::new(ray.x * reach, ray.z * reach)
}

/// 按键触发的离散控制命令
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCommand {
    /// 切换吸引/排斥
    ToggleInteractionMode,
    /// 降低负载（减少槽位）
    ShrinkLoad,
    /// 提高负载（增加槽位）
    GrowLoad,
    /// 暂停/继续
    TogglePause,
    /// 显示/隐藏参考网格
    ToggleGrid,
    /// 降低发射速率
    DecreaseEmission,
    /// 提高发射速率
    IncreaseEmission,
    /// 退出
    Quit,
}

impl ControlCommand {
    /// 按键映射
    pub fn from_key(key: KeyCode) -> Option<Self> {
        match key {
            KeyCode::Space => Some(Self::ToggleInteractionMode),
            KeyCode::Z => Some(Self::ShrinkLoad),
            KeyCode::X => Some(Self::GrowLoad),
            KeyCode::P => Some(Self::TogglePause),
            KeyCode::G => Some(Self::ToggleGrid),
            KeyCode::C => Some(Self::DecreaseEmission),
            KeyCode::V => Some(Self::IncreaseEmission),
            KeyCode::Escape => Some(Self::Quit),
            _ => None,
        }
    }
}

/// 累积的输入状态
#[derive(Debug, Clone)]
pub struct InputState {
    /// 当前光标位置（像素）
    pub cursor: Vec2,
    /// 视口尺寸
    pub viewport: (u32, u32),
    /// 交互模式
    pub mode: InteractionMode,
    /// 相机环绕角度（度）：x 为俯仰，y 为偏航
    pub orbit: Vec2,
    /// 右键按住时交互生效
    pointer_held: bool,
    dragging: bool,
    left: bool,
    right: bool,
    up: bool,
    down: bool,
}

impl InputState {
    pub fn new(viewport: (u32, u32)) -> Self {
        Self {
            cursor: Vec2::ZERO,
            viewport,
            mode: InteractionMode::default(),
            orbit: Vec2::ZERO,
            pointer_held: false,
            dragging: false,
            left: false,
            right: false,
            up: false,
            down: false,
        }
    }

    /// 处理一个输入事件，返回触发的控制命令
    pub fn handle_event(&mut self, event: &InputEvent) -> Option<ControlCommand> {
        match *event {
            InputEvent::KeyPressed { key } => {
                self.set_arrow(key, true);
                let command = ControlCommand::from_key(key);
                if command == Some(ControlCommand::ToggleInteractionMode) {
                    self.mode = self.mode.toggled();
                    tracing::info!(target: "input", "Interaction mode: {}", self.mode.label());
                }
                command
            }
            InputEvent::KeyReleased { key } => {
                self.set_arrow(key, false);
                None
            }
            InputEvent::MouseMoved { x, y } => {
                let cursor = Vec2::new(x, y);
                if self.dragging {
                    let delta = cursor - self.cursor;
                    self.orbit.x += delta.y * ORBIT_DEGREES_PER_PIXEL;
                    self.orbit.y += delta.x * ORBIT_DEGREES_PER_PIXEL;
                }
                self.cursor = cursor;
                None
            }
            InputEvent::MouseButtonPressed { button, x, y } => {
                self.cursor = Vec2::new(x, y);
                match button {
                    MouseButton::Left => self.dragging = true,
                    MouseButton::Right => self.pointer_held = true,
                    _ => {}
                }
                None
            }
            InputEvent::MouseButtonReleased { button, x, y } => {
                self.cursor = Vec2::new(x, y);
                match button {
                    MouseButton::Left => self.dragging = false,
                    MouseButton::Right => self.pointer_held = false,
                    _ => {}
                }
                None
            }
            InputEvent::WindowResized { width, height } => {
                self.viewport = (width, height);
                None
            }
            InputEvent::WindowCloseRequested => Some(ControlCommand::Quit),
        }
    }

    fn set_arrow(&mut self, key: KeyCode, pressed: bool) {
        match key {
            KeyCode::Left => self.left = pressed,
            KeyCode::Right => self.right = pressed,
            KeyCode::Up => self.up = pressed,
            KeyCode::Down => self.down = pressed,
            _ => {}
        }
    }

    /// 由方向键计算本帧风力
    pub fn wind(&self, physics: &PhysicsConfig) -> Vec3 {
        let axis = |positive: bool, negative: bool| positive as i32 as f32 - negative as i32 as f32;
        Vec3::new(
            axis(self.right, self.left) * physics.wind_step_x,
            axis(self.up, self.down) * physics.wind_step_y,
            0.0,
        )
    }

    /// 生成本帧指针快照
    pub fn pointer_snapshot(&self, physics: &PhysicsConfig) -> PointerSnapshot {
        let ray = pointer_ray(self.cursor, self.viewport);
        PointerSnapshot {
            active: self.pointer_held,
            mode: self.mode,
            target_xz: ray_target_xz(ray, physics.pointer_reach),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_ray_corners() {
        let ray = pointer_ray(Vec2::new(0.0, 0.0), (800, 600));
        assert_eq!(ray, Vec3::new(-1.0, 1.0, 1.0));
        let ray = pointer_ray(Vec2::new(400.0, 300.0), (800, 600));
        assert_eq!(ray, Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_ray_target_uses_reach() {
        let target = ray_target_xz(Vec3::new(0.5, -0.2, 1.0), 5.0);
        assert_eq!(target, Vec2::new(2.5, 5.0));
    }

    #[test]
    fn test_wind_from_arrows() {
        let physics = PhysicsConfig::default();
        let mut input = InputState::new((800, 600));
        assert_eq!(input.wind(&physics), Vec3::ZERO);

        input.handle_event(&InputEvent::KeyPressed { key: KeyCode::Right });
        input.handle_event(&InputEvent::KeyPressed { key: KeyCode::Down });
        assert_eq!(input.wind(&physics), Vec3::new(0.02, -0.01, 0.0));

        input.handle_event(&InputEvent::KeyPressed { key: KeyCode::Left });
        assert_eq!(input.wind(&physics).x, 0.0);

        input.handle_event(&InputEvent::KeyReleased { key: KeyCode::Right });
        assert_eq!(input.wind(&physics).x, -0.02);
    }

    #[test]
    fn test_pointer_active_while_right_button_held() {
        let physics = PhysicsConfig::default();
        let mut input = InputState::new((800, 600));
        input.handle_event(&InputEvent::MouseButtonPressed {
            button: MouseButton::Right,
            x: 600.0,
            y: 300.0,
        });
        let snapshot = input.pointer_snapshot(&physics);
        assert!(snapshot.active);
        assert_eq!(snapshot.target_xz, Vec2::new(2.5, 5.0));

        input.handle_event(&InputEvent::MouseButtonReleased {
            button: MouseButton::Right,
            x: 600.0,
            y: 300.0,
        });
        assert!(!input.pointer_snapshot(&physics).active);
    }

    #[test]
    fn test_space_toggles_mode() {
        let physics = PhysicsConfig::default();
        let mut input = InputState::new((800, 600));
        let command = input.handle_event(&InputEvent::KeyPressed { key: KeyCode::Space });
        assert_eq!(command, Some(ControlCommand::ToggleInteractionMode));
        assert_eq!(input.pointer_snapshot(&physics).mode, InteractionMode::Repel);
        input.handle_event(&InputEvent::KeyPressed { key: KeyCode::Space });
        assert_eq!(input.mode, InteractionMode::Attract);
    }

    #[test]
    fn test_left_drag_orbits_camera() {
        let mut input = InputState::new((800, 600));
        input.handle_event(&InputEvent::MouseMoved { x: 100.0, y: 100.0 });
        assert_eq!(input.orbit, Vec2::ZERO);

        input.handle_event(&InputEvent::MouseButtonPressed {
            button: MouseButton::Left,
            x: 100.0,
            y: 100.0,
        });
        input.handle_event(&InputEvent::MouseMoved { x: 120.0, y: 90.0 });
        assert_eq!(input.orbit, Vec2::new(-5.0, 10.0));

        input.handle_event(&InputEvent::MouseButtonReleased {
            button: MouseButton::Left,
            x: 120.0,
            y: 90.0,
        });
        input.handle_event(&InputEvent::MouseMoved { x: 300.0, y: 300.0 });
        assert_eq!(input.orbit, Vec2::new(-5.0, 10.0));
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(ControlCommand::from_key(KeyCode::X), Some(ControlCommand::GrowLoad));
        assert_eq!(ControlCommand::from_key(KeyCode::Z), Some(ControlCommand::ShrinkLoad));
        assert_eq!(ControlCommand::from_key(KeyCode::Unknown(7)), None);
        assert_eq!(ControlCommand::from_key(KeyCode::Left), None);
    }
}

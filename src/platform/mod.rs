//! 平台输入抽象
//!
//! 窗口和事件轮询属于外部协作者；这里只定义它们交给模拟核心的事件类型，
//! 以及从事件到每帧输入快照的映射。

pub mod input;

pub use input::{ControlCommand, InputState, InteractionMode, PointerSnapshot};

// ============================================================================
// Input Abstraction
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    // Keyboard
    KeyPressed { key: KeyCode },
    KeyReleased { key: KeyCode },

    // Mouse
    MouseMoved { x: f32, y: f32 },
    MouseButtonPressed { button: MouseButton, x: f32, y: f32 },
    MouseButtonReleased { button: MouseButton, x: f32, y: f32 },

    // Window
    WindowResized { width: u32, height: u32 },
    WindowCloseRequested,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    C, G, P, V, X, Z,
    Escape, Space,
    Left, Right, Up, Down,
    Unknown(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left, Right, Middle, Other(u16),
}

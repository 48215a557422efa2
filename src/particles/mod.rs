//! 火焰粒子模拟核心
//!
//! 固定容量的 SoA 存储，每帧由外部时钟驱动一次。
//!
//! ## 架构设计
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                  Fire Particle System                    │
//! ├─────────────────────────────────────────────────────────┤
//! │  0. Capacity Control (on demand)                         │
//! │     - 扩容/缩容，保留 min(旧, 新) 个槽位                  │
//! │                                                          │
//! │  1. Physics Update (chunked, scoped threads)             │
//! │     - 生命衰减、速度 + 风 + 湍流积分                      │
//! │     - 指针吸引/排斥                                       │
//! │                                                          │
//! │  2. Emission                                             │
//! │     - 限流 + 小数累积，填充死亡槽位                       │
//! │                                                          │
//! │  3. Batch Build (render::batch_builder)                  │
//! │     - 面向相机的公告板 + 生命配色，单次绘制               │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 使用示例
//!
//! ```
//! use fire_sim::particles::ParticleSystem;
//! use fire_sim::platform::PointerSnapshot;
//! use fire_sim::render::CameraBasis;
//! use glam::Vec3;
//!
//! let mut system = ParticleSystem::new(1000).with_seed(7);
//! for _ in 0..60 {
//!     system.tick(1.0 / 60.0, Vec3::ZERO, PointerSnapshot::inactive(), 30);
//! }
//! let live = system.live_count();
//! let batch = system.build_batch(CameraBasis::default());
//! assert_eq!(batch.vertex_count(), live * 4);
//! ```

pub mod emitter;
pub mod physics;
pub mod random;
pub mod store;
pub mod system;


pub use emitter::FireEmitter;
pub use physics::{PhysicsStep, PointerPull};
pub use store::{Particle, ParticleChunkMut, ParticleStore, DEAD_LIFE};
pub use system::{ParticleSystem, ParticleSystemStats};

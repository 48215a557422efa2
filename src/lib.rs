//! # Fire Sim
//!
//! A real-time fire particle simulation core written in Rust.
//!
//! ## Features
//!
//! - **Particle Store**: Fixed-capacity structure-of-arrays storage with dead-slot recycling
//! - **Load Control**: Capacity can grow or shrink at runtime while preserving live state
//! - **Emission**: Rate-based spawning from a disk emitter with fractional carry
//! - **Chunked Physics**: Decay, turbulence, wind and pointer attraction/repulsion on scoped worker threads
//! - **Billboards**: Camera-facing quad batches with a life-driven flame palette, ready for upload
//! - **Soft Texture**: Gaussian-falloff sprite mask generated once at startup
//!
//! ## Architecture Design
//!
//! 每帧的数据流是单向的：
//! - **Input**: 平台事件折叠成只读的风力/指针快照
//! - **Simulation**: `ParticleSystem::tick` 先完成所有物理分块，再发射
//! - **Render**: 批次构建只读存储，输出顶点、纹理坐标和颜色缓冲
//!
//! ### Example
//!
//! ```
//! use fire_sim::particles::ParticleSystem;
//! use fire_sim::platform::PointerSnapshot;
//! use fire_sim::render::CameraBasis;
//! use glam::Vec3;
//!
//! let mut system = ParticleSystem::new(1000).with_seed(7);
//! system.tick(1.0 / 60.0, Vec3::ZERO, PointerSnapshot::inactive(), 30);
//! let live = system.live_count();
//! let batch = system.build_batch(CameraBasis::default());
//! assert_eq!(batch.vertex_count(), live * 4);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Engine loop, session controls, errors
//! - [`config`]: Configuration loading and validation
//! - [`particles`]: Store, emitter, physics and the system facade
//! - [`render`]: Billboard batches and the soft particle texture
//! - [`platform`]: Input events and per-frame input snapshots
//! - [`performance`]: Frame telemetry

/// Core engine functionality including the main loop and initialization
pub mod core;
/// Configuration system
pub mod config;
/// Fire particle simulation
pub mod particles;
/// Platform input abstraction
pub mod platform;
/// Render data preparation
pub mod render;
/// Frame telemetry
pub mod performance;

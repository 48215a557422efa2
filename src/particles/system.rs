//! 粒子系统
//!
//! 独占粒子存储，按帧驱动：容量控制（按需）→ 物理更新 → 发射 → 批次构建。

use crate::config::{EngineConfig, PerformanceConfig, PhysicsConfig};
use crate::particles::emitter::FireEmitter;
use crate::particles::physics::{self, PhysicsStep};
use crate::particles::random::seeded_rng;
use crate::particles::store::ParticleStore;
use crate::platform::input::PointerSnapshot;
use crate::render::batch_builder::{BillboardBatch, BillboardBatchBuilder, CameraBasis};
use glam::Vec3;
use rand::rngs::StdRng;
use std::time::Instant;

/// 粒子系统统计
#[derive(Debug, Default, Clone, Copy)]
pub struct ParticleSystemStats {
    /// 当前存活粒子数
    pub alive_count: usize,
    /// 总发射数
    pub total_emitted: u64,
    /// 本帧发射数
    pub frame_emitted: usize,
    /// 模拟时间（ms）
    pub simulation_time_ms: f32,
}

/// 火焰粒子系统
pub struct ParticleSystem {
    store: ParticleStore,
    emitter: FireEmitter,
    physics: PhysicsConfig,
    performance: PerformanceConfig,
    batch_builder: BillboardBatchBuilder,
    rng: StdRng,
    eager_fill_on_grow: bool,
    stats: ParticleSystemStats,
}

impl ParticleSystem {
    /// 以默认参数创建 `capacity` 个死亡槽位
    pub fn new(capacity: usize) -> Self {
        let mut config = EngineConfig::default();
        config.simulation.initial_capacity = capacity;
        Self::from_config(&config)
    }

    /// 按配置创建
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            store: ParticleStore::with_capacity(config.simulation.initial_capacity),
            emitter: FireEmitter::new(config.emission.clone()),
            physics: config.physics.clone(),
            performance: config.performance.clone(),
            batch_builder: BillboardBatchBuilder::new().size_exponent(config.render.size_exponent),
            rng: seeded_rng(config.performance.seed),
            eager_fill_on_grow: config.simulation.eager_fill_on_grow,
            stats: ParticleSystemStats::default(),
        }
    }

    /// 固定随机种子，便于复现
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = seeded_rng(Some(seed));
        self
    }

    /// 扩容后是否立即填满新槽位
    pub fn with_eager_fill(mut self, enabled: bool) -> Self {
        self.eager_fill_on_grow = enabled;
        self
    }

    /// 推进一帧：物理更新，然后发射
    ///
    /// 物理分块在返回发射之前全部完成，发射和渲染不会看到未完成的更新。
    pub fn tick(&mut self, dt: f32, wind: Vec3, pointer: PointerSnapshot, emission_rate: u32) {
        let start = Instant::now();

        self.update(dt, wind, &pointer);
        let emitted = self.emit(dt, emission_rate);

        self.stats.frame_emitted = emitted;
        self.stats.alive_count = self.store.live_count();
        self.stats.simulation_time_ms = start.elapsed().as_secs_f32() * 1000.0;

        tracing::trace!(
            target: "particles",
            "tick dt={:.4} emitted={} alive={}",
            dt,
            emitted,
            self.stats.alive_count
        );
    }

    /// 物理更新
    pub fn update(&mut self, dt: f32, wind: Vec3, pointer: &PointerSnapshot) {
        let step = PhysicsStep::new(&self.physics, dt, wind, pointer);
        let chunks = self.performance.chunks_for(self.store.capacity());
        physics::update(&mut self.store, &step, &mut self.rng, chunks);
    }

    /// 按速率发射，返回激活的粒子数
    pub fn emit(&mut self, dt: f32, emission_rate: u32) -> usize {
        let emitted = self
            .emitter
            .emit(&mut self.store, &mut self.rng, dt, emission_rate);
        self.stats.total_emitted += emitted as u64;
        emitted
    }

    /// 调整容量（负载控制）
    pub fn resize(&mut self, new_capacity: usize) {
        let old_capacity = self.store.resize(new_capacity);
        if old_capacity == new_capacity {
            return;
        }

        tracing::info!(
            target: "particles",
            "Resized particle store from {} to {} slots",
            old_capacity,
            new_capacity
        );

        if self.eager_fill_on_grow && new_capacity > old_capacity {
            let dead = self.store.dead_count();
            let filled = self.emitter.spawn(&mut self.store, &mut self.rng, dead);
            self.stats.total_emitted += filled as u64;
            tracing::debug!(target: "particles", "Eagerly filled {} slots after grow", filled);
        }

        self.stats.alive_count = self.store.live_count();
    }

    /// 构建本帧的公告板批次
    pub fn build_batch(&mut self, camera: CameraBasis) -> &BillboardBatch {
        self.batch_builder.build(&self.store, camera)
    }

    /// 当前存活粒子数
    pub fn live_count(&self) -> usize {
        self.store.live_count()
    }

    /// 当前容量
    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    /// 只读访问存储
    pub fn store(&self) -> &ParticleStore {
        &self.store
    }

    pub fn stats(&self) -> ParticleSystemStats {
        self.stats
    }
}

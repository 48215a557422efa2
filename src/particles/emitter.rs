//! 粒子发射器
//!
//! 把死亡槽位激活为新粒子，按速率限流并保留小数部分的累积量。

use crate::config::EmissionConfig;
use crate::particles::random::{normal, uniform};
use crate::particles::store::ParticleStore;
use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

/// 火焰发射器
///
/// 持有发射分布参数和跨帧的小数累积量。
#[derive(Debug, Clone)]
pub struct FireEmitter {
    /// 发射分布
    pub config: EmissionConfig,
    /// 上一帧残留的小数发射量
    emission_accumulator: f32,
}

impl Default for FireEmitter {
    fn default() -> Self {
        Self::new(EmissionConfig::default())
    }
}

impl FireEmitter {
    pub fn new(config: EmissionConfig) -> Self {
        Self {
            config,
            emission_accumulator: 0.0,
        }
    }

    /// 当前累积的小数发射量
    pub fn carry(&self) -> f32 {
        self.emission_accumulator
    }

    /// 计算本帧应发射的粒子数（未按死亡槽位数截断）
    pub fn particles_to_emit(&mut self, delta_time: f32, emission_rate: u32) -> usize {
        let target = emission_rate as f32 * delta_time + self.emission_accumulator;
        let count = target.floor().max(0.0);
        self.emission_accumulator = target - count;
        count as usize
    }

    /// 按速率发射，返回实际激活的粒子数
    pub fn emit<R: Rng + ?Sized>(
        &mut self,
        store: &mut ParticleStore,
        rng: &mut R,
        delta_time: f32,
        emission_rate: u32,
    ) -> usize {
        let count = self.particles_to_emit(delta_time, emission_rate);
        if count == 0 {
            return 0;
        }
        self.spawn(store, rng, count)
    }

    /// 激活至多 `count` 个死亡槽位，不经过累积量
    pub fn spawn<R: Rng + ?Sized>(
        &self,
        store: &mut ParticleStore,
        rng: &mut R,
        count: usize,
    ) -> usize {
        let slots: Vec<usize> = store.dead_slots().take(count).collect();
        for &index in &slots {
            self.seed_slot(store, rng, index);
        }
        slots.len()
    }

    /// 写入一个新粒子的初始状态
    fn seed_slot<R: Rng + ?Sized>(&self, store: &mut ParticleStore, rng: &mut R, index: usize) {
        let cfg = &self.config;

        let angle = uniform(rng, 0.0, TAU);
        let radius = uniform(rng, 0.0, cfg.emitter_radius);
        store.positions[index] = Vec3::new(
            angle.cos() * radius,
            cfg.emitter_height,
            angle.sin() * radius,
        );

        store.velocities[index] = Vec3::new(
            normal(rng, cfg.horizontal_velocity_std),
            uniform(rng, cfg.vertical_velocity_min, cfg.vertical_velocity_max),
            normal(rng, cfg.horizontal_velocity_std),
        );

        store.life[index] = 1.0;
        store.max_life[index] = 1.0;
        store.sizes[index] = uniform(rng, cfg.size_min, cfg.size_max);
    }
}

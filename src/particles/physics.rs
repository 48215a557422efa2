//! 分块并行的粒子物理更新
//!
//! 每个槽位只读写自己的行，外加只读的广播参数（风、指针目标、帧缩放），
//! 因此存储可以拆成互不重叠的连续分块，在作用域线程中并行更新，
//! 作用域结束即为本帧的屏障。
//!
//! ```text
//!   [0 ........ n/4) [n/4 ...... n/2) [n/2 .... 3n/4) [3n/4 ....... n)
//!        worker 0         worker 1         worker 2         worker 3
//!          │                 │                │                │
//!          └─────────────────┴───────┬────────┴────────────────┘
//!                                    ▼
//!                          join (scope end) → emission
//! ```

use crate::config::PhysicsConfig;
use crate::particles::random::normal;
use crate::particles::store::{ParticleChunkMut, ParticleStore};
use crate::platform::input::{InteractionMode, PointerSnapshot};
use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::thread;

/// 指针吸引/排斥参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerPull {
    /// XZ 平面上的目标点
    pub target: Vec2,
    /// 带符号系数：吸引为正，排斥为负
    pub coefficient: f32,
}

/// 单帧物理参数快照
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsStep {
    pub frame_scale: f32,
    pub decay_rate: f32,
    pub wind: Vec3,
    pub turbulence_std: f32,
    pub pull: Option<PointerPull>,
}

impl PhysicsStep {
    /// 由配置和本帧输入构造
    pub fn new(config: &PhysicsConfig, dt: f32, wind: Vec3, pointer: &PointerSnapshot) -> Self {
        let pull = pointer.active.then(|| PointerPull {
            target: pointer.target_xz,
            coefficient: match pointer.mode {
                InteractionMode::Attract => config.attraction,
                InteractionMode::Repel => -config.attraction,
            },
        });

        Self {
            frame_scale: config.frame_scale(dt),
            decay_rate: config.decay_rate,
            wind,
            turbulence_std: config.turbulence_std,
            pull,
        }
    }
}

/// 更新一个分块
///
/// 死亡槽位同样被更新：生命继续减少、位置继续平移，但它们不会被渲染。
pub fn update_chunk<R: Rng + ?Sized>(chunk: ParticleChunkMut<'_>, step: &PhysicsStep, rng: &mut R) {
    let fs = step.frame_scale;
    let decay = step.decay_rate * fs;

    for ((position, velocity), life) in chunk
        .positions
        .iter_mut()
        .zip(chunk.velocities.iter())
        .zip(chunk.life.iter_mut())
    {
        *life -= decay;

        // 湍流只作用于 X 轴
        let noise = Vec3::new(normal(rng, step.turbulence_std), 0.0, 0.0);
        *position += (*velocity + step.wind + noise) * fs;

        if let Some(pull) = step.pull {
            let dx = pull.target.x - position.x;
            let dz = pull.target.y - position.z;
            position.x += dx * pull.coefficient * fs;
            position.z += dz * pull.coefficient * fs;
        }
    }
}

/// 更新整个存储
///
/// `chunk_count == 1` 时在当前线程顺序执行；否则每个分块一个作用域线程，
/// 每个分块使用从 `rng` 派生的独立随机数生成器。
pub fn update<R: Rng + ?Sized>(
    store: &mut ParticleStore,
    step: &PhysicsStep,
    rng: &mut R,
    chunk_count: usize,
) {
    let chunks = store.chunks_mut(chunk_count);
    if chunks.len() <= 1 {
        for chunk in chunks {
            update_chunk(chunk, step, rng);
        }
        return;
    }

    let seeded: Vec<(ParticleChunkMut<'_>, StdRng)> = chunks
        .into_iter()
        .map(|chunk| (chunk, StdRng::seed_from_u64(rng.next_u64())))
        .collect();

    thread::scope(|scope| {
        for (chunk, mut chunk_rng) in seeded {
            scope.spawn(move || update_chunk(chunk, step, &mut chunk_rng));
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particles::random::seeded_rng;
    use crate::particles::store::Particle;

    fn calm_step() -> PhysicsStep {
        PhysicsStep {
            frame_scale: 1.0,
            decay_rate: 0.012,
            wind: Vec3::ZERO,
            turbulence_std: 0.0,
            pull: None,
        }
    }

    fn store_with(particle: Particle, capacity: usize) -> ParticleStore {
        let mut store = ParticleStore::with_capacity(capacity);
        for i in 0..capacity {
            store.set(i, particle);
        }
        store
    }

    fn rising() -> Particle {
        Particle {
            position: Vec3::new(0.0, -1.5, 0.0),
            velocity: Vec3::new(0.01, 0.2, -0.01),
            life: 1.0,
            max_life: 1.0,
            size: 0.5,
        }
    }

    #[test]
    fn test_decay_and_integration() {
        let mut store = store_with(rising(), 1);
        let mut rng = seeded_rng(Some(1));
        update(&mut store, &calm_step(), &mut rng, 1);

        let p = store.get(0).unwrap();
        assert!((p.life - 0.988).abs() < 1e-6);
        assert!((p.position - Vec3::new(0.01, -1.3, -0.01)).length() < 1e-6);
        assert_eq!(p.velocity, rising().velocity);
    }

    #[test]
    fn test_frame_scale_normalizes_decay() {
        let config = PhysicsConfig::default();
        let pointer = PointerSnapshot::default();
        let step = PhysicsStep::new(&config, 1.0 / 30.0, Vec3::ZERO, &pointer);
        assert!((step.frame_scale - 2.0).abs() < 1e-6);

        let mut store = store_with(rising(), 1);
        let mut rng = seeded_rng(Some(2));
        update(&mut store, &PhysicsStep { turbulence_std: 0.0, ..step }, &mut rng, 1);
        assert!((store.life[0] - 0.976).abs() < 1e-6);
    }

    #[test]
    fn test_wind_moves_particles() {
        let mut store = store_with(rising(), 1);
        let mut rng = seeded_rng(Some(3));
        let step = PhysicsStep {
            wind: Vec3::new(0.02, 0.0, 0.0),
            ..calm_step()
        };
        update(&mut store, &step, &mut rng, 1);
        assert!((store.positions[0].x - 0.03).abs() < 1e-6);
    }

    #[test]
    fn test_turbulence_only_moves_x() {
        let still = Particle {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            ..rising()
        };
        let mut store = store_with(still, 64);
        let mut rng = seeded_rng(Some(9));
        let step = PhysicsStep {
            turbulence_std: 0.002,
            ..calm_step()
        };
        update(&mut store, &step, &mut rng, 1);

        assert!(store.positions.iter().all(|p| p.y == 0.0 && p.z == 0.0));
        assert!(store.positions.iter().any(|p| p.x != 0.0));
    }

    #[test]
    fn test_attract_and_repel_are_mirror_images() {
        let pull_step = |coefficient| PhysicsStep {
            pull: Some(PointerPull {
                target: Vec2::new(5.0, 5.0),
                coefficient,
            }),
            ..calm_step()
        };
        let still = Particle {
            velocity: Vec3::ZERO,
            position: Vec3::ZERO,
            ..rising()
        };
        let mut rng = seeded_rng(Some(4));

        let mut attracted = store_with(still, 1);
        update(&mut attracted, &pull_step(0.005), &mut rng, 1);
        let mut repelled = store_with(still, 1);
        update(&mut repelled, &pull_step(-0.005), &mut rng, 1);

        assert!((attracted.positions[0].x - 0.025).abs() < 1e-6);
        assert!((attracted.positions[0].z - 0.025).abs() < 1e-6);
        assert!((repelled.positions[0].x + 0.025).abs() < 1e-6);
        assert!((repelled.positions[0].z + 0.025).abs() < 1e-6);
        assert_eq!(attracted.positions[0].y, 0.0);
    }

    #[test]
    fn test_pointer_mode_sets_sign() {
        let config = PhysicsConfig::default();
        let mut pointer = PointerSnapshot {
            active: true,
            mode: InteractionMode::Repel,
            target_xz: Vec2::new(1.0, 5.0),
        };
        let step = PhysicsStep::new(&config, 1.0 / 60.0, Vec3::ZERO, &pointer);
        assert_eq!(step.pull.unwrap().coefficient, -0.005);

        pointer.active = false;
        let step = PhysicsStep::new(&config, 1.0 / 60.0, Vec3::ZERO, &pointer);
        assert!(step.pull.is_none());
    }

    #[test]
    fn test_chunked_matches_sequential_without_noise() {
        let mut sequential = ParticleStore::with_capacity(1003);
        for i in 0..1003 {
            sequential.set(
                i,
                Particle {
                    position: Vec3::splat(i as f32 * 0.001),
                    life: (i % 7) as f32 / 7.0,
                    ..rising()
                },
            );
        }
        let mut chunked = sequential.clone();
        let step = PhysicsStep {
            wind: Vec3::new(0.0, 0.01, 0.0),
            pull: Some(PointerPull {
                target: Vec2::new(-1.0, 5.0),
                coefficient: 0.005,
            }),
            ..calm_step()
        };

        let mut rng = seeded_rng(Some(5));
        update(&mut sequential, &step, &mut rng, 1);
        update(&mut chunked, &step, &mut rng, 4);

        assert_eq!(sequential.life, chunked.life);
        assert_eq!(sequential.positions, chunked.positions);
    }

    #[test]
    fn test_dead_slots_stay_dead() {
        let mut store = ParticleStore::with_capacity(8);
        let mut rng = seeded_rng(Some(6));
        update(&mut store, &calm_step(), &mut rng, 4);
        assert_eq!(store.live_count(), 0);
        assert!(store.life.iter().all(|&l| l < -1.0));
    }
}

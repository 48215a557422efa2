use fire_sim::config::EngineConfig;
use fire_sim::core::Engine;
use fire_sim::particles::{Particle, ParticleSystem};
use fire_sim::platform::{InputEvent, KeyCode, MouseButton, PointerSnapshot};
use fire_sim::render::CameraBasis;
use glam::Vec3;

const DT: f32 = 1.0 / 60.0;

fn live_particles(system: &ParticleSystem) -> Vec<(usize, Particle)> {
    (0..system.capacity())
        .filter_map(|i| system.store().get(i).map(|p| (i, p)))
        .filter(|(_, p)| p.is_alive())
        .collect()
}

#[test]
fn test_one_second_of_fire() {
    let mut system = ParticleSystem::new(1000).with_seed(11);

    for _ in 0..60 {
        system.tick(DT, Vec3::ZERO, PointerSnapshot::inactive(), 30);
        assert!(system.live_count() <= system.capacity());
    }

    // 30/s 持续 1 秒，寿命约 83 帧，尚无粒子死亡
    let live = live_particles(&system);
    assert!((29..=30).contains(&live.len()), "live = {}", live.len());

    assert!(live.iter().all(|(_, p)| p.position.y >= -1.5));
    let mean_y = live.iter().map(|(_, p)| p.position.y).sum::<f32>() / live.len() as f32;
    assert!(mean_y > -1.5);
    assert!(live.iter().all(|(_, p)| p.velocity.y > 0.0));
}

#[test]
fn test_shrink_then_grow_keeps_prefix() {
    let mut system = ParticleSystem::new(1000).with_seed(12);
    for _ in 0..120 {
        system.tick(DT, Vec3::ZERO, PointerSnapshot::inactive(), 600);
    }

    let before: Vec<(usize, Particle)> = live_particles(&system)
        .into_iter()
        .filter(|(i, _)| *i < 500)
        .collect();
    assert!(!before.is_empty());

    system.resize(500);
    system.resize(1000);

    assert_eq!(system.capacity(), 1000);
    for (i, particle) in &before {
        assert_eq!(system.store().get(*i), Some(*particle));
    }
    assert!((500..1000).all(|i| !system.store().get(i).unwrap().is_alive()));
}

#[test]
fn test_life_decreases_until_excluded() {
    let mut system = ParticleSystem::new(16).with_seed(13);
    system.emit(1.0, 4);
    let mut previous: Vec<f32> = system.store().life.clone();

    let mut ticks = 0;
    while system.live_count() > 0 {
        system.tick(DT, Vec3::ZERO, PointerSnapshot::inactive(), 0);
        for (now, before) in system.store().life.iter().zip(&previous) {
            if *before > 0.0 {
                assert!((before - now - 0.012).abs() < 1e-5);
            }
        }
        previous = system.store().life.clone();
        ticks += 1;
        assert!(ticks <= 100);
    }

    // 1.0 / 0.012 ≈ 83.3
    assert!((83..=85).contains(&ticks), "ticks = {}", ticks);
    assert!(system.build_batch(CameraBasis::default()).is_empty());
}

#[test]
fn test_batch_matches_live_count() {
    let mut system = ParticleSystem::new(2000).with_seed(14);
    let camera = CameraBasis::from_orbit(20.0, 30.0);

    for frame in 0..200 {
        let pointer = PointerSnapshot {
            active: frame % 50 < 25,
            ..PointerSnapshot::default()
        };
        system.tick(DT, Vec3::new(0.02, 0.0, 0.0), pointer, 300);

        let live = system.live_count();
        let batch = system.build_batch(camera);
        assert_eq!(batch.count(), live);
        assert_eq!(batch.vertices.len(), 4 * live);
        assert_eq!(batch.tex_coords.len(), 4 * live);
        assert_eq!(batch.colors.len(), 4 * live);
    }
}

#[test]
fn test_emission_converges_to_rate() {
    let mut system = ParticleSystem::new(10_000).with_seed(15);
    let mut emitted = 0;
    for _ in 0..600 {
        emitted += system.emit(DT, 30);
    }
    assert!((emitted as i64 - 300).abs() <= 1, "emitted = {}", emitted);
    assert_eq!(system.stats().total_emitted, emitted as u64);
}

#[test]
fn test_parallel_update_over_threshold() {
    let mut config = EngineConfig::default();
    config.simulation.initial_capacity = 20_000;
    config.performance.seed = Some(16);
    config.performance.worker_chunks = 4;
    let mut system = ParticleSystem::from_config(&config);

    for _ in 0..30 {
        system.tick(DT, Vec3::ZERO, PointerSnapshot::inactive(), 5000);
    }
    assert!(system.live_count() > 2000);
    assert!(system.live_count() <= 20_000);
}

#[test]
fn test_config_driven_session() {
    let config = EngineConfig::from_toml_str(
        r#"
        [simulation]
        initial_capacity = 600
        emission_rate = 120

        [performance]
        seed = 3
        "#,
    )
    .unwrap();

    let script = [
        (10, InputEvent::MouseButtonPressed { button: MouseButton::Right, x: 200.0, y: 300.0 }),
        (20, InputEvent::KeyPressed { key: KeyCode::X }),
        (30, InputEvent::KeyPressed { key: KeyCode::Z }),
        (40, InputEvent::KeyPressed { key: KeyCode::Z }),
    ];
    let report = Engine::run_session(&config, 120, &script).unwrap();

    assert_eq!(report.frames, 120);
    assert_eq!(report.final_capacity, 500);
    assert_eq!(report.emission_rate, 120);
    assert_eq!(report.last_vertex_count, report.live_count * 4);
}

//! SoA (Structure of Arrays) 粒子存储
//!
//! 固定容量的槽位数组，每个字段一条连续数组，便于分块并行更新。
//! `life <= 0` 的槽位即为死亡槽位，可被发射器复用。

use glam::Vec3;
use std::ops::Range;

/// 死亡槽位的初始生命值
pub const DEAD_LIFE: f32 = -1.0;

/// 单个粒子的行视图
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    /// 剩余归一化生命（1.0 递减到 0）
    pub life: f32,
    /// 预留给可变生命周期，目前恒为 1.0
    pub max_life: f32,
    /// 公告板基础半尺寸
    pub size: f32,
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            life: DEAD_LIFE,
            max_life: 1.0,
            size: 0.0,
        }
    }
}

impl Particle {
    /// 是否存活
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

/// SoA 布局的粒子存储
#[derive(Debug, Clone, Default)]
pub struct ParticleStore {
    /// 位置数组
    pub positions: Vec<Vec3>,
    /// 速度数组
    pub velocities: Vec<Vec3>,
    /// 生命数组
    pub life: Vec<f32>,
    /// 最大生命数组
    pub max_life: Vec<f32>,
    /// 尺寸数组
    pub sizes: Vec<f32>,
}

/// 物理更新使用的可变分块
///
/// 只暴露物理更新需要写入的字段，速度只读。
pub struct ParticleChunkMut<'a> {
    /// 分块在存储中的起始索引
    pub offset: usize,
    pub positions: &'a mut [Vec3],
    pub velocities: &'a [Vec3],
    pub life: &'a mut [f32],
}

impl ParticleChunkMut<'_> {
    pub fn len(&self) -> usize {
        self.life.len()
    }

    pub fn is_empty(&self) -> bool {
        self.life.is_empty()
    }
}

impl ParticleStore {
    /// 创建 `capacity` 个全部死亡的槽位
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            positions: vec![Vec3::ZERO; capacity],
            velocities: vec![Vec3::ZERO; capacity],
            life: vec![DEAD_LIFE; capacity],
            max_life: vec![1.0; capacity],
            sizes: vec![0.0; capacity],
        }
    }

    /// 槽位总数
    pub fn capacity(&self) -> usize {
        self.life.len()
    }

    /// 存活粒子数
    pub fn live_count(&self) -> usize {
        self.life.iter().filter(|&&l| l > 0.0).count()
    }

    /// 死亡槽位数
    pub fn dead_count(&self) -> usize {
        self.capacity() - self.live_count()
    }

    /// 按索引升序枚举死亡槽位
    pub fn dead_slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.life
            .iter()
            .enumerate()
            .filter(|(_, l)| **l <= 0.0)
            .map(|(i, _)| i)
    }

    /// 读取一行
    pub fn get(&self, index: usize) -> Option<Particle> {
        if index >= self.capacity() {
            return None;
        }
        Some(Particle {
            position: self.positions[index],
            velocity: self.velocities[index],
            life: self.life[index],
            max_life: self.max_life[index],
            size: self.sizes[index],
        })
    }

    /// 写入一行，越界时返回 `false`
    pub fn set(&mut self, index: usize, particle: Particle) -> bool {
        if index >= self.capacity() {
            return false;
        }
        self.positions[index] = particle.position;
        self.velocities[index] = particle.velocity;
        self.life[index] = particle.life;
        self.max_life[index] = particle.max_life;
        self.sizes[index] = particle.size;
        true
    }

    /// 调整容量
    ///
    /// 前 `min(old, new)` 个槽位原样保留（包括存活/死亡状态），
    /// 新增槽位全部为死亡状态。返回旧容量。
    pub fn resize(&mut self, new_capacity: usize) -> usize {
        let old_capacity = self.capacity();
        if new_capacity == old_capacity {
            return old_capacity;
        }

        let mut resized = Self::with_capacity(new_capacity);
        let keep = old_capacity.min(new_capacity);
        resized.positions[..keep].copy_from_slice(&self.positions[..keep]);
        resized.velocities[..keep].copy_from_slice(&self.velocities[..keep]);
        resized.life[..keep].copy_from_slice(&self.life[..keep]);
        resized.max_life[..keep].copy_from_slice(&self.max_life[..keep]);
        resized.sizes[..keep].copy_from_slice(&self.sizes[..keep]);

        *self = resized;
        old_capacity
    }

    /// 拆分为互不重叠、完整覆盖全部槽位的可变分块
    pub fn chunks_mut(&mut self, chunk_count: usize) -> Vec<ParticleChunkMut<'_>> {
        let ranges = partition(self.capacity(), chunk_count);

        let mut positions = self.positions.as_mut_slice();
        let mut velocities = self.velocities.as_slice();
        let mut life = self.life.as_mut_slice();
        let mut chunks = Vec::with_capacity(ranges.len());

        for range in ranges {
            let len = range.len();
            let (pos_head, pos_tail) = std::mem::take(&mut positions).split_at_mut(len);
            let (life_head, life_tail) = std::mem::take(&mut life).split_at_mut(len);
            let (vel_head, vel_tail) = velocities.split_at(len);
            positions = pos_tail;
            life = life_tail;
            velocities = vel_tail;

            chunks.push(ParticleChunkMut {
                offset: range.start,
                positions: pos_head,
                velocities: vel_head,
                life: life_head,
            });
        }

        chunks
    }
}

/// 将 `[0, len)` 划分为最多 `chunk_count` 个连续区间
///
/// 前 `chunk_count - 1` 个区间长度为 `len / chunk_count`，最后一个区间包含余数；
/// 空区间被跳过。
pub fn partition(len: usize, chunk_count: usize) -> Vec<Range<usize>> {
    let chunk_count = chunk_count.max(1);
    let chunk_size = len / chunk_count;
    let mut ranges = Vec::with_capacity(chunk_count);

    for i in 0..chunk_count {
        let start = i * chunk_size;
        let end = if i + 1 < chunk_count {
            start + chunk_size
        } else {
            len
        };
        if start >= end {
            continue;
        }
        ranges.push(start..end);
    }

    ranges
}

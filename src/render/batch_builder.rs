//! 公告板批次构建器
//!
//! 把存活粒子转换为一次绘制调用所需的扁平缓冲区：
//! 每个粒子 4 个顶点、4 组纹理坐标、4 份相同的颜色。
//!
//! ## 使用示例
//!
//! ```ignore
//! let mut builder = BillboardBatchBuilder::new();
//! let basis = CameraBasis::from_view_matrix(view);
//! let batch = builder.build(system.store(), basis);
//! if !batch.is_empty() {
//!     renderer.draw_quads(batch.vertex_bytes(), batch.count() * 4);
//! }
//! ```

use crate::particles::store::ParticleStore;
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

/// 每个公告板的角点顺序：左下、右下、右上、左上
pub const QUAD_TEX_COORDS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

/// 默认的尺寸收缩指数
pub const DEFAULT_SIZE_EXPONENT: f32 = 0.7;

// ============================================================================
// 相机基向量
// ============================================================================

/// 相机的右/上基向量，由外部渲染器每帧提供
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraBasis {
    pub right: Vec3,
    pub up: Vec3,
}

impl Default for CameraBasis {
    fn default() -> Self {
        Self {
            right: Vec3::X,
            up: Vec3::Y,
        }
    }
}

impl CameraBasis {
    pub fn new(right: Vec3, up: Vec3) -> Self {
        Self { right, up }
    }

    /// 从视图矩阵提取基向量（旋转部分的第一、二行）
    pub fn from_view_matrix(view: Mat4) -> Self {
        Self {
            right: view.row(0).truncate(),
            up: view.row(1).truncate(),
        }
    }

    /// 环绕相机的视图矩阵：后退 `distance`，先绕 X 俯仰，再绕 Y 偏航（角度制）
    pub fn orbit_view(pitch_deg: f32, yaw_deg: f32, distance: f32) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, 0.0, -distance))
            * Mat4::from_rotation_x(pitch_deg.to_radians())
            * Mat4::from_rotation_y(yaw_deg.to_radians())
    }

    /// 环绕相机的基向量，平移不影响结果
    pub fn from_orbit(pitch_deg: f32, yaw_deg: f32) -> Self {
        Self::from_view_matrix(Self::orbit_view(pitch_deg, yaw_deg, 0.0))
    }
}

// ============================================================================
// 生命周期配色
// ============================================================================

/// 颜色分段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorBand {
    /// `life > 0.7`：黄白色
    YellowHot,
    /// `0.4 < life <= 0.7`：橙色
    Orange,
    /// `life <= 0.4`：红色渐暗
    EmberRed,
}

impl ColorBand {
    pub fn for_life(life: f32) -> Self {
        if life > 0.7 {
            ColorBand::YellowHot
        } else if life > 0.4 {
            ColorBand::Orange
        } else {
            ColorBand::EmberRed
        }
    }
}

/// 按生命计算 RGBA
pub fn flame_color(life: f32) -> [f32; 4] {
    match ColorBand::for_life(life) {
        ColorBand::YellowHot => [1.0, 0.95, 0.4, life.powf(1.5).min(1.0)],
        ColorBand::Orange => [1.0, 0.5 + 0.4 * life, 0.1, life.powf(1.2).min(1.0)],
        ColorBand::EmberRed => [0.8 * life, 0.1, 0.0, life.powf(1.1) * 0.7],
    }
}

// ============================================================================
// 批次数据
// ============================================================================

/// 交错布局的顶点（用于上传到 GPU 顶点缓冲区）
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct BillboardVertex {
    pub position: [f32; 3],
    pub tex_coord: [f32; 2],
    pub color: [f32; 4],
}

/// 一帧的公告板批次
#[derive(Debug, Clone, Default)]
pub struct BillboardBatch {
    /// 顶点位置（`count * 4`）
    pub vertices: Vec<[f32; 3]>,
    /// 纹理坐标（`count * 4`）
    pub tex_coords: Vec<[f32; 2]>,
    /// 顶点颜色（`count * 4`）
    pub colors: Vec<[f32; 4]>,
    count: usize,
}

impl BillboardBatch {
    /// 粒子数（顶点数为其 4 倍）
    pub fn count(&self) -> usize {
        self.count
    }

    /// 顶点数
    pub fn vertex_count(&self) -> usize {
        self.count * 4
    }

    /// 空批次：调用方应跳过绘制
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    fn clear(&mut self) {
        self.vertices.clear();
        self.tex_coords.clear();
        self.colors.clear();
        self.count = 0;
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn tex_coord_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.tex_coords)
    }

    pub fn color_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.colors)
    }

    /// 转换为交错顶点
    pub fn interleaved(&self) -> Vec<BillboardVertex> {
        self.vertices
            .iter()
            .zip(&self.tex_coords)
            .zip(&self.colors)
            .map(|((&position, &tex_coord), &color)| BillboardVertex {
                position,
                tex_coord,
                color,
            })
            .collect()
    }
}

// ============================================================================
// 批次构建器
// ============================================================================

/// 批次构建器，跨帧复用缓冲区
#[derive(Debug, Clone)]
pub struct BillboardBatchBuilder {
    size_exponent: f32,
    batch: BillboardBatch,
}

impl Default for BillboardBatchBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BillboardBatchBuilder {
    /// 创建新的批次构建器
    pub fn new() -> Self {
        Self {
            size_exponent: DEFAULT_SIZE_EXPONENT,
            batch: BillboardBatch::default(),
        }
    }

    /// 设置尺寸收缩指数
    pub fn size_exponent(mut self, exponent: f32) -> Self {
        self.size_exponent = exponent;
        self
    }

    /// 上一次构建的结果
    pub fn batch(&self) -> &BillboardBatch {
        &self.batch
    }

    /// 从存储构建批次
    pub fn build(&mut self, store: &ParticleStore, camera: CameraBasis) -> &BillboardBatch {
        self.batch.clear();

        let live = store.live_count();
        if live == 0 {
            return &self.batch;
        }

        let batch = &mut self.batch;
        batch.vertices.reserve(live * 4);
        batch.tex_coords.reserve(live * 4);
        batch.colors.reserve(live * 4);

        let iter = store
            .positions
            .iter()
            .zip(&store.life)
            .zip(&store.sizes)
            .filter(|((_, life), _)| **life > 0.0);

        for ((&position, &life), &size) in iter {
            let half = size * life.powf(self.size_exponent);
            let right = camera.right * half;
            let up = camera.up * half;

            batch.vertices.extend_from_slice(&[
                (position - right - up).to_array(),
                (position + right - up).to_array(),
                (position + right + up).to_array(),
                (position - right + up).to_array(),
            ]);
            batch.tex_coords.extend_from_slice(&QUAD_TEX_COORDS);

            let color = flame_color(life);
            batch.colors.extend_from_slice(&[color; 4]);
        }

        batch.count = live;
        &self.batch
    }
}

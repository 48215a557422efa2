//! 参考网格
//!
//! 水平面上的方格线，帮助判断火焰的空间位置。与公告板批次一样输出扁平缓冲区，
//! 按线段列表（每两个顶点一条线）绘制。

use crate::config::RenderConfig;

/// 网格线颜色
pub const GRID_COLOR: [f32; 4] = [0.3, 0.3, 0.3, 1.0];

/// 网格线段缓冲
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridLines {
    /// 线段端点（`line_count * 2`）
    pub vertices: Vec<[f32; 3]>,
    /// 统一颜色
    pub color: [f32; 4],
}

impl GridLines {
    /// 生成 `[-half_extent, half_extent]` 范围、位于 `height` 高度的网格
    ///
    /// 每个整数坐标各一条平行于 Z 轴和平行于 X 轴的线。
    pub fn generate(half_extent: u32, height: f32) -> Self {
        let extent = half_extent as f32;
        let steps = 2 * half_extent as usize + 1;
        let mut vertices = Vec::with_capacity(steps * 4);

        for i in 0..steps {
            let offset = i as f32 - extent;
            vertices.extend_from_slice(&[
                [offset, height, -extent],
                [offset, height, extent],
                [-extent, height, offset],
                [extent, height, offset],
            ]);
        }

        Self {
            vertices,
            color: GRID_COLOR,
        }
    }

    /// 按渲染配置生成
    pub fn from_config(config: &RenderConfig) -> Self {
        Self::generate(config.grid_half_extent, config.grid_height)
    }

    pub fn line_count(&self) -> usize {
        self.vertices.len() / 2
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

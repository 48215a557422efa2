//! 软粒子纹理
//!
//! 启动时生成一次的圆形高斯衰减 alpha 遮罩，用来柔化公告板边缘。

use crate::config::RenderConfig;

/// RGBA8 软粒子纹理
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoftParticleTexture {
    size: u32,
    pixels: Vec<[u8; 4]>,
}

impl SoftParticleTexture {
    /// 生成 `size x size` 的纹理
    ///
    /// 归一化距离 `d < 1` 的像素为白色，`alpha = 255 * exp(-falloff * d^2)`；
    /// 圆外像素全为 0。
    pub fn generate(size: u32, falloff: f32) -> Self {
        let center = size as f32 / 2.0;
        let radius = size as f32 / 2.0;
        let mut pixels = Vec::with_capacity(size as usize * size as usize);

        for y in 0..size {
            for x in 0..size {
                let dx = x as f32 - center;
                let dy = y as f32 - center;
                let dist = (dx * dx + dy * dy).sqrt() / radius;

                if dist < 1.0 {
                    let alpha = (255.0 * (-falloff * dist * dist).exp()) as u8;
                    pixels.push([255, 255, 255, alpha]);
                } else {
                    pixels.push([0, 0, 0, 0]);
                }
            }
        }

        tracing::debug!(target: "render", "Generated {}x{} soft particle texture", size, size);
        Self { size, pixels }
    }

    /// 按渲染配置生成
    pub fn from_config(config: &RenderConfig) -> Self {
        Self::generate(config.texture_size, config.texture_falloff)
    }

    /// 边长
    pub fn size(&self) -> u32 {
        self.size
    }

    /// 读取像素，越界返回 `None`
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.size || y >= self.size {
            return None;
        }
        self.pixels
            .get(y as usize * self.size as usize + x as usize)
            .copied()
    }

    /// 行优先的 RGBA8 字节，可直接上传
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}

//! 渲染数据准备
//!
//! 不直接提交绘制：每帧把存活粒子展开成相机朝向的四边形批次，
//! 启动时生成一次软粒子纹理和参考网格，它们都以可直接上传的字节形式暴露。

pub mod batch_builder;
pub mod grid;
pub mod texture;

pub use batch_builder::{
    flame_color, BillboardBatch, BillboardBatchBuilder, BillboardVertex, CameraBasis, ColorBand,
    QUAD_TEX_COORDS,
};
pub use grid::{GridLines, GRID_COLOR};
pub use texture::SoftParticleTexture;

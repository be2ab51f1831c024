//! # 三角形光栅化模块
//!
//! 扫描线光栅化器：逐顶点 NdotL 光照，Gouraud 插值，逐像素深度测试

pub mod pixel_processor;
pub mod shading;
pub mod triangle_data;

// 重新导出主要类型和函数
pub use pixel_processor::{process_scanline, rasterize_triangle};
pub use shading::compute_ndotl;
pub use triangle_data::{ProjectedVertex, ShadedVertex, TriangleData};

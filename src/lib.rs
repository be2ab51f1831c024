//! CPU 软件光栅化器
//!
//! 投影 -> 逐顶点光照 -> 扫描线填充 -> 逐像素深度测试，
//! 三角形之间通过 rayon 并行光栅化。

pub mod core;
pub mod error;
pub mod geometry;
pub mod io;
pub mod material_system;
pub mod scene;
pub mod utils;

pub use crate::core::frame_buffer::FrameBuffer;
pub use crate::core::render_config::RenderConfig;
pub use crate::core::renderer::{PresentTarget, Renderer};
pub use crate::error::{RenderError, Result};
pub use crate::geometry::camera::Camera;
pub use crate::scene::mesh::{Face, Mesh, Vertex};

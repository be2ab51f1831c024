use crate::core::frame_buffer::FrameBuffer;
use crate::core::geometry_processor::GeometryProcessor;
use crate::core::rasterizer::{TriangleData, rasterize_triangle};
use crate::core::render_config::RenderConfig;
use crate::error::{RenderError, Result};
use crate::geometry::camera::Camera;
use crate::geometry::transform::TransformFactory;
use crate::scene::mesh::{Face, Mesh};
use log::debug;
use nalgebra::Matrix4;
use rayon::prelude::*;
use std::time::Instant;

/// 显示端：接收整帧 BGRA 像素并负责刷新
pub trait PresentTarget {
    /// `bgra` 的长度恰好为 `width * height * 4`
    fn write_pixels(&mut self, bgra: &[u8], width: usize, height: usize) -> Result<()>;

    /// 请求重绘，像素写入后调用
    fn invalidate(&mut self) -> Result<()>;
}

/// 软件渲染设备
///
/// 一帧的调用顺序为 `clear` -> `render` -> `present`。
/// 三者都通过 `&mut self` 调用，清屏不可能与光栅化重叠。
pub struct Renderer {
    pub frame_buffer: FrameBuffer,
    pub config: RenderConfig,
    pool: rayon::ThreadPool,
}

impl Renderer {
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Self::with_config(width, height, RenderConfig::default())
    }

    pub fn with_config(width: usize, height: usize, config: RenderConfig) -> Result<Self> {
        let frame_buffer = FrameBuffer::new(width, height)?;
        // num_threads(0) 交给 rayon 按 CPU 数决定
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.worker_threads)
            .thread_name(|i| format!("raster-{}", i))
            .build()?;
        debug!(
            "创建渲染设备 {}x{}，工作线程数 {}",
            width,
            height,
            pool.current_num_threads()
        );
        Ok(Renderer {
            frame_buffer,
            config,
            pool,
        })
    }

    pub fn width(&self) -> usize {
        self.frame_buffer.width
    }

    pub fn height(&self) -> usize {
        self.frame_buffer.height
    }

    pub fn worker_count(&self) -> usize {
        self.pool.current_num_threads()
    }

    pub fn clear(&mut self, r: u8, g: u8, b: u8, a: u8) {
        let frame_buffer = &self.frame_buffer;
        self.pool.install(|| frame_buffer.clear(r, g, b, a));
    }

    /// 渲染一帧
    ///
    /// 先校验所有网格，任何越界面索引都会在写入像素之前返回 `InvalidMesh`。
    /// 函数返回时本帧所有光栅化工作均已完成。
    pub fn render(&mut self, camera: &Camera, meshes: &[Mesh]) -> Result<()> {
        for mesh in meshes {
            mesh.validate()?;
        }

        let start_time = Instant::now();
        let (width, height) = (self.width(), self.height());

        // 视图和投影矩阵每帧只计算一次
        let view = camera.view_matrix();
        let projection = TransformFactory::perspective(
            width as f32 / height as f32,
            self.config.fov,
            self.config.near,
            self.config.far,
        );
        let view_projection = projection * view;

        let frame_buffer = &self.frame_buffer;
        let config = &self.config;

        if config.use_multithreading {
            // 网格和面两级并行
            self.pool.install(|| {
                meshes.par_iter().for_each(|mesh| {
                    let (transform, world) = mesh_transforms(mesh, &view_projection);
                    mesh.faces.par_iter().for_each(|face| {
                        draw_face(mesh, face, &transform, &world, config, frame_buffer);
                    });
                });
            });
        } else {
            for mesh in meshes {
                let (transform, world) = mesh_transforms(mesh, &view_projection);
                for face in &mesh.faces {
                    draw_face(mesh, face, &transform, &world, config, frame_buffer);
                }
            }
        }

        debug!(
            "渲染完成: {} 个网格, {} 个三角形, 用时 {:?}",
            meshes.len(),
            meshes.iter().map(|m| m.faces.len()).sum::<usize>(),
            start_time.elapsed()
        );
        Ok(())
    }

    /// 把颜色缓冲区交给显示端并请求重绘
    pub fn present(&self, target: &mut dyn PresentTarget) -> Result<()> {
        let bytes = self.frame_buffer.color_bytes();
        if bytes.len() != self.width() * self.height() * 4 {
            return Err(RenderError::InvalidConfiguration(format!(
                "颜色缓冲区长度 {} 与尺寸 {}x{} 不符",
                bytes.len(),
                self.width(),
                self.height()
            )));
        }
        target.write_pixels(&bytes, self.width(), self.height())?;
        target.invalidate()
    }
}

/// 返回 (投影·视图·模型, 模型) 矩阵
fn mesh_transforms(mesh: &Mesh, view_projection: &Matrix4<f32>) -> (Matrix4<f32>, Matrix4<f32>) {
    let world = TransformFactory::world(&mesh.position, &mesh.rotation);
    (view_projection * world, world)
}

fn draw_face(
    mesh: &Mesh,
    face: &Face,
    transform: &Matrix4<f32>,
    world: &Matrix4<f32>,
    config: &RenderConfig,
    frame_buffer: &FrameBuffer,
) {
    let [a, b, c] = face.indices.map(|i| {
        GeometryProcessor::project_vertex(
            &mesh.vertices[i],
            transform,
            world,
            frame_buffer.width,
            frame_buffer.height,
        )
    });
    let triangle = TriangleData::new([a, b, c], config.base_color);
    rasterize_triangle(&triangle, &config.light, frame_buffer);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingTarget {
        pixels: Vec<u8>,
        size: (usize, usize),
        redraws: usize,
    }

    impl PresentTarget for RecordingTarget {
        fn write_pixels(&mut self, bgra: &[u8], width: usize, height: usize) -> Result<()> {
            self.pixels = bgra.to_vec();
            self.size = (width, height);
            Ok(())
        }

        fn invalidate(&mut self) -> Result<()> {
            self.redraws += 1;
            Ok(())
        }
    }

    #[test]
    fn zero_size_device_is_rejected() {
        assert!(matches!(
            Renderer::new(0, 10),
            Err(RenderError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn worker_count_follows_config() {
        let config = RenderConfig::default().with_worker_threads(3);
        let renderer = Renderer::with_config(8, 8, config).unwrap();
        assert_eq!(renderer.worker_count(), 3);
    }

    #[test]
    fn cube_draws_something_at_the_center() {
        let mut renderer = Renderer::new(64, 48).unwrap();
        renderer.clear(0, 0, 0, 255);
        let cube = Mesh::cube().with_rotation(nalgebra::Vector3::new(0.3, 0.4, 0.0));
        renderer
            .render(&Camera::default(), std::slice::from_ref(&cube))
            .unwrap();
        assert!(renderer.frame_buffer.depth_at(32, 24) < f32::MAX);
    }

    #[test]
    fn present_hands_over_full_frame() {
        let mut renderer = Renderer::new(5, 4).unwrap();
        renderer.clear(1, 2, 3, 4);
        let mut target = RecordingTarget::default();
        renderer.present(&mut target).unwrap();
        assert_eq!(target.pixels.len(), 5 * 4 * 4);
        assert_eq!(target.size, (5, 4));
        assert_eq!(target.redraws, 1);
        assert_eq!(&target.pixels[..4], &[3, 2, 1, 4]);
    }
}

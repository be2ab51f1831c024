use crate::error::{RenderError, Result};
use crate::io::render_settings::{RenderSettings, parse_color, parse_point3, parse_rgba_u8};
use crate::material_system::color::{Color, rgba};
use crate::material_system::light::Light;

/// 统一的渲染配置结构体，整合了所有渲染相关设置
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    // 投影相关设置
    /// 垂直视场角（弧度）
    pub fov: f32,
    pub near: f32,
    pub far: f32,

    // 着色和光照
    /// 模型基础颜色，乘以 NdotL 得到像素颜色
    pub base_color: Color,
    pub light: Light,

    /// 清屏颜色 (r,g,b,a)
    pub clear_color: [u8; 4],

    // 性能设置
    /// 是否启用多线程渲染
    pub use_multithreading: bool,
    /// 工作线程数，0 表示由 rayon 决定
    pub worker_threads: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            fov: 0.78,
            near: 0.01,
            far: 1.0,
            base_color: rgba(1.0, 1.0, 1.0, 1.0),
            light: Light::default(),
            clear_color: [0, 0, 0, 255],
            use_multithreading: true,
            worker_threads: 0,
        }
    }
}

impl RenderConfig {
    /// 从配置文件设置构建渲染配置
    pub fn from_settings(settings: &RenderSettings) -> Result<Self> {
        let invalid = |e: String| RenderError::InvalidConfiguration(e);

        let base_color = parse_color(&settings.base_color).map_err(invalid)?;
        let clear_color = parse_rgba_u8(&settings.clear_color).map_err(invalid)?;
        let light_position = parse_point3(&settings.light_position).map_err(invalid)?;

        Ok(Self::default()
            // --- 投影设置 ---
            .with_projection(settings.camera_fov, settings.camera_near, settings.camera_far)
            // --- 着色设置 ---
            .with_base_color(base_color)
            .with_light(Light::new(light_position))
            .with_clear_color(clear_color)
            // --- 性能设置 ---
            .with_multithreading(settings.use_multithreading)
            .with_worker_threads(settings.worker_threads))
    }

    // 构建器方法，便于链式配置
    pub fn with_projection(mut self, fov: f32, near: f32, far: f32) -> Self {
        self.fov = fov;
        self.near = near;
        self.far = far;
        self
    }

    pub fn with_base_color(mut self, base_color: Color) -> Self {
        self.base_color = base_color;
        self
    }

    pub fn with_light(mut self, light: Light) -> Self {
        self.light = light;
        self
    }

    pub fn with_clear_color(mut self, clear_color: [u8; 4]) -> Self {
        self.clear_color = clear_color;
        self
    }

    pub fn with_multithreading(mut self, use_multithreading: bool) -> Self {
        self.use_multithreading = use_multithreading;
        self
    }

    pub fn with_worker_threads(mut self, worker_threads: usize) -> Self {
        self.worker_threads = worker_threads;
        self
    }
}

use crate::material_system::color::{Color, rgba};
use nalgebra::{Point3, Vector3};

/// 纯数据结构，所有可通过TOML配置的渲染参数
///
/// 向量和颜色以逗号分隔的字符串保存，使用时再解析，
/// 这样配置文件里的写法和这里的字段一一对应。
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    // ===== 文件路径设置 =====
    /// 输入场景文件（.babylon 或 .obj）；为空时使用内置立方体
    pub scene: Option<String>,
    /// 输出文件的基础名称
    pub output: String,
    /// 输出图像的目录
    pub output_dir: String,

    // ===== 渲染基础设置 =====
    pub width: usize,
    pub height: usize,
    /// 启用多线程渲染
    pub use_multithreading: bool,
    /// 工作线程数，0 表示由 rayon 决定
    pub worker_threads: usize,
    /// 渲染帧数
    pub frames: usize,
    /// 是否额外保存深度图
    pub save_depth: bool,
    /// 清屏颜色，格式 "r,g,b,a"（0-255）
    pub clear_color: String,
    /// 模型基础颜色，格式 "r,g,b,a"（0-1）
    pub base_color: String,

    // ===== 相机设置 =====
    pub camera_from: String,
    pub camera_at: String,
    /// 垂直视场角（弧度）
    pub camera_fov: f32,
    pub camera_near: f32,
    pub camera_far: f32,

    // ===== 光照设置 =====
    /// 点光源位置，格式 "x,y,z"
    pub light_position: String,

    // ===== 动画设置 =====
    /// 每帧叠加到所有网格上的旋转增量（弧度），格式 "x,y,z"
    pub rotation_step: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            scene: None,
            output: "frame".to_string(),
            output_dir: "output_rust".to_string(),

            width: 640,
            height: 480,
            use_multithreading: true,
            worker_threads: 0,
            frames: 1,
            save_depth: false,
            clear_color: "0,0,0,255".to_string(),
            base_color: "1,1,1,1".to_string(),

            camera_from: "0,0,10".to_string(),
            camera_at: "0,0,0".to_string(),
            camera_fov: 0.78,
            camera_near: 0.01,
            camera_far: 1.0,

            light_position: "0,10,10".to_string(),

            rotation_step: "0.01,0.01,0".to_string(),
        }
    }
}

fn parse_floats<const N: usize>(s: &str) -> Result<[f32; N], String> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != N {
        return Err(format!("需要{}个逗号分隔的值: '{}'", N, s));
    }
    let mut values = [0.0; N];
    for (value, part) in values.iter_mut().zip(&parts) {
        *value = part
            .trim()
            .parse::<f32>()
            .map_err(|e| format!("无效数字 '{}': {}", part, e))?;
    }
    Ok(values)
}

/// 辅助函数用于解析逗号分隔的浮点数
pub fn parse_vec3(s: &str) -> Result<Vector3<f32>, String> {
    let [x, y, z] = parse_floats::<3>(s)?;
    Ok(Vector3::new(x, y, z))
}

pub fn parse_point3(s: &str) -> Result<Point3<f32>, String> {
    parse_vec3(s).map(Point3::from)
}

/// 解析 0-1 范围的 "r,g,b,a" 颜色
pub fn parse_color(s: &str) -> Result<Color, String> {
    let [r, g, b, a] = parse_floats::<4>(s)?;
    Ok(rgba(r, g, b, a))
}

/// 解析 0-255 范围的 "r,g,b,a" 字节颜色
pub fn parse_rgba_u8(s: &str) -> Result<[u8; 4], String> {
    let mut bytes = [0u8; 4];
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 4 {
        return Err(format!("需要4个逗号分隔的值: '{}'", s));
    }
    for (byte, part) in bytes.iter_mut().zip(&parts) {
        *byte = part
            .trim()
            .parse::<u8>()
            .map_err(|e| format!("无效颜色分量 '{}': {}", part, e))?;
    }
    Ok(bytes)
}

impl RenderSettings {
    /// 验证渲染参数
    pub fn validate(&self) -> Result<(), String> {
        if self.width == 0 || self.height == 0 {
            return Err("错误: 图像宽度和高度必须大于0".to_string());
        }

        if self.output_dir.trim().is_empty() {
            return Err("错误: 输出目录不能为空".to_string());
        }

        if self.output.trim().is_empty() {
            return Err("错误: 输出文件名不能为空".to_string());
        }

        if let Some(scene) = &self.scene {
            if !std::path::Path::new(scene).exists() {
                return Err(format!("错误: 找不到场景文件 '{}'", scene));
            }
        }

        if !(self.camera_near > 0.0 && self.camera_far > self.camera_near) {
            return Err(format!(
                "错误: 近远裁剪面无效 (near={}, far={})",
                self.camera_near, self.camera_far
            ));
        }

        if !(self.camera_fov > 0.0 && self.camera_fov < std::f32::consts::PI) {
            return Err(format!("错误: 视场角必须在 (0, π) 之间，当前为 {}", self.camera_fov));
        }

        // 验证向量和颜色格式
        let vectors = [
            ("相机位置", &self.camera_from),
            ("相机目标", &self.camera_at),
            ("光源位置", &self.light_position),
            ("旋转增量", &self.rotation_step),
        ];
        for (label, value) in vectors {
            parse_vec3(value).map_err(|e| format!("错误: {}格式不正确，应为 x,y,z 格式: {}", label, e))?;
        }

        parse_rgba_u8(&self.clear_color).map_err(|e| format!("错误: 清屏颜色格式不正确: {}", e))?;
        parse_color(&self.base_color).map_err(|e| format!("错误: 基础颜色格式不正确: {}", e))?;

        Ok(())
    }
}

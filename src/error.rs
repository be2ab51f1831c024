use std::fmt;

/// 渲染器统一错误类型
#[derive(Debug)]
pub enum RenderError {
    /// 设备尺寸非法（宽或高为0，或缓冲区大小溢出）
    InvalidConfiguration(String),
    /// 面索引越界
    InvalidMesh {
        mesh: String,
        face: usize,
        index: usize,
        vertex_count: usize,
    },
    /// 线程池创建失败
    ThreadPool(String),
    /// 模型导入失败
    Import(String),
    /// 配置文件解析失败
    Config(String),
    Io(std::io::Error),
    Image(image::ImageError),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RenderError::InvalidConfiguration(msg) => write!(f, "无效的设备配置: {}", msg),
            RenderError::InvalidMesh {
                mesh,
                face,
                index,
                vertex_count,
            } => write!(
                f,
                "网格 '{}' 的面 {} 引用了越界的顶点索引 {} (顶点数 {})",
                mesh, face, index, vertex_count
            ),
            RenderError::ThreadPool(msg) => write!(f, "无法创建渲染线程池: {}", msg),
            RenderError::Import(msg) => write!(f, "模型导入失败: {}", msg),
            RenderError::Config(msg) => write!(f, "配置错误: {}", msg),
            RenderError::Io(e) => write!(f, "IO错误: {}", e),
            RenderError::Image(e) => write!(f, "图像错误: {}", e),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Io(e) => Some(e),
            RenderError::Image(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RenderError {
    fn from(e: std::io::Error) -> Self {
        RenderError::Io(e)
    }
}

impl From<image::ImageError> for RenderError {
    fn from(e: image::ImageError) -> Self {
        RenderError::Image(e)
    }
}

impl From<serde_json::Error> for RenderError {
    fn from(e: serde_json::Error) -> Self {
        RenderError::Import(format!("解析JSON失败: {}", e))
    }
}

impl From<toml::de::Error> for RenderError {
    fn from(e: toml::de::Error) -> Self {
        RenderError::Config(format!("解析TOML失败: {}", e))
    }
}

impl From<rayon::ThreadPoolBuildError> for RenderError {
    fn from(e: rayon::ThreadPoolBuildError) -> Self {
        RenderError::ThreadPool(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RenderError>;

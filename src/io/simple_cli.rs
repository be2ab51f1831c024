use crate::error::Result;
use crate::io::config_loader::TomlConfigLoader;
use crate::io::render_settings::RenderSettings;
use clap::Parser;
use log::info;

/// 极简CLI - 以配置文件为主，少量常用参数可直接覆盖
#[derive(Parser, Debug)]
#[command(name = "soft_render")]
#[command(about = "TOML驱动的CPU软件光栅化渲染器")]
pub struct SimpleCli {
    /// 配置文件路径（TOML格式）
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<String>,

    /// 场景文件（.babylon 或 .obj），覆盖配置文件中的设置
    #[arg(short, long, value_name = "FILE")]
    pub scene: Option<String>,

    /// 渲染帧数
    #[arg(short, long)]
    pub frames: Option<usize>,

    /// 工作线程数（0 = 自动）
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// 输出目录
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<String>,

    /// 使用示例配置（临时创建并加载）
    #[arg(long)]
    pub use_example_config: bool,
}

impl SimpleCli {
    /// 解析进程参数并返回最终的 RenderSettings
    pub fn process() -> Result<RenderSettings> {
        Self::parse().into_settings()
    }

    pub fn into_settings(self) -> Result<RenderSettings> {
        let mut settings = if self.use_example_config {
            let temp_config_path = "temp_example_config.toml";
            TomlConfigLoader::create_example_config(temp_config_path)?;
            info!("已创建临时示例配置: {}", temp_config_path);
            // 保留文件，用户可以当模板
            TomlConfigLoader::load_from_file(temp_config_path)?
        } else if let Some(config_path) = &self.config {
            info!("加载配置文件: {}", config_path);
            TomlConfigLoader::load_from_file(config_path)?
        } else {
            info!("使用默认设置");
            RenderSettings::default()
        };

        // 命令行参数优先于配置文件
        if let Some(scene) = self.scene {
            settings.scene = Some(scene);
        }
        if let Some(frames) = self.frames {
            settings.frames = frames;
        }
        if let Some(threads) = self.threads {
            settings.worker_threads = threads;
        }
        if let Some(output_dir) = self.output_dir {
            settings.output_dir = output_dir;
        }

        Ok(settings)
    }
}

use crate::error::{RenderError, Result};
use crate::io::render_settings::RenderSettings;
use log::warn;
use std::path::Path;
use toml::Value;

/// TOML配置管理器 - 统一处理所有配置的读写
pub struct TomlConfigLoader;

impl TomlConfigLoader {
    /// 从TOML文件加载完整配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<RenderSettings> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            RenderError::Config(format!(
                "读取配置文件 '{}' 失败: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::load_from_content(&content)
    }

    /// 从TOML内容字符串加载配置
    pub fn load_from_content(content: &str) -> Result<RenderSettings> {
        let toml_value: Value = toml::from_str(content)?;
        Self::parse_toml_to_settings(&toml_value)
    }

    /// 保存配置到TOML文件
    pub fn save_to_file<P: AsRef<Path>>(settings: &RenderSettings, path: P) -> Result<()> {
        let toml_content = Self::settings_to_toml(settings);
        std::fs::write(path, toml_content)?;
        Ok(())
    }

    /// 生成带默认值的示例配置文件
    pub fn create_example_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let settings = RenderSettings {
            frames: 60,
            ..Default::default()
        };
        Self::save_to_file(&settings, path)
    }

    // ===== TOML -> RenderSettings 转换 =====

    fn parse_toml_to_settings(toml: &Value) -> Result<RenderSettings> {
        let mut settings = RenderSettings::default();

        // [files] 部分
        if let Some(files) = toml.get("files").and_then(|v| v.as_table()) {
            Self::parse_files_section(&mut settings, files);
        }

        // [render] 部分
        if let Some(render) = toml.get("render").and_then(|v| v.as_table()) {
            Self::parse_render_section(&mut settings, render)?;
        }

        // [camera] 部分
        if let Some(camera) = toml.get("camera").and_then(|v| v.as_table()) {
            Self::parse_camera_section(&mut settings, camera);
        }

        // [lighting] 部分
        if let Some(lighting) = toml.get("lighting").and_then(|v| v.as_table()) {
            if let Some(position) = lighting.get("light_position").and_then(|v| v.as_str()) {
                settings.light_position = position.to_string();
            }
        }

        // [animation] 部分
        if let Some(animation) = toml.get("animation").and_then(|v| v.as_table()) {
            if let Some(step) = animation.get("rotation_step").and_then(|v| v.as_str()) {
                settings.rotation_step = step.to_string();
            }
        }

        if let Some(table) = toml.as_table() {
            for key in table.keys() {
                if !["files", "render", "camera", "lighting", "animation"].contains(&key.as_str()) {
                    warn!("忽略未知的配置段 [{}]", key);
                }
            }
        }

        settings.validate().map_err(RenderError::Config)?;
        Ok(settings)
    }

    // ===== 各个section的解析方法 =====

    fn parse_files_section(settings: &mut RenderSettings, files: &toml::Table) {
        if let Some(scene) = files.get("scene").and_then(|v| v.as_str()) {
            settings.scene = Some(scene.to_string());
        }
        if let Some(output) = files.get("output").and_then(|v| v.as_str()) {
            settings.output = output.to_string();
        }
        if let Some(output_dir) = files.get("output_dir").and_then(|v| v.as_str()) {
            settings.output_dir = output_dir.to_string();
        }
    }

    fn parse_render_section(settings: &mut RenderSettings, render: &toml::Table) -> Result<()> {
        if let Some(width) = get_usize(render, "width")? {
            settings.width = width;
        }
        if let Some(height) = get_usize(render, "height")? {
            settings.height = height;
        }
        if let Some(use_multithreading) =
            render.get("use_multithreading").and_then(|v| v.as_bool())
        {
            settings.use_multithreading = use_multithreading;
        }
        if let Some(worker_threads) = get_usize(render, "worker_threads")? {
            settings.worker_threads = worker_threads;
        }
        if let Some(frames) = get_usize(render, "frames")? {
            settings.frames = frames;
        }
        if let Some(save_depth) = render.get("save_depth").and_then(|v| v.as_bool()) {
            settings.save_depth = save_depth;
        }
        if let Some(clear_color) = render.get("clear_color").and_then(|v| v.as_str()) {
            settings.clear_color = clear_color.to_string();
        }
        if let Some(base_color) = render.get("base_color").and_then(|v| v.as_str()) {
            settings.base_color = base_color.to_string();
        }
        Ok(())
    }

    fn parse_camera_section(settings: &mut RenderSettings, camera: &toml::Table) {
        if let Some(from) = camera.get("from").and_then(|v| v.as_str()) {
            settings.camera_from = from.to_string();
        }
        if let Some(at) = camera.get("at").and_then(|v| v.as_str()) {
            settings.camera_at = at.to_string();
        }
        if let Some(fov) = get_f32(camera, "fov") {
            settings.camera_fov = fov;
        }
        if let Some(near) = get_f32(camera, "near") {
            settings.camera_near = near;
        }
        if let Some(far) = get_f32(camera, "far") {
            settings.camera_far = far;
        }
    }

    // ===== RenderSettings -> TOML 转换 =====

    fn settings_to_toml(settings: &RenderSettings) -> String {
        let mut content = String::new();

        content.push_str("# 软件光栅化渲染器配置文件\n\n");

        // [files] 部分
        content.push_str("[files]\n");
        if let Some(scene) = &settings.scene {
            content.push_str(&format!("scene = \"{}\"\n", scene));
        } else {
            content.push_str("# scene = \"path/to/model.babylon\"  # 也支持 .obj；不设置则渲染内置立方体\n");
        }
        content.push_str(&format!("output = \"{}\"\n", settings.output));
        content.push_str(&format!("output_dir = \"{}\"\n", settings.output_dir));
        content.push('\n');

        // [render] 部分
        content.push_str("[render]\n");
        content.push_str(&format!("width = {}\n", settings.width));
        content.push_str(&format!("height = {}\n", settings.height));
        content.push_str(&format!(
            "use_multithreading = {}\n",
            settings.use_multithreading
        ));
        content.push_str(&format!(
            "worker_threads = {}  # 0 = 自动\n",
            settings.worker_threads
        ));
        content.push_str(&format!("frames = {}\n", settings.frames));
        content.push_str(&format!("save_depth = {}\n", settings.save_depth));
        content.push_str(&format!("clear_color = \"{}\"\n", settings.clear_color));
        content.push_str(&format!("base_color = \"{}\"\n", settings.base_color));
        content.push('\n');

        // [camera] 部分
        content.push_str("[camera]\n");
        content.push_str(&format!("from = \"{}\"\n", settings.camera_from));
        content.push_str(&format!("at = \"{}\"\n", settings.camera_at));
        content.push_str(&format!("fov = {:?}\n", settings.camera_fov));
        content.push_str(&format!("near = {:?}\n", settings.camera_near));
        content.push_str(&format!("far = {:?}\n", settings.camera_far));
        content.push('\n');

        // [lighting] 部分
        content.push_str("[lighting]\n");
        content.push_str(&format!(
            "light_position = \"{}\"\n",
            settings.light_position
        ));
        content.push('\n');

        // [animation] 部分
        content.push_str("[animation]\n");
        content.push_str(&format!("rotation_step = \"{}\"\n", settings.rotation_step));

        content
    }
}

fn get_usize(table: &toml::Table, key: &str) -> Result<Option<usize>> {
    match table.get(key).and_then(|v| v.as_integer()) {
        Some(value) => usize::try_from(value)
            .map(Some)
            .map_err(|_| RenderError::Config(format!("{} 不能为负数: {}", key, value))),
        None => Ok(None),
    }
}

/// 同时接受 `fov = 1` 和 `fov = 1.0` 两种写法
fn get_f32(table: &toml::Table, key: &str) -> Option<f32> {
    table.get(key).and_then(|v| {
        v.as_float()
            .or_else(|| v.as_integer().map(|i| i as f64))
            .map(|f| f as f32)
    })
}

use crate::core::renderer::PresentTarget;
use crate::error::{RenderError, Result};
use crate::material_system::color::bgra_to_rgba;
use image::ColorType;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

/// 保存RGBA图像数据到PNG文件
pub fn save_image(path: &Path, rgba: &[u8], width: usize, height: usize) -> Result<()> {
    let (w, h) = image_dimensions(width, height)?;
    image::save_buffer(path, rgba, w, h, ColorType::Rgba8)?;
    info!("图像已保存到 {}", path.display());
    Ok(())
}

fn image_dimensions(width: usize, height: usize) -> Result<(u32, u32)> {
    match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) => Ok((w, h)),
        _ => Err(RenderError::InvalidConfiguration(format!(
            "图像尺寸 {}x{} 超出 PNG 范围",
            width, height
        ))),
    }
}

/// 将深度缓冲数据归一化到 [0, 1]
///
/// 未被写入过的像素（`f32::MAX`）和非有限值映射为 1.0（最远）。
/// 其余深度按实际最小/最大值线性映射。
pub fn normalize_depth(depth_buffer: &[f32]) -> Vec<f32> {
    let is_written = |d: f32| d.is_finite() && d < f32::MAX;

    let (min_depth, max_depth) = depth_buffer
        .iter()
        .copied()
        .filter(|&d| is_written(d))
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), d| {
            (lo.min(d), hi.max(d))
        });

    if min_depth > max_depth {
        debug!("深度缓冲区中没有被写入的像素");
        return vec![1.0; depth_buffer.len()];
    }

    let range = max_depth - min_depth;
    let inv_range = if range > 1e-6 { 1.0 / range } else { 0.0 }; // 避免除以零

    depth_buffer
        .iter()
        .map(|&depth| {
            if is_written(depth) {
                ((depth - min_depth) * inv_range).clamp(0.0, 1.0)
            } else {
                1.0
            }
        })
        .collect()
}

/// 保存灰度深度图，越近越亮，背景为黑色
pub fn save_depth_map(
    path: &Path,
    depth_buffer: &[f32],
    width: usize,
    height: usize,
) -> Result<()> {
    let (w, h) = image_dimensions(width, height)?;
    let gray: Vec<u8> = normalize_depth(depth_buffer)
        .iter()
        .map(|&d| ((1.0 - d) * 255.0).round() as u8)
        .collect();
    image::save_buffer(path, &gray, w, h, ColorType::L8)?;
    info!("深度图已保存到 {}", path.display());
    Ok(())
}

/// 把每次 present 的画面依次保存为 `<output>_<帧号>.png`
pub struct ImageSequenceTarget {
    output_dir: PathBuf,
    output_name: String,
    frame_index: usize,
    pending: Option<(Vec<u8>, usize, usize)>,
}

impl ImageSequenceTarget {
    /// 创建输出目录（如不存在）
    pub fn new<P: AsRef<Path>>(output_dir: P, output_name: &str) -> Result<Self> {
        let output_dir = output_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&output_dir)?;
        Ok(Self {
            output_dir,
            output_name: output_name.to_string(),
            frame_index: 0,
            pending: None,
        })
    }

    /// 下一次重绘将写入的帧号
    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    pub fn frame_path(&self, frame_index: usize) -> PathBuf {
        self.output_dir
            .join(format!("{}_{}.png", self.output_name, frame_index))
    }

    pub fn depth_path(&self, frame_index: usize) -> PathBuf {
        self.output_dir
            .join(format!("{}_{}_depth.png", self.output_name, frame_index))
    }
}

impl PresentTarget for ImageSequenceTarget {
    fn write_pixels(&mut self, bgra: &[u8], width: usize, height: usize) -> Result<()> {
        if bgra.len() != width * height * 4 {
            return Err(RenderError::InvalidConfiguration(format!(
                "像素数据长度 {} 与尺寸 {}x{} 不符",
                bgra.len(),
                width,
                height
            )));
        }
        self.pending = Some((bgra_to_rgba(bgra), width, height));
        Ok(())
    }

    fn invalidate(&mut self) -> Result<()> {
        match self.pending.take() {
            Some((rgba, width, height)) => {
                let path = self.frame_path(self.frame_index);
                save_image(&path, &rgba, width, height)?;
                self.frame_index += 1;
            }
            None => warn!("没有待保存的像素数据，忽略重绘请求"),
        }
        Ok(())
    }
}

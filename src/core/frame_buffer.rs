use crate::error::{RenderError, Result};
use crate::material_system::color::{self, Color};
use atomic_float::AtomicF32;
use rayon::prelude::*;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Mutex, PoisonError};

/// 帧缓冲区实现，存储渲染结果
///
/// 三个数组的长度关系固定为：`color = 4 * depth = 4 * locks = 4 * width * height`。
/// 尺寸在创建时确定，之后不再改变。
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    /// 存储深度值，数值越小表示越近。清除后为 `f32::MAX`。
    depth_buffer: Vec<AtomicF32>,
    /// 存储 B,G,R,A 字节。使用原子类型以支持并行写入。
    color_buffer: Vec<AtomicU8>,
    /// 每个像素一把锁，保证“深度比较 + 写入”对同一像素是原子的
    pixel_locks: Vec<Mutex<()>>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidConfiguration(format!(
                "宽高必须为正数，当前为 {}x{}",
                width, height
            )));
        }
        let num_pixels = width
            .checked_mul(height)
            .filter(|n| n.checked_mul(4).is_some())
            .ok_or_else(|| {
                RenderError::InvalidConfiguration(format!("缓冲区尺寸溢出: {}x{}", width, height))
            })?;

        // 为深度缓冲区创建原子浮点数向量
        let depth_buffer = (0..num_pixels).map(|_| AtomicF32::new(f32::MAX)).collect();

        // 使用迭代器创建颜色缓冲区，避免使用vec!宏
        let color_buffer = (0..num_pixels * 4).map(|_| AtomicU8::new(0)).collect();

        let pixel_locks = (0..num_pixels).map(|_| Mutex::new(())).collect();

        Ok(FrameBuffer {
            width,
            height,
            depth_buffer,
            color_buffer,
            pixel_locks,
        })
    }

    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// 把所有像素设为 (b,g,r,a)，深度设为 `f32::MAX`
    ///
    /// 不得与 `write_pixel` 并发调用。
    pub fn clear(&self, r: u8, g: u8, b: u8, a: u8) {
        self.depth_buffer.par_iter().for_each(|atomic_depth| {
            atomic_depth.store(f32::MAX, Ordering::Relaxed);
        });

        self.color_buffer.par_chunks_exact(4).for_each(|pixel| {
            pixel[0].store(b, Ordering::Relaxed);
            pixel[1].store(g, Ordering::Relaxed);
            pixel[2].store(r, Ordering::Relaxed);
            pixel[3].store(a, Ordering::Relaxed);
        });
    }

    /// 带深度测试的像素写入，返回是否写入
    ///
    /// 已存深度严格小于 `z` 时丢弃；深度相等时后写入者覆盖。
    /// NaN 深度永远不会通过测试。越界坐标直接忽略。
    pub fn write_pixel(&self, x: usize, y: usize, z: f32, color: &Color) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let index = x + y * self.width;

        // 锁内只保护 `()`，中毒后数据不可能处于不一致状态
        let _guard = self.pixel_locks[index]
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let stored = self.depth_buffer[index].load(Ordering::Relaxed);
        if z.is_nan() || stored < z {
            return false;
        }
        self.depth_buffer[index].store(z, Ordering::Relaxed);

        let bgra = color::to_bgra_u8(color);
        let base = index * 4;
        for (channel, value) in self.color_buffer[base..base + 4].iter().zip(bgra) {
            channel.store(value, Ordering::Relaxed);
        }
        true
    }

    /// 获取颜色缓冲区的字节数据（B,G,R,A）
    pub fn color_bytes(&self) -> Vec<u8> {
        self.color_buffer
            .iter()
            .map(|atomic_color| atomic_color.load(Ordering::Relaxed))
            .collect()
    }

    /// 获取深度缓冲区的浮点数据
    pub fn depth_values(&self) -> Vec<f32> {
        self.depth_buffer
            .iter()
            .map(|atomic_depth| atomic_depth.load(Ordering::Relaxed))
            .collect()
    }

    pub fn depth_at(&self, x: usize, y: usize) -> f32 {
        self.depth_buffer[x + y * self.width].load(Ordering::Relaxed)
    }

    pub fn bgra_at(&self, x: usize, y: usize) -> [u8; 4] {
        let base = (x + y * self.width) * 4;
        [
            self.color_buffer[base].load(Ordering::Relaxed),
            self.color_buffer[base + 1].load(Ordering::Relaxed),
            self.color_buffer[base + 2].load(Ordering::Relaxed),
            self.color_buffer[base + 3].load(Ordering::Relaxed),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material_system::color::rgba;

    #[test]
    fn zero_dimensions_are_rejected() {
        assert!(matches!(
            FrameBuffer::new(0, 4),
            Err(RenderError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            FrameBuffer::new(4, 0),
            Err(RenderError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn overflowing_dimensions_are_rejected() {
        assert!(matches!(
            FrameBuffer::new(usize::MAX, 2),
            Err(RenderError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn buffer_lengths_match_dimensions() {
        let fb = FrameBuffer::new(5, 3).unwrap();
        assert_eq!(fb.pixel_count(), 15);
        assert_eq!(fb.color_bytes().len(), 60);
        assert_eq!(fb.depth_values().len(), 15);
    }

    #[test]
    fn clear_writes_bgra_and_max_depth() {
        let fb = FrameBuffer::new(3, 2).unwrap();
        fb.write_pixel(1, 1, 0.3, &rgba(1.0, 1.0, 1.0, 1.0));
        fb.clear(10, 20, 30, 40);
        for px in fb.color_bytes().chunks_exact(4) {
            assert_eq!(px, [30, 20, 10, 40]);
        }
        assert!(fb.depth_values().iter().all(|&d| d == f32::MAX));
    }

    #[test]
    fn closer_write_wins_farther_is_discarded() {
        let fb = FrameBuffer::new(2, 2).unwrap();
        fb.clear(0, 0, 0, 255);
        assert!(fb.write_pixel(0, 0, 0.5, &rgba(1.0, 0.0, 0.0, 1.0)));
        assert!(!fb.write_pixel(0, 0, 0.7, &rgba(0.0, 1.0, 0.0, 1.0)));
        assert_eq!(fb.bgra_at(0, 0), [0, 0, 255, 255]);
        assert!(fb.write_pixel(0, 0, 0.2, &rgba(0.0, 0.0, 1.0, 1.0)));
        assert_eq!(fb.bgra_at(0, 0), [255, 0, 0, 255]);
        assert_eq!(fb.depth_at(0, 0), 0.2);
    }

    #[test]
    fn equal_depth_is_overwritten() {
        let fb = FrameBuffer::new(1, 1).unwrap();
        fb.clear(0, 0, 0, 0);
        fb.write_pixel(0, 0, 0.5, &rgba(1.0, 0.0, 0.0, 1.0));
        assert!(fb.write_pixel(0, 0, 0.5, &rgba(0.0, 1.0, 0.0, 1.0)));
        assert_eq!(fb.bgra_at(0, 0), [0, 255, 0, 255]);
    }

    #[test]
    fn nan_depth_never_draws() {
        let fb = FrameBuffer::new(1, 1).unwrap();
        fb.clear(1, 2, 3, 4);
        assert!(!fb.write_pixel(0, 0, f32::NAN, &rgba(1.0, 1.0, 1.0, 1.0)));
        assert_eq!(fb.bgra_at(0, 0), [3, 2, 1, 4]);
        assert_eq!(fb.depth_at(0, 0), f32::MAX);
    }

    #[test]
    fn out_of_bounds_is_ignored() {
        let fb = FrameBuffer::new(2, 2).unwrap();
        fb.clear(0, 0, 0, 0);
        assert!(!fb.write_pixel(2, 0, 0.0, &rgba(1.0, 1.0, 1.0, 1.0)));
        assert!(!fb.write_pixel(0, 2, 0.0, &rgba(1.0, 1.0, 1.0, 1.0)));
        assert!(fb.color_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn concurrent_writes_keep_depth_and_color_consistent() {
        let fb = FrameBuffer::new(1, 1).unwrap();
        fb.clear(0, 0, 0, 0);
        // 颜色编码了写入时的深度，最终颜色必须与最终深度对应
        (0..2000u32).into_par_iter().rev().for_each(|i| {
            let z = i as f32;
            let shade = (i % 256) as f32 / 255.0;
            fb.write_pixel(0, 0, z, &rgba(shade, shade, shade, 1.0));
        });
        assert_eq!(fb.depth_at(0, 0), 0.0);
        assert_eq!(fb.bgra_at(0, 0), [0, 0, 0, 255]);
    }
}

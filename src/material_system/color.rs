use nalgebra::Vector4;

/// 线性RGBA颜色，各分量范围 [0.0, 1.0]
pub type Color = Vector4<f32>;

pub fn rgba(r: f32, g: f32, b: f32, a: f32) -> Color {
    Vector4::new(r, g, b, a)
}

/// 单个通道转换为字节，四舍五入并截断到 [0, 255]，NaN 映射为 0
#[inline]
pub fn channel_to_u8(value: f32) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

/// 转换为帧缓冲区使用的 B,G,R,A 字节顺序
#[inline]
pub fn to_bgra_u8(color: &Color) -> [u8; 4] {
    [
        channel_to_u8(color.z),
        channel_to_u8(color.y),
        channel_to_u8(color.x),
        channel_to_u8(color.w),
    ]
}

/// BGRA 字节流转换为 RGBA（用于图像保存）
pub fn bgra_to_rgba(bgra: &[u8]) -> Vec<u8> {
    bgra.chunks_exact(4)
        .flat_map(|px| [px[2], px[1], px[0], px[3]])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bgra_order_and_rounding() {
        let color = rgba(1.0, 0.5, 0.0, 1.0);
        assert_eq!(to_bgra_u8(&color), [0, 128, 255, 255]);
    }

    #[test]
    fn out_of_range_channels_saturate() {
        assert_eq!(channel_to_u8(2.0), 255);
        assert_eq!(channel_to_u8(-1.0), 0);
        assert_eq!(channel_to_u8(f32::NAN), 0);
    }

    #[test]
    fn swizzle_back_to_rgba() {
        let bgra = [1u8, 2, 3, 4, 5, 6, 7, 8];
        assert_eq!(bgra_to_rgba(&bgra), vec![3, 2, 1, 4, 7, 6, 5, 8]);
    }
}

//! 扫描线三角形填充
//!
//! 三个顶点按屏幕 Y 排序后，以中间顶点 v1 为界把三角形分成上下两半，
//! 每一行在两条边之间插值出左右端点，再在端点之间逐像素插值深度和光照强度。
//! 所有插值都在屏幕空间线性进行，不做透视校正。

use super::shading::compute_ndotl;
use super::triangle_data::{ShadedVertex, TriangleData};
use crate::core::frame_buffer::FrameBuffer;
use crate::material_system::color::Color;
use crate::material_system::light::Light;

#[inline]
fn interpolate(min: f32, max: f32, gradient: f32) -> f32 {
    min + (max - min) * gradient
}

/// 当前行在边 start->end 上的位置比例，水平边强制为 1
#[inline]
fn edge_gradient(y: f32, start: &ShadedVertex, end: &ShadedVertex) -> f32 {
    if start.screen.y != end.screen.y {
        (y - start.screen.y) / (end.screen.y - start.screen.y)
    } else {
        1.0
    }
}

/// 按屏幕 Y 升序排列，三次比较交换，Y 相同时保持原顺序
fn sort_by_screen_y(mut v: [ShadedVertex; 3]) -> [ShadedVertex; 3] {
    if v[0].screen.y > v[1].screen.y {
        v.swap(0, 1);
    }
    if v[1].screen.y > v[2].screen.y {
        v.swap(1, 2);
    }
    if v[0].screen.y > v[1].screen.y {
        v.swap(0, 1);
    }
    v
}

/// 光栅化单个三角形
///
/// 逐像素结果通过 `FrameBuffer::write_pixel` 做深度测试，
/// 因此可以在多个线程中同时对同一帧缓冲区调用。
pub fn rasterize_triangle(triangle: &TriangleData, light: &Light, frame_buffer: &FrameBuffer) {
    // 光照强度按顶点计算一次，与排序无关
    let shaded = triangle.vertices.map(|v| ShadedVertex {
        screen: v.screen,
        intensity: compute_ndotl(&v.world_position, &v.world_normal, &light.position),
    });
    let [v0, v1, v2] = sort_by_screen_y(shaded);
    let (p0, p1, p2) = (v0.screen, v1.screen, v2.screen);

    // 反斜率 dx/dy
    let slope_top = if p1.y - p0.y > 0.0 {
        (p1.x - p0.x) / (p1.y - p0.y)
    } else {
        0.0
    };
    let slope_bottom = if p2.y - p0.y > 0.0 {
        (p2.x - p0.x) / (p2.y - p0.y)
    } else {
        0.0
    };

    // 平顶三角形的 slope_top 没有意义，直接比较两个顶部顶点的 X
    let middle_on_right = if p1.y - p0.y > 0.0 {
        slope_top > slope_bottom
    } else {
        p1.x > p0.x
    };

    // 视口外的行不会产生任何像素，直接收窄循环范围
    let first_row = (p0.y as i64).max(0);
    let last_row = (p2.y as i64).min(frame_buffer.height as i64 - 1);

    // 平顶（包括零高度）三角形没有上半部分，所有行都走下半部分的边，
    // 水平边不会参与插值
    let has_upper_half = p1.y > p0.y;

    for y in first_row..=last_row {
        let upper_half = has_upper_half && (y as f32) < p1.y;
        let (left, right) = match (middle_on_right, upper_half) {
            (true, true) => ((&v0, &v2), (&v0, &v1)),
            (true, false) => ((&v0, &v2), (&v1, &v2)),
            (false, true) => ((&v0, &v1), (&v0, &v2)),
            (false, false) => ((&v1, &v2), (&v0, &v2)),
        };
        process_scanline(y, left, right, &triangle.base_color, frame_buffer);
    }
}

/// 在左边 `left` 与右边 `right` 之间填充第 `y` 行，右端点不包含
pub fn process_scanline(
    y: i64,
    left: (&ShadedVertex, &ShadedVertex),
    right: (&ShadedVertex, &ShadedVertex),
    base_color: &Color,
    frame_buffer: &FrameBuffer,
) {
    let row = y as f32;
    let gradient_left = edge_gradient(row, left.0, left.1);
    let gradient_right = edge_gradient(row, right.0, right.1);

    let start_x = interpolate(left.0.screen.x, left.1.screen.x, gradient_left) as i64;
    let end_x = interpolate(right.0.screen.x, right.1.screen.x, gradient_right) as i64;
    if end_x <= start_x || y < 0 || y >= frame_buffer.height as i64 {
        return;
    }

    let start_z = interpolate(left.0.screen.z, left.1.screen.z, gradient_left);
    let end_z = interpolate(right.0.screen.z, right.1.screen.z, gradient_right);
    let start_ndotl = interpolate(left.0.intensity, left.1.intensity, gradient_left);
    let end_ndotl = interpolate(right.0.intensity, right.1.intensity, gradient_right);

    // 端点差值在浮点数中计算，避免整数溢出
    let span = end_x as f32 - start_x as f32;
    let first_col = start_x.max(0);
    let last_col = end_x.min(frame_buffer.width as i64);

    for x in first_col..last_col {
        let gradient = (x as f32 - start_x as f32) / span;
        let z = interpolate(start_z, end_z, gradient);
        let ndotl = interpolate(start_ndotl, end_ndotl, gradient);
        frame_buffer.write_pixel(x as usize, y as usize, z, &(base_color * ndotl));
    }
}

use crate::material_system::color::Color;
use nalgebra::{Point3, Vector3};

/// 投影后的顶点，每帧生成，光栅化后丢弃
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedVertex {
    /// 屏幕坐标：x、y 为像素坐标，z 为深度（未重新归一化）
    pub screen: Point3<f32>,
    /// 世界空间位置，仅用于光照
    pub world_position: Point3<f32>,
    /// 世界空间法线，仅用于光照
    pub world_normal: Vector3<f32>,
}

impl ProjectedVertex {
    pub fn new(
        screen: Point3<f32>,
        world_position: Point3<f32>,
        world_normal: Vector3<f32>,
    ) -> Self {
        Self {
            screen,
            world_position,
            world_normal,
        }
    }
}

/// 已着色的屏幕空间顶点：扫描线插值只需要位置和光照强度
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadedVertex {
    pub screen: Point3<f32>,
    pub intensity: f32,
}

/// 三角形光栅化数据
#[derive(Debug, Clone)]
pub struct TriangleData {
    pub vertices: [ProjectedVertex; 3],
    pub base_color: Color,
}

impl TriangleData {
    pub fn new(vertices: [ProjectedVertex; 3], base_color: Color) -> Self {
        Self {
            vertices,
            base_color,
        }
    }
}

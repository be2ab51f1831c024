use nalgebra::Point3;

/// 点光源，整帧统一使用
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    /// 世界空间位置
    pub position: Point3<f32>,
}

impl Light {
    pub fn new(position: Point3<f32>) -> Self {
        Self { position }
    }
}

impl Default for Light {
    fn default() -> Self {
        Self::new(Point3::new(0.0, 10.0, 10.0))
    }
}

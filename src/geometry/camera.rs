use crate::geometry::transform::TransformFactory;
use nalgebra::{Matrix4, Point3, Vector3};

/// 相机，只保存视点和观察点；投影参数由渲染配置提供
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// 相机位置（眼睛位置）
    pub position: Point3<f32>,
    /// 相机观察点（目标位置）
    pub target: Point3<f32>,
}

impl Camera {
    pub fn new(position: Point3<f32>, target: Point3<f32>) -> Self {
        Self { position, target }
    }

    /// 视图矩阵（世界坐标 -> 相机坐标），上方向固定为 +Y
    pub fn view_matrix(&self) -> Matrix4<f32> {
        TransformFactory::view(&self.position, &self.target, &Vector3::y())
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Point3::new(0.0, 0.0, 10.0), Point3::origin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_camera_looks_at_origin_from_positive_z() {
        let camera = Camera::default();
        let p = camera.view_matrix().transform_point(&Point3::origin());
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.z, 10.0, epsilon = 1e-5);
    }

    #[test]
    fn up_stays_up_in_view_space() {
        let camera = Camera::default();
        let p = camera.view_matrix().transform_point(&Point3::new(0.0, 1.0, 0.0));
        assert!(p.y > 0.0);
    }
}

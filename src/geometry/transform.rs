use nalgebra::{Matrix4, Point3, Rotation3, Vector3};

/// 变换矩阵工厂，提供创建各种变换矩阵的静态方法
///
/// 所有矩阵均为列向量约定（`M * v`），坐标系为左手系：
/// 相机朝 +Z 看，+Y 向上。
pub struct TransformFactory;

impl TransformFactory {
    /// 创建绕X轴旋转的变换矩阵
    pub fn rotation_x(angle_rad: f32) -> Matrix4<f32> {
        Rotation3::from_axis_angle(&Vector3::x_axis(), angle_rad).to_homogeneous()
    }

    /// 创建绕Y轴旋转的变换矩阵
    pub fn rotation_y(angle_rad: f32) -> Matrix4<f32> {
        Rotation3::from_axis_angle(&Vector3::y_axis(), angle_rad).to_homogeneous()
    }

    /// 创建绕Z轴旋转的变换矩阵
    pub fn rotation_z(angle_rad: f32) -> Matrix4<f32> {
        Rotation3::from_axis_angle(&Vector3::z_axis(), angle_rad).to_homogeneous()
    }

    /// 按 yaw/pitch/roll 创建旋转矩阵
    ///
    /// 顶点先绕 Z 轴滚转，再绕 X 轴俯仰，最后绕 Y 轴偏航。
    pub fn rotation_yaw_pitch_roll(yaw: f32, pitch: f32, roll: f32) -> Matrix4<f32> {
        Self::rotation_y(yaw) * Self::rotation_x(pitch) * Self::rotation_z(roll)
    }

    /// 创建平移矩阵
    pub fn translation(translation: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new_translation(translation)
    }

    /// 创建模型（世界）矩阵：先旋转后平移
    ///
    /// `rotation` 的分量含义：x = pitch，y = yaw，z = roll（弧度）
    pub fn world(position: &Vector3<f32>, rotation: &Vector3<f32>) -> Matrix4<f32> {
        let rotation = Self::rotation_yaw_pitch_roll(rotation.y, rotation.x, rotation.z);
        Self::translation(position) * rotation
    }

    /// 创建左手系视图矩阵 (lookAt)
    pub fn view(eye: &Point3<f32>, target: &Point3<f32>, up: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::look_at_lh(eye, target, up)
    }

    /// 创建左手系透视投影矩阵，深度映射到 [0, 1]（near -> 0，far -> 1）
    #[rustfmt::skip]
    pub fn perspective(aspect_ratio: f32, fov_y_rad: f32, near: f32, far: f32) -> Matrix4<f32> {
        let y_scale = 1.0 / (fov_y_rad * 0.5).tan();
        let x_scale = y_scale / aspect_ratio;
        let q = far / (far - near);

        Matrix4::new(
            x_scale, 0.0,     0.0, 0.0,
            0.0,     y_scale, 0.0, 0.0,
            0.0,     0.0,     q,   -near * q,
            0.0,     0.0,     1.0, 0.0,
        )
    }
}

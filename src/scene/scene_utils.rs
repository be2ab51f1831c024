use crate::geometry::camera::Camera;
use crate::scene::mesh::Mesh;
use nalgebra::Vector3;

/// 场景：相机和网格列表
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub camera: Camera,
    pub meshes: Vec<Mesh>,
}

impl Scene {
    pub fn new(camera: Camera, meshes: Vec<Mesh>) -> Self {
        Self { camera, meshes }
    }

    /// 为所有网格累加一帧的旋转增量（弧度）
    ///
    /// 只能在两次渲染之间调用
    pub fn advance_rotation(&mut self, step: &Vector3<f32>) {
        for mesh in &mut self.meshes {
            mesh.rotation += step;
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(|m| m.faces.len()).sum()
    }
}

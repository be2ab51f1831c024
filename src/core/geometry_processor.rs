use crate::core::rasterizer::ProjectedVertex;
use crate::scene::mesh::Vertex;
use nalgebra::{Matrix4, Point3};

/// 几何处理器，负责把模型空间顶点投影到屏幕空间
pub struct GeometryProcessor;

impl GeometryProcessor {
    /// 投影单个顶点
    ///
    /// `transform` 为 投影·视图·模型 组合矩阵（含透视除法），
    /// `world` 只用于得到光照所需的世界空间位置和法线。
    /// 不做任何裁剪：相机后方或视口外的顶点照常输出。
    pub fn project_vertex(
        vertex: &Vertex,
        transform: &Matrix4<f32>,
        world: &Matrix4<f32>,
        width: usize,
        height: usize,
    ) -> ProjectedVertex {
        let clip = transform.transform_point(&vertex.position);

        let (w, h) = (width as f32, height as f32);
        // 屏幕原点在左上角，Y 轴向下
        let screen = Point3::new(clip.x * w + w / 2.0, -clip.y * h + h / 2.0, clip.z);

        ProjectedVertex {
            screen,
            world_position: world.transform_point(&vertex.position),
            world_normal: world.transform_vector(&vertex.normal),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::camera::Camera;
    use crate::scene::mesh::Mesh;
    use crate::geometry::transform::TransformFactory;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;
    use std::f32::consts::TAU;

    const WIDTH: usize = 640;
    const HEIGHT: usize = 480;

    fn transforms(mesh: &Mesh) -> (Matrix4<f32>, Matrix4<f32>) {
        let camera = Camera::default();
        let view = camera.view_matrix();
        let projection =
            TransformFactory::perspective(WIDTH as f32 / HEIGHT as f32, 0.78, 0.01, 1.0);
        let world = TransformFactory::world(&mesh.position, &mesh.rotation);
        (projection * view * world, world)
    }

    fn project_mesh(
        mesh: &Mesh,
        transform: &Matrix4<f32>,
        world: &Matrix4<f32>,
    ) -> Vec<ProjectedVertex> {
        mesh.vertices
            .iter()
            .map(|v| GeometryProcessor::project_vertex(v, transform, world, WIDTH, HEIGHT))
            .collect()
    }

    #[test]
    fn origin_projects_to_screen_center() {
        let vertex = Vertex::new(Point3::origin(), Vector3::z());
        let mesh = Mesh::cube();
        let (transform, world) = transforms(&mesh);
        let p = GeometryProcessor::project_vertex(&vertex, &transform, &world, WIDTH, HEIGHT);
        assert_relative_eq!(p.screen.x, 320.0, epsilon = 1e-3);
        assert_relative_eq!(p.screen.y, 240.0, epsilon = 1e-3);
    }

    #[test]
    fn screen_y_grows_downwards() {
        let mesh = Mesh::cube();
        let (transform, world) = transforms(&mesh);
        let up = Vertex::new(Point3::new(0.0, 1.0, 0.0), Vector3::y());
        let p = GeometryProcessor::project_vertex(&up, &transform, &world, WIDTH, HEIGHT);
        assert!(p.screen.y < 240.0);
    }

    #[test]
    fn world_data_ignores_camera() {
        let mesh = Mesh::cube().with_position(Vector3::new(2.0, 0.0, 0.0));
        let (transform, world) = transforms(&mesh);
        let vertex = Vertex::new(Point3::new(1.0, 0.0, 0.0), Vector3::x());
        let p = GeometryProcessor::project_vertex(&vertex, &transform, &world, WIDTH, HEIGHT);
        assert_relative_eq!(p.world_position, Point3::new(3.0, 0.0, 0.0), epsilon = 1e-6);
        // 法线不受平移影响
        assert_relative_eq!(p.world_normal, Vector3::x(), epsilon = 1e-6);
    }

    #[test]
    fn full_turn_reproduces_screen_coordinates() {
        let base = Mesh::cube().with_position(Vector3::new(0.5, -0.25, 1.0));
        let (transform, world) = transforms(&base);
        let reference = project_mesh(&base, &transform, &world);

        for axis in [Vector3::x(), Vector3::y(), Vector3::z()] {
            let turned = base.clone().with_rotation(axis * TAU);
            let (transform, world) = transforms(&turned);
            let projected = project_mesh(&turned, &transform, &world);
            for (a, b) in reference.iter().zip(&projected) {
                assert_relative_eq!(a.screen, b.screen, epsilon = 1e-2);
            }
        }
    }
}

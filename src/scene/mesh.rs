use crate::error::{RenderError, Result};
use nalgebra::{Point3, Vector3};

/// 模型空间顶点，加载后不再修改
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
}

impl Vertex {
    pub fn new(position: Point3<f32>, normal: Vector3<f32>) -> Self {
        Self { position, normal }
    }
}

/// 三角形面，三个顶点索引；不要求特定绕序
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    pub indices: [usize; 3],
}

impl Face {
    pub fn new(v0: usize, v1: usize, v2: usize) -> Self {
        Self {
            indices: [v0, v1, v2],
        }
    }
}

/// 网格：顶点、面以及世界空间中的位置和朝向
#[derive(Debug, Clone)]
pub struct Mesh {
    pub name: String,
    pub vertices: Vec<Vertex>,
    pub faces: Vec<Face>,
    pub position: Vector3<f32>,
    /// 欧拉角（弧度）：x = pitch，y = yaw，z = roll
    pub rotation: Vector3<f32>,
}

impl Mesh {
    /// 创建网格并校验面索引
    pub fn new(name: impl Into<String>, vertices: Vec<Vertex>, faces: Vec<Face>) -> Result<Self> {
        let mesh = Self {
            name: name.into(),
            vertices,
            faces,
            position: Vector3::zeros(),
            rotation: Vector3::zeros(),
        };
        mesh.validate()?;
        Ok(mesh)
    }

    pub fn with_position(mut self, position: Vector3<f32>) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: Vector3<f32>) -> Self {
        self.rotation = rotation;
        self
    }

    /// 检查所有面索引都小于顶点数
    pub fn validate(&self) -> Result<()> {
        let vertex_count = self.vertices.len();
        for (face_idx, face) in self.faces.iter().enumerate() {
            if let Some(&index) = face.indices.iter().find(|&&i| i >= vertex_count) {
                return Err(RenderError::InvalidMesh {
                    mesh: self.name.clone(),
                    face: face_idx,
                    index,
                    vertex_count,
                });
            }
        }
        Ok(())
    }

    /// 以原点为中心、边长为2的立方体，顶点法线取角点方向
    pub fn cube() -> Self {
        let corners = [
            Point3::new(-1.0, 1.0, 1.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(-1.0, -1.0, 1.0),
            Point3::new(1.0, -1.0, 1.0),
            Point3::new(-1.0, 1.0, -1.0),
            Point3::new(1.0, 1.0, -1.0),
            Point3::new(1.0, -1.0, -1.0),
            Point3::new(-1.0, -1.0, -1.0),
        ];
        let vertices = corners
            .iter()
            .map(|p| Vertex::new(*p, p.coords.normalize()))
            .collect();

        let faces = [
            [0, 1, 2],
            [1, 2, 3],
            [1, 3, 6],
            [1, 5, 6],
            [0, 1, 4],
            [1, 4, 5],
            [2, 3, 7],
            [3, 6, 7],
            [0, 2, 7],
            [0, 4, 7],
            [4, 5, 6],
            [4, 6, 7],
        ]
        .iter()
        .map(|&[a, b, c]| Face::new(a, b, c))
        .collect();

        Self {
            name: "Cube".to_string(),
            vertices,
            faces,
            position: Vector3::zeros(),
            rotation: Vector3::zeros(),
        }
    }
}

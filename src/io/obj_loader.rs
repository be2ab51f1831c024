use crate::error::{RenderError, Result};
use crate::scene::mesh::{Face, Mesh, Vertex};
use log::{info, warn};
use nalgebra::{Point3, Vector3};
use std::io::BufRead;
use std::path::Path;

/// 生成平滑的顶点法线，通过平均面法线实现
fn generate_smooth_vertex_normals(
    vertices: &[Point3<f32>],
    faces: &[Face],
) -> Vec<Vector3<f32>> {
    let mut vertex_normals = vec![Vector3::zeros(); vertices.len()];

    // 1. 计算面法线并累加到顶点
    for face in faces {
        let [i0, i1, i2] = face.indices;
        let edge1 = vertices[i1] - vertices[i0];
        let edge2 = vertices[i2] - vertices[i0];
        // 叉积未归一化，面积较大的三角形权重更大
        let face_normal = edge1.cross(&edge2);

        vertex_normals[i0] += face_normal;
        vertex_normals[i1] += face_normal;
        vertex_normals[i2] += face_normal;
    }

    // 2. 归一化顶点法线
    let mut zero_norm_count = 0;
    for normal in vertex_normals.iter_mut() {
        if normal.norm_squared() > 1e-12 {
            normal.normalize_mut();
        } else {
            // 未使用的顶点或只属于退化面的顶点
            *normal = Vector3::y();
            zero_norm_count += 1;
        }
    }

    if zero_norm_count > 0 {
        warn!(
            "{} 个顶点的法线为零，设置为默认值 [0, 1, 0]",
            zero_norm_count
        );
    }

    vertex_normals
}

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        triangulate: true,  // 将所有面转换为三角形
        single_index: true, // 位置和法线共用同一索引
        ..Default::default()
    }
}

/// 从文件加载 OBJ 模型，每个 OBJ 对象对应一个网格
pub fn load_obj_model<P: AsRef<Path>>(path: P) -> Result<Vec<Mesh>> {
    let path = path.as_ref();
    info!("加载 OBJ 文件: {:?}", path);

    let (models, _materials) = tobj::load_obj(path, &load_options())
        .map_err(|e| RenderError::Import(format!("加载 OBJ '{}' 失败: {}", path.display(), e)))?;

    convert_models(models)
}

/// 从任意输入流加载 OBJ，忽略材质库
pub fn load_obj_from_reader<R: BufRead>(reader: &mut R) -> Result<Vec<Mesh>> {
    let (models, _materials) =
        tobj::load_obj_buf(reader, &load_options(), |_| Err(tobj::LoadError::OpenFileFailed))
            .map_err(|e| RenderError::Import(format!("解析 OBJ 失败: {}", e)))?;

    convert_models(models)
}

fn convert_models(models: Vec<tobj::Model>) -> Result<Vec<Mesh>> {
    if models.is_empty() {
        return Err(RenderError::Import("OBJ 文件中没有任何对象".to_string()));
    }

    let mut meshes = Vec::with_capacity(models.len());
    for (model_idx, model) in models.into_iter().enumerate() {
        let name = if model.name.is_empty() {
            format!("mesh_{}", model_idx)
        } else {
            model.name
        };
        let source = model.mesh;

        let positions: Vec<Point3<f32>> = source
            .positions
            .chunks_exact(3)
            .map(|p| Point3::new(p[0], p[1], p[2]))
            .collect();

        let faces: Vec<Face> = source
            .indices
            .chunks_exact(3)
            .map(|f| Face::new(f[0] as usize, f[1] as usize, f[2] as usize))
            .collect();

        // 先用零法线建网格完成索引校验，生成法线时按索引直接访问
        let vertices = positions
            .iter()
            .map(|p| Vertex::new(*p, Vector3::zeros()))
            .collect();
        let mut mesh = Mesh::new(name, vertices, faces)?;

        let normals: Vec<Vector3<f32>> = if source.normals.len() == source.positions.len() {
            source
                .normals
                .chunks_exact(3)
                .map(|n| {
                    let normal = Vector3::new(n[0], n[1], n[2]);
                    normal.try_normalize(f32::EPSILON).unwrap_or_else(|| {
                        warn!("网格 '{}' 中存在零长度法线", mesh.name);
                        normal
                    })
                })
                .collect()
        } else {
            info!("网格 '{}' 缺少法线，生成平滑法线", mesh.name);
            generate_smooth_vertex_normals(&positions, &mesh.faces)
        };

        for (vertex, normal) in mesh.vertices.iter_mut().zip(normals) {
            vertex.normal = normal;
        }

        info!(
            "网格 '{}': {} 个顶点, {} 个三角形",
            mesh.name,
            mesh.vertices.len(),
            mesh.faces.len()
        );
        meshes.push(mesh);
    }

    Ok(meshes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Cursor;

    const QUAD: &str = "\
o quad
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
f 1 2 3 4
";

    #[test]
    fn quad_is_triangulated_with_generated_normals() {
        let meshes = load_obj_from_reader(&mut Cursor::new(QUAD)).unwrap();
        assert_eq!(meshes.len(), 1);
        let mesh = &meshes[0];
        assert_eq!(mesh.name, "quad");
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.faces.len(), 2);
        for vertex in &mesh.vertices {
            assert_relative_eq!(vertex.normal, Vector3::z(), epsilon = 1e-6);
        }
    }

    #[test]
    fn explicit_normals_are_normalized() {
        let obj = "\
v 0 0 0
v 1 0 0
v 0 1 0
vn 0 0 2
f 1//1 2//1 3//1
";
        let meshes = load_obj_from_reader(&mut Cursor::new(obj)).unwrap();
        for vertex in &meshes[0].vertices {
            assert_relative_eq!(vertex.normal, Vector3::z(), epsilon = 1e-6);
        }
    }

    #[test]
    fn unused_vertex_gets_default_normal() {
        let positions = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(5.0, 5.0, 5.0),
        ];
        let normals = generate_smooth_vertex_normals(&positions, &[Face::new(0, 1, 2)]);
        assert_relative_eq!(normals[0], Vector3::z(), epsilon = 1e-6);
        assert_eq!(normals[3], Vector3::y());
    }

    #[test]
    fn empty_input_is_an_import_error() {
        assert!(matches!(
            load_obj_from_reader(&mut Cursor::new("")),
            Err(RenderError::Import(_))
        ));
    }
}

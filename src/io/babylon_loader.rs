use crate::error::{RenderError, Result};
use crate::scene::mesh::{Face, Mesh, Vertex};
use log::{info, warn};
use nalgebra::{Point3, Vector3};
use serde::Deserialize;
use std::path::Path;

/// .babylon 文件中我们关心的部分
#[derive(Debug, Deserialize)]
struct BabylonScene {
    #[serde(default)]
    meshes: Vec<BabylonMesh>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BabylonMesh {
    #[serde(default)]
    name: String,
    /// 扁平顶点数组：位置(3) 法线(3) 之后跟 uv_count 组纹理坐标
    #[serde(default)]
    vertices: Vec<f32>,
    #[serde(default)]
    indices: Vec<usize>,
    #[serde(default)]
    position: Option<[f32; 3]>,
    #[serde(default)]
    uv_count: u32,
}

/// 每个顶点占用的浮点数个数
fn vertex_stride(uv_count: u32) -> Option<usize> {
    match uv_count {
        0 => Some(6),
        1 => Some(8),
        2 => Some(10),
        _ => None,
    }
}

/// 从 .babylon 文件加载所有网格
pub fn load_babylon_file<P: AsRef<Path>>(path: P) -> Result<Vec<Mesh>> {
    let path = path.as_ref();
    info!("加载 Babylon 场景: {:?}", path);
    let content = std::fs::read_to_string(path)?;
    load_babylon_from_str(&content)
}

/// 从 JSON 字符串解析网格
pub fn load_babylon_from_str(content: &str) -> Result<Vec<Mesh>> {
    let scene: BabylonScene = serde_json::from_str(content)?;

    let meshes = scene
        .meshes
        .into_iter()
        .map(convert_mesh)
        .collect::<Result<Vec<_>>>()?;

    info!("从 Babylon 场景中加载了 {} 个网格", meshes.len());
    Ok(meshes)
}

fn convert_mesh(source: BabylonMesh) -> Result<Mesh> {
    let stride = vertex_stride(source.uv_count).ok_or_else(|| {
        RenderError::Import(format!(
            "网格 '{}' 的 uvCount {} 不受支持",
            source.name, source.uv_count
        ))
    })?;

    if source.vertices.len() % stride != 0 {
        warn!(
            "网格 '{}' 的顶点数组长度 {} 不是 {} 的倍数，忽略末尾数据",
            source.name,
            source.vertices.len(),
            stride
        );
    }
    if source.indices.len() % 3 != 0 {
        warn!(
            "网格 '{}' 的索引数量 {} 不是 3 的倍数，忽略末尾数据",
            source.name,
            source.indices.len()
        );
    }

    let mut zero_normals = 0;
    let vertices: Vec<Vertex> = source
        .vertices
        .chunks_exact(stride)
        .map(|v| {
            let position = Point3::new(v[0], v[1], v[2]);
            let raw = Vector3::new(v[3], v[4], v[5]);
            let normal = raw.try_normalize(f32::EPSILON).unwrap_or_else(|| {
                zero_normals += 1;
                raw
            });
            Vertex::new(position, normal)
        })
        .collect();

    if zero_normals > 0 {
        warn!("网格 '{}' 中有 {} 个零长度法线", source.name, zero_normals);
    }

    let faces = source
        .indices
        .chunks_exact(3)
        .map(|f| Face::new(f[0], f[1], f[2]))
        .collect();

    let position = source.position.map(Vector3::from).unwrap_or_else(Vector3::zeros);

    let mesh = Mesh::new(source.name, vertices, faces)?.with_position(position);
    info!(
        "网格 '{}': {} 个顶点, {} 个三角形",
        mesh.name,
        mesh.vertices.len(),
        mesh.faces.len()
    );
    Ok(mesh)
}

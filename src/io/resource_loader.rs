use crate::error::{RenderError, Result};
use crate::geometry::camera::Camera;
use crate::io::babylon_loader::load_babylon_file;
use crate::io::obj_loader::load_obj_model;
use crate::io::render_settings::{RenderSettings, parse_point3};
use crate::scene::mesh::Mesh;
use crate::scene::scene_utils::Scene;
use log::info;
use std::path::Path;
use std::time::Instant;

/// 资源加载器，按扩展名分派到各个模型导入器
pub struct ResourceLoader;

impl ResourceLoader {
    /// 按扩展名加载网格：`.babylon` 或 `.obj`
    pub fn load_meshes<P: AsRef<Path>>(path: P) -> Result<Vec<Mesh>> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(RenderError::Import(format!(
                "场景文件未找到: {}",
                path.display()
            )));
        }

        let load_start = Instant::now();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        let meshes = match extension.as_deref() {
            Some("babylon") => load_babylon_file(path)?,
            Some("obj") => load_obj_model(path)?,
            _ => {
                return Err(RenderError::Import(format!(
                    "不支持的场景文件格式: {}",
                    path.display()
                )));
            }
        };

        info!("模型加载耗时 {:?}", load_start.elapsed());
        Ok(meshes)
    }

    /// 根据设置创建场景；未指定场景文件时使用内置立方体
    pub fn load_scene(settings: &RenderSettings) -> Result<Scene> {
        let invalid = |e: String| RenderError::InvalidConfiguration(e);
        let camera = Camera::new(
            parse_point3(&settings.camera_from).map_err(invalid)?,
            parse_point3(&settings.camera_at).map_err(invalid)?,
        );

        let meshes = match &settings.scene {
            Some(path) => Self::load_meshes(path)?,
            None => {
                info!("未指定场景文件，使用内置立方体");
                vec![Mesh::cube()]
            }
        };

        let scene = Scene::new(camera, meshes);
        info!(
            "场景包含 {} 个网格, {} 个三角形",
            scene.meshes.len(),
            scene.triangle_count()
        );
        Ok(scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    #[test]
    fn default_settings_give_cube_scene() {
        let scene = ResourceLoader::load_scene(&RenderSettings::default()).unwrap();
        assert_eq!(scene.meshes.len(), 1);
        assert_eq!(scene.triangle_count(), 12);
        assert_eq!(scene.camera.position, Point3::new(0.0, 0.0, 10.0));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let path = std::env::temp_dir().join(format!("soft_render_{}.stl", std::process::id()));
        std::fs::write(&path, "solid").unwrap();
        let result = ResourceLoader::load_meshes(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(RenderError::Import(_))));
    }

    #[test]
    fn missing_file_is_rejected() {
        assert!(matches!(
            ResourceLoader::load_meshes("does/not/exist.babylon"),
            Err(RenderError::Import(_))
        ));
    }

    #[test]
    fn babylon_file_is_loaded_by_extension() {
        let path = std::env::temp_dir().join(format!("soft_render_{}.babylon", std::process::id()));
        let json = r#"{ "meshes": [{
            "name": "t",
            "vertices": [0,0,0,0,0,1, 1,0,0,0,0,1, 0,1,0,0,0,1],
            "indices": [0,1,2]
        }] }"#;
        std::fs::write(&path, json).unwrap();
        let meshes = ResourceLoader::load_meshes(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(meshes.len(), 1);
        assert_eq!(meshes[0].faces.len(), 1);
    }
}

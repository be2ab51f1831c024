pub mod mesh;
pub mod scene_utils;

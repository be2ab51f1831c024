use nalgebra::{Point3, Vector3};

/// 计算法线与指向光源方向的夹角余弦（NdotL），范围 [0, 1]
///
/// 零长度法线或光源与顶点重合时返回 0。
pub fn compute_ndotl(
    world_position: &Point3<f32>,
    world_normal: &Vector3<f32>,
    light_position: &Point3<f32>,
) -> f32 {
    let light_dir = (light_position - world_position).try_normalize(f32::EPSILON);
    let normal = world_normal.try_normalize(f32::EPSILON);

    match (normal, light_dir) {
        // f32::max 会丢弃 NaN，结果不会是 NaN
        (Some(n), Some(l)) => n.dot(&l).max(0.0),
        _ => 0.0,
    }
}

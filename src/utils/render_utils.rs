//! 多帧渲染流程：清屏 -> 渲染 -> 显示，帧间推进动画

use crate::core::renderer::Renderer;
use crate::error::{RenderError, Result};
use crate::io::render_settings::{RenderSettings, parse_vec3};
use crate::scene::scene_utils::Scene;
use crate::utils::save_utils::{ImageSequenceTarget, save_depth_map};
use log::{debug, info};
use std::time::Instant;

/// 连续渲染 `settings.frames` 帧并依次交给 `target`
///
/// 每帧结束后把 `rotation_step` 累加到所有网格上。
/// 开启 `save_depth` 时额外保存每帧的深度图。
pub fn run_frames(
    renderer: &mut Renderer,
    scene: &mut Scene,
    settings: &RenderSettings,
    target: &mut ImageSequenceTarget,
) -> Result<()> {
    let rotation_step =
        parse_vec3(&settings.rotation_step).map_err(RenderError::InvalidConfiguration)?;
    let [r, g, b, a] = renderer.config.clear_color;

    let total_start = Instant::now();
    for frame in 0..settings.frames {
        let frame_start = Instant::now();
        let frame_index = target.frame_index();

        renderer.clear(r, g, b, a);
        renderer.render(&scene.camera, &scene.meshes)?;
        renderer.present(target)?;

        if settings.save_depth {
            save_depth_map(
                &target.depth_path(frame_index),
                &renderer.frame_buffer.depth_values(),
                renderer.width(),
                renderer.height(),
            )?;
        }

        scene.advance_rotation(&rotation_step);
        debug!("帧 {} 完成，耗时 {:?}", frame, frame_start.elapsed());
    }

    if settings.frames > 0 {
        let elapsed = total_start.elapsed();
        info!(
            "共渲染 {} 帧，总耗时 {:?}，平均 {:.2} FPS",
            settings.frames,
            elapsed,
            settings.frames as f64 / elapsed.as_secs_f64().max(f64::EPSILON)
        );
    }
    Ok(())
}

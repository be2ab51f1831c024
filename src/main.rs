use anyhow::Context;
use log::info;
use soft_render::core::render_config::RenderConfig;
use soft_render::core::renderer::Renderer;
use soft_render::io::resource_loader::ResourceLoader;
use soft_render::io::simple_cli::SimpleCli;
use soft_render::utils::render_utils::run_frames;
use soft_render::utils::save_utils::ImageSequenceTarget;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = SimpleCli::process().context("解析命令行和配置失败")?;
    settings
        .validate()
        .map_err(anyhow::Error::msg)
        .context("渲染参数无效")?;

    let mut scene = ResourceLoader::load_scene(&settings).context("加载场景失败")?;

    let config = RenderConfig::from_settings(&settings).context("构建渲染配置失败")?;
    let mut renderer = Renderer::with_config(settings.width, settings.height, config)
        .context("创建渲染设备失败")?;
    info!(
        "渲染设备 {}x{}，{} 个工作线程",
        renderer.width(),
        renderer.height(),
        renderer.worker_count()
    );

    let mut target = ImageSequenceTarget::new(&settings.output_dir, &settings.output)
        .with_context(|| format!("无法创建输出目录 {}", settings.output_dir))?;

    run_frames(&mut renderer, &mut scene, &settings, &mut target).context("渲染失败")?;

    info!("输出已保存到 {}", settings.output_dir);
    Ok(())
}

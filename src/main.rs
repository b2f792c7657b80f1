use log::info;
use soft_rasterizer::demos::DemoScene;
use soft_rasterizer::io::render_settings::{RenderMode, RenderSettings};
use soft_rasterizer::io::simple_cli::SimpleCli;
use soft_rasterizer::utils::save_utils::save_render_result;
use soft_rasterizer::{
    ColorExt, FrameBuffer, LineProcessor, LineRenderer, MeshRenderer, PointProcessor,
    PointRenderer, RenderStats, TriangleProcessor, TriangleRenderer,
};
use std::time::Instant;

/// 按渲染模式构建对应的渲染器
fn create_renderer(settings: &RenderSettings) -> Box<dyn MeshRenderer> {
    match settings.mode {
        RenderMode::Points => Box::new(PointRenderer::new(
            PointProcessor::default().with_clipping(settings.clip_to_frustum),
        )),
        RenderMode::Lines | RenderMode::Wireframe => Box::new(LineRenderer::new(
            LineProcessor::default()
                .with_clipping(settings.clip_to_frustum)
                .with_wireframe(settings.mode == RenderMode::Wireframe),
        )),
        RenderMode::Triangles => Box::new(TriangleRenderer::new(
            TriangleProcessor::default()
                .with_clipping(settings.clip_to_frustum)
                .with_backface_culling(settings.backface_culling),
        )),
    }
}

fn main() -> Result<(), String> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = SimpleCli::process()?;
    let start_time = Instant::now();

    info!(
        "渲染 {}x{} 模式={} 裁剪={} 剔除={}",
        settings.width,
        settings.height,
        settings.mode.as_str(),
        settings.clip_to_frustum,
        settings.backface_culling
    );

    let scene = DemoScene::from_settings(&settings)?;

    let mut color_buffer: FrameBuffer<u32> = FrameBuffer::new(settings.width, settings.height);
    let mut depth_buffer: FrameBuffer<f32> = FrameBuffer::new(settings.width, settings.height);
    color_buffer.clear_buffer(settings.clear_color_value()?.to_rgba32());
    depth_buffer.clear_buffer(1.0);

    let mut renderer = create_renderer(&settings);
    let mut total = RenderStats::default();
    for mesh in &scene.meshes {
        let vertices = mesh.vertices_for(settings.mode);
        let stats = renderer.render(
            &vertices,
            &scene.mvp(mesh),
            &mut color_buffer,
            &mut depth_buffer,
        );
        info!(
            "{}: {} 个图元, {} 个被拒绝, {} 个片元, {} 个写入",
            mesh.name, stats.primitives, stats.rejected, stats.fragments, stats.written
        );
        total.primitives += stats.primitives;
        total.rejected += stats.rejected;
        total.fragments += stats.fragments;
        total.written += stats.written;
    }

    save_render_result(
        &color_buffer,
        settings.save_depth.then_some(&depth_buffer),
        &settings.output_dir,
        &settings.output,
    )?;

    info!(
        "完成: 共 {} 个片元, {} 个写入, 耗时 {:?}",
        total.fragments,
        total.written,
        start_time.elapsed()
    );
    Ok(())
}

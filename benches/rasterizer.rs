use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use nalgebra::{Point3, Vector3};
use soft_render::core::frame_buffer::FrameBuffer;
use soft_render::core::rasterizer::{ProjectedVertex, TriangleData, rasterize_triangle};
use soft_render::core::render_config::RenderConfig;
use soft_render::material_system::color::rgba;
use soft_render::material_system::light::Light;
use soft_render::{Camera, Mesh, Renderer};

const BUFFER_WIDTH: usize = 800;
const BUFFER_HEIGHT: usize = 600;

fn screen_triangle(points: [(f32, f32); 3]) -> TriangleData {
    let vertices = points.map(|(x, y)| {
        ProjectedVertex::new(Point3::new(x, y, 0.5), Point3::origin(), Vector3::z())
    });
    TriangleData::new(vertices, rgba(1.0, 0.0, 0.0, 1.0))
}

fn benchmark_single_triangle(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_triangle");
    let light = Light::default();
    let fb = FrameBuffer::new(BUFFER_WIDTH, BUFFER_HEIGHT).unwrap();

    for (name, triangle) in [
        ("small", screen_triangle([(100.0, 100.0), (120.0, 100.0), (110.0, 120.0)])),
        ("medium", screen_triangle([(100.0, 100.0), (300.0, 100.0), (200.0, 300.0)])),
        ("large", screen_triangle([(50.0, 50.0), (750.0, 100.0), (400.0, 550.0)])),
    ] {
        group.bench_with_input(BenchmarkId::new("scanline", name), &triangle, |b, tri| {
            b.iter(|| {
                fb.clear(0, 0, 0, 255);
                rasterize_triangle(black_box(tri), &light, &fb);
            });
        });
    }

    group.finish();
}

fn benchmark_cube_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("cube_frame");
    let camera = Camera::default();
    let meshes = vec![Mesh::cube().with_rotation(Vector3::new(0.4, 0.6, 0.0))];

    for workers in [1, 2, 4] {
        let config = RenderConfig::default().with_worker_threads(workers);
        let mut renderer = Renderer::with_config(BUFFER_WIDTH, BUFFER_HEIGHT, config).unwrap();
        group.bench_with_input(BenchmarkId::new("workers", workers), &meshes, |b, meshes| {
            b.iter(|| {
                renderer.clear(0, 0, 0, 255);
                renderer.render(&camera, black_box(meshes)).unwrap();
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_single_triangle, benchmark_cube_frame);
criterion_main!(benches);

use nalgebra::{Matrix4, Vector4};
use soft_rasterizer::{
    Color, ColorExt, FrameBuffer, LineProcessor, LineRenderer, PointProcessor, PointRenderer,
    TriangleProcessor, TriangleRenderer, Vertex,
};

const SIZE: u32 = 8;

fn clip_vertex(x: f32, y: f32, z: f32, w: f32, col: Color) -> Vertex {
    Vertex::new(Vector4::new(x, y, z, w), col)
}

fn buffers() -> (FrameBuffer<u32>, FrameBuffer<f32>) {
    let mut color = FrameBuffer::new(SIZE, SIZE);
    let mut depth = FrameBuffer::new(SIZE, SIZE);
    color.clear_buffer(Color::grey().to_rgba32());
    depth.clear_buffer(1.0);
    (color, depth)
}

fn identity() -> Matrix4<f32> {
    Matrix4::identity()
}

/// NDC 中逆时针的三角形，覆盖屏幕中心
fn front_facing_triangle(z: f32, col: Color) -> Vec<Vertex> {
    vec![
        clip_vertex(-0.75, -0.75, z, 1.0, col),
        clip_vertex(0.75, -0.75, z, 1.0, col),
        clip_vertex(0.0, 0.75, z, 1.0, col),
    ]
}

#[test]
fn perspective_correct_color_at_screen_midpoint() {
    let (mut color, mut depth) = buffers();
    // NDC 中从 x=-0.5 (w=1) 到 x=0.5 (w=2)，屏幕上是 (2,4) 到 (6,4)
    let vertices = [
        clip_vertex(-0.5, 0.0, 0.0, 1.0, Color::red()),
        clip_vertex(1.0, 0.0, 0.0, 2.0, Color::blue()),
    ];

    let mut renderer = LineRenderer::new(LineProcessor::default());
    let stats = renderer.render(&vertices, &identity(), &mut color, &mut depth);
    assert_eq!(stats.primitives, 1);
    assert_eq!(stats.fragments, 5);

    let mid = Color::from_rgba32(color[color.index_at(4, 4)]);
    assert!((mid.x - 2.0 / 3.0).abs() < 0.01, "{mid:?}");
    assert!((mid.z - 1.0 / 3.0).abs() < 0.01, "{mid:?}");
    assert_eq!(depth[depth.index_at(4, 4)], 0.0);
}

#[test]
fn perspective_correct_color_across_a_triangle_span() {
    let mut color: FrameBuffer<u32> = FrameBuffer::new(64, 64);
    let mut depth: FrameBuffer<f32> = FrameBuffer::new(64, 64);
    color.clear_buffer(Color::grey().to_rgba32());
    depth.clear_buffer(1.0);

    // NDC 中 x 从 -0.9 到 0.9 的正方形，左侧 w=1 为红色，右侧 w=3 为蓝色
    let left_bottom = clip_vertex(-0.9, -0.9, 0.0, 1.0, Color::red());
    let left_top = clip_vertex(-0.9, 0.9, 0.0, 1.0, Color::red());
    let right_bottom = clip_vertex(2.7, -2.7, 0.0, 3.0, Color::blue());
    let right_top = clip_vertex(2.7, 2.7, 0.0, 3.0, Color::blue());
    let quad = [
        left_bottom,
        right_bottom,
        right_top,
        left_bottom,
        right_top,
        left_top,
    ];

    let mut renderer = TriangleRenderer::new(TriangleProcessor::default());
    let stats = renderer.render(&quad, &identity(), &mut color, &mut depth);
    assert_eq!(stats.primitives, 2);
    assert_eq!(stats.rejected, 0);

    // 屏幕中线是 NDC x = 0：1/w 的权重为 1 : 1/3，颜色为 0.75 红 + 0.25 蓝
    for y in [10, 20, 32, 50] {
        let mid = Color::from_rgba32(color[color.index_at(32, y)]);
        assert!((mid.x - 0.75).abs() < 0.02, "row {y}: {mid:?}");
        assert!((mid.z - 0.25).abs() < 0.02, "row {y}: {mid:?}");
        assert!(mid.y.abs() < 0.01, "row {y}: {mid:?}");
    }
}

#[test]
fn depth_test_is_idempotent() {
    let (mut color, mut depth) = buffers();
    let triangle = front_facing_triangle(0.25, Color::green());
    let mut renderer = TriangleRenderer::new(TriangleProcessor::default());

    let first = renderer.render(&triangle, &identity(), &mut color, &mut depth);
    assert!(first.written > 0);
    let color_once = color.as_slice().to_vec();
    let depth_once = depth.as_slice().to_vec();

    let second = renderer.render(&triangle, &identity(), &mut color, &mut depth);
    assert_eq!(second.fragments, first.fragments);
    assert_eq!(second.written, 0);
    assert_eq!(color.as_slice(), &color_once[..]);
    assert_eq!(depth.as_slice(), &depth_once[..]);
}

#[test]
fn nearer_triangle_wins_regardless_of_order() {
    let near = front_facing_triangle(-0.5, Color::red());
    let far = front_facing_triangle(0.5, Color::blue());
    let mut renderer = TriangleRenderer::new(TriangleProcessor::default());

    for order in [[&near, &far], [&far, &near]] {
        let (mut color, mut depth) = buffers();
        for mesh in order {
            renderer.render(mesh, &identity(), &mut color, &mut depth);
        }
        assert_eq!(color[color.index_at(4, 4)], Color::red().to_rgba32());
        assert_eq!(depth[depth.index_at(4, 4)], -0.5);
    }
}

#[test]
fn points_outside_the_volume_are_rejected() {
    let (mut color, mut depth) = buffers();
    let vertices = [
        clip_vertex(0.0, 0.0, 0.0, 1.0, Color::white()),
        clip_vertex(2.0, 0.0, 0.0, 1.0, Color::white()),
        clip_vertex(0.0, 0.0, -1.5, 1.0, Color::white()),
    ];

    let mut renderer = PointRenderer::new(PointProcessor::default());
    let stats = renderer.render(&vertices, &identity(), &mut color, &mut depth);
    assert_eq!(stats.primitives, 1);
    assert_eq!(stats.rejected, 2);
    assert_eq!(stats.fragments, 1);
    assert_eq!(color[color.index_at(4, 4)], Color::white().to_rgba32());

    // 关闭裁剪后越界的点被钳制到边界像素上
    let (mut color, mut depth) = buffers();
    let mut renderer = PointRenderer::new(PointProcessor::default().with_clipping(false));
    let stats = renderer.render(&vertices, &identity(), &mut color, &mut depth);
    assert_eq!(stats.fragments, 3);
}

#[test]
fn line_fully_outside_produces_no_fragments() {
    let (mut color, mut depth) = buffers();
    let vertices = [
        clip_vertex(2.0, 0.0, 0.0, 1.0, Color::white()),
        clip_vertex(3.0, 0.5, 0.0, 1.0, Color::white()),
    ];

    let mut renderer = LineRenderer::new(LineProcessor::default());
    let stats = renderer.render(&vertices, &identity(), &mut color, &mut depth);
    assert_eq!(stats.primitives, 0);
    assert_eq!(stats.rejected, 1);
    assert_eq!(stats.fragments, 0);
    assert!(depth.as_slice().iter().all(|&d| d == 1.0));
}

#[test]
fn straddling_line_is_cut_at_the_boundary() {
    let vertices = [
        clip_vertex(-0.5, 0.0, 0.0, 1.0, Color::white()),
        clip_vertex(3.0, 0.0, 0.0, 1.0, Color::white()),
    ];

    // 裁剪到 x = w，屏幕上是 x = 2..=8
    let (mut color, mut depth) = buffers();
    let mut renderer = LineRenderer::new(LineProcessor::default());
    let stats = renderer.render(&vertices, &identity(), &mut color, &mut depth);
    assert_eq!(stats.primitives, 1);
    assert_eq!(stats.fragments, 7);

    // 不裁剪时一直延伸到 x = 16
    let (mut color, mut depth) = buffers();
    let mut renderer = LineRenderer::new(LineProcessor::default().with_clipping(false));
    let stats = renderer.render(&vertices, &identity(), &mut color, &mut depth);
    assert_eq!(stats.fragments, 15);
}

#[test]
fn line_crossing_the_far_plane_ends_at_depth_one() {
    let vertices = [
        clip_vertex(-0.5, 0.0, 0.0, 1.0, Color::white()),
        clip_vertex(0.5, 0.0, 3.0, 2.0, Color::white()),
    ];

    // 清成大于1的深度，落在远平面上的片元也能写入
    let (mut color, mut depth) = buffers();
    depth.clear_buffer(2.0);
    let mut renderer = LineRenderer::new(LineProcessor::default());
    let stats = renderer.render(&vertices, &identity(), &mut color, &mut depth);

    // 在 z = w 处截断，交点 (0, 0, 1.5, 1.5) 落在屏幕 (4, 4)
    assert_eq!(stats.primitives, 1);
    assert_eq!(stats.fragments, 3);
    assert_eq!(stats.written, 3);
    assert_eq!(depth[depth.index_at(2, 4)], 0.0);
    assert!((depth[depth.index_at(3, 4)] - 0.5).abs() < 1e-6);
    assert!((depth[depth.index_at(4, 4)] - 1.0).abs() < 1e-6);
    assert_eq!(depth[depth.index_at(5, 4)], 2.0);

    // 不裁剪时终点是 NDC (0.25, 0, 1.5)，深度越出 [-1, 1]
    let (mut color, mut depth) = buffers();
    depth.clear_buffer(2.0);
    let mut renderer = LineRenderer::new(LineProcessor::default().with_clipping(false));
    let stats = renderer.render(&vertices, &identity(), &mut color, &mut depth);
    assert_eq!(stats.fragments, 4);
    assert!((depth[depth.index_at(5, 4)] - 1.5).abs() < 1e-6);
}

#[test]
fn wireframe_draws_three_edges_per_triangle() {
    let (mut color, mut depth) = buffers();
    let triangle = front_facing_triangle(0.0, Color::white());

    let mut renderer = LineRenderer::new(LineProcessor::default().with_wireframe(true));
    let stats = renderer.render(&triangle, &identity(), &mut color, &mut depth);
    assert_eq!(stats.primitives, 3);
    // 内部不被填充
    assert_eq!(color[color.index_at(4, 4)], Color::grey().to_rgba32());
}

#[test]
fn straddling_triangle_is_clipped_into_a_fan() {
    let vertices = [
        clip_vertex(-0.5, -0.5, 0.0, 1.0, Color::green()),
        clip_vertex(3.0, -0.5, 0.0, 1.0, Color::green()),
        clip_vertex(-0.5, 0.5, 0.0, 1.0, Color::green()),
    ];

    let (mut color, mut depth) = buffers();
    let mut renderer = TriangleRenderer::new(TriangleProcessor::default());
    let stats = renderer.render(&vertices, &identity(), &mut color, &mut depth);

    // 与 x = w 相交得到四边形，剖分为两个三角形
    assert_eq!(stats.primitives, 2);
    assert_eq!(stats.rejected, 1);
    assert!(stats.written > 0);
    assert_eq!(color[color.index_at(3, 4)], Color::green().to_rgba32());
}

#[test]
fn triangle_with_a_vertex_behind_the_eye_is_clipped() {
    // 第三个顶点 w < 0，位于视点后方
    let vertices = [
        clip_vertex(-0.5, -0.5, 0.0, 1.0, Color::green()),
        clip_vertex(0.5, -0.5, 0.0, 1.0, Color::green()),
        clip_vertex(0.0, -0.5, 0.5, -1.0, Color::green()),
    ];

    let (mut color, mut depth) = buffers();
    let mut renderer =
        TriangleRenderer::new(TriangleProcessor::default().with_backface_culling(false));
    let stats = renderer.render(&vertices, &identity(), &mut color, &mut depth);

    // 只保留 w > 0 的部分：y = -w 截出的四边形，剖分为至少两个三角形
    assert_eq!(stats.rejected, 1);
    assert!(stats.primitives >= 2, "{stats:?}");
    assert!(stats.written > 0);
    for &d in depth.as_slice() {
        assert!((-1.0..=1.0).contains(&d), "depth {d} outside [-1, 1]");
    }

    // 四边形在屏幕上是 (2,6) (6,6) (7,8) (1,8)，第7行的深度介于 0 和 0.25 之间
    let d = depth[depth.index_at(4, 7)];
    assert!(d > 0.0 && d < 0.25, "depth {d}");
    assert_eq!(color[color.index_at(4, 7)], Color::green().to_rgba32());
}

#[test]
fn triangle_outside_the_volume_is_dropped() {
    let vertices = [
        clip_vertex(2.0, -0.5, 0.0, 1.0, Color::green()),
        clip_vertex(3.0, -0.5, 0.0, 1.0, Color::green()),
        clip_vertex(2.5, 0.5, 0.0, 1.0, Color::green()),
    ];

    let (mut color, mut depth) = buffers();
    let mut renderer = TriangleRenderer::new(TriangleProcessor::default());
    let stats = renderer.render(&vertices, &identity(), &mut color, &mut depth);
    assert_eq!(stats.primitives, 0);
    assert_eq!(stats.fragments, 0);
}

#[test]
fn back_faces_are_culled_only_when_enabled() {
    let mut triangle = front_facing_triangle(0.0, Color::blue());
    triangle.swap(1, 2);

    let (mut color, mut depth) = buffers();
    let mut renderer = TriangleRenderer::new(TriangleProcessor::default());
    let stats = renderer.render(&triangle, &identity(), &mut color, &mut depth);
    assert_eq!(stats.primitives, 0);
    assert_eq!(stats.rejected, 1);
    assert_eq!(stats.fragments, 0);

    let mut renderer =
        TriangleRenderer::new(TriangleProcessor::default().with_backface_culling(false));
    let stats = renderer.render(&triangle, &identity(), &mut color, &mut depth);
    assert_eq!(stats.primitives, 1);
    assert_eq!(color[color.index_at(4, 4)], Color::blue().to_rgba32());
}

#[test]
fn renderers_can_be_switched_at_runtime() {
    use soft_rasterizer::MeshRenderer;

    let triangle = front_facing_triangle(0.0, Color::white());
    let mut renderers: Vec<Box<dyn MeshRenderer>> = vec![
        Box::new(PointRenderer::new(PointProcessor::default())),
        Box::new(LineRenderer::new(LineProcessor::default().with_wireframe(true))),
        Box::new(TriangleRenderer::new(TriangleProcessor::default())),
    ];

    let counts: Vec<usize> = renderers
        .iter_mut()
        .map(|renderer| {
            let (mut color, mut depth) = buffers();
            renderer
                .render(&triangle, &identity(), &mut color, &mut depth)
                .primitives
        })
        .collect();
    assert_eq!(counts, vec![3, 3, 1]);
}

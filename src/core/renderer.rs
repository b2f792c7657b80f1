use crate::core::frame_buffer::FrameBuffer;
use crate::core::line_processor::LineProcessor;
use crate::core::point_processor::PointProcessor;
use crate::core::triangle_processor::TriangleProcessor;
use crate::geometry::color::ColorExt;
use crate::geometry::primitives::Fragment;
use crate::geometry::vertex::Vertex;
use log::debug;
use nalgebra::Matrix4;

/// 管线中与图元类型相关的固定功能部分
///
/// 实现者负责图元装配、裁剪、透视除法、视口变换、剔除和光栅化，
/// 把生成的片元追加到 `fragments` 中。
pub trait PrimitiveProcessor {
    fn process_primitives(
        &mut self,
        vertices: &[Vertex],
        width: u32,
        height: u32,
        fragments: &mut Vec<Fragment>,
    ) -> PrimitiveStats;
}

/// 图元阶段的统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrimitiveStats {
    /// 实际送入光栅化的图元数
    pub rasterized: usize,
    /// 被裁剪或剔除标记的图元数
    pub rejected: usize,
}

/// 一次 `render` 调用的统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub primitives: usize,
    pub rejected: usize,
    pub fragments: usize,
    /// 通过深度测试并写入缓冲区的片元数
    pub written: usize,
}

/// 渲染管线：顶点阶段 -> 图元阶段 -> 片元阶段 -> 写回
///
/// 保存的顶点和片元列表只用于复用内存，调用之间不携带语义状态。
#[derive(Debug, Clone, Default)]
pub struct Renderer<P> {
    pub processor: P,
    vertices: Vec<Vertex>,
    fragments: Vec<Fragment>,
}

pub type PointRenderer = Renderer<PointProcessor>;
pub type LineRenderer = Renderer<LineProcessor>;
pub type TriangleRenderer = Renderer<TriangleProcessor>;

impl<P: PrimitiveProcessor> Renderer<P> {
    pub fn new(processor: P) -> Self {
        Self {
            processor,
            vertices: Vec::new(),
            fragments: Vec::new(),
        }
    }

    /// 用 mvp 变换渲染顶点流到颜色缓冲和深度缓冲
    pub fn render(
        &mut self,
        vertices: &[Vertex],
        mvp: &Matrix4<f32>,
        color_buffer: &mut FrameBuffer<u32>,
        depth_buffer: &mut FrameBuffer<f32>,
    ) -> RenderStats {
        debug_assert_eq!(color_buffer.width(), depth_buffer.width());
        debug_assert_eq!(color_buffer.height(), depth_buffer.height());

        self.vertices.clear();
        self.vertices.extend_from_slice(vertices);
        self.fragments.clear();

        // 1. 顶点着色器
        process_vertices(mvp, &mut self.vertices);

        // 2. 固定管线部分
        let primitive_stats = self.processor.process_primitives(
            &self.vertices,
            color_buffer.width(),
            color_buffer.height(),
            &mut self.fragments,
        );

        // 3. 片元着色器
        process_fragments(&mut self.fragments);

        // 4. 深度测试并写回帧缓冲
        let written = write_to_frame_buffer(&self.fragments, color_buffer, depth_buffer);

        let stats = RenderStats {
            primitives: primitive_stats.rasterized,
            rejected: primitive_stats.rejected,
            fragments: self.fragments.len(),
            written,
        };
        debug!(
            "render: {} 个图元光栅化, {} 个被拒绝, {} 个片元, {} 个写入",
            stats.primitives, stats.rejected, stats.fragments, stats.written
        );
        stats
    }
}

/// 可在运行时切换的渲染器接口
pub trait MeshRenderer {
    fn render(
        &mut self,
        vertices: &[Vertex],
        mvp: &Matrix4<f32>,
        color_buffer: &mut FrameBuffer<u32>,
        depth_buffer: &mut FrameBuffer<f32>,
    ) -> RenderStats;
}

impl<P: PrimitiveProcessor> MeshRenderer for Renderer<P> {
    fn render(
        &mut self,
        vertices: &[Vertex],
        mvp: &Matrix4<f32>,
        color_buffer: &mut FrameBuffer<u32>,
        depth_buffer: &mut FrameBuffer<f32>,
    ) -> RenderStats {
        Renderer::render(self, vertices, mvp, color_buffer, depth_buffer)
    }
}

/// 顶点着色器：只变换位置，颜色原样传递
fn process_vertices(mvp: &Matrix4<f32>, vertices: &mut [Vertex]) {
    for vertex in vertices.iter_mut() {
        vertex.pos = mvp * vertex.pos;
    }
}

/// 片元着色器的扩展点，目前不修改片元
fn process_fragments(_fragments: &mut [Fragment]) {}

/// 深度测试（严格小于）并写入颜色与深度，返回写入的片元数
///
/// 片元按生成顺序写入，同一像素上后生成且通过测试的片元覆盖先前的片元。
pub fn write_to_frame_buffer(
    fragments: &[Fragment],
    color_buffer: &mut FrameBuffer<u32>,
    depth_buffer: &mut FrameBuffer<f32>,
) -> usize {
    let mut written = 0;
    for fragment in fragments {
        let index = depth_buffer.index_at(fragment.x, fragment.y);
        if fragment.depth < depth_buffer[index] {
            color_buffer[index] = fragment.color.to_rgba32();
            depth_buffer[index] = fragment.depth;
            written += 1;
        }
    }
    written
}
